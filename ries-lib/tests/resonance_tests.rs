mod common;

use std::collections::BTreeMap;
use std::f64::consts::PI;

use approx::assert_relative_eq;
use ries::constants::{ATOMIC_MASS_UNIT_MEV, PI_HBAR_C_SQUARED};
use ries::{
    BreitWigner, CrossSection, Distribution, EnergyScale, Gauss, GridLimits, MaxwellBoltzmann,
    NewtonOptions, NewtonOutcome, Parity, PseudoVoigt, QuadOptions, Recoil, Resonance, RiesError,
    State, Transition, UniformResonance, Voigt, VoigtProfile, quad_partition,
};

use common::{B11_AMU, b11};

#[test]
fn test_energy_integrated_cross_section() {
    let b11 = b11();
    let r = UniformResonance::new(
        b11.ground_state(),
        b11.excited_state("5/2-_1").unwrap(),
        None,
        Recoil::None,
    )
    .unwrap();

    let expected = PI_HBAR_C_SQUARED / (4.444_98 * 4.444_98) * 1.5 * 0.55e-6;
    assert_eq!(r.resonance_energy(), 4.444_98);
    assert_eq!(r.transition().statistical_factor(), 1.5);
    assert_eq!(r.transition().branching_ratio(), 1.0);
    assert_eq!(r.energy_integrated_cross_section(), expected);

    // The generic line spreads the cross section over 1 MeV.
    assert_eq!(r.evaluate(4.444_98), expected);
    assert_eq!(r.evaluate_at(0.0, EnergyScale::Relative), expected);
    assert_eq!(r.evaluate(3.9), 0.0);
}

#[test]
fn test_breit_wigner_peak() {
    let b11 = b11();
    let bw = BreitWigner::new(
        b11.ground_state(),
        b11.excited_state("5/2-_1").unwrap(),
        None,
        Recoil::None,
    )
    .unwrap();
    let i = bw.energy_integrated_cross_section();
    assert_relative_eq!(bw.evaluate(4.444_98), i * 2.0 / (PI * 0.55e-6), max_relative = 1e-14);
    assert_relative_eq!(
        bw.evaluate_at(0.275e-6, EnergyScale::Relative),
        0.5 * bw.evaluate(4.444_98),
        max_relative = 1e-6
    );
}

#[test]
fn test_recoil_shifts_resonance_energy() {
    let b11 = b11();
    let t = Transition::new(
        b11.ground_state(),
        b11.excited_state("5/2-_1").unwrap(),
        None,
        Recoil::FreeNucleus { amu: B11_AMU },
    )
    .unwrap();
    let de = 4.444_98;
    assert_eq!(
        t.resonance_energy(),
        de * (1.0 + de / (2.0 * B11_AMU * ATOMIC_MASS_UNIT_MEV))
    );
}

#[test]
fn test_branching_ratio_to_final_state() {
    let b11 = b11();
    let t = Transition::new(
        b11.ground_state(),
        b11.excited_state("3/2-_2").unwrap(),
        Some(b11.excited_state("1/2-_1").unwrap()),
        Recoil::None,
    )
    .unwrap();
    assert_relative_eq!(t.branching_ratio(), 0.144, max_relative = 1e-12);
    assert_eq!(t.statistical_factor(), 1.0);
}

#[test]
fn test_missing_partial_width_is_an_error() {
    let b11 = b11();
    let err = Transition::new(
        b11.ground_state(),
        b11.excited_state("5/2-_1").unwrap(),
        Some(b11.excited_state("3/2-_2").unwrap()),
        Recoil::None,
    )
    .unwrap_err();
    assert_eq!(
        err,
        RiesError::UnknownTransition {
            from: "5/2-_1".to_string(),
            to: "3/2-_2".to_string()
        }
    );

    // No decay back to the initial state.
    let err = Transition::new(
        b11.excited_state("1/2-_1").unwrap(),
        b11.excited_state("5/2-_1").unwrap(),
        None,
        Recoil::None,
    )
    .unwrap_err();
    assert!(matches!(err, RiesError::UnknownTransition { .. }));
}

#[test]
fn test_downward_transition_is_rejected() {
    let b11 = b11();
    let err = Transition::new(
        b11.excited_state("5/2-_1").unwrap(),
        b11.excited_state("1/2-_1").unwrap(),
        None,
        Recoil::None,
    )
    .unwrap_err();
    assert!(matches!(err, RiesError::InvalidParameter(_)));
}

fn integrate_coverage<D: Distribution>(r: &Resonance<D>, coverage: f64) -> f64 {
    let interval = r.coverage_interval(coverage).unwrap();
    assert!(interval.advisory.is_none());
    let grid = r
        .equidistant_probability_grid((interval.low, interval.high).into(), 50)
        .unwrap();
    quad_partition(|e| r.evaluate(e), &grid, &QuadOptions::default())
        .unwrap()
        .integral
}

#[test]
fn test_coverage_interval_normalization() {
    let b11 = b11();
    let gs = b11.ground_state();
    let state = b11.excited_state("5/2-_1").unwrap();

    let bw = BreitWigner::new(gs, state, None, Recoil::None).unwrap();
    let i = bw.energy_integrated_cross_section();
    assert_relative_eq!(integrate_coverage(&bw, 0.5), 0.5 * i, max_relative = 1e-3);

    let gauss = Gauss::new(gs, state, None, B11_AMU, 300.0).unwrap();
    assert_relative_eq!(integrate_coverage(&gauss, 0.5), 0.5 * i, max_relative = 1e-3);

    let pseudo = PseudoVoigt::new(gs, state, None, B11_AMU, 300.0).unwrap();
    assert_relative_eq!(integrate_coverage(&pseudo, 0.5), 0.5 * i, max_relative = 1e-3);

    let voigt = Voigt::new(gs, state, None, B11_AMU, 300.0).unwrap();
    assert_relative_eq!(integrate_coverage(&voigt, 0.5), 0.5 * i, max_relative = 2e-2);
}

#[test]
fn test_coverage_interval_advisory() {
    let gs = State::ground("0", 0, Parity::Positive);
    let broad = State::excited(
        "1",
        2,
        Parity::Positive,
        1.0,
        BTreeMap::from([("0".to_string(), 1.0)]),
    )
    .unwrap();
    let bw = BreitWigner::new(&gs, &broad, None, Recoil::None).unwrap();

    let interval = bw.coverage_interval(0.9).unwrap();
    assert!(interval.low < 0.0);
    let advisory = interval.advisory.unwrap();
    assert_relative_eq!(advisory.max_coverage, 2.0 * 2.0f64.atan() / PI, max_relative = 1e-12);
    assert_eq!(interval.clamped().0, 0.0);

    let full = bw.coverage_interval(1.0).unwrap();
    assert_eq!(full.high, f64::INFINITY);
    assert!(full.advisory.is_some());
    assert!(matches!(
        bw.equidistant_energy_grid(GridLimits::Coverage(1.0), 10),
        Err(RiesError::CoverageUndefined(_))
    ));

    assert!(matches!(
        bw.coverage_interval(1.1),
        Err(RiesError::InvalidParameter(_))
    ));
}

#[test]
fn test_energy_grid_from_coverage() {
    let b11 = b11();
    let bw = BreitWigner::new(
        b11.ground_state(),
        b11.excited_state("1/2-_1").unwrap(),
        None,
        Recoil::None,
    )
    .unwrap();
    let interval = bw.coverage_interval(0.9).unwrap();
    let grid = bw.equidistant_energy_grid(0.9.into(), 11).unwrap();
    assert_eq!(grid.len(), 11);
    assert_eq!(grid[0], interval.low);
    assert_eq!(grid[10], interval.high);
    assert_relative_eq!(grid[5], bw.resonance_energy(), max_relative = 1e-12);
}

#[test]
fn test_probability_grid_endpoints_are_exact() {
    let b11 = b11();
    let gs = b11.ground_state();
    let state = b11.excited_state("1/2-_1").unwrap();
    let limits = GridLimits::Energies(1.0, 3.0);

    let grids = [
        BreitWigner::new(gs, state, None, Recoil::None)
            .unwrap()
            .equidistant_probability_grid(limits, 25)
            .unwrap(),
        Gauss::new(gs, state, None, B11_AMU, 1.0)
            .unwrap()
            .equidistant_probability_grid(limits, 25)
            .unwrap(),
        PseudoVoigt::new(gs, state, None, B11_AMU, 1.0)
            .unwrap()
            .equidistant_probability_grid(limits, 25)
            .unwrap(),
        Voigt::new(gs, state, None, B11_AMU, 1.0)
            .unwrap()
            .equidistant_probability_grid(limits, 25)
            .unwrap(),
    ];
    for grid in grids {
        assert_eq!(grid.len(), 25);
        assert_eq!(grid[0], 1.0);
        assert_eq!(grid[24], 3.0);
        assert!(grid.windows(2).all(|w| w[0] <= w[1]));
    }
}

#[test]
fn test_gauss_doppler_width() {
    let b11 = b11();
    let gauss = Gauss::new(
        b11.ground_state(),
        b11.excited_state("5/2-_1").unwrap(),
        None,
        B11_AMU,
        300.0,
    )
    .unwrap();
    let expected = MaxwellBoltzmann::new(B11_AMU, 300.0)
        .unwrap()
        .doppler_width(4.444_98);
    assert_relative_eq!(gauss.doppler_width(), expected, max_relative = 1e-14);
}

/// 100-point grid over the central 95% of the line, checked against the grid
/// spanned by its own end points.
fn coverage_grid_round_trip(voigt: &Voigt) -> Vec<f64> {
    let energy = voigt
        .equidistant_probability_grid(GridLimits::Coverage(0.95), 100)
        .unwrap();
    assert_eq!(energy.len(), 100);
    let again = voigt
        .equidistant_probability_grid(GridLimits::Energies(energy[0], energy[99]), 100)
        .unwrap();
    for (a, b) in energy.iter().zip(&again) {
        assert_relative_eq!(*a, *b, max_relative = 1e-5);
    }
    energy
}

#[test]
fn test_voigt_tends_to_breit_wigner() {
    let b11 = b11();
    let gs = b11.ground_state();
    let state = b11.excited_state("5/2-_1").unwrap();
    let voigt = Voigt::new(gs, state, None, B11_AMU, 1e-3).unwrap();
    let bw = BreitWigner::new(gs, state, None, Recoil::None).unwrap();
    let energy = coverage_grid_round_trip(&voigt);
    for (v, b) in voigt.evaluate_many(&energy).into_iter().zip(bw.evaluate_many(&energy)) {
        assert_relative_eq!(v, b, max_relative = 1e-2);
    }
}

#[test]
fn test_voigt_tends_to_gauss() {
    let gs = State::ground("0", 0, Parity::Positive);
    let narrow = State::excited(
        "1",
        2,
        Parity::Positive,
        4.0,
        BTreeMap::from([("0".to_string(), 1e-12)]),
    )
    .unwrap();
    let voigt = Voigt::new(&gs, &narrow, None, 10.0, 1e4).unwrap();
    let gauss = Gauss::new(&gs, &narrow, None, 10.0, 1e4).unwrap();
    let energy = coverage_grid_round_trip(&voigt);
    for (v, g) in voigt.evaluate_many(&energy).into_iter().zip(gauss.evaluate_many(&energy)) {
        assert_relative_eq!(v, g, max_relative = 5e-2);
    }
}

#[test]
fn test_pseudo_voigt_close_to_voigt() {
    let b11 = b11();
    let gs = b11.ground_state();
    let state = b11.excited_state("3/2-_2").unwrap();
    let voigt = Voigt::new(gs, state, None, B11_AMU, 10.0).unwrap();
    let pseudo = PseudoVoigt::new(gs, state, None, B11_AMU, 10.0).unwrap();
    assert_relative_eq!(
        voigt.evaluate(5.020_30),
        pseudo.evaluate(5.020_30),
        max_relative = 2e-2
    );
}

#[test]
fn test_voigt_quantile_fallback() {
    let b11 = b11();
    let transition = Transition::new(
        b11.ground_state(),
        b11.excited_state("5/2-_1").unwrap(),
        None,
        Recoil::None,
    )
    .unwrap();
    let delta = MaxwellBoltzmann::new(B11_AMU, 300.0)
        .unwrap()
        .doppler_width(transition.resonance_energy());
    let profile = VoigtProfile::new(transition.resonance_energy(), delta, 0.55e-6).unwrap();

    let (_, outcome) = profile.quantiles(&[0.1, 0.9]);
    assert_eq!(outcome, NewtonOutcome::Converged);

    let hobbled = profile.with_newton_options(NewtonOptions {
        max_iterations: 2,
        tolerance: 1e-9,
    });
    let (x, outcome) = hobbled.quantiles(&[0.1, 0.9]);
    assert_eq!(outcome, NewtonOutcome::FellBack);
    assert_eq!(x[0], hobbled.pseudo_voigt().approximate_ppf(0.1));

    let voigt = Resonance::with_shape(transition, hobbled);
    assert!(matches!(
        voigt.newton_ppf(&[0.9]),
        Err(RiesError::RootNotConverged { .. })
    ));
}

#[test]
fn test_uniform_grids() {
    let b11 = b11();
    let r = UniformResonance::new(
        b11.ground_state(),
        b11.excited_state("5/2-_1").unwrap(),
        None,
        Recoil::None,
    )
    .unwrap();
    let expected = [4.444_98 - 0.25, 4.444_98, 4.444_98 + 0.25];
    let explicit = GridLimits::Energies(expected[0], expected[2]);
    for grid in [
        r.equidistant_energy_grid(0.5.into(), 3).unwrap(),
        r.equidistant_energy_grid(explicit, 3).unwrap(),
        r.equidistant_probability_grid(0.5.into(), 3).unwrap(),
        r.equidistant_probability_grid(explicit, 3).unwrap(),
    ] {
        for (g, e) in grid.iter().zip(expected) {
            assert_relative_eq!(*g, e, max_relative = 1e-12);
        }
    }
}
