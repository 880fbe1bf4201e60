mod common;

use std::collections::BTreeMap;
use std::sync::Arc;

use approx::assert_relative_eq;
use ries::ries_data::{
    AbundanceRecord, AttenuationRecord, ElementRecord, IsotopeRecord, NuclideLibraryRecord,
    PartialWidthRecord, StateRecord,
};
use ries::{
    BreitWigner, CrossSection, Element, ElementResonances, GridLimits, IsotopeResonances,
    NuclideLibrary, Recoil, RiesError,
};

use common::{B10_ABUNDANCE, B10_AMU, B11_ABUNDANCE, B11_AMU, B11_GROUND, b10, b11, natural_boron};

fn breit_wigner(isotope: &ries::Isotope) -> ries::Result<IsotopeResonances<ries::Cauchy>> {
    IsotopeResonances::new(isotope, |gs, state| {
        BreitWigner::new(gs, state, None, Recoil::None)
    })
}

#[test]
fn test_element_mass() {
    let boron = natural_boron();
    assert_eq!(boron.z(), 5);
    assert_eq!(boron.symbol(), "B");
    assert_relative_eq!(
        boron.amu(),
        B10_ABUNDANCE * B10_AMU + B11_ABUNDANCE * B11_AMU,
        max_relative = 1e-15
    );
    assert_eq!(boron.abundance(11), B11_ABUNDANCE);
    assert_eq!(boron.abundance(12), 0.0);
    assert!(matches!(boron.isotope(12), Err(RiesError::UnknownIsotope(_))));
}

#[test]
fn test_element_validation() {
    let unknown = Element::new(
        5,
        "B",
        BTreeMap::from([(11, b11())]),
        BTreeMap::from([(10, 0.2), (11, 0.8)]),
        None,
    );
    assert!(matches!(unknown, Err(RiesError::UnknownIsotope(_))));

    let negative = Element::new(
        5,
        "B",
        BTreeMap::from([(11, b11())]),
        BTreeMap::from([(11, -1.0)]),
        None,
    );
    assert!(matches!(negative, Err(RiesError::InvalidParameter(_))));

    // Abundances that do not sum to 1 are accepted with a warning.
    let partial = Element::new(
        5,
        "B",
        BTreeMap::from([(11, b11())]),
        BTreeMap::from([(11, 0.8)]),
        None,
    )
    .unwrap();
    assert_relative_eq!(partial.amu(), 0.8 * B11_AMU, max_relative = 1e-15);
}

#[test]
fn test_isotope_resonances_need_a_ground_state_width() {
    let b11 = breit_wigner(&b11()).unwrap();
    assert_eq!(b11.isotope_id(), "11B");
    assert_eq!(b11.len(), 5);

    let b10 = breit_wigner(&b10()).unwrap();
    assert!(b10.is_empty());
    assert_eq!(b10.evaluate(0.718_380), 0.0);
}

#[test]
fn test_isotope_resonances_add_up() {
    let resonances = breit_wigner(&b11()).unwrap();
    let e = 4.444_98;
    let expected: f64 = resonances.resonances().values().map(|r| r.evaluate(e)).sum();
    assert_eq!(resonances.evaluate(e), expected);
    assert!(resonances.evaluate(e) > resonances.resonances()["5/2-_1"].evaluate(e));

    let grid = resonances
        .equidistant_probability_grid(GridLimits::Energies(2.0, 7.0), 9)
        .unwrap();
    assert_eq!(grid[0], 2.0);
    assert_eq!(*grid.last().unwrap(), 7.0);
    assert!(grid.iter().any(|&x| (x - e).abs() < 1e-9));
}

#[test]
fn test_isotope_resonances_compose() {
    let resonances = breit_wigner(&b11()).unwrap();
    let line = resonances.resonances()["5/2-_1"].clone();
    let total = 2.0 * resonances.clone() + line.clone() * 0.5 + 1.0;
    assert_eq!(total.len(), 3);
    for e in [4.444_98, 5.020_30, 6.0] {
        assert_relative_eq!(
            total.evaluate(e),
            2.0 * resonances.evaluate(e) + 0.5 * line.evaluate(e) + 1.0,
            max_relative = 1e-14
        );
    }

    let shifted = 1.0 + resonances.clone();
    assert_relative_eq!(
        shifted.evaluate(4.444_98),
        1.0 + resonances.evaluate(4.444_98),
        max_relative = 1e-15
    );
}

#[test]
fn test_element_resonances_weight_by_abundance() {
    let boron = natural_boron();
    let element = ElementResonances::new(&boron, |isotope| {
        Ok(Arc::new(breit_wigner(isotope)?) as Arc<dyn CrossSection>)
    })
    .unwrap();
    assert_eq!(element.symbol(), "B");
    assert_eq!(element.isotopes().len(), 2);

    let b11 = breit_wigner(&b11()).unwrap();
    let e = 4.444_98;
    assert_relative_eq!(
        element.evaluate(e),
        B11_ABUNDANCE * b11.evaluate(e),
        max_relative = 1e-15
    );

    let sum = element.clone().into_weighted_sum();
    assert_eq!(sum.len(), 2);
    assert_relative_eq!(sum.evaluate(e), element.evaluate(e), max_relative = 1e-15);

    let scaled = 2.0 * element.clone();
    assert_relative_eq!(scaled.evaluate(e), 2.0 * element.evaluate(e), max_relative = 1e-15);
}

fn state_record(id: &str, two_j: u32, parity: i8, energy: f64, widths: &[(&str, f64)]) -> StateRecord {
    StateRecord {
        id: id.to_string(),
        two_j,
        parity,
        excitation_energy: energy,
        partial_widths: widths
            .iter()
            .map(|(to, width)| PartialWidthRecord {
                to: to.to_string(),
                width: *width,
            })
            .collect(),
    }
}

fn library_records() -> NuclideLibraryRecord {
    NuclideLibraryRecord {
        isotopes: vec![
            IsotopeRecord {
                id: "10B".to_string(),
                proton_number: 5,
                mass_number: 10,
                amu: B10_AMU,
                ground_state: state_record("3+_1", 6, 1, 0.0, &[]),
                excited_states: vec![state_record("1+_1", 2, 1, 0.718_380, &[("3+_1", 0.0)])],
            },
            IsotopeRecord {
                id: "11B".to_string(),
                proton_number: 5,
                mass_number: 11,
                amu: B11_AMU,
                ground_state: state_record(B11_GROUND, 3, -1, 0.0, &[]),
                excited_states: vec![
                    state_record("1/2-_1", 1, -1, 2.124_693, &[(B11_GROUND, 0.117e-6)]),
                    state_record("5/2-_1", 5, -1, 4.444_98, &[(B11_GROUND, 0.55e-6)]),
                ],
            },
        ],
        elements: vec![ElementRecord {
            proton_number: 5,
            symbol: "B".to_string(),
            density: Some(2.37),
            abundances: vec![
                AbundanceRecord {
                    mass_number: 10,
                    fraction: B10_ABUNDANCE,
                },
                AbundanceRecord {
                    mass_number: 11,
                    fraction: B11_ABUNDANCE,
                },
            ],
        }],
        attenuation: vec![AttenuationRecord {
            symbol: "B".to_string(),
            energy: vec![1.0, 2.0, 5.0, 10.0],
            mu_rho: vec![0.0589, 0.0418, 0.0263, 0.0193],
        }],
    }
}

fn check_library(library: &NuclideLibrary) {
    assert_eq!(library.raw().isotopes.len(), 2);

    let b11 = library.isotope("11B").unwrap();
    assert_eq!(b11.amu(), B11_AMU);
    assert_eq!(b11.ground_state().id(), B11_GROUND);
    assert_eq!(b11.excited_states().len(), 2);
    let state = b11.excited_state("5/2-_1").unwrap();
    assert_eq!(state.two_j(), 5);
    assert_eq!(state.partial_width(B11_GROUND), Some(0.55e-6));

    let boron = library.element("b").unwrap();
    assert_eq!(boron.symbol(), "B");
    assert_eq!(boron.isotopes().len(), 2);
    assert_eq!(boron.density(), Some(2.37));
    assert_relative_eq!(boron.amu(), natural_boron().amu(), max_relative = 1e-15);

    let table = library.attenuation("B").unwrap();
    assert_eq!(table.energies().len(), 4);
    assert!(table.evaluate(2.0) > table.evaluate(5.0));

    assert!(matches!(library.isotope("12C"), Err(RiesError::UnknownIsotope(_))));
    assert!(matches!(library.element("C"), Err(RiesError::UnknownElement(_))));
    assert!(matches!(library.attenuation("C"), Err(RiesError::UnknownElement(_))));
}

#[test]
fn test_library_from_postcard() {
    let bytes = postcard::to_allocvec(&library_records()).unwrap();
    let library = NuclideLibrary::from_postcard(&bytes).unwrap();
    check_library(&library);
}

#[test]
fn test_library_from_compressed() {
    let bytes = postcard::to_allocvec(&library_records()).unwrap();
    let compressed =
        ruzstd::encoding::compress_to_vec(&bytes[..], ruzstd::encoding::CompressionLevel::Fastest);
    let library = NuclideLibrary::from_compressed(&compressed).unwrap();
    check_library(&library);
}

#[test]
fn test_library_rejects_garbage() {
    assert!(matches!(
        NuclideLibrary::from_compressed(&[0, 1, 2, 3]),
        Err(RiesError::DataError(_))
    ));
    assert!(matches!(
        NuclideLibrary::from_postcard(&[0xff; 3]),
        Err(RiesError::DataError(_))
    ));
}

#[test]
fn test_library_resonances_match_fixture() {
    let library = NuclideLibrary::from_records(library_records());
    let from_library = breit_wigner(&library.isotope("11B").unwrap()).unwrap();
    let from_fixture = BreitWigner::new(
        b11().ground_state(),
        b11().excited_state("5/2-_1").unwrap(),
        None,
        Recoil::None,
    )
    .unwrap();
    assert_eq!(
        from_library.resonances()["5/2-_1"].evaluate(4.444_98),
        from_fixture.evaluate(4.444_98)
    );
}
