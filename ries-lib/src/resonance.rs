//! Isolated resonances: the energy-integrated cross section of a transition
//! distributed over energy by a line shape.

use std::f64::consts::SQRT_2;

use crate::constants::PI_HBAR_C_SQUARED;
use crate::cross_section::{CrossSection, cross_section_algebra};
use crate::distribution::{Cauchy, Distribution, Normal, Uniform};
use crate::doppler::MaxwellBoltzmann;
use crate::error::{Result, RiesError};
use crate::grid::{GridLimits, check_coverage, linspace, probability_grid};
use crate::pseudo_voigt::PseudoVoigtProfile;
use crate::recoil::Recoil;
use crate::state::State;
use crate::voigt::VoigtProfile;

/// Excitation of `intermediate` from `initial`, optionally followed by a
/// decay to `final_state`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    initial: State,
    intermediate: State,
    final_state: Option<State>,
    recoil: Recoil,
    resonance_energy: f64,
    statistical_factor: f64,
    branching_ratio: f64,
    energy_integrated_cross_section: f64,
}

impl Transition {
    pub fn new(
        initial: &State,
        intermediate: &State,
        final_state: Option<&State>,
        recoil: Recoil,
    ) -> Result<Self> {
        let resonance_energy = recoil
            .corrected_energy(intermediate.excitation_energy() - initial.excitation_energy());
        if !(resonance_energy > 0.0) || !resonance_energy.is_finite() {
            return Err(RiesError::InvalidParameter(format!(
                "resonance energy of '{}' -> '{}' must be positive, got {resonance_energy}",
                initial.id(),
                intermediate.id()
            )));
        }

        let statistical_factor =
            (intermediate.two_j() as f64 + 1.0) / (initial.two_j() as f64 + 1.0);

        let branching_ratio = match final_state {
            None => 1.0,
            Some(fin) => {
                let partial = partial_width(intermediate, fin)?;
                let total = intermediate.width();
                if total == 0.0 {
                    return Err(RiesError::InvalidParameter(format!(
                        "state '{}' has no width, the branching ratio is undefined",
                        intermediate.id()
                    )));
                }
                partial / total
            }
        };

        let ground_state_width = partial_width(intermediate, initial)?;
        let energy_integrated_cross_section = PI_HBAR_C_SQUARED
            / (resonance_energy * resonance_energy)
            * statistical_factor
            * ground_state_width
            * branching_ratio;

        Ok(Self {
            initial: initial.clone(),
            intermediate: intermediate.clone(),
            final_state: final_state.cloned(),
            recoil,
            resonance_energy,
            statistical_factor,
            branching_ratio,
            energy_integrated_cross_section,
        })
    }

    pub fn initial(&self) -> &State {
        &self.initial
    }

    pub fn intermediate(&self) -> &State {
        &self.intermediate
    }

    pub fn final_state(&self) -> Option<&State> {
        self.final_state.as_ref()
    }

    pub fn recoil(&self) -> Recoil {
        self.recoil
    }

    /// Photon energy in MeV that excites the intermediate state.
    pub fn resonance_energy(&self) -> f64 {
        self.resonance_energy
    }

    /// `(2J_intermediate + 1) / (2J_initial + 1)`
    pub fn statistical_factor(&self) -> f64 {
        self.statistical_factor
    }

    pub fn branching_ratio(&self) -> f64 {
        self.branching_ratio
    }

    /// Integral of the cross section over energy, in MeV fm².
    pub fn energy_integrated_cross_section(&self) -> f64 {
        self.energy_integrated_cross_section
    }

    /// Total width of the intermediate state in MeV.
    pub fn natural_width(&self) -> f64 {
        self.intermediate.width()
    }
}

fn partial_width(from: &State, to: &State) -> Result<f64> {
    from.partial_width(to.id())
        .ok_or_else(|| RiesError::UnknownTransition {
            from: from.id().to_string(),
            to: to.id().to_string(),
        })
}

/// How an energy passed to [`Resonance::evaluate_at`] is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnergyScale {
    #[default]
    Absolute,
    /// Offset from the resonance energy.
    Relative,
}

/// Largest coverage whose interval stays at non-negative energies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageAdvisory {
    pub max_coverage: f64,
}

/// Energy interval around the median holding a given fraction of the line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageInterval {
    pub low: f64,
    pub high: f64,
    /// Set if the interval reaches into negative or infinite energies.
    pub advisory: Option<CoverageAdvisory>,
}

impl CoverageInterval {
    /// The interval with its lower bound raised to 0.
    pub fn clamped(&self) -> (f64, f64) {
        (self.low.max(0.0), self.high)
    }
}

/// A resonance with line shape `D`.
#[derive(Debug, Clone, PartialEq)]
pub struct Resonance<D> {
    transition: Transition,
    shape: D,
}

pub type UniformResonance = Resonance<Uniform>;
pub type BreitWigner = Resonance<Cauchy>;
pub type Gauss = Resonance<Normal>;
pub type PseudoVoigt = Resonance<PseudoVoigtProfile>;
pub type Voigt = Resonance<VoigtProfile>;

impl<D: Distribution> Resonance<D> {
    pub fn with_shape(transition: Transition, shape: D) -> Self {
        Self { transition, shape }
    }

    pub fn transition(&self) -> &Transition {
        &self.transition
    }

    pub fn shape(&self) -> &D {
        &self.shape
    }

    pub fn resonance_energy(&self) -> f64 {
        self.transition.resonance_energy
    }

    pub fn energy_integrated_cross_section(&self) -> f64 {
        self.transition.energy_integrated_cross_section
    }

    pub fn evaluate_at(&self, energy: f64, scale: EnergyScale) -> f64 {
        match scale {
            EnergyScale::Absolute => self.evaluate(energy),
            EnergyScale::Relative => self.evaluate(energy + self.resonance_energy()),
        }
    }

    /// Symmetric interval around the median that holds the fraction
    /// `coverage` of the energy-integrated cross section.
    pub fn coverage_interval(&self, coverage: f64) -> Result<CoverageInterval> {
        check_coverage(coverage)?;
        let bounds = self
            .shape
            .ppf_many(&[0.5 * (1.0 - coverage), 0.5 * (1.0 + coverage)]);
        let (low, high) = (bounds[0], bounds[1]);

        let advisory = if low < 0.0 || high.is_infinite() {
            let max_coverage = (1.0 - 2.0 * self.shape.cdf(0.0)).max(0.0);
            tracing::warn!(
                coverage,
                low,
                high,
                max_coverage,
                "coverage interval extends to unphysical energies"
            );
            Some(CoverageAdvisory { max_coverage })
        } else {
            None
        };

        Ok(CoverageInterval {
            low,
            high,
            advisory,
        })
    }
}

impl<D: Distribution> CrossSection for Resonance<D> {
    fn evaluate(&self, energy: f64) -> f64 {
        self.transition.energy_integrated_cross_section * self.shape.pdf(energy)
    }

    fn evaluate_many(&self, energies: &[f64]) -> Vec<f64> {
        let i = self.transition.energy_integrated_cross_section;
        self.shape
            .pdf_many(energies)
            .into_iter()
            .map(|p| i * p)
            .collect()
    }

    fn equidistant_energy_grid(&self, limits: GridLimits, n: usize) -> Result<Vec<f64>> {
        limits.validate()?;
        let (lo, hi) = match limits {
            GridLimits::Energies(lo, hi) => (lo, hi),
            GridLimits::Coverage(c) => {
                let interval = self.coverage_interval(c)?;
                (interval.low, interval.high)
            }
        };
        if !lo.is_finite() || !hi.is_finite() {
            return Err(RiesError::CoverageUndefined(format!(
                "an infinite interval ({lo}, {hi})"
            )));
        }
        Ok(linspace(lo, hi, n))
    }

    fn equidistant_probability_grid(&self, limits: GridLimits, n: usize) -> Result<Vec<f64>> {
        probability_grid(&self.shape, limits, n)
    }
}

cross_section_algebra!(@generic D: Distribution; Resonance<D>);

impl Resonance<Uniform> {
    /// Generic resonance: the whole energy-integrated cross section spread
    /// uniformly over 1 MeV centered on the resonance energy.
    pub fn new(
        initial: &State,
        intermediate: &State,
        final_state: Option<&State>,
        recoil: Recoil,
    ) -> Result<Self> {
        Self::from_transition(Transition::new(initial, intermediate, final_state, recoil)?)
    }

    pub fn from_transition(transition: Transition) -> Result<Self> {
        let shape = Uniform::new(transition.resonance_energy - 0.5, 1.0)?;
        Ok(Self::with_shape(transition, shape))
    }
}

impl Resonance<Cauchy> {
    /// Breit-Wigner resonance of a nucleus at rest.
    pub fn new(
        initial: &State,
        intermediate: &State,
        final_state: Option<&State>,
        recoil: Recoil,
    ) -> Result<Self> {
        Self::from_transition(Transition::new(initial, intermediate, final_state, recoil)?)
    }

    pub fn from_transition(transition: Transition) -> Result<Self> {
        let shape = Cauchy::new(transition.resonance_energy, 0.5 * transition.natural_width())?;
        Ok(Self::with_shape(transition, shape))
    }
}

impl Resonance<Normal> {
    /// Doppler-broadened resonance with the natural width neglected.
    pub fn new(
        initial: &State,
        intermediate: &State,
        final_state: Option<&State>,
        amu: f64,
        effective_temperature: f64,
    ) -> Result<Self> {
        Self::from_transition(
            Transition::new(initial, intermediate, final_state, Recoil::None)?,
            MaxwellBoltzmann::new(amu, effective_temperature)?,
        )
    }

    pub fn from_transition(transition: Transition, motion: MaxwellBoltzmann) -> Result<Self> {
        let doppler_width = motion.doppler_width(transition.resonance_energy);
        let shape = Normal::new(transition.resonance_energy, doppler_width / SQRT_2)?;
        Ok(Self::with_shape(transition, shape))
    }

    /// Doppler width Δ in MeV; the line is a Gaussian with σ = Δ/√2.
    pub fn doppler_width(&self) -> f64 {
        self.shape.scale() * SQRT_2
    }
}

impl Resonance<PseudoVoigtProfile> {
    pub fn new(
        initial: &State,
        intermediate: &State,
        final_state: Option<&State>,
        amu: f64,
        effective_temperature: f64,
    ) -> Result<Self> {
        Self::from_transition(
            Transition::new(initial, intermediate, final_state, Recoil::None)?,
            MaxwellBoltzmann::new(amu, effective_temperature)?,
        )
    }

    pub fn from_transition(transition: Transition, motion: MaxwellBoltzmann) -> Result<Self> {
        let shape = PseudoVoigtProfile::new(
            transition.resonance_energy,
            motion.doppler_width(transition.resonance_energy),
            transition.natural_width(),
        )?;
        Ok(Self::with_shape(transition, shape))
    }
}

impl Resonance<VoigtProfile> {
    pub fn new(
        initial: &State,
        intermediate: &State,
        final_state: Option<&State>,
        amu: f64,
        effective_temperature: f64,
    ) -> Result<Self> {
        Self::from_transition(
            Transition::new(initial, intermediate, final_state, Recoil::None)?,
            MaxwellBoltzmann::new(amu, effective_temperature)?,
        )
    }

    pub fn from_transition(transition: Transition, motion: MaxwellBoltzmann) -> Result<Self> {
        let shape = VoigtProfile::new(
            transition.resonance_energy,
            motion.doppler_width(transition.resonance_energy),
            transition.natural_width(),
        )?;
        Ok(Self::with_shape(transition, shape))
    }

    /// Newton quantiles of the line, as a result instead of a fallback.
    pub fn newton_ppf(&self, q: &[f64]) -> Result<Vec<f64>> {
        self.shape.newton_ppf(q)
    }
}
