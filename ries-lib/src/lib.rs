pub mod constants;
pub mod cross_section;
pub mod distribution;
pub mod doppler;
pub mod element;
pub mod error;
pub mod grid;
pub mod integration;
pub mod interp;
pub mod isotope;
pub mod library;
pub mod nonresonant;
pub mod photoabsorption;
pub mod pseudo_voigt;
pub mod recoil;
pub mod resonance;
pub mod special;
pub mod state;
pub mod voigt;

pub use cross_section::{ConstantCrossSection, CrossSection, WeightedSum};
pub use distribution::{Cauchy, Distribution, NewtonOptions, NewtonOutcome, Normal, Uniform};
pub use doppler::{MaxwellBoltzmann, effective_temperature_debye, effective_temperature_for};
pub use element::Element;
pub use error::{Result, RiesError};
pub use grid::{GridLimits, linspace, probability_grid, union_sorted};
pub use integration::{
    DarbouxSums, QuadOptions, QuadResult, darboux, darboux_fn, nquad_partition, quad,
    quad_partition,
};
pub use isotope::Isotope;
pub use library::NuclideLibrary;
pub use nonresonant::{AttenuationTable, KleinNishina};
pub use photoabsorption::{ElementResonances, IsotopeResonances};
pub use pseudo_voigt::PseudoVoigtProfile;
pub use recoil::Recoil;
pub use resonance::{
    BreitWigner, CoverageAdvisory, CoverageInterval, EnergyScale, Gauss, PseudoVoigt, Resonance,
    Transition, UniformResonance, Voigt,
};
pub use ries_data;
pub use state::{Parity, State};
pub use voigt::VoigtProfile;
