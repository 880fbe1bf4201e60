use crate::constants::ATOMIC_MASS_UNIT_MEV;

/// Correction of a level-energy difference for the recoil of the absorbing
/// nucleus.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Recoil {
    #[default]
    None,
    /// A free nucleus at rest with the given mass in atomic mass units.
    FreeNucleus { amu: f64 },
}

impl Recoil {
    /// Photon energy needed to bridge the level-energy difference `delta_e`
    /// (MeV).
    pub fn corrected_energy(&self, delta_e: f64) -> f64 {
        match *self {
            Self::None => delta_e,
            Self::FreeNucleus { amu } => {
                delta_e * (1.0 + delta_e / (2.0 * amu * ATOMIC_MASS_UNIT_MEV))
            }
        }
    }
}
