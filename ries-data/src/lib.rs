#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// A library of nuclear data records, as delivered by the upstream mass,
/// abundance and level-scheme readers.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct NuclideLibraryRecord {
    pub isotopes: Vec<IsotopeRecord>,
    pub elements: Vec<ElementRecord>,
    pub attenuation: Vec<AttenuationRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartialWidthRecord {
    /// Identifier of the state the decay populates.
    pub to: String,
    /// Partial width in MeV.
    pub width: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateRecord {
    pub id: String,
    pub two_j: u32,
    /// +1 or -1.
    pub parity: i8,
    /// Excitation energy in MeV (0 for a ground state).
    pub excitation_energy: f64,
    /// Empty for a ground state.
    pub partial_widths: Vec<PartialWidthRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsotopeRecord {
    /// Mass number and symbol, e.g. `11B`.
    pub id: String,
    pub proton_number: u16,
    pub mass_number: u32,
    /// Isotopic mass in atomic mass units.
    pub amu: f64,
    pub ground_state: StateRecord,
    pub excited_states: Vec<StateRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbundanceRecord {
    pub mass_number: u32,
    pub fraction: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementRecord {
    pub proton_number: u16,
    pub symbol: String,
    /// Density in g/cm³, if known.
    pub density: Option<f64>,
    pub abundances: Vec<AbundanceRecord>,
}

/// Tabulated mass attenuation coefficients of an element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttenuationRecord {
    pub symbol: String,
    /// Photon energies in MeV.
    pub energy: Vec<f64>,
    /// Mass attenuation coefficients in cm²/g.
    pub mu_rho: Vec<f64>,
}
