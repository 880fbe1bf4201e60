//! Nonresonant contributions to the attenuation of a photon beam.

use std::f64::consts::PI;

use ries_data::AttenuationRecord;

use crate::constants::{ATOMIC_MASS_UNIT_KG, CM_TO_FM, ELECTRON_MASS_MEV, FINE_STRUCTURE, HBAR_C};
use crate::cross_section::{CrossSection, cross_section_algebra};
use crate::error::Result;
use crate::grid::GridLimits;
use crate::interp::LogLogTable;

/// Compton scattering off `z` free electrons at rest (Klein-Nishina).
///
/// Energies in MeV, angles in radians, cross sections in fm².
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KleinNishina {
    pub z: u32,
}

impl Default for KleinNishina {
    fn default() -> Self {
        Self { z: 1 }
    }
}

impl KleinNishina {
    pub fn new(z: u32) -> Self {
        Self { z }
    }

    /// (α ħc / mₑc²)², the squared classical electron radius.
    fn r_e_squared() -> f64 {
        let r = FINE_STRUCTURE * HBAR_C / ELECTRON_MASS_MEV;
        r * r
    }

    /// Lowest energy of the scattered photon (backscattering).
    pub fn compton_edge(&self, e: f64) -> f64 {
        e / (1.0 + 2.0 * e / ELECTRON_MASS_MEV)
    }

    /// Scattering angle at which a photon of energy `e` leaves with `ep`.
    pub fn theta(&self, e: f64, ep: f64) -> f64 {
        (1.0 - (e / ep - 1.0) * ELECTRON_MASS_MEV / e).acos()
    }

    /// E'/E for scattering by `theta`.
    pub fn ep_over_e(&self, e: f64, theta: f64) -> f64 {
        1.0 / (1.0 + e / ELECTRON_MASS_MEV * (1.0 - theta.cos()))
    }

    pub fn cs_total(&self, e: f64) -> f64 {
        let x = e / ELECTRON_MASS_MEV;
        self.z as f64 * PI * Self::r_e_squared() / (x * x * x)
            * (2.0 * x * (2.0 + x * (1.0 + x) * (8.0 + x)) / ((1.0 + 2.0 * x) * (1.0 + 2.0 * x))
                + ((x - 2.0) * x - 2.0) * (1.0 + 2.0 * x).ln())
    }

    /// Cross section per unit cos θ, integrated over the azimuth.
    pub fn cs_diff(&self, e: f64, theta: f64) -> f64 {
        let r = self.ep_over_e(e, theta);
        let s = theta.sin();
        self.z as f64 * PI * Self::r_e_squared() * r * r * (r + 1.0 / r - s * s)
    }

    /// Cross section per unit scattering angle.
    pub fn cs_diff_dtheta(&self, e: f64, theta: f64) -> f64 {
        self.cs_diff(e, theta) * theta.sin()
    }

    /// Cross section per unit energy of the scattered photon (fm²/MeV).
    pub fn cs_diff_dep(&self, e: f64, ep: f64) -> f64 {
        self.cs_diff(e, self.theta(e, ep)) * ELECTRON_MASS_MEV / (ep * ep)
    }

    /// Cross section per unit solid angle for a beam polarized along φ = 0.
    pub fn cs_diff_domega(&self, e: f64, theta: f64, phi: f64) -> f64 {
        let r = self.ep_over_e(e, theta);
        let s = theta.sin();
        let c = phi.cos();
        0.5 * self.z as f64 * Self::r_e_squared() * r * r * (r + 1.0 / r - 2.0 * s * s * c * c)
    }

    /// Cross section per unit solid angle, averaged over the polarization.
    pub fn cs_diff_domega_unpolarized(&self, e: f64, theta: f64) -> f64 {
        let r = self.ep_over_e(e, theta);
        let s = theta.sin();
        0.5 * self.z as f64 * Self::r_e_squared() * r * r * (r + 1.0 / r - s * s)
    }

    /// Cross section per unit energy of the scattered photon and unit
    /// azimuth, for a polarized beam.
    pub fn cs_diff_dep_dphi(&self, e: f64, ep: f64, phi: f64) -> f64 {
        self.cs_diff_domega(e, self.theta(e, ep), phi) * ELECTRON_MASS_MEV / (ep * ep)
    }
}

impl CrossSection for KleinNishina {
    fn evaluate(&self, energy: f64) -> f64 {
        self.cs_total(energy)
    }

    fn equidistant_probability_grid(&self, limits: GridLimits, n: usize) -> Result<Vec<f64>> {
        self.equidistant_energy_grid(limits, n)
    }
}

cross_section_algebra!(KleinNishina);

/// Tabulated nonresonant cross section per atom, interpolated in log-log
/// space.
#[derive(Debug, Clone, PartialEq)]
pub struct AttenuationTable {
    table: LogLogTable,
}

impl AttenuationTable {
    /// `cross_sections` in fm² per atom at `energies` in MeV.
    pub fn new(energies: &[f64], cross_sections: &[f64]) -> Result<Self> {
        Ok(Self {
            table: LogLogTable::new(energies, cross_sections)?,
        })
    }

    /// Convert mass attenuation coefficients μ/ρ (cm²/g) of an element of
    /// mass `element_amu` to cross sections per atom.
    pub fn from_mass_attenuation(energies: &[f64], mu_rho: &[f64], element_amu: f64) -> Result<Self> {
        let grams_per_atom = element_amu * ATOMIC_MASS_UNIT_KG * 1e3;
        let cross_sections: Vec<f64> = mu_rho
            .iter()
            .map(|m| m * CM_TO_FM * CM_TO_FM * grams_per_atom)
            .collect();
        Self::new(energies, &cross_sections)
    }

    pub fn from_record(record: &AttenuationRecord, element_amu: f64) -> Result<Self> {
        Self::from_mass_attenuation(&record.energy, &record.mu_rho, element_amu)
    }

    /// Tabulated energies in MeV.
    pub fn energies(&self) -> Vec<f64> {
        self.table.nodes()
    }
}

impl CrossSection for AttenuationTable {
    fn evaluate(&self, energy: f64) -> f64 {
        self.table.eval(energy)
    }

    fn evaluate_many(&self, energies: &[f64]) -> Vec<f64> {
        self.table.eval_many(energies)
    }

    fn equidistant_probability_grid(&self, limits: GridLimits, n: usize) -> Result<Vec<f64>> {
        self.equidistant_energy_grid(limits, n)
    }
}

cross_section_algebra!(AttenuationTable);
