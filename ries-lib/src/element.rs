use std::collections::BTreeMap;

use crate::error::{Result, RiesError};
use crate::isotope::Isotope;

/// Tolerance on the sum of the abundances before a warning is emitted.
const ABUNDANCE_SUM_TOLERANCE: f64 = 1e-6;

/// A chemical element as a mixture of isotopes.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    z: u16,
    symbol: String,
    isotopes: BTreeMap<u32, Isotope>,
    abundances: BTreeMap<u32, f64>,
    density: Option<f64>,
}

impl Element {
    /// Isotopes and abundances are keyed by mass number. Every abundance must
    /// belong to a listed isotope; isotopes without an abundance do not
    /// contribute to the element.
    pub fn new(
        z: u16,
        symbol: impl Into<String>,
        isotopes: BTreeMap<u32, Isotope>,
        abundances: BTreeMap<u32, f64>,
        density: Option<f64>,
    ) -> Result<Self> {
        let symbol = symbol.into();
        if let Some(a) = abundances.keys().find(|a| !isotopes.contains_key(a)) {
            return Err(RiesError::UnknownIsotope(format!("{a}{symbol}")));
        }
        if let Some((a, x)) = abundances.iter().find(|(_, x)| !(**x >= 0.0) || !x.is_finite()) {
            return Err(RiesError::InvalidParameter(format!(
                "abundance of {a}{symbol} must be finite and non-negative, got {x}"
            )));
        }
        if let Some(rho) = density {
            if !(rho > 0.0) || !rho.is_finite() {
                return Err(RiesError::InvalidParameter(format!(
                    "density of {symbol} must be positive and finite, got {rho}"
                )));
            }
        }

        let total: f64 = abundances.values().sum();
        if !abundances.is_empty() && (total - 1.0).abs() > ABUNDANCE_SUM_TOLERANCE {
            tracing::warn!(element = %symbol, total, "isotopic abundances do not sum to 1");
        }

        Ok(Self {
            z,
            symbol,
            isotopes,
            abundances,
            density,
        })
    }

    /// Proton number.
    pub fn z(&self) -> u16 {
        self.z
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn isotopes(&self) -> &BTreeMap<u32, Isotope> {
        &self.isotopes
    }

    pub fn isotope(&self, mass_number: u32) -> Result<&Isotope> {
        self.isotopes
            .get(&mass_number)
            .ok_or_else(|| RiesError::UnknownIsotope(format!("{mass_number}{}", self.symbol)))
    }

    pub fn abundances(&self) -> &BTreeMap<u32, f64> {
        &self.abundances
    }

    /// Abundance of an isotope, 0 if none is given.
    pub fn abundance(&self, mass_number: u32) -> f64 {
        self.abundances.get(&mass_number).copied().unwrap_or(0.0)
    }

    /// Density in g/cm³.
    pub fn density(&self) -> Option<f64> {
        self.density
    }

    /// Abundance-weighted mass in atomic mass units.
    pub fn amu(&self) -> f64 {
        self.abundances
            .iter()
            .filter_map(|(a, x)| self.isotopes.get(a).map(|iso| x * iso.amu()))
            .sum()
    }
}
