use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, RiesError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parity {
    Positive,
    Negative,
}

impl Parity {
    /// +1 or -1.
    pub fn value(self) -> i8 {
        match self {
            Self::Positive => 1,
            Self::Negative => -1,
        }
    }

    pub fn from_value(value: i8) -> Result<Self> {
        match value {
            1 => Ok(Self::Positive),
            -1 => Ok(Self::Negative),
            other => Err(RiesError::InvalidParameter(format!(
                "parity must be +1 or -1, got {other}"
            ))),
        }
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "+"),
            Self::Negative => write!(f, "-"),
        }
    }
}

/// A nuclear level.
///
/// Excited states carry partial widths (MeV) keyed by the id of the state
/// each decay branch populates; the total width is their sum.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    id: String,
    two_j: u32,
    parity: Parity,
    excitation_energy: f64,
    partial_widths: BTreeMap<String, f64>,
}

impl State {
    pub fn ground(id: impl Into<String>, two_j: u32, parity: Parity) -> Self {
        Self {
            id: id.into(),
            two_j,
            parity,
            excitation_energy: 0.0,
            partial_widths: BTreeMap::new(),
        }
    }

    pub fn excited(
        id: impl Into<String>,
        two_j: u32,
        parity: Parity,
        excitation_energy: f64,
        partial_widths: BTreeMap<String, f64>,
    ) -> Result<Self> {
        let id = id.into();
        if !excitation_energy.is_finite() {
            return Err(RiesError::InvalidParameter(format!(
                "state '{id}': excitation energy must be finite, got {excitation_energy}"
            )));
        }
        if let Some((to, width)) = partial_widths
            .iter()
            .find(|(_, w)| !(**w >= 0.0) || !w.is_finite())
        {
            return Err(RiesError::InvalidParameter(format!(
                "state '{id}': partial width to '{to}' must be finite and non-negative, got {width}"
            )));
        }
        Ok(Self {
            id,
            two_j,
            parity,
            excitation_energy,
            partial_widths,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Twice the total angular momentum.
    pub fn two_j(&self) -> u32 {
        self.two_j
    }

    pub fn parity(&self) -> Parity {
        self.parity
    }

    pub fn excitation_energy(&self) -> f64 {
        self.excitation_energy
    }

    pub fn partial_widths(&self) -> &BTreeMap<String, f64> {
        &self.partial_widths
    }

    pub fn partial_width(&self, to: &str) -> Option<f64> {
        self.partial_widths.get(to).copied()
    }

    /// Total width in MeV.
    pub fn width(&self) -> f64 {
        self.partial_widths.values().sum()
    }

    pub fn is_ground_state(&self) -> bool {
        self.excitation_energy == 0.0 && self.partial_widths.is_empty()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.two_j % 2 == 0 {
            write!(f, "{} ({}{}", self.id, self.two_j / 2, self.parity)?;
        } else {
            write!(f, "{} ({}/2{}", self.id, self.two_j, self.parity)?;
        }
        write!(f, ", {} MeV)", self.excitation_energy)
    }
}
