use std::collections::BTreeMap;

use crate::error::{Result, RiesError};
use crate::state::State;

/// A nuclide with its level scheme.
#[derive(Debug, Clone, PartialEq)]
pub struct Isotope {
    id: String,
    amu: f64,
    ground_state: State,
    excited_states: BTreeMap<String, State>,
}

impl Isotope {
    /// `id` is the mass number followed by the element symbol, e.g. `"11B"`.
    /// `excited_states` is keyed by state id.
    pub fn new(
        id: impl Into<String>,
        amu: f64,
        ground_state: State,
        excited_states: BTreeMap<String, State>,
    ) -> Result<Self> {
        let id = id.into();
        if !(amu > 0.0) || !amu.is_finite() {
            return Err(RiesError::InvalidParameter(format!(
                "isotope '{id}': mass must be positive and finite, got {amu}"
            )));
        }
        if !ground_state.is_ground_state() {
            return Err(RiesError::InvalidParameter(format!(
                "isotope '{id}': state '{}' is not a ground state",
                ground_state.id()
            )));
        }
        if let Some((key, state)) = excited_states.iter().find(|(k, s)| *k != s.id()) {
            return Err(RiesError::InvalidParameter(format!(
                "isotope '{id}': excited state '{}' is stored under the key '{key}'",
                state.id()
            )));
        }
        Ok(Self {
            id,
            amu,
            ground_state,
            excited_states,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Isotopic mass in atomic mass units.
    pub fn amu(&self) -> f64 {
        self.amu
    }

    pub fn ground_state(&self) -> &State {
        &self.ground_state
    }

    pub fn excited_states(&self) -> &BTreeMap<String, State> {
        &self.excited_states
    }

    pub fn excited_state(&self, id: &str) -> Result<&State> {
        self.excited_states
            .get(id)
            .ok_or_else(|| RiesError::UnknownState(format!("{id} in {}", self.id)))
    }
}
