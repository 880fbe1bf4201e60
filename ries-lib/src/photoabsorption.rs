//! Photoabsorption cross sections of whole isotopes and elements.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::cross_section::{CrossSection, WeightedSum, cross_section_algebra};
use crate::distribution::Distribution;
use crate::element::Element;
use crate::error::Result;
use crate::grid::{GridLimits, union_sorted};
use crate::isotope::Isotope;
use crate::resonance::Resonance;
use crate::state::State;

/// Sum of the ground-state resonances of an isotope.
#[derive(Debug, Clone)]
pub struct IsotopeResonances<D> {
    isotope_id: String,
    resonances: BTreeMap<String, Resonance<D>>,
}

impl<D: Distribution> IsotopeResonances<D> {
    /// Build one resonance per excited state that decays to the ground
    /// state with a nonzero partial width. `model` receives the ground state
    /// and the excited state.
    pub fn new<F>(isotope: &Isotope, mut model: F) -> Result<Self>
    where
        F: FnMut(&State, &State) -> Result<Resonance<D>>,
    {
        let ground = isotope.ground_state();
        let mut resonances = BTreeMap::new();
        for (id, state) in isotope.excited_states() {
            match state.partial_width(ground.id()) {
                Some(width) if width > 0.0 => {
                    resonances.insert(id.clone(), model(ground, state)?);
                }
                _ => tracing::debug!(
                    isotope = isotope.id(),
                    state = %id,
                    "no ground-state width, skipping"
                ),
            }
        }
        Ok(Self {
            isotope_id: isotope.id().to_string(),
            resonances,
        })
    }

    pub fn isotope_id(&self) -> &str {
        &self.isotope_id
    }

    /// Resonances keyed by the id of the excited state.
    pub fn resonances(&self) -> &BTreeMap<String, Resonance<D>> {
        &self.resonances
    }

    pub fn len(&self) -> usize {
        self.resonances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resonances.is_empty()
    }
}

impl<D: Distribution> CrossSection for IsotopeResonances<D> {
    fn evaluate(&self, energy: f64) -> f64 {
        self.resonances.values().map(|r| r.evaluate(energy)).sum()
    }

    fn evaluate_many(&self, energies: &[f64]) -> Vec<f64> {
        let mut total = vec![0.0; energies.len()];
        for resonance in self.resonances.values() {
            for (t, v) in total.iter_mut().zip(resonance.evaluate_many(energies)) {
                *t += v;
            }
        }
        total
    }

    fn equidistant_probability_grid(&self, limits: GridLimits, n: usize) -> Result<Vec<f64>> {
        let grids = self
            .resonances
            .values()
            .map(|r| r.equidistant_probability_grid(limits, n))
            .collect::<Result<Vec<_>>>()?;
        Ok(union_sorted(grids))
    }
}

cross_section_algebra!(@generic D: Distribution; IsotopeResonances<D>);

/// Abundance-weighted photoabsorption cross section of an element.
#[derive(Debug, Clone)]
pub struct ElementResonances {
    symbol: String,
    isotopes: BTreeMap<u32, (Arc<dyn CrossSection>, f64)>,
}

impl ElementResonances {
    /// `model` builds the cross section of one isotope. Isotopes without an
    /// abundance get the weight 0.
    pub fn new<F>(element: &Element, mut model: F) -> Result<Self>
    where
        F: FnMut(&Isotope) -> Result<Arc<dyn CrossSection>>,
    {
        let mut isotopes = BTreeMap::new();
        for (&a, isotope) in element.isotopes() {
            isotopes.insert(a, (model(isotope)?, element.abundance(a)));
        }
        Ok(Self {
            symbol: element.symbol().to_string(),
            isotopes,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Cross section and abundance by mass number.
    pub fn isotopes(&self) -> &BTreeMap<u32, (Arc<dyn CrossSection>, f64)> {
        &self.isotopes
    }

    pub fn into_weighted_sum(self) -> WeightedSum {
        let mut sum = WeightedSum::new();
        for (cs, abundance) in self.isotopes.into_values() {
            sum.push(cs, abundance);
        }
        sum
    }
}

impl CrossSection for ElementResonances {
    fn evaluate(&self, energy: f64) -> f64 {
        self.isotopes
            .values()
            .map(|(cs, x)| x * cs.evaluate(energy))
            .sum()
    }

    fn evaluate_many(&self, energies: &[f64]) -> Vec<f64> {
        let mut total = vec![0.0; energies.len()];
        for (cs, x) in self.isotopes.values() {
            for (t, v) in total.iter_mut().zip(cs.evaluate_many(energies)) {
                *t += x * v;
            }
        }
        total
    }

    fn equidistant_probability_grid(&self, limits: GridLimits, n: usize) -> Result<Vec<f64>> {
        let grids = self
            .isotopes
            .values()
            .map(|(cs, _)| cs.equidistant_probability_grid(limits, n))
            .collect::<Result<Vec<_>>>()?;
        Ok(union_sorted(grids))
    }
}

cross_section_algebra!(ElementResonances);
