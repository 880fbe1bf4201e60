//! Cross sections as functions of the photon energy, and their algebra.
//!
//! Every model implements [`CrossSection`]. Adding models or scaling them
//! by a number produces a flat [`WeightedSum`] of shared constituents.

use std::fmt::Debug;
use std::iter::Sum;
use std::ops::{Add, Mul};
use std::sync::Arc;

use crate::error::{Result, RiesError};
use crate::grid::{GridLimits, linspace, union_sorted};

/// An energy-dependent cross section in fm², energies in MeV.
pub trait CrossSection: Debug + Send + Sync {
    fn evaluate(&self, energy: f64) -> f64;

    fn evaluate_many(&self, energies: &[f64]) -> Vec<f64> {
        energies.iter().map(|&e| self.evaluate(e)).collect()
    }

    /// `n` equidistant energies between the limits.
    ///
    /// A coverage only has a meaning for models with a line shape, so the
    /// default rejects it.
    fn equidistant_energy_grid(&self, limits: GridLimits, n: usize) -> Result<Vec<f64>> {
        limits.validate()?;
        match limits {
            GridLimits::Energies(lo, hi) => Ok(linspace(lo, hi, n)),
            GridLimits::Coverage(c) => Err(RiesError::CoverageUndefined(format!(
                "coverage {c} of {self:?}"
            ))),
        }
    }

    /// `n` energies that divide the probability between the limits into
    /// equal parts.
    fn equidistant_probability_grid(&self, _limits: GridLimits, _n: usize) -> Result<Vec<f64>> {
        Err(RiesError::NotImplemented("equidistant_probability_grid"))
    }
}

impl<T: CrossSection + ?Sized> CrossSection for Arc<T> {
    fn evaluate(&self, energy: f64) -> f64 {
        (**self).evaluate(energy)
    }

    fn evaluate_many(&self, energies: &[f64]) -> Vec<f64> {
        (**self).evaluate_many(energies)
    }

    fn equidistant_energy_grid(&self, limits: GridLimits, n: usize) -> Result<Vec<f64>> {
        (**self).equidistant_energy_grid(limits, n)
    }

    fn equidistant_probability_grid(&self, limits: GridLimits, n: usize) -> Result<Vec<f64>> {
        (**self).equidistant_probability_grid(limits, n)
    }
}

/// The same cross section at every energy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantCrossSection(pub f64);

impl CrossSection for ConstantCrossSection {
    fn evaluate(&self, _energy: f64) -> f64 {
        self.0
    }

    fn evaluate_many(&self, energies: &[f64]) -> Vec<f64> {
        vec![self.0; energies.len()]
    }

    fn equidistant_probability_grid(&self, limits: GridLimits, n: usize) -> Result<Vec<f64>> {
        self.equidistant_energy_grid(limits, n)
    }
}

/// A linear combination `Σ kᵢ σᵢ(E)` of cross sections.
#[derive(Debug, Clone, Default)]
pub struct WeightedSum {
    terms: Vec<(Arc<dyn CrossSection>, f64)>,
}

impl WeightedSum {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sum with a single constituent of weight 1.
    pub fn from_reaction<C: CrossSection + 'static>(reaction: C) -> Self {
        Self {
            terms: vec![(Arc::new(reaction), 1.0)],
        }
    }

    pub fn push(&mut self, reaction: Arc<dyn CrossSection>, scale: f64) {
        self.terms.push((reaction, scale));
    }

    pub fn terms(&self) -> &[(Arc<dyn CrossSection>, f64)] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Multiply every coefficient by `factor`.
    pub fn scale(mut self, factor: f64) -> Self {
        for (_, k) in &mut self.terms {
            *k *= factor;
        }
        self
    }
}

impl CrossSection for WeightedSum {
    fn evaluate(&self, energy: f64) -> f64 {
        self.terms
            .iter()
            .map(|(cs, k)| k * cs.evaluate(energy))
            .sum()
    }

    fn evaluate_many(&self, energies: &[f64]) -> Vec<f64> {
        let mut total = vec![0.0; energies.len()];
        for (cs, k) in &self.terms {
            for (t, v) in total.iter_mut().zip(cs.evaluate_many(energies)) {
                *t += k * v;
            }
        }
        total
    }

    /// Union of the `n`-point probability grids of all constituents.
    fn equidistant_probability_grid(&self, limits: GridLimits, n: usize) -> Result<Vec<f64>> {
        let grids = self
            .terms
            .iter()
            .map(|(cs, _)| cs.equidistant_probability_grid(limits, n))
            .collect::<Result<Vec<_>>>()?;
        Ok(union_sorted(grids))
    }
}

impl From<f64> for WeightedSum {
    fn from(value: f64) -> Self {
        Self::from_reaction(ConstantCrossSection(value))
    }
}

impl From<Arc<dyn CrossSection>> for WeightedSum {
    fn from(reaction: Arc<dyn CrossSection>) -> Self {
        Self {
            terms: vec![(reaction, 1.0)],
        }
    }
}

impl<Rhs: Into<WeightedSum>> Add<Rhs> for WeightedSum {
    type Output = WeightedSum;

    fn add(mut self, rhs: Rhs) -> WeightedSum {
        self.terms.extend(rhs.into().terms);
        self
    }
}

impl Add<WeightedSum> for f64 {
    type Output = WeightedSum;

    fn add(self, rhs: WeightedSum) -> WeightedSum {
        WeightedSum::from(self) + rhs
    }
}

impl Mul<f64> for WeightedSum {
    type Output = WeightedSum;

    fn mul(self, factor: f64) -> WeightedSum {
        self.scale(factor)
    }
}

impl Mul<WeightedSum> for f64 {
    type Output = WeightedSum;

    fn mul(self, rhs: WeightedSum) -> WeightedSum {
        rhs.scale(self)
    }
}

impl<T: Into<WeightedSum>> Sum<T> for WeightedSum {
    fn sum<I: Iterator<Item = T>>(iter: I) -> Self {
        iter.fold(WeightedSum::new(), |acc, x| acc + x)
    }
}

/// Implements `+`, `*` and the conversion into a [`WeightedSum`] for a
/// concrete cross-section model. Generic models list their parameters after
/// `@generic`, as in `cross_section_algebra!(@generic D: Distribution; Resonance<D>)`.
macro_rules! cross_section_algebra {
    ($(@generic $($g:ident $(: $bound:path)?),+ ;)? $ty:ty) => {
        impl$(<$($g: 'static $(+ $bound)?),+>)? From<$ty> for $crate::cross_section::WeightedSum {
            fn from(reaction: $ty) -> Self {
                $crate::cross_section::WeightedSum::from_reaction(reaction)
            }
        }

        impl<Rhs: Into<$crate::cross_section::WeightedSum> $($(, $g: 'static $(+ $bound)?)+)?>
            std::ops::Add<Rhs> for $ty
        {
            type Output = $crate::cross_section::WeightedSum;

            fn add(self, rhs: Rhs) -> Self::Output {
                $crate::cross_section::WeightedSum::from(self) + rhs
            }
        }

        impl$(<$($g: 'static $(+ $bound)?),+>)? std::ops::Add<$ty> for f64 {
            type Output = $crate::cross_section::WeightedSum;

            fn add(self, rhs: $ty) -> Self::Output {
                $crate::cross_section::WeightedSum::from(self) + rhs
            }
        }

        impl$(<$($g: 'static $(+ $bound)?),+>)? std::ops::Mul<f64> for $ty {
            type Output = $crate::cross_section::WeightedSum;

            fn mul(self, factor: f64) -> Self::Output {
                $crate::cross_section::WeightedSum::from(self).scale(factor)
            }
        }

        impl$(<$($g: 'static $(+ $bound)?),+>)? std::ops::Mul<$ty> for f64 {
            type Output = $crate::cross_section::WeightedSum;

            fn mul(self, rhs: $ty) -> Self::Output {
                $crate::cross_section::WeightedSum::from(rhs).scale(self)
            }
        }
    };
}

pub(crate) use cross_section_algebra;

cross_section_algebra!(ConstantCrossSection);
