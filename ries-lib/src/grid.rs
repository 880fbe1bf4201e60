//! Energy grids for evaluating and integrating cross sections.

use crate::distribution::Distribution;
use crate::error::{Result, RiesError};

/// Range of an energy grid: either a symmetric coverage of a distribution
/// or explicit energies in MeV.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridLimits {
    /// Fraction of the probability, centered on the median, in `[0, 1]`.
    Coverage(f64),
    Energies(f64, f64),
}

impl GridLimits {
    pub fn coverage(c: f64) -> Self {
        Self::Coverage(c)
    }

    pub fn energies(lo: f64, hi: f64) -> Self {
        Self::Energies(lo, hi)
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Coverage(c) => check_coverage(c),
            Self::Energies(lo, hi) => {
                if !lo.is_finite() || !hi.is_finite() || hi < lo {
                    Err(RiesError::InvalidParameter(format!(
                        "energy limits must be finite and ordered, got ({lo}, {hi})"
                    )))
                } else {
                    Ok(())
                }
            }
        }
    }
}

impl From<f64> for GridLimits {
    fn from(coverage: f64) -> Self {
        Self::Coverage(coverage)
    }
}

impl From<(f64, f64)> for GridLimits {
    fn from((lo, hi): (f64, f64)) -> Self {
        Self::Energies(lo, hi)
    }
}

pub(crate) fn check_coverage(c: f64) -> Result<()> {
    if (0.0..=1.0).contains(&c) {
        Ok(())
    } else {
        Err(RiesError::InvalidParameter(format!(
            "coverage must lie in [0, 1], got {c}"
        )))
    }
}

/// `n` evenly spaced values from `lo` to `hi`, both included exactly.
pub fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (n - 1) as f64;
            let mut grid: Vec<f64> = (0..n).map(|i| lo + i as f64 * step).collect();
            grid[n - 1] = hi;
            grid
        }
    }
}

/// Merge several grids into one ascending grid without duplicates.
pub fn union_sorted<I, G>(grids: I) -> Vec<f64>
where
    I: IntoIterator<Item = G>,
    G: AsRef<[f64]>,
{
    let mut merged: Vec<f64> = grids
        .into_iter()
        .flat_map(|g| g.as_ref().to_vec())
        .collect();
    merged.sort_by(|a, b| a.total_cmp(b));
    merged.dedup();
    merged
}

/// Grid whose points are equidistant in the distribution function of `dist`.
///
/// For a coverage `c` the probabilities run from `(1-c)/2` to `(1+c)/2`;
/// for explicit energies they run from `cdf(lo)` to `cdf(hi)` and the
/// endpoints of the grid are exactly `lo` and `hi`.
pub fn probability_grid<D: Distribution + ?Sized>(
    dist: &D,
    limits: GridLimits,
    n: usize,
) -> Result<Vec<f64>> {
    limits.validate()?;
    match limits {
        GridLimits::Coverage(c) => {
            let q = linspace(0.5 * (1.0 - c), 0.5 * (1.0 + c), n);
            Ok(dist.ppf_many(&q))
        }
        GridLimits::Energies(lo, hi) => {
            let q = linspace(dist.cdf(lo), dist.cdf(hi), n);
            let mut grid = dist.ppf_many(&q);
            if let Some(first) = grid.first_mut() {
                *first = lo;
            }
            if n > 1 {
                grid[n - 1] = hi;
            }
            Ok(grid)
        }
    }
}
