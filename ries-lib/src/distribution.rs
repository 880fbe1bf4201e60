//! Location/scale probability distributions used as resonance line shapes.

use std::f64::consts::PI;
use std::fmt::Debug;

use crate::error::{Result, RiesError};
use crate::special::{erfc, standard_normal_pdf, standard_normal_quantile};

/// A continuous probability distribution on the energy axis.
///
/// `ppf` is the inverse of `cdf` (the percent point function).
pub trait Distribution: Debug + Send + Sync {
    fn pdf(&self, x: f64) -> f64;
    fn cdf(&self, x: f64) -> f64;
    fn ppf(&self, q: f64) -> f64;

    fn pdf_many(&self, x: &[f64]) -> Vec<f64> {
        x.iter().map(|&xi| self.pdf(xi)).collect()
    }

    fn cdf_many(&self, x: &[f64]) -> Vec<f64> {
        x.iter().map(|&xi| self.cdf(xi)).collect()
    }

    /// Quantiles for a batch of probabilities.
    ///
    /// Shapes without a closed-form inverse override this to refine the
    /// whole batch at once.
    fn ppf_many(&self, q: &[f64]) -> Vec<f64> {
        q.iter().map(|&qi| self.ppf(qi)).collect()
    }

    fn median(&self) -> f64 {
        self.ppf(0.5)
    }
}

fn check_scale(scale: f64) -> Result<()> {
    if scale > 0.0 && scale.is_finite() {
        Ok(())
    } else {
        Err(RiesError::InvalidParameter(format!(
            "distribution scale must be positive and finite, got {scale}"
        )))
    }
}

fn check_location(location: f64) -> Result<()> {
    if location.is_finite() {
        Ok(())
    } else {
        Err(RiesError::InvalidParameter(format!(
            "distribution location must be finite, got {location}"
        )))
    }
}

/// Uniform distribution on `[location, location + scale]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniform {
    location: f64,
    scale: f64,
}

impl Uniform {
    pub fn new(location: f64, scale: f64) -> Result<Self> {
        check_location(location)?;
        check_scale(scale)?;
        Ok(Self { location, scale })
    }

    pub fn location(&self) -> f64 {
        self.location
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Distribution for Uniform {
    fn pdf(&self, x: f64) -> f64 {
        if x >= self.location && x <= self.location + self.scale {
            1.0 / self.scale
        } else {
            0.0
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        ((x - self.location) / self.scale).clamp(0.0, 1.0)
    }

    fn ppf(&self, q: f64) -> f64 {
        if !(0.0..=1.0).contains(&q) {
            return f64::NAN;
        }
        self.location + q * self.scale
    }
}

/// Cauchy (Lorentz) distribution; `scale` is the half width at half maximum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cauchy {
    location: f64,
    scale: f64,
}

impl Cauchy {
    pub fn new(location: f64, scale: f64) -> Result<Self> {
        check_location(location)?;
        check_scale(scale)?;
        Ok(Self { location, scale })
    }

    pub fn location(&self) -> f64 {
        self.location
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Distribution for Cauchy {
    fn pdf(&self, x: f64) -> f64 {
        let z = (x - self.location) / self.scale;
        1.0 / (PI * self.scale * (1.0 + z * z))
    }

    fn cdf(&self, x: f64) -> f64 {
        let z = (x - self.location) / self.scale;
        0.5 + z.atan() / PI
    }

    fn ppf(&self, q: f64) -> f64 {
        if !(0.0..=1.0).contains(&q) {
            return f64::NAN;
        }
        // tan(±π/2) is finite in floating point
        if q == 0.0 {
            return f64::NEG_INFINITY;
        }
        if q == 1.0 {
            return f64::INFINITY;
        }
        self.location + self.scale * (PI * (q - 0.5)).tan()
    }

    fn median(&self) -> f64 {
        self.location
    }
}

/// Normal (Gauss) distribution; `scale` is the standard deviation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    location: f64,
    scale: f64,
}

impl Normal {
    pub fn new(location: f64, scale: f64) -> Result<Self> {
        check_location(location)?;
        check_scale(scale)?;
        Ok(Self { location, scale })
    }

    pub fn location(&self) -> f64 {
        self.location
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Distribution for Normal {
    fn pdf(&self, x: f64) -> f64 {
        standard_normal_pdf((x - self.location) / self.scale) / self.scale
    }

    fn cdf(&self, x: f64) -> f64 {
        let z = (x - self.location) / self.scale;
        0.5 * erfc(-z / std::f64::consts::SQRT_2)
    }

    fn ppf(&self, q: f64) -> f64 {
        self.location + self.scale * standard_normal_quantile(q)
    }

    fn median(&self) -> f64 {
        self.location
    }
}

/// Settings for the Newton-Raphson quantile refinement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonOptions {
    pub max_iterations: usize,
    /// Convergence threshold on the step, relative to the distribution width.
    pub tolerance: f64,
}

impl Default for NewtonOptions {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            tolerance: 1e-9,
        }
    }
}

/// How a batch of quantiles was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewtonOutcome {
    Converged,
    /// Newton failed for at least one value and the whole batch was
    /// replaced by the approximate quantiles.
    FellBack,
}

/// Solve `cdf(x) = q` for every `q` by Newton-Raphson, starting at `location`.
///
/// `width` sets the absolute scale of the convergence test. `q = 0` and
/// `q = 1` map to ∓∞ without iterating. Fails on the first quantile that
/// does not converge within `options.max_iterations`, or whose derivative
/// vanishes.
pub fn newton_quantiles<C, P>(
    q: &[f64],
    location: f64,
    width: f64,
    cdf: C,
    pdf: P,
    options: &NewtonOptions,
) -> Result<Vec<f64>>
where
    C: Fn(f64) -> f64,
    P: Fn(f64) -> f64,
{
    q.iter()
        .map(|&qi| {
            if !(0.0..=1.0).contains(&qi) {
                return Err(RiesError::InvalidParameter(format!(
                    "quantile must lie in [0, 1], got {qi}"
                )));
            }
            if qi == 0.0 {
                return Ok(f64::NEG_INFINITY);
            }
            if qi == 1.0 {
                return Ok(f64::INFINITY);
            }
            let mut x = location;
            for _ in 0..options.max_iterations {
                let residual = cdf(x) - qi;
                if residual.abs() <= 2.0 * f64::EPSILON * qi {
                    return Ok(x);
                }
                let step = residual / pdf(x);
                if !step.is_finite() {
                    break;
                }
                x -= step;
                if step.abs() <= options.tolerance * width
                    || step.abs() <= 4.0 * f64::EPSILON * x.abs()
                {
                    return Ok(x);
                }
            }
            Err(RiesError::RootNotConverged {
                quantile: qi,
                iterations: options.max_iterations,
            })
        })
        .collect()
}
