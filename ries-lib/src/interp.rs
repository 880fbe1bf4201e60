use crate::error::{Result, RiesError};

/// Piecewise-linear interpolation of a single value on ascending nodes.
///
/// Values outside `[xp[0], xp[n-1]]` are clamped to the boundary values.
/// Without nodes the result is NaN.
pub fn interp_one(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    let Some(last) = xp.len().checked_sub(1) else {
        return f64::NAN;
    };
    if x <= xp[0] {
        return fp[0];
    }
    if x >= xp[last] {
        return fp[last];
    }

    let hi = xp.partition_point(|&v| v < x);
    if xp[hi] == x {
        return fp[hi];
    }
    let lo = hi - 1;
    let t = (x - xp[lo]) / (xp[hi] - xp[lo]);
    fp[lo] + t * (fp[hi] - fp[lo])
}

/// A table interpolated linearly in log(x)-log(y) space.
///
/// The logarithms of the nodes are taken once at construction; lookups
/// outside the tabulated range return the boundary values.
#[derive(Debug, Clone, PartialEq)]
pub struct LogLogTable {
    log_x: Vec<f64>,
    log_y: Vec<f64>,
}

impl LogLogTable {
    /// Build a table from strictly ascending, strictly positive abscissae and
    /// strictly positive ordinates.
    pub fn new(x: &[f64], y: &[f64]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(RiesError::InvalidParameter(format!(
                "table lengths differ: {} abscissae, {} ordinates",
                x.len(),
                y.len()
            )));
        }
        if x.len() < 2 {
            return Err(RiesError::InvalidParameter(
                "a table needs at least two nodes".to_string(),
            ));
        }
        if x.iter().chain(y).any(|&v| !(v > 0.0) || !v.is_finite()) {
            return Err(RiesError::InvalidParameter(
                "table values must be finite and positive".to_string(),
            ));
        }
        if x.windows(2).any(|w| w[1] <= w[0]) {
            return Err(RiesError::InvalidParameter(
                "table abscissae must be strictly ascending".to_string(),
            ));
        }
        Ok(Self {
            log_x: x.iter().map(|v| v.ln()).collect(),
            log_y: y.iter().map(|v| v.ln()).collect(),
        })
    }

    pub fn eval(&self, x: f64) -> f64 {
        interp_one(x.ln(), &self.log_x, &self.log_y).exp()
    }

    pub fn eval_many(&self, x: &[f64]) -> Vec<f64> {
        x.iter().map(|&xi| self.eval(xi)).collect()
    }

    /// The tabulated abscissae.
    pub fn nodes(&self) -> Vec<f64> {
        self.log_x.iter().map(|v| v.exp()).collect()
    }

    pub fn len(&self) -> usize {
        self.log_x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log_x.is_empty()
    }
}
