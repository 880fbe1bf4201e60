use std::f64::consts::LN_2;

use crate::distribution::{Cauchy, Distribution, NewtonOptions, NewtonOutcome, Normal, newton_quantiles};
use crate::error::{Result, RiesError};

/// Thompson–Cox–Hastings pseudo-Voigt profile.
///
/// A mixture `(1-η)·Normal + η·Cauchy` sharing one full width at half
/// maximum `Γ`, which approximates the convolution of a Gaussian of
/// FWHM `Γ_G` with a Lorentzian of FWHM `Γ_L`.
#[derive(Debug, Clone, PartialEq)]
pub struct PseudoVoigtProfile {
    location: f64,
    fwhm: f64,
    eta: f64,
    normal: Normal,
    cauchy: Cauchy,
    newton: NewtonOptions,
}

/// Combined FWHM and Lorentzian fraction η of a Gaussian (FWHM `g`) and a
/// Lorentzian (FWHM `l`).
pub fn thompson_parameters(g: f64, l: f64) -> (f64, f64) {
    let fwhm = (g.powi(5)
        + 2.69269 * g.powi(4) * l
        + 2.42843 * g.powi(3) * l.powi(2)
        + 4.47163 * g.powi(2) * l.powi(3)
        + 0.07842 * g * l.powi(4)
        + l.powi(5))
    .powf(0.2);
    let r = l / fwhm;
    let eta = 1.36603 * r - 0.47719 * r * r + 0.11116 * r * r * r;
    (fwhm, eta)
}

impl PseudoVoigtProfile {
    /// `doppler_width` is Δ (the Gaussian has σ = Δ/√2), `natural_width` is
    /// the Lorentzian FWHM Γ. Either may be zero, but not both.
    pub fn new(location: f64, doppler_width: f64, natural_width: f64) -> Result<Self> {
        if !(doppler_width >= 0.0) || !(natural_width >= 0.0) {
            return Err(RiesError::InvalidParameter(format!(
                "widths must be non-negative, got Δ = {doppler_width}, Γ = {natural_width}"
            )));
        }
        let gaussian_fwhm = 2.0 * LN_2.sqrt() * doppler_width;
        let (fwhm, eta) = thompson_parameters(gaussian_fwhm, natural_width);
        if !(fwhm > 0.0) || !fwhm.is_finite() {
            return Err(RiesError::InvalidParameter(format!(
                "pseudo-Voigt width must be positive and finite, got {fwhm}"
            )));
        }
        let normal = Normal::new(location, fwhm / (2.0 * (2.0 * LN_2).sqrt()))?;
        let cauchy = Cauchy::new(location, fwhm / 2.0)?;
        Ok(Self {
            location,
            fwhm,
            eta: eta.clamp(0.0, 1.0),
            normal,
            cauchy,
            newton: NewtonOptions::default(),
        })
    }

    pub fn with_newton_options(mut self, options: NewtonOptions) -> Self {
        self.newton = options;
        self
    }

    pub fn location(&self) -> f64 {
        self.location
    }

    pub fn fwhm(&self) -> f64 {
        self.fwhm
    }

    /// Lorentzian weight of the mixture.
    pub fn eta(&self) -> f64 {
        self.eta
    }

    pub fn normal(&self) -> &Normal {
        &self.normal
    }

    pub fn cauchy(&self) -> &Cauchy {
        &self.cauchy
    }

    pub fn newton_options(&self) -> &NewtonOptions {
        &self.newton
    }

    /// Weighted sum of the component quantiles. Only an approximation of the
    /// mixture quantile.
    pub fn approximate_ppf(&self, q: f64) -> f64 {
        if q == 0.0 {
            return f64::NEG_INFINITY;
        }
        if q == 1.0 {
            return f64::INFINITY;
        }
        (1.0 - self.eta) * self.normal.ppf(q) + self.eta * self.cauchy.ppf(q)
    }

    /// Newton quantiles of the mixture cdf.
    pub fn newton_ppf(&self, q: &[f64]) -> Result<Vec<f64>> {
        newton_quantiles(
            q,
            self.location,
            self.fwhm,
            |x| self.cdf(x),
            |x| self.pdf(x),
            &self.newton,
        )
    }

    /// Quantiles together with how they were obtained.
    pub fn quantiles(&self, q: &[f64]) -> (Vec<f64>, NewtonOutcome) {
        match self.newton_ppf(q) {
            Ok(x) => (x, NewtonOutcome::Converged),
            Err(err) => {
                tracing::warn!(
                    %err,
                    "pseudo-Voigt quantile refinement failed, using the weighted component quantiles"
                );
                let x = q.iter().map(|&qi| self.approximate_ppf(qi)).collect();
                (x, NewtonOutcome::FellBack)
            }
        }
    }
}

impl Distribution for PseudoVoigtProfile {
    fn pdf(&self, x: f64) -> f64 {
        (1.0 - self.eta) * self.normal.pdf(x) + self.eta * self.cauchy.pdf(x)
    }

    fn cdf(&self, x: f64) -> f64 {
        (1.0 - self.eta) * self.normal.cdf(x) + self.eta * self.cauchy.cdf(x)
    }

    fn ppf(&self, q: f64) -> f64 {
        self.ppf_many(&[q])[0]
    }

    fn ppf_many(&self, q: &[f64]) -> Vec<f64> {
        self.quantiles(q).0
    }

    fn median(&self) -> f64 {
        self.location
    }
}
