use std::f64::consts::{PI, SQRT_2};

use num_complex::Complex64;

use crate::distribution::{Distribution, NewtonOptions, NewtonOutcome, newton_quantiles};
use crate::error::Result;
use crate::pseudo_voigt::PseudoVoigtProfile;
use crate::special::faddeeva;

/// Voigt profile: a Cauchy of half width `γ = Γ/2` convolved with a Normal
/// of standard deviation `σ = Δ/√2`.
///
/// The density is exact (via the Faddeeva function); the distribution
/// function and the quantile start values come from the pseudo-Voigt
/// approximation of the same widths.
#[derive(Debug, Clone, PartialEq)]
pub struct VoigtProfile {
    location: f64,
    sigma: f64,
    gamma: f64,
    pseudo: PseudoVoigtProfile,
}

impl VoigtProfile {
    pub fn new(location: f64, doppler_width: f64, natural_width: f64) -> Result<Self> {
        let pseudo = PseudoVoigtProfile::new(location, doppler_width, natural_width)?;
        Ok(Self {
            location,
            sigma: doppler_width / SQRT_2,
            gamma: natural_width / 2.0,
            pseudo,
        })
    }

    pub fn with_newton_options(mut self, options: NewtonOptions) -> Self {
        self.pseudo = self.pseudo.with_newton_options(options);
        self
    }

    pub fn location(&self) -> f64 {
        self.location
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn pseudo_voigt(&self) -> &PseudoVoigtProfile {
        &self.pseudo
    }

    /// Newton quantiles of the pseudo-Voigt cdf, stepping with the exact
    /// density.
    pub fn newton_ppf(&self, q: &[f64]) -> Result<Vec<f64>> {
        newton_quantiles(
            q,
            self.location,
            self.pseudo.fwhm(),
            |x| self.pseudo.cdf(x),
            |x| self.pdf(x),
            self.pseudo.newton_options(),
        )
    }

    pub fn quantiles(&self, q: &[f64]) -> (Vec<f64>, NewtonOutcome) {
        match self.newton_ppf(q) {
            Ok(x) => (x, NewtonOutcome::Converged),
            Err(err) => {
                tracing::warn!(
                    %err,
                    "Voigt quantile refinement failed, using the pseudo-Voigt component quantiles"
                );
                let x = q.iter().map(|&qi| self.pseudo.approximate_ppf(qi)).collect();
                (x, NewtonOutcome::FellBack)
            }
        }
    }
}

impl Distribution for VoigtProfile {
    fn pdf(&self, x: f64) -> f64 {
        let dx = x - self.location;
        if self.sigma == 0.0 {
            return self.gamma / (PI * (dx * dx + self.gamma * self.gamma));
        }
        let norm = self.sigma * (2.0 * PI).sqrt();
        if self.gamma == 0.0 {
            let z = dx / self.sigma;
            return (-0.5 * z * z).exp() / norm;
        }
        let z = Complex64::new(dx, self.gamma) / (self.sigma * SQRT_2);
        faddeeva(z).re / norm
    }

    fn cdf(&self, x: f64) -> f64 {
        self.pseudo.cdf(x)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::{Cauchy, Normal};
    use approx::assert_relative_eq;

    #[test]
    fn test_degenerate_widths() {
        let lorentz = VoigtProfile::new(1.0, 0.0, 0.4).unwrap();
        let cauchy = Cauchy::new(1.0, 0.2).unwrap();
        assert_relative_eq!(lorentz.pdf(1.3), cauchy.pdf(1.3), max_relative = 1e-14);

        let gauss = VoigtProfile::new(1.0, 0.4, 0.0).unwrap();
        let normal = Normal::new(1.0, 0.4 / SQRT_2).unwrap();
        assert_relative_eq!(gauss.pdf(1.3), normal.pdf(1.3), max_relative = 1e-14);
    }

    #[test]
    fn test_close_to_pseudo_voigt() {
        let voigt = VoigtProfile::new(3.0, 1e-3, 1e-3).unwrap();
        let pseudo = voigt.pseudo_voigt();
        for &x in &[3.0, 3.0005, 2.9995] {
            assert_relative_eq!(voigt.pdf(x), pseudo.pdf(x), max_relative = 2e-2);
        }
    }

    #[test]
    fn test_quantiles_bracket_the_median() {
        let voigt = VoigtProfile::new(3.0, 1e-3, 2e-3).unwrap();
        let (x, outcome) = voigt.quantiles(&[0.25, 0.5, 0.75]);
        assert_eq!(outcome, NewtonOutcome::Converged);
        assert_relative_eq!(x[1], 3.0, max_relative = 1e-12);
        assert_relative_eq!(3.0 - x[0], x[2] - 3.0, max_relative = 1e-6);
        assert_relative_eq!(voigt.cdf(x[2]), 0.75, max_relative = 1e-8);
    }
}
