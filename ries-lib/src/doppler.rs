use crate::constants::{ATOMIC_MASS_UNIT_MEV, BOLTZMANN_MEV_PER_K};
use crate::error::{Result, RiesError};
use crate::integration::{QuadOptions, quad};

/// Maxwell-Boltzmann velocity distribution of the absorbing nuclei.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaxwellBoltzmann {
    /// Mass of the nucleus in atomic mass units.
    pub amu: f64,
    /// Effective temperature in K.
    pub effective_temperature: f64,
}

impl MaxwellBoltzmann {
    pub fn new(amu: f64, effective_temperature: f64) -> Result<Self> {
        if !(amu > 0.0) || !amu.is_finite() {
            return Err(RiesError::InvalidParameter(format!(
                "mass must be positive and finite, got {amu}"
            )));
        }
        if !(effective_temperature >= 0.0) || !effective_temperature.is_finite() {
            return Err(RiesError::InvalidParameter(format!(
                "effective temperature must be finite and non-negative, got {effective_temperature}"
            )));
        }
        Ok(Self {
            amu,
            effective_temperature,
        })
    }

    /// Doppler width Δ (MeV) of a line at `resonance_energy`, defined such
    /// that the broadened line is a Gaussian with σ = Δ/√2.
    pub fn doppler_width(&self, resonance_energy: f64) -> f64 {
        resonance_energy
            * (2.0 * BOLTZMANN_MEV_PER_K * self.effective_temperature
                / (self.amu * ATOMIC_MASS_UNIT_MEV))
                .sqrt()
    }
}

/// Effective temperature (K) that produces `doppler_width` at
/// `resonance_energy` for a nucleus of mass `amu`.
pub fn effective_temperature_for(doppler_width: f64, amu: f64, resonance_energy: f64) -> f64 {
    let ratio = doppler_width / resonance_energy;
    ratio * ratio * amu * ATOMIC_MASS_UNIT_MEV / (2.0 * BOLTZMANN_MEV_PER_K)
}

/// Effective temperature (K) of nuclei in a Debye solid at temperature `t`
/// with Debye temperature `t_debye`.
///
/// `T_eff = 3 T (T/T_D)³ ∫₀^{T_D/T} t³ (1/(eᵗ - 1) + 1/2) dt`. Tends to
/// `3/8 T_D` for `T ≪ T_D` and to `T` for `T ≫ T_D`.
pub fn effective_temperature_debye(t: f64, t_debye: f64) -> Result<f64> {
    if !t.is_finite() || !t_debye.is_finite() || t < 0.0 || t_debye < 0.0 {
        return Err(RiesError::InvalidParameter(format!(
            "temperatures must be finite and non-negative, got T = {t}, T_D = {t_debye}"
        )));
    }
    if t == 0.0 {
        return Err(RiesError::DivisionByZero(
            "thermodynamic temperature is 0".to_string(),
        ));
    }
    if t_debye == 0.0 {
        return Err(RiesError::DivisionByZero("Debye temperature is 0".to_string()));
    }

    let upper = t_debye / t;
    let integrand = |x: f64| {
        if x == 0.0 {
            0.0
        } else {
            x * x * x * (1.0 / x.exp_m1() + 0.5)
        }
    };
    let integral = quad(integrand, 0.0, upper, &QuadOptions::default()).integral;
    Ok(3.0 * t * (t / t_debye).powi(3) * integral)
}
