use std::f64::consts::PI;

/// Reduced Planck constant times speed of light (MeV·fm)
pub const HBAR_C: f64 = 197.326_980_4;

/// (π ħc)² (MeV²·fm²), prefactor of the energy-integrated cross section
pub const PI_HBAR_C_SQUARED: f64 = (PI * HBAR_C) * (PI * HBAR_C);

/// Atomic mass constant energy equivalent (MeV)
pub const ATOMIC_MASS_UNIT_MEV: f64 = 931.494_102_42;

/// Atomic mass constant (kg)
pub const ATOMIC_MASS_UNIT_KG: f64 = 1.660_539_066_60e-27;

/// Boltzmann constant (MeV/K)
pub const BOLTZMANN_MEV_PER_K: f64 = 8.617_333_262e-11;

/// Electron mass energy equivalent (MeV)
pub const ELECTRON_MASS_MEV: f64 = 0.510_998_950_00;

/// Fine-structure constant
pub const FINE_STRUCTURE: f64 = 7.297_352_569_3e-3;

/// Centimeters to femtometers
pub const CM_TO_FM: f64 = 1e13;
