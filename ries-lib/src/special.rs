//! Special functions needed by the shape models: the error function, the
//! standard normal quantile and the Faddeeva function.

use num_complex::Complex64;
use std::f64::consts::{PI, SQRT_2};

const FRAC_2_SQRT_PI: f64 = std::f64::consts::FRAC_2_SQRT_PI;
const SQRT_PI: f64 = 1.772_453_850_905_516;

/// Above this argument `erfc` is evaluated with the continued fraction.
const ERFC_CONTINUED_FRACTION_THRESHOLD: f64 = 3.0;

/// Error function.
pub fn erf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x < 0.0 {
        return -erf(-x);
    }
    if x >= ERFC_CONTINUED_FRACTION_THRESHOLD {
        return 1.0 - erfc_continued_fraction(x);
    }
    erf_series(x)
}

/// Complementary error function, accurate in the far tails.
pub fn erfc(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x < 0.0 {
        return 2.0 - erfc(-x);
    }
    if x >= ERFC_CONTINUED_FRACTION_THRESHOLD {
        return erfc_continued_fraction(x);
    }
    1.0 - erf_series(x)
}

/// erf(x) = 2/√π · exp(-x²) · Σ (2x²)ⁿ x / (2n+1)!!
///
/// All terms are positive, so there is no cancellation for moderate x.
fn erf_series(x: f64) -> f64 {
    let two_x2 = 2.0 * x * x;
    let mut term = x;
    let mut sum = x;
    for n in 1..200 {
        term *= two_x2 / (2 * n + 1) as f64;
        sum += term;
        if term < 1e-17 * sum {
            break;
        }
    }
    FRAC_2_SQRT_PI * (-x * x).exp() * sum
}

/// erfc(x) = exp(-x²)/√π · 1/(x + ½/(x + 1/(x + 3/2/(x + ...)))), modified Lentz.
fn erfc_continued_fraction(x: f64) -> f64 {
    const TINY: f64 = 1e-300;
    let mut f = x;
    let mut c = f;
    let mut d = 0.0;
    for n in 1..500 {
        let a = 0.5 * n as f64;
        d = x + a * d;
        if d.abs() < TINY {
            d = TINY;
        }
        d = 1.0 / d;
        c = x + a / c;
        if c.abs() < TINY {
            c = TINY;
        }
        let delta = c * d;
        f *= delta;
        if (delta - 1.0).abs() < 1e-16 {
            break;
        }
    }
    (-x * x).exp() / (SQRT_PI * f)
}

/// Standard normal cumulative distribution function.
pub fn standard_normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / SQRT_2)
}

/// Standard normal probability density function.
pub fn standard_normal_pdf(z: f64) -> f64 {
    (-0.5 * z * z).exp() / (2.0 * PI).sqrt()
}

/// Quantile of the standard normal distribution.
///
/// Acklam's rational approximation followed by one Halley step, which brings
/// the result to near machine precision. `p = 0` and `p = 1` map to ∓∞.
pub fn standard_normal_quantile(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969_683_028_665_376e1,
        2.209_460_984_245_205e2,
        -2.759_285_104_469_687e2,
        1.383_577_518_672_69e2,
        -3.066_479_806_614_716e1,
        2.506_628_277_459_239,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e1,
        1.615_858_368_580_409e2,
        -1.556_989_798_598_866e2,
        6.680_131_188_771_972e1,
        -1.328_068_155_288_572e1,
    ];
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-3,
        -3.223_964_580_411_365e-1,
        -2.400_758_277_161_838,
        -2.549_732_539_343_734,
        4.374_664_141_464_968,
        2.938_163_982_698_783,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-3,
        3.224_671_290_700_398e-1,
        2.445_134_137_142_996,
        3.754_408_661_907_416,
    ];
    const P_LOW: f64 = 0.02425;

    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }

    let x = if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    };

    // Halley refinement
    let e = standard_normal_cdf(x) - p;
    let u = e * (2.0 * PI).sqrt() * (0.5 * x * x).exp();
    if u.is_finite() {
        x - u / (1.0 + 0.5 * x * u)
    } else {
        x
    }
}

/// Faddeeva function w(z) = exp(-z²) erfc(-iz) for Im(z) >= 0.
///
/// Humlíček's W4 rational approximation (J. Quant. Spectrosc. Radiat.
/// Transfer 27, 437 (1982)); relative accuracy is about 1e-4 everywhere in
/// the upper half plane.
pub fn faddeeva(z: Complex64) -> Complex64 {
    let x = z.re;
    let y = z.im;
    let t = Complex64::new(y, -x);
    let s = x.abs() + y;

    if s >= 15.0 {
        t * 0.564_189_6 / (t * t + 0.5)
    } else if s >= 5.5 {
        let u = t * t;
        t * (u * 0.564_189_6 + 1.410_474) / (u * (u + 3.0) + 0.75)
    } else if y >= 0.195 * x.abs() - 0.176 {
        (((((t * 0.564_223_6 + 3.778_987) * t + 11.964_82) * t + 20.209_33) * t) + 16.495_5)
            / (((((t + 6.699_398) * t + 21.692_74) * t + 39.271_21) * t + 38.823_63) * t
                + 16.495_5)
    } else {
        let u = t * t;
        let numerator = t
            * (36_183.31
                - u * (3_321.990_5
                    - u * (1_540.787 - u * (219.031_3 - u * (35.766_83 - u * (1.320_522 - u * 0.564_19))))));
        let denominator = 32_066.6
            - u * (24_322.84
                - u * (9_022.228
                    - u * (2_186.181 - u * (364.219_1 - u * (61.570_37 - u * (1.841_439 - u))))));
        u.exp() - numerator / denominator
    }
}
