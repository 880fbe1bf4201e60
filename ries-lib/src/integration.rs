//! Integration of functions with arbitrarily narrow peaks.
//!
//! A plain adaptive quadrature over a wide range samples a peak only if one
//! of its nodes happens to land inside it. The routines here take a
//! partition of the integration range (usually an equal-probability grid of
//! the peaked function) and integrate every cell separately.

use crate::error::{Result, RiesError};

/// Lower and upper Darboux sums of a sampled function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DarbouxSums {
    pub lower: f64,
    pub upper: f64,
}

impl DarbouxSums {
    pub fn uncertainty(&self) -> f64 {
        (self.upper - self.lower).abs()
    }
}

fn check_partition(x: &[f64]) -> Result<()> {
    if x.len() < 2 {
        return Err(RiesError::InvalidPartition(format!(
            "a partition needs at least 2 points, got {}",
            x.len()
        )));
    }
    if x.iter().any(|v| !v.is_finite()) {
        return Err(RiesError::InvalidPartition(
            "partition points must be finite".to_string(),
        ));
    }
    if let Some(w) = x.windows(2).find(|w| w[1] < w[0]) {
        return Err(RiesError::InvalidPartition(format!(
            "partition must be non-decreasing, found {} after {}",
            w[1], w[0]
        )));
    }
    Ok(())
}

/// Darboux sums approximated by the smaller and larger value at the ends of
/// every cell. Exact for functions monotonic on each cell.
pub fn darboux(values: &[f64], x: &[f64]) -> Result<DarbouxSums> {
    if values.len() != x.len() {
        return Err(RiesError::InvalidPartition(format!(
            "{} values for {} partition points",
            values.len(),
            x.len()
        )));
    }
    check_partition(x)?;

    let mut sums = DarbouxSums {
        lower: 0.0,
        upper: 0.0,
    };
    for (f, x) in values.windows(2).zip(x.windows(2)) {
        let dx = x[1] - x[0];
        sums.lower += f[0].min(f[1]) * dx;
        sums.upper += f[0].max(f[1]) * dx;
    }
    Ok(sums)
}

/// [`darboux`] with the values sampled from `f`.
pub fn darboux_fn<F: Fn(f64) -> f64>(f: F, x: &[f64]) -> Result<DarbouxSums> {
    let values: Vec<f64> = x.iter().map(|&xi| f(xi)).collect();
    darboux(&values, x)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadOptions {
    pub abs_tol: f64,
    pub rel_tol: f64,
    /// Maximum number of cells the adaptive bisection may create.
    pub max_subdivisions: usize,
}

impl Default for QuadOptions {
    fn default() -> Self {
        Self {
            abs_tol: 1.49e-8,
            rel_tol: 1.49e-8,
            max_subdivisions: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadResult {
    pub integral: f64,
    pub abs_error: f64,
    pub subdivisions: usize,
}

// 15-point Kronrod nodes on [0, 1]; odd indices are the 7-point Gauss nodes.
const XGK: [f64; 8] = [
    0.991_455_371_120_812_639_206_854_697_526_329,
    0.949_107_912_342_758_524_526_189_684_047_851,
    0.864_864_423_359_769_072_789_712_788_640_926,
    0.741_531_185_599_394_439_863_864_773_280_788,
    0.586_087_235_467_691_130_294_144_845_693_013,
    0.405_845_151_377_397_166_906_606_412_076_961,
    0.207_784_955_007_898_467_600_689_403_773_245,
    0.0,
];

const WGK: [f64; 8] = [
    0.022_935_322_010_529_224_963_732_008_058_970,
    0.063_092_092_629_978_553_290_700_663_189_204,
    0.104_790_010_322_250_183_839_876_322_541_518,
    0.140_653_259_715_525_918_745_189_590_510_238,
    0.169_004_726_639_267_902_826_583_426_598_550,
    0.190_350_578_064_785_409_913_256_402_421_014,
    0.204_432_940_075_298_892_414_161_999_234_649,
    0.209_482_141_084_727_828_012_999_174_891_714,
];

const WG: [f64; 4] = [
    0.129_484_966_168_869_693_270_611_432_679_082,
    0.279_705_391_489_276_667_901_467_771_423_780,
    0.381_830_050_505_118_944_950_369_775_488_975,
    0.417_959_183_673_469_387_755_102_040_816_327,
];

#[derive(Debug, Clone, Copy)]
struct Cell {
    a: f64,
    b: f64,
    integral: f64,
    error: f64,
}

/// Gauss–Kronrod 7/15 rule with the QUADPACK error heuristic.
fn gauss_kronrod_15<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64) -> Cell {
    let center = 0.5 * (a + b);
    let half = 0.5 * (b - a);

    let fc = f(center);
    let mut result_kronrod = fc * WGK[7];
    let mut result_gauss = fc * WG[3];
    let mut result_abs = result_kronrod.abs();
    let mut f1 = [0.0; 7];
    let mut f2 = [0.0; 7];

    for j in 0..7 {
        let dx = half * XGK[j];
        let lo = f(center - dx);
        let hi = f(center + dx);
        f1[j] = lo;
        f2[j] = hi;
        result_kronrod += WGK[j] * (lo + hi);
        result_abs += WGK[j] * (lo.abs() + hi.abs());
        if j % 2 == 1 {
            result_gauss += WG[j / 2] * (lo + hi);
        }
    }

    let mean = 0.5 * result_kronrod;
    let mut result_asc = WGK[7] * (fc - mean).abs();
    for j in 0..7 {
        result_asc += WGK[j] * ((f1[j] - mean).abs() + (f2[j] - mean).abs());
    }

    let integral = result_kronrod * half;
    result_abs *= half.abs();
    result_asc *= half.abs();
    let mut error = ((result_kronrod - result_gauss) * half).abs();
    if result_asc != 0.0 && error != 0.0 {
        error = result_asc * (200.0 * error / result_asc).powf(1.5).min(1.0);
    }
    if result_abs > f64::MIN_POSITIVE / (50.0 * f64::EPSILON) {
        error = error.max(50.0 * f64::EPSILON * result_abs);
    }

    Cell {
        a,
        b,
        integral,
        error,
    }
}

/// Global adaptive Gauss–Kronrod quadrature of `f` over `[a, b]`.
///
/// The cell with the largest error estimate is bisected until the summed
/// error satisfies the tolerances. Reaching `max_subdivisions` is not an
/// error: a warning is logged and the current estimate returned.
pub fn quad<F: Fn(f64) -> f64>(f: F, a: f64, b: f64, options: &QuadOptions) -> QuadResult {
    if a == b {
        return QuadResult {
            integral: 0.0,
            abs_error: 0.0,
            subdivisions: 0,
        };
    }

    let mut cells = vec![gauss_kronrod_15(&f, a, b)];
    let mut integral = cells[0].integral;
    let mut error = cells[0].error;

    while error > options.abs_tol.max(options.rel_tol * integral.abs()) {
        if cells.len() >= options.max_subdivisions {
            tracing::warn!(
                a,
                b,
                integral,
                error,
                subdivisions = cells.len(),
                "maximum number of subdivisions reached"
            );
            break;
        }
        let worst = cells
            .iter()
            .enumerate()
            .max_by(|(_, l), (_, r)| l.error.total_cmp(&r.error))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let cell = cells.swap_remove(worst);
        let mid = 0.5 * (cell.a + cell.b);
        if mid <= cell.a.min(cell.b) || mid >= cell.a.max(cell.b) {
            tracing::warn!(a = cell.a, b = cell.b, "cell cannot be bisected further");
            cells.push(cell);
            break;
        }
        cells.push(gauss_kronrod_15(&f, cell.a, mid));
        cells.push(gauss_kronrod_15(&f, mid, cell.b));

        integral = cells.iter().map(|c| c.integral).sum();
        error = cells.iter().map(|c| c.error).sum();
    }

    QuadResult {
        integral,
        abs_error: error,
        subdivisions: cells.len(),
    }
}

/// Integrate `f` over `[x[0], x[n-1]]` cell by cell.
///
/// The error estimates of the cells are added in quadrature.
pub fn quad_partition<F: Fn(f64) -> f64>(
    f: F,
    x: &[f64],
    options: &QuadOptions,
) -> Result<QuadResult> {
    check_partition(x)?;
    let mut total = QuadResult {
        integral: 0.0,
        abs_error: 0.0,
        subdivisions: 0,
    };
    for w in x.windows(2) {
        let cell = quad(&f, w[0], w[1], options);
        total.integral += cell.integral;
        total.abs_error += cell.abs_error * cell.abs_error;
        total.subdivisions += cell.subdivisions;
    }
    total.abs_error = total.abs_error.sqrt();
    Ok(total)
}

/// Integrate `f(&[x0, x1, ..., xn])` over a hyperrectangle whose first
/// coordinate is partitioned by `x0`; `limits` holds the fixed limits of the
/// remaining coordinates.
///
/// Every dimension is integrated adaptively. The reported error is that of
/// the outermost (`x0`) integration.
pub fn nquad_partition<F: Fn(&[f64]) -> f64>(
    f: F,
    x0: &[f64],
    limits: &[(f64, f64)],
    options: &QuadOptions,
) -> Result<QuadResult> {
    if let Some((lo, hi)) = limits.iter().find(|(lo, hi)| !lo.is_finite() || !hi.is_finite()) {
        return Err(RiesError::InvalidPartition(format!(
            "integration limits must be finite, got ({lo}, {hi})"
        )));
    }
    quad_partition(
        |x| nested(&f, &[x], limits, options),
        x0,
        options,
    )
}

fn nested<F: Fn(&[f64]) -> f64>(
    f: &F,
    prefix: &[f64],
    limits: &[(f64, f64)],
    options: &QuadOptions,
) -> f64 {
    let Some((&(lo, hi), rest)) = limits.split_first() else {
        return f(prefix);
    };
    quad(
        |xi| {
            let mut point = prefix.to_vec();
            point.push(xi);
            nested(f, &point, rest, options)
        },
        lo,
        hi,
        options,
    )
    .integral
}
