// Descriptive statistics and the Mann–Whitney U rank test.
//
// p-value selection mirrors the usual "auto" rule: the exact null
// distribution when at least one sample is small and there are no ties,
// otherwise the normal approximation with tie and continuity correction.

use serde::Serialize;
use std::cmp::Ordering;

/// Largest sample size (on the smaller side) for which the exact
/// distribution is used.
const EXACT_MAX_SIZE: usize = 8;

// ---------------------------------------------------------------------------
// Descriptive helpers
// ---------------------------------------------------------------------------

/// Arithmetic mean, or `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Percentage of `true` flags, or `None` when there are none at all.
pub fn percent_true(flags: impl IntoIterator<Item = bool>) -> Option<f64> {
    let (hits, total) = flags
        .into_iter()
        .fold((0usize, 0usize), |(h, t), f| (h + usize::from(f), t + 1));
    if total == 0 {
        return None;
    }
    Some(hits as f64 / total as f64 * 100.0)
}

// ---------------------------------------------------------------------------
// Mann–Whitney U
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PValueMethod {
    Exact,
    Asymptotic,
}

/// Two-sided Mann–Whitney U result. `u_statistic` is the U of the first sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MannWhitney {
    pub u_statistic: f64,
    pub p_value: f64,
    pub method: PValueMethod,
}

/// Mid-ranks (1-based) of the pooled sample plus the tie term `Σ(t³ - t)`.
fn midranks(values: &[f64]) -> (Vec<f64>, f64) {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].partial_cmp(&values[b]).unwrap_or(Ordering::Equal));

    let mut ranks = vec![0.0; values.len()];
    let mut tie_term = 0.0;
    let mut i = 0;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && values[order[j + 1]] == values[order[i]] {
            j += 1;
        }
        let rank = (i + j) as f64 / 2.0 + 1.0;
        for &idx in &order[i..=j] {
            ranks[idx] = rank;
        }
        let t = (j - i + 1) as f64;
        tie_term += t * t * t - t;
        i = j + 1;
    }
    (ranks, tie_term)
}

/// Two-sided Mann–Whitney U test of `x` against `y`.
///
/// Returns `None` if either sample is empty or contains a non-finite value.
pub fn mann_whitney_u(x: &[f64], y: &[f64]) -> Option<MannWhitney> {
    if x.is_empty() || y.is_empty() || !x.iter().chain(y).all(|v| v.is_finite()) {
        return None;
    }
    let n1 = x.len();
    let n2 = y.len();

    let pooled: Vec<f64> = x.iter().chain(y).copied().collect();
    let (ranks, tie_term) = midranks(&pooled);

    let r1: f64 = ranks[..n1].iter().sum();
    let u1 = r1 - (n1 * (n1 + 1)) as f64 / 2.0;
    let u2 = (n1 * n2) as f64 - u1;
    let u = u1.max(u2);

    let small = n1 <= EXACT_MAX_SIZE || n2 <= EXACT_MAX_SIZE;
    let (p, method) = if small && tie_term == 0.0 {
        (2.0 * exact_sf(u, n1, n2), PValueMethod::Exact)
    } else {
        (2.0 * asymptotic_sf(u, n1, n2, tie_term), PValueMethod::Asymptotic)
    };

    Some(MannWhitney {
        u_statistic: u1,
        p_value: p.clamp(0.0, 1.0),
        method,
    })
}

/// Number of arrangements giving each U value for sample sizes `m` and `n`,
/// i.e. the coefficients of the Gaussian binomial `[m + n choose m]_q`.
fn u_counts(m: usize, n: usize) -> Vec<f64> {
    let len = m * n + 1;
    let mut c = vec![0.0; len];
    c[0] = 1.0;
    for i in 1..=m {
        // times (1 - q^(n+i))
        let shift = n + i;
        for k in (shift..len).rev() {
            c[k] -= c[k - shift];
        }
        // divided by (1 - q^i)
        for k in i..len {
            c[k] += c[k - i];
        }
    }
    c
}

/// `P(U >= u)` under the exact null distribution. `u` must be integral.
fn exact_sf(u: f64, n1: usize, n2: usize) -> f64 {
    let (m, n) = if n1 <= n2 { (n1, n2) } else { (n2, n1) };
    let counts = u_counts(m, n);
    let total: f64 = counts.iter().sum();
    let start = u.round() as usize;
    if start >= counts.len() {
        return 0.0;
    }
    counts[start..].iter().sum::<f64>() / total
}

/// One-sided upper tail of the normal approximation with tie and
/// continuity correction.
fn asymptotic_sf(u: f64, n1: usize, n2: usize, tie_term: f64) -> f64 {
    let (n1f, n2f) = (n1 as f64, n2 as f64);
    let n = n1f + n2f;
    let mu = n1f * n2f / 2.0;
    let var = n1f * n2f / 12.0 * ((n + 1.0) - tie_term / (n * (n - 1.0)));
    if var <= 0.0 {
        // Every observation tied: no evidence of a difference.
        return 1.0;
    }
    let z = (u - mu - 0.5) / var.sqrt();
    normal_sf(z)
}

/// Standard normal survival function.
pub fn normal_sf(z: f64) -> f64 {
    0.5 * erfc(z / std::f64::consts::SQRT_2)
}

/// Complementary error function (Chebyshev fit, fractional error < 1.2e-7).
fn erfc(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.5 * z);
    let poly = -z * z - 1.265_512_23
        + t * (1.000_023_68
            + t * (0.374_091_96
                + t * (0.096_784_18
                    + t * (-0.186_288_06
                        + t * (0.278_868_07
                            + t * (-1.135_203_98
                                + t * (1.488_515_87
                                    + t * (-0.822_152_23 + t * 0.170_872_77))))))));
    let ans = t * poly.exp();
    if x >= 0.0 {
        ans
    } else {
        2.0 - ans
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
