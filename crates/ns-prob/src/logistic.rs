//! Logistic distribution utilities.
//!
//! Location `mu`, scale `s > 0`. With `z = (x - mu) / s`:
//!
//! - `pdf(x) = exp(-z) / (s * (1 + exp(-z))^2)`
//! - `cdf(x) = 1 / (1 + exp(-z))`

use std::f64::consts::PI;

use ns_core::{Interval, Limits, Result, check_limits};
use serde::{Deserialize, Serialize};


/// Declared parameter domains: `x ∈ (-∞,∞)`, `μ ∈ (-∞,∞)`, `s ∈ (0,∞)`.
pub const LIMITS: Limits =
    Limits::new(&[("x", Interval::REAL), ("μ", Interval::REAL), ("s", Interval::POSITIVE)]);

/// Domains for [`quantile`]: `p ∈ [0,1]`, `μ ∈ (-∞,∞)`, `s ∈ (0,∞)`.
pub const QUANTILE_LIMITS: Limits =
    Limits::new(&[("p", Interval::UNIT), ("μ", Interval::REAL), ("s", Interval::POSITIVE)]);

/// `sqrt(3)`
const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// `1 / (1 + exp(-z))`, evaluated so `exp` only sees non-positive arguments.
///
/// `standard_cdf(0.0) == 0.5` exactly.
#[inline]
fn standard_cdf(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// `ln(standard_cdf(z)) = -ln(1 + exp(-z))`, finite where the CDF underflows.
#[inline]
fn standard_logcdf(z: f64) -> f64 {
    if z >= 0.0 { -(-z).exp().ln_1p() } else { z - z.exp().ln_1p() }
}

#[inline]
fn check_point(x: f64, mu: f64, s: f64) -> Result<()> {
    check_limits(&LIMITS, &[("x", x), ("μ", mu), ("s", s)])
}

#[inline]
fn check_params(mu: f64, s: f64) -> Result<()> {
    check_limits(&LIMITS, &[("μ", mu), ("s", s)])
}

/// PDF of a Logistic distribution at `x`.
pub fn pdf(x: f64, mu: f64, s: f64) -> Result<f64> {
    check_point(x, mu, s)?;
    // Symmetric in z, so evaluate on |z| to keep exp(-|z|) in (0, 1].
    let e = (-((x - mu) / s).abs()).exp();
    let one_pe = 1.0 + e;
    Ok(e / (s * one_pe * one_pe))
}

/// Log-PDF of a Logistic distribution at `x`.
///
/// `log p(x) = -|z| - ln(s) - 2 ln(1 + exp(-|z|))`
pub fn logpdf(x: f64, mu: f64, s: f64) -> Result<f64> {
    check_point(x, mu, s)?;
    let z = ((x - mu) / s).abs();
    Ok(-z - s.ln() - 2.0 * (-z).exp().ln_1p())
}

/// Negative log-likelihood of a Logistic distribution at `x`.
pub fn nll(x: f64, mu: f64, s: f64) -> Result<f64> {
    Ok(-logpdf(x, mu, s)?)
}

/// Lower CDF, `P(X <= x)`.
pub fn cdf(x: f64, mu: f64, s: f64) -> Result<f64> {
    check_point(x, mu, s)?;
    Ok(standard_cdf((x - mu) / s))
}

/// Log of the lower CDF.
pub fn logcdf(x: f64, mu: f64, s: f64) -> Result<f64> {
    check_point(x, mu, s)?;
    Ok(standard_logcdf((x - mu) / s))
}

/// Survival function, `P(X > x) = 1 - cdf(x)`.
pub fn sf(x: f64, mu: f64, s: f64) -> Result<f64> {
    check_point(x, mu, s)?;
    Ok(standard_cdf(-(x - mu) / s))
}

/// Inverse CDF: `mu + s * ln(p / (1 - p))`.
///
/// `p = 0` maps to `-inf` and `p = 1` to `+inf`.
pub fn quantile(p: f64, mu: f64, s: f64) -> Result<f64> {
    check_limits(&QUANTILE_LIMITS, &[("p", p), ("μ", mu), ("s", s)])?;
    if p == 0.5 {
        return Ok(mu);
    }
    Ok(mu + s * (p.ln() - (-p).ln_1p()))
}

/// Mean, `mu`.
pub fn mean(mu: f64, s: f64) -> Result<f64> {
    check_params(mu, s)?;
    Ok(mu)
}

/// Median, `mu`.
pub fn median(mu: f64, s: f64) -> Result<f64> {
    check_params(mu, s)?;
    Ok(mu)
}

/// Mode, `mu`.
pub fn mode(mu: f64, s: f64) -> Result<f64> {
    check_params(mu, s)?;
    Ok(mu)
}

/// Variance, `s^2 * π^2 / 3`.
pub fn variance(mu: f64, s: f64) -> Result<f64> {
    check_params(mu, s)?;
    let sp = s * PI;
    Ok(sp * sp / 3.0)
}

/// Standard deviation, `s * π / sqrt(3)`.
pub fn std_dev(mu: f64, s: f64) -> Result<f64> {
    check_params(mu, s)?;
    Ok(s * PI / SQRT_3)
}

/// Skewness (always 0).
pub fn skewness(mu: f64, s: f64) -> Result<f64> {
    check_params(mu, s)?;
    Ok(0.0)
}

/// Excess kurtosis (always 6/5).
pub fn excess_kurtosis(mu: f64, s: f64) -> Result<f64> {
    check_params(mu, s)?;
    Ok(1.2)
}

/// Differential entropy in nats, `ln(s) + 2`.
pub fn entropy(mu: f64, s: f64) -> Result<f64> {
    check_params(mu, s)?;
    Ok(s.ln() + 2.0)
}

/// A Logistic distribution with validated parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLogistic")]
pub struct Logistic {
    mu: f64,
    s: f64,
}

#[derive(Deserialize)]
struct RawLogistic {
    mu: f64,
    s: f64,
}

impl TryFrom<RawLogistic> for Logistic {
    type Error = ns_core::Error;

    fn try_from(raw: RawLogistic) -> Result<Self> {
        Logistic::new(raw.mu, raw.s)
    }
}

impl Logistic {
    /// Create a Logistic distribution with location `mu` and scale `s`.
    pub fn new(mu: f64, s: f64) -> Result<Self> {
        check_params(mu, s)?;
        Ok(Self { mu, s })
    }

    /// Location parameter.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Scale parameter.
    pub fn s(&self) -> f64 {
        self.s
    }

    /// See [`pdf`].
    pub fn pdf(&self, x: f64) -> Result<f64> {
        pdf(x, self.mu, self.s)
    }

    /// See [`logpdf`].
    pub fn logpdf(&self, x: f64) -> Result<f64> {
        logpdf(x, self.mu, self.s)
    }

    /// See [`cdf`].
    pub fn cdf(&self, x: f64) -> Result<f64> {
        cdf(x, self.mu, self.s)
    }

    /// See [`logcdf`].
    pub fn logcdf(&self, x: f64) -> Result<f64> {
        logcdf(x, self.mu, self.s)
    }

    /// See [`sf`].
    pub fn sf(&self, x: f64) -> Result<f64> {
        sf(x, self.mu, self.s)
    }

    /// See [`quantile`].
    pub fn quantile(&self, p: f64) -> Result<f64> {
        quantile(p, self.mu, self.s)
    }

    /// See [`mean`].
    pub fn mean(&self) -> f64 {
        self.mu
    }

    /// See [`median`].
    pub fn median(&self) -> f64 {
        self.mu
    }

    /// See [`mode`].
    pub fn mode(&self) -> f64 {
        self.mu
    }

    /// See [`variance`].
    pub fn variance(&self) -> f64 {
        let sp = self.s * PI;
        sp * sp / 3.0
    }

    /// See [`std_dev`].
    pub fn std_dev(&self) -> f64 {
        self.s * PI / SQRT_3
    }

    /// See [`skewness`].
    pub fn skewness(&self) -> f64 {
        0.0
    }

    /// See [`excess_kurtosis`].
    pub fn excess_kurtosis(&self) -> f64 {
        1.2
    }

    /// See [`entropy`].
    pub fn entropy(&self) -> f64 {
        self.s.ln() + 2.0
    }
}
