//! Statistics over data: the normal compatibility test and the weighted mean.

use core::f64::consts::FRAC_1_SQRT_2;

use crate::datum::Datum;
use crate::error::{DatumError, DatumResult};
use crate::numeric::{Real, ensure_finite};
use crate::special::erfc;

/// Outcome of a two-sided Z test between two data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZTest {
    /// `(a − b) / sqrt(σa² + σb²)`
    pub z: Real,
    /// Two-sided p-value, `erfc(|z| / √2)`.
    pub p_value: Real,
}

impl ZTest {
    /// True when the data cannot be told apart at significance `alpha`.
    pub fn is_compatible(&self, alpha: Real) -> bool {
        self.p_value >= alpha
    }
}

/// Z test of whether `a` and `b` measure the same true value.
///
/// Assumes independent, normally distributed errors. With both uncertainties
/// zero, `z` is ±∞ for different values (p = 0) and NaN for equal ones.
pub fn normal_test(a: Datum, b: Datum) -> ZTest {
    let sigma = a.uncertainty().hypot(b.uncertainty());
    let z = (a.value() - b.value()) / sigma;
    ZTest {
        z,
        p_value: erfc(z.abs() * FRAC_1_SQRT_2),
    }
}

/// p-value of [`normal_test`]; near 0 means the data are incompatible.
pub fn normal_compatible(a: Datum, b: Datum) -> Real {
    normal_test(a, b).p_value
}

/// Inverse-variance weighted mean.
///
/// `x̄ = Σ(xᵢ/σᵢ²) / Σ(1/σᵢ²)`, `σ = 1/sqrt(Σ 1/σᵢ²)`.
///
/// Weights are taken relative to the smallest uncertainty, `wᵢ = (σmin/σᵢ)²`,
/// and the mean is accumulated as a running convex combination, so neither
/// tiny uncertainties nor huge values overflow.
///
/// Rejects an empty slice, any entry with zero uncertainty (its weight would
/// be infinite) and any non-finite entry.
pub fn weighted_mean(data: &[Datum]) -> DatumResult<Datum> {
    if data.is_empty() {
        tracing::debug!("weighted mean rejected: no data");
        return Err(DatumError::EmptyInput {
            what: "weighted mean of no data",
        });
    }

    let mut sigma_min = Real::INFINITY;
    for (index, d) in data.iter().enumerate() {
        ensure_finite(d.value(), "weighted mean value")?;
        ensure_finite(d.uncertainty(), "weighted mean uncertainty")?;
        if d.uncertainty() == 0.0 {
            tracing::debug!(index, value = d.value(), "weighted mean rejected: exact entry");
            return Err(DatumError::ZeroUncertainty { index });
        }
        sigma_min = sigma_min.min(d.uncertainty());
    }

    let mut mean = 0.0;
    let mut total_weight = 0.0;
    for d in data {
        let ratio = sigma_min / d.uncertainty();
        let weight = ratio * ratio;
        if weight == 0.0 {
            continue;
        }
        total_weight += weight;
        let share = weight / total_weight;
        mean = (1.0 - share) * mean + share * d.value();
    }

    tracing::trace!(n = data.len(), total_weight, sigma_min, "weighted mean");
    let mean = ensure_finite(mean, "weighted mean result")?;
    let sigma = ensure_finite(sigma_min / total_weight.sqrt(), "weighted mean uncertainty")?;
    Ok(Datum::new(mean, sigma))
}
