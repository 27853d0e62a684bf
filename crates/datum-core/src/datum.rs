//! The uncertain value itself: construction, combination modes and arithmetic.
//!
//! Operator syntax (`+ - * /`) always combines uncertainties linearly, the
//! conservative worst case. The named methods (`add_with`, `subtract_with`,
//! `multiply_with`, `divide_with`) take a [`Combination`] and default to
//! quadrature when given `Combination::default()`.

use core::cmp::Ordering;
use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::numeric::Real;

/// A best estimate paired with its (non-negative) uncertainty.
///
/// Plain value type: every operation returns a new `Datum`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "DatumRecord", into = "DatumRecord")
)]
pub struct Datum {
    value: Real,
    uncertainty: Real,
}

/// How the contributions of two operands are combined.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Combination {
    /// Worst case: `|∂f/∂a|·σa + |∂f/∂b|·σb`.
    Linear,
    /// Root sum of squares plus the `2·(∂f/∂a)(∂f/∂b)·σab` cross term.
    Quadrature { covariance: Real },
}

impl Default for Combination {
    fn default() -> Self {
        Self::Quadrature { covariance: 0.0 }
    }
}

impl Combination {
    pub fn linear() -> Self {
        Self::Linear
    }

    /// Uncorrelated quadrature.
    pub fn quadrature() -> Self {
        Self::default()
    }

    /// Quadrature with covariance `σab` between the two operands.
    pub fn correlated(covariance: Real) -> Self {
        Self::Quadrature { covariance }
    }
}

impl Datum {
    /// Create a datum; the uncertainty is stored as its absolute value.
    pub fn new(value: Real, uncertainty: Real) -> Self {
        Self {
            value,
            uncertainty: uncertainty.abs(),
        }
    }

    /// An exactly known quantity (zero uncertainty).
    pub fn exact(value: Real) -> Self {
        Self {
            value,
            uncertainty: 0.0,
        }
    }

    pub fn value(&self) -> Real {
        self.value
    }

    pub fn uncertainty(&self) -> Real {
        self.uncertainty
    }

    pub fn set_value(&mut self, value: Real) {
        self.value = value;
    }

    /// Replace the uncertainty, normalized to its absolute value.
    pub fn set_uncertainty(&mut self, uncertainty: Real) {
        self.uncertainty = uncertainty.abs();
    }

    /// `σ / |x|`. Infinite (or NaN) for a zero best estimate.
    pub fn relative_uncertainty(&self) -> Real {
        self.uncertainty / self.value.abs()
    }

    pub fn is_exact(&self) -> bool {
        self.uncertainty == 0.0
    }

    pub fn add_with(self, other: Datum, mode: Combination) -> Datum {
        Datum::new(
            self.value + other.value,
            propagate2(1.0, self.uncertainty, 1.0, other.uncertainty, mode),
        )
    }

    pub fn subtract_with(self, other: Datum, mode: Combination) -> Datum {
        Datum::new(
            self.value - other.value,
            propagate2(1.0, self.uncertainty, -1.0, other.uncertainty, mode),
        )
    }

    pub fn multiply_with(self, other: Datum, mode: Combination) -> Datum {
        Datum::new(
            self.value * other.value,
            propagate2(
                other.value,
                self.uncertainty,
                self.value,
                other.uncertainty,
                mode,
            ),
        )
    }

    /// Quotient `self / other`. A zero-valued divisor yields a non-finite result.
    pub fn divide_with(self, other: Datum, mode: Combination) -> Datum {
        let b = other.value;
        Datum::new(
            self.value / b,
            propagate2(
                1.0 / b,
                self.uncertainty,
                -self.value / (b * b),
                other.uncertainty,
                mode,
            ),
        )
    }
}

impl From<Real> for Datum {
    fn from(value: Real) -> Self {
        Self::exact(value)
    }
}

/// `|f'(x)|·σ` for a function of one datum.
pub(crate) fn propagate1(derivative: Real, sigma: Real) -> Real {
    contribution(derivative, sigma).abs()
}

/// First-order propagation for `f(a, b)` given both partial derivatives.
pub(crate) fn propagate2(
    df_da: Real,
    sigma_a: Real,
    df_db: Real,
    sigma_b: Real,
    mode: Combination,
) -> Real {
    let ta = contribution(df_da, sigma_a);
    let tb = contribution(df_db, sigma_b);
    match mode {
        Combination::Linear => ta.abs() + tb.abs(),
        Combination::Quadrature { covariance } => {
            let mut radicand = ta * ta + tb * tb;
            if covariance != 0.0 {
                radicand += 2.0 * df_da * df_db * covariance;
            }
            // Inconsistent covariance gives a negative radicand -> NaN.
            radicand.sqrt()
        }
    }
}

// An exact operand contributes nothing, even through a non-finite derivative.
fn contribution(derivative: Real, sigma: Real) -> Real {
    if sigma == 0.0 { 0.0 } else { derivative * sigma }
}

impl Add for Datum {
    type Output = Datum;

    fn add(self, rhs: Datum) -> Datum {
        self.add_with(rhs, Combination::Linear)
    }
}

impl Sub for Datum {
    type Output = Datum;

    fn sub(self, rhs: Datum) -> Datum {
        self.subtract_with(rhs, Combination::Linear)
    }
}

impl Mul for Datum {
    type Output = Datum;

    fn mul(self, rhs: Datum) -> Datum {
        self.multiply_with(rhs, Combination::Linear)
    }
}

impl Div for Datum {
    type Output = Datum;

    fn div(self, rhs: Datum) -> Datum {
        self.divide_with(rhs, Combination::Linear)
    }
}

impl Neg for Datum {
    type Output = Datum;

    fn neg(self) -> Datum {
        Datum {
            value: -self.value,
            uncertainty: self.uncertainty,
        }
    }
}

// Scalars behave as exact data.

impl Add<Real> for Datum {
    type Output = Datum;

    fn add(self, rhs: Real) -> Datum {
        self + Datum::exact(rhs)
    }
}

impl Sub<Real> for Datum {
    type Output = Datum;

    fn sub(self, rhs: Real) -> Datum {
        self - Datum::exact(rhs)
    }
}

impl Mul<Real> for Datum {
    type Output = Datum;

    fn mul(self, rhs: Real) -> Datum {
        self * Datum::exact(rhs)
    }
}

impl Div<Real> for Datum {
    type Output = Datum;

    fn div(self, rhs: Real) -> Datum {
        self / Datum::exact(rhs)
    }
}

impl Add<Datum> for Real {
    type Output = Datum;

    fn add(self, rhs: Datum) -> Datum {
        Datum::exact(self) + rhs
    }
}

impl Sub<Datum> for Real {
    type Output = Datum;

    fn sub(self, rhs: Datum) -> Datum {
        Datum::exact(self) - rhs
    }
}

impl Mul<Datum> for Real {
    type Output = Datum;

    fn mul(self, rhs: Datum) -> Datum {
        Datum::exact(self) * rhs
    }
}

impl Div<Datum> for Real {
    type Output = Datum;

    fn div(self, rhs: Datum) -> Datum {
        Datum::exact(self) / rhs
    }
}

/// Orders by best estimate only.
///
/// Equal estimates with different uncertainties are unordered (`None`), so
/// `<`/`>` look at the value alone while staying consistent with `==`.
impl PartialOrd for Datum {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.value.partial_cmp(&other.value)? {
            Ordering::Equal if self.uncertainty == other.uncertainty => Some(Ordering::Equal),
            Ordering::Equal => None,
            ord => Some(ord),
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct DatumRecord {
    value: Real,
    #[serde(default)]
    uncertainty: Real,
}

#[cfg(feature = "serde")]
impl From<DatumRecord> for Datum {
    fn from(record: DatumRecord) -> Self {
        Datum::new(record.value, record.uncertainty)
    }
}

#[cfg(feature = "serde")]
impl From<Datum> for DatumRecord {
    fn from(datum: Datum) -> Self {
        DatumRecord {
            value: datum.value,
            uncertainty: datum.uncertainty,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn datum() -> impl Strategy<Value = Datum> {
        (-1e3_f64..1e3, -10.0_f64..10.0).prop_map(|(v, u)| Datum::new(v, u))
    }

    proptest! {
        #[test]
        fn uncertainty_never_negative(a in datum(), b in datum()) {
            for d in [a + b, a - b, a * b, a.add_with(b, Combination::default()),
                      a.multiply_with(b, Combination::default())] {
                prop_assert!(d.uncertainty() >= 0.0);
            }
        }

        #[test]
        fn linear_bounds_quadrature(a in datum(), b in datum()) {
            let lin = a.multiply_with(b, Combination::Linear).uncertainty();
            let quad = a.multiply_with(b, Combination::quadrature()).uncertainty();
            prop_assert!(quad <= lin * (1.0 + 1e-12) + 1e-12);
        }
    }
}
