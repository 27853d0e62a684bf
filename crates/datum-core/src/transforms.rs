//! Elementary functions of a datum with first-order propagated uncertainty.
//!
//! Every unary transform returns `f(x) ± |f'(x)|·σx`. Derivatives are written
//! out by hand. Outside a function's domain (`ln` of a non-positive value,
//! `asin` beyond ±1, ...) the result is NaN/∞, exactly as for `f64`.

use core::f64::consts::{LN_2, LN_10};

use crate::datum::{Combination, Datum, propagate1, propagate2};
use crate::numeric::Real;

impl Datum {
    fn map_unary(self, value: Real, derivative: Real) -> Datum {
        Datum::new(value, propagate1(derivative, self.uncertainty()))
    }

    pub fn sqrt(self) -> Datum {
        let root = self.value().sqrt();
        self.map_unary(root, 0.5 / root)
    }

    pub fn cbrt(self) -> Datum {
        let root = self.value().cbrt();
        self.map_unary(root, 1.0 / (3.0 * root * root))
    }

    pub fn exp(self) -> Datum {
        let e = self.value().exp();
        self.map_unary(e, e)
    }

    pub fn exp2(self) -> Datum {
        let e = self.value().exp2();
        self.map_unary(e, e * LN_2)
    }

    /// Natural logarithm.
    pub fn ln(self) -> Datum {
        let x = self.value();
        self.map_unary(x.ln(), 1.0 / x)
    }

    pub fn log10(self) -> Datum {
        let x = self.value();
        self.map_unary(x.log10(), 1.0 / (x * LN_10))
    }

    pub fn log2(self) -> Datum {
        let x = self.value();
        self.map_unary(x.log2(), 1.0 / (x * LN_2))
    }

    /// Logarithm in an exactly known base.
    pub fn log(self, base: Real) -> Datum {
        let x = self.value();
        let ln_base = base.ln();
        self.map_unary(x.ln() / ln_base, 1.0 / (x * ln_base))
    }

    /// Logarithm in an uncertain base; both operands contribute.
    pub fn log_with(self, base: Datum, mode: Combination) -> Datum {
        let (a, b) = (self.value(), base.value());
        let ln_a = a.ln();
        let ln_b = b.ln();
        Datum::new(
            ln_a / ln_b,
            propagate2(
                1.0 / (a * ln_b),
                self.uncertainty(),
                -ln_a / (b * ln_b * ln_b),
                base.uncertainty(),
                mode,
            ),
        )
    }

    /// `self` raised to an exactly known power.
    pub fn powf(self, n: Real) -> Datum {
        let x = self.value();
        self.map_unary(x.powf(n), n * x.powf(n - 1.0))
    }

    /// `self` raised to an uncertain power.
    ///
    /// The exponent's contribution goes through `ln(base)`, so an uncertain
    /// exponent on a non-positive base has NaN uncertainty.
    pub fn pow_with(self, exponent: Datum, mode: Combination) -> Datum {
        let (b, e) = (self.value(), exponent.value());
        let p = b.powf(e);
        Datum::new(
            p,
            propagate2(
                e * b.powf(e - 1.0),
                self.uncertainty(),
                b.ln() * p,
                exponent.uncertainty(),
                mode,
            ),
        )
    }

    pub fn acos(self) -> Datum {
        let x = self.value();
        self.map_unary(x.acos(), -1.0 / (1.0 - x * x).sqrt())
    }

    pub fn asin(self) -> Datum {
        let x = self.value();
        self.map_unary(x.asin(), 1.0 / (1.0 - x * x).sqrt())
    }

    pub fn atan(self) -> Datum {
        let x = self.value();
        self.map_unary(x.atan(), 1.0 / (1.0 + x * x))
    }

    /// Four-quadrant arctangent of `self / adjacent`.
    ///
    /// The uncertainty is that of `atan(self / adjacent)` with the ratio formed
    /// by the (linear) `/` operator. This is an approximation, not a full
    /// two-variable propagation through `atan2`.
    ///
    /// An `adjacent` of exactly zero makes the ratio infinite: the value is
    /// still ±π/2 but the uncertainty is NaN (0 · ∞) unless both operands
    /// are exact.
    pub fn atan2(self, adjacent: Datum) -> Datum {
        let ratio = (self / adjacent).atan();
        Datum::new(self.value().atan2(adjacent.value()), ratio.uncertainty())
    }

    pub fn cos(self) -> Datum {
        let x = self.value();
        self.map_unary(x.cos(), -x.sin())
    }

    pub fn sin(self) -> Datum {
        let x = self.value();
        self.map_unary(x.sin(), x.cos())
    }

    pub fn tan(self) -> Datum {
        let x = self.value();
        let c = x.cos();
        self.map_unary(x.tan(), 1.0 / (c * c))
    }

    /// Radians to degrees; both fields scale by 180/π.
    pub fn to_degrees(self) -> Datum {
        Datum::new(self.value().to_degrees(), self.uncertainty().to_degrees())
    }

    /// Degrees to radians; both fields scale by π/180.
    pub fn to_radians(self) -> Datum {
        Datum::new(self.value().to_radians(), self.uncertainty().to_radians())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn exp_ln_round_trip(v in 0.1_f64..100.0, u in 0.0_f64..1.0) {
            let x = Datum::new(v, u);
            let back = x.ln().exp();
            prop_assert!((back.value() - v).abs() <= 1e-9 * v);
            prop_assert!((back.uncertainty() - u).abs() <= 1e-9 * (u + 1.0));
        }

        #[test]
        fn degrees_radians_round_trip(v in -10.0_f64..10.0, u in 0.0_f64..1.0) {
            let back = Datum::new(v, u).to_degrees().to_radians();
            prop_assert!((back.value() - v).abs() <= 1e-12 * (v.abs() + 1.0));
            prop_assert!((back.uncertainty() - u).abs() <= 1e-12 * (u + 1.0));
        }

        #[test]
        fn bounded_functions_have_bounded_sensitivity(v in -10.0_f64..10.0, u in 0.0_f64..1.0) {
            let x = Datum::new(v, u);
            prop_assert!(x.sin().uncertainty() <= u + 1e-15);
            prop_assert!(x.cos().uncertainty() <= u + 1e-15);
            prop_assert!(x.atan().uncertainty() <= u + 1e-15);
        }
    }
}
