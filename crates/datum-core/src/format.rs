//! Text boundary: rounding to significant figures, `Display`, and `FromStr`.
//!
//! The uncertainty keeps one significant figure, or two when its leading
//! digit is 1. The value is rounded to the same decimal place.

use core::fmt;
use core::str::FromStr;

use crate::datum::Datum;
use crate::error::DatumError;
use crate::numeric::Real;

/// A datum rounded for display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rounded {
    pub value: Real,
    pub uncertainty: Real,
    /// Digits after the decimal point (0 when rounding to tens or above).
    pub decimals: usize,
}

impl Datum {
    /// Round the uncertainty to its significant figures and the value to match.
    ///
    /// `None` when the uncertainty is zero or either field is not finite:
    /// there is no decimal place to round to.
    pub fn rounded(&self) -> Option<Rounded> {
        let sigma = self.uncertainty();
        if sigma <= 0.0 || !sigma.is_finite() || !self.value().is_finite() {
            return None;
        }

        let mut magnitude = sigma.log10().floor() as i32;
        // log10 can land one off near exact powers of ten.
        if sigma / pow10(magnitude) >= 10.0 {
            magnitude += 1;
        } else if sigma / pow10(magnitude) < 1.0 {
            magnitude -= 1;
        }
        if (sigma / pow10(magnitude)).floor() == 1.0 {
            magnitude -= 1;
        }

        let step = pow10(magnitude);
        Some(Rounded {
            value: round_to(self.value(), step),
            uncertainty: round_to(sigma, step),
            decimals: (-magnitude).max(0) as usize,
        })
    }
}

fn pow10(exp: i32) -> Real {
    10.0_f64.powi(exp)
}

/// 2^53: step counts this large are already integral in f64.
const EXACT_STEPS: Real = 9_007_199_254_740_992.0;

// + 0.0 turns a rounded -0.0 into 0.0
fn round_to(x: Real, step: Real) -> Real {
    let steps = x / step;
    if !steps.is_finite() || steps.abs() >= EXACT_STEPS {
        return x + 0.0;
    }
    steps.round() * step + 0.0
}

impl fmt::Display for Rounded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.*} +- {:.*}",
            self.decimals, self.value, self.decimals, self.uncertainty
        )
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rounded() {
            Some(r) => fmt::Display::fmt(&r, f),
            None => write!(f, "{} +- {}", self.value(), self.uncertainty()),
        }
    }
}

const SEPARATORS: [&str; 3] = ["+-", "+/-", "±"];

/// Parses `"1.23 +- 0.05"`, `"1.23 ± 0.05"`, `"1.23+/-0.05"` or a bare `"1.23"`.
impl FromStr for Datum {
    type Err = DatumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(parse_error(s, "empty input"));
        }

        let split = SEPARATORS.iter().find_map(|sep| text.split_once(sep));

        match split {
            Some((value, uncertainty)) => {
                let value = parse_number(s, value, "value is not a number")?;
                let uncertainty = parse_number(s, uncertainty, "uncertainty is not a number")?;
                Ok(Datum::new(value, uncertainty))
            }
            None => parse_number(s, text, "value is not a number").map(Datum::exact),
        }
    }
}

fn parse_number(input: &str, field: &str, reason: &'static str) -> Result<Real, DatumError> {
    field
        .trim()
        .parse::<Real>()
        .map_err(|_| parse_error(input, reason))
}

fn parse_error(input: &str, reason: &'static str) -> DatumError {
    DatumError::Parse {
        input: input.to_string(),
        reason,
    }
}
