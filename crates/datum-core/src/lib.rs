//! datum-core: measured quantities with propagated uncertainty.
//!
//! Contains:
//! - datum (the value/uncertainty pair, combination modes, arithmetic)
//! - transforms (elementary functions with first-order propagation)
//! - stats (normal compatibility test, weighted mean)
//! - format (significant-figure rounding, `Display`, `FromStr`)
//! - special (erfc)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)
//!
//! # Example
//!
//! ```
//! use datum_core::{Combination, Datum};
//!
//! let length = Datum::new(2.0, 0.1);
//! let width = Datum::new(3.0, 0.2);
//!
//! // Operators are worst case ...
//! assert_eq!((length * width).value(), 6.0);
//! // ... named methods take the combination rule explicitly.
//! let area = length.multiply_with(width, Combination::quadrature());
//! assert_eq!(area.to_string(), "6.0 +- 0.5");
//! ```
//!
//! Domain errors (`ln` of a non-positive value, division by a zero-valued
//! datum, `asin` outside [-1, 1], ...) are not checked: they propagate as
//! NaN/∞ exactly like `f64`. Only aggregates and parsing return errors.

pub mod datum;
pub mod error;
pub mod format;
pub mod numeric;
pub mod special;
pub mod stats;
pub mod transforms;

// Re-exports: nice ergonomics for downstream crates
pub use datum::{Combination, Datum};
pub use error::{DatumError, DatumResult};
pub use format::Rounded;
pub use numeric::*;
pub use stats::{ZTest, normal_compatible, normal_test, weighted_mean};
