//! Shared accuracy-table machinery.
//!
//! Every lookup is the same shape: pick the first range whose upper bound is
//! above the reading, then apply that range's accuracy specification.

use datum_core::Datum;

use crate::error::{InstrumentError, InstrumentResult};
use crate::instrument::{Instrument, Quantity};

/// Accuracy specification of one range: `±(percent % of reading + quadratic·reading² + offset)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accuracy {
    pub percent: f64,
    pub offset: f64,
    pub quadratic: f64,
}

impl Accuracy {
    pub const fn new(percent: f64, offset: f64) -> Self {
        Self {
            percent,
            offset,
            quadratic: 0.0,
        }
    }

    pub const fn with_quadratic(mut self, quadratic: f64) -> Self {
        self.quadratic = quadratic;
        self
    }

    /// Uncertainty for a reading; only its magnitude matters.
    pub fn uncertainty(&self, reading: f64) -> f64 {
        let m = reading.abs();
        self.percent * m / 100.0 + self.quadratic * m * m + self.offset
    }

    pub fn apply(&self, reading: f64) -> Datum {
        Datum::new(reading, self.uncertainty(reading))
    }
}

/// Shorthand for table rows.
pub(crate) const fn accuracy(percent: f64, offset: f64) -> Option<Accuracy> {
    Some(Accuracy::new(percent, offset))
}

/// Index of the first range whose upper bound exceeds `magnitude`.
pub fn select_range(upper_bounds: &[f64], magnitude: f64) -> Option<usize> {
    upper_bounds.iter().position(|&bound| magnitude < bound)
}

/// Which instrument function a lookup is for; builds the matching errors.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Lookup {
    pub instrument: Instrument,
    pub quantity: Quantity,
}

impl Lookup {
    pub(crate) const fn new(instrument: Instrument, quantity: Quantity) -> Self {
        Self {
            instrument,
            quantity,
        }
    }

    /// Range index for `reading`, or `OutOfRange`.
    pub(crate) fn range(&self, upper_bounds: &[f64], reading: f64) -> InstrumentResult<usize> {
        match select_range(upper_bounds, reading.abs()) {
            Some(index) => {
                tracing::trace!(
                    instrument = %self.instrument,
                    quantity = %self.quantity,
                    reading,
                    range = index,
                    upper_bound = upper_bounds[index],
                    "range selected"
                );
                Ok(index)
            }
            None => Err(self.out_of_range(reading)),
        }
    }

    /// Position of `frequency_hz` among the supported test frequencies.
    pub(crate) fn frequency(&self, frequencies: &[f64], frequency_hz: f64) -> InstrumentResult<usize> {
        frequencies
            .iter()
            .position(|&f| f == frequency_hz)
            .ok_or(InstrumentError::UnsupportedFrequency {
                instrument: self.instrument,
                frequency_hz,
            })
    }

    /// Resolve a per-frequency table row.
    pub(crate) fn tabulated(
        &self,
        upper_bounds: &[f64],
        row: &[Option<Accuracy>],
        reading: f64,
        frequency_hz: f64,
    ) -> InstrumentResult<Datum> {
        let index = self.range(upper_bounds, reading)?;
        row[index]
            .map(|accuracy| accuracy.apply(reading))
            .ok_or_else(|| self.unavailable(reading, frequency_hz))
    }

    pub(crate) fn out_of_range(&self, reading: f64) -> InstrumentError {
        InstrumentError::OutOfRange {
            instrument: self.instrument,
            quantity: self.quantity,
            reading,
        }
    }

    pub(crate) fn unavailable(&self, reading: f64, frequency_hz: f64) -> InstrumentError {
        InstrumentError::RangeUnavailable {
            instrument: self.instrument,
            quantity: self.quantity,
            reading,
            frequency_hz,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_first_range_above_reading() {
        let bounds = [1.0, 10.0, 100.0];
        assert_eq!(select_range(&bounds, 0.5), Some(0));
        assert_eq!(select_range(&bounds, 1.0), Some(1));
        assert_eq!(select_range(&bounds, 99.9), Some(2));
        assert_eq!(select_range(&bounds, 100.0), None);
        assert_eq!(select_range(&bounds, f64::NAN), None);
    }

    #[test]
    fn accuracy_terms() {
        let acc = Accuracy::new(1.0, 0.5).with_quadratic(0.01);
        assert!((acc.uncertainty(10.0) - (0.1 + 1.0 + 0.5)).abs() < 1e-12);
        assert_eq!(acc.uncertainty(-10.0), acc.uncertainty(10.0));

        let d = acc.apply(-10.0);
        assert_eq!(d.value(), -10.0);
        assert!(d.uncertainty() > 0.0);
    }

    #[test]
    fn tabulated_reports_missing_cells() {
        let lookup = Lookup::new(Instrument::KeysightU1733C, Quantity::Capacitance);
        let bounds = [1.0, 2.0];
        let row = [None, accuracy(1.0, 0.0)];
        assert!(matches!(
            lookup.tabulated(&bounds, &row, 0.5, 100.0),
            Err(InstrumentError::RangeUnavailable { .. })
        ));
        assert!(lookup.tabulated(&bounds, &row, 1.5, 100.0).is_ok());
        assert!(matches!(
            lookup.tabulated(&bounds, &row, 5.0, 100.0),
            Err(InstrumentError::OutOfRange { .. })
        ));
    }
}
