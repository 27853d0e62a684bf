//! Keysight U1733C handheld LCR meter.
//!
//! Accuracy depends on both the range and the test frequency; some ranges
//! are not specified at every frequency (`None` cells).

use datum_core::Datum;

use crate::error::InstrumentResult;
use crate::instrument::{Instrument, Quantity};
use crate::table::{Accuracy, Lookup, accuracy};

/// Supported test frequencies, in table row order.
pub const FREQUENCIES: [f64; 5] = [100.0, 120.0, 1e3, 10e3, 100e3];

const RESISTANCE_BOUNDS: [f64; 9] = [2.0, 20.0, 200.0, 2e3, 20e3, 200e3, 2e6, 20e6, 200e6];
const RESISTANCE: [[Option<Accuracy>; 9]; 5] = [
    [
        accuracy(0.7, 50e-4),
        accuracy(0.7, 8e-3),
        accuracy(0.2, 3e-2),
        accuracy(0.2, 3e-1),
        accuracy(0.2, 3.0),
        accuracy(0.5, 5e1),
        accuracy(0.5, 5e2),
        accuracy(2.0, 8e3),
        accuracy(6.0, 80e4),
    ],
    [
        accuracy(0.7, 50e-4),
        accuracy(0.7, 8e-3),
        accuracy(0.2, 3e-2),
        accuracy(0.2, 3e-1),
        accuracy(0.2, 3.0),
        accuracy(0.5, 5e1),
        accuracy(0.5, 5e2),
        accuracy(2.0, 8e3),
        accuracy(6.0, 80e4),
    ],
    [
        accuracy(0.7, 50e-4),
        accuracy(0.7, 8e-3),
        accuracy(0.2, 3e-2),
        accuracy(0.2, 3e-1),
        accuracy(0.2, 3.0),
        accuracy(0.5, 5e1),
        accuracy(0.5, 5e2),
        accuracy(2.0, 8e3),
        accuracy(6.0, 80e4),
    ],
    [
        accuracy(0.7, 50e-4),
        accuracy(0.7, 8e-3),
        accuracy(0.2, 3e-2),
        accuracy(0.2, 3e-1),
        accuracy(0.2, 3.0),
        accuracy(0.5, 5e1),
        accuracy(0.7, 5e2),
        accuracy(5.0, 8e3),
        None,
    ],
    [
        accuracy(1.0, 50e-4),
        accuracy(0.7, 8e-3),
        accuracy(0.5, 5e-2),
        accuracy(0.5, 5e-1),
        accuracy(0.5, 5.0),
        accuracy(0.7, 8e1),
        None,
        None,
        None,
    ],
];

const CAPACITANCE_BOUNDS: [f64; 10] = [
    20e-12, 200e-12, 2e-9, 20e-9, 200e-9, 2e-6, 20e-6, 200e-6, 2e-3, 20e-3,
];
const CAPACITANCE: [[Option<Accuracy>; 10]; 5] = [
    [
        None,
        None,
        accuracy(0.5, 10e-13),
        accuracy(0.5, 5e-12),
        accuracy(0.2, 3e-11),
        accuracy(0.2, 3e-10),
        accuracy(0.2, 3e-9),
        accuracy(0.3, 3e-8),
        accuracy(0.5, 5e-7),
        accuracy(0.5, 8e-6),
    ],
    [
        None,
        None,
        accuracy(0.5, 10e-13),
        accuracy(0.5, 5e-12),
        accuracy(0.2, 3e-11),
        accuracy(0.2, 3e-10),
        accuracy(0.2, 3e-9),
        accuracy(0.3, 3e-8),
        accuracy(0.5, 5e-7),
        accuracy(0.5, 8e-6),
    ],
    [
        None,
        accuracy(0.5, 10e-14),
        accuracy(0.5, 5e-13),
        accuracy(0.2, 3e-12),
        accuracy(0.2, 3e-11),
        accuracy(0.2, 3e-10),
        accuracy(0.2, 3e-9),
        accuracy(0.5, 5e-8),
        accuracy(0.5, 8e-7),
        None,
    ],
    [
        accuracy(1.0, 20e-15),
        accuracy(0.8, 10e-14),
        accuracy(0.5, 3e-13),
        accuracy(0.5, 3e-12),
        accuracy(0.5, 3e-11),
        accuracy(0.2, 3e-10),
        accuracy(0.5, 5e-9),
        accuracy(0.5, 8e-8),
        None,
        None,
    ],
    [
        accuracy(2.5, 10e-15),
        accuracy(2.0, 10e-14),
        accuracy(2.0, 10e-13),
        accuracy(0.7, 10e-12),
        accuracy(0.7, 10e-11),
        accuracy(0.7, 10e-10),
        accuracy(5.0, 10e-9),
        None,
        None,
        None,
    ],
];

const INDUCTANCE_BOUNDS: [f64; 9] = [20e-6, 200e-6, 2e-3, 20e-3, 200e-3, 2.0, 20.0, 200.0, 2e3];
const INDUCTANCE: [[Option<Accuracy>; 9]; 5] = [
    [
        None,
        None,
        accuracy(0.7, 10e-7),
        accuracy(0.5, 3e-6),
        accuracy(0.5, 3e-5),
        accuracy(0.2, 3e-4),
        accuracy(0.2, 3e-3),
        accuracy(0.7, 5e-2),
        accuracy(1.0, 5e-1),
    ],
    [
        None,
        None,
        accuracy(0.7, 10e-7),
        accuracy(0.5, 3e-6),
        accuracy(0.5, 3e-5),
        accuracy(0.2, 3e-4),
        accuracy(0.2, 3e-3),
        accuracy(0.7, 5e-2),
        accuracy(1.0, 5e-1),
    ],
    [
        None,
        accuracy(1.0, 5e-8),
        accuracy(0.5, 5e-7),
        accuracy(0.2, 3e-6),
        accuracy(0.2, 3e-5),
        accuracy(0.2, 3e-4),
        accuracy(0.5, 5e-3),
        accuracy(1.0, 5e-2),
        accuracy(2.0, 8e-1),
    ],
    [
        accuracy(1.0, 5e-9),
        accuracy(0.7, 3e-8),
        accuracy(0.5, 3e-7),
        accuracy(0.3, 3e-6),
        accuracy(0.2, 3e-5),
        accuracy(0.5, 5e-4),
        accuracy(1.0, 5e-3),
        accuracy(2.0, 8e-2),
        None,
    ],
    [
        accuracy(2.5, 20e-9),
        accuracy(2.5, 20e-8),
        accuracy(0.8, 20e-7),
        accuracy(0.8, 10e-6),
        accuracy(1.0, 10e-5),
        accuracy(1.0, 10e-4),
        accuracy(2.0, 10e-3),
        None,
        None,
    ],
];

pub fn resistance(reading: f64, frequency_hz: f64) -> InstrumentResult<Datum> {
    let lookup = Lookup::new(Instrument::KeysightU1733C, Quantity::Resistance);
    let row = lookup.frequency(&FREQUENCIES, frequency_hz)?;
    lookup.tabulated(&RESISTANCE_BOUNDS, &RESISTANCE[row], reading, frequency_hz)
}

pub fn capacitance(reading: f64, frequency_hz: f64) -> InstrumentResult<Datum> {
    let lookup = Lookup::new(Instrument::KeysightU1733C, Quantity::Capacitance);
    let row = lookup.frequency(&FREQUENCIES, frequency_hz)?;
    lookup.tabulated(&CAPACITANCE_BOUNDS, &CAPACITANCE[row], reading, frequency_hz)
}

pub fn inductance(reading: f64, frequency_hz: f64) -> InstrumentResult<Datum> {
    let lookup = Lookup::new(Instrument::KeysightU1733C, Quantity::Inductance);
    let row = lookup.frequency(&FREQUENCIES, frequency_hz)?;
    lookup.tabulated(&INDUCTANCE_BOUNDS, &INDUCTANCE[row], reading, frequency_hz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InstrumentError;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12 * b.abs()
    }

    #[test]
    fn resistance_depends_on_reading() {
        let small = resistance(1.0, 1e3).unwrap();
        assert!(close(small.uncertainty(), 0.7 / 100.0 + 50e-4));
        let large = resistance(1e5, 1e3).unwrap();
        assert!(close(large.uncertainty(), 0.5 * 1e5 / 100.0 + 5e1));
    }

    #[test]
    fn high_frequency_drops_top_ranges() {
        assert!(resistance(5e6, 1e3).is_ok());
        assert!(matches!(
            resistance(5e6, 100e3),
            Err(InstrumentError::RangeUnavailable { .. })
        ));
        assert!(matches!(
            resistance(300e6, 1e3),
            Err(InstrumentError::OutOfRange { .. })
        ));
    }

    #[test]
    fn capacitance_low_end_needs_high_frequency() {
        assert!(matches!(
            capacitance(10e-12, 1e3),
            Err(InstrumentError::RangeUnavailable { .. })
        ));
        let d = capacitance(10e-12, 10e3).unwrap();
        assert!(close(d.uncertainty(), 10e-12 / 100.0 + 20e-15));
    }

    #[test]
    fn inductance_rows_by_frequency() {
        let d = inductance(1.0, 120.0).unwrap();
        assert!(close(d.uncertainty(), 0.2 / 100.0 + 3e-4));
        let d = inductance(1.0, 100e3).unwrap();
        assert!(close(d.uncertainty(), 1.0 / 100.0 + 10e-4));
    }

    #[test]
    fn unknown_frequency() {
        assert_eq!(
            inductance(1.0, 50.0),
            Err(InstrumentError::UnsupportedFrequency {
                instrument: Instrument::KeysightU1733C,
                frequency_hz: 50.0,
            })
        );
    }

    #[test]
    fn tables_are_aligned() {
        for rows in [&RESISTANCE[..], &INDUCTANCE[..]] {
            for row in rows {
                assert_eq!(row.len(), 9);
            }
        }
        // every frequency supports at least the mid ranges
        for row in 0..FREQUENCIES.len() {
            assert!(RESISTANCE[row][4].is_some());
            assert!(CAPACITANCE[row][4].is_some());
            assert!(INDUCTANCE[row][4].is_some());
        }
    }
}
