//! Agilent U1731A handheld LCR meter.
//!
//! Test frequency is 1 kHz or 120 Hz. At 120 Hz the capacitance and
//! inductance ranges stretch by a factor of ten.

use datum_core::Datum;

use crate::error::InstrumentResult;
use crate::instrument::{Instrument, Quantity};
use crate::table::{Accuracy, Lookup};

const FREQUENCIES: [f64; 2] = [1e3, 120.0];

const RESISTANCE_BOUNDS: [f64; 7] = [20.0, 200.0, 2e3, 20e3, 200e3, 2e6, 10e6];
const RESISTANCE: [Accuracy; 7] = [
    Accuracy::new(1.2, 40e-3),
    Accuracy::new(0.8, 5e-2),
    Accuracy::new(0.5, 3e-1),
    Accuracy::new(0.5, 3.0),
    Accuracy::new(0.5, 30.0),
    Accuracy::new(0.5, 5e2),
    Accuracy::new(2.0, 8e3),
];

const CAPACITANCE: [Accuracy; 7] = [
    Accuracy::new(1.0, 5e-13),
    Accuracy::new(0.7, 5e-12),
    Accuracy::new(0.7, 3e-11),
    Accuracy::new(0.7, 3e-10),
    Accuracy::new(0.7, 3e-9),
    Accuracy::new(1.0, 5e-8),
    Accuracy::new(3.0, 5e-6),
];

const INDUCTANCE_BOUNDS: [f64; 6] = [2e-3, 20e-3, 200e-3, 2.0, 20.0, 100.0];
const INDUCTANCE: [Accuracy; 6] = [
    Accuracy::new(2.0, 5e-7).with_quadratic(10.0),
    Accuracy::new(1.0, 5e-6).with_quadratic(1.0),
    Accuracy::new(0.7, 5e-5).with_quadratic(0.1),
    Accuracy::new(0.7, 5e-4).with_quadratic(0.01),
    Accuracy::new(0.7, 5e-3).with_quadratic(0.001),
    Accuracy::new(1.0, 5e-2).with_quadratic(0.0001),
];

/// Range multiplier for the reactive functions.
fn range_factor(frequency_hz: f64) -> f64 {
    if frequency_hz == 120.0 { 10.0 } else { 1.0 }
}

pub fn resistance(reading: f64, frequency_hz: f64) -> InstrumentResult<Datum> {
    let lookup = Lookup::new(Instrument::AgilentU1731A, Quantity::Resistance);
    lookup.frequency(&FREQUENCIES, frequency_hz)?;
    let range = lookup.range(&RESISTANCE_BOUNDS, reading)?;
    Ok(RESISTANCE[range].apply(reading))
}

/// The two highest ranges do not scale with the frequency factor: they top
/// out at 200 µF / 1 mF at 1 kHz and 1 mF / 10 mF at 120 Hz.
pub fn capacitance(reading: f64, frequency_hz: f64) -> InstrumentResult<Datum> {
    let lookup = Lookup::new(Instrument::AgilentU1731A, Quantity::Capacitance);
    lookup.frequency(&FREQUENCIES, frequency_hz)?;
    let f = range_factor(frequency_hz);
    let bounds = if f > 1.0 {
        [2e-9 * f, 20e-9 * f, 200e-9 * f, 2e-6 * f, 20e-6 * f, 1e-3, 10e-3]
    } else {
        [2e-9, 20e-9, 200e-9, 2e-6, 20e-6, 200e-6, 1e-3]
    };
    let range = lookup.range(&bounds, reading)?;
    Ok(CAPACITANCE[range].apply(reading))
}

pub fn inductance(reading: f64, frequency_hz: f64) -> InstrumentResult<Datum> {
    let lookup = Lookup::new(Instrument::AgilentU1731A, Quantity::Inductance);
    lookup.frequency(&FREQUENCIES, frequency_hz)?;
    let f = range_factor(frequency_hz);
    let bounds = INDUCTANCE_BOUNDS.map(|b| b * f);
    let range = lookup.range(&bounds, reading)?;
    Ok(INDUCTANCE[range].apply(reading))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InstrumentError;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12 * b.abs().max(1e-300)
    }

    #[test]
    fn resistance_rows() {
        let d = resistance(100.0, 1e3).unwrap();
        assert_eq!(d.value(), 100.0);
        assert!(close(d.uncertainty(), 0.8 + 5e-2));

        let d = resistance(5e6, 120.0).unwrap();
        assert!(close(d.uncertainty(), 2.0 * 5e6 / 100.0 + 8e3));
    }

    #[test]
    fn resistance_limits() {
        assert!(matches!(
            resistance(10e6, 1e3),
            Err(InstrumentError::OutOfRange { .. })
        ));
        assert!(matches!(
            resistance(100.0, 50.0),
            Err(InstrumentError::UnsupportedFrequency { .. })
        ));
    }

    #[test]
    fn capacitance_scales_at_120_hz() {
        // 10 nF: second range at 1 kHz, first at 120 Hz
        let hi = capacitance(10e-9, 1e3).unwrap();
        assert!(close(hi.uncertainty(), 0.7 * 10e-9 / 100.0 + 5e-12));
        let lo = capacitance(10e-9, 120.0).unwrap();
        assert!(close(lo.uncertainty(), 10e-9 / 100.0 + 5e-13));
    }

    #[test]
    fn capacitance_top_ranges() {
        let d = capacitance(500e-6, 1e3).unwrap();
        assert!(close(d.uncertainty(), 3.0 * 500e-6 / 100.0 + 5e-6));
        let d = capacitance(500e-6, 120.0).unwrap();
        assert!(close(d.uncertainty(), 500e-6 / 100.0 + 5e-8));
        assert!(capacitance(5e-3, 120.0).is_ok());
        assert!(matches!(
            capacitance(5e-3, 1e3),
            Err(InstrumentError::OutOfRange { .. })
        ));
    }

    #[test]
    fn inductance_has_quadratic_term() {
        let l = 1e-3;
        let d = inductance(l, 1e3).unwrap();
        assert!(close(d.uncertainty(), 2.0 * l / 100.0 + 10.0 * l * l + 5e-7));

        assert!(inductance(500.0, 120.0).is_ok());
        assert!(inductance(500.0, 1e3).is_err());
    }

    #[test]
    fn negative_reading_uses_magnitude() {
        let d = resistance(-100.0, 1e3).unwrap();
        assert_eq!(d.value(), -100.0);
        assert_eq!(d.uncertainty(), resistance(100.0, 1e3).unwrap().uncertainty());
    }
}
