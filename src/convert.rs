//! Conversions between register codes and physical units.
//!
//! Every function here is pure. The driver wrappers read `FILTER_CTL` first
//! and pass the live [`Range`] or [`OutputDataRate`], so a code converted under
//! one setting is meaningless once the range or rate changes.

use crate::params::{OutputDataRate, Range};
use crate::registers::THRESHOLD_MAX;

/// Temperature sensitivity in °C per LSB.
pub const TEMPERATURE_SCALE: f32 = 0.065;

// The 8-bit data registers hold bits 11:4 of the 12-bit sample.
const MSB_ONLY_SCALE: f32 = 16.0;
// Inputs at or below this are rejected by the g/ms to register conversions.
const MIN_POSITIVE: f32 = 1e-6;

/// Reasons a physical value cannot be expressed as a register code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConversionError {
    /// The value is zero or negative.
    NotPositive,
    /// The code would not fit the destination register.
    Overflow,
}

/// Rejects zero, negative and NaN inputs of the g/ms conversions.
pub fn check_positive(value: f32) -> Result<(), ConversionError> {
    if value.is_nan() || value < MIN_POSITIVE {
        return Err(ConversionError::NotPositive);
    }
    Ok(())
}

/// Converts a threshold in g to the 11-bit `THRESH_ACT`/`THRESH_INACT` code.
///
/// Zero is rejected along with negative values; write a raw `0` through the
/// threshold setters to detect any motion.
pub fn threshold_to_register(g: f32, range: Range) -> Result<u16, ConversionError> {
    check_positive(g)?;

    let code = (g * range.counts_per_g()) as u32;
    if code > THRESHOLD_MAX as u32 {
        return Err(ConversionError::Overflow);
    }

    Ok(code as u16)
}

/// Converts a threshold code back to g.
pub fn threshold_to_g(code: u16, range: Range) -> f32 {
    code as f32 / range.counts_per_g()
}

/// Converts a duration in milliseconds to a sample count at `odr`, bounded by `max`.
pub fn time_to_register(ms: f32, odr: OutputDataRate, max: u16) -> Result<u16, ConversionError> {
    check_positive(ms)?;

    let code = (ms / 1000.0 * odr.hz()) as u32;
    if code > max as u32 {
        return Err(ConversionError::Overflow);
    }

    Ok(code as u16)
}

/// Converts a sample count at `odr` back to milliseconds.
pub fn time_to_ms(code: u16, odr: OutputDataRate) -> f32 {
    code as f32 / odr.hz() * 1000.0
}

/// Scales a full-resolution acceleration code to g.
pub fn raw_to_g(raw: i16, range: Range) -> f32 {
    raw as f32 / range.counts_per_g()
}

/// Scales an 8-bit MSB-only acceleration code to g.
pub fn msb_to_g(raw: i8, range: Range) -> f32 {
    raw as f32 * MSB_ONLY_SCALE / range.counts_per_g()
}

/// Scales a temperature code to °C.
pub fn raw_to_celsius(raw: i16) -> f32 {
    raw as f32 * TEMPERATURE_SCALE
}
