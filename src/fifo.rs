//! FIFO decoding utilities.
//!
//! Each FIFO entry is a little-endian 16-bit word: bits 15:14 tag the source
//! (X, Y, Z or temperature) and bits 13:0 hold the sample, sign-extended from
//! bit 12.

use crate::convert::{raw_to_celsius, raw_to_g};
use crate::params::Range;

/// Source of a FIFO entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameType {
    /// X-axis sample.
    #[default]
    X,
    /// Y-axis sample.
    Y,
    /// Z-axis sample.
    Z,
    /// Temperature sample.
    Temperature,
}

impl FrameType {
    /// Decodes the two tag bits of a FIFO entry.
    pub const fn from_tag(tag: u8) -> Self {
        match tag & 0x03 {
            0b00 => Self::X,
            0b01 => Self::Y,
            0b10 => Self::Z,
            _ => Self::Temperature,
        }
    }
}

/// A decoded FIFO sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// Which axis (or temperature) the entry carries.
    pub kind: FrameType,
    /// Sign-extended sample code.
    pub raw: i16,
    /// Sample scaled to g, or to °C for temperature entries.
    pub value: f32,
}

impl Frame {
    /// Decodes one FIFO entry given the range active while it was captured.
    pub fn decode(bytes: [u8; 2], range: Range) -> Self {
        let word = u16::from_le_bytes(bytes);
        let kind = FrameType::from_tag((word >> 14) as u8);

        let mut data = word & 0x3FFF;
        if data & (1 << 12) != 0 {
            data |= 0b11 << 14;
        }
        let raw = data as i16;

        let value = match kind {
            FrameType::Temperature => raw_to_celsius(raw),
            _ => raw_to_g(raw, range),
        };

        Self { kind, raw, value }
    }
}

/// Number of entries that form one complete sample set.
pub const fn set_size(with_temperature: bool) -> usize {
    if with_temperature { 4 } else { 3 }
}

/// Rounds `available` down to whole sample sets so a read never splits one.
pub const fn aligned_len(available: usize, with_temperature: bool) -> usize {
    let set = set_size(with_temperature);
    (available / set) * set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_select_frame_type() {
        assert_eq!(Frame::decode([0x00, 0x00], Range::G2).kind, FrameType::X);
        assert_eq!(Frame::decode([0x00, 0x40], Range::G2).kind, FrameType::Y);
        assert_eq!(Frame::decode([0x00, 0x80], Range::G2).kind, FrameType::Z);
        assert_eq!(Frame::decode([0x00, 0xC0], Range::G2).kind, FrameType::Temperature);
    }

    #[test]
    fn positive_samples_keep_their_magnitude() {
        // Y axis, +1000.
        let frame = Frame::decode([0xE8, 0x43], Range::G2);
        assert_eq!(frame.kind, FrameType::Y);
        assert_eq!(frame.raw, 1000);
        assert!((frame.value - 1.0).abs() < 1e-6);
    }

    #[test]
    fn bit_twelve_sign_extends() {
        // X axis, -1000 as a 14-bit field: 0x3C18.
        let frame = Frame::decode([0x18, 0x3C], Range::G2);
        assert_eq!(frame.kind, FrameType::X);
        assert_eq!(frame.raw, -1000);
        assert!((frame.value + 1.0).abs() < 1e-6);

        // Z axis, most negative code with bit 12 as sign.
        let frame = Frame::decode([0x00, 0xB0], Range::G8);
        assert_eq!(frame.kind, FrameType::Z);
        assert_eq!(frame.raw, -4096);
        assert!(frame.value < 0.0);
    }

    #[test]
    fn temperature_entries_use_fixed_scale() {
        let frame = Frame::decode([0x90, 0xC1], Range::G8);
        assert_eq!(frame.kind, FrameType::Temperature);
        assert_eq!(frame.raw, 400);
        assert!((frame.value - 26.0).abs() < 1e-4);
    }

    #[test]
    fn alignment_drops_partial_sets() {
        assert_eq!(aligned_len(512, false), 510);
        assert_eq!(aligned_len(512, true), 512);
        assert_eq!(aligned_len(7, true), 4);
        assert_eq!(aligned_len(2, false), 0);
    }
}
