//! Register map definitions for the ADXL362 accelerometer.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::params::{
    Bandwidth, ChipMode, DetectMode, DetectTrigger, FifoMode, InterruptEvent, InterruptPinLevel,
    NoiseMode, OutputDataRate, Range,
};

/// Register address of `DEVID_AD`.
pub const REG_DEVID_AD: u8 = 0x00;
/// Register address of `DEVID_MST`.
pub const REG_DEVID_MST: u8 = 0x01;
/// Register address of `PARTID`.
pub const REG_PARTID: u8 = 0x02;
/// Register address of `REVID`.
pub const REG_REVID: u8 = 0x03;
/// Register address of `XDATA` (8 MSBs).
pub const REG_XDATA: u8 = 0x08;
/// Register address of `YDATA` (8 MSBs).
pub const REG_YDATA: u8 = 0x09;
/// Register address of `ZDATA` (8 MSBs).
pub const REG_ZDATA: u8 = 0x0A;
/// Register address of `STATUS`.
pub const REG_STATUS: u8 = 0x0B;
/// Register address of `FIFO_ENTRIES_L`.
pub const REG_FIFO_ENTRIES_L: u8 = 0x0C;
/// Register address of `FIFO_ENTRIES_H`.
pub const REG_FIFO_ENTRIES_H: u8 = 0x0D;
/// Register address of `XDATA_L`.
pub const REG_XDATA_L: u8 = 0x0E;
/// Register address of `XDATA_H`.
pub const REG_XDATA_H: u8 = 0x0F;
/// Register address of `YDATA_L`.
pub const REG_YDATA_L: u8 = 0x10;
/// Register address of `YDATA_H`.
pub const REG_YDATA_H: u8 = 0x11;
/// Register address of `ZDATA_L`.
pub const REG_ZDATA_L: u8 = 0x12;
/// Register address of `ZDATA_H`.
pub const REG_ZDATA_H: u8 = 0x13;
/// Register address of `TEMP_L`.
pub const REG_TEMP_L: u8 = 0x14;
/// Register address of `TEMP_H`.
pub const REG_TEMP_H: u8 = 0x15;
/// Register address of `SOFT_RESET`.
pub const REG_SOFT_RESET: u8 = 0x1F;
/// Register address of `THRESH_ACT_L`.
pub const REG_THRESH_ACT_L: u8 = 0x20;
/// Register address of `THRESH_ACT_H`.
pub const REG_THRESH_ACT_H: u8 = 0x21;
/// Register address of `TIME_ACT`.
pub const REG_TIME_ACT: u8 = 0x22;
/// Register address of `THRESH_INACT_L`.
pub const REG_THRESH_INACT_L: u8 = 0x23;
/// Register address of `THRESH_INACT_H`.
pub const REG_THRESH_INACT_H: u8 = 0x24;
/// Register address of `TIME_INACT_L`.
pub const REG_TIME_INACT_L: u8 = 0x25;
/// Register address of `TIME_INACT_H`.
pub const REG_TIME_INACT_H: u8 = 0x26;
/// Register address of `ACT_INACT_CTL`.
pub const REG_ACT_INACT_CTL: u8 = 0x27;
/// Register address of `FIFO_CONTROL`.
pub const REG_FIFO_CONTROL: u8 = 0x28;
/// Register address of `FIFO_SAMPLES`.
pub const REG_FIFO_SAMPLES: u8 = 0x29;
/// Register address of `INTMAP1`.
pub const REG_INTMAP1: u8 = 0x2A;
/// Register address of `INTMAP2`.
pub const REG_INTMAP2: u8 = 0x2B;
/// Register address of `FILTER_CTL`.
pub const REG_FILTER_CTL: u8 = 0x2C;
/// Register address of `POWER_CTL`.
pub const REG_POWER_CTL: u8 = 0x2D;
/// Register address of `SELF_TEST`.
pub const REG_SELF_TEST: u8 = 0x2E;

/// Expected content of `DEVID_AD`.
pub const EXPECTED_DEVID_AD: u8 = 0xAD;
/// Expected content of `DEVID_MST`.
pub const EXPECTED_DEVID_MST: u8 = 0x1D;
/// Expected content of `PARTID`.
pub const EXPECTED_PART_ID: u8 = 0xF2;

/// Soft reset command value written to the `SOFT_RESET` register ("R").
pub const RESET_COMMAND: u8 = 0x52;

/// Largest value accepted by the 11-bit activity/inactivity threshold registers.
pub const THRESHOLD_MAX: u16 = 0x07FF;
/// Largest FIFO watermark, bit 8 of which lives in `FIFO_CONTROL.AH`.
pub const FIFO_SAMPLES_MAX: u16 = 511;
/// FIFO depth in 16-bit entries.
pub const FIFO_CAPACITY: usize = 512;

/// An 8-bit register with a packed bitfield layout.
pub trait Register: Copy + From<u8> + Into<u8> {
    /// Register address as documented in the datasheet.
    const ADDRESS: u8;
}

macro_rules! packed_register {
    ($name:ident, $address:expr) => {
        impl From<u8> for $name {
            fn from(value: u8) -> Self {
                Self::from_bytes([value])
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> Self {
                value.into_bytes()[0]
            }
        }

        impl Register for $name {
            const ADDRESS: u8 = $address;
        }
    };
}

/// Bitfield representation of the `STATUS` register (address `0x0B`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    // New sample in the data registers (bit 0).
    pub data_ready: bool,
    // At least one FIFO entry available (bit 1).
    pub fifo_ready: bool,
    // FIFO watermark reached (bit 2).
    pub fifo_watermark: bool,
    // FIFO overrun, samples lost (bit 3).
    pub fifo_overrun: bool,
    // Activity detected (bit 4).
    pub activity: bool,
    // Inactivity detected (bit 5).
    pub inactivity: bool,
    // Device is awake (bit 6).
    pub awake: bool,
    // SEU error detected in the user registers (bit 7).
    pub err_user_regs: bool,
}

packed_register!(Status, REG_STATUS);

/// Bitfield representation of the `ACT_INACT_CTL` register (address `0x27`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActInactControl {
    // Activity detection enable (bit 0).
    pub activity_enable: bool,
    // Activity referenced/absolute selection (bit 1).
    pub activity_trigger: DetectTrigger,
    // Inactivity detection enable (bit 2).
    pub inactivity_enable: bool,
    // Inactivity referenced/absolute selection (bit 3).
    pub inactivity_trigger: DetectTrigger,
    // Link/loop selection (bits 5:4).
    pub detect_mode: DetectMode,
    #[skip]
    __: B2,
}

packed_register!(ActInactControl, REG_ACT_INACT_CTL);

/// Bitfield representation of the `FIFO_CONTROL` register (address `0x28`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FifoControl {
    // FIFO operating mode (bits 1:0).
    pub mode: FifoMode,
    // Store temperature samples alongside the axes (bit 2).
    pub temperature: bool,
    // Bit 8 of the FIFO watermark, "above half" (bit 3).
    pub above_half: bool,
    #[skip]
    __: B4,
}

packed_register!(FifoControl, REG_FIFO_CONTROL);

/// Bitfield representation of the `INTMAP1`/`INTMAP2` registers (addresses `0x2A`/`0x2B`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntMap {
    // Data ready routed to the pin (bit 0).
    pub data_ready: bool,
    // FIFO ready routed to the pin (bit 1).
    pub fifo_ready: bool,
    // FIFO watermark routed to the pin (bit 2).
    pub fifo_watermark: bool,
    // FIFO overrun routed to the pin (bit 3).
    pub fifo_overrun: bool,
    // Activity routed to the pin (bit 4).
    pub activity: bool,
    // Inactivity routed to the pin (bit 5).
    pub inactivity: bool,
    // Awake routed to the pin (bit 6).
    pub awake: bool,
    // Pin polarity (bit 7).
    pub level: InterruptPinLevel,
}

impl IntMap {
    /// Returns whether `event` is routed to this pin.
    pub fn event(&self, event: InterruptEvent) -> bool {
        match event {
            InterruptEvent::Awake => self.awake(),
            InterruptEvent::Inactivity => self.inactivity(),
            InterruptEvent::Activity => self.activity(),
            InterruptEvent::FifoOverrun => self.fifo_overrun(),
            InterruptEvent::FifoWatermark => self.fifo_watermark(),
            InterruptEvent::FifoReady => self.fifo_ready(),
            InterruptEvent::DataReady => self.data_ready(),
        }
    }

    /// Routes or unroutes `event` on this pin.
    pub fn set_event(&mut self, event: InterruptEvent, enabled: bool) {
        match event {
            InterruptEvent::Awake => self.set_awake(enabled),
            InterruptEvent::Inactivity => self.set_inactivity(enabled),
            InterruptEvent::Activity => self.set_activity(enabled),
            InterruptEvent::FifoOverrun => self.set_fifo_overrun(enabled),
            InterruptEvent::FifoWatermark => self.set_fifo_watermark(enabled),
            InterruptEvent::FifoReady => self.set_fifo_ready(enabled),
            InterruptEvent::DataReady => self.set_data_ready(enabled),
        }
    }

    /// Builder-style variant of [`set_event`](Self::set_event).
    pub fn with_event(mut self, event: InterruptEvent, enabled: bool) -> Self {
        self.set_event(event, enabled);
        self
    }
}

impl From<u8> for IntMap {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<IntMap> for u8 {
    fn from(value: IntMap) -> Self {
        value.into_bytes()[0]
    }
}

/// `INTMAP1` view, so the generic read-modify-write helper can address it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntMap1(pub IntMap);

/// `INTMAP2` view, so the generic read-modify-write helper can address it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntMap2(pub IntMap);

impl From<u8> for IntMap1 {
    fn from(value: u8) -> Self {
        Self(IntMap::from(value))
    }
}

impl From<IntMap1> for u8 {
    fn from(value: IntMap1) -> Self {
        value.0.into()
    }
}

impl Register for IntMap1 {
    const ADDRESS: u8 = REG_INTMAP1;
}

impl From<u8> for IntMap2 {
    fn from(value: u8) -> Self {
        Self(IntMap::from(value))
    }
}

impl From<IntMap2> for u8 {
    fn from(value: IntMap2) -> Self {
        value.0.into()
    }
}

impl Register for IntMap2 {
    const ADDRESS: u8 = REG_INTMAP2;
}

/// Bitfield representation of the `FILTER_CTL` register (address `0x2C`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterControl {
    // Output data rate (bits 2:0).
    pub odr: OutputDataRate,
    // INT2 used as external sampling trigger (bit 3).
    pub ext_sample: bool,
    // Anti-aliasing bandwidth (bit 4).
    pub bandwidth: Bandwidth,
    #[skip]
    __: B1,
    // Measurement range (bits 7:6).
    pub range: Range,
}

packed_register!(FilterControl, REG_FILTER_CTL);

/// Bitfield representation of the `POWER_CTL` register (address `0x2D`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerControl {
    // Standby/measurement selection (bits 1:0).
    pub mode: ChipMode,
    // Autosleep enable (bit 2).
    pub auto_sleep: bool,
    // Wake-up mode enable (bit 3).
    pub wake_up: bool,
    // Noise mode (bits 5:4).
    pub noise_mode: NoiseMode,
    // INT1 used as external clock (bit 6).
    pub ext_clock: bool,
    #[skip]
    __: B1,
}

packed_register!(PowerControl, REG_POWER_CTL);

/// Bitfield representation of the `SELF_TEST` register (address `0x2E`).
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelfTest {
    // Self-test force enable (bit 0).
    pub st: bool,
    #[skip]
    __: B7,
}

packed_register!(SelfTest, REG_SELF_TEST);

/// Decodes the 10-bit FIFO entry counter from `FIFO_ENTRIES_L`/`FIFO_ENTRIES_H`.
pub fn fifo_entry_count(lower: u8, upper: u8) -> u16 {
    u16::from_le_bytes([lower, upper]) & 0x03FF
}

/// Splits a FIFO watermark into the `FIFO_CONTROL.AH` bit and the `FIFO_SAMPLES` byte.
pub fn split_fifo_samples(samples: u16) -> (bool, u8) {
    (samples & 0x0100 != 0, (samples & 0xFF) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_layout_matches_datasheet() {
        let status = Status::from(0b1001_0001);
        assert!(status.data_ready());
        assert!(!status.fifo_ready());
        assert!(!status.fifo_watermark());
        assert!(!status.fifo_overrun());
        assert!(status.activity());
        assert!(!status.inactivity());
        assert!(!status.awake());
        assert!(status.err_user_regs());
    }

    #[test]
    fn filter_control_layout() {
        let filter = FilterControl::new()
            .with_odr(OutputDataRate::Od400Hz)
            .with_ext_sample(true)
            .with_bandwidth(Bandwidth::OdrDiv4)
            .with_range(Range::G8);

        assert_eq!(u8::from(filter), 0b10_0_1_1_101);
        let decoded = FilterControl::from(0b10_0_1_1_101);
        assert_eq!(decoded.range(), Range::G8);
        assert_eq!(decoded.odr(), OutputDataRate::Od400Hz);
    }

    #[test]
    fn reserved_encodings_are_reported() {
        assert!(FilterControl::from(0b1100_0000).range_or_err().is_err());
        assert!(FilterControl::from(0b0000_0110).odr_or_err().is_err());
        assert!(PowerControl::from(0b0000_0001).mode_or_err().is_err());
    }

    #[test]
    fn skipped_bits_survive_updates() {
        let mut power = PowerControl::from(0b1000_0000);
        power.set_mode(ChipMode::Measurement);
        assert_eq!(u8::from(power), 0b1000_0010);
    }

    #[test]
    fn intmap_events_follow_bit_table() {
        let expected = [
            (InterruptEvent::Awake, 1 << 6),
            (InterruptEvent::Inactivity, 1 << 5),
            (InterruptEvent::Activity, 1 << 4),
            (InterruptEvent::FifoOverrun, 1 << 3),
            (InterruptEvent::FifoWatermark, 1 << 2),
            (InterruptEvent::FifoReady, 1 << 1),
            (InterruptEvent::DataReady, 1 << 0),
        ];
        for (event, mask) in expected {
            let map = IntMap::new().with_event(event, true);
            assert_eq!(u8::from(map), mask);
            assert!(IntMap::from(mask).event(event));
        }
        assert_eq!(u8::from(IntMap::new().with_level(InterruptPinLevel::Low)), 0x80);
    }

    #[test]
    fn fifo_counters() {
        assert_eq!(fifo_entry_count(0xFF, 0x01), 0x01FF);
        assert_eq!(fifo_entry_count(0x00, 0xFE), 0x0200);
        assert_eq!(split_fifo_samples(511), (true, 0xFF));
        assert_eq!(split_fifo_samples(128), (false, 0x80));
    }
}
