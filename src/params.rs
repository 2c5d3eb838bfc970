//! Strongly typed parameter enumerations for the ADXL362 driver.
//!
//! These enums map directly to datasheet field encodings and are used across
//! [`Config`](crate::config::Config) and the high-level driver APIs. Prefer these
//! types over raw integers to keep configuration values valid and explicit.
//!
//! # Examples
//!
//! ```rust
//! use adxl362::params::{ChipMode, OutputDataRate, Range};
//!
//! let odr = OutputDataRate::Od100Hz;
//! let range = Range::G4;
//! let mode = ChipMode::Measurement;
//! assert_eq!(range.counts_per_g(), 500.0);
//! let _ = (odr, mode);
//! ```

use modular_bitfield::prelude::Specifier;

/// Measurement range selections encoded in `FILTER_CTL[7:6]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum Range {
    /// ±2 g.
    G2 = 0b00,
    /// ±4 g.
    G4 = 0b01,
    /// ±8 g.
    G8 = 0b10,
}

impl Range {
    /// Returns the sensitivity in LSB per g.
    ///
    /// The ±8 g figure is the datasheet's 235 LSB/g rather than an exact halving.
    pub const fn counts_per_g(self) -> f32 {
        match self {
            Self::G2 => 1000.0,
            Self::G4 => 500.0,
            Self::G8 => 235.0,
        }
    }
}

/// Output data rate selections encoded in `FILTER_CTL[2:0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 3]
pub enum OutputDataRate {
    /// 12.5 Hz output data rate.
    Od12p5Hz = 0b000,
    /// 25 Hz output data rate.
    Od25Hz = 0b001,
    /// 50 Hz output data rate.
    Od50Hz = 0b010,
    /// 100 Hz output data rate.
    Od100Hz = 0b011,
    /// 200 Hz output data rate.
    Od200Hz = 0b100,
    /// 400 Hz output data rate.
    Od400Hz = 0b101,
}

impl OutputDataRate {
    /// Returns the ODR in hertz.
    pub const fn hz(self) -> f32 {
        match self {
            Self::Od12p5Hz => 12.5,
            Self::Od25Hz => 25.0,
            Self::Od50Hz => 50.0,
            Self::Od100Hz => 100.0,
            Self::Od200Hz => 200.0,
            Self::Od400Hz => 400.0,
        }
    }
}

/// Anti-aliasing bandwidth selection (`FILTER_CTL.HALF_BW`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum Bandwidth {
    /// Bandwidth set to half the ODR.
    OdrDiv2 = 0,
    /// Bandwidth set to a quarter of the ODR.
    OdrDiv4 = 1,
}

/// FIFO operating modes encoded in `FIFO_CONTROL[1:0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum FifoMode {
    /// FIFO disabled.
    Disabled = 0b00,
    /// Oldest-saved mode.
    OldestSaved = 0b01,
    /// Streaming mode (circular buffer).
    Stream = 0b10,
    /// Triggered mode.
    Triggered = 0b11,
}

/// Power versus noise tradeoff encoded in `POWER_CTL[5:4]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum NoiseMode {
    /// Normal operation.
    Normal = 0b00,
    /// Low-noise mode.
    LowNoise = 0b01,
    /// Ultralow-noise mode.
    UltraLowNoise = 0b10,
}

/// Measurement state encoded in `POWER_CTL[1:0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum ChipMode {
    /// Standby, no measurements.
    Standby = 0b00,
    /// Measurement mode.
    Measurement = 0b10,
}

/// Activity/inactivity interaction encoded in `ACT_INACT_CTL[5:4]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum DetectMode {
    /// Activity and inactivity detection run independently.
    Default = 0b00,
    /// Linked: the detectors alternate and wait for the host to clear them.
    Link = 0b01,
    /// Loop: linked detectors that rearm without host intervention.
    Loop = 0b11,
}

/// Detection reference encoded in `ACT_INACT_CTL` (`ACT_REF` / `INACT_REF`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum DetectTrigger {
    /// Compare the absolute acceleration against the threshold.
    Absolute = 0,
    /// Compare against a reference sample taken when detection starts.
    Referenced = 1,
}

/// Interrupt pin polarity encoded in `INTMAPx.INT_LOW`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum InterruptPinLevel {
    /// Active high.
    High = 0,
    /// Active low.
    Low = 1,
}

/// Physical interrupt outputs of the ADXL362.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptPin {
    /// `INT1`, configured through `INTMAP1`.
    Int1,
    /// `INT2`, configured through `INTMAP2`.
    Int2,
}

/// Status conditions that can be routed to an interrupt pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptEvent {
    /// Awake state changes.
    Awake,
    /// Inactivity detected.
    Inactivity,
    /// Activity detected.
    Activity,
    /// FIFO overrun.
    FifoOverrun,
    /// FIFO watermark reached.
    FifoWatermark,
    /// At least one sample available in the FIFO.
    FifoReady,
    /// New sample available in the data registers.
    DataReady,
}

impl InterruptEvent {
    /// All events in `INTMAPx` bit order, MSB first.
    pub const ALL: [InterruptEvent; 7] = [
        Self::Awake,
        Self::Inactivity,
        Self::Activity,
        Self::FifoOverrun,
        Self::FifoWatermark,
        Self::FifoReady,
        Self::DataReady,
    ];
}
