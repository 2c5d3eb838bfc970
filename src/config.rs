//! Configuration primitives for the ADXL362 driver.
//!
//! A [`Config`] captures every writable setting and is applied in one pass by
//! [`Adxl362::configure`](crate::Adxl362::configure). The stock profiles mirror
//! the three common operating setups: plain polling, FIFO streaming and
//! motion-triggered wake-up.

use crate::convert;
use crate::params::{
    Bandwidth, ChipMode, DetectMode, DetectTrigger, FifoMode, InterruptEvent, InterruptPinLevel,
    NoiseMode, OutputDataRate, Range,
};
use crate::registers::{IntMap, FIFO_SAMPLES_MAX, THRESHOLD_MAX};

/// Activity/inactivity threshold, either as a register code or in g.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    /// 11-bit register code, written as is.
    Raw(u16),
    /// Threshold in g, converted against the configured range.
    Gravity(f32),
}

/// Activity/inactivity duration, either as a sample count or in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetectTime {
    /// Sample count, written as is.
    Samples(u16),
    /// Duration in milliseconds, converted against the configured ODR.
    Millis(f32),
}

/// Settings of one motion detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detector {
    /// Detector enable.
    pub enabled: bool,
    /// Absolute or referenced comparison.
    pub trigger: DetectTrigger,
    /// Detection threshold.
    pub threshold: Threshold,
    /// Time the threshold must be exceeded (activity) or undercut (inactivity).
    pub time: DetectTime,
}

impl Detector {
    /// A disabled detector with zero threshold and time.
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            trigger: DetectTrigger::Referenced,
            threshold: Threshold::Raw(0),
            time: DetectTime::Samples(0),
        }
    }
}

/// User-facing configuration for the ADXL362 sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Measurement range.
    pub range: Range,
    /// Output data rate.
    pub odr: OutputDataRate,
    /// Anti-aliasing bandwidth.
    pub bandwidth: Bandwidth,
    /// Noise mode.
    pub noise_mode: NoiseMode,
    /// Wake-up mode.
    pub wake_up: bool,
    /// Autosleep.
    pub auto_sleep: bool,
    /// INT2 as external sampling trigger.
    pub ext_sampling_trigger: bool,
    /// INT1 as external clock.
    pub ext_clock: bool,
    /// FIFO operating mode.
    pub fifo_mode: FifoMode,
    /// Interleave temperature entries in the FIFO.
    pub fifo_temperature: bool,
    /// FIFO watermark in entries (0..=511).
    pub fifo_samples: u16,
    /// `INT1` polarity and event routing.
    pub int1: IntMap,
    /// `INT2` polarity and event routing.
    pub int2: IntMap,
    /// Link/loop selection.
    pub detect_mode: DetectMode,
    /// Activity detector.
    pub activity: Detector,
    /// Inactivity detector.
    pub inactivity: Detector,
    /// Self-test force.
    pub self_test: bool,
    /// Chip mode, programmed last.
    pub mode: ChipMode,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Polling profile: 2 g, 12.5 Hz, FIFO off, no interrupts, detectors off.
    pub fn basic() -> Self {
        let quiet_pin = IntMap::new().with_level(InterruptPinLevel::Low);
        Self {
            range: Range::G2,
            odr: OutputDataRate::Od12p5Hz,
            bandwidth: Bandwidth::OdrDiv2,
            noise_mode: NoiseMode::Normal,
            wake_up: false,
            auto_sleep: false,
            ext_sampling_trigger: false,
            ext_clock: false,
            fifo_mode: FifoMode::Disabled,
            fifo_temperature: false,
            fifo_samples: 0,
            int1: quiet_pin,
            int2: quiet_pin,
            detect_mode: DetectMode::Link,
            activity: Detector::disabled(),
            inactivity: Detector::disabled(),
            self_test: false,
            mode: ChipMode::Measurement,
        }
    }

    /// FIFO profile: stream mode with a 128-entry watermark signalled on `INT1`.
    pub fn fifo() -> Self {
        Self {
            fifo_mode: FifoMode::Stream,
            fifo_samples: 128,
            int1: IntMap::new()
                .with_level(InterruptPinLevel::Low)
                .with_event(InterruptEvent::FifoOverrun, true)
                .with_event(InterruptEvent::FifoWatermark, true),
            ..Self::basic()
        }
    }

    /// Motion profile: looped activity (0.25 g, 30 ms) and inactivity (0.15 g, 500 ms) on `INT1`.
    pub fn motion() -> Self {
        Self {
            int1: IntMap::new()
                .with_level(InterruptPinLevel::Low)
                .with_event(InterruptEvent::Activity, true)
                .with_event(InterruptEvent::Inactivity, true),
            detect_mode: DetectMode::Loop,
            activity: Detector {
                enabled: true,
                trigger: DetectTrigger::Referenced,
                threshold: Threshold::Gravity(0.25),
                time: DetectTime::Millis(30.0),
            },
            inactivity: Detector {
                enabled: true,
                trigger: DetectTrigger::Referenced,
                threshold: Threshold::Gravity(0.15),
                time: DetectTime::Millis(500.0),
            },
            ..Self::basic()
        }
    }

    /// Checks that every value fits its register.
    ///
    /// Thresholds and times given in g or ms are converted against this
    /// config's own range and ODR, the ones [`configure`](crate::Adxl362::configure)
    /// programs before writing them.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.fifo_samples > FIFO_SAMPLES_MAX {
            return Err(ConfigError::FifoSamplesOutOfRange);
        }

        self.activity_threshold_code()?;
        self.activity_time_code()?;
        self.inactivity_threshold_code()?;
        self.inactivity_time_code()?;
        Ok(())
    }

    /// `THRESH_ACT` code for the activity detector.
    pub fn activity_threshold_code(&self) -> core::result::Result<u16, ConfigError> {
        threshold_code(self.activity.threshold, self.range)
    }

    /// `TIME_ACT` code for the activity detector.
    pub fn activity_time_code(&self) -> core::result::Result<u8, ConfigError> {
        let samples = time_code(self.activity.time, self.odr, u8::MAX as u16)
            .ok_or(ConfigError::ActivityTimeOutOfRange)?;
        u8::try_from(samples).map_err(|_| ConfigError::ActivityTimeOutOfRange)
    }

    /// `THRESH_INACT` code for the inactivity detector.
    pub fn inactivity_threshold_code(&self) -> core::result::Result<u16, ConfigError> {
        threshold_code(self.inactivity.threshold, self.range)
    }

    /// `TIME_INACT` code for the inactivity detector.
    pub fn inactivity_time_code(&self) -> core::result::Result<u16, ConfigError> {
        time_code(self.inactivity.time, self.odr, u16::MAX)
            .ok_or(ConfigError::InactivityTimeOutOfRange)
    }
}

fn threshold_code(threshold: Threshold, range: Range) -> core::result::Result<u16, ConfigError> {
    match threshold {
        Threshold::Raw(code) if code <= THRESHOLD_MAX => Ok(code),
        Threshold::Raw(_) => Err(ConfigError::ThresholdOutOfRange),
        Threshold::Gravity(g) => {
            convert::threshold_to_register(g, range).map_err(|_| ConfigError::ThresholdOutOfRange)
        }
    }
}

fn time_code(time: DetectTime, odr: OutputDataRate, max: u16) -> Option<u16> {
    match time {
        DetectTime::Samples(samples) => (samples <= max).then_some(samples),
        DetectTime::Millis(ms) => convert::time_to_register(ms, odr, max).ok(),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::basic()
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Starts from an existing configuration, e.g. one of the stock profiles.
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Overrides the measurement range.
    pub fn range(mut self, range: Range) -> Self {
        self.config.range = range;
        self
    }

    /// Overrides the output data rate.
    pub fn odr(mut self, odr: OutputDataRate) -> Self {
        self.config.odr = odr;
        self
    }

    /// Overrides the anti-aliasing bandwidth.
    pub fn bandwidth(mut self, bandwidth: Bandwidth) -> Self {
        self.config.bandwidth = bandwidth;
        self
    }

    /// Overrides the noise mode.
    pub fn noise_mode(mut self, noise_mode: NoiseMode) -> Self {
        self.config.noise_mode = noise_mode;
        self
    }

    /// Sets wake-up and autosleep.
    pub fn power_saving(mut self, wake_up: bool, auto_sleep: bool) -> Self {
        self.config.wake_up = wake_up;
        self.config.auto_sleep = auto_sleep;
        self
    }

    /// Sets the external trigger (INT2) and external clock (INT1) usage.
    pub fn external_timing(mut self, sampling_trigger: bool, clock: bool) -> Self {
        self.config.ext_sampling_trigger = sampling_trigger;
        self.config.ext_clock = clock;
        self
    }

    /// Sets the FIFO mode, temperature interleaving and watermark.
    pub fn fifo(mut self, mode: FifoMode, temperature: bool, samples: u16) -> Self {
        self.config.fifo_mode = mode;
        self.config.fifo_temperature = temperature;
        self.config.fifo_samples = samples;
        self
    }

    /// Sets `INT1` polarity and routing.
    pub fn int1(mut self, map: IntMap) -> Self {
        self.config.int1 = map;
        self
    }

    /// Sets `INT2` polarity and routing.
    pub fn int2(mut self, map: IntMap) -> Self {
        self.config.int2 = map;
        self
    }

    /// Sets the link/loop selection.
    pub fn detect_mode(mut self, mode: DetectMode) -> Self {
        self.config.detect_mode = mode;
        self
    }

    /// Sets the activity detector.
    pub fn activity(mut self, detector: Detector) -> Self {
        self.config.activity = detector;
        self
    }

    /// Sets the inactivity detector.
    pub fn inactivity(mut self, detector: Detector) -> Self {
        self.config.inactivity = detector;
        self
    }

    /// Sets the self-test force bit.
    pub fn self_test(mut self, enabled: bool) -> Self {
        self.config.self_test = enabled;
        self
    }

    /// Sets the chip mode programmed at the end of the sequence.
    pub fn mode(mut self, mode: ChipMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Validation errors generated while verifying a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// FIFO watermark above 511 entries.
    FifoSamplesOutOfRange,
    /// Threshold wider than 11 bits, or a non-positive value in g.
    ThresholdOutOfRange,
    /// Activity time wider than 8 bits, or a non-positive value in ms.
    ActivityTimeOutOfRange,
    /// Non-positive or oversized inactivity time in ms.
    InactivityTimeOutOfRange,
}
