//! High-level ADXL362 device driver implementation.

use crate::config::{Config, ConfigError};
use crate::convert::{self, ConversionError};
use crate::error::{Error, Result};
use crate::fifo::{aligned_len, Frame};
use crate::info::Info;
use crate::interface::spi::SpiInterface;
use crate::interface::{read_address, write_address, Adxl362Interface, CMD_READ_FIFO};
use crate::params::{
    Bandwidth, ChipMode, DetectMode, DetectTrigger, FifoMode, InterruptEvent, InterruptPin,
    InterruptPinLevel, NoiseMode, OutputDataRate, Range,
};
use crate::registers::{
    fifo_entry_count, split_fifo_samples, ActInactControl, FifoControl, FilterControl, IntMap,
    IntMap1, IntMap2, PowerControl, Register, SelfTest, Status, EXPECTED_DEVID_AD,
    EXPECTED_DEVID_MST, EXPECTED_PART_ID, FIFO_CAPACITY, FIFO_SAMPLES_MAX, REG_DEVID_AD,
    REG_FIFO_ENTRIES_L, REG_FIFO_SAMPLES, REG_REVID, REG_SOFT_RESET, REG_TEMP_L,
    REG_THRESH_ACT_L, REG_THRESH_INACT_L, REG_TIME_ACT, REG_TIME_INACT_L, REG_XDATA,
    REG_XDATA_L, RESET_COMMAND, THRESHOLD_MAX,
};
use crate::status::{self, StatusEvent};
use embedded_hal::delay::DelayNs;
use embedded_hal::spi::SpiDevice;

// Settle time the datasheet requires after a soft reset (milliseconds).
const SOFT_RESET_DELAY_MS: u32 = 2;
// Two bytes per FIFO entry.
const FIFO_BUFFER_LEN: usize = FIFO_CAPACITY * 2;

/// High-level synchronous driver for the ADXL362 accelerometer.
pub struct Adxl362<IFACE> {
    interface: IFACE,
    initialized: bool,
    fifo_buffer: [u8; FIFO_BUFFER_LEN],
}

/// Full-resolution acceleration sample.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Acceleration {
    /// X, Y, Z codes.
    pub raw: [i16; 3],
    /// X, Y, Z in g.
    pub g: [f32; 3],
}

/// Acceleration sample read from the 8-bit MSB-only data registers.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Acceleration8 {
    /// X, Y, Z upper bytes.
    pub raw: [i8; 3],
    /// X, Y, Z in g.
    pub g: [f32; 3],
}

/// Temperature sample.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Temperature {
    /// Sensor code.
    pub raw: i16,
    /// Temperature in °C.
    pub celsius: f32,
}

impl<IFACE> Adxl362<IFACE> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new, uninitialized driver from the provided bus interface.
    pub fn new(interface: IFACE) -> Self {
        Self {
            interface,
            initialized: false,
            fifo_buffer: [0; FIFO_BUFFER_LEN],
        }
    }

    /// Consumes the driver and returns the owned interface.
    pub fn release(self) -> IFACE {
        self.interface
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }

    /// Returns whether [`init`](Self::init) has completed successfully.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Chip and driver description.
    pub const fn info() -> Info {
        Info::adxl362()
    }
}

impl<SPI> Adxl362<SpiInterface<SPI>>
where
    SPI: SpiDevice,
{
    /// Convenience constructor for SPI transports.
    pub fn new_spi(spi: SPI) -> Self {
        Self::new(SpiInterface::new(spi))
    }

    /// Releases the driver, returning the SPI device.
    pub fn release_spi(self) -> SPI {
        self.release().release()
    }
}

impl<IFACE, CommE> Adxl362<IFACE>
where
    IFACE: Adxl362Interface<Error = CommE>,
{
    // ==================================================================
    // == Initialization & Lifecycle ====================================
    // ==================================================================
    /// Opens the bus, verifies the device identity and issues a soft reset.
    ///
    /// Any failure after the bus was opened closes it again and leaves the
    /// driver uninitialized.
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), CommE> {
        self.interface.open().map_err(|err| {
            error!("adxl362: bus open failed.");
            Error::Interface(err)
        })?;

        if let Err(err) = self.probe(delay) {
            let _ = self.interface.close();
            return Err(err);
        }

        self.initialized = true;
        debug!("adxl362: initialized.");
        Ok(())
    }

    /// Returns the chip to standby and closes the bus.
    pub fn deinit(&mut self) -> Result<(), CommE> {
        self.set_mode(ChipMode::Standby)?;
        self.interface.close().map_err(|err| {
            error!("adxl362: bus close failed.");
            Error::Interface(err)
        })?;

        self.initialized = false;
        Ok(())
    }

    /// Issues a soft reset and waits for the device to settle.
    pub fn soft_reset(&mut self, delay: &mut impl DelayNs) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.reset(delay)
    }

    /// Applies every setting of `config`, finishing with the chip mode.
    ///
    /// Thresholds and times given in physical units are converted against the
    /// range and ODR of `config`. An invalid config fails with
    /// [`Error::InvalidConfig`] before any register is written.
    pub fn configure(&mut self, config: &Config) -> Result<(), CommE> {
        self.ensure_initialized()?;
        config.validate().map_err(invalid_config)?;

        self.set_fifo_temperature(config.fifo_temperature)?;
        self.set_fifo_mode(config.fifo_mode)?;
        self.set_fifo_samples(config.fifo_samples)?;

        for (pin, map) in [(InterruptPin::Int1, config.int1), (InterruptPin::Int2, config.int2)] {
            self.set_interrupt_pin_level(pin, map.level())?;
            for event in InterruptEvent::ALL {
                self.set_interrupt_map(pin, event, map.event(event))?;
            }
        }

        self.set_bandwidth(config.bandwidth)?;
        self.set_noise_mode(config.noise_mode)?;
        self.set_wake_up(config.wake_up)?;
        self.set_auto_sleep(config.auto_sleep)?;
        self.set_ext_sampling_trigger(config.ext_sampling_trigger)?;
        self.set_ext_clock(config.ext_clock)?;
        self.set_odr(config.odr)?;
        self.set_range(config.range)?;

        self.set_activity_threshold(config.activity_threshold_code().map_err(invalid_config)?)?;
        self.set_activity_time(config.activity_time_code().map_err(invalid_config)?)?;
        self.set_inactivity_threshold(config.inactivity_threshold_code().map_err(invalid_config)?)?;
        self.set_inactivity_time(config.inactivity_time_code().map_err(invalid_config)?)?;

        self.set_detect_mode(config.detect_mode)?;
        self.set_inactivity_trigger(config.inactivity.trigger)?;
        self.set_activity_trigger(config.activity.trigger)?;
        self.set_inactivity_enabled(config.inactivity.enabled)?;
        self.set_activity_enabled(config.activity.enabled)?;
        self.set_self_test(config.self_test)?;
        self.set_mode(config.mode)?;

        debug!("adxl362: configuration applied.");
        Ok(())
    }

    // ==================================================================
    // == Identification & Status =======================================
    // ==================================================================
    /// Reads the silicon revision (`REVID`).
    pub fn revision(&mut self) -> Result<u8, CommE> {
        self.ensure_initialized()?;
        let mut id = [0u8; 1];
        self.read_raw(REG_REVID, &mut id)?;
        Ok(id[0])
    }

    /// Reads the `STATUS` register.
    pub fn status(&mut self) -> Result<Status, CommE> {
        self.get::<Status, _>(|status| status)
    }

    /// Number of valid entries currently held by the FIFO.
    pub fn fifo_counter(&mut self) -> Result<u16, CommE> {
        self.ensure_initialized()?;
        let mut raw = [0u8; 2];
        self.read_raw(REG_FIFO_ENTRIES_L, &mut raw)?;
        Ok(fifo_entry_count(raw[0], raw[1]))
    }

    // ==================================================================
    // == FIFO Configuration ============================================
    // ==================================================================
    /// Enables or disables temperature entries in the FIFO.
    pub fn set_fifo_temperature(&mut self, enabled: bool) -> Result<(), CommE> {
        self.modify::<FifoControl, _>(|fifo| fifo.set_temperature(enabled))
    }

    /// Returns whether temperature entries are stored in the FIFO.
    pub fn fifo_temperature(&mut self) -> Result<bool, CommE> {
        self.get::<FifoControl, _>(|fifo| fifo.temperature())
    }

    /// Selects the FIFO operating mode.
    pub fn set_fifo_mode(&mut self, mode: FifoMode) -> Result<(), CommE> {
        self.modify::<FifoControl, _>(|fifo| fifo.set_mode(mode))
    }

    /// Returns the FIFO operating mode.
    pub fn fifo_mode(&mut self) -> Result<FifoMode, CommE> {
        self.get::<FifoControl, _>(|fifo| fifo.mode())
    }

    /// Sets the FIFO watermark (0..=511 entries).
    pub fn set_fifo_samples(&mut self, samples: u16) -> Result<(), CommE> {
        self.ensure_initialized()?;
        if samples > FIFO_SAMPLES_MAX {
            warn!("adxl362: fifo samples {=u16} > 511.", samples);
            return Err(Error::OutOfRange);
        }

        let (above_half, lower) = split_fifo_samples(samples);
        self.modify::<FifoControl, _>(|fifo| fifo.set_above_half(above_half))?;
        self.write_raw(REG_FIFO_SAMPLES, &[lower])
    }

    /// Returns the FIFO watermark.
    pub fn fifo_samples(&mut self) -> Result<u16, CommE> {
        let above_half = self.get::<FifoControl, _>(|fifo| fifo.above_half())?;
        let mut lower = [0u8; 1];
        self.read_raw(REG_FIFO_SAMPLES, &mut lower)?;
        Ok(((above_half as u16) << 8) | lower[0] as u16)
    }

    // ==================================================================
    // == Interrupt Routing =============================================
    // ==================================================================
    /// Sets the active level of an interrupt pin.
    pub fn set_interrupt_pin_level(
        &mut self,
        pin: InterruptPin,
        level: InterruptPinLevel,
    ) -> Result<(), CommE> {
        self.modify_int_map(pin, |map| map.set_level(level))
    }

    /// Returns the active level of an interrupt pin.
    pub fn interrupt_pin_level(&mut self, pin: InterruptPin) -> Result<InterruptPinLevel, CommE> {
        Ok(self.int_map(pin)?.level())
    }

    /// Routes or unroutes a status event on an interrupt pin.
    pub fn set_interrupt_map(
        &mut self,
        pin: InterruptPin,
        event: InterruptEvent,
        enabled: bool,
    ) -> Result<(), CommE> {
        self.modify_int_map(pin, |map| map.set_event(event, enabled))
    }

    /// Returns whether a status event is routed to an interrupt pin.
    pub fn interrupt_map(&mut self, pin: InterruptPin, event: InterruptEvent) -> Result<bool, CommE> {
        Ok(self.int_map(pin)?.event(event))
    }

    // ==================================================================
    // == Filter Control ================================================
    // ==================================================================
    /// Selects the measurement range.
    pub fn set_range(&mut self, range: Range) -> Result<(), CommE> {
        self.modify::<FilterControl, _>(|filter| filter.set_range(range))
    }

    /// Returns the measurement range.
    pub fn range(&mut self) -> Result<Range, CommE> {
        self.get_checked::<FilterControl, _, _>(|filter| filter.range_or_err())
    }

    /// Selects the anti-aliasing bandwidth.
    pub fn set_bandwidth(&mut self, bandwidth: Bandwidth) -> Result<(), CommE> {
        self.modify::<FilterControl, _>(|filter| filter.set_bandwidth(bandwidth))
    }

    /// Returns the anti-aliasing bandwidth.
    pub fn bandwidth(&mut self) -> Result<Bandwidth, CommE> {
        self.get::<FilterControl, _>(|filter| filter.bandwidth())
    }

    /// Uses `INT2` as the external sampling trigger.
    pub fn set_ext_sampling_trigger(&mut self, enabled: bool) -> Result<(), CommE> {
        self.modify::<FilterControl, _>(|filter| filter.set_ext_sample(enabled))
    }

    /// Returns whether `INT2` is the external sampling trigger.
    pub fn ext_sampling_trigger(&mut self) -> Result<bool, CommE> {
        self.get::<FilterControl, _>(|filter| filter.ext_sample())
    }

    /// Selects the output data rate.
    pub fn set_odr(&mut self, odr: OutputDataRate) -> Result<(), CommE> {
        self.modify::<FilterControl, _>(|filter| filter.set_odr(odr))
    }

    /// Returns the output data rate.
    pub fn odr(&mut self) -> Result<OutputDataRate, CommE> {
        self.get_checked::<FilterControl, _, _>(|filter| filter.odr_or_err())
    }

    // ==================================================================
    // == Power Control =================================================
    // ==================================================================
    /// Uses `INT1` as the external clock.
    pub fn set_ext_clock(&mut self, enabled: bool) -> Result<(), CommE> {
        self.modify::<PowerControl, _>(|power| power.set_ext_clock(enabled))
    }

    /// Returns whether `INT1` is the external clock.
    pub fn ext_clock(&mut self) -> Result<bool, CommE> {
        self.get::<PowerControl, _>(|power| power.ext_clock())
    }

    /// Selects the noise mode.
    pub fn set_noise_mode(&mut self, mode: NoiseMode) -> Result<(), CommE> {
        self.modify::<PowerControl, _>(|power| power.set_noise_mode(mode))
    }

    /// Returns the noise mode.
    pub fn noise_mode(&mut self) -> Result<NoiseMode, CommE> {
        self.get_checked::<PowerControl, _, _>(|power| power.noise_mode_or_err())
    }

    /// Enables or disables wake-up mode.
    pub fn set_wake_up(&mut self, enabled: bool) -> Result<(), CommE> {
        self.modify::<PowerControl, _>(|power| power.set_wake_up(enabled))
    }

    /// Returns whether wake-up mode is enabled.
    pub fn wake_up(&mut self) -> Result<bool, CommE> {
        self.get::<PowerControl, _>(|power| power.wake_up())
    }

    /// Enables or disables autosleep.
    pub fn set_auto_sleep(&mut self, enabled: bool) -> Result<(), CommE> {
        self.modify::<PowerControl, _>(|power| power.set_auto_sleep(enabled))
    }

    /// Returns whether autosleep is enabled.
    pub fn auto_sleep(&mut self) -> Result<bool, CommE> {
        self.get::<PowerControl, _>(|power| power.auto_sleep())
    }

    /// Switches between standby and measurement.
    pub fn set_mode(&mut self, mode: ChipMode) -> Result<(), CommE> {
        self.modify::<PowerControl, _>(|power| power.set_mode(mode))
    }

    /// Returns the chip mode.
    pub fn mode(&mut self) -> Result<ChipMode, CommE> {
        self.get_checked::<PowerControl, _, _>(|power| power.mode_or_err())
    }

    /// Forces the self-test deflection.
    pub fn set_self_test(&mut self, enabled: bool) -> Result<(), CommE> {
        self.modify::<SelfTest, _>(|test| test.set_st(enabled))
    }

    /// Returns whether the self-test deflection is forced.
    pub fn self_test(&mut self) -> Result<bool, CommE> {
        self.get::<SelfTest, _>(|test| test.st())
    }

    // ==================================================================
    // == Activity / Inactivity Detection ===============================
    // ==================================================================
    /// Writes the 11-bit activity threshold code.
    pub fn set_activity_threshold(&mut self, threshold: u16) -> Result<(), CommE> {
        self.write_threshold(REG_THRESH_ACT_L, threshold)
    }

    /// Reads the activity threshold code.
    pub fn activity_threshold(&mut self) -> Result<u16, CommE> {
        self.read_threshold(REG_THRESH_ACT_L)
    }

    /// Converts an activity threshold in g to a register code at the live range.
    pub fn activity_threshold_to_register(&mut self, g: f32) -> Result<u16, CommE> {
        self.threshold_to_register(g)
    }

    /// Converts an activity threshold code to g at the live range.
    pub fn activity_threshold_to_g(&mut self, code: u16) -> Result<f32, CommE> {
        Ok(convert::threshold_to_g(code, self.range()?))
    }

    /// Writes the activity time in samples.
    pub fn set_activity_time(&mut self, samples: u8) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.write_raw(REG_TIME_ACT, &[samples])
    }

    /// Reads the activity time in samples.
    pub fn activity_time(&mut self) -> Result<u8, CommE> {
        self.ensure_initialized()?;
        let mut samples = [0u8; 1];
        self.read_raw(REG_TIME_ACT, &mut samples)?;
        Ok(samples[0])
    }

    /// Converts an activity time in milliseconds to samples at the live ODR.
    pub fn activity_time_to_register(&mut self, ms: f32) -> Result<u8, CommE> {
        Ok(self.time_to_register(ms, u8::MAX as u16)? as u8)
    }

    /// Converts an activity time in samples to milliseconds at the live ODR.
    pub fn activity_time_to_ms(&mut self, samples: u8) -> Result<f32, CommE> {
        Ok(convert::time_to_ms(samples as u16, self.odr()?))
    }

    /// Writes the 11-bit inactivity threshold code.
    pub fn set_inactivity_threshold(&mut self, threshold: u16) -> Result<(), CommE> {
        self.write_threshold(REG_THRESH_INACT_L, threshold)
    }

    /// Reads the inactivity threshold code.
    pub fn inactivity_threshold(&mut self) -> Result<u16, CommE> {
        self.read_threshold(REG_THRESH_INACT_L)
    }

    /// Converts an inactivity threshold in g to a register code at the live range.
    pub fn inactivity_threshold_to_register(&mut self, g: f32) -> Result<u16, CommE> {
        self.threshold_to_register(g)
    }

    /// Converts an inactivity threshold code to g at the live range.
    pub fn inactivity_threshold_to_g(&mut self, code: u16) -> Result<f32, CommE> {
        Ok(convert::threshold_to_g(code, self.range()?))
    }

    /// Writes the 16-bit inactivity time in samples.
    pub fn set_inactivity_time(&mut self, samples: u16) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.write_raw(REG_TIME_INACT_L, &samples.to_le_bytes())
    }

    /// Reads the inactivity time in samples.
    pub fn inactivity_time(&mut self) -> Result<u16, CommE> {
        self.ensure_initialized()?;
        let mut raw = [0u8; 2];
        self.read_raw(REG_TIME_INACT_L, &mut raw)?;
        Ok(u16::from_le_bytes(raw))
    }

    /// Converts an inactivity time in milliseconds to samples at the live ODR.
    pub fn inactivity_time_to_register(&mut self, ms: f32) -> Result<u16, CommE> {
        self.time_to_register(ms, u16::MAX)
    }

    /// Converts an inactivity time in samples to milliseconds at the live ODR.
    pub fn inactivity_time_to_ms(&mut self, samples: u16) -> Result<f32, CommE> {
        Ok(convert::time_to_ms(samples, self.odr()?))
    }

    /// Selects default, linked or looped detection.
    pub fn set_detect_mode(&mut self, mode: DetectMode) -> Result<(), CommE> {
        self.modify::<ActInactControl, _>(|ctl| ctl.set_detect_mode(mode))
    }

    /// Returns the detection mode.
    pub fn detect_mode(&mut self) -> Result<DetectMode, CommE> {
        self.get_checked::<ActInactControl, _, _>(|ctl| ctl.detect_mode_or_err())
    }

    /// Selects absolute or referenced inactivity detection.
    pub fn set_inactivity_trigger(&mut self, trigger: DetectTrigger) -> Result<(), CommE> {
        self.modify::<ActInactControl, _>(|ctl| ctl.set_inactivity_trigger(trigger))
    }

    /// Returns the inactivity detection reference.
    pub fn inactivity_trigger(&mut self) -> Result<DetectTrigger, CommE> {
        self.get::<ActInactControl, _>(|ctl| ctl.inactivity_trigger())
    }

    /// Selects absolute or referenced activity detection.
    pub fn set_activity_trigger(&mut self, trigger: DetectTrigger) -> Result<(), CommE> {
        self.modify::<ActInactControl, _>(|ctl| ctl.set_activity_trigger(trigger))
    }

    /// Returns the activity detection reference.
    pub fn activity_trigger(&mut self) -> Result<DetectTrigger, CommE> {
        self.get::<ActInactControl, _>(|ctl| ctl.activity_trigger())
    }

    /// Enables or disables inactivity detection.
    pub fn set_inactivity_enabled(&mut self, enabled: bool) -> Result<(), CommE> {
        self.modify::<ActInactControl, _>(|ctl| ctl.set_inactivity_enable(enabled))
    }

    /// Returns whether inactivity detection is enabled.
    pub fn inactivity_enabled(&mut self) -> Result<bool, CommE> {
        self.get::<ActInactControl, _>(|ctl| ctl.inactivity_enable())
    }

    /// Enables or disables activity detection.
    pub fn set_activity_enabled(&mut self, enabled: bool) -> Result<(), CommE> {
        self.modify::<ActInactControl, _>(|ctl| ctl.set_activity_enable(enabled))
    }

    /// Returns whether activity detection is enabled.
    pub fn activity_enabled(&mut self) -> Result<bool, CommE> {
        self.get::<ActInactControl, _>(|ctl| ctl.activity_enable())
    }

    // ==================================================================
    // == Data Acquisition & FIFO =======================================
    // ==================================================================
    /// Reads the full-resolution X, Y, Z sample.
    pub fn read(&mut self) -> Result<Acceleration, CommE> {
        self.ensure_initialized()?;
        let mut buf = [0u8; 6];
        self.read_raw(REG_XDATA_L, &mut buf)?;
        let range = self.range()?;

        let raw = [
            i16::from_le_bytes([buf[0], buf[1]]),
            i16::from_le_bytes([buf[2], buf[3]]),
            i16::from_le_bytes([buf[4], buf[5]]),
        ];
        Ok(Acceleration {
            raw,
            g: raw.map(|axis| convert::raw_to_g(axis, range)),
        })
    }

    /// Reads the upper 8 bits of X, Y, Z in a single short burst.
    pub fn read_8msb(&mut self) -> Result<Acceleration8, CommE> {
        let range = self.range()?;
        let mut buf = [0u8; 3];
        self.read_raw(REG_XDATA, &mut buf)?;

        let raw = buf.map(|byte| byte as i8);
        Ok(Acceleration8 {
            raw,
            g: raw.map(|axis| convert::msb_to_g(axis, range)),
        })
    }

    /// Reads the temperature sensor.
    pub fn read_temperature(&mut self) -> Result<Temperature, CommE> {
        self.ensure_initialized()?;
        let mut buf = [0u8; 2];
        self.read_raw(REG_TEMP_L, &mut buf)?;

        let raw = i16::from_le_bytes(buf);
        Ok(Temperature {
            raw,
            celsius: convert::raw_to_celsius(raw),
        })
    }

    /// Drains whole sample sets from the FIFO into `frames`.
    ///
    /// Returns the number of frames written, which never exceeds
    /// `frames.len()` or the FIFO fill level and is always a multiple of the
    /// set size (3, or 4 with temperature). A trailing partial set stays in
    /// the FIFO. The fill level is the 10-bit `FIFO_ENTRIES` field; the
    /// unused upper bits are ignored before the 512-entry clamp.
    pub fn read_fifo(&mut self, frames: &mut [Frame]) -> Result<usize, CommE> {
        let entries = self.fifo_counter()? as usize;
        let available = entries.min(FIFO_CAPACITY).min(frames.len());
        let with_temperature = self.fifo_temperature()?;
        let len = aligned_len(available, with_temperature);
        if len == 0 {
            return Ok(0);
        }

        let bytes = &mut self.fifo_buffer[..len * 2];
        self.interface.read(CMD_READ_FIFO, bytes).map_err(|err| {
            error!("adxl362: read fifo failed.");
            Error::Interface(err)
        })?;
        let range = self.range()?;

        for (frame, entry) in frames.iter_mut().zip(self.fifo_buffer[..len * 2].chunks_exact(2)) {
            *frame = Frame::decode([entry[0], entry[1]], range);
        }
        trace!("adxl362: decoded {=usize} fifo frames.", len);

        Ok(len)
    }

    // ==================================================================
    // == Interrupt Dispatch ============================================
    // ==================================================================
    /// Reads `STATUS` once and reports every asserted event, MSB first.
    ///
    /// On [`StatusEvent::FifoOverrun`] the whole FIFO is drained before
    /// `on_event` runs; a failed drain is logged and dispatch continues.
    /// Meant to be called from the platform's interrupt path.
    pub fn irq_handler<F>(&mut self, mut on_event: F) -> Result<Status, CommE>
    where
        F: FnMut(StatusEvent),
    {
        let status = self.status()?;

        for event in status::asserted(status) {
            if event == StatusEvent::FifoOverrun {
                self.drain_fifo();
            }
            on_event(event);
        }

        Ok(status)
    }

    // ==================================================================
    // == Raw Register Access ===========================================
    // ==================================================================
    /// Reads consecutive registers starting at `register`.
    pub fn read_registers(&mut self, register: u8, buf: &mut [u8]) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.read_raw(register, buf)
    }

    /// Writes consecutive registers starting at `register`.
    pub fn write_registers(&mut self, register: u8, data: &[u8]) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.write_raw(register, data)
    }

    /// Streams raw FIFO bytes into `buf` without decoding them.
    pub fn read_fifo_raw(&mut self, buf: &mut [u8]) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.interface.read(CMD_READ_FIFO, buf).map_err(|err| {
            error!("adxl362: read fifo failed.");
            Error::Interface(err)
        })
    }

    // ==================================================================
    // == Internal Helpers ==============================================
    // ==================================================================
    fn ensure_initialized(&self) -> Result<(), CommE> {
        if self.initialized {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }

    fn probe(&mut self, delay: &mut impl DelayNs) -> Result<(), CommE> {
        let mut ids = [0u8; 3];
        self.read_raw(REG_DEVID_AD, &mut ids)?;

        if ids != [EXPECTED_DEVID_AD, EXPECTED_DEVID_MST, EXPECTED_PART_ID] {
            error!(
                "adxl362: id is invalid ({=u8:#x} {=u8:#x} {=u8:#x}).",
                ids[0],
                ids[1],
                ids[2]
            );
            return Err(Error::DeviceIdMismatch);
        }

        self.reset(delay)
    }

    fn reset(&mut self, delay: &mut impl DelayNs) -> Result<(), CommE> {
        self.write_raw(REG_SOFT_RESET, &[RESET_COMMAND])?;
        delay.delay_ms(SOFT_RESET_DELAY_MS);
        Ok(())
    }

    fn read_raw(&mut self, register: u8, buf: &mut [u8]) -> Result<(), CommE> {
        self.interface
            .read_addressed(read_address(register), buf)
            .map_err(|err| {
                error!("adxl362: read of register {=u8:#x} failed.", register);
                Error::Interface(err)
            })
    }

    fn write_raw(&mut self, register: u8, data: &[u8]) -> Result<(), CommE> {
        self.interface
            .write_addressed(write_address(register), data)
            .map_err(|err| {
                error!("adxl362: write of register {=u8:#x} failed.", register);
                Error::Interface(err)
            })
    }

    fn get<R, T>(&mut self, extract: impl FnOnce(R) -> T) -> Result<T, CommE>
    where
        R: Register,
    {
        self.ensure_initialized()?;
        let mut raw = [0u8; 1];
        self.read_raw(R::ADDRESS, &mut raw)?;
        Ok(extract(R::from(raw[0])))
    }

    fn get_checked<R, T, X>(
        &mut self,
        extract: impl FnOnce(R) -> core::result::Result<T, X>,
    ) -> Result<T, CommE>
    where
        R: Register,
    {
        self.get::<R, _>(extract)?.map_err(|_| {
            warn!("adxl362: register {=u8:#x} holds a reserved encoding.", R::ADDRESS);
            Error::InvalidRegisterValue
        })
    }

    fn modify<R, F>(&mut self, mutate: F) -> Result<(), CommE>
    where
        R: Register,
        F: FnOnce(&mut R),
    {
        self.ensure_initialized()?;
        let mut raw = [0u8; 1];
        self.read_raw(R::ADDRESS, &mut raw)?;

        let mut value = R::from(raw[0]);
        mutate(&mut value);

        self.write_raw(R::ADDRESS, &[value.into()])
    }

    fn modify_int_map<F>(&mut self, pin: InterruptPin, mutate: F) -> Result<(), CommE>
    where
        F: FnOnce(&mut IntMap),
    {
        match pin {
            InterruptPin::Int1 => self.modify::<IntMap1, _>(|map| mutate(&mut map.0)),
            InterruptPin::Int2 => self.modify::<IntMap2, _>(|map| mutate(&mut map.0)),
        }
    }

    fn int_map(&mut self, pin: InterruptPin) -> Result<IntMap, CommE> {
        match pin {
            InterruptPin::Int1 => self.get::<IntMap1, _>(|map| map.0),
            InterruptPin::Int2 => self.get::<IntMap2, _>(|map| map.0),
        }
    }

    fn write_threshold(&mut self, register: u8, threshold: u16) -> Result<(), CommE> {
        self.ensure_initialized()?;
        if threshold > THRESHOLD_MAX {
            warn!("adxl362: threshold {=u16} > 0x7ff.", threshold);
            return Err(Error::OutOfRange);
        }

        self.write_raw(register, &threshold.to_le_bytes())
    }

    fn read_threshold(&mut self, register: u8) -> Result<u16, CommE> {
        self.ensure_initialized()?;
        let mut raw = [0u8; 2];
        self.read_raw(register, &mut raw)?;
        Ok(u16::from_le_bytes(raw) & THRESHOLD_MAX)
    }

    fn threshold_to_register(&mut self, g: f32) -> Result<u16, CommE> {
        self.ensure_initialized()?;
        convert::check_positive(g).map_err(conversion_error)?;
        convert::threshold_to_register(g, self.range()?).map_err(conversion_error)
    }

    fn time_to_register(&mut self, ms: f32, max: u16) -> Result<u16, CommE> {
        self.ensure_initialized()?;
        convert::check_positive(ms).map_err(conversion_error)?;
        convert::time_to_register(ms, self.odr()?, max).map_err(conversion_error)
    }

    fn drain_fifo(&mut self) {
        if self.interface.read(CMD_READ_FIFO, &mut self.fifo_buffer).is_err() {
            warn!("adxl362: fifo drain after overrun failed.");
        }
    }
}

fn invalid_config<E>(err: ConfigError) -> Error<E> {
    warn!("adxl362: config rejected ({}).", err);
    Error::InvalidConfig
}

fn conversion_error<E>(err: ConversionError) -> Error<E> {
    match err {
        ConversionError::NotPositive => warn!("adxl362: conversion input must be positive."),
        ConversionError::Overflow => warn!("adxl362: converted value exceeds the register width."),
    }
    Error::OutOfRange
}
