//! Static chip and driver description.

/// Datasheet envelope and driver identification for the ADXL362.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Info {
    /// Chip name.
    pub chip_name: &'static str,
    /// Manufacturer name.
    pub manufacturer_name: &'static str,
    /// Host interface.
    pub interface: &'static str,
    /// Minimum supply voltage in volts.
    pub supply_voltage_min_v: f32,
    /// Maximum supply voltage in volts.
    pub supply_voltage_max_v: f32,
    /// Maximum supply current in milliamps.
    pub max_current_ma: f32,
    /// Minimum operating temperature in °C.
    pub temperature_min: f32,
    /// Maximum operating temperature in °C.
    pub temperature_max: f32,
    /// Driver version, major × 1000 + minor × 100 + patch.
    pub driver_version: u32,
}

impl Info {
    /// Returns the ADXL362 description.
    pub const fn adxl362() -> Self {
        Self {
            chip_name: "Analog Devices ADXL362",
            manufacturer_name: "Analog Devices",
            interface: "SPI",
            supply_voltage_min_v: 1.6,
            supply_voltage_max_v: 3.5,
            max_current_ma: 0.013,
            temperature_min: -40.0,
            temperature_max: 85.0,
            driver_version: 1000,
        }
    }
}
