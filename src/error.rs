//! Error handling primitives for the ADXL362 driver.

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Any error reported by the underlying bus interface.
    Interface(E),
    /// The driver has not been initialized with [`init`](crate::Adxl362::init).
    NotInitialized,
    /// A caller-supplied value lies outside the range the register can hold.
    OutOfRange,
    /// The identification registers do not match the ADXL362 signature.
    DeviceIdMismatch,
    /// A register field holds an encoding the datasheet marks as reserved.
    InvalidRegisterValue,
    /// The provided configuration parameters are invalid.
    InvalidConfig,
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Self::Interface(err)
    }
}
