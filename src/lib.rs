#![no_std]
//! Platform-agnostic driver for the Analog Devices ADXL362 accelerometer.
//!
//! The driver talks to the chip through an [`interface::Adxl362Interface`]
//! implementation; [`interface::spi::SpiInterface`] adapts any
//! `embedded-hal` 1.0 `SpiDevice`.

#[macro_use]
mod log;

mod error;

pub mod config;
pub mod convert;
pub mod device;
pub mod fifo;
pub mod info;
pub mod interface;
pub mod params;
pub mod registers;
pub mod status;

pub use crate::device::{Acceleration, Acceleration8, Adxl362, Temperature};
pub use crate::error::{Error, Result};
