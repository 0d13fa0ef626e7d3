#![macro_use]
#![cfg_attr(not(feature = "std"), no_std)]
//! Smoothed temperature readings from an NTC thermistor wired as the lower leg of a voltage divider.
//!
//! The driver pulls a configurable number of raw samples from a single ADC channel, averages them,
//! converts the averaged code to a resistance and the resistance to a temperature with the
//! Steinhart-Hart equation. All hardware access goes through small traits so the numeric
//! pipeline runs unchanged against a real ADC or a fake one in tests.
//!
//! # Example
//!
//! ```ignore
//! use smooth_thermistor::drivers::sensors::thermistor::{CalibrationConfig, Thermistor};
//!
//! let config = CalibrationConfig::default().with_samples(16);
//! let mut thermistor = Thermistor::new(adc, delay, config)?;
//!
//! let celsius = thermistor.read_temperature()?;
//! if celsius.is_finite() {
//!     info!("temperature: {}", celsius);
//! }
//! ```

pub(crate) mod fmt;

pub mod domain;

pub mod traits;

pub mod drivers;

pub mod shared;

pub use drivers::sensors::thermistor::{
    CalibrationConfig, ConfigError, SteinhartHart, Thermistor, ThermistorError, Unit,
};
pub use shared::Shared;
