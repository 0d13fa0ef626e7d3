use crate::domain::temperature::{Celsius, Kelvin, Temperature};
use core::fmt::{Display, Formatter};
#[allow(unused_imports)]
use micromath::F32Ext;
use serde::{Deserialize, Serialize};

pub const ADC_SIZE_8_BIT: u8 = 8;
pub const ADC_SIZE_10_BIT: u8 = 10;
pub const ADC_SIZE_12_BIT: u8 = 12;
pub const ADC_SIZE_16_BIT: u8 = 16;

/// Raw samples are `u16`, so no wider converter can be described.
pub const MAX_ADC_RESOLUTION_BITS: u8 = 16;

pub const DEFAULT_SERIES_RESISTANCE: u32 = 10_000;
pub const DEFAULT_SAMPLES: u16 = 10;
pub const DEFAULT_SAMPLE_DELAY_MS: u32 = 10;

/// Coefficients of `1/T = A + B·ln(R) + C·ln(R)³`, with `T` in kelvin and `R` in ohms.
///
/// Generate them from three (temperature, resistance) pairs of the part's datasheet with any
/// NTC calculator fitting the standard equation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SteinhartHart {
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl SteinhartHart {
    /// Delphi 12146312 coolant temperature sensor.
    #[allow(clippy::excessive_precision)]
    pub const DELPHI_12146312: Self = Self {
        a: 0.002108508173,
        b: 0.000079792,
        c: 0.0000006535076315,
    };

    pub const fn new(a: f32, b: f32, c: f32) -> Self {
        Self { a, b, c }
    }

    /// Absolute temperature for a thermistor resistance.
    ///
    /// A resistance that is not strictly positive has no logarithm and yields `NaN`.
    pub fn kelvin(&self, resistance: f32) -> Temperature<Kelvin> {
        if resistance.is_nan() || resistance <= 0.0 {
            return Temperature::new(f32::NAN);
        }
        let ln_r = resistance.ln();
        let inverse = self.a + self.b * ln_r + self.c * ln_r * ln_r * ln_r;
        Temperature::new(1.0 / inverse)
    }

    pub fn celsius(&self, resistance: f32) -> Temperature<Celsius> {
        self.kelvin(resistance).into_celsius()
    }
}

impl Default for SteinhartHart {
    fn default() -> Self {
        Self::DELPHI_12146312
    }
}

/// Unit of the values returned by [`Thermistor::read_temperature`](super::Thermistor::read_temperature).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Unit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl Unit {
    pub const fn letter(&self) -> char {
        match self {
            Unit::Celsius => 'C',
            Unit::Fahrenheit => 'F',
        }
    }

    pub fn value_of(&self, temperature: Temperature<Celsius>) -> f32 {
        match self {
            Unit::Celsius => temperature.raw_value(),
            Unit::Fahrenheit => temperature.into_fahrenheit().raw_value(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `sample_count` is zero, there is nothing to average.
    NoSamples,
    /// `adc_resolution_bits` is outside `1..=16`.
    InvalidResolution(u8),
    /// `series_resistance` is zero.
    InvalidSeriesResistance,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::NoSamples => f.write_str("sample count must be at least 1"),
            ConfigError::InvalidResolution(bits) => {
                write!(f, "unsupported ADC resolution of {} bits", bits)
            }
            ConfigError::InvalidSeriesResistance => {
                f.write_str("series resistance must be non-zero")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Calibration of one thermistor channel.
///
/// Wiring: the thermistor sits between the supply and the ADC pin, the series resistor between
/// the pin and ground. The resistance is recovered as
/// `series_resistance * (full_scale / average_code - 1)`.
///
/// Only the structural fields are checked by [`validate`](Self::validate). The Steinhart-Hart
/// coefficients are taken as given; fitting them to the part is the caller's job.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationConfig {
    /// Fixed resistor of the divider, in ohms.
    pub series_resistance: u32,
    pub adc_resolution_bits: u8,
    pub coefficients: SteinhartHart,
    /// Raw samples averaged into one reading.
    pub sample_count: u16,
    /// Settle time after each sample.
    pub sample_delay_ms: u32,
    pub unit: Unit,
}

impl CalibrationConfig {
    pub const fn new() -> Self {
        Self {
            series_resistance: DEFAULT_SERIES_RESISTANCE,
            adc_resolution_bits: ADC_SIZE_10_BIT,
            coefficients: SteinhartHart::DELPHI_12146312,
            sample_count: DEFAULT_SAMPLES,
            sample_delay_ms: DEFAULT_SAMPLE_DELAY_MS,
            unit: Unit::Celsius,
        }
    }

    pub const fn with_series_resistance(mut self, ohms: u32) -> Self {
        self.series_resistance = ohms;
        self
    }

    pub const fn with_adc_resolution(mut self, bits: u8) -> Self {
        self.adc_resolution_bits = bits;
        self
    }

    pub const fn with_coefficients(mut self, coefficients: SteinhartHart) -> Self {
        self.coefficients = coefficients;
        self
    }

    pub const fn with_samples(mut self, samples: u16) -> Self {
        self.sample_count = samples;
        self
    }

    pub const fn with_sample_delay_ms(mut self, ms: u32) -> Self {
        self.sample_delay_ms = ms;
        self
    }

    pub const fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub const fn fahrenheit(self) -> Self {
        self.with_unit(Unit::Fahrenheit)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_count == 0 {
            return Err(ConfigError::NoSamples);
        }
        if self.adc_resolution_bits == 0 || self.adc_resolution_bits > MAX_ADC_RESOLUTION_BITS {
            return Err(ConfigError::InvalidResolution(self.adc_resolution_bits));
        }
        if self.series_resistance == 0 {
            return Err(ConfigError::InvalidSeriesResistance);
        }
        Ok(())
    }

    /// Highest code the converter produces, `2^bits - 1`.
    pub fn full_scale(&self) -> f32 {
        ((1u64 << self.adc_resolution_bits.min(32)) - 1) as f32
    }

    /// Thermistor resistance in ohms for an averaged ADC code.
    ///
    /// An average of zero (open divider, pin pulled to ground) is floored to `1` so the
    /// division stays finite. The result is meaningless but never a fault.
    pub fn resistance(&self, average_code: f32) -> f32 {
        let average_code = if average_code == 0.0 { 1.0 } else { average_code };
        self.series_resistance as f32 * ((self.full_scale() / average_code) - 1.0)
    }

    pub fn celsius(&self, average_code: f32) -> Temperature<Celsius> {
        self.coefficients.celsius(self.resistance(average_code))
    }

    /// Temperature for an averaged ADC code, in the configured unit.
    pub fn convert(&self, average_code: f32) -> f32 {
        self.unit.value_of(self.celsius(average_code))
    }
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(actual: f32, expected: f32, tolerance: f32) -> bool {
        (actual - expected).abs() < tolerance
    }

    #[test]
    fn test_defaults() {
        let config = CalibrationConfig::default();
        assert_eq!(10_000, config.series_resistance);
        assert_eq!(10, config.adc_resolution_bits);
        assert_eq!(10, config.sample_count);
        assert_eq!(10, config.sample_delay_ms);
        assert_eq!(Unit::Celsius, config.unit);
        assert_eq!(SteinhartHart::DELPHI_12146312, config.coefficients);
        assert_eq!(Ok(()), config.validate());
    }

    #[test]
    fn test_full_scale() {
        let config = CalibrationConfig::new();
        assert_eq!(1023.0, config.with_adc_resolution(ADC_SIZE_10_BIT).full_scale());
        assert_eq!(255.0, config.with_adc_resolution(ADC_SIZE_8_BIT).full_scale());
        assert_eq!(4095.0, config.with_adc_resolution(ADC_SIZE_12_BIT).full_scale());
        assert_eq!(65535.0, config.with_adc_resolution(ADC_SIZE_16_BIT).full_scale());
    }

    #[test]
    fn test_validate() {
        let config = CalibrationConfig::new();
        assert_eq!(Err(ConfigError::NoSamples), config.with_samples(0).validate());
        assert_eq!(
            Err(ConfigError::InvalidResolution(0)),
            config.with_adc_resolution(0).validate()
        );
        assert_eq!(
            Err(ConfigError::InvalidResolution(17)),
            config.with_adc_resolution(17).validate()
        );
        assert_eq!(
            Err(ConfigError::InvalidSeriesResistance),
            config.with_series_resistance(0).validate()
        );
        // Nonsense coefficients are the caller's business.
        assert_eq!(
            Ok(()),
            config
                .with_coefficients(SteinhartHart::new(-1.0, 0.0, f32::NAN))
                .validate()
        );
    }

    #[test]
    fn test_resistance_mid_scale() {
        let config = CalibrationConfig::new();
        assert!(close(config.resistance(512.0), 9980.469, 0.01));
    }

    #[test]
    fn test_resistance_zero_guard() {
        let config = CalibrationConfig::new();
        assert_eq!(config.resistance(1.0), config.resistance(0.0));
        assert_eq!(10_000.0 * 1022.0, config.resistance(0.0));
    }

    #[test]
    fn test_room_temperature() {
        let config = CalibrationConfig::new();
        let t = config.celsius(512.0).raw_value();
        assert!(t > 15.0 && t < 35.0);
        assert!(close(t, 25.043, 0.05));
    }

    #[test]
    fn test_known_points() {
        let sh = SteinhartHart::DELPHI_12146312;
        assert!(close(sh.celsius(92_300.0).raw_value(), -22.98, 0.05));
        assert!(close(sh.celsius(24_100.0).raw_value(), 5.80, 0.05));
        assert!(close(sh.celsius(1_366.67).raw_value(), 68.08, 0.05));
    }

    #[test]
    fn test_zero_average_is_finite() {
        let config = CalibrationConfig::new();
        let t = config.celsius(0.0);
        assert!(t.is_finite());
        assert!(close(t.raw_value(), -110.39, 0.1));
    }

    #[test]
    fn test_non_positive_resistance_is_nan() {
        let config = CalibrationConfig::new();
        // Full scale gives zero ohms, above full scale a negative resistance.
        assert!(config.convert(1023.0).is_nan());
        assert!(config.convert(1100.0).is_nan());
        assert!(SteinhartHart::default().kelvin(f32::NAN).raw_value().is_nan());
    }

    #[test]
    fn test_fahrenheit() {
        let config = CalibrationConfig::new();
        let c = config.convert(512.0);
        let f = config.fahrenheit().convert(512.0);
        assert!(close(f, c * 9.0 / 5.0 + 32.0, 0.001));
        assert!(close(f, 77.08, 0.1));
    }

    #[test]
    fn test_unit_letter() {
        assert_eq!('C', Unit::Celsius.letter());
        assert_eq!('F', Unit::Fahrenheit.letter());
    }
}
