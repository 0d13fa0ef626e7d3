//! Smoothed NTC thermistor readings.
//!
//! Every reading takes `sample_count` raw conversions with a settle delay after each one,
//! averages them, and runs the average through the voltage divider and the Steinhart-Hart
//! equation. Nothing is remembered between readings apart from the configuration.
mod calibration;

pub use calibration::*;

use crate::domain::temperature::{Celsius, Temperature};
use crate::traits::adc::{AdcSource, AsyncAdcSource};
use crate::traits::reference::{NoReference, Reference, ReferenceSelector};
use crate::traits::sensors::temperature::TemperatureSensor;
use core::fmt::{Debug, Display, Formatter};
use embedded_hal::delay::DelayNs;
use embedded_hal_async::delay::DelayNs as AsyncDelayNs;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ThermistorError<E> {
    /// The sampling source failed; the reading was abandoned.
    Adc(E),
}

impl<E> From<E> for ThermistorError<E> {
    fn from(e: E) -> ThermistorError<E> {
        ThermistorError::Adc(e)
    }
}

impl<E: Debug> Display for ThermistorError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ThermistorError::Adc(e) => write!(f, "ADC read failed: {:?}", e),
        }
    }
}

#[cfg(feature = "std")]
impl<E: Debug> std::error::Error for ThermistorError<E> {}

/// Thermistor on one ADC channel.
///
/// `A` is the sampling source, `D` the delay used to let the input settle between samples and
/// `R` the reference voltage selector. The blocking `read_*` methods need an [`AdcSource`] and a
/// blocking [`DelayNs`]; the `*_async` variants an [`AsyncAdcSource`] and an async delay.
///
/// Readings are not checked for plausibility. A disconnected sensor still produces a finite
/// value and a source returning codes above full scale produces `NaN`.
pub struct Thermistor<A, D, R = NoReference> {
    adc: A,
    delay: D,
    reference: R,
    config: CalibrationConfig,
    sampled: bool,
}

impl<A, D> Thermistor<A, D, NoReference> {
    pub fn new(adc: A, delay: D, config: CalibrationConfig) -> Result<Self, ConfigError> {
        Self::with_reference(adc, delay, NoReference, config)
    }
}

impl<A, D, R> Thermistor<A, D, R> {
    pub fn with_reference(
        adc: A,
        delay: D,
        reference: R,
        config: CalibrationConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(
            "thermistor: {} ohm series, {} bit ADC, {} samples every {} ms",
            config.series_resistance,
            config.adc_resolution_bits,
            config.sample_count,
            config.sample_delay_ms
        );
        Ok(Self {
            adc,
            delay,
            reference,
            config,
            sampled: false,
        })
    }

    pub fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    /// Give back the hardware handles.
    pub fn release(self) -> (A, D, R) {
        (self.adc, self.delay, self.reference)
    }

    fn average(&self, sum: u32) -> f32 {
        (sum as f64 / self.config.sample_count as f64) as f32
    }

    fn convert(&self, average: f32) -> Temperature<Celsius> {
        if average == 0.0 {
            warn!("thermistor: all samples read 0, sensor disconnected?");
        }
        let resistance = self.config.resistance(average);
        let celsius = self.config.coefficients.celsius(resistance);
        trace!(
            "thermistor: average {} -> {} ohm -> {} C",
            average,
            resistance,
            celsius.raw_value()
        );
        celsius
    }
}

impl<A, D, R> Thermistor<A, D, R>
where
    R: ReferenceSelector,
{
    /// Switch the ADC between its default and the external reference.
    ///
    /// Call this before the first reading: samples taken earlier were measured against the
    /// other reference and the coefficients assume one fixed scale.
    pub fn configure_reference(&mut self, external: bool) -> Result<(), R::Error> {
        let reference = Reference::from(external);
        if self.sampled {
            warn!("thermistor: reference changed after sampling started");
        }
        self.reference.set_reference(reference)
    }
}

impl<A, D, R> Thermistor<A, D, R>
where
    A: AdcSource,
    D: DelayNs,
{
    /// Average of `sample_count` raw codes.
    pub fn read_average(&mut self) -> Result<f32, ThermistorError<A::Error>> {
        self.sampled = true;
        let mut sum: u32 = 0;
        for _ in 0..self.config.sample_count {
            sum += u32::from(self.adc.read_raw()?);
            self.delay.delay_ms(self.config.sample_delay_ms);
        }
        Ok(self.average(sum))
    }

    /// Thermistor resistance in ohms.
    pub fn read_resistance(&mut self) -> Result<f32, ThermistorError<A::Error>> {
        let average = self.read_average()?;
        Ok(self.config.resistance(average))
    }

    pub fn read_celsius(&mut self) -> Result<Temperature<Celsius>, ThermistorError<A::Error>> {
        let average = self.read_average()?;
        Ok(self.convert(average))
    }

    /// Temperature in the configured [`Unit`].
    pub fn read_temperature(&mut self) -> Result<f32, ThermistorError<A::Error>> {
        let celsius = self.read_celsius()?;
        Ok(self.config.unit.value_of(celsius))
    }
}

impl<A, D, R> Thermistor<A, D, R>
where
    A: AsyncAdcSource,
    D: AsyncDelayNs,
{
    pub async fn read_average_async(&mut self) -> Result<f32, ThermistorError<A::Error>> {
        self.sampled = true;
        let mut sum: u32 = 0;
        for _ in 0..self.config.sample_count {
            sum += u32::from(self.adc.read_raw().await?);
            self.delay.delay_ms(self.config.sample_delay_ms).await;
        }
        Ok(self.average(sum))
    }

    pub async fn read_celsius_async(
        &mut self,
    ) -> Result<Temperature<Celsius>, ThermistorError<A::Error>> {
        let average = self.read_average_async().await?;
        Ok(self.convert(average))
    }

    pub async fn read_temperature_async(&mut self) -> Result<f32, ThermistorError<A::Error>> {
        let celsius = self.read_celsius_async().await?;
        Ok(self.config.unit.value_of(celsius))
    }
}

impl<A, D, R> TemperatureSensor<Celsius> for Thermistor<A, D, R>
where
    A: AsyncAdcSource,
    D: AsyncDelayNs,
{
    type Error = ThermistorError<A::Error>;

    async fn temperature(&mut self) -> Result<Temperature<Celsius>, Self::Error> {
        self.read_celsius_async().await
    }
}
