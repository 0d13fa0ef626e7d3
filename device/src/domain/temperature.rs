//! Types and traits related to temperature.

use core::fmt::{Debug, Display, Formatter};
use core::marker::PhantomData;
use core::ops::{Add, Sub};

/// Offset between the _Kelvin_ and _Celsius_ scales.
pub const KELVIN_OFFSET: f32 = 273.15;

/// Trait representing a temperature scale.
pub trait TemperatureScale: Send {
    const LETTER: char;
}

/// Discriminant for the _Kelvin_ temperature scale.
#[derive(Clone)]
pub struct Kelvin;

impl TemperatureScale for Kelvin {
    const LETTER: char = 'K';
}

impl Debug for Kelvin {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str("°K")
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Kelvin {
    fn format(&self, f: defmt::Formatter<'_>) {
        defmt::write!(f, "°K");
    }
}

/// Discriminant for the _Celsius_ temperature scale.
#[derive(Clone)]
pub struct Celsius;

impl Debug for Celsius {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str("°C")
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Celsius {
    fn format(&self, f: defmt::Formatter<'_>) {
        defmt::write!(f, "°C");
    }
}

impl TemperatureScale for Celsius {
    const LETTER: char = 'C';
}

/// Discriminant for the _Fahrenheit_ temperature scale.
#[derive(Clone)]
pub struct Fahrenheit;

impl Debug for Fahrenheit {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str("°F")
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Fahrenheit {
    fn format(&self, f: defmt::Formatter<'_>) {
        defmt::write!(f, "°F");
    }
}

impl TemperatureScale for Fahrenheit {
    const LETTER: char = 'F';
}

/// A temperature value with its associated scale.
///
/// The value is not checked: a thermistor reading that fell outside the domain of
/// the conversion carries `NaN` and must be filtered with [`Temperature::is_finite`].
pub struct Temperature<S: TemperatureScale> {
    value: f32,
    _marker: PhantomData<S>,
}

impl<S: TemperatureScale> Clone for Temperature<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: TemperatureScale> Copy for Temperature<S> {}

impl<S: TemperatureScale> PartialEq for Temperature<S> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<S: TemperatureScale> PartialOrd for Temperature<S> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<S: TemperatureScale> Debug for Temperature<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}°{}", &self.value, S::LETTER)
    }
}

#[cfg(feature = "defmt")]
impl<S: TemperatureScale> defmt::Format for Temperature<S> {
    fn format(&self, f: defmt::Formatter<'_>) {
        defmt::write!(f, "{}°{}", &self.value, S::LETTER)
    }
}

impl<S: TemperatureScale> Temperature<S> {
    pub const fn new(value: f32) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub fn raw_value(&self) -> f32 {
        self.value
    }

    /// False for readings that ran into the logarithm domain or an infinite resistance.
    pub fn is_finite(&self) -> bool {
        self.value.is_finite()
    }
}

impl Temperature<Kelvin> {
    pub fn into_celsius(self) -> Temperature<Celsius> {
        Temperature::new(self.value - KELVIN_OFFSET)
    }
}

impl Temperature<Celsius> {
    pub fn into_kelvin(self) -> Temperature<Kelvin> {
        Temperature::new(self.value + KELVIN_OFFSET)
    }

    pub fn into_fahrenheit(self) -> Temperature<Fahrenheit> {
        Temperature::new((self.value * 9.0 / 5.0) + 32.0)
    }
}

impl Temperature<Fahrenheit> {
    pub fn into_celsius(self) -> Temperature<Celsius> {
        Temperature::new((self.value - 32.0) * 5.0 / 9.0)
    }
}

impl From<i16> for Temperature<Celsius> {
    fn from(value: i16) -> Self {
        Temperature::new(value as f32)
    }
}

impl From<f32> for Temperature<Celsius> {
    fn from(value: f32) -> Self {
        Temperature::new(value)
    }
}

impl<S: TemperatureScale> Sub for Temperature<S> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.value - rhs.value)
    }
}

impl<S: TemperatureScale> Add<f32> for Temperature<S> {
    type Output = Self;

    fn add(self, rhs: f32) -> Self::Output {
        Self::new(self.value + rhs)
    }
}

impl<S: TemperatureScale> Display for Temperature<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        Display::fmt(&self.value, f)?;
        write!(f, "°{}", S::LETTER)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use super::*;
    use std::format;

    #[test]
    fn test_kelvin_to_celsius() {
        let t = Temperature::<Kelvin>::new(298.15).into_celsius();
        assert!((t.raw_value() - 25.0).abs() < 0.001);
    }

    #[test]
    fn test_fahrenheit_uses_real_ratio() {
        let f = Temperature::<Celsius>::new(25.0).into_fahrenheit();
        assert!((f.raw_value() - 77.0).abs() < 0.001);

        let f = Temperature::<Celsius>::new(-40.0).into_fahrenheit();
        assert!((f.raw_value() + 40.0).abs() < 0.001);

        let c = Temperature::<Fahrenheit>::new(212.0).into_celsius();
        assert!((c.raw_value() - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_display() {
        let t: Temperature<Celsius> = 21.5f32.into();
        assert_eq!("21.5°C", format!("{}", t));
        assert_eq!("21.5°C", format!("{:?}", t));
    }

    #[test]
    fn test_nan_is_not_finite() {
        let t = Temperature::<Celsius>::new(f32::NAN);
        assert!(!t.is_finite());
        assert!(Temperature::<Celsius>::new(-110.4).is_finite());
    }
}
