//! Selection of the voltage the ADC measures against.
//!
//! Which reference is available depends on the chip family: AVR parts can switch to the
//! AREF pin, ESP32/ESP8266 have nothing to select. Pick the strategy when wiring up the
//! board instead of branching inside the driver.

use core::convert::Infallible;

/// ADC reference voltage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reference {
    /// The chip's default, usually the supply rail.
    Default,
    /// An external voltage applied to the reference pin.
    External,
}

impl From<bool> for Reference {
    fn from(external: bool) -> Self {
        if external {
            Reference::External
        } else {
            Reference::Default
        }
    }
}

pub trait ReferenceSelector {
    type Error;
    fn set_reference(&mut self, reference: Reference) -> Result<(), Self::Error>;
}

impl<T: ReferenceSelector + ?Sized> ReferenceSelector for &mut T {
    type Error = T::Error;

    fn set_reference(&mut self, reference: Reference) -> Result<(), Self::Error> {
        T::set_reference(self, reference)
    }
}

/// For hosts without a selectable reference. Every request succeeds and does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoReference;

impl ReferenceSelector for NoReference {
    type Error = Infallible;

    fn set_reference(&mut self, _: Reference) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Plugs a closure in as the selector, typically one poking the HAL's reference register.
pub struct FnReference<F> {
    f: F,
}

impl<F> FnReference<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F, E> ReferenceSelector for FnReference<F>
where
    F: FnMut(Reference) -> Result<(), E>,
{
    type Error = E;

    fn set_reference(&mut self, reference: Reference) -> Result<(), Self::Error> {
        (self.f)(reference)
    }
}

