//! Sampling source for a single analog input channel.
//!
//! `embedded-hal` 1.0 has no ADC abstraction, so the driver asks for the smallest thing it
//! needs: one raw conversion per call. Implement it on top of whatever the HAL offers, e.g.
//!
//! ```ignore
//! struct Ntc<'d> {
//!     adc: embassy_rp::adc::Adc<'d, embassy_rp::adc::Blocking>,
//!     channel: embassy_rp::adc::Channel<'d>,
//! }
//!
//! impl AdcSource for Ntc<'_> {
//!     type Error = embassy_rp::adc::Error;
//!     fn read_raw(&mut self) -> Result<u16, Self::Error> {
//!         self.adc.blocking_read(&mut self.channel)
//!     }
//! }
//! ```

use core::future::Future;

/// Blocking sampling source.
pub trait AdcSource {
    type Error;

    /// Perform one conversion and return the raw code, `0..=2^bits - 1`.
    fn read_raw(&mut self) -> Result<u16, Self::Error>;
}

impl<T: AdcSource + ?Sized> AdcSource for &mut T {
    type Error = T::Error;

    fn read_raw(&mut self) -> Result<u16, Self::Error> {
        T::read_raw(self)
    }
}

/// Async sampling source, for HALs whose conversions complete on an interrupt.
pub trait AsyncAdcSource {
    type Error;

    /// Perform one conversion and return the raw code, `0..=2^bits - 1`.
    fn read_raw(&mut self) -> impl Future<Output = Result<u16, Self::Error>>;
}

impl<T: AsyncAdcSource + ?Sized> AsyncAdcSource for &mut T {
    type Error = T::Error;

    async fn read_raw(&mut self) -> Result<u16, Self::Error> {
        T::read_raw(self).await
    }
}
