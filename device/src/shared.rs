//! Serialised access to a reader from several tasks.
//!
//! A thermistor reading is a sequence of conversions on one channel; interleaving two of them
//! would mix their samples. `Shared` keeps the reader behind an async mutex so a reading always
//! completes before the next one starts.

use crate::domain::temperature::{Celsius, Temperature};
use crate::drivers::sensors::thermistor::{Thermistor, ThermistorError};
use crate::traits::adc::AsyncAdcSource;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::{Mutex, MutexGuard, TryLockError};
use embedded_hal_async::delay::DelayNs;

pub struct Shared<M: RawMutex, T> {
    t: Mutex<M, T>,
}

impl<M: RawMutex, T> Shared<M, T> {
    pub const fn new(t: T) -> Self {
        Self { t: Mutex::new(t) }
    }

    pub async fn lock(&self) -> MutexGuard<'_, M, T> {
        self.t.lock().await
    }

    pub fn try_lock(&self) -> Result<MutexGuard<'_, M, T>, TryLockError> {
        self.t.try_lock()
    }
}

impl<M, A, D, R> Shared<M, Thermistor<A, D, R>>
where
    M: RawMutex,
    A: AsyncAdcSource,
    D: DelayNs,
{
    /// Wait for any reading in progress, then take one in the configured unit.
    pub async fn read_temperature(&self) -> Result<f32, ThermistorError<A::Error>> {
        self.lock().await.read_temperature_async().await
    }

    pub async fn read_celsius(&self) -> Result<Temperature<Celsius>, ThermistorError<A::Error>> {
        self.lock().await.read_celsius_async().await
    }
}
