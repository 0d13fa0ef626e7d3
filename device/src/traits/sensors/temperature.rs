use crate::domain::temperature::{Temperature, TemperatureScale};
use core::future::Future;

pub trait TemperatureSensor<T: TemperatureScale> {
    type Error;

    fn temperature(&mut self) -> impl Future<Output = Result<Temperature<T>, Self::Error>>;
}
