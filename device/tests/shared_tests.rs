#[cfg(feature = "std")]
mod tests {
    extern crate std;

    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use futures::executor::block_on;
    use smooth_thermistor::drivers::sensors::thermistor::{CalibrationConfig, Thermistor};
    use smooth_thermistor::traits::adc::AsyncAdcSource;
    use smooth_thermistor::Shared;

    struct Ramp {
        next: u16,
    }

    impl AsyncAdcSource for Ramp {
        type Error = ();
        async fn read_raw(&mut self) -> Result<u16, Self::Error> {
            let code = self.next;
            self.next += 1;
            Ok(code)
        }
    }

    struct NoDelay;

    impl embedded_hal_async::delay::DelayNs for NoDelay {
        async fn delay_ns(&mut self, _: u32) {}
    }

    fn shared() -> Shared<NoopRawMutex, Thermistor<Ramp, NoDelay>> {
        let config = CalibrationConfig::default().with_samples(4);
        Shared::new(Thermistor::new(Ramp { next: 500 }, NoDelay, config).unwrap())
    }

    #[test]
    fn test_readings_do_not_interleave() {
        let thermistor = shared();

        // 500..=503, then 504..=507
        let a = block_on(thermistor.read_temperature()).unwrap();
        let b = block_on(thermistor.read_temperature()).unwrap();

        let config = CalibrationConfig::default();
        assert_eq!(config.convert(501.5), a);
        assert_eq!(config.convert(505.5), b);
        assert!(b > a);
    }

    #[test]
    fn test_concurrent_readers_are_serialised() {
        let thermistor = shared();

        let (a, b) = block_on(futures::future::join(
            thermistor.read_celsius(),
            thermistor.read_celsius(),
        ));
        let (a, b) = (a.unwrap().raw_value(), b.unwrap().raw_value());

        let config = CalibrationConfig::default();
        let mut readings = [a, b];
        readings.sort_by(|x, y| x.partial_cmp(y).unwrap());
        assert_eq!([config.convert(501.5), config.convert(505.5)], readings);
    }

    #[test]
    fn test_try_lock_while_reading() {
        let thermistor = shared();
        let guard = thermistor.try_lock().ok().unwrap();
        assert!(thermistor.try_lock().is_err());
        drop(guard);
        assert!(thermistor.try_lock().is_ok());
    }
}
