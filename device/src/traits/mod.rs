pub mod adc;
pub mod reference;
pub mod sensors;
