//! SHT3x-ARP, the analog output variant.
//!
//! Both outputs are ratiometric to the supply voltage and are read through
//! two ADC channels.

use crate::{Error, Sample, SensorDriver};
use core::fmt::Debug;

/// Blocking analog-to-digital conversion of a pin
pub trait AnalogInput {
    type Error: Debug;

    /// Raw reading of `pin`, right aligned to the configured resolution
    fn read(&mut self, pin: u8) -> Result<u16, Self::Error>;
}

pub struct Sht3xAnalog<A> {
    input: A,
    humidity_pin: u8,
    temperature_pin: u8,
    read_resolution_bits: u8,
    sample: Sample,
}

impl<A: AnalogInput> Sht3xAnalog<A> {
    pub const DEFAULT_READ_RESOLUTION_BITS: u8 = 10;

    pub fn new(input: A, humidity_pin: u8, temperature_pin: u8) -> Self {
        Self::with_resolution(
            input,
            humidity_pin,
            temperature_pin,
            Self::DEFAULT_READ_RESOLUTION_BITS,
        )
    }

    /// For ADCs reading more than the default 10 bits, e.g. 12
    pub fn with_resolution(
        input: A,
        humidity_pin: u8,
        temperature_pin: u8,
        read_resolution_bits: u8,
    ) -> Self {
        Sht3xAnalog {
            input,
            humidity_pin,
            temperature_pin,
            read_resolution_bits: read_resolution_bits.clamp(1, 16),
            sample: Sample::INVALID,
        }
    }

    pub fn read_humidity(&mut self) -> Result<f32, Error<A::Error>> {
        let raw = self.input.read(self.humidity_pin)?;
        Ok(-12.5 + 125.0 * self.ratio(raw))
    }

    pub fn read_temperature(&mut self) -> Result<f32, Error<A::Error>> {
        let raw = self.input.read(self.temperature_pin)?;
        Ok(-66.875 + 218.75 * self.ratio(raw))
    }

    pub fn release(self) -> A {
        self.input
    }

    fn ratio(&self, raw: u16) -> f32 {
        let max = ((1u32 << self.read_resolution_bits) - 1) as f32;
        raw as f32 / max
    }
}

impl<A: AnalogInput> SensorDriver for Sht3xAnalog<A> {
    type Error = A::Error;

    fn read_sample(&mut self) -> Result<Sample, Error<A::Error>> {
        let humidity = self.read_humidity()?;
        let temperature = self.read_temperature()?;
        self.sample = Sample {
            temperature,
            humidity,
        };
        Ok(self.sample)
    }

    fn sample(&self) -> Sample {
        self.sample
    }
}
