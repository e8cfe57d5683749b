use crate::Error;
use core::fmt::Debug;

/// Value reported as temperature before a sample was read
pub const TEMPERATURE_INVALID: f32 = f32::NAN;
/// Value reported as humidity before a sample was read
pub const HUMIDITY_INVALID: f32 = f32::NAN;

/// Accuracy setting of a measurement.
/// Not all sensors support changing the sampling accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Accuracy {
    /// Highest repeatability at the cost of slower measurement
    High,
    /// Balanced repeatability and speed of measurement
    Medium,
    /// Fastest measurement but lowest repeatability
    Low,
}

/// One temperature and humidity reading
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    /// Degrees celsius
    pub temperature: f32,
    /// Relative humidity in percent
    pub humidity: f32,
}

impl Sample {
    pub const INVALID: Sample = Sample {
        temperature: TEMPERATURE_INVALID,
        humidity: HUMIDITY_INVALID,
    };

    pub fn is_valid(&self) -> bool {
        !self.temperature.is_nan() && !self.humidity.is_nan()
    }
}

impl Default for Sample {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Capabilities shared by all SHT sensor drivers
pub trait SensorDriver {
    type Error: Debug;

    /// Reads a new sample and caches it.
    /// The cached sample is left untouched on error.
    fn read_sample(&mut self) -> Result<Sample, Error<Self::Error>>;

    /// The sample cached by the last successful [`read_sample`](Self::read_sample)
    fn sample(&self) -> Sample;

    fn temperature(&self) -> f32 {
        self.sample().temperature
    }

    fn humidity(&self) -> f32 {
        self.sample().humidity
    }

    /// Returns `Error::NotSupport` if the sensor cannot change its accuracy
    fn set_accuracy(&mut self, _accuracy: Accuracy) -> Result<(), Error<Self::Error>> {
        Err(Error::NotSupport)
    }

    /// Returns `Error::NotSupport` if the driver does not talk i2c
    fn set_i2c_address(&mut self, _address: u8) -> Result<(), Error<Self::Error>> {
        Err(Error::NotSupport)
    }
}

/// Lets a facade borrow a driver the caller keeps owning
impl<T: SensorDriver + ?Sized> SensorDriver for &mut T {
    type Error = T::Error;

    fn read_sample(&mut self) -> Result<Sample, Error<Self::Error>> {
        (**self).read_sample()
    }

    fn sample(&self) -> Sample {
        (**self).sample()
    }

    fn set_accuracy(&mut self, accuracy: Accuracy) -> Result<(), Error<Self::Error>> {
        (**self).set_accuracy(accuracy)
    }

    fn set_i2c_address(&mut self, address: u8) -> Result<(), Error<Self::Error>> {
        (**self).set_i2c_address(address)
    }
}
