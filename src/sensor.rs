use crate::{Accuracy, Error, I2cSensor, Sample, SensorDriver};
use embedded_hal::i2c::I2c;

#[cfg(feature = "sht3x")]
use crate::{SHT3X_I2C_ADDRESS_44, SHT3X_I2C_ADDRESS_45};

/// The supported Sensirion SHT sensors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorType {
    /// Probe the i2c bus for the sensors in [`AUTO_DETECT_SENSORS`]
    AutoDetect,
    /// SHT3x-DIS with ADDR (sensor pin 2) connected to VSS (default)
    Sht3x,
    /// SHT3x-DIS with ADDR (sensor pin 2) connected to VDD
    Sht3xAlt,
    Shtc1,
    Shtw1,
    Shtw2,
    /// Needs an explicitly constructed [`Sht3xAnalog`](crate::Sht3xAnalog) driver
    Sht3xAnalog,
}

/// Probe order of [`SensorType::AutoDetect`].
/// SHTW1 and SHTW2 use the SHTC1 driver and are not listed separately.
pub const AUTO_DETECT_SENSORS: &[SensorType] = &[
    #[cfg(feature = "sht3x")]
    SensorType::Sht3x,
    #[cfg(feature = "sht3x")]
    SensorType::Sht3xAlt,
    #[cfg(feature = "shtc1")]
    SensorType::Shtc1,
];

/// Uniform access to any SHT sensor.
///
/// The driver is either owned, as when it was auto-detected, or a `&mut`
/// borrow of a driver the caller keeps owning. In the latter case dropping
/// the `ShtSensor` leaves the caller's driver untouched.
pub struct ShtSensor<D> {
    sensor_type: SensorType,
    driver: Option<D>,
    sample: Sample,
}

impl<D: SensorDriver> ShtSensor<D> {
    pub fn new(sensor_type: SensorType) -> Self {
        ShtSensor {
            sensor_type,
            driver: None,
            sample: Sample::INVALID,
        }
    }

    pub fn with_driver(sensor_type: SensorType, driver: D) -> Self {
        ShtSensor {
            sensor_type,
            driver: Some(driver),
            sample: Sample::INVALID,
        }
    }

    /// Adopts `driver` if given. Fails with `Error::NoDriver` if no driver
    /// is held afterwards; use [`init_with_bus`](ShtSensor::init_with_bus)
    /// to let i2c sensors be built or detected.
    pub fn init(&mut self, driver: Option<D>) -> Result<(), Error<D::Error>> {
        if let Some(driver) = driver {
            self.driver = Some(driver);
        }
        if self.driver.is_some() {
            Ok(())
        } else {
            Err(Error::NoDriver)
        }
    }

    /// Reads a new sample, see [`temperature`](ShtSensor::temperature) and
    /// [`humidity`](ShtSensor::humidity). The cached values are kept on error.
    pub fn read_sample(&mut self) -> Result<Sample, Error<D::Error>> {
        let Some(driver) = self.driver.as_mut() else {
            return Err(Error::NoDriver);
        };
        let sample = driver.read_sample()?;
        self.sample = sample;
        Ok(sample)
    }

    /// Relative humidity in percent of the last sample
    pub fn humidity(&self) -> f32 {
        self.sample.humidity
    }

    /// Temperature in degrees celsius of the last sample
    pub fn temperature(&self) -> f32 {
        self.sample.temperature
    }

    pub fn sample(&self) -> Sample {
        self.sample
    }

    pub fn sensor_type(&self) -> SensorType {
        self.sensor_type
    }

    pub fn driver(&self) -> Option<&D> {
        self.driver.as_ref()
    }

    pub fn set_accuracy(&mut self, accuracy: Accuracy) -> Result<(), Error<D::Error>> {
        match self.driver.as_mut() {
            Some(driver) => driver.set_accuracy(accuracy),
            None => Err(Error::NoDriver),
        }
    }

    /// Only redirects the driver, the sensor keeps listening on its address
    pub fn set_i2c_address(&mut self, address: u8) -> Result<(), Error<D::Error>> {
        match self.driver.as_mut() {
            Some(driver) => driver.set_i2c_address(address),
            None => Err(Error::NoDriver),
        }
    }

    pub fn release(self) -> Option<D> {
        self.driver
    }
}

impl<I2C: I2c> ShtSensor<I2cSensor<I2C>> {
    /// Builds the driver for the configured i2c sensor type on `i2c`.
    ///
    /// With [`SensorType::AutoDetect`] every sensor of
    /// [`AUTO_DETECT_SENSORS`] is tried in turn and the first one answering a
    /// trial read is kept, its type replacing `AutoDetect`. The bus is
    /// dropped if nothing is found, so pass `&mut i2c` to keep it.
    pub fn init_with_bus(&mut self, i2c: I2C) -> Result<(), Error<I2C::Error>> {
        if self.driver.is_some() {
            return Ok(());
        }

        let driver = if self.sensor_type == SensorType::AutoDetect {
            let (sensor_type, driver, sample) = Self::detect(i2c)?;
            self.sensor_type = sensor_type;
            self.sample = sample;
            driver
        } else {
            match Self::build(i2c, self.sensor_type) {
                Ok(driver) => driver,
                Err(_) => return Err(Error::NoDriver),
            }
        };
        self.driver = Some(driver);
        Ok(())
    }

    fn detect(mut i2c: I2C) -> Result<(SensorType, I2cSensor<I2C>, Sample), Error<I2C::Error>> {
        for &sensor_type in AUTO_DETECT_SENSORS {
            let mut candidate = match Self::build(i2c, sensor_type) {
                Ok(candidate) => candidate,
                Err(bus) => {
                    i2c = bus;
                    continue;
                }
            };
            match candidate.read_sample() {
                Ok(sample) => {
                    debug!("detected {:?} at {:#x}", sensor_type, candidate.address());
                    return Ok((sensor_type, candidate, sample));
                }
                Err(_) => {
                    trace!("no {:?} at {:#x}", sensor_type, candidate.address());
                    i2c = candidate.release();
                }
            }
        }
        warn!("no sht sensor detected");
        Err(Error::NotDetected)
    }

    /// Hands the bus back if `sensor_type` has no parameterless i2c driver
    fn build(i2c: I2C, sensor_type: SensorType) -> Result<I2cSensor<I2C>, I2C> {
        match sensor_type {
            #[cfg(feature = "sht3x")]
            SensorType::Sht3x => Ok(I2cSensor::sht3x(i2c, SHT3X_I2C_ADDRESS_44)),
            #[cfg(feature = "sht3x")]
            SensorType::Sht3xAlt => Ok(I2cSensor::sht3x(i2c, SHT3X_I2C_ADDRESS_45)),
            #[cfg(feature = "shtc1")]
            SensorType::Shtc1 | SensorType::Shtw1 | SensorType::Shtw2 => {
                Ok(I2cSensor::shtc1(i2c))
            }
            _ => Err(i2c),
        }
    }
}
