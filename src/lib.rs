#![cfg_attr(not(test), no_std)]
#![doc = include_str!("../README.md")]

#[cfg(all(feature = "defmt", feature = "log"))]
compile_error!("Features \"defmt\" and \"log\" are mutually exclusive and cannot be enabled together");

#[macro_use]
mod fmt;

mod bus;
mod command;
mod driver;
mod i2c_sensor;
mod result;
mod sensor;
#[cfg(feature = "sht3x")]
pub mod sht3x;
#[cfg(feature = "sht3x-analog")]
pub mod sht3x_analog;
#[cfg(feature = "shtc1")]
pub mod shtc1;

pub use bus::{read_from_i2c, MAX_I2C_READ_TRIES};
pub use command::OpCode;
pub use driver::{Accuracy, Sample, SensorDriver, HUMIDITY_INVALID, TEMPERATURE_INVALID};
pub use i2c_sensor::{I2cSensor, SensorParams};
pub use result::Error;
pub use sensor::{SensorType, ShtSensor, AUTO_DETECT_SENSORS};
#[cfg(feature = "sht3x")]
pub use sht3x::{SHT3X_I2C_ADDRESS_44, SHT3X_I2C_ADDRESS_45};
#[cfg(feature = "sht3x-analog")]
pub use sht3x_analog::{AnalogInput, Sht3xAnalog};
#[cfg(feature = "shtc1")]
pub use shtc1::SHTC1_I2C_ADDRESS;

/// Sensirion CRC-8: polynomial 0x31, initial value 0xFF, MSB first, no final xor
pub fn compute_crc8(data: &[u8]) -> u8 {
    const CRC8_POLYNOMIAL: u8 = 0x31;
    const CRC8_INIT: u8 = 0xFF;

    let mut crc = CRC8_INIT;
    for byte in data.iter() {
        crc ^= *byte;
        for _ in 0..8 {
            crc = if (crc & 0x80) != 0 {
                (crc << 1) ^ CRC8_POLYNOMIAL
            } else {
                crc << 1
            };
        }
    }
    crc
}

pub fn ensure_correct_crc8<E: core::fmt::Debug>(data: &[u8], crc8: u8) -> Result<(), Error<E>> {
    let computed = compute_crc8(data);
    if computed != crc8 {
        warn!("crc mismatch: computed {:#x}, received {:#x}", computed, crc8);
        Err(Error::CrcMismatch(computed, crc8))
    } else {
        Ok(())
    }
}
