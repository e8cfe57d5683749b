//! SHT3x-DIS digital sensors (SHT30, SHT31, SHT35).

use crate::{I2cSensor, OpCode, SensorParams};
use embedded_hal::i2c::I2c;

/// Address with ADDR (sensor pin 2) connected to VSS (default)
pub const SHT3X_I2C_ADDRESS_44: u8 = 0x44;
/// Address with ADDR (sensor pin 2) connected to VDD
pub const SHT3X_I2C_ADDRESS_45: u8 = 0x45;

/// Single shot measurement commands, clock stretching enabled
#[derive(Clone, Copy, Debug)]
#[repr(u16)]
pub enum Command {
    MeasureHighRepeatability = 0x2C06,
    MeasureMediumRepeatability = 0x2C0D,
    MeasureLowRepeatability = 0x2C10,
}

impl OpCode for Command {
    fn op_code(&self) -> u16 {
        *self as _
    }
}

pub fn params(address: u8) -> SensorParams {
    SensorParams {
        address,
        command: Command::MeasureHighRepeatability.op_code(),
        a: -45.0,
        b: 175.0,
        c: 65535.0,
        x: 100.0,
        y: 65535.0,
        accuracy_commands: Some([
            Command::MeasureHighRepeatability.op_code(),
            Command::MeasureMediumRepeatability.op_code(),
            Command::MeasureLowRepeatability.op_code(),
        ]),
    }
}

impl<I2C: I2c> I2cSensor<I2C> {
    pub fn sht3x(i2c: I2C, address: u8) -> Self {
        Self::new(i2c, params(address))
    }
}
