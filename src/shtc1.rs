//! SHTC1, also driving the SHTW1 and SHTW2 which share its interface.

use crate::{I2cSensor, OpCode, SensorParams};
use embedded_hal::i2c::I2c;

pub const SHTC1_I2C_ADDRESS: u8 = 0x70;

#[derive(Clone, Copy, Debug)]
#[repr(u16)]
pub enum Command {
    /// Temperature first, clock stretching enabled
    Measure = 0x7CA2,
}

impl OpCode for Command {
    fn op_code(&self) -> u16 {
        *self as _
    }
}

pub const PARAMS: SensorParams = SensorParams {
    address: SHTC1_I2C_ADDRESS,
    command: Command::Measure as u16,
    a: -45.0,
    b: 175.0,
    c: 65535.0,
    x: 100.0,
    y: 65535.0,
    accuracy_commands: None,
};

impl<I2C: I2c> I2cSensor<I2C> {
    pub fn shtc1(i2c: I2C) -> Self {
        Self::new(i2c, PARAMS)
    }
}
