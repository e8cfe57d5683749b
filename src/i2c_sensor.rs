use crate::{ensure_correct_crc8, read_from_i2c, Accuracy, Error, OpCode, Sample, SensorDriver};
use byteorder::{BigEndian, ByteOrder};
use embedded_hal::i2c::I2c;

/// Size of a reply: temperature word, crc, humidity word, crc
const EXPECTED_DATA_SIZE: usize = 6;

/// Everything that distinguishes one i2c SHT model from another.
///
/// The raw fixed-point readings are converted with
/// `temperature = a + b * (raw / c)` and `humidity = x * (raw / y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorParams {
    pub address: u8,
    pub command: u16,
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub x: f32,
    pub y: f32,
    /// Measurement commands for high, medium and low accuracy, if the
    /// model supports choosing one
    pub accuracy_commands: Option<[u16; 3]>,
}

impl SensorParams {
    pub fn temperature(&self, raw: u16) -> f32 {
        self.a + self.b * (raw as f32 / self.c)
    }

    pub fn humidity(&self, raw: u16) -> f32 {
        self.x * (raw as f32 / self.y)
    }
}

/// Generic driver for the i2c SHT sensors
pub struct I2cSensor<I2C> {
    i2c: I2C,
    params: SensorParams,
    sample: Sample,
}

impl<I2C: I2c> I2cSensor<I2C> {
    pub fn new(i2c: I2C, params: SensorParams) -> Self {
        I2cSensor {
            i2c,
            params,
            sample: Sample::INVALID,
        }
    }

    pub fn params(&self) -> &SensorParams {
        &self.params
    }

    pub fn address(&self) -> u8 {
        self.params.address
    }

    /// Gives back the bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn convert(&self, data: &[u8; EXPECTED_DATA_SIZE]) -> Result<Sample, Error<I2C::Error>> {
        ensure_correct_crc8::<I2C::Error>(&data[0..2], data[2])?;
        ensure_correct_crc8::<I2C::Error>(&data[3..5], data[5])?;

        let raw_temperature = BigEndian::read_u16(&data[0..2]);
        let raw_humidity = BigEndian::read_u16(&data[3..5]);
        Ok(Sample {
            temperature: self.params.temperature(raw_temperature),
            humidity: self.params.humidity(raw_humidity),
        })
    }
}

impl<I2C: I2c> SensorDriver for I2cSensor<I2C> {
    type Error = I2C::Error;

    fn read_sample(&mut self) -> Result<Sample, Error<I2C::Error>> {
        let mut data = [0u8; EXPECTED_DATA_SIZE];
        read_from_i2c(
            &mut self.i2c,
            self.params.address,
            &self.params.command.to_bytes(),
            &mut data,
        )?;
        let sample = self.convert(&data)?;
        self.sample = sample;
        Ok(sample)
    }

    fn sample(&self) -> Sample {
        self.sample
    }

    fn set_accuracy(&mut self, accuracy: Accuracy) -> Result<(), Error<I2C::Error>> {
        let Some(commands) = self.params.accuracy_commands else {
            return Err(Error::NotSupport);
        };
        self.params.command = match accuracy {
            Accuracy::High => commands[0],
            Accuracy::Medium => commands[1],
            Accuracy::Low => commands[2],
        };
        Ok(())
    }

    /// Only changes whom the driver talks to, the sensor keeps its address
    fn set_i2c_address(&mut self, address: u8) -> Result<(), Error<I2C::Error>> {
        self.params.address = address;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{I2cSensor, SensorParams};
    use crate::{Accuracy, Error, SensorDriver};
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};

    const PARAMS: SensorParams = SensorParams {
        address: 0x44,
        command: 0x2C06,
        a: -45.0,
        b: 175.0,
        c: 65535.0,
        x: 100.0,
        y: 65535.0,
        accuracy_commands: None,
    };

    // 0x6666 is 40% of full scale: 25 °C
    const REPLY_25C_50RH: [u8; 6] = [0x66, 0x66, 0x93, 0x80, 0x00, 0xA2];

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 0.01,
            "{} is not close to {}",
            actual,
            expected
        );
    }

    #[test]
    fn conversion_formulas() {
        assert_close(PARAMS.temperature(0), -45.0);
        assert_close(PARAMS.temperature(0xFFFF), 130.0);
        assert_close(PARAMS.humidity(0), 0.0);
        assert_close(PARAMS.humidity(0xFFFF), 100.0);
    }

    #[test]
    fn read_sample_converts_and_caches() {
        let expectations = [
            Transaction::write(0x44, vec![0x2C, 0x06]),
            Transaction::read(0x44, REPLY_25C_50RH.to_vec()),
        ];
        let mut i2c = I2cMock::new(&expectations);

        let mut sensor = I2cSensor::new(&mut i2c, PARAMS);
        assert!(sensor.temperature().is_nan());
        assert!(sensor.humidity().is_nan());

        let sample = sensor.read_sample().unwrap();
        assert_close(sample.temperature, 25.0);
        assert_close(sample.humidity, 50.0);
        assert_eq!(sensor.sample(), sample);

        i2c.done();
    }

    #[test]
    fn corrupted_reply_keeps_previous_sample() {
        let mut corrupted_temperature = REPLY_25C_50RH;
        corrupted_temperature[1] ^= 0x01;
        let mut corrupted_humidity_crc = REPLY_25C_50RH;
        corrupted_humidity_crc[5] ^= 0x80;

        let expectations = [
            Transaction::write(0x44, vec![0x2C, 0x06]),
            Transaction::read(0x44, REPLY_25C_50RH.to_vec()),
            Transaction::write(0x44, vec![0x2C, 0x06]),
            Transaction::read(0x44, corrupted_temperature.to_vec()),
            Transaction::write(0x44, vec![0x2C, 0x06]),
            Transaction::read(0x44, corrupted_humidity_crc.to_vec()),
        ];
        let mut i2c = I2cMock::new(&expectations);

        let mut sensor = I2cSensor::new(&mut i2c, PARAMS);
        let first = sensor.read_sample().unwrap();

        assert_eq!(sensor.read_sample(), Err(Error::CrcMismatch(0xA2, 0x93)));
        assert_eq!(sensor.sample(), first);
        assert_eq!(sensor.read_sample(), Err(Error::CrcMismatch(0xA2, 0x22)));
        assert_eq!(sensor.sample(), first);

        i2c.done();
    }

    #[test]
    fn changed_address_is_used_for_next_read() {
        let expectations = [
            Transaction::write(0x45, vec![0x2C, 0x06]),
            Transaction::read(0x45, REPLY_25C_50RH.to_vec()),
        ];
        let mut i2c = I2cMock::new(&expectations);

        let mut sensor = I2cSensor::new(&mut i2c, PARAMS);
        sensor.set_i2c_address(0x45).unwrap();
        assert_eq!(sensor.address(), 0x45);
        sensor.read_sample().unwrap();

        i2c.done();
    }

    #[test]
    fn accuracy_without_command_table_is_unsupported() {
        let mut i2c = I2cMock::new(&[]);

        let mut sensor = I2cSensor::new(&mut i2c, PARAMS);
        assert_eq!(sensor.set_accuracy(Accuracy::Low), Err(Error::NotSupport));
        assert_eq!(sensor.params().command, 0x2C06);

        i2c.done();
    }

    #[test]
    fn accuracy_selects_command() {
        let params = SensorParams {
            accuracy_commands: Some([0x0001, 0x0002, 0x0003]),
            ..PARAMS
        };
        let expectations = [
            Transaction::write(0x44, vec![0x00, 0x03]),
            Transaction::read(0x44, REPLY_25C_50RH.to_vec()),
        ];
        let mut i2c = I2cMock::new(&expectations);

        let mut sensor = I2cSensor::new(&mut i2c, params);
        sensor.set_accuracy(Accuracy::Medium).unwrap();
        assert_eq!(sensor.params().command, 0x0002);
        sensor.set_accuracy(Accuracy::Low).unwrap();
        sensor.read_sample().unwrap();

        i2c.done();
    }
}
