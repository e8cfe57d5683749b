use crate::Error;
use embedded_hal::i2c::{Error as _, ErrorKind, I2c};

/// Number of command/read attempts before giving up on a sensor
pub const MAX_I2C_READ_TRIES: u8 = 5;

/// Sends `command` to `address` and reads back `data.len()` bytes.
///
/// The sensor does not acknowledge while a measurement is still running, so
/// a NACK on either phase starts a new attempt, command included. Any other
/// bus error aborts at once. After [`MAX_I2C_READ_TRIES`] attempts the last
/// error is returned.
pub fn read_from_i2c<I2C: I2c>(
    i2c: &mut I2C,
    address: u8,
    command: &[u8],
    data: &mut [u8],
) -> Result<(), Error<I2C::Error>> {
    let mut tries = 1;
    loop {
        let error = match i2c.write(address, command) {
            Ok(()) => match i2c.read(address, data) {
                Ok(()) => return Ok(()),
                Err(error) => error,
            },
            Err(error) => error,
        };

        if !matches!(error.kind(), ErrorKind::NoAcknowledge(_)) || tries >= MAX_I2C_READ_TRIES {
            debug!("i2c read from {:#x} failed after {} tries", address, tries);
            return Err(Error::BusError(error));
        }
        trace!("no ack from {:#x}, retrying", address);
        tries += 1;
    }
}
