use byteorder::{BigEndian, ByteOrder};

/// A 16-bit sensor command word
pub trait OpCode {
    fn op_code(&self) -> u16;

    /// The command as sent on the wire, most significant byte first
    fn to_bytes(&self) -> [u8; 2] {
        let mut bytes = [0u8; 2];
        BigEndian::write_u16(&mut bytes, self.op_code());
        bytes
    }
}

impl OpCode for u16 {
    fn op_code(&self) -> u16 {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::OpCode;

    #[test]
    fn command_is_sent_big_endian() {
        assert_eq!(0x2C06u16.to_bytes(), [0x2C, 0x06]);
        assert_eq!(0x7CA2u16.to_bytes(), [0x7C, 0xA2]);
    }
}
