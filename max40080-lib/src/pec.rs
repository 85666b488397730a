//! SMBus packet error checking.
//!
//! The PEC byte is a CRC-8 (polynomial 0x07) over every byte on the wire,
//! address bytes included.

use crc::{CRC_8_SMBUS, Crc};

const SMBUS_PEC: Crc<u8> = Crc::<u8>::new(&CRC_8_SMBUS);

/// PEC appended to a register write.
pub fn for_write(address: u8, register: u8, data: &[u8]) -> u8 {
    let mut digest = SMBUS_PEC.digest();
    digest.update(&[address << 1, register]);
    digest.update(data);
    digest.finalize()
}

/// PEC the device sends after the data of a register read.
pub fn for_read(address: u8, register: u8, data: &[u8]) -> u8 {
    let mut digest = SMBUS_PEC.digest();
    digest.update(&[address << 1, register, (address << 1) | 1]);
    digest.update(data);
    digest.finalize()
}
