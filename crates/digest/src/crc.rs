//! CRC-16/CCITT accumulator.
//!
//! Table-free, byte-at-a-time form of the CCITT polynomial (0x1021) starting
//! from 0xFFFF, with no reflection and no final XOR. This is the variant
//! commonly catalogued as CRC-16/CCITT-FALSE; its check value over the ASCII
//! string `123456789` is `0x29B1`.

/// Initial accumulator value, and the CRC of empty input.
pub const CRC16_INITIAL: u16 = 0xFFFF;

/// Running CRC-16/CCITT state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Crc16 {
    value: u16,
}

impl Default for Crc16 {
    fn default() -> Self {
        Self::new()
    }
}

impl Crc16 {
    #[must_use]
    pub const fn new() -> Self {
        Self { value: CRC16_INITIAL }
    }

    /// Fold `bytes` into the accumulator, in order.
    pub fn update(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.update_byte(byte);
        }
    }

    #[inline]
    pub fn update_byte(&mut self, byte: u8) {
        let mut x = (self.value >> 8) ^ u16::from(byte);
        x ^= x >> 4;
        // Shifts on u16 drop the high bits, which is the truncation we want.
        self.value = (self.value << 8) ^ (x << 12) ^ (x << 5) ^ x;
    }

    /// Current CRC over every byte seen so far.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.value
    }
}

/// One-shot CRC-16/CCITT of an in-memory buffer.
#[must_use]
pub fn crc16(bytes: &[u8]) -> u16 {
    let mut crc = Crc16::new();
    crc.update(bytes);
    crc.value()
}
