use crate::coder::Context;
use crate::error::{Error, Result};

/// Write cursor over a pre-sized buffer, addressed in bits.
///
/// The buffer is allocated zero-filled at construction and never grows: the
/// capacity comes from the size pass, and writing past it is an error rather
/// than a reallocation, so a record that emits more bytes than it declared
/// fails at the write instead of silently producing a longer stream. Bit
/// writes OR into place, which lets an aligned field be written over space
/// that was skipped or zeroed earlier (the font-info terminator overwrite
/// relies on this).
pub struct Writer {
    buf: Vec<u8>,
    pos: usize,
}

impl Writer {
    /// Create a writer over `bytes` zero-filled bytes.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            buf: vec![0; bytes],
            pos: 0,
        }
    }

    /// Current position in bits.
    pub fn pointer(&self) -> usize {
        self.pos
    }

    /// Seek to an absolute bit position, subject to the same bounds as a
    /// relative move.
    pub fn set_pointer(&mut self, bits: usize) -> Result<()> {
        self.adjust_pointer(bits as i64 - self.pos as i64)
    }

    /// Move the position by a signed number of bits. Negative deltas rewind,
    /// which the font-info encoder uses to overwrite a string terminator with
    /// a flag byte.
    pub fn adjust_pointer(&mut self, delta_bits: i64) -> Result<()> {
        let pos = self.pos as i64 + delta_bits;
        if pos < 0 || pos > (self.buf.len() * 8) as i64 {
            return Err(Error::OutOfBounds {
                offset: self.pos >> 3,
                need: delta_bits.unsigned_abs() as usize,
                have: self.remaining_bits(),
            });
        }
        self.pos = pos as usize;
        Ok(())
    }

    /// Declared capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// True once exactly the declared capacity has been written.
    pub fn eof(&self) -> bool {
        self.pos == self.buf.len() * 8
    }

    /// Bits left between the position and the declared capacity.
    pub fn remaining_bits(&self) -> usize {
        (self.buf.len() * 8).saturating_sub(self.pos)
    }

    /// Round the position up to the next byte boundary. No-op when aligned.
    pub fn align_byte(&mut self) {
        self.pos = (self.pos + 7) & !7;
    }

    /// Write the low `n` bits of `value`, `0 <= n <= 32`, MSB-first.
    pub fn write_ubits(&mut self, n: u32, value: u32) -> Result<()> {
        debug_assert!(n <= 32);
        if n == 0 {
            return Ok(());
        }
        self.ensure(n as usize)?;

        let value = if n == 32 { value } else { value & ((1 << n) - 1) };
        let mut remaining = n;
        while remaining > 0 {
            let index = self.pos >> 3;
            let used = (self.pos & 7) as u32;
            let take = (8 - used).min(remaining);
            let chunk = (value >> (remaining - take)) & ((1 << take) - 1);
            self.buf[index] |= (chunk << (8 - used - take)) as u8;
            self.pos += take as usize;
            remaining -= take;
        }
        Ok(())
    }

    /// Write `value` as an `n`-bit two's-complement field.
    pub fn write_sbits(&mut self, n: u32, value: i32) -> Result<()> {
        self.write_ubits(n, value as u32)
    }

    /// Write a single flag bit.
    pub fn write_bit(&mut self, flag: bool) -> Result<()> {
        self.write_ubits(1, flag as u32)
    }

    pub fn write_u8(&mut self, v: u8) -> Result<()> {
        self.write_ubits(8, v as u32)
    }

    pub fn write_i8(&mut self, v: i8) -> Result<()> {
        self.write_ubits(8, v as u8 as u32)
    }

    pub fn write_u16(&mut self, v: u16) -> Result<()> {
        self.write_ubits(8, (v & 0xFF) as u32)?;
        self.write_ubits(8, (v >> 8) as u32)
    }

    pub fn write_i16(&mut self, v: i16) -> Result<()> {
        self.write_u16(v as u16)
    }

    pub fn write_u32(&mut self, v: u32) -> Result<()> {
        for shift in [0, 8, 16, 24] {
            self.write_ubits(8, (v >> shift) & 0xFF)?;
        }
        Ok(())
    }

    pub fn write_i32(&mut self, v: i32) -> Result<()> {
        self.write_u32(v as u32)
    }

    /// Write a raw byte run.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.ensure(bytes.len() * 8)?;
        if self.pos & 7 == 0 {
            let start = self.pos >> 3;
            for (dst, src) in self.buf[start..start + bytes.len()].iter_mut().zip(bytes) {
                *dst |= *src;
            }
            self.pos += bytes.len() * 8;
            Ok(())
        } else {
            for &b in bytes {
                self.write_ubits(8, b as u32)?;
            }
            Ok(())
        }
    }

    /// Write a string encoded per the context encoding, followed by a NUL
    /// terminator. The total emitted length is `context.string_length(s)`.
    pub fn write_string(&mut self, s: &str, context: &Context) -> Result<()> {
        self.write_bytes(&context.encoding.encode(s))?;
        self.write_u8(0)
    }

    /// Consume the writer and return the buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// The buffer written so far (for tests comparing against fixtures).
    pub fn data(&self) -> &[u8] {
        &self.buf
    }

    fn ensure(&self, bits: usize) -> Result<()> {
        if self.pos + bits > self.buf.len() * 8 {
            return Err(Error::OutOfBounds {
                offset: self.pos >> 3,
                need: bits,
                have: self.remaining_bits(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coder::Reader;

    #[test]
    fn test_write_ubits_msb_first() {
        let mut w = Writer::with_capacity(2);
        w.write_ubits(1, 1).unwrap();
        w.write_ubits(3, 0b011).unwrap();
        w.write_ubits(6, 0b0100_11).unwrap();
        w.write_ubits(6, 0).unwrap();
        assert!(w.eof());
        assert_eq!(w.into_bytes(), vec![0b1011_0100, 0b1100_0000]);
    }

    #[test]
    fn test_write_ubits_masks_high_bits() {
        let mut w = Writer::with_capacity(1);
        w.write_ubits(4, 0xFFFF_FFF5).unwrap();
        w.write_ubits(4, 0).unwrap();
        assert_eq!(w.into_bytes(), vec![0x50]);
    }

    #[test]
    fn test_write_sbits_round_trip() {
        let mut w = Writer::with_capacity(2);
        w.write_sbits(3, -2).unwrap();
        w.write_sbits(3, 2).unwrap();
        w.write_sbits(10, -300).unwrap();
        let bytes = w.into_bytes();
        let mut r = Reader::new(&bytes);
        assert_eq!(r.read_sbits(3).unwrap(), -2);
        assert_eq!(r.read_sbits(3).unwrap(), 2);
        assert_eq!(r.read_sbits(10).unwrap(), -300);
    }

    #[test]
    fn test_words_are_little_endian() {
        let mut w = Writer::with_capacity(6);
        w.write_u16(0x0640).unwrap();
        w.write_u32(0x1234_5678).unwrap();
        assert!(w.eof());
        assert_eq!(w.into_bytes(), vec![0x40, 0x06, 0x78, 0x56, 0x34, 0x12]);
    }

    #[test]
    fn test_capacity_is_a_hard_limit() {
        let mut w = Writer::with_capacity(1);
        w.write_ubits(4, 0xA).unwrap();
        let err = w.write_ubits(8, 0xFF).unwrap_err();
        assert!(matches!(
            err,
            Error::OutOfBounds {
                offset: 0,
                need: 8,
                have: 4
            }
        ));
        // A failed write must not move the cursor or touch the buffer.
        assert_eq!(w.pointer(), 4);
        w.write_ubits(4, 0xB).unwrap();
        assert!(w.eof());
        assert_eq!(w.into_bytes(), vec![0xAB]);
    }

    #[test]
    fn test_eof_means_fully_written() {
        let mut w = Writer::with_capacity(2);
        assert!(!w.eof());
        w.write_u8(1).unwrap();
        assert!(!w.eof());
        w.write_u8(2).unwrap();
        assert!(w.eof());
    }

    #[test]
    fn test_align_byte() {
        let mut w = Writer::with_capacity(2);
        w.write_ubits(3, 0b101).unwrap();
        w.align_byte();
        assert_eq!(w.pointer(), 8);
        w.align_byte();
        assert_eq!(w.pointer(), 8);
        w.write_u8(0xFF).unwrap();
        assert_eq!(w.into_bytes(), vec![0xA0, 0xFF]);
    }

    #[test]
    fn test_backpatch_over_terminator() {
        // The font-info encoder writes a NUL-terminated string, steps back a
        // byte, and overwrites the terminator with packed flags.
        let cx = Context::new();
        let mut w = Writer::with_capacity(3);
        w.write_string("ab", &cx).unwrap();
        w.adjust_pointer(-8).unwrap();
        w.write_ubits(8, 0x9C).unwrap();
        assert!(w.eof());
        assert_eq!(w.into_bytes(), vec![b'a', b'b', 0x9C]);
    }

    #[test]
    fn test_write_bytes_unaligned() {
        let mut w = Writer::with_capacity(3);
        w.write_ubits(4, 0).unwrap();
        w.write_bytes(&[0xAB, 0xCD]).unwrap();
        w.write_ubits(4, 0).unwrap();
        assert_eq!(w.into_bytes(), vec![0x0A, 0xBC, 0xD0]);
    }

    #[test]
    fn test_write_string_appends_terminator() {
        let cx = Context::new();
        let mut w = Writer::with_capacity(cx.string_length("url"));
        w.write_string("url", &cx).unwrap();
        assert!(w.eof());
        assert_eq!(w.into_bytes(), vec![b'u', b'r', b'l', 0]);
    }

    #[test]
    fn test_adjust_pointer_bounds() {
        let mut w = Writer::with_capacity(1);
        assert!(w.adjust_pointer(-1).is_err());
        w.adjust_pointer(8).unwrap();
        assert!(w.adjust_pointer(1).is_err());
    }

    #[test]
    fn test_set_pointer_bounds() {
        let mut w = Writer::with_capacity(2);
        w.set_pointer(16).unwrap();
        assert!(w.eof());
        assert!(w.set_pointer(17).is_err());
        assert_eq!(w.pointer(), 16);
        w.set_pointer(0).unwrap();
        w.write_u8(0xAB).unwrap();
        assert_eq!(w.data(), &[0xAB, 0x00]);
    }
}
