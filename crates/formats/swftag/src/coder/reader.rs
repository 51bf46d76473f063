use crate::coder::Context;
use crate::error::{Error, Result};

/// Read cursor over a byte slice, addressed in bits.
///
/// The position is a bit offset (`byte_index * 8 + bit_offset`). Bit fields
/// are packed MSB-first within each byte; multi-byte words are little-endian.
/// Every read checks bounds up front and leaves the position untouched on
/// failure.
#[derive(Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
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
    /// which the shape record factory uses to push back a scanned header.
    pub fn adjust_pointer(&mut self, delta_bits: i64) -> Result<()> {
        let pos = self.pos as i64 + delta_bits;
        if pos < 0 || pos > (self.data.len() * 8) as i64 {
            return Err(Error::OutOfBounds {
                offset: self.pos >> 3,
                need: delta_bits.unsigned_abs() as usize,
                have: self.remaining_bits(),
            });
        }
        self.pos = pos as usize;
        Ok(())
    }

    /// Total length of the underlying data in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// True once every bit of the buffer has been consumed.
    pub fn eof(&self) -> bool {
        self.pos == self.data.len() * 8
    }

    /// Bits left between the position and the end of the buffer.
    pub fn remaining_bits(&self) -> usize {
        (self.data.len() * 8).saturating_sub(self.pos)
    }

    /// Round the position up to the next byte boundary. No-op when aligned.
    pub fn align_byte(&mut self) {
        self.pos = (self.pos + 7) & !7;
    }

    /// Peek the byte under the cursor without advancing.
    pub fn scan_byte(&self) -> Result<u8> {
        self.ensure(8)?;
        Ok(self.data[self.pos >> 3])
    }

    /// Peek the little-endian 16-bit word under the cursor without advancing.
    pub fn scan_u16(&self) -> Result<u16> {
        self.ensure(16)?;
        let index = self.pos >> 3;
        Ok(u16::from_le_bytes([self.data[index], self.data[index + 1]]))
    }

    /// Read an unsigned field of `n` bits, `0 <= n <= 32`, MSB-first.
    pub fn read_ubits(&mut self, n: u32) -> Result<u32> {
        debug_assert!(n <= 32);
        if n == 0 {
            return Ok(0);
        }
        self.ensure(n as usize)?;

        let mut value: u32 = 0;
        let mut remaining = n;
        while remaining > 0 {
            let byte = self.data[self.pos >> 3] as u32;
            let used = (self.pos & 7) as u32;
            let take = (8 - used).min(remaining);
            let chunk = (byte >> (8 - used - take)) & ((1 << take) - 1);
            value = (value << take) | chunk;
            self.pos += take as usize;
            remaining -= take;
        }
        Ok(value)
    }

    /// Read a signed field of `n` bits, sign-extending the top bit.
    pub fn read_sbits(&mut self, n: u32) -> Result<i32> {
        let value = self.read_ubits(n)?;
        if n == 0 {
            return Ok(0);
        }
        let shift = 32 - n;
        Ok(((value << shift) as i32) >> shift)
    }

    /// Read a single bit as a flag.
    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_ubits(1)? != 0)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_ubits(8)? as u8)
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_ubits(8)? as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let lo = self.read_ubits(8)?;
        let hi = self.read_ubits(8)?;
        Ok((lo | (hi << 8)) as u16)
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(self.read_u16()? as i16)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let mut value = 0;
        for shift in [0, 8, 16, 24] {
            value |= self.read_ubits(8)? << shift;
        }
        Ok(value)
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(self.read_u32()? as i32)
    }

    /// Read `n` raw bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        self.ensure(n * 8)?;
        if self.pos & 7 == 0 {
            let start = self.pos >> 3;
            let out = self.data[start..start + n].to_vec();
            self.pos += n * 8;
            Ok(out)
        } else {
            let mut out = vec![0u8; n];
            for b in &mut out {
                *b = self.read_ubits(8)? as u8;
            }
            Ok(out)
        }
    }

    /// Read a NUL-terminated string, decoded per the context encoding. The
    /// terminator is consumed but not part of the returned string.
    pub fn read_string(&mut self, context: &Context) -> Result<String> {
        let offset = self.pos >> 3;
        let mut bytes = Vec::new();
        loop {
            let b = self.read_u8()?;
            if b == 0 {
                break;
            }
            bytes.push(b);
        }
        context.encoding.decode(bytes, offset)
    }

    /// Read a string occupying exactly `n` bytes, decoded per the context
    /// encoding. Embedded NULs are kept; callers that need them stripped
    /// (fixed-width name fields) do so themselves.
    pub fn read_fixed_string(&mut self, n: usize, context: &Context) -> Result<String> {
        let offset = self.pos >> 3;
        let bytes = self.read_bytes(n)?;
        context.encoding.decode(bytes, offset)
    }

    fn ensure(&self, bits: usize) -> Result<()> {
        if self.pos + bits > self.data.len() * 8 {
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

    #[test]
    fn test_read_ubits_msb_first() {
        let mut r = Reader::new(&[0b1011_0100, 0b1100_0000]);
        assert_eq!(r.read_ubits(1).unwrap(), 1);
        assert_eq!(r.read_ubits(3).unwrap(), 0b011);
        assert_eq!(r.read_ubits(6).unwrap(), 0b0100_11);
        assert_eq!(r.pointer(), 10);
    }

    #[test]
    fn test_read_ubits_across_bytes() {
        let mut r = Reader::new(&[0x12, 0x34, 0x56, 0x78, 0x9A]);
        assert_eq!(r.read_ubits(4).unwrap(), 0x1);
        assert_eq!(r.read_ubits(32).unwrap(), 0x2345_6789);
        assert_eq!(r.read_ubits(4).unwrap(), 0xA);
        assert!(r.eof());
    }

    #[test]
    fn test_read_ubits_zero_width() {
        let mut r = Reader::new(&[]);
        assert_eq!(r.read_ubits(0).unwrap(), 0);
        assert_eq!(r.pointer(), 0);
    }

    #[test]
    fn test_read_sbits_sign_extension() {
        // 0b110_010_xx: -2 then 2 in 3-bit fields.
        let mut r = Reader::new(&[0b1100_1000]);
        assert_eq!(r.read_sbits(3).unwrap(), -2);
        assert_eq!(r.read_sbits(3).unwrap(), 2);
    }

    #[test]
    fn test_read_sbits_full_width() {
        let mut r = Reader::new(&[0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(r.read_sbits(32).unwrap(), -1);
    }

    #[test]
    fn test_words_are_little_endian() {
        let mut r = Reader::new(&[0x40, 0x06, 0x78, 0x56, 0x34, 0x12]);
        assert_eq!(r.read_u16().unwrap(), 0x0640);
        assert_eq!(r.read_u32().unwrap(), 0x1234_5678);
        assert!(r.eof());
    }

    #[test]
    fn test_signed_words() {
        let mut r = Reader::new(&[0xFE, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(r.read_i16().unwrap(), -2);
        assert_eq!(r.read_i32().unwrap(), -1);
    }

    #[test]
    fn test_out_of_bounds_leaves_position() {
        let mut r = Reader::new(&[0xAB]);
        assert_eq!(r.read_ubits(4).unwrap(), 0xA);
        let err = r.read_ubits(8).unwrap_err();
        assert!(matches!(
            err,
            Error::OutOfBounds {
                offset: 0,
                need: 8,
                have: 4
            }
        ));
        // A failed read must not move the cursor.
        assert_eq!(r.pointer(), 4);
        assert_eq!(r.read_ubits(4).unwrap(), 0xB);
    }

    #[test]
    fn test_align_byte() {
        let mut r = Reader::new(&[0xFF, 0x01]);
        r.read_ubits(3).unwrap();
        r.align_byte();
        assert_eq!(r.pointer(), 8);
        r.align_byte();
        assert_eq!(r.pointer(), 8);
        assert_eq!(r.read_u8().unwrap(), 0x01);
    }

    #[test]
    fn test_scan_does_not_advance() {
        let r2 = Reader::new(&[0x40, 0x06]);
        assert_eq!(r2.scan_byte().unwrap(), 0x40);
        assert_eq!(r2.scan_u16().unwrap(), 0x0640);
        assert_eq!(r2.pointer(), 0);
    }

    #[test]
    fn test_scan_past_end() {
        let mut r = Reader::new(&[0x01]);
        r.read_u8().unwrap();
        assert!(r.scan_byte().is_err());
        assert!(r.scan_u16().is_err());
    }

    #[test]
    fn test_adjust_pointer() {
        let mut r = Reader::new(&[0x0F, 0xF0]);
        r.read_ubits(6).unwrap();
        r.adjust_pointer(-6).unwrap();
        assert_eq!(r.pointer(), 0);
        r.adjust_pointer(12).unwrap();
        assert_eq!(r.read_ubits(4).unwrap(), 0x0);
        assert!(r.adjust_pointer(-40).is_err());
        assert!(r.adjust_pointer(8).is_err());
    }

    #[test]
    fn test_set_pointer_bounds() {
        let mut r = Reader::new(&[0x0F, 0xF0]);
        r.set_pointer(16).unwrap();
        assert!(r.eof());
        assert!(r.set_pointer(17).is_err());
        assert_eq!(r.pointer(), 16);
        r.set_pointer(4).unwrap();
        assert_eq!(r.read_ubits(8).unwrap(), 0xFF);
    }

    #[test]
    fn test_read_bytes_unaligned() {
        let mut r = Reader::new(&[0x0A, 0xBC, 0xD0]);
        r.read_ubits(4).unwrap();
        assert_eq!(r.read_bytes(2).unwrap(), vec![0xAB, 0xCD]);
        assert_eq!(r.pointer(), 20);
    }

    #[test]
    fn test_read_string_stops_at_nul() {
        let cx = Context::new();
        let mut r = Reader::new(b"url\0target\0");
        assert_eq!(r.read_string(&cx).unwrap(), "url");
        assert_eq!(r.read_string(&cx).unwrap(), "target");
        assert!(r.eof());
    }

    #[test]
    fn test_read_string_missing_terminator() {
        let cx = Context::new();
        let mut r = Reader::new(b"abc");
        assert!(matches!(
            r.read_string(&cx).unwrap_err(),
            Error::OutOfBounds { .. }
        ));
    }

    #[test]
    fn test_read_fixed_string_keeps_embedded_nuls() {
        let cx = Context::new();
        let mut r = Reader::new(b"ab\0c");
        assert_eq!(r.read_fixed_string(4, &cx).unwrap(), "ab\0c");
    }

    #[test]
    fn test_eof() {
        let mut r = Reader::new(&[0xFF]);
        assert!(!r.eof());
        r.read_ubits(7).unwrap();
        assert!(!r.eof());
        r.read_ubits(1).unwrap();
        assert!(r.eof());
    }
}
