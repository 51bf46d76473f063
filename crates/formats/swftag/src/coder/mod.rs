//! Bit-addressable cursors and the ambient state threaded through a traversal.
//!
//! Everything in the crate funnels through three types:
//! - [`Reader`]: read cursor tracking a position in bits over a borrowed slice
//! - [`Writer`]: write cursor over a pre-sized owned buffer
//! - [`Context`]: per-traversal flags (alpha channel, string encoding, style
//!   index widths) passed by reference into every nested decode/encode call

mod context;
mod reader;
mod writer;

pub use context::{Context, StringEncoding};
pub use reader::Reader;
pub use writer::Writer;

use crate::error::{Error, Result};

/// Two-pass encode contract shared by every record in a tag stream.
///
/// `encoded_size` computes the number of bytes `encode` will emit, including
/// any framing the record writes for itself. Both passes derive variable
/// lengths from the same field values, so a record that encodes a different
/// number of bytes than it declared is reported as a length mismatch by its
/// own self-check rather than silently corrupting the stream.
pub trait Encodeable {
    /// Number of bytes `encode` will emit for this value.
    fn encoded_size(&self, context: &mut Context) -> usize;

    /// Emit the value. Must write exactly `encoded_size` bytes.
    fn encode(&self, writer: &mut Writer, context: &mut Context) -> Result<()>;
}

/// Smallest signed two's-complement field width that holds `value`, in bits.
///
/// This matches the width the encoder picks for bit-packed signed fields:
/// the magnitude's bit length plus a sign bit, with zero occupying one bit.
pub fn signed_bit_width(value: i32) -> u32 {
    33 - value.unsigned_abs().leading_zeros()
}

/// Widest signed field needed by any of `values`, in bits.
pub fn max_signed_bit_width(values: &[i32]) -> u32 {
    values.iter().copied().map(signed_bit_width).max().unwrap_or(1)
}

/// Widest signed field needed by any of `values`, fenced to `max_width`, the
/// largest field the enclosing record's width prefix can declare.
///
/// A value that needs a wider field than the prefix can express is reported
/// as out of range rather than letting the width wrap in the prefix.
pub fn checked_signed_width(values: &[i32], max_width: u32) -> Result<u32> {
    let width = max_signed_bit_width(values);
    if width > max_width {
        let limit = (1 << (max_width - 1)) - 1;
        let value = values
            .iter()
            .copied()
            .max_by_key(|v| signed_bit_width(*v))
            .unwrap_or(0);
        return Err(Error::OutOfRange {
            min: -limit,
            max: limit,
            value,
        });
    }
    Ok(width)
}

/// Smallest unsigned field width that holds `value`, in bits. Zero fits in
/// zero bits.
pub fn unsigned_bit_width(value: u32) -> u32 {
    32 - value.leading_zeros()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_bit_width() {
        assert_eq!(signed_bit_width(0), 1);
        assert_eq!(signed_bit_width(1), 2);
        assert_eq!(signed_bit_width(2), 3);
        assert_eq!(signed_bit_width(3), 3);
        assert_eq!(signed_bit_width(4), 4);
        assert_eq!(signed_bit_width(-1), 2);
        assert_eq!(signed_bit_width(-2), 3);
        assert_eq!(signed_bit_width(255), 9);
        assert_eq!(signed_bit_width(256), 10);
    }

    #[test]
    fn test_max_signed_bit_width() {
        assert_eq!(max_signed_bit_width(&[1, 2]), 3);
        assert_eq!(max_signed_bit_width(&[0, 0, 0, 0]), 1);
        assert_eq!(max_signed_bit_width(&[]), 1);
    }

    #[test]
    fn test_checked_signed_width() {
        assert_eq!(checked_signed_width(&[0x3FFF, -0x3FFF], 15).unwrap(), 15);
        assert_eq!(checked_signed_width(&[], 15).unwrap(), 1);
        assert!(matches!(
            checked_signed_width(&[0x4000], 15),
            Err(Error::OutOfRange {
                min: -0x3FFF,
                max: 0x3FFF,
                value: 0x4000
            })
        ));
        assert!(matches!(
            checked_signed_width(&[0, i32::MIN], 31),
            Err(Error::OutOfRange { value: i32::MIN, .. })
        ));
    }

    #[test]
    fn test_unsigned_bit_width() {
        assert_eq!(unsigned_bit_width(0), 0);
        assert_eq!(unsigned_bit_width(1), 1);
        assert_eq!(unsigned_bit_width(2), 2);
        assert_eq!(unsigned_bit_width(15), 4);
        assert_eq!(unsigned_bit_width(16), 5);
    }
}
