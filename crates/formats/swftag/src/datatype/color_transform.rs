use crate::coder::{
    checked_signed_width, max_signed_bit_width, Context, Encodeable, Reader, Writer,
};
use crate::error::Result;

/// A colour adjustment applied to a placed object without changing its
/// definition: optional per-channel add terms and optional per-channel
/// multiply terms in 8.8 fixed point (256 is the identity multiplier).
///
/// Wire layout, byte-aligned at both ends: a hasAdd bit, a hasMultiply bit, a
/// 4-bit field width, then the multiply terms (if any) followed by the add
/// terms (if any). Alpha terms exist on the wire only when the context has
/// transparency in effect; whether a group is written at all is derived from
/// the term values, so the identity transform is a single byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTransform {
    pub add_red: i32,
    pub add_green: i32,
    pub add_blue: i32,
    pub add_alpha: i32,
    multiply_red: i32,
    multiply_green: i32,
    multiply_blue: i32,
    multiply_alpha: i32,
}

/// 8.8 fixed-point identity multiplier.
const UNITY: i32 = 256;

impl ColorTransform {
    pub fn identity() -> Self {
        Self {
            add_red: 0,
            add_green: 0,
            add_blue: 0,
            add_alpha: 0,
            multiply_red: UNITY,
            multiply_green: UNITY,
            multiply_blue: UNITY,
            multiply_alpha: UNITY,
        }
    }

    /// A transform that only adds to the colour channels.
    pub fn add(red: i32, green: i32, blue: i32, alpha: i32) -> Self {
        Self {
            add_red: red,
            add_green: green,
            add_blue: blue,
            add_alpha: alpha,
            ..Self::identity()
        }
    }

    /// A transform that only multiplies the colour channels.
    pub fn multiply(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            multiply_red: (red * UNITY as f32) as i32,
            multiply_green: (green * UNITY as f32) as i32,
            multiply_blue: (blue * UNITY as f32) as i32,
            multiply_alpha: (alpha * UNITY as f32) as i32,
            ..Self::identity()
        }
    }

    pub fn multiply_red(&self) -> f32 {
        self.multiply_red as f32 / UNITY as f32
    }

    pub fn multiply_green(&self) -> f32 {
        self.multiply_green as f32 / UNITY as f32
    }

    pub fn multiply_blue(&self) -> f32 {
        self.multiply_blue as f32 / UNITY as f32
    }

    pub fn multiply_alpha(&self) -> f32 {
        self.multiply_alpha as f32 / UNITY as f32
    }

    /// True when applying the transform would leave every colour unchanged.
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    pub fn decode(reader: &mut Reader, context: &Context) -> Result<Self> {
        reader.align_byte();

        let has_add = reader.read_bit()?;
        let has_multiply = reader.read_bit()?;
        let has_alpha = context.transparent;
        let width = reader.read_ubits(4)?;

        let mut transform = Self::identity();
        if has_multiply {
            transform.multiply_red = reader.read_sbits(width)?;
            transform.multiply_green = reader.read_sbits(width)?;
            transform.multiply_blue = reader.read_sbits(width)?;
            if has_alpha {
                transform.multiply_alpha = reader.read_sbits(width)?;
            }
        }
        if has_add {
            transform.add_red = reader.read_sbits(width)?;
            transform.add_green = reader.read_sbits(width)?;
            transform.add_blue = reader.read_sbits(width)?;
            if has_alpha {
                transform.add_alpha = reader.read_sbits(width)?;
            }
        }

        reader.align_byte();
        Ok(transform)
    }

    fn has_add(&self, transparent: bool) -> bool {
        self.add_red != 0
            || self.add_green != 0
            || self.add_blue != 0
            || (transparent && self.add_alpha != 0)
    }

    fn has_multiply(&self, transparent: bool) -> bool {
        self.multiply_red != UNITY
            || self.multiply_green != UNITY
            || self.multiply_blue != UNITY
            || (transparent && self.multiply_alpha != UNITY)
    }

    /// The terms that will actually appear on the wire: multiply group then
    /// add group, each present only when non-identity, alpha terms only when
    /// transparency is in effect.
    fn wire_terms(&self, transparent: bool) -> Vec<i32> {
        let count = if transparent { 4 } else { 3 };
        let mut terms = Vec::with_capacity(2 * count);
        if self.has_multiply(transparent) {
            terms.extend_from_slice(
                &[
                    self.multiply_red,
                    self.multiply_green,
                    self.multiply_blue,
                    self.multiply_alpha,
                ][..count],
            );
        }
        if self.has_add(transparent) {
            terms.extend_from_slice(
                &[self.add_red, self.add_green, self.add_blue, self.add_alpha][..count],
            );
        }
        terms
    }

    fn field_width(&self, transparent: bool) -> u32 {
        max_signed_bit_width(&self.wire_terms(transparent))
    }
}

impl Encodeable for ColorTransform {
    fn encoded_size(&self, context: &mut Context) -> usize {
        let transparent = context.transparent;
        let width = self.field_width(transparent) as usize;
        let terms = if transparent { 4 } else { 3 };

        let mut bits = 6;
        if self.has_multiply(transparent) {
            bits += width * terms;
        }
        if self.has_add(transparent) {
            bits += width * terms;
        }
        (bits + 7) >> 3
    }

    fn encode(&self, writer: &mut Writer, context: &mut Context) -> Result<()> {
        writer.align_byte();

        let transparent = context.transparent;
        let has_add = self.has_add(transparent);
        let has_multiply = self.has_multiply(transparent);
        // The width prefix is 4 bits, so a term needing more than 15 bits
        // cannot be written.
        let width = checked_signed_width(&self.wire_terms(transparent), 15)?;

        writer.write_bit(has_add)?;
        writer.write_bit(has_multiply)?;
        writer.write_ubits(4, width)?;

        if has_multiply {
            writer.write_sbits(width, self.multiply_red)?;
            writer.write_sbits(width, self.multiply_green)?;
            writer.write_sbits(width, self.multiply_blue)?;
            if transparent {
                writer.write_sbits(width, self.multiply_alpha)?;
            }
        }
        if has_add {
            writer.write_sbits(width, self.add_red)?;
            writer.write_sbits(width, self.add_green)?;
            writer.write_sbits(width, self.add_blue)?;
            if transparent {
                writer.write_sbits(width, self.add_alpha)?;
            }
        }

        writer.align_byte();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(transform: ColorTransform, transparent: bool) -> Vec<u8> {
        let mut cx = Context::new();
        cx.transparent = transparent;
        let size = transform.encoded_size(&mut cx);
        let mut w = Writer::with_capacity(size);
        transform.encode(&mut w, &mut cx).unwrap();
        assert!(w.eof());
        let bytes = w.into_bytes();

        let mut r = Reader::new(&bytes);
        assert_eq!(ColorTransform::decode(&mut r, &cx).unwrap(), transform);
        assert!(r.eof());
        bytes
    }

    #[test]
    fn test_identity_is_one_byte() {
        assert_eq!(round_trip(ColorTransform::identity(), false), vec![0x04]);
        assert_eq!(round_trip(ColorTransform::identity(), true), vec![0x04]);
    }

    #[test]
    fn test_add_round_trip() {
        round_trip(ColorTransform::add(1, 2, 3, 0), false);
        round_trip(ColorTransform::add(-255, 0, 255, 0), false);
        round_trip(ColorTransform::add(1, 2, 3, 4), true);
        round_trip(ColorTransform::add(16383, -16383, 0, 0), false);
    }

    #[test]
    fn test_terms_wider_than_the_field_are_rejected() {
        use crate::error::Error;
        let mut cx = Context::new();
        let transform = ColorTransform::add(20000, 0, 0, 0);
        let mut w = Writer::with_capacity(transform.encoded_size(&mut cx));
        assert!(matches!(
            transform.encode(&mut w, &mut cx),
            Err(Error::OutOfRange {
                min: -16383,
                max: 16383,
                value: 20000
            })
        ));
    }

    #[test]
    fn test_multiply_round_trip() {
        round_trip(ColorTransform::multiply(2.0, 0.5, 1.0, 1.0), false);
        round_trip(ColorTransform::multiply(0.25, 0.25, 0.25, 0.5), true);
    }

    #[test]
    fn test_combined_round_trip() {
        let mut transform = ColorTransform::add(10, -10, 20, -20);
        transform.multiply_red = 128;
        round_trip(transform, true);
    }

    #[test]
    fn test_alpha_terms_invisible_without_transparency() {
        // With transparency off, an alpha-only transform is the identity on
        // the wire and comes back with the alpha term dropped.
        let transform = ColorTransform::add(0, 0, 0, 50);
        let mut cx = Context::new();
        let mut w = Writer::with_capacity(transform.encoded_size(&mut cx));
        transform.encode(&mut w, &mut cx).unwrap();
        let bytes = w.into_bytes();
        assert_eq!(bytes, vec![0x04]);

        let mut r = Reader::new(&bytes);
        let decoded = ColorTransform::decode(&mut r, &cx).unwrap();
        assert!(decoded.is_identity());
    }
}
