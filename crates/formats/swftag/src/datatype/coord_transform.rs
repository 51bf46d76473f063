use crate::coder::{
    checked_signed_width, max_signed_bit_width, Context, Encodeable, Reader, Writer,
};
use crate::error::Result;

/// A 2D affine transform: optional scale pair, optional rotate/shear pair,
/// and a translation in twips.
///
/// Wire layout, byte-aligned at both ends:
/// ```text
/// hasScale:1  [ width:5  scaleX:width  scaleY:width ]
/// hasRotate:1 [ width:5  rotate0:width rotate1:width ]
/// width:5     translateX:width  translateY:width
/// ```
/// Scale and rotate terms are 16.16 fixed point. The scale group is present
/// only when it differs from identity, the rotate group only when non-zero,
/// and a zero translation is written with a zero field width, so the identity
/// transform occupies a single byte.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordTransform {
    pub scale_x: f32,
    pub scale_y: f32,
    pub rotate0: f32,
    pub rotate1: f32,
    pub translate_x: i32,
    pub translate_y: i32,
}

/// 16.16 fixed-point unit.
const FIXED_ONE: f32 = 65536.0;

impl CoordTransform {
    pub fn identity() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            rotate0: 0.0,
            rotate1: 0.0,
            translate_x: 0,
            translate_y: 0,
        }
    }

    pub fn translate(x: i32, y: i32) -> Self {
        Self {
            translate_x: x,
            translate_y: y,
            ..Self::identity()
        }
    }

    pub fn scale(x: f32, y: f32) -> Self {
        Self {
            scale_x: x,
            scale_y: y,
            ..Self::identity()
        }
    }

    pub fn decode(reader: &mut Reader) -> Result<Self> {
        reader.align_byte();

        let mut transform = Self::identity();
        if reader.read_bit()? {
            let width = reader.read_ubits(5)?;
            transform.scale_x = reader.read_sbits(width)? as f32 / FIXED_ONE;
            transform.scale_y = reader.read_sbits(width)? as f32 / FIXED_ONE;
        }
        if reader.read_bit()? {
            let width = reader.read_ubits(5)?;
            transform.rotate0 = reader.read_sbits(width)? as f32 / FIXED_ONE;
            transform.rotate1 = reader.read_sbits(width)? as f32 / FIXED_ONE;
        }
        let width = reader.read_ubits(5)?;
        transform.translate_x = reader.read_sbits(width)?;
        transform.translate_y = reader.read_sbits(width)?;

        reader.align_byte();
        Ok(transform)
    }

    fn has_scale(&self) -> bool {
        self.scale_x != 1.0 || self.scale_y != 1.0
    }

    fn has_rotate(&self) -> bool {
        self.rotate0 != 0.0 || self.rotate1 != 0.0
    }

    fn scale_fixed(&self) -> [i32; 2] {
        [
            (self.scale_x * FIXED_ONE) as i32,
            (self.scale_y * FIXED_ONE) as i32,
        ]
    }

    fn rotate_fixed(&self) -> [i32; 2] {
        [
            (self.rotate0 * FIXED_ONE) as i32,
            (self.rotate1 * FIXED_ONE) as i32,
        ]
    }

    fn translate_width(&self) -> u32 {
        if self.translate_x == 0 && self.translate_y == 0 {
            0
        } else {
            max_signed_bit_width(&[self.translate_x, self.translate_y])
        }
    }

    fn bit_count(&self) -> usize {
        let mut bits = 2 + 5;
        if self.has_scale() {
            bits += 5 + 2 * max_signed_bit_width(&self.scale_fixed()) as usize;
        }
        if self.has_rotate() {
            bits += 5 + 2 * max_signed_bit_width(&self.rotate_fixed()) as usize;
        }
        bits + 2 * self.translate_width() as usize
    }
}

impl Encodeable for CoordTransform {
    fn encoded_size(&self, _context: &mut Context) -> usize {
        (self.bit_count() + 7) >> 3
    }

    fn encode(&self, writer: &mut Writer, _context: &mut Context) -> Result<()> {
        writer.align_byte();

        // Each group's width prefix is 5 bits, so a term needing more than
        // 31 bits cannot be written.
        writer.write_bit(self.has_scale())?;
        if self.has_scale() {
            let fixed = self.scale_fixed();
            let width = checked_signed_width(&fixed, 31)?;
            writer.write_ubits(5, width)?;
            writer.write_sbits(width, fixed[0])?;
            writer.write_sbits(width, fixed[1])?;
        }
        writer.write_bit(self.has_rotate())?;
        if self.has_rotate() {
            let fixed = self.rotate_fixed();
            let width = checked_signed_width(&fixed, 31)?;
            writer.write_ubits(5, width)?;
            writer.write_sbits(width, fixed[0])?;
            writer.write_sbits(width, fixed[1])?;
        }
        let width = match self.translate_width() {
            0 => 0,
            _ => checked_signed_width(&[self.translate_x, self.translate_y], 31)?,
        };
        writer.write_ubits(5, width)?;
        writer.write_sbits(width, self.translate_x)?;
        writer.write_sbits(width, self.translate_y)?;

        writer.align_byte();
        Ok(())
    }
}
