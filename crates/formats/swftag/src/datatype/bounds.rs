use crate::coder::{
    checked_signed_width, max_signed_bit_width, Context, Encodeable, Reader, Writer,
};
use crate::error::Result;

/// An axis-aligned rectangle in twips (1/20 of a pixel).
///
/// Wire layout: a 5-bit field width, then the four edges as signed fields of
/// that width, byte-aligned at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> i32 {
        self.max_y - self.min_y
    }

    pub fn decode(reader: &mut Reader) -> Result<Self> {
        reader.align_byte();
        let width = reader.read_ubits(5)?;
        let min_x = reader.read_sbits(width)?;
        let max_x = reader.read_sbits(width)?;
        let min_y = reader.read_sbits(width)?;
        let max_y = reader.read_sbits(width)?;
        reader.align_byte();
        Ok(Self {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    fn field_width(&self) -> u32 {
        max_signed_bit_width(&[self.min_x, self.max_x, self.min_y, self.max_y])
    }
}

impl Encodeable for Bounds {
    fn encoded_size(&self, _context: &mut Context) -> usize {
        (5 + 4 * self.field_width() as usize + 7) >> 3
    }

    fn encode(&self, writer: &mut Writer, _context: &mut Context) -> Result<()> {
        // The width prefix is 5 bits, so an edge needing more than 31 bits
        // cannot be written.
        let width = checked_signed_width(&[self.min_x, self.max_x, self.min_y, self.max_y], 31)?;
        writer.align_byte();
        writer.write_ubits(5, width)?;
        writer.write_sbits(width, self.min_x)?;
        writer.write_sbits(width, self.max_x)?;
        writer.write_sbits(width, self.min_y)?;
        writer.write_sbits(width, self.max_y)?;
        writer.align_byte();
        Ok(())
    }
}
