//! Fill styles for shapes, dispatched on a leading type byte.
//!
//! Fills carry no length header, so an unrecognised type byte is a hard
//! error: there is no span to skip over. Bitmap fill codes pack the tiling
//! and smoothing switches into the low two bits of the base code 0x40. Morph
//! shapes use the same type bytes but a different payload (paired start/end
//! values, colours always carrying alpha), so they have their own decode
//! entry point and enum variants.

use crate::coder::{Context, Encodeable, Reader, Writer};
use crate::datatype::{Color, CoordTransform};
use crate::error::{Error, Result};
use crate::tags::check_identifier;

const SOLID: u8 = 0x00;
const BITMAP: u8 = 0x40;
const UNTILED: u8 = 0x01;
const UNSMOOTHED: u8 = 0x02;

/// One entry of a shape's fill style table.
#[derive(Debug, Clone, PartialEq)]
pub enum FillStyle {
    Solid(SolidFill),
    Bitmap(BitmapFill),
    MorphSolid(MorphSolidFill),
    MorphBitmap(MorphBitmapFill),
}

impl Encodeable for FillStyle {
    fn encoded_size(&self, context: &mut Context) -> usize {
        match self {
            FillStyle::Solid(f) => f.encoded_size(context),
            FillStyle::Bitmap(f) => f.encoded_size(context),
            FillStyle::MorphSolid(f) => f.encoded_size(context),
            FillStyle::MorphBitmap(f) => f.encoded_size(context),
        }
    }

    fn encode(&self, writer: &mut Writer, context: &mut Context) -> Result<()> {
        match self {
            FillStyle::Solid(f) => f.encode(writer, context),
            FillStyle::Bitmap(f) => f.encode(writer, context),
            FillStyle::MorphSolid(f) => f.encode(writer, context),
            FillStyle::MorphBitmap(f) => f.encode(writer, context),
        }
    }
}

/// Decode one fill style table entry of an ordinary shape.
pub fn decode_fill(reader: &mut Reader, context: &mut Context) -> Result<FillStyle> {
    let code = reader.scan_byte()?;
    match code {
        SOLID => Ok(FillStyle::Solid(SolidFill::decode(reader, context)?)),
        BITMAP..=0x43 => Ok(FillStyle::Bitmap(BitmapFill::decode(reader)?)),
        _ => Err(Error::UnsupportedVariant {
            kind: "fill style",
            code: code as i32,
        }),
    }
}

/// Decode one fill style table entry of a morph shape.
pub fn decode_morph(reader: &mut Reader, context: &mut Context) -> Result<FillStyle> {
    let code = reader.scan_byte()?;
    match code {
        SOLID => Ok(FillStyle::MorphSolid(MorphSolidFill::decode(
            reader, context,
        )?)),
        BITMAP..=0x43 => Ok(FillStyle::MorphBitmap(MorphBitmapFill::decode(reader)?)),
        _ => Err(Error::UnsupportedVariant {
            kind: "morph fill style",
            code: code as i32,
        }),
    }
}

fn bitmap_code(tiled: bool, smoothed: bool) -> u8 {
    let mut code = BITMAP;
    if !tiled {
        code |= UNTILED;
    }
    if !smoothed {
        code |= UNSMOOTHED;
    }
    code
}

/// A single-colour fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolidFill {
    pub color: Color,
}

impl SolidFill {
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    pub fn decode(reader: &mut Reader, context: &Context) -> Result<Self> {
        reader.read_u8()?;
        Ok(Self {
            color: Color::decode(reader, context)?,
        })
    }
}

impl Encodeable for SolidFill {
    fn encoded_size(&self, context: &mut Context) -> usize {
        1 + self.color.encoded_size(context)
    }

    fn encode(&self, writer: &mut Writer, context: &mut Context) -> Result<()> {
        writer.write_u8(SOLID)?;
        self.color.encode(writer, context)
    }
}

/// A fill that samples a previously defined image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BitmapFill {
    pub tiled: bool,
    pub smoothed: bool,
    identifier: u16,
    pub transform: CoordTransform,
}

impl BitmapFill {
    pub fn new(
        tiled: bool,
        smoothed: bool,
        identifier: i32,
        transform: CoordTransform,
    ) -> Result<Self> {
        Ok(Self {
            tiled,
            smoothed,
            identifier: check_identifier(identifier)?,
            transform,
        })
    }

    /// Identifier of the image this fill samples.
    pub fn identifier(&self) -> u16 {
        self.identifier
    }

    pub fn set_identifier(&mut self, identifier: i32) -> Result<()> {
        self.identifier = check_identifier(identifier)?;
        Ok(())
    }

    pub fn decode(reader: &mut Reader) -> Result<Self> {
        let code = reader.read_u8()?;
        Ok(Self {
            tiled: code & UNTILED == 0,
            smoothed: code & UNSMOOTHED == 0,
            identifier: reader.read_u16()?,
            transform: CoordTransform::decode(reader)?,
        })
    }
}

impl Encodeable for BitmapFill {
    fn encoded_size(&self, context: &mut Context) -> usize {
        3 + self.transform.encoded_size(context)
    }

    fn encode(&self, writer: &mut Writer, context: &mut Context) -> Result<()> {
        writer.write_u8(bitmap_code(self.tiled, self.smoothed))?;
        writer.write_u16(self.identifier)?;
        self.transform.encode(writer, context)
    }
}

/// A solid fill interpolated between the start and end of a morph. Morph
/// colours always carry alpha regardless of the ambient flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MorphSolidFill {
    pub start_color: Color,
    pub end_color: Color,
}

impl MorphSolidFill {
    pub fn new(start_color: Color, end_color: Color) -> Self {
        Self {
            start_color,
            end_color,
        }
    }

    pub fn decode(reader: &mut Reader, context: &mut Context) -> Result<Self> {
        reader.read_u8()?;
        let saved = context.transparent;
        context.transparent = true;
        let start_color = Color::decode(reader, context);
        let end_color = Color::decode(reader, context);
        context.transparent = saved;
        Ok(Self {
            start_color: start_color?,
            end_color: end_color?,
        })
    }
}

impl Encodeable for MorphSolidFill {
    fn encoded_size(&self, _context: &mut Context) -> usize {
        9
    }

    fn encode(&self, writer: &mut Writer, context: &mut Context) -> Result<()> {
        writer.write_u8(SOLID)?;
        let saved = context.transparent;
        context.transparent = true;
        let result = self
            .start_color
            .encode(writer, context)
            .and_then(|_| self.end_color.encode(writer, context));
        context.transparent = saved;
        result
    }
}

/// A bitmap fill interpolated between the start and end of a morph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphBitmapFill {
    pub tiled: bool,
    pub smoothed: bool,
    identifier: u16,
    pub start_transform: CoordTransform,
    pub end_transform: CoordTransform,
}

impl MorphBitmapFill {
    pub fn new(
        tiled: bool,
        smoothed: bool,
        identifier: i32,
        start_transform: CoordTransform,
        end_transform: CoordTransform,
    ) -> Result<Self> {
        Ok(Self {
            tiled,
            smoothed,
            identifier: check_identifier(identifier)?,
            start_transform,
            end_transform,
        })
    }

    pub fn identifier(&self) -> u16 {
        self.identifier
    }

    pub fn set_identifier(&mut self, identifier: i32) -> Result<()> {
        self.identifier = check_identifier(identifier)?;
        Ok(())
    }

    pub fn decode(reader: &mut Reader) -> Result<Self> {
        let code = reader.read_u8()?;
        Ok(Self {
            tiled: code & UNTILED == 0,
            smoothed: code & UNSMOOTHED == 0,
            identifier: reader.read_u16()?,
            start_transform: CoordTransform::decode(reader)?,
            end_transform: CoordTransform::decode(reader)?,
        })
    }
}

impl Encodeable for MorphBitmapFill {
    fn encoded_size(&self, context: &mut Context) -> usize {
        3 + self.start_transform.encoded_size(context) + self.end_transform.encoded_size(context)
    }

    fn encode(&self, writer: &mut Writer, context: &mut Context) -> Result<()> {
        writer.write_u8(bitmap_code(self.tiled, self.smoothed))?;
        writer.write_u16(self.identifier)?;
        self.start_transform.encode(writer, context)?;
        self.end_transform.encode(writer, context)
    }
}
