//! Shape geometry records: edges, curves and style-change records.
//!
//! Shape records are the one family framed in bits rather than bytes. Each
//! record starts with a 6-bit header: a zero header terminates the list, a
//! set top bit marks an edge (straight when the next bit is set, curved
//! otherwise) and a clear top bit marks a style-change record. The factory
//! peeks the header and pushes the cursor back six bits so the concrete
//! decoder reads its own fields from the start.
//!
//! Style indexes are packed in `Context::fill_bits` / `Context::line_bits`
//! wide fields. A style-change record that carries replacement style tables
//! also carries the index widths for everything that follows it, so it
//! rewrites the context widths in place; that change deliberately persists
//! for the remaining records of the same shape.

use crate::coder::{
    checked_signed_width, max_signed_bit_width, signed_bit_width, unsigned_bit_width, Context,
    Encodeable, Reader, Writer,
};
use crate::datatype::Color;
use crate::error::Result;
use crate::fillstyle::{decode_fill, FillStyle};

/// One record in a shape's geometry list.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeRecord {
    Line(Line),
    Curve(Curve),
    Style(ShapeStyle),
}

/// Decode the next shape record, or `None` when the 6-bit terminator is
/// reached (the terminator is consumed).
pub fn decode_record(reader: &mut Reader, context: &mut Context) -> Result<Option<ShapeRecord>> {
    let header = reader.read_ubits(6)?;
    if header == 0 {
        return Ok(None);
    }
    reader.adjust_pointer(-6)?;

    let record = if header & 0x20 != 0 {
        if header & 0x10 != 0 {
            ShapeRecord::Line(Line::decode(reader)?)
        } else {
            ShapeRecord::Curve(Curve::decode(reader)?)
        }
    } else {
        ShapeRecord::Style(ShapeStyle::decode(reader, context)?)
    };
    Ok(Some(record))
}

impl ShapeRecord {
    /// Size in bits when encoded `offset` bits into the shape body. The
    /// offset matters only for style records, whose style tables are
    /// byte-aligned.
    fn bit_count(&self, offset: usize, context: &mut Context) -> usize {
        match self {
            ShapeRecord::Line(r) => r.bit_count(),
            ShapeRecord::Curve(r) => r.bit_count(),
            ShapeRecord::Style(r) => r.bit_count(offset, context),
        }
    }

    fn encode_bits(&self, writer: &mut Writer, context: &mut Context) -> Result<()> {
        match self {
            ShapeRecord::Line(r) => r.encode_bits(writer),
            ShapeRecord::Curve(r) => r.encode_bits(writer),
            ShapeRecord::Style(r) => r.encode_bits(writer, context),
        }
    }
}

/// A straight edge, as deltas from the current drawing point in twips.
///
/// Axis-aligned edges use the short form that stores a single delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub x: i32,
    pub y: i32,
}

impl Line {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn decode(reader: &mut Reader) -> Result<Self> {
        reader.read_ubits(2)?;
        let width = reader.read_ubits(4)? + 2;
        if reader.read_bit()? {
            let x = reader.read_sbits(width)?;
            let y = reader.read_sbits(width)?;
            Ok(Self { x, y })
        } else if reader.read_bit()? {
            Ok(Self {
                x: 0,
                y: reader.read_sbits(width)?,
            })
        } else {
            Ok(Self {
                x: reader.read_sbits(width)?,
                y: 0,
            })
        }
    }

    fn is_general(&self) -> bool {
        self.x != 0 && self.y != 0
    }

    fn field_width(&self) -> u32 {
        let width = if self.is_general() {
            max_signed_bit_width(&[self.x, self.y])
        } else {
            signed_bit_width(self.x | self.y)
        };
        width.max(2)
    }

    fn bit_count(&self) -> usize {
        let width = self.field_width() as usize;
        7 + if self.is_general() {
            2 * width
        } else {
            1 + width
        }
    }

    fn encode_bits(&self, writer: &mut Writer) -> Result<()> {
        // The width is stored biased by 2 in a 4-bit field, capping deltas
        // at 17 bits.
        let width = checked_signed_width(&[self.x, self.y], 17)?.max(2);
        writer.write_ubits(2, 0b11)?;
        writer.write_ubits(4, width - 2)?;
        if self.is_general() {
            writer.write_bit(true)?;
            writer.write_sbits(width, self.x)?;
            writer.write_sbits(width, self.y)?;
        } else {
            writer.write_bit(false)?;
            let vertical = self.x == 0;
            writer.write_bit(vertical)?;
            writer.write_sbits(width, if vertical { self.y } else { self.x })?;
        }
        Ok(())
    }
}

/// A quadratic curve: deltas to the control point, then from the control
/// point to the anchor, in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Curve {
    pub control_x: i32,
    pub control_y: i32,
    pub anchor_x: i32,
    pub anchor_y: i32,
}

impl Curve {
    pub fn new(control_x: i32, control_y: i32, anchor_x: i32, anchor_y: i32) -> Self {
        Self {
            control_x,
            control_y,
            anchor_x,
            anchor_y,
        }
    }

    pub fn decode(reader: &mut Reader) -> Result<Self> {
        reader.read_ubits(2)?;
        let width = reader.read_ubits(4)? + 2;
        Ok(Self {
            control_x: reader.read_sbits(width)?,
            control_y: reader.read_sbits(width)?,
            anchor_x: reader.read_sbits(width)?,
            anchor_y: reader.read_sbits(width)?,
        })
    }

    fn field_width(&self) -> u32 {
        max_signed_bit_width(&[self.control_x, self.control_y, self.anchor_x, self.anchor_y])
            .max(2)
    }

    fn bit_count(&self) -> usize {
        6 + 4 * self.field_width() as usize
    }

    fn encode_bits(&self, writer: &mut Writer) -> Result<()> {
        let width = checked_signed_width(
            &[self.control_x, self.control_y, self.anchor_x, self.anchor_y],
            17,
        )?
        .max(2);
        writer.write_ubits(2, 0b10)?;
        writer.write_ubits(4, width - 2)?;
        writer.write_sbits(width, self.control_x)?;
        writer.write_sbits(width, self.control_y)?;
        writer.write_sbits(width, self.anchor_x)?;
        writer.write_sbits(width, self.anchor_y)?;
        Ok(())
    }
}

/// A line style table entry: pen width in twips and a colour whose alpha
/// presence follows the ambient flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStyle {
    pub width: u16,
    pub color: Color,
}

impl LineStyle {
    pub fn new(width: u16, color: Color) -> Self {
        Self { width, color }
    }

    pub fn decode(reader: &mut Reader, context: &Context) -> Result<Self> {
        Ok(Self {
            width: reader.read_u16()?,
            color: Color::decode(reader, context)?,
        })
    }
}

impl Encodeable for LineStyle {
    fn encoded_size(&self, context: &mut Context) -> usize {
        2 + self.color.encoded_size(context)
    }

    fn encode(&self, writer: &mut Writer, context: &mut Context) -> Result<()> {
        writer.write_u16(self.width)?;
        self.color.encode(writer, context)
    }
}

/// A style-change record: an optional pen move, optional new style indexes,
/// and optional replacement style tables.
///
/// Indexes select from the tables in effect; index 0 means "no style". When
/// replacement tables are present they are byte-aligned and followed by the
/// index widths used by subsequent records, which the coder derives from the
/// table sizes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShapeStyle {
    pub move_to: Option<(i32, i32)>,
    pub fill_style: Option<u32>,
    pub alt_fill_style: Option<u32>,
    pub line_style: Option<u32>,
    pub fill_styles: Vec<FillStyle>,
    pub line_styles: Vec<LineStyle>,
}

impl ShapeStyle {
    fn has_tables(&self) -> bool {
        !self.fill_styles.is_empty() || !self.line_styles.is_empty()
    }

    /// Index widths for the records following this one, derived from the
    /// replacement table sizes: an index can never exceed its table's length.
    fn table_widths(&self) -> (u32, u32) {
        (
            unsigned_bit_width(self.fill_styles.len() as u32),
            unsigned_bit_width(self.line_styles.len() as u32),
        )
    }

    pub fn decode(reader: &mut Reader, context: &mut Context) -> Result<Self> {
        reader.read_ubits(1)?;
        let has_styles = reader.read_bit()?;
        let has_line = reader.read_bit()?;
        let has_alt_fill = reader.read_bit()?;
        let has_fill = reader.read_bit()?;
        let has_move = reader.read_bit()?;

        let mut style = Self::default();
        if has_move {
            let width = reader.read_ubits(5)?;
            let x = reader.read_sbits(width)?;
            let y = reader.read_sbits(width)?;
            style.move_to = Some((x, y));
        }
        if has_fill {
            style.fill_style = Some(reader.read_ubits(context.fill_bits)?);
        }
        if has_alt_fill {
            style.alt_fill_style = Some(reader.read_ubits(context.fill_bits)?);
        }
        if has_line {
            style.line_style = Some(reader.read_ubits(context.line_bits)?);
        }
        if has_styles {
            reader.align_byte();
            let fill_count = read_style_count(reader)?;
            for _ in 0..fill_count {
                style.fill_styles.push(decode_fill(reader, context)?);
            }
            let line_count = read_style_count(reader)?;
            for _ in 0..line_count {
                style.line_styles.push(LineStyle::decode(reader, context)?);
            }
            // The new widths stay in the context for the rest of the shape.
            context.fill_bits = reader.read_ubits(4)?;
            context.line_bits = reader.read_ubits(4)?;
        }
        Ok(style)
    }

    fn bit_count(&self, offset: usize, context: &mut Context) -> usize {
        let mut bits = 6;
        if let Some((x, y)) = self.move_to {
            bits += 5 + 2 * max_signed_bit_width(&[x, y]) as usize;
        }
        if self.fill_style.is_some() {
            bits += context.fill_bits as usize;
        }
        if self.alt_fill_style.is_some() {
            bits += context.fill_bits as usize;
        }
        if self.line_style.is_some() {
            bits += context.line_bits as usize;
        }
        if self.has_tables() {
            bits += (8 - (offset + bits) % 8) % 8;
            bits += 8 * style_count_size(self.fill_styles.len());
            for fill in &self.fill_styles {
                bits += 8 * fill.encoded_size(context);
            }
            bits += 8 * style_count_size(self.line_styles.len());
            for line in &self.line_styles {
                bits += 8 * line.encoded_size(context);
            }
            bits += 8;
            let (fill_bits, line_bits) = self.table_widths();
            context.fill_bits = fill_bits;
            context.line_bits = line_bits;
        }
        bits
    }

    fn encode_bits(&self, writer: &mut Writer, context: &mut Context) -> Result<()> {
        writer.write_ubits(1, 0)?;
        writer.write_bit(self.has_tables())?;
        writer.write_bit(self.line_style.is_some())?;
        writer.write_bit(self.alt_fill_style.is_some())?;
        writer.write_bit(self.fill_style.is_some())?;
        writer.write_bit(self.move_to.is_some())?;

        if let Some((x, y)) = self.move_to {
            let width = checked_signed_width(&[x, y], 31)?;
            writer.write_ubits(5, width)?;
            writer.write_sbits(width, x)?;
            writer.write_sbits(width, y)?;
        }
        if let Some(index) = self.fill_style {
            writer.write_ubits(context.fill_bits, index)?;
        }
        if let Some(index) = self.alt_fill_style {
            writer.write_ubits(context.fill_bits, index)?;
        }
        if let Some(index) = self.line_style {
            writer.write_ubits(context.line_bits, index)?;
        }
        if self.has_tables() {
            writer.align_byte();
            write_style_count(writer, self.fill_styles.len())?;
            for fill in &self.fill_styles {
                fill.encode(writer, context)?;
            }
            write_style_count(writer, self.line_styles.len())?;
            for line in &self.line_styles {
                line.encode(writer, context)?;
            }
            let (fill_bits, line_bits) = self.table_widths();
            writer.write_ubits(4, fill_bits)?;
            writer.write_ubits(4, line_bits)?;
            // As on decode, the new widths persist for the rest of the shape.
            context.fill_bits = fill_bits;
            context.line_bits = line_bits;
        }
        Ok(())
    }
}

/// Style table counts are one byte, with 0xFF marking a 16-bit extension.
fn read_style_count(reader: &mut Reader) -> Result<usize> {
    let count = reader.read_u8()?;
    if count == 0xFF {
        Ok(reader.read_u16()? as usize)
    } else {
        Ok(count as usize)
    }
}

fn write_style_count(writer: &mut Writer, count: usize) -> Result<()> {
    if count >= 0xFF {
        writer.write_u8(0xFF)?;
        writer.write_u16(count as u16)
    } else {
        writer.write_u8(count as u8)
    }
}

fn style_count_size(count: usize) -> usize {
    if count >= 0xFF {
        3
    } else {
        1
    }
}

/// A complete geometry list: initial index widths, records, terminator.
///
/// The container is byte-aligned at both ends. The initial index widths are
/// derived from the largest index used before the first replacement table;
/// subsequent segments take their widths from the tables that precede them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Shape {
    pub records: Vec<ShapeRecord>,
}

impl Shape {
    pub fn new(records: Vec<ShapeRecord>) -> Self {
        Self { records }
    }

    pub fn decode(reader: &mut Reader, context: &mut Context) -> Result<Self> {
        reader.align_byte();
        context.fill_bits = reader.read_ubits(4)?;
        context.line_bits = reader.read_ubits(4)?;

        let mut records = Vec::new();
        while let Some(record) = decode_record(reader, context)? {
            records.push(record);
        }
        reader.align_byte();
        Ok(Self { records })
    }

    fn initial_widths(&self) -> (u32, u32) {
        let mut fill_max = 0;
        let mut line_max = 0;
        for record in &self.records {
            if let ShapeRecord::Style(style) = record {
                fill_max = fill_max
                    .max(style.fill_style.unwrap_or(0))
                    .max(style.alt_fill_style.unwrap_or(0));
                line_max = line_max.max(style.line_style.unwrap_or(0));
                if style.has_tables() {
                    break;
                }
            }
        }
        (unsigned_bit_width(fill_max), unsigned_bit_width(line_max))
    }
}

impl Encodeable for Shape {
    fn encoded_size(&self, context: &mut Context) -> usize {
        let (fill_bits, line_bits) = self.initial_widths();
        context.fill_bits = fill_bits;
        context.line_bits = line_bits;

        let mut bits = 8;
        for record in &self.records {
            bits += record.bit_count(bits, context);
        }
        bits += 6;
        (bits + 7) >> 3
    }

    fn encode(&self, writer: &mut Writer, context: &mut Context) -> Result<()> {
        writer.align_byte();
        let (fill_bits, line_bits) = self.initial_widths();
        context.fill_bits = fill_bits;
        context.line_bits = line_bits;
        writer.write_ubits(4, fill_bits)?;
        writer.write_ubits(4, line_bits)?;

        for record in &self.records {
            record.encode_bits(writer, context)?;
        }
        writer.write_ubits(6, 0)?;
        writer.align_byte();
        Ok(())
    }
}

/// Opaque shape geometry for callers that carry the bit stream through
/// without interpreting it. The bytes must already contain the terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeData {
    pub data: Vec<u8>,
}

impl ShapeData {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn decode(reader: &mut Reader, length: usize) -> Result<Self> {
        Ok(Self {
            data: reader.read_bytes(length)?,
        })
    }
}

impl Encodeable for ShapeData {
    fn encoded_size(&self, _context: &mut Context) -> usize {
        self.data.len()
    }

    fn encode(&self, writer: &mut Writer, _context: &mut Context) -> Result<()> {
        writer.write_bytes(&self.data)
    }
}
