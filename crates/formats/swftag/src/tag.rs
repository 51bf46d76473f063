//! Tag framing and the movie tag factory.
//!
//! Every top-level record starts with a 16-bit little-endian header word
//! holding a 10-bit type code and a 6-bit length. A length field of 0x3F is
//! the extended-form marker: the true length follows as a 32-bit word. The
//! [`TagFrame`] helper reads and writes that header and carries the expected
//! end position so each record can verify it consumed or emitted exactly the
//! declared span.

use crate::coder::{Context, Encodeable, Reader, Writer};
use crate::error::{Error, Result};
use crate::tags::{
    Background, DefineData, DefineSound, DoAction, FontInfo2, FrameLabel, PathsArePostscript,
    PlaceObject2, RawTag, RemoveObject2, ShowFrame,
};
use crate::types;

/// Compact length values run 0..=62; 0x3F switches to the extended form.
pub const EXTENDED: usize = 0x3F;

/// Bytes the header occupies for a body of `length` bytes: 2 for the compact
/// form, 6 when the 32-bit extended length is needed. The encoder picks the
/// compact form exactly when the decoder would, `length <= 62`.
pub fn header_size(length: usize) -> usize {
    if length > 62 {
        6
    } else {
        2
    }
}

/// One decoded or begun tag header: the type code, the declared body length
/// in bytes, and the cursor positions needed for the end-of-record check.
#[derive(Debug, Clone, Copy)]
pub struct TagFrame {
    pub code: u16,
    pub length: usize,
    start: usize,
    end: usize,
}

impl TagFrame {
    /// Read a tag header, following the extended-form switch when the 6-bit
    /// length field is 0x3F.
    pub fn read(reader: &mut Reader) -> Result<Self> {
        let start = reader.pointer();
        let word = reader.read_u16()?;
        let code = word >> 6;
        let mut length = (word & 0x3F) as usize;
        if length == EXTENDED {
            length = reader.read_u32()? as usize;
        }
        let end = reader.pointer() + (length << 3);
        Ok(Self {
            code,
            length,
            start,
            end,
        })
    }

    /// Write a tag header for a body of `length` bytes, choosing the compact
    /// or extended form by the same rule the decoder applies.
    pub fn write(writer: &mut Writer, code: u16, length: usize) -> Result<Self> {
        let start = writer.pointer();
        if length > 62 {
            writer.write_u16((code << 6) | EXTENDED as u16)?;
            writer.write_u32(length as u32)?;
        } else {
            writer.write_u16((code << 6) | length as u16)?;
        }
        let end = writer.pointer() + (length << 3);
        Ok(Self {
            code,
            length,
            start,
            end,
        })
    }

    /// Bit position where the body ends.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Bytes of body remaining between `pointer` and the declared end. Used
    /// by records whose final field runs to the frame boundary.
    pub fn remaining_bytes(&self, pointer: usize) -> usize {
        self.end.saturating_sub(pointer) >> 3
    }

    /// The end-of-record self-check: the cursor must have landed exactly on
    /// the declared end. The reported delta is in whole bytes, signed, so a
    /// short body shows up as a negative discrepancy.
    pub fn verify(&self, kind: &'static str, pointer: usize) -> Result<()> {
        if pointer != self.end {
            return Err(Error::LengthMismatch {
                kind,
                offset: self.start >> 3,
                length: self.length,
                delta: (pointer as i64 - self.end as i64) >> 3,
            });
        }
        Ok(())
    }
}

/// One top-level record of the movie stream.
///
/// The set is closed over the kinds this crate decodes; every code outside it
/// lands in [`RawTag`], which preserves the exact byte span so unknown tags
/// survive a decode/encode round trip unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum MovieTag {
    ShowFrame(ShowFrame),
    PathsArePostscript(PathsArePostscript),
    Background(Background),
    DoAction(DoAction),
    DefineSound(DefineSound),
    PlaceObject2(PlaceObject2),
    RemoveObject2(RemoveObject2),
    FrameLabel(FrameLabel),
    FontInfo2(FontInfo2),
    DefineData(DefineData),
    Raw(RawTag),
}

impl Encodeable for MovieTag {
    fn encoded_size(&self, context: &mut Context) -> usize {
        match self {
            MovieTag::ShowFrame(t) => t.encoded_size(context),
            MovieTag::PathsArePostscript(t) => t.encoded_size(context),
            MovieTag::Background(t) => t.encoded_size(context),
            MovieTag::DoAction(t) => t.encoded_size(context),
            MovieTag::DefineSound(t) => t.encoded_size(context),
            MovieTag::PlaceObject2(t) => t.encoded_size(context),
            MovieTag::RemoveObject2(t) => t.encoded_size(context),
            MovieTag::FrameLabel(t) => t.encoded_size(context),
            MovieTag::FontInfo2(t) => t.encoded_size(context),
            MovieTag::DefineData(t) => t.encoded_size(context),
            MovieTag::Raw(t) => t.encoded_size(context),
        }
    }

    fn encode(&self, writer: &mut Writer, context: &mut Context) -> Result<()> {
        match self {
            MovieTag::ShowFrame(t) => t.encode(writer, context),
            MovieTag::PathsArePostscript(t) => t.encode(writer, context),
            MovieTag::Background(t) => t.encode(writer, context),
            MovieTag::DoAction(t) => t.encode(writer, context),
            MovieTag::DefineSound(t) => t.encode(writer, context),
            MovieTag::PlaceObject2(t) => t.encode(writer, context),
            MovieTag::RemoveObject2(t) => t.encode(writer, context),
            MovieTag::FrameLabel(t) => t.encode(writer, context),
            MovieTag::FontInfo2(t) => t.encode(writer, context),
            MovieTag::DefineData(t) => t.encode(writer, context),
            MovieTag::Raw(t) => t.encode(writer, context),
        }
    }
}

/// Decode the next tag from the stream.
///
/// Peeks the header word without consuming it, dispatches on the 10-bit type
/// code, and lets the concrete decoder read its own frame. A zero type code
/// is the stream terminator and is returned as `Ok(None)` with its header
/// consumed, in whichever form it was written: the compact two-byte form or
/// the extended form with its 32-bit length word.
pub fn decode_tag(reader: &mut Reader, context: &mut Context) -> Result<Option<MovieTag>> {
    let word = reader.scan_u16()?;
    let code = word >> 6;

    if code == types::tag::END {
        reader.read_u16()?;
        if word & 0x3F == EXTENDED as u16 {
            reader.read_u32()?;
        }
        return Ok(None);
    }

    let tag = match code {
        types::tag::SHOW_FRAME => MovieTag::ShowFrame(ShowFrame::decode(reader)?),
        types::tag::PATHS_ARE_POSTSCRIPT => {
            MovieTag::PathsArePostscript(PathsArePostscript::decode(reader)?)
        }
        types::tag::SET_BACKGROUND_COLOR => {
            MovieTag::Background(Background::decode(reader, context)?)
        }
        types::tag::DO_ACTION => MovieTag::DoAction(DoAction::decode(reader, context)?),
        types::tag::DEFINE_SOUND => MovieTag::DefineSound(DefineSound::decode(reader, context)?),
        types::tag::PLACE_OBJECT_2 => {
            MovieTag::PlaceObject2(PlaceObject2::decode(reader, context)?)
        }
        types::tag::REMOVE_OBJECT_2 => {
            MovieTag::RemoveObject2(RemoveObject2::decode(reader, context)?)
        }
        types::tag::FRAME_LABEL => MovieTag::FrameLabel(FrameLabel::decode(reader, context)?),
        types::tag::FONT_INFO_2 => MovieTag::FontInfo2(FontInfo2::decode(reader, context)?),
        types::tag::DEFINE_BINARY_DATA => {
            MovieTag::DefineData(DefineData::decode(reader, context)?)
        }
        _ => MovieTag::Raw(RawTag::decode(reader, context)?),
    };
    Ok(Some(tag))
}
