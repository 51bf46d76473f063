//! Zero-length marker tags: a header, no body.

use crate::coder::{Context, Encodeable, Reader, Writer};
use crate::error::Result;
use crate::tag::TagFrame;
use crate::types;

/// Marks the end of a frame: everything placed since the previous marker is
/// displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShowFrame;

impl ShowFrame {
    pub fn decode(reader: &mut Reader) -> Result<Self> {
        let frame = TagFrame::read(reader)?;
        frame.verify("ShowFrame", reader.pointer())?;
        Ok(Self)
    }
}

impl Encodeable for ShowFrame {
    fn encoded_size(&self, _context: &mut Context) -> usize {
        2
    }

    fn encode(&self, writer: &mut Writer, _context: &mut Context) -> Result<()> {
        let frame = TagFrame::write(writer, types::tag::SHOW_FRAME, 0)?;
        frame.verify("ShowFrame", writer.pointer())
    }
}

/// Hints that the file's vector paths originated as PostScript outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PathsArePostscript;

impl PathsArePostscript {
    pub fn decode(reader: &mut Reader) -> Result<Self> {
        let frame = TagFrame::read(reader)?;
        frame.verify("PathsArePostscript", reader.pointer())?;
        Ok(Self)
    }
}

impl Encodeable for PathsArePostscript {
    fn encoded_size(&self, _context: &mut Context) -> usize {
        2
    }

    fn encode(&self, writer: &mut Writer, _context: &mut Context) -> Result<()> {
        let frame = TagFrame::write(writer, types::tag::PATHS_ARE_POSTSCRIPT, 0)?;
        frame.verify("PathsArePostscript", writer.pointer())
    }
}
