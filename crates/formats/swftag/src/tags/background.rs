use crate::coder::{Context, Encodeable, Reader, Writer};
use crate::datatype::Color;
use crate::error::Result;
use crate::tag::TagFrame;
use crate::types;

/// Sets the movie's background colour. The colour is plain RGB regardless of
/// the ambient transparency flag, so the flag is cleared for the nested
/// decode and restored afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Background {
    pub color: Color,
}

impl Background {
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    pub fn decode(reader: &mut Reader, context: &mut Context) -> Result<Self> {
        let frame = TagFrame::read(reader)?;
        let saved = context.transparent;
        context.transparent = false;
        let color = Color::decode(reader, context);
        context.transparent = saved;
        frame.verify("Background", reader.pointer())?;
        Ok(Self { color: color? })
    }
}

impl Encodeable for Background {
    fn encoded_size(&self, _context: &mut Context) -> usize {
        5
    }

    fn encode(&self, writer: &mut Writer, context: &mut Context) -> Result<()> {
        let frame = TagFrame::write(writer, types::tag::SET_BACKGROUND_COLOR, 3)?;
        let saved = context.transparent;
        context.transparent = false;
        let result = self.color.encode(writer, context);
        context.transparent = saved;
        result?;
        frame.verify("Background", writer.pointer())
    }
}
