use crate::coder::{Context, Encodeable, Reader, Writer};
use crate::error::Result;
use crate::tag::{header_size, TagFrame};
use crate::tags::check_identifier;
use crate::types;

/// An opaque blob of application data embedded in the movie, addressed by a
/// definition identifier. A reserved 32-bit word sits between the identifier
/// and the payload; it is always written as zero and ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefineData {
    identifier: u16,
    pub data: Vec<u8>,
}

impl DefineData {
    pub fn new(identifier: i32, data: Vec<u8>) -> Result<Self> {
        Ok(Self {
            identifier: check_identifier(identifier)?,
            data,
        })
    }

    pub fn identifier(&self) -> u16 {
        self.identifier
    }

    pub fn set_identifier(&mut self, identifier: i32) -> Result<()> {
        self.identifier = check_identifier(identifier)?;
        Ok(())
    }

    pub fn decode(reader: &mut Reader, _context: &mut Context) -> Result<Self> {
        let frame = TagFrame::read(reader)?;
        let identifier = reader.read_u16()?;
        reader.read_u32()?; // reserved
        let data = reader.read_bytes(frame.length.saturating_sub(6))?;
        frame.verify("DefineData", reader.pointer())?;
        Ok(Self { identifier, data })
    }

    fn body_length(&self) -> usize {
        6 + self.data.len()
    }
}

impl Encodeable for DefineData {
    fn encoded_size(&self, _context: &mut Context) -> usize {
        header_size(self.body_length()) + self.body_length()
    }

    fn encode(&self, writer: &mut Writer, _context: &mut Context) -> Result<()> {
        let frame = TagFrame::write(writer, types::tag::DEFINE_BINARY_DATA, self.body_length())?;
        writer.write_u16(self.identifier)?;
        writer.write_u32(0)?;
        writer.write_bytes(&self.data)?;
        frame.verify("DefineData", writer.pointer())
    }
}
