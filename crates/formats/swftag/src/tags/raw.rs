use crate::coder::{Context, Encodeable, Reader, Writer};
use crate::error::{Error, Result};
use crate::tag::{header_size, TagFrame};
use crate::types;

/// Opaque fallback for tag codes the factory does not recognise.
///
/// The exact body span is preserved so an unknown tag survives a decode and
/// re-encode byte for byte. This is what keeps the codec forward-compatible
/// with record kinds added to the format after this crate was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTag {
    code: u16,
    pub data: Vec<u8>,
}

impl RawTag {
    pub fn new(code: i32, data: Vec<u8>) -> Result<Self> {
        if !(1..=types::tag::MAX as i32).contains(&code) {
            return Err(Error::OutOfRange {
                min: 1,
                max: types::tag::MAX as i32,
                value: code,
            });
        }
        Ok(Self {
            code: code as u16,
            data,
        })
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn decode(reader: &mut Reader, _context: &mut Context) -> Result<Self> {
        let frame = TagFrame::read(reader)?;
        let data = reader.read_bytes(frame.length)?;
        frame.verify("RawTag", reader.pointer())?;
        Ok(Self {
            code: frame.code,
            data,
        })
    }
}

impl Encodeable for RawTag {
    fn encoded_size(&self, _context: &mut Context) -> usize {
        header_size(self.data.len()) + self.data.len()
    }

    fn encode(&self, writer: &mut Writer, _context: &mut Context) -> Result<()> {
        let frame = TagFrame::write(writer, self.code, self.data.len())?;
        writer.write_bytes(&self.data)?;
        frame.verify("RawTag", writer.pointer())
    }
}
