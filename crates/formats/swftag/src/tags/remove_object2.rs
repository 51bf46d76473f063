use crate::coder::{Context, Encodeable, Reader, Writer};
use crate::error::Result;
use crate::tag::TagFrame;
use crate::types;

/// Removes whatever object occupies the given display-list layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RemoveObject2 {
    pub layer: u16,
}

impl RemoveObject2 {
    pub fn new(layer: u16) -> Self {
        Self { layer }
    }

    pub fn decode(reader: &mut Reader, _context: &mut Context) -> Result<Self> {
        let frame = TagFrame::read(reader)?;
        let layer = reader.read_u16()?;
        frame.verify("RemoveObject2", reader.pointer())?;
        Ok(Self { layer })
    }
}

impl Encodeable for RemoveObject2 {
    fn encoded_size(&self, _context: &mut Context) -> usize {
        4
    }

    fn encode(&self, writer: &mut Writer, _context: &mut Context) -> Result<()> {
        let frame = TagFrame::write(writer, types::tag::REMOVE_OBJECT_2, 2)?;
        writer.write_u16(self.layer)?;
        frame.verify("RemoveObject2", writer.pointer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut cx = Context::new();
        let tag = RemoveObject2::new(0x1234);
        let mut w = Writer::with_capacity(tag.encoded_size(&mut cx));
        tag.encode(&mut w, &mut cx).unwrap();
        assert!(w.eof());
        let bytes = w.into_bytes();
        assert_eq!(bytes, vec![0x02, 0x07, 0x34, 0x12]);

        let mut r = Reader::new(&bytes);
        assert_eq!(RemoveObject2::decode(&mut r, &mut cx).unwrap(), tag);
        assert!(r.eof());
    }
}
