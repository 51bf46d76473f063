use crate::coder::{Context, Encodeable, Reader, Writer};
use crate::error::{Error, Result};
use crate::tag::{header_size, TagFrame};
use crate::types;

/// Names the current frame so actions can address it by label instead of
/// number. The optional anchor byte extends the tag body by one; its absence
/// in older files is detected from the frame boundary, not a flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLabel {
    label: String,
    pub anchor: bool,
}

impl FrameLabel {
    pub fn new(label: String) -> Result<Self> {
        if label.is_empty() {
            return Err(Error::Empty { kind: "label" });
        }
        Ok(Self {
            label,
            anchor: false,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: String) -> Result<()> {
        if label.is_empty() {
            return Err(Error::Empty { kind: "label" });
        }
        self.label = label;
        Ok(())
    }

    pub fn decode(reader: &mut Reader, context: &mut Context) -> Result<Self> {
        let frame = TagFrame::read(reader)?;
        let label = reader.read_string(context)?;
        let anchor = if reader.pointer() < frame.end() {
            reader.read_u8()? != 0
        } else {
            false
        };
        frame.verify("FrameLabel", reader.pointer())?;
        Ok(Self { label, anchor })
    }

    fn body_length(&self, context: &Context) -> usize {
        context.string_length(&self.label) + self.anchor as usize
    }
}

impl Encodeable for FrameLabel {
    fn encoded_size(&self, context: &mut Context) -> usize {
        let body = self.body_length(context);
        header_size(body) + body
    }

    fn encode(&self, writer: &mut Writer, context: &mut Context) -> Result<()> {
        let frame = TagFrame::write(writer, types::tag::FRAME_LABEL, self.body_length(context))?;
        writer.write_string(&self.label, context)?;
        if self.anchor {
            writer.write_u8(1)?;
        }
        frame.verify("FrameLabel", writer.pointer())
    }
}
