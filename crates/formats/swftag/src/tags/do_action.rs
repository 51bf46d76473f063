use crate::action::{decode_action, Action};
use crate::coder::{Context, Encodeable, Reader, Writer};
use crate::error::Result;
use crate::tag::{header_size, TagFrame};
use crate::types;

/// Actions executed when the current frame is displayed. The body is a
/// nested action stream decoded to the frame boundary; well-formed files end
/// it with the basic End action, but the boundary is what terminates the
/// decode.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DoAction {
    pub actions: Vec<Action>,
}

impl DoAction {
    pub fn new(actions: Vec<Action>) -> Self {
        Self { actions }
    }

    pub fn decode(reader: &mut Reader, context: &mut Context) -> Result<Self> {
        let frame = TagFrame::read(reader)?;
        let mut actions = Vec::new();
        while reader.pointer() < frame.end() {
            actions.push(decode_action(reader, context)?);
        }
        frame.verify("DoAction", reader.pointer())?;
        Ok(Self { actions })
    }

    fn body_length(&self, context: &mut Context) -> usize {
        self.actions
            .iter()
            .map(|a| a.encoded_size(context))
            .sum()
    }
}

impl Encodeable for DoAction {
    fn encoded_size(&self, context: &mut Context) -> usize {
        let body = self.body_length(context);
        header_size(body) + body
    }

    fn encode(&self, writer: &mut Writer, context: &mut Context) -> Result<()> {
        let frame = TagFrame::write(writer, types::tag::DO_ACTION, self.body_length(context))?;
        for action in &self.actions {
            action.encode(writer, context)?;
        }
        frame.verify("DoAction", writer.pointer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{BasicAction, GotoFrame};
    use crate::error::Error;

    fn fixture() -> DoAction {
        DoAction::new(vec![
            Action::GotoFrame(GotoFrame::new(4)),
            Action::Basic(BasicAction::Play),
            Action::Basic(BasicAction::End),
        ])
    }

    #[test]
    fn test_round_trip() {
        let mut cx = Context::new();
        let tag = fixture();
        let size = tag.encoded_size(&mut cx);
        let mut w = Writer::with_capacity(size);
        tag.encode(&mut w, &mut cx).unwrap();
        assert!(w.eof());
        let bytes = w.into_bytes();
        assert_eq!(
            bytes,
            vec![0x07, 0x03, 0x81, 0x02, 0x00, 0x04, 0x00, 0x06, 0x00]
        );

        let mut r = Reader::new(&bytes);
        assert_eq!(DoAction::decode(&mut r, &mut cx).unwrap(), tag);
        assert!(r.eof());
    }

    #[test]
    fn test_overshooting_action_fails_framing() {
        // The declared tag length ends mid-GotoFrame, so the nested action
        // overshoots the frame boundary by two bytes.
        let bytes = [0x03, 0x03, 0x81, 0x02, 0x00, 0x04, 0x00];
        let mut cx = Context::new();
        let mut r = Reader::new(&bytes);
        let err = DoAction::decode(&mut r, &mut cx).unwrap_err();
        assert!(matches!(
            err,
            Error::LengthMismatch {
                kind: "DoAction",
                offset: 0,
                length: 3,
                delta: 2,
            }
        ));
    }
}
