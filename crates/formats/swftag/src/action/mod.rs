//! The action (bytecode) family nested inside DoAction bodies.
//!
//! Actions are a second, self-contained tag family with its own framing:
//! the factory peeks one opcode byte, codes below 0x80 are complete in
//! themselves, and codes at or above 0x80 carry a 16-bit little-endian body
//! length. Unknown codes of either kind degrade to [`RawAction`] so a stream
//! containing opcodes this crate does not model still round-trips losslessly.

mod basic;
mod records;

pub use basic::BasicAction;
pub use records::{GetUrl, GotoFrame, GotoLabel, RawAction, RegisterCopy, SetTarget, Table};

use crate::coder::{Context, Encodeable, Reader, Writer};
use crate::error::Result;
use crate::types;

/// One decoded action.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Basic(BasicAction),
    GotoFrame(GotoFrame),
    GetUrl(GetUrl),
    GotoLabel(GotoLabel),
    SetTarget(SetTarget),
    RegisterCopy(RegisterCopy),
    Table(Table),
    Raw(RawAction),
}

impl Encodeable for Action {
    fn encoded_size(&self, context: &mut Context) -> usize {
        match self {
            Action::Basic(_) => 1,
            Action::GotoFrame(a) => a.encoded_size(context),
            Action::GetUrl(a) => a.encoded_size(context),
            Action::GotoLabel(a) => a.encoded_size(context),
            Action::SetTarget(a) => a.encoded_size(context),
            Action::RegisterCopy(a) => a.encoded_size(context),
            Action::Table(a) => a.encoded_size(context),
            Action::Raw(a) => a.encoded_size(context),
        }
    }

    fn encode(&self, writer: &mut Writer, context: &mut Context) -> Result<()> {
        match self {
            Action::Basic(a) => writer.write_u8(a.code()),
            Action::GotoFrame(a) => a.encode(writer, context),
            Action::GetUrl(a) => a.encode(writer, context),
            Action::GotoLabel(a) => a.encode(writer, context),
            Action::SetTarget(a) => a.encode(writer, context),
            Action::RegisterCopy(a) => a.encode(writer, context),
            Action::Table(a) => a.encode(writer, context),
            Action::Raw(a) => a.encode(writer, context),
        }
    }
}

/// Decode the next action. The opcode byte is peeked, not consumed, so each
/// concrete decoder reads its own framing.
pub fn decode_action(reader: &mut Reader, context: &mut Context) -> Result<Action> {
    let code = reader.scan_byte()?;

    if code < 0x80 {
        return Ok(match BasicAction::from_code(code) {
            Some(action) => {
                reader.read_u8()?;
                Action::Basic(action)
            }
            None => Action::Raw(RawAction::decode(reader)?),
        });
    }

    Ok(match code {
        types::action::GOTO_FRAME => Action::GotoFrame(GotoFrame::decode(reader)?),
        types::action::GET_URL => Action::GetUrl(GetUrl::decode(reader, context)?),
        types::action::GOTO_LABEL => Action::GotoLabel(GotoLabel::decode(reader, context)?),
        types::action::SET_TARGET => Action::SetTarget(SetTarget::decode(reader, context)?),
        types::action::REGISTER_COPY => Action::RegisterCopy(RegisterCopy::decode(reader)?),
        types::action::TABLE => Action::Table(Table::decode(reader, context)?),
        _ => Action::Raw(RawAction::decode(reader)?),
    })
}
