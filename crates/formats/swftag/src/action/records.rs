//! Length-framed actions: opcode byte, 16-bit little-endian body length,
//! body. Unlike the top-level tag header there is no compact/extended switch;
//! the length is always a full word.

use crate::coder::{Context, Encodeable, Reader, Writer};
use crate::error::{Error, Result};
use crate::types;

/// Read the opcode and length of a framed action, returning the expected end
/// position for the body.
fn read_frame(reader: &mut Reader) -> Result<(usize, usize)> {
    let start = reader.pointer();
    reader.read_u8()?;
    let length = reader.read_u16()? as usize;
    Ok((start, reader.pointer() + (length << 3)))
}

/// The length word is a full 16 bits and nothing more; a body longer than
/// that cannot be framed.
fn check_body_length(length: usize) -> Result<u16> {
    u16::try_from(length).map_err(|_| Error::OutOfRange {
        min: 0,
        max: u16::MAX as i32,
        value: i32::try_from(length).unwrap_or(i32::MAX),
    })
}

fn verify_frame(kind: &'static str, start: usize, end: usize, reader: &Reader) -> Result<()> {
    if reader.pointer() != end {
        return Err(Error::LengthMismatch {
            kind,
            offset: start >> 3,
            length: (end - start - 24) >> 3,
            delta: (reader.pointer() as i64 - end as i64) >> 3,
        });
    }
    Ok(())
}

/// Jump the timeline to a frame number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GotoFrame {
    pub frame: u16,
}

impl GotoFrame {
    pub fn new(frame: u16) -> Self {
        Self { frame }
    }

    pub fn decode(reader: &mut Reader) -> Result<Self> {
        let (start, end) = read_frame(reader)?;
        let frame = reader.read_u16()?;
        verify_frame("GotoFrame", start, end, reader)?;
        Ok(Self { frame })
    }
}

impl Encodeable for GotoFrame {
    fn encoded_size(&self, _context: &mut Context) -> usize {
        5
    }

    fn encode(&self, writer: &mut Writer, _context: &mut Context) -> Result<()> {
        writer.write_u8(types::action::GOTO_FRAME)?;
        writer.write_u16(2)?;
        writer.write_u16(self.frame)
    }
}

/// Fetch a resource and direct it at a window or level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetUrl {
    url: String,
    pub target: String,
}

impl GetUrl {
    pub fn new(url: impl Into<String>, target: impl Into<String>) -> Result<Self> {
        let url = url.into();
        if url.is_empty() {
            return Err(Error::Empty { kind: "url" });
        }
        Ok(Self {
            url,
            target: target.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn set_url(&mut self, url: impl Into<String>) -> Result<()> {
        let url = url.into();
        if url.is_empty() {
            return Err(Error::Empty { kind: "url" });
        }
        self.url = url;
        Ok(())
    }

    pub fn decode(reader: &mut Reader, context: &Context) -> Result<Self> {
        let (start, end) = read_frame(reader)?;
        let url = reader.read_string(context)?;
        let target = reader.read_string(context)?;
        verify_frame("GetUrl", start, end, reader)?;
        Ok(Self { url, target })
    }
}

impl Encodeable for GetUrl {
    fn encoded_size(&self, context: &mut Context) -> usize {
        3 + context.string_length(&self.url) + context.string_length(&self.target)
    }

    fn encode(&self, writer: &mut Writer, context: &mut Context) -> Result<()> {
        let length = check_body_length(
            context.string_length(&self.url) + context.string_length(&self.target),
        )?;
        writer.write_u8(types::action::GET_URL)?;
        writer.write_u16(length)?;
        writer.write_string(&self.url, context)?;
        writer.write_string(&self.target, context)
    }
}

/// Jump the timeline to a named frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GotoLabel {
    label: String,
}

impl GotoLabel {
    pub fn new(label: impl Into<String>) -> Result<Self> {
        let label = label.into();
        if label.is_empty() {
            return Err(Error::Empty { kind: "label" });
        }
        Ok(Self { label })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn decode(reader: &mut Reader, context: &Context) -> Result<Self> {
        let (start, end) = read_frame(reader)?;
        let label = reader.read_string(context)?;
        verify_frame("GotoLabel", start, end, reader)?;
        Ok(Self { label })
    }
}

impl Encodeable for GotoLabel {
    fn encoded_size(&self, context: &mut Context) -> usize {
        3 + context.string_length(&self.label)
    }

    fn encode(&self, writer: &mut Writer, context: &mut Context) -> Result<()> {
        let length = check_body_length(context.string_length(&self.label))?;
        writer.write_u8(types::action::GOTO_LABEL)?;
        writer.write_u16(length)?;
        writer.write_string(&self.label, context)
    }
}

/// Redirect subsequent actions at a named movie clip. An empty name restores
/// the main timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetTarget {
    pub target: String,
}

impl SetTarget {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn decode(reader: &mut Reader, context: &Context) -> Result<Self> {
        let (start, end) = read_frame(reader)?;
        let target = reader.read_string(context)?;
        verify_frame("SetTarget", start, end, reader)?;
        Ok(Self { target })
    }
}

impl Encodeable for SetTarget {
    fn encoded_size(&self, context: &mut Context) -> usize {
        3 + context.string_length(&self.target)
    }

    fn encode(&self, writer: &mut Writer, context: &mut Context) -> Result<()> {
        let length = check_body_length(context.string_length(&self.target))?;
        writer.write_u8(types::action::SET_TARGET)?;
        writer.write_u16(length)?;
        writer.write_string(&self.target, context)
    }
}

/// Copy the top of the stack into one of the interpreter's registers.
///
/// Fixed 4-byte wire layout carried over from existing files: the length
/// word always reads 2 even though the body is the single register byte, and
/// decoders consume the register byte rather than trusting the length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterCopy {
    register: u8,
}

impl RegisterCopy {
    pub fn new(register: i32) -> Result<Self> {
        if !(0..=255).contains(&register) {
            return Err(Error::OutOfRange {
                min: 0,
                max: 255,
                value: register,
            });
        }
        Ok(Self {
            register: register as u8,
        })
    }

    pub fn register(&self) -> u8 {
        self.register
    }

    pub fn decode(reader: &mut Reader) -> Result<Self> {
        reader.read_u8()?;
        reader.read_u16()?;
        Ok(Self {
            register: reader.read_u8()?,
        })
    }
}

impl Encodeable for RegisterCopy {
    fn encoded_size(&self, _context: &mut Context) -> usize {
        4
    }

    fn encode(&self, writer: &mut Writer, _context: &mut Context) -> Result<()> {
        writer.write_u8(types::action::REGISTER_COPY)?;
        writer.write_u16(2)?;
        writer.write_u8(self.register)
    }
}

/// The string literal table that indexed push actions refer into.
///
/// Quirk preserved from existing files: a table with zero entries declares a
/// body length covering only the count word, so any trailing bytes re-enter
/// the action stream instead of being swallowed as table data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    pub values: Vec<String>,
}

impl Table {
    pub fn new(values: Vec<String>) -> Self {
        Self { values }
    }

    pub fn add(&mut self, value: impl Into<String>) -> &mut Self {
        self.values.push(value.into());
        self
    }

    pub fn decode(reader: &mut Reader, context: &Context) -> Result<Self> {
        reader.read_u8()?;
        reader.read_u16()?;
        let count = reader.read_u16()? as usize;
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(reader.read_string(context)?);
        }
        Ok(Self { values })
    }

    fn body_length(&self, context: &Context) -> usize {
        2 + self
            .values
            .iter()
            .map(|v| context.string_length(v))
            .sum::<usize>()
    }
}

impl Encodeable for Table {
    fn encoded_size(&self, context: &mut Context) -> usize {
        3 + self.body_length(context)
    }

    fn encode(&self, writer: &mut Writer, context: &mut Context) -> Result<()> {
        // Each entry takes at least its terminator byte, so an in-range body
        // length also bounds the entry count word.
        let length = check_body_length(self.body_length(context))?;
        writer.write_u8(types::action::TABLE)?;
        writer.write_u16(length)?;
        writer.write_u16(self.values.len() as u16)?;
        for value in &self.values {
            writer.write_string(value, context)?;
        }
        Ok(())
    }
}

/// Opaque fallback for opcodes the factory does not recognise.
///
/// Codes at or above 0x80 keep their declared body so the byte span
/// re-encodes unchanged. Codes below 0x80 carry no length on the wire, so the
/// only lossless form is the bare opcode byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAction {
    pub code: u8,
    pub data: Vec<u8>,
}

impl RawAction {
    pub fn new(code: u8, data: Vec<u8>) -> Self {
        Self { code, data }
    }

    pub fn decode(reader: &mut Reader) -> Result<Self> {
        let code = reader.read_u8()?;
        let data = if code >= 0x80 {
            let length = reader.read_u16()? as usize;
            reader.read_bytes(length)?
        } else {
            Vec::new()
        };
        Ok(Self { code, data })
    }
}

impl Encodeable for RawAction {
    fn encoded_size(&self, _context: &mut Context) -> usize {
        if self.code >= 0x80 {
            3 + self.data.len()
        } else {
            1
        }
    }

    fn encode(&self, writer: &mut Writer, _context: &mut Context) -> Result<()> {
        if self.code >= 0x80 {
            let length = check_body_length(self.data.len())?;
            writer.write_u8(self.code)?;
            writer.write_u16(length)?;
            writer.write_bytes(&self.data)?;
        } else {
            writer.write_u8(self.code)?;
        }
        Ok(())
    }
}
