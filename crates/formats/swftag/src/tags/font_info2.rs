use crate::coder::{Context, Encodeable, Reader, Writer};
use crate::error::{Error, Result};
use crate::tag::{header_size, TagFrame};
use crate::tags::check_identifier;
use crate::types;

/// Character set used to interpret the code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Unicode,
    ShiftJis,
    Ansi,
}

impl TextEncoding {
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(TextEncoding::Unicode),
            1 => Ok(TextEncoding::ShiftJis),
            2 => Ok(TextEncoding::Ansi),
            _ => Err(Error::UnsupportedVariant {
                kind: "text encoding",
                code,
            }),
        }
    }

    pub fn code(self) -> u32 {
        match self {
            TextEncoding::Unicode => 0,
            TextEncoding::ShiftJis => 1,
            TextEncoding::Ansi => 2,
        }
    }
}

/// Maps a font definition to a device font: family name, style flags, spoken
/// language and the character code for each glyph.
///
/// The name field is pascal-style on the wire but written through the
/// NUL-terminated string routine: the length byte holds the string length
/// without the terminator, the terminator is emitted anyway, and the cursor
/// is then backed up one byte so the flag bits overwrite it. The writer's
/// OR-accumulating bit writes make that overwrite safe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontInfo2 {
    identifier: u16,
    pub name: String,
    pub small: bool,
    pub encoding: TextEncoding,
    pub italic: bool,
    pub bold: bool,
    pub language: u8,
    codes: Vec<u16>,
}

impl FontInfo2 {
    pub fn new(identifier: i32, name: String, bold: bool, italic: bool) -> Result<Self> {
        Ok(Self {
            identifier: check_identifier(identifier)?,
            name,
            small: false,
            encoding: TextEncoding::Unicode,
            italic,
            bold,
            language: 0,
            codes: Vec::new(),
        })
    }

    pub fn identifier(&self) -> u16 {
        self.identifier
    }

    pub fn set_identifier(&mut self, identifier: i32) -> Result<()> {
        self.identifier = check_identifier(identifier)?;
        Ok(())
    }

    pub fn codes(&self) -> &[u16] {
        &self.codes
    }

    /// Append a character code; its position matches the glyph index in the
    /// font definition.
    pub fn add_code(&mut self, code: u16) {
        self.codes.push(code);
    }

    pub fn set_codes(&mut self, codes: Vec<u16>) {
        self.codes = codes;
    }

    pub fn decode(reader: &mut Reader, context: &mut Context) -> Result<Self> {
        let frame = TagFrame::read(reader)?;

        let identifier = reader.read_u16()?;
        let name_length = reader.read_u8()? as usize;
        let mut name = reader.read_fixed_string(name_length, context)?;
        while name.ends_with('\0') {
            name.pop();
        }

        reader.read_ubits(2)?; // reserved
        let small = reader.read_bit()?;
        let encoding = TextEncoding::from_code(reader.read_ubits(2)? as i32)?;
        let italic = reader.read_bit()?;
        let bold = reader.read_bit()?;
        reader.read_bit()?; // wide codes, always re-encoded as set

        let language = reader.read_u8()?;

        let mut codes = Vec::new();
        while reader.pointer() < frame.end() {
            codes.push(reader.read_u16()?);
        }

        frame.verify("FontInfo2", reader.pointer())?;
        Ok(Self {
            identifier,
            name,
            small,
            encoding,
            italic,
            bold,
            language,
            codes,
        })
    }

    fn body_length(&self, context: &Context) -> usize {
        4 + context.string_length(&self.name) + self.codes.len() * 2
    }
}

impl Encodeable for FontInfo2 {
    fn encoded_size(&self, context: &mut Context) -> usize {
        let body = self.body_length(context);
        header_size(body) + body
    }

    fn encode(&self, writer: &mut Writer, context: &mut Context) -> Result<()> {
        let frame = TagFrame::write(writer, types::tag::FONT_INFO_2, self.body_length(context))?;

        writer.write_u16(self.identifier)?;
        writer.write_u8((context.string_length(&self.name) - 1) as u8)?;
        writer.write_string(&self.name, context)?;
        // Back up over the terminator: the flag bits land in its place.
        writer.adjust_pointer(-8)?;
        writer.write_ubits(2, 0)?;
        writer.write_bit(self.small)?;
        writer.write_ubits(2, self.encoding.code())?;
        writer.write_bit(self.italic)?;
        writer.write_bit(self.bold)?;
        writer.write_bit(true)?;
        writer.write_u8(self.language)?;

        for code in &self.codes {
            writer.write_u16(*code)?;
        }

        frame.verify("FontInfo2", writer.pointer())
    }
}
