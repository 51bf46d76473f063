use crate::coder::{Context, Encodeable, Reader, Writer};
use crate::error::Result;

/// An RGB colour with an alpha channel that only exists on the wire when the
/// enclosing record has transparency in effect.
///
/// Records that do not support transparency decode three bytes and leave
/// `alpha` at fully opaque; records that do decode a fourth byte. The same
/// context flag drives both directions, so a colour written under one setting
/// reads back identically under the same setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    pub const OPAQUE: u8 = 255;

    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: Self::OPAQUE,
        }
    }

    pub fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub fn decode(reader: &mut Reader, context: &Context) -> Result<Self> {
        let red = reader.read_u8()?;
        let green = reader.read_u8()?;
        let blue = reader.read_u8()?;
        let alpha = if context.transparent {
            reader.read_u8()?
        } else {
            Self::OPAQUE
        };
        Ok(Self {
            red,
            green,
            blue,
            alpha,
        })
    }
}

impl Encodeable for Color {
    fn encoded_size(&self, context: &mut Context) -> usize {
        if context.transparent {
            4
        } else {
            3
        }
    }

    fn encode(&self, writer: &mut Writer, context: &mut Context) -> Result<()> {
        writer.write_u8(self.red)?;
        writer.write_u8(self.green)?;
        writer.write_u8(self.blue)?;
        if context.transparent {
            writer.write_u8(self.alpha)?;
        }
        Ok(())
    }
}
