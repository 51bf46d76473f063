use crate::error::{Error, Result};

/// Character encoding used for string fields in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringEncoding {
    /// UTF-8, the default for Flash 6 and later files.
    Utf8,
    /// Latin-1 single-byte strings from older authoring tools. Characters
    /// outside the Latin-1 range encode as `?`, matching how the original
    /// files were produced.
    Ansi,
}

impl StringEncoding {
    pub fn decode(self, bytes: Vec<u8>, offset: usize) -> Result<String> {
        match self {
            StringEncoding::Utf8 => String::from_utf8(bytes)
                .map_err(|source| Error::InvalidString { offset, source }),
            StringEncoding::Ansi => Ok(bytes.iter().map(|&b| b as char).collect()),
        }
    }

    pub fn encode(self, s: &str) -> Vec<u8> {
        match self {
            StringEncoding::Utf8 => s.as_bytes().to_vec(),
            StringEncoding::Ansi => s
                .chars()
                .map(|c| if (c as u32) < 0x100 { c as u8 } else { b'?' })
                .collect(),
        }
    }

    /// Encoded byte length of `s`, excluding any terminator.
    pub fn encoded_length(self, s: &str) -> usize {
        match self {
            StringEncoding::Utf8 => s.len(),
            StringEncoding::Ansi => s.chars().count(),
        }
    }
}

/// Ambient state for one decode or encode traversal.
///
/// A context is created by the caller, passed by reference through every
/// nested record call, and mutated by records that change how their children
/// are coded. A record that flips a flag for its children restores the prior
/// value before returning, so siblings are unaffected; the one exception is
/// the style index widths, which shape records deliberately leave changed for
/// the records that follow them (that is what the widths mean on the wire).
#[derive(Debug, Clone)]
pub struct Context {
    /// Whether colours and colour transforms carry an alpha channel.
    pub transparent: bool,
    /// Encoding for string fields.
    pub encoding: StringEncoding,
    /// Width in bits of fill style indexes inside shape records.
    pub fill_bits: u32,
    /// Width in bits of line style indexes inside shape records.
    pub line_bits: u32,
}

impl Context {
    pub fn new() -> Self {
        Context {
            transparent: false,
            encoding: StringEncoding::Utf8,
            fill_bits: 0,
            line_bits: 0,
        }
    }

    /// Encoded byte length of `s` including the NUL terminator, so record
    /// sizing passes can account for strings without encoding them twice.
    pub fn string_length(&self, s: &str) -> usize {
        self.encoding.encoded_length(s) + 1
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
