use crate::coder::{Context, Encodeable, Reader, Writer};
use crate::error::{Error, Result};
use crate::tag::{header_size, TagFrame};
use crate::tags::check_identifier;
use crate::types;

/// Compression scheme of a sound's sample data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundFormat {
    /// Uncompressed samples in the byte order of the authoring platform.
    NativePcm,
    Adpcm,
    Mp3,
    /// Uncompressed little-endian samples.
    Pcm,
    Nellymoser8K,
    Nellymoser,
}

impl SoundFormat {
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(SoundFormat::NativePcm),
            1 => Ok(SoundFormat::Adpcm),
            2 => Ok(SoundFormat::Mp3),
            3 => Ok(SoundFormat::Pcm),
            5 => Ok(SoundFormat::Nellymoser8K),
            6 => Ok(SoundFormat::Nellymoser),
            _ => Err(Error::UnsupportedVariant {
                kind: "sound format",
                code,
            }),
        }
    }

    pub fn code(self) -> u32 {
        match self {
            SoundFormat::NativePcm => 0,
            SoundFormat::Adpcm => 1,
            SoundFormat::Mp3 => 2,
            SoundFormat::Pcm => 3,
            SoundFormat::Nellymoser8K => 5,
            SoundFormat::Nellymoser => 6,
        }
    }
}

/// Playback rates the format supports, in hertz.
const RATES: &[i32] = &[5512, 11025, 22050, 44100];

/// A sound definition: format descriptor bit fields followed by the sample
/// data, referenced later by its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefineSound {
    identifier: u16,
    pub format: SoundFormat,
    rate: i32,
    sample_size: u32,
    channel_count: u32,
    sample_count: u32,
    sound: Vec<u8>,
}

impl DefineSound {
    pub fn new(
        identifier: i32,
        format: SoundFormat,
        rate: i32,
        channel_count: i32,
        sample_size: i32,
        sample_count: i32,
        sound: Vec<u8>,
    ) -> Result<Self> {
        let mut tag = Self {
            identifier: check_identifier(identifier)?,
            format,
            rate: 5512,
            sample_size: 1,
            channel_count: 1,
            sample_count: 1,
            sound,
        };
        tag.set_rate(rate)?;
        tag.set_channel_count(channel_count)?;
        tag.set_sample_size(sample_size)?;
        tag.set_sample_count(sample_count)?;
        Ok(tag)
    }

    pub fn identifier(&self) -> u16 {
        self.identifier
    }

    pub fn set_identifier(&mut self, identifier: i32) -> Result<()> {
        self.identifier = check_identifier(identifier)?;
        Ok(())
    }

    /// Playback rate in hertz.
    pub fn rate(&self) -> i32 {
        self.rate
    }

    pub fn set_rate(&mut self, rate: i32) -> Result<()> {
        if !RATES.contains(&rate) {
            return Err(Error::InvalidValue {
                allowed: RATES,
                value: rate,
            });
        }
        self.rate = rate;
        Ok(())
    }

    /// Bytes per sample, 1 or 2.
    pub fn sample_size(&self) -> u32 {
        self.sample_size
    }

    pub fn set_sample_size(&mut self, size: i32) -> Result<()> {
        if !(1..=2).contains(&size) {
            return Err(Error::OutOfRange {
                min: 1,
                max: 2,
                value: size,
            });
        }
        self.sample_size = size as u32;
        Ok(())
    }

    /// 1 for mono, 2 for stereo.
    pub fn channel_count(&self) -> u32 {
        self.channel_count
    }

    pub fn set_channel_count(&mut self, channels: i32) -> Result<()> {
        if !(1..=2).contains(&channels) {
            return Err(Error::OutOfRange {
                min: 1,
                max: 2,
                value: channels,
            });
        }
        self.channel_count = channels as u32;
        Ok(())
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    pub fn set_sample_count(&mut self, count: i32) -> Result<()> {
        if count < 1 {
            return Err(Error::OutOfRange {
                min: 1,
                max: i32::MAX,
                value: count,
            });
        }
        self.sample_count = count as u32;
        Ok(())
    }

    pub fn sound(&self) -> &[u8] {
        &self.sound
    }

    pub fn set_sound(&mut self, sound: Vec<u8>) {
        self.sound = sound;
    }

    pub fn decode(reader: &mut Reader, _context: &mut Context) -> Result<Self> {
        let frame = TagFrame::read(reader)?;

        let identifier = reader.read_u16()?;
        let format = SoundFormat::from_code(reader.read_ubits(4)? as i32)?;
        let rate = RATES[reader.read_ubits(2)? as usize];
        let sample_size = reader.read_ubits(1)? + 1;
        let channel_count = reader.read_ubits(1)? + 1;
        let sample_count = reader.read_u32()?;
        // Truncated declared lengths saturate so the frame check reports the
        // exact discrepancy instead of underflowing.
        let sound = reader.read_bytes(frame.length.saturating_sub(7))?;

        frame.verify("DefineSound", reader.pointer())?;
        Ok(Self {
            identifier,
            format,
            rate,
            sample_size,
            channel_count,
            sample_count,
            sound,
        })
    }

    fn body_length(&self) -> usize {
        7 + self.sound.len()
    }
}

impl Encodeable for DefineSound {
    fn encoded_size(&self, _context: &mut Context) -> usize {
        header_size(self.body_length()) + self.body_length()
    }

    fn encode(&self, writer: &mut Writer, _context: &mut Context) -> Result<()> {
        let frame = TagFrame::write(writer, types::tag::DEFINE_SOUND, self.body_length())?;

        writer.write_u16(self.identifier)?;
        writer.write_ubits(4, self.format.code())?;
        let rate_code = RATES.iter().position(|&r| r == self.rate).unwrap_or(0);
        writer.write_ubits(2, rate_code as u32)?;
        writer.write_ubits(1, self.sample_size - 1)?;
        writer.write_ubits(1, self.channel_count - 1)?;
        writer.write_u32(self.sample_count)?;
        writer.write_bytes(&self.sound)?;

        frame.verify("DefineSound", writer.pointer())
    }
}
