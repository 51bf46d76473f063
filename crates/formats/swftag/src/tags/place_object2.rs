use crate::coder::{Context, Encodeable, Reader, Writer};
use crate::datatype::{ColorTransform, CoordTransform};
use crate::error::Result;
use crate::tag::{header_size, TagFrame};
use crate::tags::check_identifier;
use crate::types;

/// Presence flags for the optional fields, one bit each.
const HAS_MODIFY: u8 = 0x01;
const HAS_IDENTIFIER: u8 = 0x02;
const HAS_TRANSFORM: u8 = 0x04;
const HAS_COLOR_TRANSFORM: u8 = 0x08;
const HAS_RATIO: u8 = 0x10;
const HAS_NAME: u8 = 0x20;
const HAS_CLIP_DEPTH: u8 = 0x40;
const HAS_CLIP_EVENTS: u8 = 0x80;

/// Places an object on the display list, or modifies the one already at the
/// given layer. Every field after the layer number is optional and announced
/// by a presence-flag byte.
///
/// The nested colour transform always carries alpha terms, so the ambient
/// transparency flag is raised for that one field and restored afterwards.
/// Clip-event handlers are carried as an opaque byte span running to the end
/// of the tag body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaceObject2 {
    identifier: Option<u16>,
    pub layer: u16,
    pub modify: bool,
    pub transform: Option<CoordTransform>,
    pub color_transform: Option<ColorTransform>,
    pub ratio: Option<u16>,
    pub name: Option<String>,
    pub clip_depth: Option<u16>,
    pub clip_events: Option<Vec<u8>>,
}

impl PlaceObject2 {
    /// Place a new object on `layer`.
    pub fn show(identifier: i32, layer: u16) -> Result<Self> {
        Ok(Self {
            identifier: Some(check_identifier(identifier)?),
            layer,
            ..Self::default()
        })
    }

    /// Modify the object already placed on `layer`.
    pub fn modify(layer: u16) -> Self {
        Self {
            layer,
            modify: true,
            ..Self::default()
        }
    }

    /// Replace the object on `layer` with another definition.
    pub fn replace(identifier: i32, layer: u16) -> Result<Self> {
        Ok(Self {
            identifier: Some(check_identifier(identifier)?),
            layer,
            modify: true,
            ..Self::default()
        })
    }

    pub fn identifier(&self) -> Option<u16> {
        self.identifier
    }

    pub fn set_identifier(&mut self, identifier: i32) -> Result<()> {
        self.identifier = Some(check_identifier(identifier)?);
        Ok(())
    }

    pub fn clear_identifier(&mut self) {
        self.identifier = None;
    }

    fn flags(&self) -> u8 {
        let mut flags = 0;
        if self.modify {
            flags |= HAS_MODIFY;
        }
        if self.identifier.is_some() {
            flags |= HAS_IDENTIFIER;
        }
        if self.transform.is_some() {
            flags |= HAS_TRANSFORM;
        }
        if self.color_transform.is_some() {
            flags |= HAS_COLOR_TRANSFORM;
        }
        if self.ratio.is_some() {
            flags |= HAS_RATIO;
        }
        if self.name.is_some() {
            flags |= HAS_NAME;
        }
        if self.clip_depth.is_some() {
            flags |= HAS_CLIP_DEPTH;
        }
        if self.clip_events.is_some() {
            flags |= HAS_CLIP_EVENTS;
        }
        flags
    }

    pub fn decode(reader: &mut Reader, context: &mut Context) -> Result<Self> {
        let frame = TagFrame::read(reader)?;

        let flags = reader.read_u8()?;
        let layer = reader.read_u16()?;
        let identifier = if flags & HAS_IDENTIFIER != 0 {
            Some(reader.read_u16()?)
        } else {
            None
        };
        let transform = if flags & HAS_TRANSFORM != 0 {
            Some(CoordTransform::decode(reader)?)
        } else {
            None
        };
        let color_transform = if flags & HAS_COLOR_TRANSFORM != 0 {
            let saved = context.transparent;
            context.transparent = true;
            let result = ColorTransform::decode(reader, context);
            context.transparent = saved;
            Some(result?)
        } else {
            None
        };
        let ratio = if flags & HAS_RATIO != 0 {
            Some(reader.read_u16()?)
        } else {
            None
        };
        let name = if flags & HAS_NAME != 0 {
            Some(reader.read_string(context)?)
        } else {
            None
        };
        let clip_depth = if flags & HAS_CLIP_DEPTH != 0 {
            Some(reader.read_u16()?)
        } else {
            None
        };
        let clip_events = if flags & HAS_CLIP_EVENTS != 0 {
            Some(reader.read_bytes(frame.remaining_bytes(reader.pointer()))?)
        } else {
            None
        };

        frame.verify("PlaceObject2", reader.pointer())?;
        Ok(Self {
            identifier,
            layer,
            modify: flags & HAS_MODIFY != 0,
            transform,
            color_transform,
            ratio,
            name,
            clip_depth,
            clip_events,
        })
    }

    fn body_length(&self, context: &mut Context) -> usize {
        let mut length = 3;
        if self.identifier.is_some() {
            length += 2;
        }
        if let Some(transform) = &self.transform {
            length += transform.encoded_size(context);
        }
        if let Some(color_transform) = &self.color_transform {
            let saved = context.transparent;
            context.transparent = true;
            length += color_transform.encoded_size(context);
            context.transparent = saved;
        }
        if self.ratio.is_some() {
            length += 2;
        }
        if let Some(name) = &self.name {
            length += context.string_length(name);
        }
        if self.clip_depth.is_some() {
            length += 2;
        }
        if let Some(events) = &self.clip_events {
            length += events.len();
        }
        length
    }
}

impl Encodeable for PlaceObject2 {
    fn encoded_size(&self, context: &mut Context) -> usize {
        let body = self.body_length(context);
        header_size(body) + body
    }

    fn encode(&self, writer: &mut Writer, context: &mut Context) -> Result<()> {
        let frame = TagFrame::write(
            writer,
            types::tag::PLACE_OBJECT_2,
            self.body_length(context),
        )?;

        writer.write_u8(self.flags())?;
        writer.write_u16(self.layer)?;
        if let Some(identifier) = self.identifier {
            writer.write_u16(identifier)?;
        }
        if let Some(transform) = &self.transform {
            transform.encode(writer, context)?;
        }
        if let Some(color_transform) = &self.color_transform {
            let saved = context.transparent;
            context.transparent = true;
            let result = color_transform.encode(writer, context);
            context.transparent = saved;
            result?;
        }
        if let Some(ratio) = self.ratio {
            writer.write_u16(ratio)?;
        }
        if let Some(name) = &self.name {
            writer.write_string(name, context)?;
        }
        if let Some(clip_depth) = self.clip_depth {
            writer.write_u16(clip_depth)?;
        }
        if let Some(events) = &self.clip_events {
            writer.write_bytes(events)?;
        }

        frame.verify("PlaceObject2", writer.pointer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn round_trip(tag: PlaceObject2) -> Vec<u8> {
        let mut cx = Context::new();
        let size = tag.encoded_size(&mut cx);
        let mut w = Writer::with_capacity(size);
        tag.encode(&mut w, &mut cx).unwrap();
        assert!(w.eof());
        let bytes = w.into_bytes();

        let mut r = Reader::new(&bytes);
        assert_eq!(PlaceObject2::decode(&mut r, &mut cx).unwrap(), tag);
        assert!(r.eof());
        bytes
    }

    #[test]
    fn test_show_fixture() {
        let mut tag = PlaceObject2::show(2, 1).unwrap();
        tag.transform = Some(CoordTransform::translate(1, 2));
        let bytes = round_trip(tag);
        assert_eq!(
            bytes,
            vec![0x87, 0x06, 0x06, 0x01, 0x00, 0x02, 0x00, 0x06, 0x50]
        );
    }

    #[test]
    fn test_modify_only() {
        let bytes = round_trip(PlaceObject2::modify(3));
        assert_eq!(bytes, vec![0x83, 0x06, 0x01, 0x03, 0x00]);
    }

    #[test]
    fn test_all_fields() {
        let mut tag = PlaceObject2::replace(7, 2).unwrap();
        tag.transform = Some(CoordTransform::translate(10, -20));
        tag.color_transform = Some(ColorTransform::add(1, 2, 3, 4));
        tag.ratio = Some(0x1234);
        tag.name = Some(String::from("button"));
        tag.clip_depth = Some(5);
        tag.clip_events = Some(vec![0xDE, 0xAD, 0xBE, 0xEF]);
        round_trip(tag);
    }

    #[test]
    fn test_color_transform_scopes_transparency() {
        let mut tag = PlaceObject2::show(1, 1).unwrap();
        tag.color_transform = Some(ColorTransform::add(1, 2, 3, 4));
        let mut cx = Context::new();
        assert!(!cx.transparent);

        let size = tag.encoded_size(&mut cx);
        let mut w = Writer::with_capacity(size);
        tag.encode(&mut w, &mut cx).unwrap();
        assert!(w.eof());
        assert!(!cx.transparent);

        let mut r = Reader::new(w.data());
        let decoded = PlaceObject2::decode(&mut r, &mut cx).unwrap();
        assert!(!cx.transparent);
        // The alpha term survives because the nested decode ran transparent.
        assert_eq!(decoded.color_transform.unwrap().add_alpha, 4);
    }

    #[test]
    fn test_identifier_fence() {
        assert!(matches!(
            PlaceObject2::show(0, 1),
            Err(Error::OutOfRange { value: 0, .. })
        ));
        let mut tag = PlaceObject2::show(1, 1).unwrap();
        assert!(tag.set_identifier(65536).is_err());
        assert_eq!(tag.identifier(), Some(1));
    }
}
