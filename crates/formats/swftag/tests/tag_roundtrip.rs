//! Fixture-level round trips: known byte spans in, identical byte spans out.

use swftag::coder::Encodeable;
use swftag::datatype::{Color, CoordTransform};
use swftag::fillstyle::{decode_morph, FillStyle};
use swftag::tags::{FrameLabel, PathsArePostscript, RawTag};
use swftag::{decode_tag, Context, MovieTag, Reader, Writer};

fn encode_tag(tag: &MovieTag, cx: &mut Context) -> Vec<u8> {
    let size = tag.encoded_size(cx);
    let mut w = Writer::with_capacity(size);
    tag.encode(&mut w, cx).unwrap();
    assert!(w.eof());
    w.into_bytes()
}

#[test]
fn marker_decodes_from_compact_and_extended_forms() {
    let compact = [0x40, 0x06];
    let mut cx = Context::new();
    let mut r = Reader::new(&compact);
    let tag = decode_tag(&mut r, &mut cx).unwrap().unwrap();
    assert!(r.eof());
    assert_eq!(tag, MovieTag::PathsArePostscript(PathsArePostscript));

    // Same record with the 0x3F escape and a zero 32-bit length.
    let extended = [0x7F, 0x06, 0x00, 0x00, 0x00, 0x00];
    let mut r = Reader::new(&extended);
    let tag = decode_tag(&mut r, &mut cx).unwrap().unwrap();
    assert!(r.eof());
    assert_eq!(tag, MovieTag::PathsArePostscript(PathsArePostscript));

    // Re-encode always picks the compact form for a zero-length body.
    assert_eq!(encode_tag(&tag, &mut cx), compact.to_vec());
}

#[test]
fn morph_bitmap_fill_fixture_round_trips() {
    let bytes = [0x43, 0x01, 0x00, 0x06, 0x50, 0x06, 0x50];
    let mut cx = Context::new();
    let mut r = Reader::new(&bytes);
    let fill = decode_morph(&mut r, &mut cx).unwrap();
    assert!(r.eof());

    let FillStyle::MorphBitmap(morph) = &fill else {
        panic!("wrong variant: {fill:?}");
    };
    assert!(!morph.tiled);
    assert!(!morph.smoothed);
    assert_eq!(morph.identifier(), 1);
    assert_eq!(morph.start_transform, CoordTransform::translate(1, 2));
    assert_eq!(morph.end_transform, CoordTransform::translate(1, 2));

    let mut w = Writer::with_capacity(fill.encoded_size(&mut cx));
    fill.encode(&mut w, &mut cx).unwrap();
    assert!(w.eof());
    assert_eq!(w.into_bytes(), bytes.to_vec());
}

#[test]
fn unknown_tag_code_survives_byte_for_byte() {
    // Type code 999, length 4.
    let bytes = [0xC4, 0xF9, 0x01, 0x02, 0x03, 0x04];
    let mut cx = Context::new();
    let mut r = Reader::new(&bytes);
    let tag = decode_tag(&mut r, &mut cx).unwrap().unwrap();
    assert!(r.eof());

    let MovieTag::Raw(raw) = &tag else {
        panic!("wrong variant: {tag:?}");
    };
    assert_eq!(raw.code(), 999);
    assert_eq!(raw.data, vec![1, 2, 3, 4]);

    assert_eq!(encode_tag(&tag, &mut cx), bytes.to_vec());
}

#[test]
fn length_form_boundary_sits_at_62_bytes() {
    let mut cx = Context::new();

    let compact = MovieTag::Raw(RawTag::new(50, vec![0xAB; 62]).unwrap());
    let bytes = encode_tag(&compact, &mut cx);
    assert_eq!(bytes.len(), 2 + 62);
    assert_eq!(bytes[0] & 0x3F, 62);

    let extended = MovieTag::Raw(RawTag::new(50, vec![0xAB; 63]).unwrap());
    let bytes = encode_tag(&extended, &mut cx);
    assert_eq!(bytes.len(), 6 + 63);
    assert_eq!(bytes[0] & 0x3F, 0x3F);
    assert_eq!(&bytes[2..6], &[63, 0, 0, 0]);

    let mut r = Reader::new(&bytes);
    let decoded = decode_tag(&mut r, &mut cx).unwrap().unwrap();
    assert!(r.eof());
    assert_eq!(decoded, extended);
}

#[test]
fn decoded_values_drop_transient_lengths() {
    // Two labels with different header forms but equal fields compare equal
    // after decode: declared lengths are framing, not state.
    let mut cx = Context::new();
    let compact = [0xC2, 0x0A, b'a', 0x00];
    let extended = [0xFF, 0x0A, 0x02, 0x00, 0x00, 0x00, b'a', 0x00];

    let mut r = Reader::new(&compact);
    let first = FrameLabel::decode(&mut r, &mut cx).unwrap();
    let mut r = Reader::new(&extended);
    let second = FrameLabel::decode(&mut r, &mut cx).unwrap();
    assert_eq!(first, second);
}

#[test]
fn clone_is_deep() {
    let tag = MovieTag::Background(swftag::tags::Background::new(Color::rgb(1, 2, 3)));
    let copy = tag.clone();
    assert_eq!(copy, tag);
}
