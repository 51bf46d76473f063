//! Whole-stream round trips and context-scoping behaviour across siblings.

use swftag::action::{Action, BasicAction, GetUrl, GotoFrame};
use swftag::datatype::{Color, ColorTransform, CoordTransform};
use swftag::tags::{
    Background, DefineData, DefineSound, DoAction, FontInfo2, FrameLabel, PlaceObject2, RawTag,
    RemoveObject2, ShowFrame, SoundFormat,
};
use swftag::{decode_tags, encode_tags, Context, MovieTag};

fn sample_stream() -> Vec<MovieTag> {
    let mut place = PlaceObject2::show(1, 1).unwrap();
    place.transform = Some(CoordTransform::translate(100, 200));
    place.color_transform = Some(ColorTransform::add(10, 20, 30, 40));

    let mut font = FontInfo2::new(3, String::from("Serif"), false, true).unwrap();
    font.add_code(0x61);

    let mut label = FrameLabel::new(String::from("start")).unwrap();
    label.anchor = true;

    vec![
        MovieTag::Background(Background::new(Color::rgb(0x33, 0x66, 0x99))),
        MovieTag::DefineSound(
            DefineSound::new(2, SoundFormat::Mp3, 11025, 1, 2, 500, vec![0x55; 80]).unwrap(),
        ),
        MovieTag::FontInfo2(font),
        MovieTag::DefineData(DefineData::new(4, vec![0xDE, 0xAD]).unwrap()),
        MovieTag::FrameLabel(label),
        MovieTag::PlaceObject2(place),
        MovieTag::DoAction(DoAction::new(vec![
            Action::GotoFrame(GotoFrame::new(2)),
            Action::GetUrl(GetUrl::new("http://example.com", "_top").unwrap()),
            Action::Basic(BasicAction::Play),
            Action::Basic(BasicAction::End),
        ])),
        MovieTag::ShowFrame(ShowFrame),
        MovieTag::RemoveObject2(RemoveObject2::new(1)),
        MovieTag::Raw(RawTag::new(777, vec![1, 2, 3]).unwrap()),
        MovieTag::ShowFrame(ShowFrame),
    ]
}

#[test]
fn stream_round_trips_through_bytes() {
    let tags = sample_stream();
    let mut cx = Context::new();
    let bytes = encode_tags(&tags, &mut cx).unwrap();
    assert_eq!(&bytes[bytes.len() - 2..], &[0x00, 0x00]);

    let mut cx = Context::new();
    let decoded = decode_tags(&bytes, &mut cx).unwrap();
    assert_eq!(decoded, tags);

    // A second encode of the decoded stream reproduces the bytes exactly.
    let mut cx = Context::new();
    assert_eq!(encode_tags(&decoded, &mut cx).unwrap(), bytes);
}

#[test]
fn transparency_does_not_leak_to_siblings() {
    // PlaceObject2 raises the transparency flag for its nested colour
    // transform; the Background that follows must still decode a 3-byte RGB
    // colour, which only happens if the flag was restored.
    let mut place = PlaceObject2::show(1, 1).unwrap();
    place.color_transform = Some(ColorTransform::add(1, 2, 3, 4));
    let tags = vec![
        MovieTag::PlaceObject2(place),
        MovieTag::Background(Background::new(Color::rgb(9, 8, 7))),
        MovieTag::ShowFrame(ShowFrame),
    ];

    let mut cx = Context::new();
    let bytes = encode_tags(&tags, &mut cx).unwrap();
    assert!(!cx.transparent);

    let mut cx = Context::new();
    let decoded = decode_tags(&bytes, &mut cx).unwrap();
    assert!(!cx.transparent);
    assert_eq!(decoded, tags);

    let MovieTag::PlaceObject2(place) = &decoded[0] else {
        panic!("wrong variant");
    };
    assert_eq!(place.color_transform.as_ref().unwrap().add_alpha, 4);
}

#[test]
fn truncated_stream_reports_out_of_bounds() {
    let tags = sample_stream();
    let mut cx = Context::new();
    let bytes = encode_tags(&tags, &mut cx).unwrap();

    let mut cx = Context::new();
    let err = decode_tags(&bytes[..bytes.len() / 2], &mut cx);
    assert!(err.is_err());
}

#[test]
fn decoding_is_stable_over_repeated_passes() {
    let tags = sample_stream();
    let mut cx = Context::new();
    let bytes = encode_tags(&tags, &mut cx).unwrap();

    for _ in 0..3 {
        let mut cx = Context::new();
        let decoded = decode_tags(&bytes, &mut cx).unwrap();
        let mut cx = Context::new();
        assert_eq!(encode_tags(&decoded, &mut cx).unwrap(), bytes);
    }
}
