//! Decode/encode throughput over a synthetic tag stream.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use swftag::action::{Action, BasicAction, GetUrl, GotoFrame};
use swftag::datatype::{Color, ColorTransform, CoordTransform};
use swftag::tags::{
    Background, DefineData, DefineSound, DoAction, FrameLabel, PlaceObject2, RawTag,
    RemoveObject2, ShowFrame, SoundFormat,
};
use swftag::{decode_tags, encode_tags, Context, MovieTag};

fn synthetic_stream(frames: usize) -> Vec<MovieTag> {
    let mut tags = vec![MovieTag::Background(Background::new(Color::rgb(
        0x10, 0x20, 0x30,
    )))];

    tags.push(MovieTag::DefineSound(
        DefineSound::new(1, SoundFormat::Mp3, 22050, 2, 2, 2048, vec![0x5A; 512]).unwrap(),
    ));
    tags.push(MovieTag::DefineData(
        DefineData::new(2, vec![0xA5; 256]).unwrap(),
    ));

    for frame in 0..frames {
        let layer = (frame % 16 + 1) as u16;
        let mut place = PlaceObject2::show(1, layer).unwrap();
        place.transform = Some(CoordTransform::translate(frame as i32 * 20, 40));
        place.color_transform = Some(ColorTransform::add(1, 2, 3, 4));
        tags.push(MovieTag::PlaceObject2(place));

        if frame % 8 == 0 {
            tags.push(MovieTag::FrameLabel(
                FrameLabel::new(format!("frame{frame}")).unwrap(),
            ));
            tags.push(MovieTag::DoAction(DoAction::new(vec![
                Action::GotoFrame(GotoFrame::new(frame as u16)),
                Action::GetUrl(GetUrl::new("http://example.com", "_self").unwrap()),
                Action::Basic(BasicAction::Play),
                Action::Basic(BasicAction::End),
            ])));
        }
        if frame % 5 == 0 {
            tags.push(MovieTag::Raw(
                RawTag::new(900, vec![frame as u8; 24]).unwrap(),
            ));
        }

        tags.push(MovieTag::RemoveObject2(RemoveObject2::new(layer)));
        tags.push(MovieTag::ShowFrame(ShowFrame));
    }
    tags
}

fn bench_roundtrip(c: &mut Criterion) {
    let tags = synthetic_stream(100);
    let mut cx = Context::new();
    let bytes = encode_tags(&tags, &mut cx).unwrap();

    let mut group = c.benchmark_group("tag_stream");
    group.throughput(Throughput::Bytes(bytes.len() as u64));

    group.bench_function("decode", |b| {
        b.iter(|| {
            let mut cx = Context::new();
            decode_tags(black_box(&bytes), &mut cx).unwrap()
        });
    });

    group.bench_function("encode", |b| {
        b.iter(|| {
            let mut cx = Context::new();
            encode_tags(black_box(&tags), &mut cx).unwrap()
        });
    });

    group.bench_function("decode_encode", |b| {
        b.iter(|| {
            let mut cx = Context::new();
            let decoded = decode_tags(black_box(&bytes), &mut cx).unwrap();
            let mut cx = Context::new();
            encode_tags(&decoded, &mut cx).unwrap()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_roundtrip);
criterion_main!(benches);
