//! Feeds arbitrary bytes to the tag-stream decoder. Malformed input must
//! come back as an error, never a panic, and anything that decodes must
//! re-encode without error, except for field values only a hand-built
//! stream can hold (see below).

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use swftag::{decode_tags, encode_tags, Context, Error, StringEncoding};

#[derive(Debug, Arbitrary)]
struct Input {
    ansi: bool,
    transparent: bool,
    data: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let mut context = Context::new();
    context.transparent = input.transparent;
    if input.ansi {
        context.encoding = StringEncoding::Ansi;
    }

    if let Ok(tags) = decode_tags(&input.data, &mut context) {
        let mut context = Context::new();
        context.transparent = input.transparent;
        if input.ansi {
            context.encoding = StringEncoding::Ansi;
        }
        // A bit field at the very bottom of its two's-complement range (for
        // example -2^30 read from a 31-bit field) decodes fine but needs a
        // wider field than the width prefix can declare, so the encoder
        // reports it as out of range. Any other failure is a bug.
        match encode_tags(&tags, &mut context) {
            Ok(_) | Err(Error::OutOfRange { .. }) => {}
            Err(err) => panic!("decoded stream failed to re-encode: {err}"),
        }
    }
});
