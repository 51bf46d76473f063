//! Feeds arbitrary bytes to the action decoder, draining the buffer the way
//! a DoAction body would. Errors are fine; panics are not.

#![no_main]

use libfuzzer_sys::fuzz_target;

use swftag::action::decode_action;
use swftag::{Context, Reader};

fuzz_target!(|data: &[u8]| {
    let mut context = Context::new();
    let mut reader = Reader::new(data);
    while !reader.eof() {
        if decode_action(&mut reader, &mut context).is_err() {
            break;
        }
    }
});
