//! Whole-stream decode and encode.
//!
//! A tag stream is a sequence of framed records closed by a zero header
//! word. Decoding stops at that sentinel or at the end of the buffer;
//! encoding sizes everything up front, fills a fixed-capacity buffer and
//! appends the sentinel.

use crate::coder::{Context, Encodeable, Reader, Writer};
use crate::error::{Error, Result};
use crate::tag::{decode_tag, MovieTag};

/// Decode every tag in `data`, in order, until the end sentinel or the end
/// of the buffer. Context mutations made by one tag (string encoding, shape
/// table widths) stay in effect for its successors, so a stream must be
/// decoded front to back.
pub fn decode_tags(data: &[u8], context: &mut Context) -> Result<Vec<MovieTag>> {
    let mut reader = Reader::new(data);
    let mut tags = Vec::new();
    while !reader.eof() {
        match decode_tag(&mut reader, context)? {
            Some(tag) => tags.push(tag),
            None => break,
        }
    }
    Ok(tags)
}

/// Encode `tags` back to back and close the stream with the end sentinel.
///
/// The first pass sums every tag's encoded size so the buffer is allocated
/// once at its exact final length; the second pass must land the cursor on
/// that length exactly.
pub fn encode_tags(tags: &[MovieTag], context: &mut Context) -> Result<Vec<u8>> {
    let capacity: usize = tags
        .iter()
        .map(|tag| tag.encoded_size(context))
        .sum::<usize>()
        + 2;
    let mut writer = Writer::with_capacity(capacity);
    for tag in tags {
        tag.encode(&mut writer, context)?;
    }
    writer.write_u16(0)?;
    if !writer.eof() {
        return Err(Error::LengthMismatch {
            kind: "tag stream",
            offset: 0,
            length: capacity,
            delta: (writer.pointer() as i64 - (capacity as i64) * 8) >> 3,
        });
    }
    Ok(writer.into_bytes())
}
