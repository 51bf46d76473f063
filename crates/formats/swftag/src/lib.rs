//! Bidirectional codec for tag-length-value movie streams.
//!
//! Three layers:
//! - **coder**: bit-granular cursors over byte buffers plus the shared
//!   decode/encode [`Context`]
//! - **datatype** / **fillstyle** / **shape** / **action**: the nested
//!   structures tag bodies are built from
//! - **tag** / **tags** / **movie**: framed top-level records, the closed
//!   [`MovieTag`] catalog with a raw fallback, and whole-stream entry points
//!
//! Encoding is two-pass: `encoded_size` computes the exact byte length of
//! every record, the stream is written into a buffer of exactly that
//! capacity, and each record verifies its cursor landed on its declared end.

pub mod action;
pub mod coder;
pub mod datatype;
pub mod error;
pub mod fillstyle;
pub mod movie;
pub mod shape;
pub mod tag;
pub mod tags;
pub mod types;

pub use coder::{Context, Encodeable, Reader, StringEncoding, Writer};
pub use error::{Error, Result};
pub use movie::{decode_tags, encode_tags};
pub use tag::{decode_tag, MovieTag};
