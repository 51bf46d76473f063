//! The movie tag catalog: one file per record kind.
//!
//! Every type here follows the same protocol: `decode` reads the tag header
//! through [`TagFrame`](crate::tag::TagFrame), consumes exactly the declared
//! body, and verifies it landed on the declared end; `encoded_size` computes
//! the full encoded length (header included) and `encode` emits the identical
//! form and runs the same end-of-record check against the write cursor.
//! Range-constrained fields are validated in constructors and setters, never
//! at encode time.

mod background;
mod define_data;
mod define_sound;
mod do_action;
mod font_info2;
mod frame_label;
mod markers;
mod place_object2;
mod raw;
mod remove_object2;

pub use background::Background;
pub use define_data::DefineData;
pub use define_sound::{DefineSound, SoundFormat};
pub use do_action::DoAction;
pub use font_info2::{FontInfo2, TextEncoding};
pub use frame_label::FrameLabel;
pub use markers::{PathsArePostscript, ShowFrame};
pub use place_object2::PlaceObject2;
pub use raw::RawTag;
pub use remove_object2::RemoveObject2;

use crate::error::{Error, Result};

/// Definition identifiers live in 1..=65535; zero is reserved.
pub(crate) fn check_identifier(identifier: i32) -> Result<u16> {
    if !(1..=65535).contains(&identifier) {
        return Err(Error::OutOfRange {
            min: 1,
            max: 65535,
            value: identifier,
        });
    }
    Ok(identifier as u16)
}
