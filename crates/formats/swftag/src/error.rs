use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{need} bits at byte {offset:#x} overrun the buffer ({have} bits remain)")]
    OutOfBounds {
        offset: usize,
        need: usize,
        have: usize,
    },

    #[error(
        "{kind} at byte {offset:#x} declared {length} bytes but the cursor \
         landed {delta:+} bytes from the declared end"
    )]
    LengthMismatch {
        kind: &'static str,
        offset: usize,
        length: usize,
        delta: i64,
    },

    #[error("value {value} is outside the range {min}..={max}")]
    OutOfRange { min: i32, max: i32, value: i32 },

    #[error("value {value} is not one of {allowed:?}")]
    InvalidValue {
        allowed: &'static [i32],
        value: i32,
    },

    #[error("{kind} must not be empty")]
    Empty { kind: &'static str },

    #[error("unrecognised {kind} code {code}")]
    UnsupportedVariant { kind: &'static str, code: i32 },

    #[error("string at byte {offset:#x} is not valid UTF-8: {source}")]
    InvalidString {
        offset: usize,
        source: std::string::FromUtf8Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
