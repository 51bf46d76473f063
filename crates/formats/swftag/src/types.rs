//! Wire codes for the tag and action families.
//!
//! Type codes are static properties of each record kind: they are matched on
//! during dispatch and written during encoding, never stored in the decoded
//! structs.

/// Top-level movie tag type codes (10 bits, packed with the compact length
/// into the 16-bit tag header).
pub mod tag {
    pub const END: u16 = 0;
    pub const SHOW_FRAME: u16 = 1;
    pub const SET_BACKGROUND_COLOR: u16 = 9;
    pub const DO_ACTION: u16 = 12;
    pub const DEFINE_SOUND: u16 = 14;
    pub const PATHS_ARE_POSTSCRIPT: u16 = 25;
    pub const PLACE_OBJECT_2: u16 = 26;
    pub const REMOVE_OBJECT_2: u16 = 28;
    pub const FRAME_LABEL: u16 = 43;
    pub const FONT_INFO_2: u16 = 62;
    pub const DEFINE_BINARY_DATA: u16 = 87;

    /// Largest value a 10-bit type code can carry.
    pub const MAX: u16 = 0x3FF;
}

/// Action opcodes (one unprefixed byte inside DoAction bodies). Codes below
/// 0x80 are single-byte stack-machine operations; codes at or above 0x80 are
/// followed by a 16-bit length and a payload.
pub mod action {
    pub const GOTO_FRAME: u8 = 0x81;
    pub const GET_URL: u8 = 0x83;
    pub const REGISTER_COPY: u8 = 0x87;
    pub const TABLE: u8 = 0x88;
    pub const SET_TARGET: u8 = 0x8B;
    pub const GOTO_LABEL: u8 = 0x8C;
}
