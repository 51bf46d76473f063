/// Single-byte stack-machine actions.
///
/// Every opcode below 0x80 is body-less on the wire: one byte in, one byte
/// out. The table covers the codes the format defines; bytes that match no
/// entry fall back to the opaque raw action so the stream still round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BasicAction {
    End = 0x00,
    NextFrame = 0x04,
    PrevFrame = 0x05,
    Play = 0x06,
    Stop = 0x07,
    ToggleQuality = 0x08,
    StopSounds = 0x09,
    IntegerAdd = 0x0A,
    Subtract = 0x0B,
    Multiply = 0x0C,
    Divide = 0x0D,
    IntegerEquals = 0x0E,
    IntegerLess = 0x0F,
    And = 0x10,
    Or = 0x11,
    Not = 0x12,
    StringEquals = 0x13,
    StringLength = 0x14,
    StringExtract = 0x15,
    Pop = 0x17,
    ToInteger = 0x18,
    GetVariable = 0x1C,
    SetVariable = 0x1D,
    SetTarget2 = 0x20,
    StringAdd = 0x21,
    GetProperty = 0x22,
    SetProperty = 0x23,
    CloneSprite = 0x24,
    RemoveSprite = 0x25,
    Trace = 0x26,
    StartDrag = 0x27,
    EndDrag = 0x28,
    StringLess = 0x29,
    Throw = 0x2A,
    Cast = 0x2B,
    Implements = 0x2C,
    RandomNumber = 0x30,
    MultibyteStringLength = 0x31,
    CharToAscii = 0x32,
    AsciiToChar = 0x33,
    GetTime = 0x34,
    MultibyteStringExtract = 0x35,
    MultibyteCharToAscii = 0x36,
    MultibyteAsciiToChar = 0x37,
    DeleteVariable = 0x3A,
    Delete = 0x3B,
    InitVariable = 0x3C,
    ExecuteFunction = 0x3D,
    Return = 0x3E,
    Modulo = 0x3F,
    NamedObject = 0x40,
    NewVariable = 0x41,
    NewArray = 0x42,
    NewObject = 0x43,
    GetType = 0x44,
    GetTarget = 0x45,
    Enumerate = 0x46,
    Add = 0x47,
    Less = 0x48,
    Equals = 0x49,
    ToNumber = 0x4A,
    ToString = 0x4B,
    Duplicate = 0x4C,
    Swap = 0x4D,
    GetAttribute = 0x4E,
    SetAttribute = 0x4F,
    Increment = 0x50,
    Decrement = 0x51,
    ExecuteMethod = 0x52,
    NewMethod = 0x53,
    InstanceOf = 0x54,
    EnumerateObject = 0x55,
    BitwiseAnd = 0x60,
    BitwiseOr = 0x61,
    BitwiseXor = 0x62,
    ShiftLeft = 0x63,
    ArithmeticShiftRight = 0x64,
    ShiftRight = 0x65,
    StrictEquals = 0x66,
    Greater = 0x67,
    StringGreater = 0x68,
    Extends = 0x69,
}

impl BasicAction {
    /// Wire opcode.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Map a wire opcode back to the table entry, if it has one.
    pub fn from_code(code: u8) -> Option<Self> {
        use BasicAction::*;
        let action = match code {
            0x00 => End,
            0x04 => NextFrame,
            0x05 => PrevFrame,
            0x06 => Play,
            0x07 => Stop,
            0x08 => ToggleQuality,
            0x09 => StopSounds,
            0x0A => IntegerAdd,
            0x0B => Subtract,
            0x0C => Multiply,
            0x0D => Divide,
            0x0E => IntegerEquals,
            0x0F => IntegerLess,
            0x10 => And,
            0x11 => Or,
            0x12 => Not,
            0x13 => StringEquals,
            0x14 => StringLength,
            0x15 => StringExtract,
            0x17 => Pop,
            0x18 => ToInteger,
            0x1C => GetVariable,
            0x1D => SetVariable,
            0x20 => SetTarget2,
            0x21 => StringAdd,
            0x22 => GetProperty,
            0x23 => SetProperty,
            0x24 => CloneSprite,
            0x25 => RemoveSprite,
            0x26 => Trace,
            0x27 => StartDrag,
            0x28 => EndDrag,
            0x29 => StringLess,
            0x2A => Throw,
            0x2B => Cast,
            0x2C => Implements,
            0x30 => RandomNumber,
            0x31 => MultibyteStringLength,
            0x32 => CharToAscii,
            0x33 => AsciiToChar,
            0x34 => GetTime,
            0x35 => MultibyteStringExtract,
            0x36 => MultibyteCharToAscii,
            0x37 => MultibyteAsciiToChar,
            0x3A => DeleteVariable,
            0x3B => Delete,
            0x3C => InitVariable,
            0x3D => ExecuteFunction,
            0x3E => Return,
            0x3F => Modulo,
            0x40 => NamedObject,
            0x41 => NewVariable,
            0x42 => NewArray,
            0x43 => NewObject,
            0x44 => GetType,
            0x45 => GetTarget,
            0x46 => Enumerate,
            0x47 => Add,
            0x48 => Less,
            0x49 => Equals,
            0x4A => ToNumber,
            0x4B => ToString,
            0x4C => Duplicate,
            0x4D => Swap,
            0x4E => GetAttribute,
            0x4F => SetAttribute,
            0x50 => Increment,
            0x51 => Decrement,
            0x52 => ExecuteMethod,
            0x53 => NewMethod,
            0x54 => InstanceOf,
            0x55 => EnumerateObject,
            0x60 => BitwiseAnd,
            0x61 => BitwiseOr,
            0x62 => BitwiseXor,
            0x63 => ShiftLeft,
            0x64 => ArithmeticShiftRight,
            0x65 => ShiftRight,
            0x66 => StrictEquals,
            0x67 => Greater,
            0x68 => StringGreater,
            0x69 => Extends,
            _ => return None,
        };
        Some(action)
    }
}
