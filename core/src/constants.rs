/// Fixed size of a hitspool record header, in bytes.
/// Every record is at least this long; `record_length` counts the header too.
pub const RECORD_HEADER_LEN: usize = 54;

/// Padding between `record_type` and `hardware_id`.
pub const HEADER_PADDING_LEN: usize = 8;

/// Width of a hardware (mainboard) id rendered as lowercase hex.
pub const HARDWARE_ID_HEX_WIDTH: usize = 12;

/// Default extension of hitspool data files inside a hub directory.
pub const DEFAULT_DATA_EXTENSION: &str = "dat";

/// Bit positions and masks of `header_word_0`.
pub mod word0 {
    pub const HIT_SIZE_MASK: u32     = 0x7ff;
    pub const ATWD_SIDE_SHIFT: u32   = 11;
    pub const LC_SHIFT: u32          = 16;
    pub const LC_MASK: u32           = 0x3;
    pub const TRIGGER_SHIFT: u32     = 18;
    pub const TRIGGER_MASK: u32      = 0xfff;
}

/// Bit positions and masks of `header_word_1` (charge stamp).
pub mod word1 {
    pub const SHIFT_FLAG: u32      = 0x8000_0000;
    pub const POSITION_SHIFT: u32  = 27;
    pub const POSITION_MASK: u32   = 0xf;
    pub const PRE_SHIFT: u32       = 18;
    pub const MAX_SHIFT: u32       = 9;
    pub const SAMPLE_MASK: u32     = 0x1ff;
}
