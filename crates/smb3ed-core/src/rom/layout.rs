//! ROM layout constants for the SMB3 binary format
//!
//! This module centralizes the absolute file offsets and size constants the
//! decoders depend on. All offsets are absolute offsets into the flat ROM
//! image, iNES header included.

/// Adjustments turning header-stored addresses into absolute file offsets
pub mod pointers {
    /// Added to the header's next-area address
    pub const LEVEL_OFFSET: u32 = 0x10010;

    /// Added to the header's enemy-list address
    pub const ENEMY_OFFSET: u32 = 0x10;
}

/// Palette data layout
pub mod palette {
    /// Base address of the overworld (map) palette data
    pub const MAP_PALETTE_ADDRESS: usize = 0x36BE2;

    /// Base address of object set 0's palette data; the other level sets
    /// follow at `PALETTE_DATA_SIZE` strides
    pub const PALETTE_ADDRESS: usize = 0x36CA2;

    pub const LEVEL_GROUPS_PER_OBJECT_SET: usize = 8;
    pub const ENEMY_GROUPS_PER_OBJECT_SET: usize = 4;
    pub const PALETTES_PER_GROUP: usize = 4;
    pub const COLORS_PER_PALETTE: usize = 4;

    /// Bytes of palette data per object set (12 groups of 4 palettes of 4
    /// one-byte colors)
    pub const PALETTE_DATA_SIZE: usize = (LEVEL_GROUPS_PER_OBJECT_SET
        + ENEMY_GROUPS_PER_OBJECT_SET)
        * PALETTES_PER_GROUP
        * COLORS_PER_PALETTE;
}

/// Level header layout
pub mod header {
    /// Level header size in bytes
    pub const HEADER_LENGTH: usize = 9;

    /// Fixed level height in blocks; the format only stores the width
    pub const LEVEL_DEFAULT_HEIGHT: usize = 27;
}

/// Object sets with palette data in the ROM (0..=13 plus the overworld set)
pub const OBJECT_SET_COUNT: usize = 15;

/// Object set reserved for overworld maps
pub const OVERWORLD_OBJECT_SET: u8 = 14;

/// End-of-stream marker for object and enemy placement lists
pub const STREAM_SENTINEL: u8 = 0xFF;
