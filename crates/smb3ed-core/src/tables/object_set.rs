//! Per-object-set reference tables
//!
//! Object sets (0..=15) pick the bit-layout rules for a level: which design
//! definition file applies, where the set's secondary-area data lives, and
//! which (domain, index) combinations carry an explicit length byte.

use crate::error::{Error, Result};

/// Object sets addressable by a header nibble
pub const OBJECT_SET_TABLE_SIZE: usize = 16;

/// Domains per object set (top 3 bits of an object's first byte)
pub const DOMAIN_COUNT: usize = 8;

/// Object design definition files (`romobjs0.dat` .. `romobjs11.dat`)
pub const DEFINITION_COUNT: usize = 12;

/// Secondary-area pointer window for one object set.
///
/// A header's next-area pointer is valid for a set only if it falls inside
/// `[min, max]` after the global level offset and the set's own `offset`
/// have been added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectSetPointer {
    /// Per-set adjustment added on top of the global level pointer offset
    pub offset: u32,
    /// First valid secondary-area pointer
    pub min: u32,
    /// Last valid secondary-area pointer
    pub max: u32,
}

impl ObjectSetPointer {
    const fn new(offset: u32, min: u32, max: u32) -> Self {
        Self { offset, min, max }
    }
}

/// Pointer windows, one 0x2000-byte level-data bank per object set
const OBJECT_SET_POINTERS: [ObjectSetPointer; OBJECT_SET_TABLE_SIZE] = [
    ObjectSetPointer::new(0x0000, 0x18010, 0x1A00F), // 0
    ObjectSetPointer::new(0x4000, 0x1E010, 0x2000F), // 1, plains
    ObjectSetPointer::new(0x4000, 0x20010, 0x2200F), // 2, dungeon
    ObjectSetPointer::new(0x0000, 0x26010, 0x2800F), // 3, hilly
    ObjectSetPointer::new(0x2000, 0x2A010, 0x2C00F), // 4, sky
    ObjectSetPointer::new(0x2000, 0x2C010, 0x2E00F), // 5, piranha plant
    ObjectSetPointer::new(0x6000, 0x30010, 0x3200F), // 6, water
    ObjectSetPointer::new(0x0000, 0x32010, 0x3400F), // 7, mushroom house
    ObjectSetPointer::new(0x6000, 0x34010, 0x3600F), // 8, pipe
    ObjectSetPointer::new(0x2000, 0x28010, 0x2A00F), // 9, desert
    ObjectSetPointer::new(0x4000, 0x22010, 0x2400F), // 10, ship
    ObjectSetPointer::new(0x2000, 0x24010, 0x2600F), // 11, giant
    ObjectSetPointer::new(0x6000, 0x36010, 0x3800F), // 12, ice
    ObjectSetPointer::new(0x0000, 0x1A010, 0x1C00F), // 13, cloudy
    ObjectSetPointer::new(0x0000, 0x1C010, 0x1E00F), // 14, overworld
    ObjectSetPointer::new(0x4000, 0x38010, 0x3A00F), // 15, fortress
];

/// Design definition file index per object set
const OBJECT_SET_DEFINITIONS: [usize; OBJECT_SET_TABLE_SIZE] =
    [1, 1, 4, 2, 3, 9, 8, 1, 8, 7, 5, 9, 10, 6, 11, 1];

/// Four-byte object masks, one u16 per domain: bit `n` set means objects
/// whose index high nibble is `n` carry an explicit length byte.
const FOUR_BYTE_MASKS: [[u16; DOMAIN_COUNT]; OBJECT_SET_TABLE_SIZE] = [
    [0x0FFF, 0x0000, 0x0700, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000], // 0
    [0x7FF8, 0x00F0, 0x0F00, 0x00FF, 0x0000, 0xF000, 0x0F00, 0x0000], // 1
    [0x3FF0, 0x0F00, 0x0000, 0x00F0, 0xF000, 0x0000, 0x0000, 0x0000], // 2
    [0x7FF8, 0x00F0, 0x0FF0, 0x0000, 0x0000, 0x0000, 0xF000, 0x0000], // 3
    [0x1FF0, 0x0000, 0x00F0, 0x0F00, 0x0000, 0x0000, 0x0000, 0x0000], // 4
    [0x0FF0, 0x0F00, 0x0000, 0x0000, 0x00F0, 0x0000, 0x0000, 0x0000], // 5
    [0x3FF8, 0x00F0, 0x0F00, 0x0000, 0x0000, 0xF000, 0x0000, 0x0000], // 6
    [0x07F0, 0x0000, 0x0000, 0x00F0, 0x0000, 0x0000, 0x0000, 0x0000], // 7
    [0x1FF8, 0x0F00, 0x00F0, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000], // 8
    [0x7FF0, 0x00F0, 0x0000, 0x0F00, 0x0000, 0x0000, 0x0000, 0x0000], // 9
    [0x0FF8, 0x0000, 0x0F00, 0x0000, 0x00F0, 0x0000, 0x0000, 0x0000], // 10
    [0x3FF0, 0x0F00, 0x00F0, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000], // 11
    [0x1FF0, 0x00F0, 0x0000, 0x0F00, 0x0000, 0x0000, 0x0000, 0x0000], // 12
    [0x0FF8, 0x0000, 0x00F0, 0x0000, 0x0F00, 0x0000, 0x0000, 0x0000], // 13
    [0x0070, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000], // 14
    [0x7FF0, 0x0F00, 0x00F0, 0x0000, 0x0000, 0xF000, 0x0000, 0x0000], // 15
];

/// Look up an object set's pointer window, failing for sets above 15
pub fn pointer(object_set: u8) -> Result<&'static ObjectSetPointer> {
    OBJECT_SET_POINTERS
        .get(object_set as usize)
        .ok_or(Error::InvalidObjectSet(object_set))
}

/// Pointer window for a header-derived set; total because the argument is
/// masked to the header nibble's width.
pub(crate) fn pointer_for_nibble(object_set: u8) -> &'static ObjectSetPointer {
    &OBJECT_SET_POINTERS[(object_set & 0x0F) as usize]
}

/// Design definition index (0..12) for an object set
pub fn definition(object_set: u8) -> Result<usize> {
    OBJECT_SET_DEFINITIONS
        .get(object_set as usize)
        .copied()
        .ok_or(Error::InvalidObjectSet(object_set))
}

/// Whether objects with this (domain, index high nibble) carry a length byte
pub fn is_four_byte(object_set: u8, domain: u8, index_nibble: u8) -> Result<bool> {
    let masks = FOUR_BYTE_MASKS
        .get(object_set as usize)
        .ok_or(Error::InvalidObjectSet(object_set))?;
    let mask = masks[(domain & 0b111) as usize];
    Ok((mask >> (index_nibble & 0x0F)) & 1 == 1)
}
