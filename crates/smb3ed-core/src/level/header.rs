//! Level header decoding
//!
//! The 9-byte header in front of every level's object data. Bytes 0..4 hold
//! the secondary-area and enemy-list addresses; bytes 4..9 are bitfields.
//! Every bitfield is masked to the exact width of the table it indexes, so
//! the lookups here are total.

use serde::{Deserialize, Serialize};
use strum::{Display, FromRepr, IntoStaticStr};

use crate::error::Result;
use crate::rom::layout::header::HEADER_LENGTH;
use crate::rom::layout::pointers;
use crate::tables::object_set;

/// Player start X coordinates in blocks, indexed by the 2-bit header field
pub const X_POSITIONS: [u8; 4] = [0x01, 0x07, 0x08, 0x0D];

/// Player start Y coordinates in blocks, indexed by the 3-bit header field
pub const Y_POSITIONS: [u8; 8] = [0x01, 0x05, 0x08, 0x0C, 0x10, 0x14, 0x17, 0x18];

/// Music track names, indexed by the header's 4-bit music field
pub const MUSIC_NAMES: [&str; 16] = [
    "Plain level",
    "Underground",
    "Water level",
    "Fortress",
    "Boss",
    "Ship",
    "Battle",
    "P-Switch/Mushroom house (1)",
    "Hilly level",
    "Castle room",
    "Clouds/Sky",
    "P-Switch/Mushroom house (2)",
    "No music",
    "P-Switch/Mushroom house (1)",
    "No music",
    "World 7 map",
];

/// Graphic set names, indexed by the header's 5-bit graphic set field
pub const GRAPHIC_SET_NAMES: [&str; 32] = [
    "Mario graphics (1)",
    "Plain",
    "Fortress",
    "Underground (1)",
    "Sky",
    "Pipe/Water (1, Piranha Plant)",
    "Pipe/Water (2, Water)",
    "Mushroom house (1)",
    "Pipe/Water (3, Pipe)",
    "Desert",
    "Ship",
    "Giant",
    "Ice",
    "Clouds",
    "Underground (2)",
    "Spade bonus room",
    "Spade bonus",
    "Mushroom house (2)",
    "Pipe/Water (4)",
    "Hills",
    "Plain 2",
    "Tank",
    "Castle",
    "Mario graphics (2)",
    "Animated graphics (1)",
    "Animated graphics (2)",
    "Animated graphics (3)",
    "Animated graphics (4)",
    "Animated graphics (P-Switch)",
    "Game font/Course Clear graphics",
    "Animated graphics (5)",
    "Animated graphics (6)",
];

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Default,
    FromRepr,
    IntoStaticStr,
    Display,
)]
#[repr(u8)]
pub enum ScrollType {
    #[default]
    #[strum(serialize = "Horizontal, up when flying")]
    HorizontalFlying = 0,
    #[strum(serialize = "Horizontal 1")]
    Horizontal1 = 1,
    #[strum(serialize = "Free scrolling")]
    FreeScrolling = 2,
    #[strum(serialize = "Horizontal 2")]
    Horizontal2 = 3,
    #[strum(serialize = "Vertical only 1")]
    VerticalOnly1 = 4,
    #[strum(serialize = "Horizontal 3")]
    Horizontal3 = 5,
    #[strum(serialize = "Vertical only 2")]
    VerticalOnly2 = 6,
    #[strum(serialize = "Horizontal 4")]
    Horizontal4 = 7,
}

impl ScrollType {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Default,
    FromRepr,
    IntoStaticStr,
    Display,
)]
#[repr(u8)]
pub enum StartAction {
    #[default]
    #[strum(serialize = "None")]
    None = 0,
    #[strum(serialize = "Sliding")]
    Sliding = 1,
    #[strum(serialize = "Out of pipe up")]
    OutOfPipeUp = 2,
    #[strum(serialize = "Out of pipe down")]
    OutOfPipeDown = 3,
    #[strum(serialize = "Out of pipe left")]
    OutOfPipeLeft = 4,
    #[strum(serialize = "Out of pipe right")]
    OutOfPipeRight = 5,
    #[strum(serialize = "Climbing up ship")]
    ClimbingUpShip = 6,
    #[strum(serialize = "Ship autoscroll")]
    ShipAutoscroll = 7,
}

impl StartAction {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Default,
    FromRepr,
    IntoStaticStr,
    Display,
)]
#[repr(u8)]
pub enum TimeSetting {
    #[default]
    #[strum(serialize = "300")]
    T300 = 0,
    #[strum(serialize = "400")]
    T400 = 1,
    #[strum(serialize = "200")]
    T200 = 2,
    #[strum(serialize = "Unlimited")]
    Unlimited = 3,
}

impl TimeSetting {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }

    /// Seconds on the clock, `None` for unlimited time
    pub fn seconds(&self) -> Option<u16> {
        match self {
            Self::T300 => Some(300),
            Self::T400 => Some(400),
            Self::T200 => Some(200),
            Self::Unlimited => None,
        }
    }
}

/// Decoded level header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelHeader {
    /// Index into [`Y_POSITIONS`]
    pub start_y_index: u8,
    /// Width nibble; the width in blocks is `nibble * 16 + 15`
    pub length_index: u8,
    /// Index into [`X_POSITIONS`]
    pub start_x_index: u8,
    pub enemy_palette_index: u8,
    pub object_palette_index: u8,
    pub scroll_type: ScrollType,
    /// Bit 4 of byte 6, which doubles as the scroll field's low bit. A
    /// quirk of the format; derived at decode, not stored independently.
    pub is_vertical: bool,
    pub object_set: u8,
    pub start_action: StartAction,
    pub graphic_set_index: u8,
    pub time: TimeSetting,
    pub music_index: u8,
    /// Absolute file offset of the secondary (bonus) area's object data
    pub level_pointer: u32,
    /// Absolute file offset of the enemy list
    pub enemy_pointer: u32,
    /// True iff `level_pointer` falls inside the object set's valid window
    pub has_bonus_area: bool,
}

impl LevelHeader {
    /// Decode a raw header.
    ///
    /// A caller-supplied object set overrides the header's nibble and is
    /// validated; the header nibble itself is authoritative otherwise.
    pub fn decode(bytes: &[u8; HEADER_LENGTH], supplied_object_set: Option<u8>) -> Result<Self> {
        let object_set = match supplied_object_set {
            Some(set) => {
                object_set::pointer(set)?;
                set
            }
            None => bytes[6] & 0b0000_1111,
        };

        let pointer = object_set::pointer_for_nibble(object_set);
        let level_pointer = (u32::from(bytes[1]) << 8 | u32::from(bytes[0]))
            + pointers::LEVEL_OFFSET
            + pointer.offset;
        let enemy_pointer =
            (u32::from(bytes[3]) << 8 | u32::from(bytes[2])) + pointers::ENEMY_OFFSET;

        Ok(Self {
            start_y_index: (bytes[4] & 0b1110_0000) >> 5,
            length_index: bytes[4] & 0b0000_1111,
            start_x_index: (bytes[5] & 0b0110_0000) >> 5,
            enemy_palette_index: (bytes[5] & 0b0001_1000) >> 3,
            object_palette_index: bytes[5] & 0b0000_0111,
            scroll_type: ScrollType::from_repr((bytes[6] & 0b0111_0000) >> 4).unwrap_or_default(),
            is_vertical: bytes[6] & 0b0001_0000 != 0,
            object_set,
            start_action: StartAction::from_repr((bytes[7] & 0b1110_0000) >> 5)
                .unwrap_or_default(),
            graphic_set_index: bytes[7] & 0b0001_1111,
            time: TimeSetting::from_repr((bytes[8] & 0b1100_0000) >> 6).unwrap_or_default(),
            music_index: bytes[8] & 0b0000_1111,
            level_pointer,
            enemy_pointer,
            has_bonus_area: pointer.min <= level_pointer && level_pointer <= pointer.max,
        })
    }

    /// Pack the fields back into 9 raw bytes, the inverse of [`decode`].
    ///
    /// Unused bits come out zero; the vertical flag is not written since it
    /// lives inside the scroll field.
    ///
    /// [`decode`]: Self::decode
    pub fn encode(&self) -> [u8; HEADER_LENGTH] {
        let pointer = object_set::pointer_for_nibble(self.object_set);
        let raw_level = self.level_pointer - pointers::LEVEL_OFFSET - pointer.offset;
        let raw_enemy = self.enemy_pointer - pointers::ENEMY_OFFSET;

        [
            (raw_level & 0xFF) as u8,
            ((raw_level >> 8) & 0xFF) as u8,
            (raw_enemy & 0xFF) as u8,
            ((raw_enemy >> 8) & 0xFF) as u8,
            (self.start_y_index << 5) | (self.length_index & 0x0F),
            (self.start_x_index << 5)
                | (self.enemy_palette_index << 3)
                | self.object_palette_index,
            ((self.scroll_type as u8) << 4) | (self.object_set & 0x0F),
            ((self.start_action as u8) << 5) | self.graphic_set_index,
            ((self.time as u8) << 6) | self.music_index,
        ]
    }

    /// Level width in blocks
    pub fn width(&self) -> u16 {
        u16::from(self.length_index) * 16 + 15
    }

    /// Player start X in blocks
    pub fn start_x(&self) -> u8 {
        X_POSITIONS[(self.start_x_index & 0b11) as usize]
    }

    /// Player start Y in blocks
    pub fn start_y(&self) -> u8 {
        Y_POSITIONS[(self.start_y_index & 0b111) as usize]
    }

    pub fn music_name(&self) -> &'static str {
        MUSIC_NAMES[(self.music_index & 0x0F) as usize]
    }

    pub fn graphic_set_name(&self) -> &'static str {
        GRAPHIC_SET_NAMES[(self.graphic_set_index & 0b1_1111) as usize]
    }
}
