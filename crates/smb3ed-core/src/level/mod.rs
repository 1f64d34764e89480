//! Decoded levels
//!
//! A [`Level`] is built from (ROM, world, level) through the context's
//! load-once tables: resolve the offset entry, decode the 9-byte header,
//! map the object set to its design definition, pick the palette group,
//! then decode the sentinel-terminated object stream.

mod header;
mod object;
mod stream;

pub use header::{
    GRAPHIC_SET_NAMES, LevelHeader, MUSIC_NAMES, ScrollType, StartAction, TimeSetting,
    X_POSITIONS, Y_POSITIONS,
};
pub use object::{ObjectData, PlacedObject};
pub use stream::decode_object_stream;

use tracing::info;

use crate::context::EditorContext;
use crate::error::{Error, Result};
use crate::rom::layout::header::{HEADER_LENGTH, LEVEL_DEFAULT_HEIGHT};
use crate::rom::Rom;
use crate::tables::object_set;
use crate::tables::palette::PaletteGroup;

/// Rendering seam for the presentation layer.
///
/// [`Level::draw`] clears the surface to the background color, then paints
/// objects in list order; later objects draw over earlier ones.
pub trait Canvas {
    /// Fill the whole surface with one NES color index
    fn clear(&mut self, color: u8);

    /// Paint one object
    fn place(&mut self, object: &PlacedObject);
}

/// One decoded level.
///
/// Owns its header and object list; shares the context's tables. Header
/// mutators only rewrite fields — the object list is stale until
/// [`reload`](Self::reload) runs, matching how the original editor drove
/// its header dialog.
#[derive(Debug, Clone)]
pub struct Level {
    name: String,
    world: usize,
    level: usize,
    /// Absolute file offset of the header (object data sits 9 bytes later)
    offset: usize,
    header: LevelHeader,
    objects: Vec<PlacedObject>,
    object_definition: usize,
    palette_group: PaletteGroup,
}

impl Level {
    /// Decode the level at (world, level), both numbered from 1.
    ///
    /// `object_set` overrides the header's object set nibble when given.
    pub fn new(
        rom: &mut Rom,
        ctx: &EditorContext,
        world: usize,
        level: usize,
        object_set: Option<u8>,
    ) -> Result<Self> {
        let entry = ctx.offset_table()?.resolve(world, level)?;
        let name = entry.name.clone();
        let offset = (entry.rom_level_offset as usize)
            .checked_sub(HEADER_LENGTH)
            .ok_or(Error::OutOfRange {
                offset: entry.rom_level_offset as usize,
                len: HEADER_LENGTH,
                size: rom.len(),
            })?;

        info!("Loading level {world}-{level} '{name}' at {offset:#x}");

        let mut header_bytes = [0u8; HEADER_LENGTH];
        header_bytes.copy_from_slice(rom.bulk_read_at(HEADER_LENGTH, offset)?);
        let header = LevelHeader::decode(&header_bytes, object_set)?;

        let mut level = Self {
            name,
            world,
            level,
            offset,
            header,
            objects: Vec::new(),
            object_definition: 0,
            palette_group: PaletteGroup::default(),
        };
        level.reload(rom, ctx)?;
        Ok(level)
    }

    /// Re-resolve the palette group and design definition from the current
    /// header fields and re-decode the object stream.
    ///
    /// Must run after header mutation before the object list or a `draw`
    /// is meaningful again.
    pub fn reload(&mut self, rom: &mut Rom, ctx: &EditorContext) -> Result<()> {
        self.object_definition = object_set::definition(self.header.object_set)?;
        self.palette_group = *ctx
            .palette_table(rom)?
            .level_group(self.header.object_set, self.header.object_palette_index)?;

        let designs = ctx.design_table()?.designs(self.object_definition)?;
        self.objects = decode_object_stream(
            rom,
            self.offset + HEADER_LENGTH,
            self.header.object_set,
            designs,
            &self.palette_group,
        )?;
        Ok(())
    }

    /// Clear to the palette group's first color, then paint every object in
    /// list order (painter's algorithm).
    pub fn draw(&self, canvas: &mut impl Canvas) {
        canvas.clear(self.palette_group[0][0]);
        for object in &self.objects {
            canvas.place(object);
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn world(&self) -> usize {
        self.world
    }

    pub fn level(&self) -> usize {
        self.level
    }

    /// Absolute file offset of the header
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn header(&self) -> &LevelHeader {
        &self.header
    }

    pub fn objects(&self) -> &[PlacedObject] {
        &self.objects
    }

    pub fn object_definition(&self) -> usize {
        self.object_definition
    }

    pub fn palette_group(&self) -> &PaletteGroup {
        &self.palette_group
    }

    /// Width in blocks
    pub fn width(&self) -> u16 {
        self.header.width()
    }

    /// Height in blocks (fixed by the format)
    pub fn height(&self) -> u16 {
        LEVEL_DEFAULT_HEIGHT as u16
    }

    // Header mutators. Each masks its argument to the header field's width,
    // so no setter can produce an out-of-table index. None of them touch
    // the object list; call `reload` afterwards.

    /// Set the width in blocks; values snap down to the nearest encodable
    /// width (`nibble * 16 + 15`)
    pub fn set_length(&mut self, blocks: u16) {
        self.header.length_index = ((blocks.saturating_sub(15)) / 16).min(0x0F) as u8;
    }

    pub fn set_music_index(&mut self, index: u8) {
        self.header.music_index = index & 0x0F;
    }

    pub fn set_time_index(&mut self, index: u8) {
        self.header.time = TimeSetting::from_repr(index & 0b11).unwrap_or_default();
    }

    pub fn set_x_position_index(&mut self, index: u8) {
        self.header.start_x_index = index & 0b11;
    }

    pub fn set_y_position_index(&mut self, index: u8) {
        self.header.start_y_index = index & 0b111;
    }

    pub fn set_action_index(&mut self, index: u8) {
        self.header.start_action = StartAction::from_repr(index & 0b111).unwrap_or_default();
    }

    pub fn set_object_palette_index(&mut self, index: u8) {
        self.header.object_palette_index = index & 0b111;
    }

    pub fn set_enemy_palette_index(&mut self, index: u8) {
        self.header.enemy_palette_index = index & 0b11;
    }

    pub fn set_graphic_set_index(&mut self, index: u8) {
        self.header.graphic_set_index = index & 0b1_1111;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::EditorContext;
    use crate::rom::layout::palette::PALETTE_DATA_SIZE;
    use crate::rom::MockRomBuilder;
    use crate::tables::design::ObjectDesign;
    use crate::tables::offsets::LevelOffsetTable;
    use crate::tables::{ObjectDesignTable, PaletteTable};

    const LEVEL_DATA_OFFSET: usize = 0x1E219;
    const HEADER_OFFSET: usize = LEVEL_DATA_OFFSET - HEADER_LENGTH;

    // Same header as the header module's fixture: object set 1, width
    // nibble 7, free scrolling, object palette 1.
    const HEADER: [u8; 9] = [
        0x40,
        0xA2,
        0x81,
        0xCD,
        0b1000_0111,
        0b0011_0001,
        0b0010_0001,
        0b0010_0001,
        0b0100_1000,
    ];

    // Three records then the sentinel (set 1: domain 0 nibble 3 carries a
    // length byte, domain 1 nibble 0 does not).
    const OBJECTS: [u8; 11] = [
        0x05, 0x10, 0x34, 0x07, // 4-byte
        0x25, 0x11, 0x02, // 3-byte
        0x26, 0x12, 0x02, // 3-byte
        0xFF,
    ];

    fn fixture_rom() -> Rom {
        let mut builder = MockRomBuilder::new()
            .write_at(HEADER_OFFSET, &HEADER)
            .write_at(LEVEL_DATA_OFFSET, &OBJECTS)
            .pad_to(0x40010);
        // Distinctive first color for object set 1, palette group 1.
        let group_offset =
            PaletteTable::base_address(1) + usize::from(HEADER[5] & 0b111) * 16;
        builder = builder.write_at(group_offset, &[0x2C]);
        builder.build()
    }

    fn fixture_context() -> EditorContext {
        let mut definitions = vec![Vec::new(); 12];
        definitions[1] = vec![ObjectDesign::default(); 0x40];
        definitions[1][0x34] = ObjectDesign {
            blocks: vec![9, 8, 7],
            overlay: None,
        };

        EditorContext::preloaded(
            LevelOffsetTable::parse("1,1,1E219,CD81,0,Level 1-1\n1,2,1F219,CDA1,0,Level 1-2\n")
                .unwrap(),
            ObjectDesignTable::from_definitions(definitions),
        )
    }

    #[test]
    fn test_world_1_1_scenario() {
        let mut rom = fixture_rom();
        let ctx = fixture_context();

        let level = Level::new(&mut rom, &ctx, 1, 1, None).unwrap();

        assert_eq!(level.name(), "Level 1-1");
        assert_eq!(level.offset(), HEADER_OFFSET);
        assert_eq!(level.width(), 0x7F);
        assert_eq!(level.height(), 27);
        assert_eq!(level.header().scroll_type, ScrollType::FreeScrolling);
        assert_eq!(level.object_definition(), 1);
        assert_eq!(level.objects().len(), 3);
        assert_eq!(level.objects()[0].length(), Some(7));
        assert_eq!(
            level.objects()[0].data().design.as_ref().unwrap().blocks,
            vec![9, 8, 7]
        );
        // The palette group written into the fixture travels with objects.
        assert_eq!(level.palette_group()[0][0], 0x2C);
        assert_eq!(level.objects()[1].data().palette_group[0][0], 0x2C);
    }

    #[test]
    fn test_invalid_selector_builds_no_level() {
        let mut rom = fixture_rom();
        let ctx = fixture_context();
        assert!(matches!(
            Level::new(&mut rom, &ctx, 0, 1, None),
            Err(Error::InvalidLevelSelector { .. })
        ));
        assert!(matches!(
            Level::new(&mut rom, &ctx, 1, 3, None),
            Err(Error::InvalidLevelSelector { .. })
        ));
    }

    #[test]
    fn test_mutators_leave_objects_stale_until_reload() {
        let mut rom = fixture_rom();
        let ctx = fixture_context();
        let mut level = Level::new(&mut rom, &ctx, 1, 1, None).unwrap();

        level.set_object_palette_index(3);
        assert_eq!(level.header().object_palette_index, 3);
        // Not reloaded yet: the old group is still attached.
        assert_eq!(level.palette_group()[0][0], 0x2C);

        level.reload(&mut rom, &ctx).unwrap();
        assert_eq!(level.objects().len(), 3);
        // Group 3 was never written in the fixture, so it reads back zero.
        assert_eq!(level.palette_group()[0][0], 0x00);
    }

    #[test]
    fn test_mutators_mask_to_field_width() {
        let mut rom = fixture_rom();
        let ctx = fixture_context();
        let mut level = Level::new(&mut rom, &ctx, 1, 1, None).unwrap();

        level.set_length(255);
        assert_eq!(level.header().length_index, 0x0F);
        level.set_length(15);
        assert_eq!(level.header().length_index, 0);
        level.set_music_index(0xFF);
        assert_eq!(level.header().music_index, 0x0F);
        level.set_time_index(2);
        assert_eq!(level.header().time, TimeSetting::T200);
        level.set_y_position_index(9);
        assert_eq!(level.header().start_y_index, 1);
        level.set_graphic_set_index(0xFF);
        assert_eq!(level.header().graphic_set_index, 0x1F);

        // Fields survive a header re-encode.
        let encoded = level.header().encode();
        let decoded = LevelHeader::decode(&encoded, None).unwrap();
        assert_eq!(&decoded, level.header());
    }

    struct RecordingCanvas {
        cleared_to: Option<u8>,
        placed: Vec<u8>,
    }

    impl Canvas for RecordingCanvas {
        fn clear(&mut self, color: u8) {
            self.cleared_to = Some(color);
            self.placed.clear();
        }

        fn place(&mut self, object: &PlacedObject) {
            self.placed.push(object.data().index);
        }
    }

    #[test]
    fn test_draw_clears_then_paints_in_order() {
        let mut rom = fixture_rom();
        let ctx = fixture_context();
        let level = Level::new(&mut rom, &ctx, 1, 1, None).unwrap();

        let mut canvas = RecordingCanvas {
            cleared_to: None,
            placed: Vec::new(),
        };
        level.draw(&mut canvas);

        assert_eq!(canvas.cleared_to, Some(0x2C));
        assert_eq!(canvas.placed, vec![0x34, 0x02, 0x02]);
    }
}
