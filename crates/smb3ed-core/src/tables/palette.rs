//! Palette table loader
//!
//! Each of the 15 object sets owns 192 bytes of palette data in the ROM: 8
//! level-palette groups followed by 4 enemy-palette groups, each group 4
//! palettes of 4 one-byte NES color indices, stored back to back. The
//! overworld set reads from its own fixed address; every other set reads at
//! a `PALETTE_DATA_SIZE` stride from the level palette base.

use tracing::debug;

use crate::error::{Error, Result};
use crate::rom::layout::palette::{
    COLORS_PER_PALETTE, ENEMY_GROUPS_PER_OBJECT_SET, LEVEL_GROUPS_PER_OBJECT_SET,
    MAP_PALETTE_ADDRESS, PALETTE_ADDRESS, PALETTE_DATA_SIZE, PALETTES_PER_GROUP,
};
use crate::rom::layout::{OBJECT_SET_COUNT, OVERWORLD_OBJECT_SET};
use crate::rom::Rom;

/// 4 NES color indices
pub type Palette = [u8; COLORS_PER_PALETTE];

/// 4 palettes selected together by one header index
pub type PaletteGroup = [Palette; PALETTES_PER_GROUP];

#[derive(Debug, Clone)]
struct ObjectSetPalettes {
    level_groups: [PaletteGroup; LEVEL_GROUPS_PER_OBJECT_SET],
    enemy_groups: [PaletteGroup; ENEMY_GROUPS_PER_OBJECT_SET],
}

/// Fully populated palette data for all 15 object sets.
#[derive(Debug, Clone)]
pub struct PaletteTable {
    sets: Vec<ObjectSetPalettes>,
}

impl PaletteTable {
    /// Read the palette data for every object set from the ROM.
    ///
    /// Reads are strictly sequential from each set's base address: 8 level
    /// groups, then 4 enemy groups, no gaps.
    pub fn load(rom: &mut Rom) -> Result<Self> {
        let mut sets = Vec::with_capacity(OBJECT_SET_COUNT);

        for object_set in 0..OBJECT_SET_COUNT as u8 {
            rom.seek(Self::base_address(object_set))?;

            let mut set = ObjectSetPalettes {
                level_groups: [[[0; COLORS_PER_PALETTE]; PALETTES_PER_GROUP];
                    LEVEL_GROUPS_PER_OBJECT_SET],
                enemy_groups: [[[0; COLORS_PER_PALETTE]; PALETTES_PER_GROUP];
                    ENEMY_GROUPS_PER_OBJECT_SET],
            };

            for group in set.level_groups.iter_mut() {
                read_group(rom, group)?;
            }
            for group in set.enemy_groups.iter_mut() {
                read_group(rom, group)?;
            }
            sets.push(set);
        }

        debug!("Loaded palette groups for {} object sets", sets.len());
        Ok(Self { sets })
    }

    /// Base ROM address of an object set's palette data
    pub fn base_address(object_set: u8) -> usize {
        if object_set == OVERWORLD_OBJECT_SET {
            MAP_PALETTE_ADDRESS
        } else {
            PALETTE_ADDRESS + object_set as usize * PALETTE_DATA_SIZE
        }
    }

    /// One of the set's 8 level palette groups; the index is masked to the
    /// header field's 3 bits
    pub fn level_group(&self, object_set: u8, index: u8) -> Result<&PaletteGroup> {
        let set = self
            .sets
            .get(object_set as usize)
            .ok_or(Error::InvalidObjectSet(object_set))?;
        Ok(&set.level_groups[(index & 0b111) as usize])
    }

    /// One of the set's 4 enemy palette groups; the index is masked to the
    /// header field's 2 bits
    pub fn enemy_group(&self, object_set: u8, index: u8) -> Result<&PaletteGroup> {
        let set = self
            .sets
            .get(object_set as usize)
            .ok_or(Error::InvalidObjectSet(object_set))?;
        Ok(&set.enemy_groups[(index & 0b11) as usize])
    }
}

fn read_group(rom: &mut Rom, group: &mut PaletteGroup) -> Result<()> {
    for palette in group.iter_mut() {
        palette.copy_from_slice(rom.bulk_read(COLORS_PER_PALETTE)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rom::MockRomBuilder;

    #[test]
    fn test_base_addresses() {
        assert_eq!(PaletteTable::base_address(14), 0x36BE2);
        assert_eq!(PaletteTable::base_address(0), 0x36CA2);
        assert_eq!(PaletteTable::base_address(1), 0x36CA2 + PALETTE_DATA_SIZE);
        assert_eq!(
            PaletteTable::base_address(13),
            0x36CA2 + 13 * PALETTE_DATA_SIZE
        );
    }

    /// Image where every palette byte encodes its set and position, so reads
    /// landing anywhere else are caught.
    fn palette_rom() -> Rom {
        let mut builder = MockRomBuilder::new();
        for object_set in 0..OBJECT_SET_COUNT as u8 {
            let mut data = Vec::with_capacity(PALETTE_DATA_SIZE);
            for byte in 0..PALETTE_DATA_SIZE {
                data.push(object_set.wrapping_mul(0x10).wrapping_add(byte as u8));
            }
            builder = builder.write_at(PaletteTable::base_address(object_set), &data);
        }
        builder.build()
    }

    #[test]
    fn test_groups_are_read_sequentially() {
        let mut rom = palette_rom();
        let table = PaletteTable::load(&mut rom).unwrap();

        // Set 0, level group 0, palette 0 holds the first 4 bytes.
        assert_eq!(table.level_group(0, 0).unwrap()[0], [0, 1, 2, 3]);
        // Level group 1 starts 16 bytes in.
        assert_eq!(table.level_group(0, 1).unwrap()[0], [16, 17, 18, 19]);
        // Enemy groups follow immediately after the 8 level groups (128 bytes).
        assert_eq!(table.enemy_group(0, 0).unwrap()[0], [128, 129, 130, 131]);

        // Set 3's data is independent of set 0's.
        assert_eq!(
            table.level_group(3, 0).unwrap()[0],
            [0x30, 0x31, 0x32, 0x33]
        );
        // The overworld set reads from its dedicated address.
        assert_eq!(
            table.level_group(14, 0).unwrap()[0],
            [0xE0, 0xE1, 0xE2, 0xE3]
        );
    }

    #[test]
    fn test_group_indexes_are_masked_to_field_width() {
        let mut rom = palette_rom();
        let table = PaletteTable::load(&mut rom).unwrap();

        // 3-bit level index, 2-bit enemy index.
        assert_eq!(
            table.level_group(0, 0b1111_1010).unwrap(),
            table.level_group(0, 2).unwrap()
        );
        assert_eq!(
            table.enemy_group(0, 0b111).unwrap(),
            table.enemy_group(0, 3).unwrap()
        );
    }

    #[test]
    fn test_unknown_object_set_is_rejected() {
        let mut rom = palette_rom();
        let table = PaletteTable::load(&mut rom).unwrap();
        assert!(matches!(
            table.level_group(15, 0),
            Err(Error::InvalidObjectSet(15))
        ));
    }

    #[test]
    fn test_truncated_rom_fails_to_load() {
        let mut rom = MockRomBuilder::new().pad_to(0x36C00).build();
        assert!(matches!(
            PaletteTable::load(&mut rom),
            Err(Error::OutOfRange { .. })
        ));
    }
}
