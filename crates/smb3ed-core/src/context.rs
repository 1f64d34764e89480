//! Process-wide decode context
//!
//! The offset, palette and design tables load exactly once and are shared
//! read-only by every level afterwards. Instead of hiding them in global
//! state, an [`EditorContext`] owns them behind one-time initialization and
//! is passed into every level construction.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::error::Result;
use crate::rom::Rom;
use crate::tables::{LevelOffsetTable, ObjectDesignTable, PaletteTable};

/// File name of the level offset table inside the data directory
const LEVEL_OFFSET_FILE: &str = "levels.dat";

/// The load-once tables plus the data directory they come from.
///
/// Each accessor is idempotent: the first call populates the table, later
/// calls return the cached value. The `OnceLock` guards make that safe even
/// if the host application grows threads.
#[derive(Debug, Default)]
pub struct EditorContext {
    data_dir: PathBuf,
    offset_table: OnceLock<LevelOffsetTable>,
    palette_table: OnceLock<PaletteTable>,
    design_table: OnceLock<ObjectDesignTable>,
}

impl EditorContext {
    /// Context reading `levels.dat` and the `romobjs<N>.dat` files from
    /// `data_dir`
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Context with the file-backed tables already populated, for callers
    /// that assemble them some other way
    pub fn preloaded(offset_table: LevelOffsetTable, design_table: ObjectDesignTable) -> Self {
        let ctx = Self::default();
        let _ = ctx.offset_table.set(offset_table);
        let _ = ctx.design_table.set(design_table);
        ctx
    }

    /// The level offset table, loaded from disk on first use
    pub fn offset_table(&self) -> Result<&LevelOffsetTable> {
        if let Some(table) = self.offset_table.get() {
            return Ok(table);
        }
        let table = LevelOffsetTable::load(self.data_dir.join(LEVEL_OFFSET_FILE))?;
        Ok(self.offset_table.get_or_init(|| table))
    }

    /// The palette table, read from the ROM on first use
    pub fn palette_table(&self, rom: &mut Rom) -> Result<&PaletteTable> {
        if let Some(table) = self.palette_table.get() {
            return Ok(table);
        }
        let table = PaletteTable::load(rom)?;
        Ok(self.palette_table.get_or_init(|| table))
    }

    /// The object design table, loaded from disk on first use
    pub fn design_table(&self) -> Result<&ObjectDesignTable> {
        if let Some(table) = self.design_table.get() {
            return Ok(table);
        }
        let table = ObjectDesignTable::load_from_dir(&self.data_dir)?;
        Ok(self.design_table.get_or_init(|| table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rom::layout::OBJECT_SET_COUNT;
    use crate::rom::layout::palette::PALETTE_DATA_SIZE;
    use crate::rom::MockRomBuilder;
    use std::fs;

    #[test]
    fn test_offset_table_loads_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LEVEL_OFFSET_FILE);
        fs::write(&path, "1,1,1E219,CD81,0,First\n").unwrap();

        let ctx = EditorContext::new(dir.path());
        assert_eq!(ctx.offset_table().unwrap().len(), 1);

        // Rewriting the file does not affect the cached table.
        fs::write(&path, "1,1,1E219,CD81,0,First\n1,2,1F219,CDA1,0,Second\n").unwrap();
        assert_eq!(ctx.offset_table().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_offset_table_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = EditorContext::new(dir.path());
        assert!(ctx.offset_table().unwrap_err().is_not_found());
    }

    #[test]
    fn test_palette_table_is_idempotent() {
        let rom_size =
            PaletteTable::base_address(OBJECT_SET_COUNT as u8 - 2) + PALETTE_DATA_SIZE;
        let mut rom = MockRomBuilder::new().pad_to(rom_size).build();

        let ctx = EditorContext::new("unused");
        let first = ctx.palette_table(&mut rom).unwrap() as *const PaletteTable;
        let second = ctx.palette_table(&mut rom).unwrap() as *const PaletteTable;
        assert_eq!(first, second);
    }
}
