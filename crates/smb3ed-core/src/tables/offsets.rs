//! Level offset table
//!
//! The table is a line-oriented UTF-8 file (`levels.dat`), one level per
//! line: five unprefixed hex fields followed by a free-text name. Field 0 is
//! the world number, field 1 the level number within that world, field 2 the
//! absolute ROM offset of the level's object data.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// One line of the level offset table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelOffsetEntry {
    pub world: usize,
    pub level: usize,
    /// Absolute ROM offset of the object data (the header sits 9 bytes
    /// before it)
    pub rom_level_offset: u32,
    pub enemy_offset: u32,
    pub flags: u32,
    pub name: String,
}

/// The loaded offset table plus the derived per-world start indexes.
///
/// Entries are grouped by world in ascending order, worlds numbered from 1;
/// the first `level == 1` entry of each world marks that world's start.
#[derive(Debug, Clone, Default)]
pub struct LevelOffsetTable {
    entries: Vec<LevelOffsetEntry>,
    world_start_indexes: Vec<usize>,
}

impl LevelOffsetTable {
    /// Load and parse the table from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse the table from its text form
    pub fn parse(text: &str) -> Result<Self> {
        let mut entries = Vec::new();
        let mut world_start_indexes = Vec::new();

        for (line_no, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let entry = parse_line(line, line_no + 1)?;
            if entry.world > 0 && entry.level == 1 {
                world_start_indexes.push(entries.len());
            }
            entries.push(entry);
        }

        debug!(
            "Loaded {} level offsets across {} worlds",
            entries.len(),
            world_start_indexes.len()
        );

        Ok(Self {
            entries,
            world_start_indexes,
        })
    }

    /// Number of worlds in the table
    pub fn worlds(&self) -> usize {
        self.world_start_indexes.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelOffsetEntry> {
        self.entries.iter()
    }

    /// Look up the entry for a (world, level) selection.
    ///
    /// Worlds and levels are numbered from 1; selecting 0 or anything past
    /// the loaded range fails with `InvalidLevelSelector`.
    pub fn resolve(&self, world: usize, level: usize) -> Result<&LevelOffsetEntry> {
        let invalid = Error::InvalidLevelSelector { world, level };

        if world == 0 || level == 0 || world > self.worlds() {
            return Err(invalid);
        }

        let start = self.world_start_indexes[world - 1];
        let end = self
            .world_start_indexes
            .get(world)
            .copied()
            .unwrap_or(self.entries.len());

        let index = start + level - 1;
        if index >= end {
            return Err(invalid);
        }
        Ok(&self.entries[index])
    }
}

fn parse_line(line: &str, line_no: usize) -> Result<LevelOffsetEntry> {
    let malformed = |message: String| Error::MalformedOffsetTable {
        line: line_no,
        message,
    };

    let mut fields = line.splitn(6, ',');

    let mut numbers = [0u32; 5];
    for slot in numbers.iter_mut() {
        let field = fields
            .next()
            .ok_or_else(|| malformed("expected 6 comma-separated fields".into()))?;
        *slot = u32::from_str_radix(field.trim(), 16)
            .map_err(|e| malformed(format!("bad hex field '{}': {}", field.trim(), e)))?;
    }

    let name = fields
        .next()
        .ok_or_else(|| malformed("missing name field".into()))?;

    Ok(LevelOffsetEntry {
        world: numbers[0] as usize,
        level: numbers[1] as usize,
        rom_level_offset: numbers[2],
        enemy_offset: numbers[3],
        flags: numbers[4],
        name: name.to_string(),
    })
}
