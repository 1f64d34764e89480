//! Object design table loader
//!
//! Each of the 12 object-set definitions ships as one small binary file
//! (`romobjs<N>.dat`) holding the shape templates ("designs") for that
//! definition's objects: a length byte per design, then that many block
//! index entries, with `0xFF` escaping a 3-byte big-endian absolute index.
//! Files may carry a trailing overlay section: one more byte run per design,
//! of the same per-design lengths, in the same order.
//!
//! The first byte is ambiguous by design: below `0xF7` it is the design
//! count and data starts at byte 1; from `0xF7` up the file is in the legacy
//! layout with an implicit count of 255 and byte 0 already being design
//! data. This is a preserved quirk of the format, not something to clean up.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::tables::object_set::DEFINITION_COUNT;

/// Escape byte introducing a 3-byte absolute block index
pub const BLOCK_INDEX_ESCAPE: u8 = 0xFF;

/// First bytes from this value up mark the legacy no-count-byte layout
const LEGACY_COUNT_SENTINEL: u8 = 0xF7;

/// Implicit design count of a legacy-layout file
const LEGACY_OBJECT_COUNT: usize = 0xFF;

/// Shape template for one object: the block indices composing it, plus an
/// optional parallel overlay run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDesign {
    /// Direct indices are 0..=254; escaped entries carry the full 24 bits
    pub blocks: Vec<u32>,
    /// Present only when the source file has a trailing overlay section
    pub overlay: Option<Vec<u8>>,
}

impl ObjectDesign {
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// The designs of all 12 object-set definitions, loaded once per process.
#[derive(Debug, Clone)]
pub struct ObjectDesignTable {
    definitions: Vec<Vec<ObjectDesign>>,
}

impl ObjectDesignTable {
    /// Load every definition file (`romobjs0.dat` .. `romobjs11.dat`) from
    /// a data directory
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let mut definitions = Vec::with_capacity(DEFINITION_COUNT);

        for definition in 0..DEFINITION_COUNT {
            let path = dir.join(format!("romobjs{definition}.dat"));
            let data = fs::read(&path)?;
            definitions.push(parse_design_file(&data, definition)?);
        }

        debug!("Loaded {} object design definitions", definitions.len());
        Ok(Self { definitions })
    }

    /// Build a table from already-parsed definitions
    pub fn from_definitions(definitions: Vec<Vec<ObjectDesign>>) -> Self {
        Self { definitions }
    }

    /// The ordered designs of one definition
    pub fn designs(&self, definition: usize) -> Result<&[ObjectDesign]> {
        self.definitions
            .get(definition)
            .map(Vec::as_slice)
            .ok_or(Error::InvalidDefinition(definition))
    }
}

/// Decode one definition file.
pub fn parse_design_file(data: &[u8], definition: usize) -> Result<Vec<ObjectDesign>> {
    let corrupt = |position: usize| Error::CorruptDesignFile {
        definition,
        position,
    };

    if data.is_empty() {
        return Err(corrupt(0));
    }

    let (object_count, mut position) = if data[0] < LEGACY_COUNT_SENTINEL {
        (data[0] as usize, 1)
    } else {
        (LEGACY_OBJECT_COUNT, 0)
    };

    let mut designs = Vec::with_capacity(object_count);
    for _ in 0..object_count {
        let length = *data.get(position).ok_or_else(|| corrupt(position))? as usize;
        position += 1;

        let mut blocks = Vec::with_capacity(length);
        for _ in 0..length {
            let byte = *data.get(position).ok_or_else(|| corrupt(position))?;
            if byte == BLOCK_INDEX_ESCAPE {
                let index = data
                    .get(position + 1..position + 4)
                    .ok_or_else(|| corrupt(position))?;
                blocks.push(
                    (u32::from(index[0]) << 16) | (u32::from(index[1]) << 8) | u32::from(index[2]),
                );
                position += 4;
            } else {
                blocks.push(u32::from(byte));
                position += 1;
            }
        }
        designs.push(ObjectDesign {
            blocks,
            overlay: None,
        });
    }

    // Running out of file here is fine: no overlay section.
    if position >= data.len() {
        return Ok(designs);
    }

    for design in &mut designs {
        let length = design.blocks.len();
        let bytes = data
            .get(position..position + length)
            .ok_or_else(|| corrupt(position))?;
        design.overlay = Some(bytes.to_vec());
        position += length;
    }

    Ok(designs)
}
