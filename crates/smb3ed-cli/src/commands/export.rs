//! Export command implementation.
//!
//! Serializes one decoded level as pretty-printed JSON on stdout.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use smb3ed_core::{EditorContext, Level, LevelHeader, PlacedObject, Rom};

#[derive(Serialize)]
struct LevelExport<'a> {
    name: &'a str,
    world: usize,
    level: usize,
    header_offset: usize,
    width: u16,
    height: u16,
    header: &'a LevelHeader,
    objects: &'a [PlacedObject],
}

pub fn run(rom_path: &Path, data_dir: &Path, world: usize, level: usize) -> Result<()> {
    let mut rom = Rom::from_file(rom_path)?;
    let ctx = EditorContext::new(data_dir);
    let level = Level::new(&mut rom, &ctx, world, level, None)?;

    let export = LevelExport {
        name: level.name(),
        world: level.world(),
        level: level.level(),
        header_offset: level.offset(),
        width: level.width(),
        height: level.height(),
        header: level.header(),
        objects: level.objects(),
    };

    println!("{}", serde_json::to_string_pretty(&export)?);
    Ok(())
}
