//! Objects command implementation.
//!
//! Dumps a level's decoded object list, one record per line.

use std::path::Path;

use anyhow::Result;
use smb3ed_core::{EditorContext, Level, Rom};

pub fn run(
    rom_path: &Path,
    data_dir: &Path,
    world: usize,
    level: usize,
    object_set: Option<u8>,
) -> Result<()> {
    let mut rom = Rom::from_file(rom_path)?;
    let ctx = EditorContext::new(data_dir);
    let level = Level::new(&mut rom, &ctx, world, level, object_set)?;

    println!(
        "{} objects at {:#x} (object set {}):",
        level.objects().len(),
        level.offset() + 9,
        level.header().object_set
    );
    println!();

    for (i, object) in level.objects().iter().enumerate() {
        let data = object.data();
        let (x, y) = object.position();

        let length = match object.length() {
            Some(length) => format!("len {length:3}"),
            None => "       ".to_string(),
        };
        let blocks = match &data.design {
            Some(design) => format!("{} blocks", design.len()),
            None => "no design".to_string(),
        };

        println!(
            "  #{i:<3} {}B  domain {}  ({x:3}, {y:2})  id {:02X}  {length}  {blocks}",
            object.byte_size(),
            data.domain,
            data.index
        );
    }
    Ok(())
}
