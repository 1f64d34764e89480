//! List command implementation.
//!
//! Prints the loaded level offset table grouped by world.

use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;
use smb3ed_core::EditorContext;

pub fn run(data_dir: &Path) -> Result<()> {
    let ctx = EditorContext::new(data_dir);
    let table = ctx.offset_table()?;

    let mut current_world = usize::MAX;
    for entry in table.iter() {
        if entry.world != current_world {
            current_world = entry.world;
            println!();
            println!("{}", format!("World {current_world}").bold());
        }
        println!(
            "  {}-{:<2} {:#07X}  {}",
            entry.world, entry.level, entry.rom_level_offset, entry.name
        );
    }

    println!();
    println!("{} levels across {} worlds", table.len(), table.worlds());
    Ok(())
}
