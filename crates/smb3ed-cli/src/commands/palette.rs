//! Palette command implementation.
//!
//! Prints one palette group as hex, four palettes of four color indices.

use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;
use smb3ed_core::{PaletteTable, Rom};

pub fn run(rom_path: &Path, object_set: u8, group: u8, enemy: bool) -> Result<()> {
    let mut rom = Rom::from_file(rom_path)?;
    let table = PaletteTable::load(&mut rom)?;

    let palette_group = if enemy {
        table.enemy_group(object_set, group)?
    } else {
        table.level_group(object_set, group)?
    };

    println!(
        "{} (object set {}, base {:#x}):",
        format!(
            "{} palette group {}",
            if enemy { "Enemy" } else { "Level" },
            group
        )
        .bold(),
        object_set,
        PaletteTable::base_address(object_set)
    );
    println!();

    for (i, palette) in palette_group.iter().enumerate() {
        print!("  palette {i}: ");
        for color in palette {
            print!("{color:02X} ");
        }
        println!();
    }
    Ok(())
}
