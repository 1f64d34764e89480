//! Info command implementation.
//!
//! Decodes one level and prints its header fields.

use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;
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
    let header = level.header();

    println!(
        "{} '{}' (header at {:#x})",
        format!("{}-{}", level.world(), level.level()).bold(),
        level.name(),
        level.offset()
    );
    println!();
    println!("  {:<20} {} blocks", "Width:".bold(), level.width());
    println!("  {:<20} {} blocks", "Height:".bold(), level.height());
    println!(
        "  {:<20} ({}, {})",
        "Start position:".bold(),
        header.start_x(),
        header.start_y()
    );
    println!("  {:<20} {}", "Start action:".bold(), header.start_action);
    println!(
        "  {:<20} {}{}",
        "Scrolling:".bold(),
        header.scroll_type,
        if header.is_vertical { " (vertical)" } else { "" }
    );
    println!(
        "  {:<20} {} (definition {})",
        "Object set:".bold(),
        header.object_set,
        level.object_definition()
    );
    println!(
        "  {:<20} {} ({})",
        "Graphic set:".bold(),
        header.graphic_set_index,
        header.graphic_set_name()
    );
    println!(
        "  {:<20} object {} / enemy {}",
        "Palettes:".bold(),
        header.object_palette_index,
        header.enemy_palette_index
    );
    println!(
        "  {:<20} {} ({})",
        "Music:".bold(),
        header.music_index,
        header.music_name()
    );
    println!("  {:<20} {}", "Time:".bold(), header.time);
    println!(
        "  {:<20} {:#x} ({})",
        "Next area:".bold(),
        header.level_pointer,
        if header.has_bonus_area {
            "bonus area present"
        } else {
            "no bonus area"
        }
    );
    println!("  {:<20} {:#x}", "Enemy data:".bold(), header.enemy_pointer);
    println!();
    println!("  {} objects", level.objects().len());
    Ok(())
}
