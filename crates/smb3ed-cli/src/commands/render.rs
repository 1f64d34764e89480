//! Render command implementation.
//!
//! Draws a level onto a character grid: one cell per block, objects painted
//! in list order so later objects overdraw earlier ones, exactly as the
//! core's painter's-algorithm contract specifies.

use std::path::Path;

use anyhow::Result;
use smb3ed_core::{Canvas, EditorContext, Level, PlacedObject, Rom};

/// Character-grid implementation of the core's rendering seam.
struct TextCanvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl TextCanvas {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![' '; width * height],
        }
    }

    fn set(&mut self, x: usize, y: usize, glyph: char) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = glyph;
        }
    }

    fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().collect())
    }
}

impl Canvas for TextCanvas {
    fn clear(&mut self, color: u8) {
        // Darker background colors get a denser fill.
        let shade = if color & 0x0F < 0x08 { '.' } else { ' ' };
        self.cells.fill(shade);
    }

    fn place(&mut self, object: &PlacedObject) {
        let (x, y) = object.position();
        let glyph =
            char::from_digit(u32::from(object.data().index & 0x0F), 16).unwrap_or('?');

        // Objects with an explicit length byte extend horizontally.
        let run = object.length().map_or(1, |length| usize::from(length) + 1);
        for dx in 0..run {
            self.set(usize::from(x) + dx, usize::from(y), glyph);
        }
    }
}

pub fn run(rom_path: &Path, data_dir: &Path, world: usize, level: usize) -> Result<()> {
    let mut rom = Rom::from_file(rom_path)?;
    let ctx = EditorContext::new(data_dir);
    let level = Level::new(&mut rom, &ctx, world, level, None)?;

    let mut canvas = TextCanvas::new(usize::from(level.width()), usize::from(level.height()));
    level.draw(&mut canvas);

    println!("{}-{} '{}'", level.world(), level.level(), level.name());
    for row in canvas.rows() {
        println!("|{row}|");
    }
    Ok(())
}
