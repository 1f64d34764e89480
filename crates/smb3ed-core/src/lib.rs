//! # smb3ed-core
//!
//! Core library for the smb3ed level editor.
//!
//! This crate provides:
//! - Flat ROM image access with a single read cursor
//! - The load-once level offset, palette and object design tables
//! - Level header bitfield decoding and encoding
//! - The sentinel-terminated object stream decoder
//! - The `Level` aggregate the presentation layer reads and mutates
//!
//! Everything GUI-shaped (widgets, dialogs, undo wiring, pixel rendering)
//! lives outside this crate; the [`level::Canvas`] trait is the only
//! rendering seam.

pub mod context;
pub mod error;
pub mod level;
pub mod rom;
pub mod tables;

pub use context::EditorContext;
pub use error::{Error, Result};
pub use level::{
    Canvas, GRAPHIC_SET_NAMES, Level, LevelHeader, MUSIC_NAMES, ObjectData, PlacedObject,
    ScrollType, StartAction, TimeSetting, X_POSITIONS, Y_POSITIONS, decode_object_stream,
};
pub use rom::Rom;
pub use tables::{
    LevelOffsetEntry, LevelOffsetTable, ObjectDesign, ObjectDesignTable, ObjectSetPointer,
    Palette, PaletteGroup, PaletteTable,
};
