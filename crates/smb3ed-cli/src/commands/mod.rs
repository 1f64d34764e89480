//! CLI command implementations.
//!
//! This module contains the implementation of each CLI command.

pub mod export;
pub mod info;
pub mod list;
pub mod objects;
pub mod palette;
pub mod render;
