pub mod design;
pub mod object_set;
pub mod offsets;
pub mod palette;

pub use design::{ObjectDesign, ObjectDesignTable};
pub use object_set::ObjectSetPointer;
pub use offsets::{LevelOffsetEntry, LevelOffsetTable};
pub use palette::{Palette, PaletteGroup, PaletteTable};
