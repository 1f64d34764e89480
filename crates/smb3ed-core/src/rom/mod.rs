mod image;
pub mod layout;

#[cfg(test)]
pub mod mock;

pub use image::Rom;

#[cfg(test)]
pub use mock::MockRomBuilder;
