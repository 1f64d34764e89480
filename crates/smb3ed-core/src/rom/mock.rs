//! Mock ROM builder for tests

use super::Rom;

/// Builds fixture ROM images byte range by byte range.
#[derive(Debug, Default)]
pub struct MockRomBuilder {
    data: Vec<u8>,
}

impl MockRomBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `bytes` at `offset`, growing the image with zeroes as needed
    pub fn write_at(mut self, offset: usize, bytes: &[u8]) -> Self {
        let end = offset + bytes.len();
        if self.data.len() < end {
            self.data.resize(end, 0);
        }
        self.data[offset..end].copy_from_slice(bytes);
        self
    }

    /// Extend the image with zeroes up to `size`
    pub fn pad_to(mut self, size: usize) -> Self {
        if self.data.len() < size {
            self.data.resize(size, 0);
        }
        self
    }

    pub fn build(self) -> Rom {
        Rom::new(self.data)
    }
}
