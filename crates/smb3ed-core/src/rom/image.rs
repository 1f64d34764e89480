use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};

/// Flat ROM image with a single read cursor.
///
/// All offsets are absolute file offsets. The cursor is not safe for
/// concurrent use; callers run one decode against an image at a time.
#[derive(Debug, Clone)]
pub struct Rom {
    data: Vec<u8>,
    position: usize,
}

impl Rom {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data, position: 0 }
    }

    /// Load a ROM image from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(&path)?;
        info!(
            "Loaded ROM {} ({} bytes)",
            path.as_ref().display(),
            data.len()
        );
        Ok(Self::new(data))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current cursor position
    pub fn position(&self) -> usize {
        self.position
    }

    /// Move the cursor to an absolute offset
    pub fn seek(&mut self, offset: usize) -> Result<()> {
        if offset > self.data.len() {
            return Err(Error::OutOfRange {
                offset,
                len: 0,
                size: self.data.len(),
            });
        }
        self.position = offset;
        Ok(())
    }

    /// Read `len` bytes from the cursor, advancing it by `len`
    pub fn bulk_read(&mut self, len: usize) -> Result<&[u8]> {
        let start = self.position;
        let end = start
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or(Error::OutOfRange {
                offset: start,
                len,
                size: self.data.len(),
            })?;
        self.position = end;
        Ok(&self.data[start..end])
    }

    /// Seek to `offset`, then read `len` bytes advancing the cursor
    pub fn bulk_read_at(&mut self, len: usize, offset: usize) -> Result<&[u8]> {
        self.seek(offset)?;
        self.bulk_read(len)
    }

    /// Read one byte, advancing the cursor
    pub fn read_byte(&mut self) -> Result<u8> {
        let byte = self.peek_byte()?;
        self.position += 1;
        Ok(byte)
    }

    /// Read the byte at the cursor without advancing
    pub fn peek_byte(&self) -> Result<u8> {
        self.data
            .get(self.position)
            .copied()
            .ok_or(Error::OutOfRange {
                offset: self.position,
                len: 1,
                size: self.data.len(),
            })
    }

    /// Everything from the cursor to the end of the image
    pub fn remaining(&self) -> &[u8] {
        &self.data[self.position..]
    }
}
