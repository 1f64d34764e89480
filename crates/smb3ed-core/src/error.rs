use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("No level {level} in world {world}")]
    InvalidLevelSelector { world: usize, level: usize },

    #[error("Malformed level offset table at line {line}: {message}")]
    MalformedOffsetTable { line: usize, message: String },

    #[error("Object set {0} out of range")]
    InvalidObjectSet(u8),

    #[error("Object definition {0} out of range")]
    InvalidDefinition(usize),

    #[error("Corrupt object design file for definition {definition} at byte {position}")]
    CorruptDesignFile { definition: usize, position: usize },

    #[error("Object stream at {offset:#x} has no 0xFF terminator before ROM end")]
    CorruptLevelStream { offset: usize },

    #[error("Read of {len} bytes at offset {offset:#x} exceeds ROM size {size:#x}")]
    OutOfRange { offset: usize, len: usize, size: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}
