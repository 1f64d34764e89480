use serde::{Deserialize, Serialize};

use crate::tables::design::ObjectDesign;
use crate::tables::palette::PaletteGroup;

/// Placement data shared by both object encodings.
///
/// Carries everything the presentation layer needs to render the object
/// without going back to the tables: the resolved shape template and the
/// level's active palette group travel with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectData {
    /// 3-bit sub-category from the top of the first byte
    pub domain: u8,
    /// Column in blocks (second byte)
    pub x: u8,
    /// Row in blocks (low 5 bits of the first byte)
    pub y: u8,
    /// Object index (third byte)
    pub index: u8,
    pub object_set: u8,
    /// Shape template, when the definition table has one for this index
    pub design: Option<ObjectDesign>,
    pub palette_group: PaletteGroup,
}

/// A decoded level object, tagged by its on-disk encoding.
///
/// The object set's domain table decides at decode time whether a fourth
/// (length) byte was consumed; that decision is the discriminant here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacedObject {
    ThreeByte(ObjectData),
    FourByte { data: ObjectData, length: u8 },
}

impl PlacedObject {
    pub fn data(&self) -> &ObjectData {
        match self {
            Self::ThreeByte(data) => data,
            Self::FourByte { data, .. } => data,
        }
    }

    pub fn domain(&self) -> u8 {
        self.data().domain
    }

    /// (x, y) in blocks
    pub fn position(&self) -> (u8, u8) {
        let data = self.data();
        (data.x, data.y)
    }

    /// The explicit length byte, for objects that carry one
    pub fn length(&self) -> Option<u8> {
        match self {
            Self::ThreeByte(_) => None,
            Self::FourByte { length, .. } => Some(*length),
        }
    }

    /// Bytes this object occupied in the stream
    pub fn byte_size(&self) -> usize {
        match self {
            Self::ThreeByte(_) => 3,
            Self::FourByte { .. } => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> ObjectData {
        ObjectData {
            domain: 2,
            x: 0x21,
            y: 0x05,
            index: 0x34,
            object_set: 1,
            design: None,
            palette_group: [[0; 4]; 4],
        }
    }

    #[test]
    fn test_shared_accessors() {
        let three = PlacedObject::ThreeByte(data());
        assert_eq!(three.domain(), 2);
        assert_eq!(three.position(), (0x21, 0x05));
        assert_eq!(three.length(), None);
        assert_eq!(three.byte_size(), 3);

        let four = PlacedObject::FourByte {
            data: data(),
            length: 9,
        };
        assert_eq!(four.length(), Some(9));
        assert_eq!(four.byte_size(), 4);
    }
}
