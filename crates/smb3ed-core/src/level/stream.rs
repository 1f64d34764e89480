//! Object stream decoder
//!
//! A level's object data is a run of 3- and 4-byte records terminated by a
//! 0xFF sentinel. The decoder is a two-state loop: it stays in `Reading`
//! until it peeks the sentinel, which it leaves in place for whoever reads
//! the stream next (the enemy list starts right behind it).

use memchr::memchr;
use tracing::debug;

use crate::error::{Error, Result};
use crate::level::object::{ObjectData, PlacedObject};
use crate::rom::layout::STREAM_SENTINEL;
use crate::rom::Rom;
use crate::tables::design::ObjectDesign;
use crate::tables::object_set;
use crate::tables::palette::PaletteGroup;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecoderState {
    Reading,
    Terminated,
}

/// Decode the object stream starting at `start_offset`.
///
/// Each record resolves its shape template from `designs` and carries
/// `palette_group` with it. A stream that runs past the end of the ROM
/// without a sentinel fails with `CorruptLevelStream`.
pub fn decode_object_stream(
    rom: &mut Rom,
    start_offset: usize,
    object_set: u8,
    designs: &[ObjectDesign],
    palette_group: &PaletteGroup,
) -> Result<Vec<PlacedObject>> {
    rom.seek(start_offset)?;

    // Without any sentinel left in the image the loop could only end by
    // running off the end; fail fast instead.
    if memchr(STREAM_SENTINEL, rom.remaining()).is_none() {
        return Err(Error::CorruptLevelStream {
            offset: start_offset,
        });
    }

    let corrupt = |_: Error| Error::CorruptLevelStream {
        offset: start_offset,
    };

    let mut objects = Vec::new();
    let mut state = DecoderState::Reading;

    while state == DecoderState::Reading {
        let raw = rom.bulk_read(3).map_err(corrupt)?;
        let (byte0, byte1, byte2) = (raw[0], raw[1], raw[2]);

        let domain = (byte0 & 0b1110_0000) >> 5;
        let data = ObjectData {
            domain,
            x: byte1,
            y: byte0 & 0b0001_1111,
            index: byte2,
            object_set,
            design: designs.get(byte2 as usize).cloned(),
            palette_group: *palette_group,
        };

        let four_byte = object_set::is_four_byte(object_set, domain, (byte2 & 0b1111_0000) >> 4)?;
        let object = if four_byte {
            let length = rom.read_byte().map_err(corrupt)?;
            PlacedObject::FourByte { data, length }
        } else {
            PlacedObject::ThreeByte(data)
        };
        objects.push(object);

        // The sentinel is peeked, never consumed here.
        if rom.peek_byte().map_err(corrupt)? == STREAM_SENTINEL {
            state = DecoderState::Terminated;
        }
    }

    debug!(
        "Decoded {} objects at {:#x} (object set {})",
        objects.len(),
        start_offset,
        object_set
    );
    Ok(objects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rom::MockRomBuilder;

    const PALETTE_GROUP: PaletteGroup = [[0x0F, 0x21, 0x11, 0x01]; 4];

    fn designs() -> Vec<ObjectDesign> {
        let mut designs = vec![ObjectDesign::default(); 0x40];
        designs[0x34] = ObjectDesign {
            blocks: vec![1, 2, 3],
            overlay: None,
        };
        designs
    }

    #[test]
    fn test_stream_ends_on_sentinel_with_exact_object_count() {
        // Set 1: domain 0 nibble 3 is 4-byte, domain 1 nibble 0 is 3-byte.
        let stream = [
            0x05, 0x10, 0x34, 0x07, // 4-byte, length 7
            0x25, 0x11, 0x02, // 3-byte, domain 1
            0xFF, // sentinel
        ];
        let mut rom = MockRomBuilder::new().write_at(0x100, &stream).build();

        let designs = designs();
        let objects =
            decode_object_stream(&mut rom, 0x100, 1, &designs, &PALETTE_GROUP).unwrap();

        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].length(), Some(7));
        assert_eq!(objects[0].position(), (0x10, 0x05));
        assert_eq!(objects[0].data().index, 0x34);
        assert_eq!(
            objects[0].data().design.as_ref().unwrap().blocks,
            vec![1, 2, 3]
        );
        assert_eq!(objects[1].domain(), 1);
        assert_eq!(objects[1].byte_size(), 3);
        assert_eq!(objects[1].data().palette_group, PALETTE_GROUP);

        // The sentinel stays unconsumed for the next reader.
        assert_eq!(rom.peek_byte().unwrap(), 0xFF);
    }

    #[test]
    fn test_missing_sentinel_is_corrupt() {
        let stream = [0x25, 0x11, 0x02, 0x25, 0x12, 0x02];
        let mut rom = MockRomBuilder::new().write_at(0, &stream).build();

        let designs = designs();
        assert!(matches!(
            decode_object_stream(&mut rom, 0, 1, &designs, &PALETTE_GROUP),
            Err(Error::CorruptLevelStream { offset: 0 })
        ));
    }

    #[test]
    fn test_record_swallowing_the_last_sentinel_is_corrupt() {
        // The only 0xFF gets consumed as the 4-byte object's length byte,
        // after which the stream runs dry.
        let stream = [0x05, 0x10, 0x34, 0xFF];
        let mut rom = MockRomBuilder::new().write_at(0, &stream).build();

        let designs = designs();
        assert!(matches!(
            decode_object_stream(&mut rom, 0, 1, &designs, &PALETTE_GROUP),
            Err(Error::CorruptLevelStream { offset: 0 })
        ));
    }

    #[test]
    fn test_immediate_sentinel_still_reads_one_record() {
        // The loop reads a record before peeking, so even a stream whose
        // first record is followed directly by 0xFF yields that record.
        let stream = [0x25, 0x11, 0x02, 0xFF];
        let mut rom = MockRomBuilder::new().write_at(0, &stream).build();

        let designs = designs();
        let objects =
            decode_object_stream(&mut rom, 0, 1, &designs, &PALETTE_GROUP).unwrap();
        assert_eq!(objects.len(), 1);
    }

    #[test]
    fn test_unknown_design_index_decodes_without_template() {
        let stream = [0x25, 0x11, 0x7F, 0xFF]; // index past the design table
        let mut rom = MockRomBuilder::new().write_at(0, &stream).build();

        let designs = designs();
        let objects =
            decode_object_stream(&mut rom, 0, 1, &designs, &PALETTE_GROUP).unwrap();
        assert!(objects[0].data().design.is_none());
    }
}
