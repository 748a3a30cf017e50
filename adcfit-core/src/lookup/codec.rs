//! Packed Little-Endian Table Format
//!
//! ```text
//! header  : end_index u16 | count u16                       4 bytes
//! record  : start_index u16 | start_value i16 |
//!           slope_multiplier i32 | slope_shift u8           9 bytes
//! ```
//!
//! Records follow the header in ascending `start_index` order. There is no
//! padding, so a table of `k` segments is exactly `4 + 9k` bytes.

use alloc::vec::Vec;

use crate::fit::Segment;

use super::{LookupError, LookupResult, SegmentTable};

/// Header length in bytes
pub const HEADER_LEN: usize = 4;

/// Record length in bytes
pub const RECORD_LEN: usize = 9;

/// Encoded size of a table with `segments` records
pub const fn encoded_len(segments: usize) -> usize {
    HEADER_LEN + segments * RECORD_LEN
}

/// Pack one segment
pub fn encode_segment(segment: &Segment) -> [u8; RECORD_LEN] {
    let mut out = [0u8; RECORD_LEN];
    out[0..2].copy_from_slice(&segment.start_index.to_le_bytes());
    out[2..4].copy_from_slice(&segment.start_value.to_le_bytes());
    out[4..8].copy_from_slice(&segment.slope_multiplier.to_le_bytes());
    out[8] = segment.slope_shift;
    out
}

/// Unpack one segment
pub fn decode_segment(bytes: &[u8; RECORD_LEN]) -> Segment {
    Segment {
        start_index: u16::from_le_bytes([bytes[0], bytes[1]]),
        start_value: i16::from_le_bytes([bytes[2], bytes[3]]),
        slope_multiplier: i32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
        slope_shift: bytes[8],
    }
}

/// Pack a table with its header
pub fn encode_table(segments: &[Segment], end_index: u16) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(segments.len()));
    out.extend_from_slice(&end_index.to_le_bytes());
    // Tables never exceed u16::MAX segments: one per domain index at most
    out.extend_from_slice(&(segments.len() as u16).to_le_bytes());
    for segment in segments {
        out.extend_from_slice(&encode_segment(segment));
    }
    out
}

/// Table decoded into a fixed-capacity buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedTable<const N: usize> {
    segments: heapless::Vec<Segment, N>,
    end_index: u16,
}

impl<const N: usize> DecodedTable<N> {
    /// Decoded segments
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Last covered code
    pub fn end_index(&self) -> u16 {
        self.end_index
    }

    /// Lookup view over the decoded segments
    pub fn as_table(&self) -> SegmentTable<'_> {
        SegmentTable::new(&self.segments, self.end_index)
    }
}

/// Decode a packed table of at most `N` segments.
///
/// The result passes [`SegmentTable::try_new`].
pub fn decode_table<const N: usize>(bytes: &[u8]) -> LookupResult<DecodedTable<N>> {
    if bytes.len() < HEADER_LEN {
        return Err(LookupError::Truncated { expected: HEADER_LEN, actual: bytes.len() });
    }
    let end_index = u16::from_le_bytes([bytes[0], bytes[1]]);
    let count = usize::from(u16::from_le_bytes([bytes[2], bytes[3]]));

    let expected = encoded_len(count);
    if bytes.len() < expected {
        return Err(LookupError::Truncated { expected, actual: bytes.len() });
    }
    if bytes.len() > expected {
        return Err(LookupError::TrailingData { extra: bytes.len() - expected });
    }
    if count > N {
        return Err(LookupError::CapacityExceeded { count, capacity: N });
    }

    let mut segments = heapless::Vec::new();
    for chunk in bytes[HEADER_LEN..].chunks_exact(RECORD_LEN) {
        let mut record = [0u8; RECORD_LEN];
        record.copy_from_slice(chunk);
        segments
            .push(decode_segment(&record))
            .map_err(|_| LookupError::CapacityExceeded { count, capacity: N })?;
    }

    SegmentTable::try_new(&segments, end_index)?;
    Ok(DecodedTable { segments, end_index })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEGMENTS: [Segment; 2] = [
        Segment { start_index: 677, start_value: 13426, slope_multiplier: -2897, slope_shift: 6 },
        Segment { start_index: 812, start_value: 7306, slope_multiplier: -1, slope_shift: 0 },
    ];

    #[test]
    fn record_layout_is_little_endian() {
        let bytes = encode_segment(&Segment {
            start_index: 0x0102,
            start_value: -2,
            slope_multiplier: 0x0A0B0C0D,
            slope_shift: 7,
        });
        assert_eq!(bytes, [0x02, 0x01, 0xFE, 0xFF, 0x0D, 0x0C, 0x0B, 0x0A, 7]);
        assert_eq!(decode_segment(&bytes).slope_multiplier, 0x0A0B0C0D);
    }

    #[test]
    fn table_survives_packing() {
        let bytes = encode_table(&SEGMENTS, 3963);
        assert_eq!(bytes.len(), encoded_len(2));
        assert_eq!(&bytes[..4], &[0x7B, 0x0F, 2, 0]);

        let decoded = decode_table::<8>(&bytes).unwrap();
        assert_eq!(decoded.segments(), &SEGMENTS);
        assert_eq!(decoded.end_index(), 3963);
        assert_eq!(decoded.as_table().lookup(900), SegmentTable::new(&SEGMENTS, 3963).lookup(900));
    }

    #[test]
    fn rejects_malformed_buffers() {
        let bytes = encode_table(&SEGMENTS, 3963);
        assert_eq!(
            decode_table::<8>(&bytes[..3]),
            Err(LookupError::Truncated { expected: 4, actual: 3 })
        );
        assert_eq!(
            decode_table::<8>(&bytes[..bytes.len() - 1]),
            Err(LookupError::Truncated { expected: 22, actual: 21 })
        );

        let mut long = bytes.clone();
        long.push(0);
        assert_eq!(decode_table::<8>(&long), Err(LookupError::TrailingData { extra: 1 }));

        assert_eq!(
            decode_table::<1>(&bytes),
            Err(LookupError::CapacityExceeded { count: 2, capacity: 1 })
        );
        assert_eq!(decode_table::<8>(&encode_table(&[], 0)), Err(LookupError::EmptyTable));
    }

    #[test]
    fn rejects_unsorted_records() {
        let bytes = encode_table(&[SEGMENTS[1], SEGMENTS[0]], 3963);
        assert_eq!(decode_table::<8>(&bytes), Err(LookupError::Unsorted { index: 1 }));
    }
}
