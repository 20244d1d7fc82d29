//! Fixed-width binary rendering and MSB-relative bit extraction.
//!
//! Offsets in this module count from the most significant bit (index 0) to
//! the least significant bit (index 63), the same way the layout table of
//! [`SnowflakeId`](crate::SnowflakeId) reads left to right.

/// Width of a packed Snowflake ID in bits.
pub const ID_BITS: u32 = u64::BITS;

/// Renders `id` in base 2, left-padded with `'0'` to exactly 64 characters.
///
/// ```
/// let bits = snowcodec::binary(4_198_401);
/// assert_eq!(bits.len(), 64);
/// assert!(bits.ends_with("1_0000000001_000000000001".replace('_', "").as_str()));
/// ```
pub fn binary(id: u64) -> String {
    format!("{id:064b}")
}

/// Returns the integer held in bits `[start, start + length)` of `id`, where
/// bit 0 is the most significant bit.
///
/// Omitting `length` extracts through the last bit. A range running past bit
/// 63 is clipped at the end, and an empty range yields `0`.
///
/// ```
/// use snowcodec::extract_bits;
///
/// let id = (1u64 << 22) | (5 << 12) | 7;
/// assert_eq!(extract_bits(id, 42, Some(10)), 5);
/// assert_eq!(extract_bits(id, 52, None), 7);
/// ```
pub fn extract_bits(id: u64, start: u32, length: Option<u32>) -> u64 {
    if start >= ID_BITS {
        return 0;
    }
    let available = ID_BITS - start;
    let width = length.map_or(available, |len| len.min(available));
    if width == 0 {
        return 0;
    }

    let shift = available - width;
    let mask = if width == ID_BITS {
        u64::MAX
    } else {
        (1u64 << width) - 1
    };
    (id >> shift) & mask
}

#[cfg(test)]
mod tests {
    use super::*;

    // Reads the field the slow way: slice the rendered string, parse base 2.
    fn extract_from_text(id: u64, start: usize, length: Option<usize>) -> u64 {
        let text = binary(id);
        let end = length.map_or(text.len(), |len| (start + len).min(text.len()));
        let slice = text.get(start..end).unwrap_or("");
        if slice.is_empty() {
            0
        } else {
            u64::from_str_radix(slice, 2).unwrap()
        }
    }

    #[test]
    fn binary_is_always_64_wide() {
        for id in [0, 1, 4_198_401, 1 << 63, u64::MAX] {
            assert_eq!(binary(id).len(), 64, "id {id}");
        }
        assert_eq!(binary(0), "0".repeat(64));
        assert_eq!(binary(u64::MAX), "1".repeat(64));
    }

    #[test]
    fn extract_matches_text_slicing() {
        let samples = [
            0,
            4_198_401,
            175_928_847_299_117_063,
            0xdead_beef_cafe_f00d,
            u64::MAX,
        ];
        let ranges = [
            (0, Some(42)),
            (42, Some(10)),
            (52, None),
            (0, None),
            (60, Some(10)),
            (63, Some(1)),
            (10, Some(0)),
            (64, None),
        ];
        for id in samples {
            for (start, length) in ranges {
                assert_eq!(
                    extract_bits(id, start as u32, length.map(|l: usize| l as u32)),
                    extract_from_text(id, start, length),
                    "id {id:064b} start {start} length {length:?}"
                );
            }
        }
    }

    #[test]
    fn full_width_extract_is_identity() {
        assert_eq!(extract_bits(u64::MAX, 0, None), u64::MAX);
        assert_eq!(extract_bits(12345, 0, Some(64)), 12345);
    }
}
