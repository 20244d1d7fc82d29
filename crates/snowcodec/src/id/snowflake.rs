use core::{fmt, str::FromStr};

use crate::{Error, Result, binary};

/// A 64-bit Snowflake ID
///
/// - 42 bits timestamp (ms since the codec's epoch)
/// - 10 bits shard ID (0-1023)
/// - 12 bits sequence (0-4095)
///
/// ```text
///  Bit Index:  63             22 21            12 11             0
///              +----------------+----------------+---------------+
///  Field:      | timestamp (42) | shard ID (10)  | sequence (12) |
///              +----------------+----------------+---------------+
///              |<----- MSB ---------- 64 bits --------- LSB ----->|
/// ```
///
/// The ID does not know its epoch. Use
/// [`Snowflake::deconstruct`](crate::Snowflake::deconstruct) to recover an
/// absolute timestamp.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnowflakeId {
    id: u64,
}

impl SnowflakeId {
    /// Width of the timestamp field.
    pub const TIMESTAMP_BITS: u32 = 42;

    /// Width of the shard ID field.
    pub const SHARD_ID_BITS: u32 = 10;

    /// Width of the sequence field.
    pub const SEQUENCE_BITS: u32 = 12;

    /// Bitmask for extracting the 42-bit timestamp field. Occupies bits 22
    /// through 63.
    pub const TIMESTAMP_MASK: u64 = (1 << Self::TIMESTAMP_BITS) - 1;

    /// Bitmask for extracting the 10-bit shard ID field. Occupies bits 12
    /// through 21.
    pub const SHARD_ID_MASK: u64 = (1 << Self::SHARD_ID_BITS) - 1;

    /// Bitmask for extracting the 12-bit sequence field. Occupies bits 0
    /// through 11.
    pub const SEQUENCE_MASK: u64 = (1 << Self::SEQUENCE_BITS) - 1;

    /// Number of bits to shift the timestamp to its correct position (bit 22).
    pub const TIMESTAMP_SHIFT: u32 = Self::SHARD_ID_BITS + Self::SEQUENCE_BITS;

    /// Number of bits to shift the shard ID to its correct position (bit 12).
    pub const SHARD_ID_SHIFT: u32 = Self::SEQUENCE_BITS;

    /// Number of bits to shift the sequence field (bit 0).
    pub const SEQUENCE_SHIFT: u32 = 0;

    /// Largest timestamp delta the field can hold (about 139 years).
    pub const MAX_TIMESTAMP: u64 = Self::TIMESTAMP_MASK;

    /// Largest shard ID; larger inputs wrap modulo 1024.
    pub const MAX_SHARD_ID: u64 = Self::SHARD_ID_MASK;

    /// Largest sequence value; larger inputs wrap modulo 4096.
    pub const MAX_SEQUENCE: u64 = Self::SEQUENCE_MASK;

    /// Packs the three fields into an ID.
    ///
    /// `shard_id` and `sequence` are reduced modulo their field width.
    /// `timestamp` is shifted into place unmasked: a delta wider than 42 bits
    /// loses its high bits off the top of the word, matching the codec's
    /// wrap-don't-fail contract.
    pub const fn from_components(timestamp: u64, shard_id: u64, sequence: u64) -> Self {
        let timestamp = timestamp << Self::TIMESTAMP_SHIFT;
        let shard_id = (shard_id & Self::SHARD_ID_MASK) << Self::SHARD_ID_SHIFT;
        let sequence = (sequence & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
        Self {
            id: timestamp | shard_id | sequence,
        }
    }

    /// Extracts the timestamp delta (ms since the epoch) from the packed ID.
    pub const fn timestamp(&self) -> u64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Extracts the shard ID from the packed ID.
    pub const fn shard_id(&self) -> u64 {
        (self.id >> Self::SHARD_ID_SHIFT) & Self::SHARD_ID_MASK
    }

    /// Extracts the sequence number from the packed ID.
    pub const fn sequence(&self) -> u64 {
        (self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK
    }

    /// Converts this type into its raw representation.
    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Converts a raw value into this type. Every `u64` is a valid layout.
    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }

    /// Returns the ID as a zero-padded 20-digit string.
    pub fn to_padded_string(&self) -> String {
        format!("{:020}", self.id)
    }

    /// Returns the ID in base 2, exactly 64 characters wide.
    pub fn to_binary_string(&self) -> String {
        binary(self.id)
    }
}

impl From<u64> for SnowflakeId {
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<SnowflakeId> for u64 {
    fn from(id: SnowflakeId) -> Self {
        id.to_raw()
    }
}

impl FromStr for SnowflakeId {
    type Err = Error;

    /// Parses a base-10 ID. Only ASCII digits are accepted: no sign, no
    /// surrounding whitespace.
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::MalformedInteger {
                input: s.to_owned(),
            });
        }
        // Digits only, so overflow is the sole way this can fail.
        s.parse::<u64>()
            .map(Self::from_raw)
            .map_err(|_| Error::Overflow {
                input: s.to_owned(),
            })
    }
}

impl fmt::Display for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = [
            ("timestamp", Self::TIMESTAMP_BITS, self.timestamp()),
            ("shard id", Self::SHARD_ID_BITS, self.shard_id()),
            ("sequence", Self::SEQUENCE_BITS, self.sequence()),
        ];

        writeln!(f, "SnowflakeId {{")?;
        writeln!(f, "    raw id     : 0x{:016x} ({})", self.id, self.id)?;
        writeln!(f, "    padded     : {}", self.to_padded_string())?;
        writeln!(f, "    binary     : {}", self.to_binary_string())?;
        writeln!(f, "    layout     :")?;
        for (name, bits, value) in fields {
            writeln!(
                f,
                "        {:<16} {value:>14}  0x{value:x}",
                format!("{name} ({bits})")
            )?;
        }
        write!(f, "}}")
    }
}
