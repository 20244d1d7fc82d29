use crate::Timestamp;

#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
use std::time::SystemTime;
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
use web_time::SystemTime;

/// The fields of a decoded Snowflake ID.
///
/// This is a derived view, rebuilt on every
/// [`Snowflake::parse`](crate::Snowflake::parse) call.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DeconstructedSnowflake {
    /// Absolute time of creation, in milliseconds since the UNIX epoch. Only
    /// correct when decoded with the epoch the ID was generated with.
    pub timestamp: i64,
    /// Shard ID, 0-1023.
    pub shard_id: u16,
    /// Sequence number, 0-4095.
    pub sequence: u16,
    /// The ID in base 2, exactly 64 characters wide.
    pub binary: String,
}

impl DeconstructedSnowflake {
    /// Returns [`Self::timestamp`] as a wall-clock instant, or `None` if the
    /// platform cannot represent it.
    pub fn created_at(&self) -> Option<SystemTime> {
        Timestamp::Millis(self.timestamp).to_system_time()
    }
}
