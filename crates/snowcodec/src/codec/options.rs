use crate::Timestamp;

/// Per-call overrides for [`Snowflake::generate`](crate::Snowflake::generate).
///
/// Every field is optional. An unset field falls back to the codec: the
/// timestamp to its [`TimeSource`](crate::TimeSource), the shard ID and epoch
/// to the codec's configured defaults.
///
/// ```
/// use snowcodec::{GenerateOptions, DISCORD_EPOCH_MS};
///
/// let options = GenerateOptions::new()
///     .timestamp(DISCORD_EPOCH_MS + 1_000)
///     .shard_id(7)
///     .epoch(DISCORD_EPOCH_MS);
/// assert_eq!(options.shard_id_override(), Some(7));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    timestamp: Option<Timestamp>,
    shard_id: Option<u64>,
    epoch: Option<Timestamp>,
}

impl GenerateOptions {
    /// Options with nothing overridden.
    pub const fn new() -> Self {
        Self {
            timestamp: None,
            shard_id: None,
            epoch: None,
        }
    }

    /// Encodes this instant instead of the current time.
    #[must_use]
    pub fn timestamp(mut self, timestamp: impl Into<Timestamp>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Encodes this shard ID instead of the codec's default. Values above
    /// 1023 wrap.
    #[must_use]
    pub const fn shard_id(mut self, shard_id: u64) -> Self {
        self.shard_id = Some(shard_id);
        self
    }

    /// Measures the timestamp from this epoch instead of the codec's default.
    #[must_use]
    pub fn epoch(mut self, epoch: impl Into<Timestamp>) -> Self {
        self.epoch = Some(epoch.into());
        self
    }

    /// The timestamp set with [`timestamp`](Self::timestamp), if any.
    pub const fn timestamp_override(&self) -> Option<Timestamp> {
        self.timestamp
    }

    /// The shard ID set with [`shard_id`](Self::shard_id), if any.
    pub const fn shard_id_override(&self) -> Option<u64> {
        self.shard_id
    }

    /// The epoch set with [`epoch`](Self::epoch), if any.
    pub const fn epoch_override(&self) -> Option<Timestamp> {
        self.epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_are_unset_by_default() {
        let options = GenerateOptions::new();
        assert_eq!(options.timestamp_override(), None);
        assert_eq!(options.shard_id_override(), None);
        assert_eq!(options.epoch_override(), None);
        assert_eq!(options, GenerateOptions::default());
    }

    #[test]
    fn builder_sets_each_override() {
        let options = GenerateOptions::new()
            .timestamp(1_500i64)
            .shard_id(7)
            .epoch(1_000i64);
        assert_eq!(options.timestamp_override(), Some(Timestamp::Millis(1_500)));
        assert_eq!(options.shard_id_override(), Some(7));
        assert_eq!(options.epoch_override(), Some(Timestamp::Millis(1_000)));
    }
}
