use portable_atomic::{AtomicI64, AtomicU64, Ordering};
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    DeconstructedSnowflake, Error, GenerateOptions, Result, SnowflakeId, SystemClock, TimeSource,
    Timestamp, UNIX_EPOCH_MS, binary, extract_bits,
};

/// Shard ID encoded when neither the call nor the codec sets one.
pub const DEFAULT_SHARD_ID: u64 = 1;

/// Shortest string [`Snowflake::is_valid`] accepts.
pub const MIN_SNOWFLAKE_DIGITS: usize = 17;

/// Longest string [`Snowflake::is_valid`] lets through to parsing. A `u64`
/// holds at most 20 significant digits.
pub const MAX_SNOWFLAKE_DIGITS: usize = 22;

// MSB-relative offsets of the fields inside the 64-character binary string.
const SHARD_ID_OFFSET: u32 = SnowflakeId::TIMESTAMP_BITS;
const SEQUENCE_OFFSET: u32 = SnowflakeId::TIMESTAMP_BITS + SnowflakeId::SHARD_ID_BITS;

/// Encodes and decodes Snowflake IDs.
///
/// The codec owns the defaults every call falls back on: the epoch, the shard
/// ID, and the rolling sequence counter. All three live in atomics, so a
/// single codec can be shared by reference across threads. Each
/// [`generate`](Self::generate) call takes a distinct sequence value with one
/// `fetch_add`, even under contention.
///
/// Independent codecs keep independent counters.
///
/// ## Contract
/// - The shard ID wraps modulo 1024 and the sequence wraps modulo 4096.
/// - A timestamp before the epoch, or more than 42 bits past it, is encoded
///   anyway and decodes to a wrong timestamp. Use
///   [`try_generate`](Self::try_generate) to reject those instead.
/// - IDs must be decoded with the epoch they were generated with.
///
/// # Example
/// ```
/// use snowcodec::{GenerateOptions, Snowflake, DISCORD_EPOCH_MS};
///
/// let codec = Snowflake::with_epoch(DISCORD_EPOCH_MS);
/// codec.set_shard_id(42);
///
/// let id = codec.generate(GenerateOptions::new());
/// let parts = codec.parse(&id, None).unwrap();
/// assert_eq!(parts.shard_id, 42);
/// assert_eq!(parts.sequence, 0);
/// ```
#[derive(Debug)]
pub struct Snowflake<T = SystemClock>
where
    T: TimeSource,
{
    epoch: AtomicI64,
    shard_id: AtomicU64,
    #[cfg(feature = "cache-padded")]
    sequence: crossbeam_utils::CachePadded<AtomicU64>,
    #[cfg(not(feature = "cache-padded"))]
    sequence: AtomicU64,
    time: T,
}

impl Snowflake<SystemClock> {
    /// Creates a codec on the wall clock with the UNIX epoch, shard ID 1 and
    /// sequence 0.
    pub fn new() -> Self {
        Self::with_epoch(UNIX_EPOCH_MS)
    }

    /// Creates a codec on the wall clock that measures timestamps from
    /// `epoch`.
    pub fn with_epoch(epoch: impl Into<Timestamp>) -> Self {
        Self::from_components(epoch, DEFAULT_SHARD_ID, 0, SystemClock)
    }
}

impl Default for Snowflake<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Snowflake<T>
where
    T: TimeSource,
{
    /// Creates a codec from explicit defaults and a time source.
    ///
    /// Useful for restoring a sequence counter, or for plugging in a fixed
    /// clock in tests.
    pub fn from_components(
        epoch: impl Into<Timestamp>,
        shard_id: u64,
        sequence: u64,
        time: T,
    ) -> Self {
        Self {
            epoch: AtomicI64::new(epoch.into().as_millis()),
            shard_id: AtomicU64::new(shard_id),
            #[cfg(feature = "cache-padded")]
            sequence: crossbeam_utils::CachePadded::new(AtomicU64::new(sequence)),
            #[cfg(not(feature = "cache-padded"))]
            sequence: AtomicU64::new(sequence),
            time,
        }
    }

    /// Default epoch in milliseconds since the UNIX epoch.
    pub fn epoch(&self) -> i64 {
        self.epoch.load(Ordering::Relaxed)
    }

    /// Replaces the default epoch. IDs generated before the change must still
    /// be decoded with the old epoch.
    pub fn set_epoch(&self, epoch: impl Into<Timestamp>) {
        self.epoch.store(epoch.into().as_millis(), Ordering::Relaxed);
    }

    /// Default shard ID, as configured (before wrapping).
    pub fn shard_id(&self) -> u64 {
        self.shard_id.load(Ordering::Relaxed)
    }

    /// Replaces the default shard ID. Values above 1023 wrap when encoded.
    pub fn set_shard_id(&self, shard_id: u64) {
        self.shard_id.store(shard_id, Ordering::Relaxed);
    }

    /// The sequence value the next [`generate`](Self::generate) call will
    /// take (before wrapping).
    pub fn sequence(&self) -> u64 {
        self.sequence.load(Ordering::Relaxed)
    }

    /// Overrides the sequence counter.
    pub fn set_sequence(&self, sequence: u64) {
        self.sequence.store(sequence, Ordering::Relaxed);
    }

    /// Generates an ID and renders it in base 10.
    ///
    /// Always advances the sequence counter by exactly one.
    pub fn generate(&self, options: GenerateOptions) -> String {
        self.generate_id(options).to_string()
    }

    /// Generates an ID.
    ///
    /// The timestamp delta is shifted into bits 22-63, the shard ID (mod 1024)
    /// into bits 12-21, and the current sequence (mod 4096) into bits 0-11.
    /// The counter is then advanced, so the value encoded is the one it held
    /// before this call.
    ///
    /// Never fails. A delta outside `0..2^42` silently corrupts the timestamp
    /// field.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate_id(&self, options: GenerateOptions) -> SnowflakeId {
        let (delta, shard_id) = self.resolve(&options);

        #[cfg(feature = "tracing")]
        {
            if !delta_fits(delta) {
                tracing::warn!(
                    delta,
                    "timestamp delta is outside the 42-bit field, encoded timestamp is corrupt"
                );
            }
        }

        let sequence = self.next_sequence();
        // A negative delta is encoded as its two's complement.
        SnowflakeId::from_components(delta as u64, shard_id, sequence)
    }

    /// Generates an ID, rejecting timestamps the 42-bit field cannot hold.
    ///
    /// The sequence counter is only advanced when an ID is returned.
    ///
    /// # Errors
    /// - [`Error::TimestampOutOfRange`] if the timestamp lies before the
    ///   epoch or more than `2^42 - 1` milliseconds after it.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_generate(&self, options: GenerateOptions) -> Result<SnowflakeId> {
        let (delta, shard_id) = self.resolve(&options);
        if !delta_fits(delta) {
            return Err(Error::TimestampOutOfRange { delta });
        }
        Ok(SnowflakeId::from_components(
            delta as u64,
            shard_id,
            self.next_sequence(),
        ))
    }

    /// Decodes a base-10 ID.
    ///
    /// `epoch` defaults to the codec's epoch and must match the one used when
    /// generating, otherwise the returned timestamp is off by the difference.
    ///
    /// # Errors
    /// - [`Error::MalformedInteger`] if `snowflake` is not made of ASCII digits
    /// - [`Error::Overflow`] if it does not fit in 64 bits
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn parse(
        &self,
        snowflake: &str,
        epoch: Option<Timestamp>,
    ) -> Result<DeconstructedSnowflake> {
        let id = snowflake.parse::<SnowflakeId>()?;
        Ok(self.deconstruct(id, epoch))
    }

    /// Decodes an already typed ID. See [`parse`](Self::parse).
    pub fn deconstruct(&self, id: SnowflakeId, epoch: Option<Timestamp>) -> DeconstructedSnowflake {
        let raw = id.to_raw();
        let epoch = epoch.map_or_else(|| self.epoch(), |epoch| epoch.as_millis());
        let delta = raw >> SnowflakeId::TIMESTAMP_SHIFT;

        DeconstructedSnowflake {
            timestamp: (delta as i64).wrapping_add(epoch),
            shard_id: extract_bits(raw, SHARD_ID_OFFSET, Some(SnowflakeId::SHARD_ID_BITS)) as u16,
            sequence: extract_bits(raw, SEQUENCE_OFFSET, None) as u16,
            binary: binary(raw),
        }
    }

    /// Best-effort shape check: 17 to 22 ASCII digits that
    /// [`parse`](Self::parse) accepts with the default epoch.
    ///
    /// Input wider than 64 bits fails to parse, so a 21 or 22 digit string is
    /// only valid when zero padded down to at most 20 significant digits.
    ///
    /// The decoded fields are not inspected, so a well-shaped ID with an
    /// absurd timestamp is still valid. Never fails.
    pub fn is_valid(&self, snowflake: &str) -> bool {
        if !has_snowflake_shape(snowflake) {
            #[cfg(feature = "tracing")]
            tracing::debug!(snowflake, "rejected: expected 17 to 22 ASCII digits");
            return false;
        }

        match self.parse(snowflake, None) {
            Ok(_) => true,
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(snowflake, error = %_e, "rejected");
                false
            }
        }
    }

    /// Returns `(timestamp - epoch, shard_id)` for a call, filling unset
    /// options from the codec.
    fn resolve(&self, options: &GenerateOptions) -> (i64, u64) {
        let timestamp = options
            .timestamp_override()
            .map_or_else(|| self.time.current_millis(), |ts| ts.as_millis());
        let epoch = options
            .epoch_override()
            .map_or_else(|| self.epoch(), |epoch| epoch.as_millis());
        let shard_id = options
            .shard_id_override()
            .unwrap_or_else(|| self.shard_id());

        (timestamp.wrapping_sub(epoch), shard_id)
    }

    fn next_sequence(&self) -> u64 {
        // 2^64 is a multiple of 4096, so the encoded sequence keeps cycling
        // through 0..4096 when the counter itself overflows.
        self.sequence.fetch_add(1, Ordering::Relaxed)
    }
}

fn delta_fits(delta: i64) -> bool {
    u64::try_from(delta).is_ok_and(|delta| delta <= SnowflakeId::MAX_TIMESTAMP)
}

fn has_snowflake_shape(snowflake: &str) -> bool {
    (MIN_SNOWFLAKE_DIGITS..=MAX_SNOWFLAKE_DIGITS).contains(&snowflake.len())
        && snowflake.bytes().all(|b| b.is_ascii_digit())
}
