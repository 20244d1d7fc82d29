/// A result type defaulting to this crate's [`enum@Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors `snowcodec` can produce.
///
/// Encoding through [`Snowflake::generate`] never fails: out-of-range fields
/// wrap instead. Errors only surface when decoding text or when the checked
/// [`Snowflake::try_generate`] path is used.
///
/// [`Snowflake::generate`]: crate::Snowflake::generate
/// [`Snowflake::try_generate`]: crate::Snowflake::try_generate
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The input is not a base-10 non-negative integer (empty, signed, or
    /// containing non-digit characters).
    #[error("malformed snowflake `{input}`: expected base-10 digits")]
    MalformedInteger {
        /// The rejected input.
        input: String,
    },

    /// The input is a valid base-10 integer but needs more than 64 bits.
    #[error("snowflake `{input}` does not fit in 64 bits")]
    Overflow {
        /// The rejected input.
        input: String,
    },

    /// The timestamp minus the epoch is negative or wider than the 42-bit
    /// timestamp field.
    #[error("timestamp delta of {delta}ms is outside the 42-bit timestamp field")]
    TimestampOutOfRange {
        /// Milliseconds between the epoch and the requested timestamp.
        delta: i64,
    },
}
