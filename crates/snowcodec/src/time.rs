use core::time::Duration;

#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
use std::time::{SystemTime, UNIX_EPOCH};
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
use web_time::{SystemTime, UNIX_EPOCH};

/// Standard UNIX epoch: Thursday, January 1, 1970 00:00:00 UTC. The default
/// epoch of every [`Snowflake`](crate::Snowflake) codec.
pub const UNIX_EPOCH_MS: i64 = 0;

/// Custom epoch: Wednesday, January 1, 2025 00:00:00 UTC
pub const CUSTOM_EPOCH_MS: i64 = 1_735_689_600_000;

/// Twitter epoch: Thursday, November 4, 2010 1:42:54.657 UTC
pub const TWITTER_EPOCH_MS: i64 = 1_288_834_974_657;

/// Discord epoch: Thursday, January 1, 2015 00:00:00 UTC
pub const DISCORD_EPOCH_MS: i64 = 1_420_070_400_000;

/// A point in time, either as raw milliseconds since the UNIX epoch or as a
/// structured [`SystemTime`].
///
/// Every timestamp and epoch the codec accepts goes through
/// [`Timestamp::as_millis`], so both forms behave identically once
/// normalized.
///
/// ```
/// use snowcodec::Timestamp;
/// use std::time::{Duration, UNIX_EPOCH};
///
/// let raw = Timestamp::from(1_500u64);
/// let structured = Timestamp::from(UNIX_EPOCH + Duration::from_millis(1_500));
/// assert_eq!(raw.as_millis(), structured.as_millis());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Timestamp {
    /// Milliseconds since the UNIX epoch. Negative values lie before 1970.
    Millis(i64),
    /// A wall-clock instant.
    Time(SystemTime),
}

impl Timestamp {
    /// Normalizes this timestamp to milliseconds since the UNIX epoch.
    ///
    /// Sub-millisecond precision is truncated toward the UNIX epoch. Instants
    /// too far from 1970 to fit in an `i64` saturate.
    pub fn as_millis(&self) -> i64 {
        match *self {
            Self::Millis(ms) => ms,
            Self::Time(time) => match time.duration_since(UNIX_EPOCH) {
                Ok(after) => saturating_millis(after),
                Err(before) => saturating_millis(before.duration()).saturating_neg(),
            },
        }
    }

    /// Converts this timestamp into a wall-clock instant, or `None` if the
    /// platform's [`SystemTime`] cannot represent it.
    pub fn to_system_time(&self) -> Option<SystemTime> {
        match *self {
            Self::Time(time) => Some(time),
            Self::Millis(ms) if ms >= 0 => {
                UNIX_EPOCH.checked_add(Duration::from_millis(ms.unsigned_abs()))
            }
            Self::Millis(ms) => UNIX_EPOCH.checked_sub(Duration::from_millis(ms.unsigned_abs())),
        }
    }
}

fn saturating_millis(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

impl From<i64> for Timestamp {
    fn from(ms: i64) -> Self {
        Self::Millis(ms)
    }
}

impl From<u64> for Timestamp {
    fn from(ms: u64) -> Self {
        Self::Millis(i64::try_from(ms).unwrap_or(i64::MAX))
    }
}

impl From<u32> for Timestamp {
    fn from(ms: u32) -> Self {
        Self::Millis(i64::from(ms))
    }
}

impl From<i32> for Timestamp {
    fn from(ms: i32) -> Self {
        Self::Millis(i64::from(ms))
    }
}

impl From<Duration> for Timestamp {
    /// Interprets the duration as an offset from the UNIX epoch.
    fn from(since_unix_epoch: Duration) -> Self {
        Self::Millis(saturating_millis(since_unix_epoch))
    }
}

impl From<SystemTime> for Timestamp {
    fn from(time: SystemTime) -> Self {
        Self::Time(time)
    }
}

/// A trait for time sources that return the current wall-clock time.
///
/// This abstraction lets the codec default its timestamps from the real system
/// clock while tests plug in a fixed or stepped clock.
///
/// # Example
///
/// ```
/// use snowcodec::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> i64 {
///         1234
///     }
/// }
///
/// assert_eq!(FixedTime.current_millis(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since the UNIX epoch.
    fn current_millis(&self) -> i64;
}

/// Wall-clock [`TimeSource`] backed by [`SystemTime::now`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_millis(&self) -> i64 {
        Timestamp::Time(SystemTime::now()).as_millis()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_millis(&self) -> i64 {
        (**self).current_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_and_structured_timestamps_normalize_alike() {
        let structured = UNIX_EPOCH + Duration::from_millis(1_679_587_200_000);
        assert_eq!(
            Timestamp::from(structured).as_millis(),
            Timestamp::from(1_679_587_200_000u64).as_millis()
        );
    }

    #[test]
    fn sub_millisecond_precision_is_dropped() {
        let time = UNIX_EPOCH + Duration::from_micros(2_999);
        assert_eq!(Timestamp::from(time).as_millis(), 2);
    }

    #[test]
    fn instants_before_unix_epoch_are_negative() {
        let time = UNIX_EPOCH - Duration::from_millis(1_000);
        assert_eq!(Timestamp::from(time).as_millis(), -1_000);
    }

    #[test]
    fn millis_convert_back_to_system_time() {
        let time = Timestamp::Millis(1_500).to_system_time().unwrap();
        assert_eq!(time, UNIX_EPOCH + Duration::from_millis(1_500));

        let before = Timestamp::Millis(-1_500).to_system_time().unwrap();
        assert_eq!(Timestamp::from(before).as_millis(), -1_500);
    }

    #[test]
    fn duration_is_an_offset_from_unix_epoch() {
        assert_eq!(Timestamp::from(Duration::from_secs(2)).as_millis(), 2_000);
    }

    #[test]
    fn oversized_unsigned_millis_saturate() {
        assert_eq!(Timestamp::from(u64::MAX).as_millis(), i64::MAX);
    }

    #[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
    #[test]
    fn std_system_time_is_used_off_wasm_unknown() {
        let now = std::time::SystemTime::now();
        assert_eq!(Timestamp::from(now), Timestamp::Time(now));
        assert!(Timestamp::Millis(0).to_system_time() == Some(std::time::UNIX_EPOCH));
    }

    #[test]
    fn system_clock_is_after_custom_epoch() {
        assert!(SystemClock.current_millis() > CUSTOM_EPOCH_MS);
    }
}
