//! # snowcodec
//!
//! Pack a timestamp, a shard id, and a sequence counter into a single 64-bit
//! Snowflake ID, and unpack it again.
//!
//! ```text
//!  Bit Index:  63             22 21            12 11             0
//!              +----------------+----------------+---------------+
//!  Field:      | timestamp (42) | shard ID (10)  | sequence (12) |
//!              +----------------+----------------+---------------+
//!              |<----- MSB ---------- 64 bits --------- LSB ----->|
//! ```
//!
//! IDs travel as base-10 strings so that consumers without a native 64-bit
//! integer (e.g. JavaScript) never lose precision.
//!
//! ```
//! use snowcodec::{GenerateOptions, Snowflake};
//!
//! let codec = Snowflake::with_epoch(0);
//! codec.set_sequence(1);
//!
//! let id = codec.generate(GenerateOptions::new().timestamp(1).shard_id(1));
//! assert_eq!(id, "4198401");
//!
//! let parts = codec.parse(&id, None).unwrap();
//! assert_eq!(parts.timestamp, 1);
//! assert_eq!(parts.shard_id, 1);
//! assert_eq!(parts.sequence, 1);
//! assert!(codec.is_valid("175928847299117063"));
//! ```
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`SnowflakeId`] and
//!   [`DeconstructedSnowflake`], plus `#[serde(with = ...)]` helpers.
//! - `tracing`: trace spans around `generate`/`parse` and warnings when an
//!   encoded timestamp is silently truncated.
//! - `cache-padded`: pads the shared sequence counter to a cache line.

mod codec;
mod error;
mod id;
#[cfg(feature = "serde")]
mod serde;
mod time;

pub use crate::codec::*;
pub use crate::error::*;
pub use crate::id::*;
#[cfg(feature = "serde")]
pub use crate::serde::*;
pub use crate::time::*;
