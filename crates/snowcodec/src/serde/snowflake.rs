use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::SnowflakeId;

/// Serializes as a base-10 string so JavaScript consumers never round the ID
/// through a double.
impl Serialize for SnowflakeId {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        as_string_snow::serialize(self, s)
    }
}

/// Accepts either a base-10 string or a non-negative integer.
impl<'de> Deserialize<'de> for SnowflakeId {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        d.deserialize_any(SnowflakeVisitor)
    }
}

struct SnowflakeVisitor;

impl de::Visitor<'_> for SnowflakeVisitor {
    type Value = SnowflakeId;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a snowflake as a base-10 string or a non-negative integer")
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(SnowflakeId::from_raw(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        u64::try_from(v)
            .map(SnowflakeId::from_raw)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    #[inline]
    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        v.parse().map_err(E::custom)
    }
}

pub mod as_native_snow {
    use super::{Deserialize, Deserializer, Serialize, Serializer};
    use crate::SnowflakeId;

    /// Serialize a snowflake ID as its native `u64`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &SnowflakeId, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        id.to_raw().serialize(s)
    }

    /// Deserialize a snowflake ID from its native `u64`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails.
    pub fn deserialize<'de, D>(d: D) -> Result<SnowflakeId, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(d).map(SnowflakeId::from_raw)
    }
}

pub mod as_string_snow {
    use super::{Deserializer, Serializer, de};
    use crate::SnowflakeId;

    /// Serialize a snowflake ID as a base-10 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &SnowflakeId, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.collect_str(id)
    }

    /// Deserialize a snowflake ID from a base-10 string.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The underlying deserializer fails
    /// - The string is not made of ASCII digits
    /// - The value does not fit in 64 bits
    pub fn deserialize<'de, D>(d: D) -> Result<SnowflakeId, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StrVisitor;

        impl de::Visitor<'_> for StrVisitor {
            type Value = SnowflakeId;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a snowflake as a base-10 string")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                v.parse().map_err(E::custom)
            }
        }

        d.deserialize_str(StrVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DeconstructedSnowflake, Snowflake};
    use serde_json::json;

    #[test]
    fn default_serializes_as_string() {
        let id = SnowflakeId::from_raw(u64::MAX);
        assert_eq!(
            serde_json::to_value(id).unwrap(),
            json!("18446744073709551615")
        );
    }

    #[test]
    fn default_deserializes_from_string_or_number() {
        let from_str: SnowflakeId = serde_json::from_value(json!("4198401")).unwrap();
        let from_num: SnowflakeId = serde_json::from_value(json!(4_198_401u64)).unwrap();
        assert_eq!(from_str, from_num);
        assert_eq!(from_str.to_raw(), 4_198_401);
    }

    #[test]
    fn default_rejects_malformed_and_negative() {
        assert!(serde_json::from_value::<SnowflakeId>(json!("12a")).is_err());
        assert!(serde_json::from_value::<SnowflakeId>(json!("18446744073709551616")).is_err());
        assert!(serde_json::from_value::<SnowflakeId>(json!(-1)).is_err());
        assert!(serde_json::from_value::<SnowflakeId>(json!(true)).is_err());
    }

    #[test]
    fn native_snow_roundtrip() {
        #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
        struct Row {
            #[serde(with = "as_native_snow")]
            id: SnowflakeId,
        }

        let row = Row {
            id: SnowflakeId::from_components(1, 1, 1),
        };
        let out = serde_json::to_string(&row).unwrap();
        assert_eq!(out, r#"{"id":4198401}"#);
        let back: Row = serde_json::from_str(&out).unwrap();
        assert_eq!(back, row);
    }

    #[test]
    fn string_snow_roundtrip() {
        #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
        struct Row {
            #[serde(with = "as_string_snow")]
            id: SnowflakeId,
        }

        let row = Row {
            id: SnowflakeId::from_components(1, 1, 1),
        };
        let out = serde_json::to_string(&row).unwrap();
        assert_eq!(out, r#"{"id":"4198401"}"#);
        let back: Row = serde_json::from_str(&out).unwrap();
        assert_eq!(back, row);

        assert!(serde_json::from_str::<Row>(r#"{"id":4198401}"#).is_err());
    }

    #[test]
    fn deconstructed_serializes_all_fields() {
        let codec = Snowflake::with_epoch(0);
        let parts = codec.parse("4198401", None).unwrap();

        let value = serde_json::to_value(&parts).unwrap();
        assert_eq!(value["timestamp"], json!(1));
        assert_eq!(value["shard_id"], json!(1));
        assert_eq!(value["sequence"], json!(1));
        assert_eq!(value["binary"].as_str().map(str::len), Some(64));

        let back: DeconstructedSnowflake = serde_json::from_value(value).unwrap();
        assert_eq!(back, parts);
    }
}
