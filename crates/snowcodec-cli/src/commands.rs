use std::io::Write;

use anyhow::Context;
use snowcodec::{GenerateOptions, Snowflake, TimeSource};

/// Writes `count` fresh IDs, one per line or as a JSON array of strings.
pub fn generate<T, W>(
    codec: &Snowflake<T>,
    timestamp: Option<i64>,
    count: usize,
    json: bool,
    out: &mut W,
) -> anyhow::Result<()>
where
    T: TimeSource,
    W: Write,
{
    let mut options = GenerateOptions::new();
    if let Some(timestamp) = timestamp {
        options = options.timestamp(timestamp);
    }

    let ids = (0..count).map(|_| codec.generate_id(options));
    if json {
        let ids: Vec<_> = ids.collect();
        serde_json::to_writer(&mut *out, &ids)?;
        writeln!(out)?;
    } else {
        for id in ids {
            writeln!(out, "{id}")?;
        }
    }
    Ok(())
}

/// Writes the decoded fields of `id`.
pub fn parse<T, W>(codec: &Snowflake<T>, id: &str, json: bool, out: &mut W) -> anyhow::Result<()>
where
    T: TimeSource,
    W: Write,
{
    let parts = codec
        .parse(id, None)
        .with_context(|| format!("failed to parse snowflake `{id}`"))?;

    if json {
        serde_json::to_writer_pretty(&mut *out, &parts)?;
        writeln!(out)?;
    } else {
        writeln!(out, "timestamp: {}", parts.timestamp)?;
        writeln!(out, "shard_id:  {}", parts.shard_id)?;
        writeln!(out, "sequence:  {}", parts.sequence)?;
        writeln!(out, "binary:    {}", parts.binary)?;
    }
    Ok(())
}

/// Writes `valid` or `invalid` for each ID. Returns whether all were valid.
pub fn validate<T, W>(codec: &Snowflake<T>, ids: &[String], out: &mut W) -> anyhow::Result<bool>
where
    T: TimeSource,
    W: Write,
{
    let mut all_valid = true;
    for id in ids {
        let valid = codec.is_valid(id);
        all_valid &= valid;
        writeln!(out, "{id}\t{}", if valid { "valid" } else { "invalid" })?;
    }
    Ok(all_valid)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedTime;
    impl TimeSource for FixedTime {
        fn current_millis(&self) -> i64 {
            1
        }
    }

    fn codec() -> Snowflake<FixedTime> {
        Snowflake::from_components(0, 1, 1, FixedTime)
    }

    fn output(f: impl FnOnce(&mut Vec<u8>) -> anyhow::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn generate_prints_one_id_per_line() {
        let codec = codec();
        let text = output(|out| generate(&codec, None, 3, false, out));
        assert_eq!(text, "4198401\n4198402\n4198403\n");
        assert_eq!(codec.sequence(), 4);
    }

    #[test]
    fn generate_json_is_an_array_of_strings() {
        let codec = codec();
        let text = output(|out| generate(&codec, Some(2), 2, true, out));
        let ids: Vec<String> = serde_json::from_str(&text).unwrap();
        assert_eq!(ids, vec!["8392705", "8392706"]);
    }

    #[test]
    fn parse_prints_fields() {
        let text = output(|out| parse(&codec(), "4198401", false, out));
        assert!(text.contains("timestamp: 1\n"));
        assert!(text.contains("shard_id:  1\n"));
        assert!(text.contains("sequence:  1\n"));
    }

    #[test]
    fn parse_json_round_trips() {
        let text = output(|out| parse(&codec(), "4198401", true, out));
        let parts: snowcodec::DeconstructedSnowflake = serde_json::from_str(&text).unwrap();
        assert_eq!(parts.timestamp, 1);
        assert_eq!(parts.binary.len(), 64);
    }

    #[test]
    fn parse_reports_malformed_input() {
        let err = parse(&codec(), "abc", false, &mut Vec::<u8>::new()).unwrap_err();
        assert!(err.to_string().contains("`abc`"));
    }

    #[test]
    fn validate_reports_each_id() {
        let codec = codec();
        let ids = vec!["175928847299117063".to_owned(), "123".to_owned()];
        let mut out = Vec::new();

        let all_valid = validate(&codec, &ids, &mut out).unwrap();

        assert!(!all_valid);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "175928847299117063\tvalid\n123\tinvalid\n"
        );
    }
}
