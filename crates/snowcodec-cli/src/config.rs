use anyhow::bail;
use clap::{Parser, Subcommand};
use snowcodec::{Snowflake, SnowflakeId, SystemClock, TimeSource};

/// Runtime configuration for the `snowcodec` binary.
///
/// The codec defaults mirror the library's: UNIX epoch, shard ID 1, sequence
/// 0. Each can be set from the command line or the environment (a `.env` file
/// in the working directory is loaded first).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "snowcodec",
    version,
    about = "Generate, parse, and validate 64-bit Snowflake IDs"
)]
pub struct CliArgs {
    /// Epoch that timestamps are measured from, in milliseconds since
    /// 1970-01-01 UTC.
    ///
    /// IDs must be parsed with the epoch they were generated with.
    ///
    /// Environment variable: `SNOWFLAKE_EPOCH`
    #[arg(
        long,
        env = "SNOWFLAKE_EPOCH",
        default_value_t = 0,
        global = true,
        allow_negative_numbers = true
    )]
    pub epoch: i64,

    /// Shard ID encoded into generated IDs. Values above 1023 wrap.
    ///
    /// Environment variable: `SNOWFLAKE_SHARD_ID`
    #[arg(long, env = "SNOWFLAKE_SHARD_ID", default_value_t = 1, global = true)]
    pub shard_id: u64,

    /// Sequence value the first generated ID takes. Useful to continue a
    /// counter across invocations.
    ///
    /// Environment variable: `SNOWFLAKE_SEQUENCE`
    #[arg(long, env = "SNOWFLAKE_SEQUENCE", default_value_t = 0, global = true)]
    pub sequence: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Generate new IDs, one per line.
    Generate {
        /// Timestamp to encode, in milliseconds since 1970-01-01 UTC.
        /// Defaults to the current time.
        #[arg(long, allow_negative_numbers = true)]
        timestamp: Option<i64>,

        /// Number of IDs to generate.
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Print a JSON array instead of plain lines.
        #[arg(long)]
        json: bool,
    },

    /// Decode an ID into its timestamp, shard ID, and sequence.
    Parse {
        /// The ID, in base 10.
        id: String,

        /// Print JSON instead of plain text.
        #[arg(long)]
        json: bool,
    },

    /// Check that IDs look like Snowflakes. Exits with status 1 if any does
    /// not.
    Validate {
        /// IDs to check, in base 10.
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[derive(Debug, Clone)]
pub struct CodecConfig {
    pub epoch: i64,
    pub shard_id: u64,
    pub sequence: u64,
    pub command: Command,
}

impl CodecConfig {
    /// Builds a wall-clock codec with the configured defaults.
    pub fn codec(&self) -> Snowflake {
        Snowflake::from_components(self.epoch, self.shard_id, self.sequence, SystemClock)
    }
}

impl TryFrom<CliArgs> for CodecConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let now = SystemClock.current_millis();
        if args.epoch > now {
            tracing::warn!(
                epoch = args.epoch,
                now,
                "SNOWFLAKE_EPOCH is later than the current time, IDs generated \
                 without --timestamp will carry a corrupt timestamp"
            );
        }

        if args.shard_id > SnowflakeId::MAX_SHARD_ID {
            tracing::warn!(
                shard_id = args.shard_id,
                encoded = args.shard_id & SnowflakeId::SHARD_ID_MASK,
                "SNOWFLAKE_SHARD_ID exceeds {} and will wrap",
                SnowflakeId::MAX_SHARD_ID
            );
        }

        if let Command::Generate { count: 0, .. } = args.command {
            bail!("--count must be greater than 0");
        }

        Ok(Self {
            epoch: args.epoch,
            shard_id: args.shard_id,
            sequence: args.sequence,
            command: args.command,
        })
    }
}
