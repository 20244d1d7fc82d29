mod bits;
mod snowflake;

pub use bits::*;
pub use snowflake::*;
