//! Value objects - immutable types that represent domain concepts

mod labels;
mod percentage;
mod snowflake;

pub(crate) use labels::{labelled_enum, normalize_label};
pub use labels::ParseEnumError;
pub use percentage::Percentage;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
