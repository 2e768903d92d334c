//! The station table for a single metro line.
//!
//! A line is a static, ordered list of stations supplied by configuration.
//! The tracker treats it as read-only input: it is built once (from JSON or
//! the built-in seed) and shared behind an `Arc`.

mod error;
mod seed;
mod table;

pub use error::LineError;
pub use seed::{LineBuilder, yellow_line};
pub use table::{EndPolicy, StationTable};
