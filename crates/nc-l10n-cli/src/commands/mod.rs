//! CLI command implementations.

mod check;
mod common;
mod convert;
mod fmt;
mod stats;

pub use check::{CheckArgs, run_check};
pub use common::{Project, ProjectArgs};
pub use convert::{ConvertArgs, run_convert};
pub use fmt::{FmtArgs, run_fmt};
pub use stats::{StatsArgs, run_stats};
