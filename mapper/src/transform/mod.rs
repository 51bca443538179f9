//! Transformation module.
//!
//! - Joiner: taxonomy rows + translations -> output mapping
//! - Pipeline: the full load / join / write run

pub mod joiner;
pub mod pipeline;

pub use joiner::{build, join_row, JoinResult, RunReport, SkippedRow};
pub use pipeline::{run, run_with};
