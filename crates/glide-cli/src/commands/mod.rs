//! CLI command implementations

pub mod info;
pub mod markers;
pub mod simulate;
