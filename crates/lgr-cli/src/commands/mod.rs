//! CLI command implementations.

pub mod common;
pub mod route;
pub mod stats;
pub mod version;
