//! CLI command implementations

pub mod search;
