//! CLI commands

pub mod push;
pub mod fetch;
pub mod repo;
