// JobPulse - entry-level job aggregator
//
// This crate ingests intern/trainee/junior postings from a fixed set of
// public sources, dedups them into a single SQLite table, and serves a
// filterable JSON API over the result.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
