// Shared utilities used across domains and sources

pub mod text;

pub use text::*;
