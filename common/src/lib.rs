#![deny(clippy::unwrap_used)]

pub mod cli;
pub mod fetcher;
pub mod progress;
pub mod utils;
