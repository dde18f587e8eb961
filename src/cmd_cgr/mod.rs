//! Subcommand modules for the `cgr` binary.

pub mod blocks;
pub mod contiguous;
