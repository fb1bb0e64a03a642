//! Graphwalk CLI - graph and grid algorithms from the command line.
//!
//! This crate provides the `graphwalk` binary and the library pieces it is
//! built from: argument parsing, input documents, configuration and report
//! rendering.

#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;

pub use config::Config;
pub use error::{Error, Result};
