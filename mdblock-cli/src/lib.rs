//! mdblock CLI library
//!
//! This library provides the command-line interface for segmenting streamed
//! markdown into renderable blocks.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::CliError;
