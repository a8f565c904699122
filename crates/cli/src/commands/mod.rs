//! CLI command implementations.
//!
//! Commands write their report to any `io::Write` so they can be tested
//! against a buffer.

pub mod check;
pub mod markets;
pub mod products;

use pehenava_core::UnknownLabel;
use pehenava_storefront::data::DataError;
use thiserror::Error;

/// Errors shared by every command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error("{0}")]
    Filter(#[from] UnknownLabel),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}
