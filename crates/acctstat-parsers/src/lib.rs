//! Shared parsing utilities for scheduler accounting files.
//!
//! This crate provides the low-level pieces used by acctstat-lsf and
//! acctstat-report: quote-aware tokenizing and epoch/duration conversion.

pub mod time;
pub mod tokens;

pub use time::{
    epoch_to_datetime, format_duration, seconds_to_duration, serialize_seconds, total_seconds,
};
pub use tokens::{split_line, token_reader, DELIMITER, QUOTE};
