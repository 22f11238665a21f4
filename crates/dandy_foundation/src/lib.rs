//! Core error types for Dandy.
//!
//! This crate provides:
//! - [`Error`] - The error type returned by every fallible Dandy operation
//! - [`ErrorKind`] - Categorized, recoverable failure conditions
//! - [`ErrorContext`] - Where an error occurred (batch file, line, frames)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;

pub use error::{Error, ErrorContext, ErrorKind, Result};
