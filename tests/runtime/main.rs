//! Integration tests for Layer 3: Runtime
//!
//! Tests for the command interpreter, batch files, configuration loading,
//! and the interactive session driven by scripted input.

mod batch;
mod commands;
mod config;
mod session;
