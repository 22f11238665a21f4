//! Integration tests for Layer 1: Parser
//!
//! Tests for phrase resolution and the bestiary.

mod bestiary;
mod resolution;
