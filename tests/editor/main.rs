//! Integration tests for Layer 2: Editor
//!
//! Tests for line editing, history, and the output pager driven through the
//! same in-memory screen and scripted input the session uses.

mod editing;
