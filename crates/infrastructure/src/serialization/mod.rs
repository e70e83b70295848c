//! Deterministic JSON serialization for files written by Quill.
//!
//! Output uses 2-space indentation and a trailing newline so the cookie
//! jar diffs cleanly and stays readable.

mod json;

pub use json::*;
