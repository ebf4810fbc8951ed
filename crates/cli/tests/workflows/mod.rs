//! Workflow integration tests
//!
//! Each module exercises one end-to-end scenario of the binary.

pub mod cleanup;
pub mod config;
