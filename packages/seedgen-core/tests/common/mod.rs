//! Common test utilities for seedgen-core
//!
//! Shared fixtures for integration tests.

#![allow(dead_code)]

mod fixtures;

pub use fixtures::*;
