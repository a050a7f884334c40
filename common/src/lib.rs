//! Common utilities shared across the shopping bias detector workspace
//!
//! This crate provides shared functionality that can be used across the
//! `detection` engine and the `shopping` domain crate, including:
//!
//! - Configuration loading
//! - YAML `!include` merging used by the build script
//! - Shared test errors and assertion macros

pub mod config;
pub mod yaml_include;

// Test helpers module - available for both development and test builds
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

#[cfg(any(test, feature = "test-helpers"))]
pub use test_helpers::{TestError, TestResult};
