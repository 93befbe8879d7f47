//! Integration test utilities for the LMS API
//!
//! This crate provides helpers for running end-to-end tests against
//! the REST API backed by the in-memory store.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
