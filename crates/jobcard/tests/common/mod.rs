//! Shared test utilities for jobcard integration tests.
//!
//! This module provides:
//! - `FakeBackend`, an in-memory workflow backend that records every call
//! - Builders for machines, contacts and raw job records

pub mod builders;
pub mod fake_backend;

pub use builders::*;
pub use fake_backend::{Call, FakeBackend};
