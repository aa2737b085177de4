//! Test harnesses for Parapet.
//!
//! Provides fixture lookup and `MockApi`, a mock server standing in for
//! the API under test in end-to-end runs of the `parapet` binary.

#[cfg(test)]
pub mod cli;
#[cfg(test)]
pub mod live;
pub mod mock_api;

pub use mock_api::{fixture, fixtures_dir, write_spec, MockApi, TestError};
