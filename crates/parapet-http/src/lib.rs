//! HTTP execution for Parapet.
//!
//! Turns an operation plus one of its example groups into a concrete
//! request against the server under test and captures the response as a
//! [`LiveResponse`](parapet_validator::LiveResponse). JSON and YAML bodies
//! are parsed up front so the response validator can match them.

pub mod config;
pub mod curl;
pub mod error;
pub mod executor;

pub use config::HttpExecutorConfig;
pub use curl::curl_command;
pub use error::ExecuteError;
pub use executor::{HttpExecutor, PreparedRequest};
