//! Ambient plumbing shared by the storefront binaries: env config loading,
//! tracing setup and outgoing HTTP client construction.

pub mod config;
pub mod http;
pub mod tracing;
