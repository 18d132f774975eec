//! HTTP contract checks for the storefront backend.
//!
//! Fixtures under `contracts/http/{group}/{id}.json` describe one request and
//! the status, headers and body fragment the backend must answer with. The
//! same fixtures run against a live backend from the binary and against the
//! in-process mock from this crate's tests.

pub mod config;
pub mod fixture;
pub mod reporter;
pub mod runner;
