//! Test utilities for the Rincón storefront.
//!
//! Provides `MockBackend` (an in-process axum stand-in for the REST backend)
//! and a demo data seeder. Import in tests only. Never in production code.

pub mod backend;
pub mod seed;
