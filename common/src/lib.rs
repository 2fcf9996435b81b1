//! Shared data model and wizard logic for the certificate service.
//!
//! Nothing in this crate performs I/O. The backend wraps it with HTTP routes,
//! background jobs and the export engines.

pub mod compose;
pub mod error;
pub mod jobs;
pub mod mapping;
pub mod model;
pub mod requests;
pub mod session;
