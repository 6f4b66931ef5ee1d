//! Service Module
//!
//! Business logic between the HTTP layer and the registry/runner.

pub mod job;

pub use job::{JobError, JobService};
