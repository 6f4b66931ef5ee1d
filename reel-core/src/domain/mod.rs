//! Core domain types
//!
//! These types describe a generation job from submission to completion and
//! are shared by the registry, the runner and the API layer.

pub mod job;
pub mod request;
