//! Data Transfer Objects
//!
//! Response bodies exposed over HTTP. Requests are deserialized straight into
//! [`crate::domain::request::GenerationRequest`].

pub mod job;
