//! Repository Module
//!
//! In-memory storage for the server. Records live for the lifetime of the
//! process; nothing is persisted across restarts.

pub mod job;

pub use job::{JobRegistry, RegistryError};
