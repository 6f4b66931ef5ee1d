//! Reel Core
//!
//! Core types for the Reel video generation service.
//!
//! This crate contains:
//! - Domain types: the job record, its lifecycle and the generation request
//! - DTOs: response payloads returned by the HTTP API

pub mod domain;
pub mod dto;
