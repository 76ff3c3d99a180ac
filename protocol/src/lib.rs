//! Shared wire types for the OratorAI platform API
//!
//! All request and response bodies exchanged with the platform backend are
//! defined here, organized as:
//! - `common`: entity representations shared across endpoints
//! - `api`: per-endpoint request/response DTOs
//!
//! The backend speaks camelCase JSON; every type in this crate pins that
//! contract explicitly so the client can fail loudly on mismatches instead
//! of guessing between alternative response shapes.

pub mod api;
pub mod common;

pub use api::*;
pub use common::*;
