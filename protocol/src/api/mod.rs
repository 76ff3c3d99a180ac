//! API DTOs module
//!
//! Request/response data transfer objects organized by domain:
//! - `auth`: session lifecycle
//! - `course`, `class`, `topic`: catalog CRUD
//! - `group`: group lifecycle and membership
//! - `enrollment`: enroll/drop relations
//! - `presentation`: submission flow
//! - `admin`: user administration

pub mod admin;
pub mod auth;
pub mod class;
pub mod course;
pub mod enrollment;
pub mod group;
pub mod presentation;
pub mod topic;

pub use admin::*;
pub use auth::*;
pub use class::*;
pub use course::*;
pub use enrollment::*;
pub use group::*;
pub use presentation::*;
pub use topic::*;
