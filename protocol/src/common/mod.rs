pub mod auth;
pub mod model;

pub use auth::*;
pub use model::*;
