// HTTP delivery surface (axum).

pub mod error;
pub mod handlers;
pub mod router;

pub use error::ApiError;
pub use router::{import_router, AppState};
