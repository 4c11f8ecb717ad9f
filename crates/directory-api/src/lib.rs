//! # Directory API
//! 
//! HTTP handlers, auth extractors, the response envelope, and the router.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
