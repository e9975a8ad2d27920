pub mod auth;
pub mod error;
pub mod handlers;
pub mod https;
pub mod router;
pub mod state;

pub use router::{build_router, serve};
pub use state::AppState;
