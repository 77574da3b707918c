//! Web layer for the journey planner.
//!
//! Serves the landing and listing pages plus a small JSON API over the
//! route catalog.

mod dto;
mod links;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use links::{ListingLink, index_href};
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
