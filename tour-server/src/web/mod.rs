//! Web layer for the tour planner.
//!
//! Provides the search form and the itinerary endpoint.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, Collector};
pub use templates::*;
