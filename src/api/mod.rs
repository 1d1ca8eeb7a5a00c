//! HTTP API module for the Stay Cost & Points Engine.
//!
//! This module provides the REST API endpoints for pricing stays against
//! the resort catalog.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BreakdownRequest, CompareRequest, ReferenceRequest};
pub use response::{ApiError, BreakdownResponse, CompareResponse, ReferenceResponse};
pub use state::AppState;
