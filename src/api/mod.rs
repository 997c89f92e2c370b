//! HTTP API module for the JustTip service.
//!
//! This module provides the REST endpoints for rostering shifts, recording
//! daily tip pools and reading weekly payouts.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ShiftRequest, StartDateQuery, WeekStartQuery};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
