//! # API Shared
//!
//! Shared definitions for the herbal REST API.
//!
//! Contains:
//! - Request, query and response wire types (`dto` module)
//! - Shared services like `HealthService`
//! - Access checks for admin-only operations
//!
//! Used by `api-rest` and by clients that want typed bodies.

pub mod auth;
pub mod dto;
pub mod health;

pub use auth::{require_admin, AccessDenied};
pub use dto::*;
pub use health::{HealthRes, HealthService};
