//! # Shortlinks
//!
//! A per-user URL shortener service built with Axum and Redis.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Core entities, storage/identity traits,
//!   key scheme, and the hit-counting pipeline
//! - **Application Layer** ([`application`]) - Slug registry and redirect
//!   services
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis store and Google
//!   identity integration
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Owner-scoped slugs: every authenticated user manages their own namespace
//! - Google ID token authentication (audience-pinned, verified email only)
//! - Asynchronous access counting that never delays redirects
//! - Rate limiting and structured request logging
//!
//! ## Quick Start
//!
//! ```bash
//! # Set required environment variables
//! export REDIS_URL="redis://localhost:6379/0"
//! export GOOGLE_CLIENT_ID="....apps.googleusercontent.com"
//!
//! # Start the service
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via
//! [`config::Config`]. See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{LinkService, RedirectService};
    pub use crate::domain::entities::{RecordPatch, ShortLinkRecord};
    pub use crate::domain::identity::{AuthContext, AuthenticatedUser, IdentityVerifier};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
