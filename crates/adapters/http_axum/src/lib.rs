//! # catalog-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the JSON API under `/api/products`
//! - Validate every request against its declared rule set before any handler
//!   runs, answering `400 {"errors": [...]}` with the complete violation list
//! - Map requests into `ProductService` calls (driving adapter)
//! - Map results into the `{data}` / `{error}` envelopes, including a generic
//!   `500` for storage failures so no request is left unanswered
//!
//! ## Dependency rule
//! Depends on `catalog-app` (for port traits and services) and `catalog-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
pub mod validation;
