//! # catalog-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the driven port `ProductRepository` that storage adapters implement
//! - Provide `ProductService`, the driving port the HTTP adapter calls:
//!   list, get, create, update, toggle availability, delete
//! - Turn missing rows into `NotFoundError` and re-check domain invariants
//!   before anything is written
//!
//! ## Dependency rule
//! Depends on `catalog-domain` only. Never imports adapter crates.
//! Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
