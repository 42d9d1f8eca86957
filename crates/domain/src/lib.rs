//! # catalog-domain
//!
//! Pure domain model for the product catalog.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define the **Product** resource and the inputs that create or change it
//! - Contain all invariant enforcement (`name` not blank, `price > 0`)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod product;
