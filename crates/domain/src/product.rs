//! Product: the single resource managed by the catalog.

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, ValidationError};
use crate::id::ProductId;
use crate::time::Timestamp;

/// A persisted product.
///
/// Values are immutable snapshots: writes go through the repository, which
/// hands back a fresh `Product`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub availability: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields supplied when creating a product. `id` and `availability` are
/// chosen by storage.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
}

impl NewProduct {
    #[must_use]
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    /// Check domain invariants before the product is persisted.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] on a blank name or non-positive price.
    pub fn validate(&self) -> Result<(), CatalogError> {
        validate_name(&self.name)?;
        validate_price(self.price)?;
        Ok(())
    }
}

/// A set of field replacements. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub availability: Option<bool>,
}

impl ProductChanges {
    /// Replace every mutable field.
    #[must_use]
    pub fn replace_all(name: impl Into<String>, price: f64, availability: bool) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(price),
            availability: Some(availability),
        }
    }

    /// Change only the availability flag.
    #[must_use]
    pub fn availability(availability: bool) -> Self {
        Self {
            availability: Some(availability),
            ..Self::default()
        }
    }

    /// Check the fields that are present.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] on a blank name or non-positive price.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }

    /// Produce the product that results from applying these changes at `now`.
    #[must_use]
    pub fn apply_to(&self, product: &Product, now: Timestamp) -> Product {
        Product {
            id: product.id,
            name: self.name.clone().unwrap_or_else(|| product.name.clone()),
            price: self.price.unwrap_or(product.price),
            availability: self.availability.unwrap_or(product.availability),
            created_at: product.created_at,
            updated_at: now,
        }
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(ValidationError::InvalidPrice);
    }
    Ok(())
}
