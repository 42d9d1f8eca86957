//! Storage port: repository trait for product persistence.

use std::future::Future;

use catalog_domain::error::CatalogError;
use catalog_domain::id::ProductId;
use catalog_domain::product::{NewProduct, Product, ProductChanges};

/// Repository for persisting and querying [`Product`]s.
///
/// Any failure of the underlying engine is reported as
/// [`CatalogError::Storage`]; absence is expressed in the return value, not
/// as an error.
pub trait ProductRepository {
    /// Insert a new product. Storage assigns the id, sets `availability` to
    /// `true` and stamps both timestamps.
    fn create(
        &self,
        product: NewProduct,
    ) -> impl Future<Output = Result<Product, CatalogError>> + Send;

    /// Get a product by its identifier.
    fn get_by_id(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Option<Product>, CatalogError>> + Send;

    /// Get every product, most recently created (highest id) first.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;

    /// Apply `changes` to the product with `id`.
    ///
    /// Returns `None` when the row does not exist.
    fn update(
        &self,
        id: ProductId,
        changes: ProductChanges,
    ) -> impl Future<Output = Result<Option<Product>, CatalogError>> + Send;

    /// Permanently remove a product. Returns `false` when nothing matched.
    fn delete(&self, id: ProductId) -> impl Future<Output = Result<bool, CatalogError>> + Send;

    /// Remove every product and reset the id sequence.
    fn clear(&self) -> impl Future<Output = Result<u64, CatalogError>> + Send;
}
