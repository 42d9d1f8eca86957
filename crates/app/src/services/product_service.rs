//! Product service: use-cases for managing the catalog.

use catalog_domain::error::{CatalogError, NotFoundError};
use catalog_domain::id::ProductId;
use catalog_domain::product::{NewProduct, Product, ProductChanges};

use crate::ports::ProductRepository;

const ENTITY: &str = "Producto";

fn not_found(id: ProductId) -> CatalogError {
    tracing::debug!(%id, "product not found");
    NotFoundError { entity: ENTITY }.into()
}

/// Application service for product CRUD operations.
pub struct ProductService<R> {
    repo: R,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// List every product, highest id first.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        self.repo.get_all().await
    }

    /// Look up a product by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when no product with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Create a new product after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    pub async fn create_product(&self, product: NewProduct) -> Result<Product, CatalogError> {
        product.validate()?;
        let created = self.repo.create(product).await?;
        tracing::debug!(id = %created.id, "product created");
        Ok(created)
    }

    /// Apply `changes` to an existing product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when the product does not exist,
    /// [`CatalogError::Validation`] if the changes break an invariant, or a
    /// storage error from the repository.
    pub async fn update_product(
        &self,
        id: ProductId,
        changes: ProductChanges,
    ) -> Result<Product, CatalogError> {
        self.get_product(id).await?;
        changes.validate()?;
        let updated = self
            .repo
            .update(id, changes)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::debug!(%id, "product updated");
        Ok(updated)
    }

    /// Flip the `availability` flag of a product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when the product does not exist,
    /// or a storage error from the repository.
    pub async fn toggle_availability(&self, id: ProductId) -> Result<Product, CatalogError> {
        let current = self.get_product(id).await?;
        let updated = self
            .repo
            .update(id, ProductChanges::availability(!current.availability))
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::debug!(%id, availability = updated.availability, "product availability toggled");
        Ok(updated)
    }

    /// Permanently delete a product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when the product does not exist,
    /// or a storage error from the repository.
    pub async fn delete_product(&self, id: ProductId) -> Result<(), CatalogError> {
        if !self.repo.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::debug!(%id, "product deleted");
        Ok(())
    }

    /// Remove every product, returning how many were deleted.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn clear_products(&self) -> Result<u64, CatalogError> {
        let removed = self.repo.clear().await?;
        tracing::info!(removed, "product catalog cleared");
        Ok(removed)
    }
}
