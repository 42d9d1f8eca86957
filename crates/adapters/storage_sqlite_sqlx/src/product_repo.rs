//! `SQLite` implementation of [`ProductRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use catalog_app::ports::ProductRepository;
use catalog_domain::error::CatalogError;
use catalog_domain::id::ProductId;
use catalog_domain::product::{NewProduct, Product, ProductChanges};
use catalog_domain::time;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Product`].
struct Wrapper(Product);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Product> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let price: f64 = row.try_get("price")?;
        let availability: bool = row.try_get("availability")?;
        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;

        let created_at =
            time::from_text(&created_at).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let updated_at =
            time::from_text(&updated_at).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Product {
            id: ProductId::new(id),
            name,
            price,
            availability,
            created_at,
            updated_at,
        }))
    }
}

const INSERT: &str = "INSERT INTO products (name, price, availability, created_at, updated_at) \
     VALUES (?, ?, 1, ?, ?) \
     RETURNING id, name, price, availability, created_at, updated_at";
const SELECT_BY_ID: &str = "SELECT id, name, price, availability, created_at, updated_at \
     FROM products WHERE id = ?";
const SELECT_ALL: &str = "SELECT id, name, price, availability, created_at, updated_at \
     FROM products ORDER BY id DESC";
const UPDATE: &str = "UPDATE products SET \
     name = COALESCE(?, name), \
     price = COALESCE(?, price), \
     availability = COALESCE(?, availability), \
     updated_at = ? \
     WHERE id = ? \
     RETURNING id, name, price, availability, created_at, updated_at";
const DELETE_BY_ID: &str = "DELETE FROM products WHERE id = ?";
const DELETE_ALL: &str = "DELETE FROM products";
const RESET_SEQUENCE: &str = "DELETE FROM sqlite_sequence WHERE name = 'products'";

/// `SQLite`-backed product repository.
pub struct SqliteProductRepository {
    pool: SqlitePool,
}

impl SqliteProductRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ProductRepository for SqliteProductRepository {
    fn create(
        &self,
        product: NewProduct,
    ) -> impl Future<Output = Result<Product, CatalogError>> + Send {
        let pool = self.pool.clone();
        async move {
            let now = time::to_text(time::now());
            let row: Wrapper = sqlx::query_as(INSERT)
                .bind(&product.name)
                .bind(product.price)
                .bind(&now)
                .bind(&now)
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.0)
        }
    }

    fn get_by_id(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<Option<Product>, CatalogError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.as_i64())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(
        &self,
        id: ProductId,
        changes: ProductChanges,
    ) -> impl Future<Output = Result<Option<Product>, CatalogError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(UPDATE)
                .bind(changes.name)
                .bind(changes.price)
                .bind(changes.availability)
                .bind(time::to_text(time::now()))
                .bind(id.as_i64())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn delete(&self, id: ProductId) -> impl Future<Output = Result<bool, CatalogError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.as_i64())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(result.rows_affected() > 0)
        }
    }

    fn clear(&self) -> impl Future<Output = Result<u64, CatalogError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut tx = pool.begin().await.map_err(StorageError::from)?;
            let removed = sqlx::query(DELETE_ALL)
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?
                .rows_affected();
            sqlx::query(RESET_SEQUENCE)
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;
            tx.commit().await.map_err(StorageError::from)?;

            Ok(removed)
        }
    }
}
