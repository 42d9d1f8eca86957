//! JSON REST handlers for products.
//!
//! Handlers receive input that already passed its rule set (see
//! [`Validated`]); the only failures left to them are missing rows and
//! storage errors, both mapped by [`ApiError`].

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use catalog_app::ports::ProductRepository;
use catalog_domain::error::ValidationError;
use catalog_domain::id::ProductId;
use catalog_domain::product::{NewProduct, Product, ProductChanges};

use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::rules::{self, FieldRule, Location};
use crate::validation::{FromValidated, RequestInput, Validated};

const DELETED: &str = "Producto eliminado";

/// Success envelope.
#[derive(Debug, Serialize)]
pub struct Data<T> {
    pub data: T,
}

/// A product addressed by the `{id}` path segment.
#[derive(Debug)]
pub struct ProductKey(pub ProductId);

impl FromValidated for ProductKey {
    const RULES: &'static [FieldRule] = rules::BY_ID;

    fn from_validated(input: &RequestInput) -> Result<Self, ValidationError> {
        read_id(input).map(Self)
    }
}

/// Validated body of `POST /api/products`.
#[derive(Debug)]
pub struct CreateProductRequest(pub NewProduct);

impl FromValidated for CreateProductRequest {
    const RULES: &'static [FieldRule] = rules::CREATE;

    fn from_validated(input: &RequestInput) -> Result<Self, ValidationError> {
        let name = read_name(input)?;
        let price = read_price(input)?;
        Ok(Self(NewProduct::new(name, price)))
    }
}

/// Validated path and body of `PUT /api/products/{id}`.
#[derive(Debug)]
pub struct UpdateProductRequest {
    pub id: ProductId,
    pub changes: ProductChanges,
}

impl FromValidated for UpdateProductRequest {
    const RULES: &'static [FieldRule] = rules::UPDATE;

    fn from_validated(input: &RequestInput) -> Result<Self, ValidationError> {
        let id = read_id(input)?;
        let name = read_name(input)?;
        let price = read_price(input)?;
        let availability = rules::as_bool(input.get(Location::Body, rules::AVAILABILITY.field))
            .ok_or(ValidationError::InvalidAvailability)?;
        Ok(Self {
            id,
            changes: ProductChanges::replace_all(name, price, availability),
        })
    }
}

fn read_id(input: &RequestInput) -> Result<ProductId, ValidationError> {
    rules::as_id(input.get(Location::Params, rules::ID.field)).ok_or(ValidationError::InvalidId)
}

fn read_name(input: &RequestInput) -> Result<String, ValidationError> {
    rules::as_name(input.get(Location::Body, rules::NAME.field)).ok_or(ValidationError::EmptyName)
}

fn read_price(input: &RequestInput) -> Result<f64, ValidationError> {
    rules::as_price(input.get(Location::Body, rules::PRICE.field))
        .ok_or(ValidationError::InvalidPrice)
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Data<Vec<Product>>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from endpoints returning a single product.
pub enum ProductResponse {
    Ok(Json<Data<Product>>),
    Created(Json<Data<Product>>),
}

impl IntoResponse for ProductResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    Deleted,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Deleted => Json(Data { data: DELETED }).into_response(),
        }
    }
}

/// `GET /api/products`
pub async fn list<R>(State(state): State<AppState<R>>) -> Result<ListResponse, ApiError>
where
    R: ProductRepository + Send + Sync + 'static,
{
    let products = state.product_service.list_products().await?;
    Ok(ListResponse::Ok(Json(Data { data: products })))
}

/// `GET /api/products/{id}`
pub async fn get<R>(
    State(state): State<AppState<R>>,
    Validated(ProductKey(id)): Validated<ProductKey>,
) -> Result<ProductResponse, ApiError>
where
    R: ProductRepository + Send + Sync + 'static,
{
    let product = state.product_service.get_product(id).await?;
    Ok(ProductResponse::Ok(Json(Data { data: product })))
}

/// `POST /api/products`
pub async fn create<R>(
    State(state): State<AppState<R>>,
    Validated(CreateProductRequest(product)): Validated<CreateProductRequest>,
) -> Result<ProductResponse, ApiError>
where
    R: ProductRepository + Send + Sync + 'static,
{
    let created = state.product_service.create_product(product).await?;
    Ok(ProductResponse::Created(Json(Data { data: created })))
}

/// `PUT /api/products/{id}`
pub async fn update<R>(
    State(state): State<AppState<R>>,
    Validated(req): Validated<UpdateProductRequest>,
) -> Result<ProductResponse, ApiError>
where
    R: ProductRepository + Send + Sync + 'static,
{
    let updated = state
        .product_service
        .update_product(req.id, req.changes)
        .await?;
    Ok(ProductResponse::Ok(Json(Data { data: updated })))
}

/// `PATCH /api/products/{id}`: flips `availability`, ignores any body.
pub async fn toggle_availability<R>(
    State(state): State<AppState<R>>,
    Validated(ProductKey(id)): Validated<ProductKey>,
) -> Result<ProductResponse, ApiError>
where
    R: ProductRepository + Send + Sync + 'static,
{
    let updated = state.product_service.toggle_availability(id).await?;
    Ok(ProductResponse::Ok(Json(Data { data: updated })))
}

/// `DELETE /api/products/{id}`
pub async fn delete<R>(
    State(state): State<AppState<R>>,
    Validated(ProductKey(id)): Validated<ProductKey>,
) -> Result<DeleteResponse, ApiError>
where
    R: ProductRepository + Send + Sync + 'static,
{
    state.product_service.delete_product(id).await?;
    Ok(DeleteResponse::Deleted)
}
