//! JSON REST API handler modules and the `/api` route table.

#[allow(clippy::missing_errors_doc)]
pub mod products;

use axum::Router;
use axum::routing::get;

use catalog_app::ports::ProductRepository;

use crate::state::AppState;

/// Build the `/api` sub-router.
///
/// Each handler declares its validation rules through the
/// [`Validated`](crate::validation::Validated) extractor it takes:
///
/// | Method | Path | Rules | Handler |
/// |---|---|---|---|
/// | `GET` | `/products`, `/products/` | - | [`products::list`] |
/// | `POST` | `/products`, `/products/` | name, price | [`products::create`] |
/// | `GET` | `/products/{id}` | id | [`products::get`] |
/// | `PUT` | `/products/{id}` | id, name, price, availability | [`products::update`] |
/// | `PATCH` | `/products/{id}` | id | [`products::toggle_availability`] |
/// | `DELETE` | `/products/{id}` | id | [`products::delete`] |
pub fn routes<R>() -> Router<AppState<R>>
where
    R: ProductRepository + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/products",
            get(products::list::<R>).post(products::create::<R>),
        )
        .route(
            "/products/",
            get(products::list::<R>).post(products::create::<R>),
        )
        .route(
            "/products/{id}",
            get(products::get::<R>)
                .put(products::update::<R>)
                .patch(products::toggle_availability::<R>)
                .delete(products::delete::<R>),
        )
}
