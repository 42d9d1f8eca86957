//! Error taxonomy shared by every layer of the catalog.
//!
//! Each layer defines its own typed errors and converts into
//! [`CatalogError`] via `From`, so that the HTTP adapter has a single type to
//! map onto status codes.

/// Top-level error returned by services and repository ports.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Client input broke a domain invariant.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The addressed resource does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The persistence engine failed. Details are opaque to callers.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Field-level invariant violations.
///
/// The display strings are client-facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Id no valido")]
    InvalidId,

    #[error("El nombre de Producto no puede ir vacio")]
    EmptyName,

    #[error("Precio no valido")]
    InvalidPrice,

    #[error("Valor para disponibilidad no valido")]
    InvalidAvailability,
}

impl ValidationError {
    /// Name of the field the violation refers to.
    #[must_use]
    pub fn field(self) -> &'static str {
        match self {
            Self::InvalidId => "id",
            Self::EmptyName => "name",
            Self::InvalidPrice => "price",
            Self::InvalidAvailability => "availability",
        }
    }
}

/// A lookup by identifier matched nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} no encontrado")]
pub struct NotFoundError {
    pub entity: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_render_not_found_message_for_product() {
        let err = NotFoundError {
            entity: "Producto",
        };
        assert_eq!(err.to_string(), "Producto no encontrado");
    }

    #[test]
    fn should_map_validation_error_to_field_name() {
        assert_eq!(ValidationError::InvalidId.field(), "id");
        assert_eq!(ValidationError::InvalidPrice.field(), "price");
        assert_eq!(ValidationError::InvalidPrice.to_string(), "Precio no valido");
    }

    #[test]
    fn should_convert_into_catalog_error_via_from() {
        let err: CatalogError = ValidationError::EmptyName.into();
        assert!(matches!(
            err,
            CatalogError::Validation(ValidationError::EmptyName)
        ));
    }
}
