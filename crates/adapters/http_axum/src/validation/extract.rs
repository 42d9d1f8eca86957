//! The `Validated<T>` extractor: runs the rule set and short-circuits with a
//! `400` before the handler is called.

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, RawPathParamsRejection};
use axum::extract::{FromRequest, FromRequestParts, RawPathParams, Request};
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};

use catalog_domain::error::ValidationError;

use super::rules::{FieldRule, Location};
use super::{RequestInput, Violation, execute, parse_body};
use crate::error::violations_response;

/// Typed input built from a request that passed its rule set.
pub trait FromValidated: Sized {
    /// Rules evaluated before [`FromValidated::from_validated`] is called.
    const RULES: &'static [FieldRule];

    /// Build the typed input.
    ///
    /// # Errors
    ///
    /// Returns the offending field when a value cannot be interpreted even
    /// though its rules passed.
    fn from_validated(input: &RequestInput) -> Result<Self, ValidationError>;
}

/// Extractor yielding `T` only when every rule in `T::RULES` holds.
///
/// Consumes the request body, so it must be the last extractor.
#[derive(Debug)]
pub struct Validated<T>(pub T);

/// Why a request never reached its handler.
#[derive(Debug)]
pub enum ValidationRejection {
    /// One or more rules failed.
    Invalid(Vec<Violation>),
    /// Path parameters could not be decoded.
    Path(RawPathParamsRejection),
    /// The body could not be buffered.
    Body(BytesRejection),
}

impl IntoResponse for ValidationRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Invalid(violations) => violations_response(violations),
            Self::Path(rejection) => rejection.into_response(),
            Self::Body(rejection) => rejection.into_response(),
        }
    }
}

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: FromValidated,
{
    type Rejection = ValidationRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        let params = match RawPathParams::from_request_parts(&mut parts, state).await {
            Ok(raw) => raw
                .iter()
                .map(|(name, value)| (name.to_string(), Value::String(value.to_string())))
                .collect(),
            Err(RawPathParamsRejection::MissingPathParams(_)) => Map::new(),
            Err(rejection) => return Err(ValidationRejection::Path(rejection)),
        };

        let reads_body = T::RULES.iter().any(|rule| rule.location == Location::Body);
        let body = if reads_body {
            let bytes = Bytes::from_request(Request::from_parts(parts, body), state)
                .await
                .map_err(ValidationRejection::Body)?;
            match parse_body(&bytes) {
                Ok(body) => body,
                Err(malformed) => {
                    // path rules still report alongside the unreadable body
                    let path_rules: Vec<FieldRule> = T::RULES
                        .iter()
                        .copied()
                        .filter(|rule| rule.location == Location::Params)
                        .collect();
                    let mut violations =
                        execute(&path_rules, &RequestInput::new(params, Map::new()));
                    violations.push(malformed);
                    return Err(ValidationRejection::Invalid(violations));
                }
            }
        } else {
            Map::new()
        };

        let input = RequestInput::new(params, body);
        let violations = execute(T::RULES, &input);
        if !violations.is_empty() {
            tracing::debug!(count = violations.len(), "request rejected by validation");
            return Err(ValidationRejection::Invalid(violations));
        }

        T::from_validated(&input)
            .map(Validated)
            .map_err(|err| ValidationRejection::Invalid(vec![Violation::from(err)]))
    }
}
