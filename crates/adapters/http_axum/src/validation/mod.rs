//! Request validation pipeline.
//!
//! - [`rules`] declares the per-field checks bound to each operation.
//! - [`execute`] runs every check of a rule list, without short-circuiting,
//!   and collects the failures as [`Violation`]s.
//! - [`Validated`] is the axum extractor that runs the executor before a
//!   handler and rejects the request with `400 {"errors": [...]}` when
//!   anything failed, so handlers only ever see validated input.

mod extract;
pub mod rules;

use serde::Serialize;
use serde_json::{Map, Value};

use catalog_domain::error::ValidationError;

pub use extract::{FromValidated, Validated, ValidationRejection};
pub use rules::{Check, FieldRule, Location};

const MALFORMED_BODY: &str = "Cuerpo de la peticion no valido";

/// A single failed check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    pub msg: String,
    pub path: &'static str,
    pub location: Location,
}

impl Violation {
    fn field(rule: &FieldRule, check: &Check, value: Option<&Value>) -> Self {
        Self {
            kind: "field",
            value: value.cloned(),
            msg: check.message.to_string(),
            path: rule.field,
            location: rule.location,
        }
    }

    fn malformed_body() -> Self {
        Self {
            kind: "body",
            value: None,
            msg: MALFORMED_BODY.to_string(),
            path: "",
            location: Location::Body,
        }
    }
}

impl From<ValidationError> for Violation {
    fn from(err: ValidationError) -> Self {
        let location = match err {
            ValidationError::InvalidId => Location::Params,
            _ => Location::Body,
        };
        Self {
            kind: "field",
            value: None,
            msg: err.to_string(),
            path: err.field(),
            location,
        }
    }
}

/// The request data rules are evaluated against.
#[derive(Debug, Default, Clone)]
pub struct RequestInput {
    params: Map<String, Value>,
    body: Map<String, Value>,
}

impl RequestInput {
    #[must_use]
    pub fn new(params: Map<String, Value>, body: Map<String, Value>) -> Self {
        Self { params, body }
    }

    #[cfg(test)]
    fn with_param(mut self, name: &str, value: &str) -> Self {
        self.params
            .insert(name.to_string(), Value::String(value.to_string()));
        self
    }

    /// Look up a field, `None` when absent.
    #[must_use]
    pub fn get(&self, location: Location, field: &str) -> Option<&Value> {
        match location {
            Location::Params => self.params.get(field),
            Location::Body => self.body.get(field),
        }
    }
}

/// Parse a raw request body into a JSON object.
///
/// An empty body is an empty object.
///
/// # Errors
///
/// Returns a body violation when the payload is not a JSON object.
pub fn parse_body(bytes: &[u8]) -> Result<Map<String, Value>, Violation> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(Violation::malformed_body()),
    }
}

/// Evaluate every check of every rule, in declaration order.
#[must_use]
pub fn execute(rules: &[FieldRule], input: &RequestInput) -> Vec<Violation> {
    rules
        .iter()
        .flat_map(|rule| {
            let value = input.get(rule.location, rule.field);
            rule.checks
                .iter()
                .filter(move |check| !(check.predicate)(value))
                .map(move |check| Violation::field(rule, check, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> RequestInput {
        match value {
            Value::Object(map) => RequestInput::new(Map::new(), map),
            _ => panic!("body must be an object"),
        }
    }

    fn messages(violations: &[Violation]) -> Vec<&str> {
        violations.iter().map(|v| v.msg.as_str()).collect()
    }

    #[test]
    fn should_report_four_violations_for_empty_create_body() {
        let violations = execute(rules::CREATE, &body(json!({})));
        assert_eq!(
            messages(&violations),
            vec![
                "El nombre de Producto no puede ir vacio",
                "Valor no valido",
                "El precio del Producto no puede ir vacio",
                "Precio no valido",
            ]
        );
    }

    #[test]
    fn should_report_single_violation_for_zero_price() {
        let input = body(json!({"name": "Monitor Curvo - Testing", "price": 0}));
        let violations = execute(rules::CREATE, &input);
        assert_eq!(messages(&violations), vec!["Precio no valido"]);
        assert_eq!(violations[0].path, "price");
        assert_eq!(violations[0].value, Some(json!(0)));
    }

    #[test]
    fn should_report_two_violations_for_non_numeric_price() {
        let input = body(json!({"name": "Monitor Curvo - Testing", "price": "hola"}));
        let violations = execute(rules::CREATE, &input);
        assert_eq!(
            messages(&violations),
            vec!["Valor no valido", "Precio no valido"]
        );
    }

    #[test]
    fn should_accept_valid_create_body() {
        let input = body(json!({"name": "Mouse - testing", "price": 20}));
        assert!(execute(rules::CREATE, &input).is_empty());
    }

    #[test]
    fn should_report_five_violations_for_empty_update_body() {
        let input = body(json!({})).with_param("id", "1");
        let violations = execute(rules::UPDATE, &input);
        assert_eq!(violations.len(), 5);
        assert_eq!(
            violations.last().map(|v| v.msg.as_str()),
            Some("Valor para disponibilidad no valido")
        );
    }

    #[test]
    fn should_report_only_id_violation_for_malformed_id_with_valid_body() {
        let input = body(json!({
            "name": "Monitor Curvo - Testing",
            "availability": true,
            "price": 300
        }))
        .with_param("id", "not-valid-url");

        let violations = execute(rules::UPDATE, &input);
        assert_eq!(messages(&violations), vec!["Id no valido"]);
        assert_eq!(violations[0].location, Location::Params);
    }

    #[test]
    fn should_report_id_violation_for_by_id_rules() {
        let input = RequestInput::default().with_param("id", "not-valid-url");
        let violations = execute(rules::BY_ID, &input);
        assert_eq!(messages(&violations), vec!["Id no valido"]);
        assert_eq!(violations[0].value, Some(json!("not-valid-url")));
    }

    #[test]
    fn should_serialize_violation_like_a_field_error() {
        let input = RequestInput::default().with_param("id", "abc");
        let violations = execute(rules::BY_ID, &input);
        let json = serde_json::to_value(&violations[0]).unwrap();
        assert_eq!(
            json,
            json!({
                "type": "field",
                "value": "abc",
                "msg": "Id no valido",
                "path": "id",
                "location": "params"
            })
        );
    }

    #[test]
    fn should_omit_value_when_field_is_absent() {
        let violations = execute(rules::CREATE, &body(json!({})));
        let json = serde_json::to_value(&violations[0]).unwrap();
        assert!(json.get("value").is_none());
    }

    #[test]
    fn should_treat_empty_body_as_empty_object() {
        assert!(parse_body(b"").unwrap().is_empty());
        assert!(parse_body(b"  \n").unwrap().is_empty());
    }

    #[test]
    fn should_reject_non_object_body() {
        for raw in [&b"{not json"[..], b"[1,2]", b"\"text\""] {
            let err = parse_body(raw).unwrap_err();
            assert_eq!(err.msg, MALFORMED_BODY);
        }
    }

    #[test]
    fn should_convert_domain_validation_error_into_violation() {
        let violation = Violation::from(ValidationError::InvalidPrice);
        assert_eq!(violation.msg, "Precio no valido");
        assert_eq!(violation.path, "price");
        assert_eq!(violation.location, Location::Body);
    }
}
