//! Declarative rule set for product requests.
//!
//! Every field carries an ordered list of independent checks. A single value
//! can fail several checks at once (`price: "hola"` is neither numeric nor
//! positive), and the executor reports each failure separately.

use serde::Serialize;
use serde_json::Value;

use catalog_domain::id::ProductId;

/// Where a field is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Params,
    Body,
}

/// One predicate and the message reported when it fails.
///
/// The predicate receives `None` when the field is absent.
#[derive(Debug, Clone, Copy)]
pub struct Check {
    pub predicate: fn(Option<&Value>) -> bool,
    pub message: &'static str,
}

/// The checks bound to one field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub location: Location,
    pub field: &'static str,
    pub checks: &'static [Check],
}

pub const ID: FieldRule = FieldRule {
    location: Location::Params,
    field: "id",
    checks: &[Check {
        predicate: is_integer,
        message: "Id no valido",
    }],
};

pub const NAME: FieldRule = FieldRule {
    location: Location::Body,
    field: "name",
    checks: &[Check {
        predicate: is_non_blank_text,
        message: "El nombre de Producto no puede ir vacio",
    }],
};

pub const PRICE: FieldRule = FieldRule {
    location: Location::Body,
    field: "price",
    checks: &[
        Check {
            predicate: is_numeric,
            message: "Valor no valido",
        },
        Check {
            predicate: is_present,
            message: "El precio del Producto no puede ir vacio",
        },
        Check {
            predicate: is_positive,
            message: "Precio no valido",
        },
    ],
};

pub const AVAILABILITY: FieldRule = FieldRule {
    location: Location::Body,
    field: "availability",
    checks: &[Check {
        predicate: is_boolean,
        message: "Valor para disponibilidad no valido",
    }],
};

/// `GET`, `PATCH` and `DELETE` on `/api/products/{id}`.
pub const BY_ID: &[FieldRule] = &[ID];

/// `POST /api/products`.
pub const CREATE: &[FieldRule] = &[NAME, PRICE];

/// `PUT /api/products/{id}`.
pub const UPDATE: &[FieldRule] = &[ID, NAME, PRICE, AVAILABILITY];

fn is_integer(value: Option<&Value>) -> bool {
    as_id(value).is_some()
}

fn is_non_blank_text(value: Option<&Value>) -> bool {
    as_name(value).is_some()
}

fn is_numeric(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Number(_)) => true,
        Some(Value::String(s)) => is_decimal_literal(s),
        _ => false,
    }
}

fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

fn is_positive(value: Option<&Value>) -> bool {
    as_price(value).is_some_and(|price| price > 0.0)
}

fn is_boolean(value: Option<&Value>) -> bool {
    as_bool(value).is_some()
}

/// `^[+-]?([0-9]*[.])?[0-9]+$`
fn is_decimal_literal(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => ("", unsigned),
    };
    int_part.bytes().all(|b| b.is_ascii_digit())
        && !frac_part.is_empty()
        && frac_part.bytes().all(|b| b.is_ascii_digit())
}

/// Read a product id from a path segment.
#[must_use]
pub fn as_id(value: Option<&Value>) -> Option<ProductId> {
    match value? {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_i64().map(ProductId::new),
        _ => None,
    }
}

/// Read a product name as text.
///
/// Numbers and booleans are taken in their JSON spelling (`12` becomes
/// `"12"`). Blank text, `null`, arrays and objects yield `None`.
#[must_use]
pub fn as_name(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.trim().is_empty()).then_some(text)
}

/// Numeric interpretation of a price: a JSON number or a decimal string.
#[must_use]
pub fn as_price(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if is_decimal_literal(s) => s.parse().ok(),
        _ => None,
    }
}

/// Boolean interpretation: `true`/`false`, or the literals `"true"`,
/// `"false"`, `"1"`, `"0"` in string or number form.
#[must_use]
pub fn as_bool(value: Option<&Value>) -> Option<bool> {
    match value? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        Value::Number(n) => match n.as_u64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        _ => None,
    }
}
