//! Declarative request validation: each field has an ordered list of checks.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::{AppError, FieldError, Location};

/// A predicate over one input value (`None` when the field is absent) and the message reported when it fails.
pub struct Check {
    pub test: fn(Option<&Value>) -> bool,
    pub message: &'static str,
}

pub struct FieldRule {
    pub field: &'static str,
    pub checks: &'static [Check],
}

pub const ID_PARAM: FieldRule = FieldRule {
    field: "id",
    checks: &[
        Check {
            test: not_empty,
            message: "Ingresa un ID",
        },
        Check {
            test: is_numeric,
            message: "El ID debe ser un Numero",
        },
    ],
};

pub const NAME: FieldRule = FieldRule {
    field: "name",
    checks: &[Check {
        test: not_empty,
        message: "Ingresa un nombre",
    }],
};

pub const PRICE: FieldRule = FieldRule {
    field: "price",
    checks: &[
        Check {
            test: not_empty,
            message: "Ingresa un precio",
        },
        Check {
            test: is_numeric,
            message: "El precio debe ser un Numero",
        },
        Check {
            test: greater_than_zero,
            message: "El precio debe ser mayor a 0",
        },
    ],
};

pub const AVAILABILITY: FieldRule = FieldRule {
    field: "availability",
    checks: &[Check {
        test: optional_bool,
        message: "La disponibilidad debe ser un booleano",
    }],
};

/// Rules for the create and full-update bodies.
pub const PRODUCT_BODY: &[FieldRule] = &[NAME, PRICE, AVAILABILITY];

/// Runs rules against path params and body, collecting every failure.
#[derive(Default)]
pub struct RequestValidator {
    errors: Vec<FieldError>,
}

impl RequestValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, rule: &FieldRule, raw: &str) -> Self {
        let value = Value::String(raw.to_string());
        self.run(rule, Location::Params, Some(&value));
        self
    }

    pub fn body(mut self, rules: &[FieldRule], body: &Map<String, Value>) -> Self {
        for rule in rules {
            self.run(rule, Location::Body, body.get(rule.field));
        }
        self
    }

    /// `Ok` when every check passed, otherwise a validation error carrying all failures in rule order.
    pub fn finish(self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.errors))
        }
    }

    fn run(&mut self, rule: &FieldRule, location: Location, value: Option<&Value>) {
        for check in rule.checks {
            if !(check.test)(value) {
                self.errors
                    .push(FieldError::field(rule.field, location, value, check.message));
            }
        }
    }
}

fn looks_numeric(s: &str) -> bool {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?([0-9]*[.])?[0-9]+$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(s))
}

/// Textual form of a scalar; `None` for null, arrays and objects.
pub fn coerce_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Numeric value of a JSON number or a numeric string.
pub fn coerce_number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if looks_numeric(s) => s.parse().ok(),
        _ => None,
    }
}

pub fn coerce_bool(v: &Value) -> Option<bool> {
    match v {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::String(s) => match s.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Path id as a table key. Numeric ids outside the `i32` key space name no row.
pub fn record_id(raw: &str) -> Option<i32> {
    raw.parse().ok()
}

fn not_empty(v: Option<&Value>) -> bool {
    match v {
        None | Some(Value::Null) => false,
        Some(Value::Array(_) | Value::Object(_)) => true,
        Some(v) => coerce_text(v).is_some_and(|s| !s.is_empty()),
    }
}

/// JSON numbers always qualify; their textual form may be in exponent notation.
fn is_numeric(v: Option<&Value>) -> bool {
    match v {
        Some(Value::Number(_)) => true,
        Some(Value::String(s)) => looks_numeric(s),
        _ => false,
    }
}

fn greater_than_zero(v: Option<&Value>) -> bool {
    v.and_then(coerce_number).is_some_and(|n| n > 0.0)
}

fn optional_bool(v: Option<&Value>) -> bool {
    match v {
        None | Some(Value::Null) => true,
        Some(v) => coerce_bool(v).is_some(),
    }
}
