//! Postgres native JSON values.

use std::fmt::{Display, Formatter};

/// A value tagged with a Postgres type name, bound through
/// [DataBind::set_object](crate::types::DataBind::set_object).
///
/// The payload is the JSON text; `None` binds a typed NULL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgObject {
    pg_type: String,
    value: Option<String>,
}

impl PgObject {
    pub fn new(pg_type: &str, value: Option<String>) -> Self {
        PgObject {
            pg_type: pg_type.to_string(),
            value,
        }
    }

    pub fn pg_type(&self) -> &str {
        &self.pg_type
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn is_null(&self) -> bool {
        self.value.is_none()
    }
}

impl Display for PgObject {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}::{}", value, self.pg_type),
            None => write!(f, "null::{}", self.pg_type),
        }
    }
}

/// Wraps `value` as a native object of the given Postgres type.
pub fn as_object(pg_type: &str, value: Option<&str>) -> PgObject {
    PgObject::new(pg_type, value.map(str::to_string))
}
