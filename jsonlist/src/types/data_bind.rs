use crate::errors::JsonListResult;
use crate::types::{DbType, PgObject};

/// Reads the current column of a result row.
pub trait DataReader {
    /// Returns the column as text, or `None` for SQL NULL.
    fn get_string(&mut self) -> JsonListResult<Option<String>>;
}

/// Binds the next statement parameter.
pub trait DataBind {
    fn set_string(&mut self, value: &str) -> JsonListResult<()>;

    /// Binds a NULL typed as `db_type`.
    fn set_null(&mut self, db_type: DbType) -> JsonListResult<()>;

    /// Binds a platform native object.
    fn set_object(&mut self, value: PgObject) -> JsonListResult<()>;
}

impl<T: DataReader + ?Sized> DataReader for &mut T {
    fn get_string(&mut self) -> JsonListResult<Option<String>> {
        (**self).get_string()
    }
}

impl<T: DataBind + ?Sized> DataBind for &mut T {
    fn set_string(&mut self, value: &str) -> JsonListResult<()> {
        (**self).set_string(value)
    }

    fn set_null(&mut self, db_type: DbType) -> JsonListResult<()> {
        (**self).set_null(db_type)
    }

    fn set_object(&mut self, value: PgObject) -> JsonListResult<()> {
        (**self).set_object(value)
    }
}

/// A column value ready to be bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnValue {
    /// Bound with [DataBind::set_string].
    String(String),
    /// Bound with [DataBind::set_null].
    Null(DbType),
    /// Bound with [DataBind::set_object].
    Object(PgObject),
}

impl ColumnValue {
    /// Returns `true` when the value is NULL at the storage level.
    pub fn is_null(&self) -> bool {
        match self {
            ColumnValue::String(_) => false,
            ColumnValue::Null(_) => true,
            ColumnValue::Object(object) => object.is_null(),
        }
    }

    /// The JSON text carried by the value, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ColumnValue::String(text) => Some(text),
            ColumnValue::Null(_) => None,
            ColumnValue::Object(object) => object.value(),
        }
    }

    pub fn bind_to<B: DataBind + ?Sized>(self, bind: &mut B) -> JsonListResult<()> {
        match self {
            ColumnValue::String(text) => bind.set_string(&text),
            ColumnValue::Null(db_type) => bind.set_null(db_type),
            ColumnValue::Object(object) => bind.set_object(object),
        }
    }
}
