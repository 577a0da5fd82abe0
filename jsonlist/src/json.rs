//! JSON array codec shared by the list column types.
//!
//! Errors returned here describe the underlying JSON fault
//! ([ErrorKind::SyntaxError], [ErrorKind::UnrepresentableValue] or
//! [ErrorKind::IOError]); column types wrap them with their own kind.

use crate::common::{ModifyAwareList, Value, MAX_JSON_DEPTH};
use crate::errors::{ErrorKind, JsonListError, JsonListResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Parses `text` as a JSON array.
pub fn parse_list(text: &str) -> JsonListResult<Vec<Value>> {
    Ok(serde_json::from_str::<Vec<Value>>(text)?)
}

/// Parses `text` as a JSON array into a list that tracks later changes.
pub fn parse_modify_aware(text: &str) -> JsonListResult<ModifyAwareList> {
    parse_list(text).map(ModifyAwareList::new)
}

/// Serializes `items` as a compact JSON array.
pub fn write_list(items: &[Value]) -> JsonListResult<String> {
    check_list(items)?;
    Ok(serde_json::to_string(items)?)
}

/// Reads one array, or `null`, from the current position of `deserializer`.
///
/// Only the tokens of that value are consumed. Faults reported by the
/// deserializer are syntax faults of the token stream.
pub fn read_list<'de, D: Deserializer<'de>>(deserializer: D) -> JsonListResult<Option<Vec<Value>>> {
    Option::<Vec<Value>>::deserialize(deserializer)
        .map_err(|e| JsonListError::new(&e.to_string(), ErrorKind::SyntaxError))
}

/// Emits exactly one JSON value: the array of `items`, or `null` for `None`.
///
/// Elements are checked before anything is emitted, so an unrepresentable
/// element leaves the output untouched. Faults reported by the serializer
/// after that are I/O faults.
pub fn write_list_to<S: Serializer>(serializer: S, items: Option<&[Value]>) -> JsonListResult<S::Ok> {
    if let Some(items) = items {
        check_list(items)?;
    }
    items
        .serialize(serializer)
        .map_err(|e| JsonListError::new(&e.to_string(), ErrorKind::IOError))
}

// every element must have a JSON form the parser reads back
fn check_list(items: &[Value]) -> JsonListResult<()> {
    for (position, item) in items.iter().enumerate() {
        if !item.is_json_representable() {
            return Err(JsonListError::new(
                &format!("Element {} has no JSON representation", position),
                ErrorKind::UnrepresentableValue,
            ));
        }
        if !item.fits_depth(MAX_JSON_DEPTH - 1) {
            return Err(JsonListError::new(
                &format!("Element {} nests deeper than {} levels", position, MAX_JSON_DEPTH - 1),
                ErrorKind::UnrepresentableValue,
            ));
        }
    }
    Ok(())
}
