//! # jsonlist - JSON list columns
//!
//! Maps an ordered list of loosely typed values to a relational column holding
//! its JSON array text. Three storage encodings are supported:
//!
//! - **Varchar**: JSON text in a character column, on any platform
//! - **Json**: Postgres native `json`
//! - **Jsonb**: Postgres native `jsonb`
//!
//! The encoding is chosen once per column from the platform and declared
//! column type, and never changes afterwards.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use jsonlist::json_list_builder::JsonListTypeBuilder;
//! use jsonlist::list;
//! use jsonlist::types::{DbPlatform, DbType, ScalarType};
//!
//! let column = JsonListTypeBuilder::new()
//!     .platform(DbPlatform::Postgres)
//!     .db_type(DbType::Jsonb)
//!     .nullable(false)
//!     .build()?;
//!
//! // bind a list into a statement
//! column.bind(&mut statement, Some(&list![1, "two", 3.5]))?;
//!
//! // read it back from a row
//! let loaded = column.read(&mut row)?;
//! ```
//!
//! ## Null policy
//!
//! A nullable column binds SQL NULL for an absent list. A non-nullable column
//! binds the empty array `"[]"` instead, so an absent list reads back as an
//! empty one.
//!
//! ## Module Organization
//!
//! - [`common`] - Value model, modify-aware list and shared constants
//! - [`errors`] - Error types and result definitions
//! - [`json`] - JSON array codec
//! - [`json_list_builder`] - Column type builder
//! - [`types`] - Column binding traits and the list column type

pub mod common;
pub mod errors;
pub mod json;
pub mod json_list_builder;
pub mod types;

pub use common::{ModifyAwareList, Value};
pub use errors::{ErrorKind, JsonListError, JsonListResult};
pub use json_list_builder::JsonListTypeBuilder;
pub use types::{JsonListType, JsonListVariant, ScalarType};
