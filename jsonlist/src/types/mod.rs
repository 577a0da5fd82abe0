mod data_bind;
mod db_type;
mod doc_property_type;
mod json_list;
pub mod postgres;
mod scalar_type;

pub use data_bind::*;
pub use db_type::*;
pub use doc_property_type::*;
pub use json_list::*;
pub use postgres::PgObject;
pub use scalar_type::*;
