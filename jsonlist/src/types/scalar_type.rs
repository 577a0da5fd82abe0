use crate::common::{DATA_ABSENT, DATA_PRESENT};
use crate::errors::{ErrorKind, JsonListError, JsonListResult};
use crate::types::{DataBind, DataReader, DbType, DocPropertyType};
use serde::{Deserializer, Serializer};
use std::io::{Read, Write};

/// Converts one mapped property between its in-memory form and a column.
///
/// A type registry holds one `ScalarType` per mapped column; the instance is
/// configured once and then shared by every read and write of that column.
///
/// * `Value` - what is bound and formatted
/// * `Loaded` - what a row read produces
/// * `Parsed` - what text and stream parsing produce
pub trait ScalarType {
    type Value: ?Sized;
    type Loaded;
    type Parsed;

    /// The database type this column is bound as.
    fn jdbc_type(&self) -> DbType;

    fn is_nullable(&self) -> bool;

    /// Document-store projection of the property, passed through unchanged.
    fn doc_type(&self) -> DocPropertyType;

    /// Returns `true` when loaded values can be changed in place.
    fn is_mutable(&self) -> bool {
        false
    }

    /// Returns `true` when a loaded value must be written back.
    fn is_dirty(&self, value: &Self::Loaded) -> bool;

    /// Reads the current column from `reader`. SQL NULL reads as `None`.
    fn read<R: DataReader>(&self, reader: &mut R) -> JsonListResult<Option<Self::Loaded>>;

    /// Binds `value` as the next statement parameter.
    fn bind<B: DataBind>(&self, bind: &mut B, value: Option<&Self::Value>) -> JsonListResult<()>;

    /// Binds the column's representation of an absent value.
    fn bind_null<B: DataBind>(&self, bind: &mut B) -> JsonListResult<()>;

    /// Formats `value` as text.
    fn format_value(&self, value: &Self::Value) -> JsonListResult<String>;

    /// Parses text produced by [ScalarType::format_value].
    fn parse(&self, text: &str) -> JsonListResult<Self::Parsed>;

    /// Reads one value embedded in a larger JSON document.
    fn json_read<'de, D: Deserializer<'de>>(
        &self,
        deserializer: D,
    ) -> JsonListResult<Option<Self::Parsed>>;

    /// Writes one value into a larger JSON document.
    fn json_write<S: Serializer>(
        &self,
        serializer: S,
        value: Option<&Self::Value>,
    ) -> JsonListResult<S::Ok>;

    /// Reads a value written by [ScalarType::write_data].
    fn read_data<R: Read>(&self, input: &mut R) -> JsonListResult<Option<Self::Parsed>> {
        let mut marker = [0u8; 1];
        input.read_exact(&mut marker)?;
        match marker[0] {
            DATA_ABSENT => Ok(None),
            DATA_PRESENT => {
                let mut len = [0u8; 4];
                input.read_exact(&mut len)?;
                let len = u64::from(u32::from_be_bytes(len));
                let mut buf = Vec::new();
                (&mut *input).take(len).read_to_end(&mut buf)?;
                if buf.len() as u64 != len {
                    log::error!("Expected {} bytes of binary data, found {}", len, buf.len());
                    return Err(JsonListError::new(
                        &format!("Expected {} bytes of binary data, found {}", len, buf.len()),
                        ErrorKind::IOError,
                    ));
                }
                let text = String::from_utf8(buf)?;
                self.parse(&text).map(Some)
            }
            other => {
                log::error!("Unexpected presence marker {} in binary data", other);
                Err(JsonListError::new(
                    &format!("Unexpected presence marker {} in binary data", other),
                    ErrorKind::IOError,
                ))
            }
        }
    }

    /// Writes a presence marker and, for `Some`, the length-prefixed formatted text.
    fn write_data<W: Write>(&self, output: &mut W, value: Option<&Self::Value>) -> JsonListResult<()> {
        match value {
            None => output.write_all(&[DATA_ABSENT])?,
            Some(value) => {
                let text = self.format_value(value)?;
                let len = u32::try_from(text.len()).map_err(|_| {
                    log::error!("Formatted value of {} bytes is too large", text.len());
                    JsonListError::new(
                        &format!("Formatted value of {} bytes is too large", text.len()),
                        ErrorKind::IOError,
                    )
                })?;
                output.write_all(&[DATA_PRESENT])?;
                output.write_all(&len.to_be_bytes())?;
                output.write_all(text.as_bytes())?;
            }
        }
        Ok(())
    }
}
