use crate::common::{ModifyAwareList, Value, EMPTY_JSON_ARRAY, PG_JSONB_TYPE, PG_JSON_TYPE};
use crate::errors::{ErrorKind, JsonListError, JsonListResult};
use crate::json;
use crate::types::postgres::as_object;
use crate::types::{ColumnValue, DataBind, DataReader, DbType, DocPropertyType, ScalarType};
use serde::{Deserializer, Serializer};

/// Storage encoding of a list column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonListVariant {
    /// JSON text in a character column.
    Varchar,
    /// Postgres `json`.
    Json,
    /// Postgres `jsonb`.
    Jsonb,
}

impl JsonListVariant {
    /// The Postgres type name native values are tagged with, `None` for text.
    pub fn pg_type(&self) -> Option<&'static str> {
        match self {
            JsonListVariant::Varchar => None,
            JsonListVariant::Json => Some(PG_JSON_TYPE),
            JsonListVariant::Jsonb => Some(PG_JSONB_TYPE),
        }
    }

    pub fn db_type(&self) -> DbType {
        match self {
            JsonListVariant::Varchar => DbType::Varchar,
            JsonListVariant::Json => DbType::Json,
            JsonListVariant::Jsonb => DbType::Jsonb,
        }
    }
}

/// Maps a list of [Value]s to a JSON column.
///
/// The variant, document type and nullability are fixed at construction, so
/// one instance can be shared by any number of threads.
///
/// # Examples
///
/// ```rust,ignore
/// use jsonlist::list;
/// use jsonlist::types::{DbType, DocPropertyType, JsonListType, JsonListVariant};
///
/// let column = JsonListType::type_for(true, DbType::Jsonb, DocPropertyType::Object, false);
/// assert_eq!(column.variant(), JsonListVariant::Jsonb);
///
/// let decoded = column.decode("[1, \"two\"]")?;
/// assert_eq!(decoded, list![1, "two"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonListType {
    variant: JsonListVariant,
    doc_type: DocPropertyType,
    nullable: bool,
}

impl JsonListType {
    pub fn new(variant: JsonListVariant, doc_type: DocPropertyType, nullable: bool) -> Self {
        JsonListType {
            variant,
            doc_type,
            nullable,
        }
    }

    /// Selects the column type for a declared database type.
    ///
    /// Native `json` and `jsonb` are only used on Postgres compatible
    /// platforms; everything else is stored as text.
    pub fn type_for(postgres: bool, db_type: DbType, doc_type: DocPropertyType, nullable: bool) -> Self {
        let variant = match (postgres, db_type) {
            (true, DbType::Jsonb) => JsonListVariant::Jsonb,
            (true, DbType::Json) => JsonListVariant::Json,
            _ => JsonListVariant::Varchar,
        };
        log::debug!(
            "Selected {:?} list column for {} (postgres: {}, nullable: {})",
            variant,
            db_type,
            postgres,
            nullable
        );
        JsonListType::new(variant, doc_type, nullable)
    }

    pub fn variant(&self) -> JsonListVariant {
        self.variant
    }

    /// Decodes column text into a list that tracks later changes.
    pub fn decode(&self, text: &str) -> JsonListResult<ModifyAwareList> {
        json::parse_modify_aware(text).map_err(|cause| {
            log::error!("Failed to parse JSON [{}] as List: {}", text, cause);
            JsonListError::new_with_cause(
                &format!("Failed to parse JSON [{}] as List", text),
                ErrorKind::DecodeError,
                cause,
            )
            .with_raw_text(text)
        })
    }

    /// Encodes `value` as the column value to bind.
    ///
    /// `None` follows [JsonListType::encode_null]. An empty list is always
    /// `"[]"`.
    pub fn encode(&self, value: Option<&[Value]>) -> JsonListResult<ColumnValue> {
        let items = match value {
            None => return Ok(self.encode_null()),
            Some(items) => items,
        };

        let text = if items.is_empty() {
            EMPTY_JSON_ARRAY.to_string()
        } else {
            json::write_list(items).map_err(|cause| {
                log::error!("Failed to format List into JSON content: {}", cause);
                JsonListError::new_with_cause(
                    "Failed to format List into JSON content",
                    ErrorKind::EncodeError,
                    cause,
                )
            })?
        };

        Ok(match self.variant.pg_type() {
            None => ColumnValue::String(text),
            Some(pg_type) => ColumnValue::Object(as_object(pg_type, Some(&text))),
        })
    }

    /// The column value bound for an absent list.
    ///
    /// Non-nullable columns store `"[]"` instead of NULL.
    pub fn encode_null(&self) -> ColumnValue {
        if !self.nullable {
            log::trace!("Binding {} for null list in non-nullable column", EMPTY_JSON_ARRAY);
        }
        match (self.variant.pg_type(), self.nullable) {
            (None, true) => ColumnValue::Null(DbType::Varchar),
            (None, false) => ColumnValue::String(EMPTY_JSON_ARRAY.to_string()),
            (Some(pg_type), true) => ColumnValue::Object(as_object(pg_type, None)),
            (Some(pg_type), false) => ColumnValue::Object(as_object(pg_type, Some(EMPTY_JSON_ARRAY))),
        }
    }
}

impl ScalarType for JsonListType {
    type Value = [Value];
    type Loaded = ModifyAwareList;
    type Parsed = Vec<Value>;

    fn jdbc_type(&self) -> DbType {
        self.variant.db_type()
    }

    fn is_nullable(&self) -> bool {
        self.nullable
    }

    fn doc_type(&self) -> DocPropertyType {
        self.doc_type
    }

    fn is_mutable(&self) -> bool {
        true
    }

    fn is_dirty(&self, value: &ModifyAwareList) -> bool {
        value.is_modified()
    }

    fn read<R: DataReader>(&self, reader: &mut R) -> JsonListResult<Option<ModifyAwareList>> {
        match reader.get_string()? {
            None => Ok(None),
            Some(text) => self.decode(&text).map(Some),
        }
    }

    fn bind<B: DataBind>(&self, bind: &mut B, value: Option<&[Value]>) -> JsonListResult<()> {
        self.encode(value)?.bind_to(bind)
    }

    fn bind_null<B: DataBind>(&self, bind: &mut B) -> JsonListResult<()> {
        self.encode_null().bind_to(bind)
    }

    fn format_value(&self, value: &[Value]) -> JsonListResult<String> {
        json::write_list(value).map_err(|cause| {
            log::error!("Failed to format List into JSON content: {}", cause);
            JsonListError::new_with_cause(
                "Failed to format List into JSON content",
                ErrorKind::FormattingError,
                cause,
            )
        })
    }

    fn parse(&self, text: &str) -> JsonListResult<Vec<Value>> {
        json::parse_list(text).map_err(|cause| {
            log::error!("Failed to parse JSON [{}] as List: {}", text, cause);
            JsonListError::new_with_cause(
                &format!("Failed to parse JSON [{}] as List", text),
                ErrorKind::FormattingError,
                cause,
            )
            .with_raw_text(text)
        })
    }

    fn json_read<'de, D: Deserializer<'de>>(&self, deserializer: D) -> JsonListResult<Option<Vec<Value>>> {
        json::read_list(deserializer).map_err(|cause| {
            log::error!("Failed to read List from JSON stream: {}", cause);
            JsonListError::new_with_cause("Failed to read List from JSON stream", ErrorKind::IOError, cause)
        })
    }

    fn json_write<S: Serializer>(&self, serializer: S, value: Option<&[Value]>) -> JsonListResult<S::Ok> {
        json::write_list_to(serializer, value).map_err(|cause| {
            log::error!("Failed to write List to JSON stream: {}", cause);
            JsonListError::new_with_cause("Failed to write List to JSON stream", ErrorKind::IOError, cause)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{DATA_ABSENT, MAX_JSON_DEPTH};
    use crate::list;
    use crate::types::PgObject;
    use indexmap::IndexMap;

    struct Row(Option<String>);

    impl DataReader for Row {
        fn get_string(&mut self) -> JsonListResult<Option<String>> {
            Ok(self.0.take())
        }
    }

    #[derive(Default)]
    struct Bound(Vec<ColumnValue>);

    impl DataBind for Bound {
        fn set_string(&mut self, value: &str) -> JsonListResult<()> {
            self.0.push(ColumnValue::String(value.to_string()));
            Ok(())
        }

        fn set_null(&mut self, db_type: DbType) -> JsonListResult<()> {
            self.0.push(ColumnValue::Null(db_type));
            Ok(())
        }

        fn set_object(&mut self, value: PgObject) -> JsonListResult<()> {
            self.0.push(ColumnValue::Object(value));
            Ok(())
        }
    }

    fn column(variant: JsonListVariant, nullable: bool) -> JsonListType {
        JsonListType::new(variant, DocPropertyType::Object, nullable)
    }

    fn nested() -> Vec<Value> {
        let mut object = IndexMap::new();
        object.insert("b".to_string(), Value::from(1));
        object.insert("a".to_string(), list![true, ()].into());
        list!["x", 2.5, object, list![1, list![]]]
    }

    #[test]
    fn variant_selection() {
        let select = |postgres, db_type| {
            JsonListType::type_for(postgres, db_type, DocPropertyType::Object, true).variant()
        };
        assert_eq!(select(false, DbType::Jsonb), JsonListVariant::Varchar);
        assert_eq!(select(false, DbType::Json), JsonListVariant::Varchar);
        assert_eq!(select(true, DbType::Jsonb), JsonListVariant::Jsonb);
        assert_eq!(select(true, DbType::Json), JsonListVariant::Json);
        assert_eq!(select(true, DbType::Varchar), JsonListVariant::Varchar);
        assert_eq!(select(true, DbType::Clob), JsonListVariant::Varchar);
    }

    #[test]
    fn configuration_is_passed_through() {
        let list_type = JsonListType::type_for(true, DbType::Json, DocPropertyType::List, false);
        assert_eq!(list_type.jdbc_type(), DbType::Json);
        assert_eq!(list_type.doc_type(), DocPropertyType::List);
        assert!(!list_type.is_nullable());
        assert!(list_type.is_mutable());
    }

    #[test]
    fn decode_returns_unmodified_list() {
        let decoded = column(JsonListVariant::Varchar, true)
            .decode(r#"[1, "a", null, {"k": [2]}]"#)
            .unwrap();
        assert!(!decoded.is_modified());
        assert_eq!(decoded.len(), 4);
        assert_eq!(decoded[1], Value::from("a"));
    }

    #[test]
    fn decode_rejects_non_arrays() {
        let list_type = column(JsonListVariant::Varchar, true);
        for text in ["{not an array}", "[1,2,", "{\"a\": 1}", "\"text\"", ""] {
            let err = list_type.decode(text).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::DecodeError);
            assert_eq!(err.raw_text(), Some(text));
            assert!(err.cause().is_some());
            assert!(err.message().contains("as List"));
        }
    }

    #[test]
    fn read_handles_sql_null() {
        let list_type = column(JsonListVariant::Jsonb, true);
        assert!(list_type.read(&mut Row(None)).unwrap().is_none());

        let loaded = list_type.read(&mut Row(Some("[3]".into()))).unwrap().unwrap();
        assert_eq!(loaded, list![3]);
        assert!(!list_type.is_dirty(&loaded));
    }

    #[test]
    fn dirty_after_change() {
        let list_type = column(JsonListVariant::Varchar, true);
        let mut loaded = list_type.decode("[1]").unwrap();
        loaded.push(2.into());
        assert!(list_type.is_dirty(&loaded));
    }

    #[test]
    fn encode_empty_is_canonical() {
        assert_eq!(
            column(JsonListVariant::Varchar, true).encode(Some(&[])).unwrap(),
            ColumnValue::String("[]".to_string())
        );
        for variant in [JsonListVariant::Json, JsonListVariant::Jsonb] {
            let encoded = column(variant, true).encode(Some(&[])).unwrap();
            assert_eq!(encoded.as_text(), Some("[]"));
            assert!(matches!(encoded, ColumnValue::Object(_)));
        }
    }

    #[test]
    fn encode_native_tags_type() {
        let encoded = column(JsonListVariant::Jsonb, true)
            .encode(Some(&list![1, "a"]))
            .unwrap();
        assert_eq!(
            encoded,
            ColumnValue::Object(as_object("jsonb", Some(r#"[1,"a"]"#)))
        );
    }

    #[test]
    fn encode_preserves_order_and_nesting() {
        let items = nested();
        let list_type = column(JsonListVariant::Varchar, true);
        let encoded = list_type.encode(Some(&items)).unwrap();
        assert_eq!(
            encoded.as_text(),
            Some(r#"["x",2.5,{"b":1,"a":[true,null]},[1,[]]]"#)
        );
        assert_eq!(list_type.decode(encoded.as_text().unwrap()).unwrap(), items);
    }

    #[test]
    fn encode_rejects_unrepresentable() {
        for variant in [JsonListVariant::Varchar, JsonListVariant::Json, JsonListVariant::Jsonb] {
            let err = column(variant, true)
                .encode(Some(&list![1, f64::INFINITY]))
                .unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::EncodeError);
            assert_eq!(
                err.cause().map(|c| c.kind().clone()),
                Some(ErrorKind::UnrepresentableValue)
            );
        }
    }

    #[test]
    fn null_policy() {
        let cases = [
            (JsonListVariant::Varchar, true, ColumnValue::Null(DbType::Varchar)),
            (JsonListVariant::Varchar, false, ColumnValue::String("[]".into())),
            (JsonListVariant::Json, true, ColumnValue::Object(as_object("json", None))),
            (JsonListVariant::Json, false, ColumnValue::Object(as_object("json", Some("[]")))),
            (JsonListVariant::Jsonb, true, ColumnValue::Object(as_object("jsonb", None))),
            (JsonListVariant::Jsonb, false, ColumnValue::Object(as_object("jsonb", Some("[]")))),
        ];
        for (variant, nullable, expected) in cases {
            let list_type = column(variant, nullable);
            assert_eq!(list_type.encode_null(), expected);
            assert_eq!(list_type.encode(None).unwrap(), expected);
            assert_eq!(expected.is_null(), nullable);
        }
    }

    #[test]
    fn non_nullable_null_decodes_empty() {
        let list_type = column(JsonListVariant::Varchar, false);
        let text = list_type.encode_null();
        assert!(list_type.decode(text.as_text().unwrap()).unwrap().is_empty());
    }

    #[test]
    fn bind_uses_matching_binder_call() {
        let mut bound = Bound::default();
        column(JsonListVariant::Varchar, true).bind(&mut bound, Some(&list![1])).unwrap();
        column(JsonListVariant::Varchar, true).bind(&mut bound, None).unwrap();
        column(JsonListVariant::Json, false).bind_null(&mut bound).unwrap();
        assert_eq!(
            bound.0,
            vec![
                ColumnValue::String("[1]".into()),
                ColumnValue::Null(DbType::Varchar),
                ColumnValue::Object(as_object("json", Some("[]"))),
            ]
        );
    }

    #[test]
    fn bind_failure_binds_nothing() {
        let mut bound = Bound::default();
        let err = column(JsonListVariant::Jsonb, true)
            .bind(&mut bound, Some(&[Value::from_bytes(vec![0])]))
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::EncodeError);
        assert!(bound.0.is_empty());
    }

    #[test]
    fn format_value_always_serializes() {
        let list_type = column(JsonListVariant::Varchar, false);
        assert_eq!(list_type.format_value(&[]).unwrap(), "[]");
        assert_eq!(list_type.format_value(&list![1, ()]).unwrap(), "[1,null]");
    }

    #[test]
    fn format_value_failure_is_fatal() {
        let err = column(JsonListVariant::Varchar, true)
            .format_value(&list![f64::NAN])
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::FormattingError);
        assert!(err.is_fatal());
    }

    #[test]
    fn parse_returns_plain_list() {
        let list_type = column(JsonListVariant::Json, true);
        let parsed: Vec<Value> = list_type.parse("[\"a\", 1]").unwrap();
        assert_eq!(parsed, list!["a", 1]);

        let err = list_type.parse("[1,2,").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::FormattingError);
        assert_eq!(err.raw_text(), Some("[1,2,"));
    }

    #[test]
    fn streaming_back_to_back() {
        let list_type = column(JsonListVariant::Varchar, true);
        let mut out = Vec::new();
        {
            let mut ser = serde_json::Serializer::new(&mut out);
            list_type.json_write(&mut ser, Some(&list![1, "a"])).unwrap();
            list_type.json_write(&mut ser, Some(&[])).unwrap();
            list_type.json_write(&mut ser, None).unwrap();
        }
        assert_eq!(String::from_utf8(out.clone()).unwrap(), r#"[1,"a"][]null"#);

        let mut de = serde_json::Deserializer::from_slice(&out);
        assert_eq!(list_type.json_read(&mut de).unwrap(), Some(list![1, "a"]));
        assert_eq!(list_type.json_read(&mut de).unwrap(), Some(list![]));
        assert_eq!(list_type.json_read(&mut de).unwrap(), None);
        de.end().unwrap();
    }

    fn cause_kind(err: &JsonListError) -> Option<ErrorKind> {
        err.cause().map(|c| c.kind().clone())
    }

    #[test]
    fn streaming_faults_are_io_errors() {
        let list_type = column(JsonListVariant::Varchar, true);
        let mut de = serde_json::Deserializer::from_str("[1,");
        let err = list_type.json_read(&mut de).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::IOError);
        assert_eq!(cause_kind(&err), Some(ErrorKind::SyntaxError));
        assert!(err.cause().unwrap().message().contains("EOF"));

        let mut out = Vec::new();
        let err = list_type
            .json_write(&mut serde_json::Serializer::new(&mut out), Some(&list![f64::NAN]))
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::IOError);
        assert_eq!(cause_kind(&err), Some(ErrorKind::UnrepresentableValue));
        assert!(out.is_empty());
    }

    struct ClosedWriter;

    impl std::io::Write for ClosedWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stream closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writer_faults_keep_their_cause() {
        let list_type = column(JsonListVariant::Json, true);
        let err = list_type
            .json_write(&mut serde_json::Serializer::new(ClosedWriter), Some(&list![1]))
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::IOError);
        assert_eq!(cause_kind(&err), Some(ErrorKind::IOError));
        assert!(err.cause().unwrap().message().contains("stream closed"));
    }

    fn deeply_nested(depth: usize) -> Vec<Value> {
        let mut value = Value::from(1);
        for _ in 0..depth {
            value = Value::Array(vec![value]);
        }
        vec![value]
    }

    #[test]
    fn encoded_lists_always_decode() {
        let list_type = column(JsonListVariant::Jsonb, true);
        let deepest = deeply_nested(MAX_JSON_DEPTH - 1);
        let encoded = list_type.encode(Some(&deepest)).unwrap();
        assert_eq!(list_type.decode(encoded.as_text().unwrap()).unwrap(), deepest);

        let err = list_type.encode(Some(&deeply_nested(200))).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::EncodeError);
        assert_eq!(cause_kind(&err), Some(ErrorKind::UnrepresentableValue));

        let mut buf = Vec::new();
        let err = list_type.write_data(&mut buf, Some(&deeply_nested(200))).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::FormattingError);
        assert!(buf.is_empty());
    }

    #[test]
    fn binary_snapshot() {
        let list_type = column(JsonListVariant::Jsonb, true);
        let items = nested();
        let mut buf = Vec::new();
        list_type.write_data(&mut buf, Some(&items)).unwrap();
        list_type.write_data(&mut buf, None).unwrap();
        assert_eq!(*buf.last().unwrap(), DATA_ABSENT);

        let mut input = buf.as_slice();
        assert_eq!(list_type.read_data(&mut input).unwrap(), Some(items));
        assert_eq!(list_type.read_data(&mut input).unwrap(), None);
        assert!(input.is_empty());
    }

    #[test]
    fn binary_snapshot_faults() {
        let list_type = column(JsonListVariant::Varchar, true);
        let mut truncated: &[u8] = &[1, 0, 0, 0, 9, b'['];
        assert_eq!(list_type.read_data(&mut truncated).unwrap_err().kind(), &ErrorKind::IOError);

        let mut bad_marker: &[u8] = &[7];
        assert_eq!(list_type.read_data(&mut bad_marker).unwrap_err().kind(), &ErrorKind::IOError);

        let mut bad_content: &[u8] = &[1, 0, 0, 0, 2, b'{', b'}'];
        assert_eq!(
            list_type.read_data(&mut bad_content).unwrap_err().kind(),
            &ErrorKind::FormattingError
        );

        let mut buf = Vec::new();
        let err = list_type.write_data(&mut buf, Some(&list![f64::NAN])).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::FormattingError);
        assert!(buf.is_empty());
    }

    #[test]
    fn shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync + Copy>() {}
        assert_send_sync::<JsonListType>();
    }
}
