use indexmap::IndexMap;
use jsonlist::common::Value;
use jsonlist::errors::{ErrorKind, JsonListError, JsonListResult};
use jsonlist::types::{ColumnValue, DataBind, DataReader, DbType, DocPropertyType, JsonListType, JsonListVariant, PgObject};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Runs a test body and fails with the full error chain when it returns an error.
pub fn run_test<T>(test: T)
where
    T: FnOnce() -> JsonListResult<()>,
{
    if let Err(e) = test() {
        panic!("Test failed: {:?}", e);
    }
}

/// Every variant, nullable and not.
pub fn all_columns() -> Vec<JsonListType> {
    let mut columns = Vec::new();
    for variant in [JsonListVariant::Varchar, JsonListVariant::Json, JsonListVariant::Jsonb] {
        for nullable in [true, false] {
            columns.push(JsonListType::new(variant, DocPropertyType::Object, nullable));
        }
    }
    columns
}

/// A result set column backed by memory. Each read consumes one row.
#[derive(Debug, Default)]
pub struct MemoryRow {
    rows: VecDeque<Option<String>>,
}

impl MemoryRow {
    pub fn new() -> Self {
        MemoryRow::default()
    }

    pub fn push(&mut self, text: Option<&str>) {
        self.rows.push_back(text.map(str::to_string));
    }

    /// Queues what a database would return for a bound value.
    pub fn push_bound(&mut self, value: &ColumnValue) {
        self.push(value.as_text());
    }

    pub fn remaining(&self) -> usize {
        self.rows.len()
    }
}

impl DataReader for MemoryRow {
    fn get_string(&mut self) -> JsonListResult<Option<String>> {
        match self.rows.pop_front() {
            Some(text) => Ok(text),
            None => Err(JsonListError::new("No more rows", ErrorKind::IOError)),
        }
    }
}

/// A statement binder recording every bound parameter.
#[derive(Debug, Default)]
pub struct RecordingBind {
    bound: Vec<ColumnValue>,
    fail: bool,
}

impl RecordingBind {
    pub fn new() -> Self {
        RecordingBind::default()
    }

    /// A binder rejecting every parameter.
    pub fn failing() -> Self {
        RecordingBind {
            bound: Vec::new(),
            fail: true,
        }
    }

    pub fn bound(&self) -> &[ColumnValue] {
        &self.bound
    }

    pub fn last(&self) -> Option<&ColumnValue> {
        self.bound.last()
    }

    fn record(&mut self, value: ColumnValue) -> JsonListResult<()> {
        if self.fail {
            return Err(JsonListError::new("Statement closed", ErrorKind::IOError));
        }
        self.bound.push(value);
        Ok(())
    }
}

impl DataBind for RecordingBind {
    fn set_string(&mut self, value: &str) -> JsonListResult<()> {
        self.record(ColumnValue::String(value.to_string()))
    }

    fn set_null(&mut self, db_type: DbType) -> JsonListResult<()> {
        self.record(ColumnValue::Null(db_type))
    }

    fn set_object(&mut self, value: PgObject) -> JsonListResult<()> {
        self.record(ColumnValue::Object(value))
    }
}

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Generates a list of JSON representable values nested up to `depth` levels.
pub fn random_list(rng: &mut StdRng, depth: usize) -> Vec<Value> {
    let len = rng.random_range(0..8);
    (0..len).map(|_| random_value(rng, depth)).collect()
}

pub fn random_value(rng: &mut StdRng, depth: usize) -> Value {
    let choices = if depth == 0 { 6 } else { 8 };
    match rng.random_range(0..choices) {
        0 => Value::Null,
        1 => Value::Bool(rng.random()),
        2 => Value::I64(rng.random()),
        3 => Value::U64(rng.random_range(i64::MAX as u64 + 1..=u64::MAX)),
        // quarters print and parse back exactly
        4 => Value::F64(rng.random_range(-4000..4000) as f64 / 4.0),
        5 => Value::String(random_string(rng)),
        6 => Value::Array(random_list(rng, depth - 1)),
        _ => {
            let mut object = IndexMap::new();
            for i in 0..rng.random_range(0..4) {
                object.insert(format!("k{}", i), random_value(rng, depth - 1));
            }
            Value::Object(object)
        }
    }
}

fn random_string(rng: &mut StdRng) -> String {
    const ALPHABET: &[char] = &['a', 'Z', '0', ' ', '"', '\\', '\n', '\t', 'é', '€', '𝄞', '\u{1}'];
    let len = rng.random_range(0..12);
    (0..len)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())])
        .collect()
}
