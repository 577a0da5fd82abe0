// column literals
pub const EMPTY_JSON_ARRAY: &str = "[]";

// postgres native type names
pub const PG_JSON_TYPE: &str = "json";
pub const PG_JSONB_TYPE: &str = "jsonb";

// deepest array/object nesting accepted by the parser, the list itself included
pub const MAX_JSON_DEPTH: usize = 127;

// binary snapshot presence markers
pub const DATA_ABSENT: u8 = 0;
pub const DATA_PRESENT: u8 = 1;
