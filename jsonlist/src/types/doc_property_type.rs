use std::fmt::{Display, Formatter};

/// Describes how a mapped property projects into a document-store index.
///
/// Column types carry this descriptor so a document-store mapping can be
/// generated from the entity model. Column codecs never interpret it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DocPropertyType {
    Keyword,
    Text,
    Enum,
    Uuid,
    Boolean,
    Short,
    Integer,
    Long,
    Float,
    Double,
    Date,
    DateTime,
    Binary,
    #[default]
    Object,
    List,
    Root,
    Unknown,
}

impl DocPropertyType {
    /// Mapping name used by the document store.
    pub fn name(&self) -> &'static str {
        match self {
            DocPropertyType::Keyword => "keyword",
            DocPropertyType::Text => "text",
            DocPropertyType::Enum => "keyword",
            DocPropertyType::Uuid => "keyword",
            DocPropertyType::Boolean => "boolean",
            DocPropertyType::Short => "short",
            DocPropertyType::Integer => "integer",
            DocPropertyType::Long => "long",
            DocPropertyType::Float => "float",
            DocPropertyType::Double => "double",
            DocPropertyType::Date => "date",
            DocPropertyType::DateTime => "date",
            DocPropertyType::Binary => "binary",
            DocPropertyType::Object => "object",
            DocPropertyType::List => "nested",
            DocPropertyType::Root => "root",
            DocPropertyType::Unknown => "unknown",
        }
    }
}

impl Display for DocPropertyType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
