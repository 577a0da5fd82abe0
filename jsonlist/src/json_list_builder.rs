use crate::errors::{JsonListError, JsonListResult};
use crate::types::{DbPlatform, DbType, DocPropertyType, JsonListType};

/// Builder for configuring a [JsonListType] from mapping metadata.
///
/// `JsonListTypeBuilder` captures the first configuration error and returns it
/// from [build](JsonListTypeBuilder::build), so settings can be chained without
/// checking each one.
///
/// The defaults are a generic platform, a `VARCHAR` column, an object document
/// type and a nullable column.
///
/// # Examples
///
/// ```rust,ignore
/// use jsonlist::json_list_builder::JsonListTypeBuilder;
/// use jsonlist::types::{DbType, JsonListVariant};
///
/// let column = JsonListTypeBuilder::new()
///     .platform_name("postgres")
///     .db_type(DbType::Jsonb)
///     .nullable(false)
///     .build()?;
/// assert_eq!(column.variant(), JsonListVariant::Jsonb);
/// ```
pub struct JsonListTypeBuilder {
    error: Option<JsonListError>,
    platform: DbPlatform,
    db_type: DbType,
    doc_type: DocPropertyType,
    nullable: bool,
}

impl Default for JsonListTypeBuilder {
    fn default() -> Self {
        JsonListTypeBuilder::new()
    }
}

impl JsonListTypeBuilder {
    pub fn new() -> Self {
        JsonListTypeBuilder {
            error: None,
            platform: DbPlatform::default(),
            db_type: DbType::Varchar,
            doc_type: DocPropertyType::default(),
            nullable: true,
        }
    }

    pub fn platform(mut self, platform: DbPlatform) -> Self {
        self.platform = platform;
        self
    }

    /// Sets the platform by name, e.g. `"postgres"` or `"h2"`.
    ///
    /// An unknown name is reported by [build](JsonListTypeBuilder::build).
    pub fn platform_name(mut self, name: &str) -> Self {
        if self.error.is_none() {
            match name.parse::<DbPlatform>() {
                Ok(platform) => self.platform = platform,
                Err(e) => self.error = Some(e),
            }
        }
        self
    }

    /// Sets the declared column type.
    pub fn db_type(mut self, db_type: DbType) -> Self {
        self.db_type = db_type;
        self
    }

    pub fn doc_type(mut self, doc_type: DocPropertyType) -> Self {
        self.doc_type = doc_type;
        self
    }

    /// Sets whether the column accepts NULL. Non-nullable columns store `"[]"`
    /// for an absent list.
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Returns the configured column type, or the first configuration error.
    pub fn build(self) -> JsonListResult<JsonListType> {
        if let Some(error) = self.error {
            return Err(error);
        }
        Ok(JsonListType::type_for(
            self.platform.is_postgres_compatible(),
            self.db_type,
            self.doc_type,
            self.nullable,
        ))
    }
}
