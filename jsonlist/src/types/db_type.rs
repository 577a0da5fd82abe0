use crate::errors::{ErrorKind, JsonListError, JsonListResult};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Declared database type of a mapped column.
///
/// Also used as the SQL type tag when binding a typed NULL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DbType {
    Varchar,
    Clob,
    Json,
    Jsonb,
}

impl DbType {
    pub fn name(&self) -> &'static str {
        match self {
            DbType::Varchar => "varchar",
            DbType::Clob => "clob",
            DbType::Json => "json",
            DbType::Jsonb => "jsonb",
        }
    }
}

impl Display for DbType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The database platform a column type is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DbPlatform {
    #[default]
    Generic,
    H2,
    MySql,
    Oracle,
    SqlServer,
    Postgres,
    Cockroach,
}

impl DbPlatform {
    /// Returns `true` for platforms with native `json` and `jsonb` column types
    /// bound through Postgres-style typed objects.
    pub fn is_postgres_compatible(&self) -> bool {
        matches!(self, DbPlatform::Postgres | DbPlatform::Cockroach)
    }

    pub fn name(&self) -> &'static str {
        match self {
            DbPlatform::Generic => "generic",
            DbPlatform::H2 => "h2",
            DbPlatform::MySql => "mysql",
            DbPlatform::Oracle => "oracle",
            DbPlatform::SqlServer => "sqlserver",
            DbPlatform::Postgres => "postgres",
            DbPlatform::Cockroach => "cockroach",
        }
    }
}

impl Display for DbPlatform {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DbPlatform {
    type Err = JsonListError;

    fn from_str(name: &str) -> JsonListResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "generic" => Ok(DbPlatform::Generic),
            "h2" => Ok(DbPlatform::H2),
            "mysql" | "mariadb" => Ok(DbPlatform::MySql),
            "oracle" => Ok(DbPlatform::Oracle),
            "sqlserver" | "mssql" => Ok(DbPlatform::SqlServer),
            "postgres" | "postgresql" => Ok(DbPlatform::Postgres),
            "cockroach" | "cockroachdb" => Ok(DbPlatform::Cockroach),
            _ => {
                log::error!("Unknown database platform {}", name);
                Err(JsonListError::new(
                    &format!("Unknown database platform [{}]", name),
                    ErrorKind::InvalidDataType,
                ))
            }
        }
    }
}
