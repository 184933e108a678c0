//! Document store configuration

/// Environment variable holding the connection string
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Environment variable holding the database name
pub const DATABASE_NAME_ENV: &str = "DATABASE_NAME";

/// Where the document store lives.
///
/// Both values are required; if either is missing the service starts in
/// degraded mode with no store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreConfig {
    pub database_url: Option<String>,
    pub database_name: Option<String>,
}

impl StoreConfig {
    pub fn new(database_url: Option<String>, database_name: Option<String>) -> Self {
        Self {
            database_url,
            database_name,
        }
    }

    /// Connection string and database name, when both are set and non-empty
    pub fn target(&self) -> Option<(&str, &str)> {
        let url = self.database_url.as_deref().filter(|s| !s.is_empty())?;
        let name = self.database_name.as_deref().filter(|s| !s.is_empty())?;
        Some((url, name))
    }
}
