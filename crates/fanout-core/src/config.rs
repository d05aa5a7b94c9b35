use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_CSV_FILES: [&str; 2] = ["Salary_Data.csv", "cafe_sales.csv"];
pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com/users";
pub const DEFAULT_QUERY: &str = "SELECT * FROM users";

/// Resolved settings for one aggregation run.
#[derive(Clone, PartialEq, Eq)]
pub struct FetchConfig {
    pub files: Vec<PathBuf>,
    pub api_url: String,
    pub database_url: String,
    pub query: String,
}

impl FetchConfig {
    /// Default sources, reading from the given database
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            files: DEFAULT_CSV_FILES.iter().map(PathBuf::from).collect(),
            api_url: DEFAULT_API_URL.to_string(),
            database_url: database_url.into(),
            query: DEFAULT_QUERY.to_string(),
        }
    }

    pub fn with_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Number of fetch tasks this configuration produces
    pub fn task_count(&self) -> usize {
        self.files.len() + 2
    }
}

// Connection strings usually embed credentials.
impl fmt::Debug for FetchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchConfig")
            .field("files", &self.files)
            .field("api_url", &self.api_url)
            .field("database_url", &"<redacted>")
            .field("query", &self.query)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FetchConfig::new("postgres://localhost/app");
        assert_eq!(
            config.files,
            vec![PathBuf::from("Salary_Data.csv"), PathBuf::from("cafe_sales.csv")]
        );
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.query, "SELECT * FROM users");
        assert_eq!(config.task_count(), 4);
    }

    #[test]
    fn test_overrides() {
        let config = FetchConfig::new("postgres://localhost/app")
            .with_files(["one.csv"])
            .with_api_url("http://localhost:8080/items")
            .with_query("SELECT id FROM items");

        assert_eq!(config.files, vec![PathBuf::from("one.csv")]);
        assert_eq!(config.api_url, "http://localhost:8080/items");
        assert_eq!(config.query, "SELECT id FROM items");
        assert_eq!(config.task_count(), 3);
    }

    #[test]
    fn test_debug_redacts_database_url() {
        let config = FetchConfig::new("postgres://admin:hunter2@db/app");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }
}
