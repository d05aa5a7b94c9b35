use clap::Parser;
use fanout_core::config::{DEFAULT_API_URL, DEFAULT_CSV_FILES, DEFAULT_QUERY};
use fanout_core::{Error, FetchConfig, Result};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fanout")]
#[command(about = "Load CSV files, an HTTP endpoint and a database concurrently", long_about = None)]
#[command(version)]
pub struct Cli {
    /// CSV file to load (repeat for several files)
    #[arg(long = "file", value_name = "PATH", default_values = DEFAULT_CSV_FILES)]
    pub files: Vec<PathBuf>,

    /// Endpoint returning a JSON array of records
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Query run against the database
    #[arg(long, default_value = DEFAULT_QUERY)]
    pub query: String,

    /// Rows shown per CSV table
    #[arg(long, default_value_t = 5)]
    pub preview_rows: usize,
}

impl Cli {
    pub fn fetch_config(&self) -> Result<FetchConfig> {
        let database_url = self
            .database_url
            .clone()
            .ok_or_else(|| Error::Config("DATABASE_URL must be set".to_string()))?;

        Ok(FetchConfig::new(database_url)
            .with_files(self.files.iter().cloned())
            .with_api_url(self.api_url.clone())
            .with_query(self.query.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_builtin_sources() {
        let cli = Cli::try_parse_from(["fanout", "--database-url", "postgres://localhost/app"])
            .unwrap();
        let config = cli.fetch_config().unwrap();

        assert_eq!(config, FetchConfig::new("postgres://localhost/app"));
        assert_eq!(cli.preview_rows, 5);
    }

    #[test]
    fn test_repeated_file_flags() {
        let cli = Cli::try_parse_from([
            "fanout",
            "--database-url",
            "postgres://localhost/app",
            "--file",
            "a.csv",
            "--file",
            "b.csv",
            "--query",
            "SELECT id FROM orders",
        ])
        .unwrap();
        let config = cli.fetch_config().unwrap();

        assert_eq!(config.files, vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")]);
        assert_eq!(config.query, "SELECT id FROM orders");
    }

    #[test]
    fn test_missing_database_url_is_a_config_error() {
        let mut cli = Cli::try_parse_from(["fanout", "--database-url", "unused"]).unwrap();
        cli.database_url = None;

        let err = cli.fetch_config().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
