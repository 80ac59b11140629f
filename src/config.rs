use std::time::Duration;

/// Engine configuration, read once from the environment
#[derive(Debug, Clone)]
pub struct Config {
    /// Statement timeout applied to metadata and DDL catalog queries
    pub statement_timeout: Duration,
    /// Page size used when a caller does not supply one
    pub default_page_size: u64,
    /// Upper bound on caller-supplied page sizes
    pub max_page_size: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            statement_timeout: Duration::from_secs(30),
            default_page_size: 20,
            max_page_size: 1000,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("CATASCOPE_STATEMENT_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse::<u64>() {
                config.statement_timeout = Duration::from_secs(secs);
            }
        }

        if let Ok(val) = std::env::var("CATASCOPE_DEFAULT_PAGE_SIZE") {
            if let Ok(size) = val.parse::<u64>() {
                if size > 0 {
                    config.default_page_size = size;
                }
            }
        }

        if let Ok(val) = std::env::var("CATASCOPE_MAX_PAGE_SIZE") {
            if let Ok(size) = val.parse::<u64>() {
                if size > 0 {
                    config.max_page_size = size;
                }
            }
        }

        config
    }
}
