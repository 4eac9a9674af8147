use crate::*;
use confique::Config as _;
use std::sync::OnceLock;

#[derive(Debug, Clone, confique::Config)]
pub struct Config {
    /// Table holding one row per page.
    #[config(env = "PAGESQL_TABLE", default = "pages")]
    pub table: String,
    /// Column of `table` holding the page's JSON document.
    #[config(env = "PAGESQL_SOURCE_COLUMN", default = "analytics")]
    pub source_column: String,
    /// JSON path under which logical columns live.
    #[config(env = "PAGESQL_PATH_PREFIX", default = "$.metadata")]
    pub path_prefix: String,
    #[config(env = "PAGESQL_CACHE_CAPACITY", default = 256)]
    pub cache_capacity: u64,
    #[config(env = "PAGESQL_DATABASE_URL")]
    pub database_url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Self::builder().env().load()?)
    }
}

/// Process-wide configuration, read from the environment on first use.
pub fn config() -> &'static Config {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    CONFIG.get_or_init(|| {
        Config::load()
            .expect("Failed to load one or more value configuration from the current environment")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_the_pages_table() {
        let config = Config::builder()
            .load()
            .expect("defaults should satisfy every field");
        assert_eq!(config.table, "pages");
        assert_eq!(config.source_column, "analytics");
        assert_eq!(config.path_prefix, "$.metadata");
        assert_eq!(config.cache_capacity, 256);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn config_is_loaded_once() {
        let first = config();
        assert!(std::ptr::eq(first, config()));
        assert!(first.cache_capacity > 0);
    }
}
