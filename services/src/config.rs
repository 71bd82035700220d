use lazy_static::lazy_static;

lazy_static! {
    static ref CONFIG: Config = Config;
}

/// Returns the global configuration instance.
///
pub fn config() -> &'static Config {
    &CONFIG
}

/// Environment-backed configuration.
///
/// All settings of the worker come from environment variables; this is a thin
/// lookup layer with defaulting.
///
#[derive(Debug, Clone, Default)]
pub struct Config;

impl Config {
    /// Look up a configuration value by key.
    ///
    pub fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    /// Look up a configuration value by key, falling back to a default.
    ///
    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key() {
        assert_eq!(config().get("SSDEEP_WORKER_TEST_UNSET_KEY"), None);
    }

    #[test]
    fn test_get_or_default() {
        let value = config().get_or("SSDEEP_WORKER_TEST_UNSET_KEY", "fallback");
        assert_eq!(value, "fallback");
    }

    #[test]
    fn test_get_set_key() {
        std::env::set_var("SSDEEP_WORKER_TEST_SET_KEY", "value");
        assert_eq!(config().get("SSDEEP_WORKER_TEST_SET_KEY"), Some("value".to_string()));
        std::env::remove_var("SSDEEP_WORKER_TEST_SET_KEY");
    }
}
