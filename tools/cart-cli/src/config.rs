//! CLI configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use cart_data::TimeoutConfig;
use cart_engine::Messages;
use cart_store::DEFAULT_CART_KEY;
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where stock and product records come from.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Where the cart snapshot is kept.
    #[serde(default)]
    pub store: StoreConfig,

    /// Notification text overrides.
    #[serde(default)]
    pub messages: Messages,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Check the config for problems.
    ///
    /// Returns `(errors, warnings)`.
    pub fn problems(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        match (&self.catalog.base_url, &self.catalog.db_file) {
            (None, None) => {
                errors.push("catalog.base_url or catalog.db_file is required".to_string())
            }
            (Some(_), Some(_)) => {
                warnings.push("catalog.db_file is ignored when catalog.base_url is set".to_string())
            }
            _ => {}
        }

        if let Some(url) = &self.catalog.base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                errors.push(format!("catalog.base_url '{}' must be an http(s) URL", url));
            }
        }

        if self.catalog.timeout_ms == 0 {
            errors.push("catalog.timeout_ms must be greater than 0".to_string());
        }

        if self.store.dir.trim().is_empty() {
            errors.push("store.dir must not be empty".to_string());
        }

        if self.store.key.is_empty() {
            errors.push("store.key must not be empty".to_string());
        } else if self.store.key != DEFAULT_CART_KEY {
            warnings.push(format!(
                "store.key '{}' differs from the default '{}'; carts saved under the default key will not be read",
                self.store.key, DEFAULT_CART_KEY
            ));
        }

        (errors, warnings)
    }
}

/// Catalog backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of an HTTP catalog serving `/stock/{id}` and `/products/{id}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Local `db.json` with `products` and `stock` arrays.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_file: Option<String>,

    /// Total request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    5_000
}

impl CatalogConfig {
    /// Timeouts for the HTTP catalog.
    pub fn timeout(&self) -> TimeoutConfig {
        TimeoutConfig::from_total(Duration::from_millis(self.timeout_ms))
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            db_file: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Snapshot store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding snapshot files, relative to the working directory.
    #[serde(default = "default_store_dir")]
    pub dir: String,

    /// Key of the cart snapshot.
    #[serde(default = "default_store_key")]
    pub key: String,
}

fn default_store_dir() -> String {
    ".cart".to_string()
}

fn default_store_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: default_store_dir(),
            key: default_store_key(),
        }
    }
}

/// Generate a default cart.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Cart configuration

[catalog]
# HTTP catalog serving /stock/{{id}} and /products/{{id}}
base_url = "http://localhost:3333"
# Or a local json-server style database
# db_file = "db.json"
timeout_ms = 5000

[store]
dir = ".cart"
key = "{key}"

[messages]
# out_of_stock = "Requested quantity is out of stock"
# add_failed = "Failed to add product"
# remove_failed = "Failed to remove product"
# update_failed = "Failed to update product amount"
"#,
        key = DEFAULT_CART_KEY
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_file() {
        let config: CliConfig = toml::from_str("").unwrap();

        assert_eq!(config.catalog.timeout_ms, 5_000);
        assert_eq!(config.store.dir, ".cart");
        assert_eq!(config.store.key, DEFAULT_CART_KEY);
        assert_eq!(config.messages, Messages::default());
    }

    #[test]
    fn test_generated_config_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();

        assert_eq!(config.catalog.base_url.as_deref(), Some("http://localhost:3333"));
        assert!(config.catalog.db_file.is_none());
        let (errors, warnings) = config.problems();
        assert!(errors.is_empty(), "{:?}", errors);
        assert!(warnings.is_empty(), "{:?}", warnings);
    }

    #[test]
    fn test_partial_messages() {
        let config: CliConfig = toml::from_str(
            r#"
            [catalog]
            db_file = "db.json"

            [messages]
            out_of_stock = "Quantidade solicitada fora de estoque"
            "#,
        )
        .unwrap();

        assert_eq!(config.messages.out_of_stock, "Quantidade solicitada fora de estoque");
        assert_eq!(config.messages.add_failed, Messages::default().add_failed);
    }

    #[test]
    fn test_timeout_conversion() {
        let catalog = CatalogConfig {
            timeout_ms: 2_000,
            ..CatalogConfig::default()
        };
        assert_eq!(catalog.timeout().total, Duration::from_secs(2));
    }

    #[test]
    fn test_problems() {
        let mut config = CliConfig::default();
        let (errors, _) = config.problems();
        assert_eq!(errors.len(), 1);

        config.catalog.base_url = Some("localhost:3333".to_string());
        config.catalog.db_file = Some("db.json".to_string());
        config.catalog.timeout_ms = 0;
        let (errors, warnings) = config.problems();
        assert_eq!(errors.len(), 2);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        std::fs::write(&path, r#"{"catalog": {"db_file": "db.json"}}"#).unwrap();
        let path = path.to_str().unwrap();

        let loaded = CliConfig::load(path).unwrap();
        assert_eq!(loaded.catalog.db_file.as_deref(), Some("db.json"));
        assert_eq!(loaded.store.key, DEFAULT_CART_KEY);
    }
}
