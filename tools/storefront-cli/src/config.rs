//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use storefront_core::catalog::DEFAULT_CATALOG_ENDPOINT;
use storefront_core::cart::CART_STORAGE_KEY;
use storefront_core::Currency;
use storefront_data::TimeoutConfig;

/// File names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Catalog provider.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Cart persistence.
    #[serde(default)]
    pub cart: CartConfig,

    /// Display preferences.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl StorefrontConfig {
    /// Load config from a file. `.json` files are JSON, anything else TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Problems that make the config unusable, then ones worth a warning.
    pub fn validate(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let endpoint = self.catalog.endpoint.trim();
        if endpoint.is_empty() {
            errors.push("catalog.endpoint is required".to_string());
        } else if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            errors.push(format!("catalog.endpoint '{}' must be an http(s) URL", endpoint));
        } else if endpoint.starts_with("http://") {
            warnings.push("catalog.endpoint is not using https".to_string());
        }

        if self.catalog.timeout_ms == 0 {
            errors.push("catalog.timeout_ms must be greater than 0".to_string());
        }
        if self.catalog.connect_timeout_ms > self.catalog.timeout_ms {
            warnings.push(
                "catalog.connect_timeout_ms exceeds catalog.timeout_ms and has no effect"
                    .to_string(),
            );
        }

        if self.cart.storage_key.is_empty() {
            errors.push("cart.storage_key is required".to_string());
        }

        (errors, warnings)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |e| e == "json")
}

/// Catalog provider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Products endpoint returning a JSON array of products.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Whole-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl CatalogConfig {
    pub fn timeout(&self) -> TimeoutConfig {
        TimeoutConfig::from_millis(self.connect_timeout_ms, self.timeout_ms)
    }
}

fn default_endpoint() -> String {
    DEFAULT_CATALOG_ENDPOINT.to_string()
}

fn default_connect_timeout_ms() -> u64 {
    3_000
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            connect_timeout_ms: default_connect_timeout_ms(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Cart persistence configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Directory holding the persisted cart. Defaults to the user data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,

    /// Key the cart is stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_storage_key() -> String {
    CART_STORAGE_KEY.to_string()
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_dir: None,
            storage_key: default_storage_key(),
        }
    }
}

/// Display configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Currency prices are shown in, as an ISO code (case-insensitive).
    #[serde(default, deserialize_with = "deserialize_currency")]
    pub currency: Currency,
}

fn deserialize_currency<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Currency, D::Error> {
    let code = String::deserialize(deserializer)?;
    Currency::from_code(&code).ok_or_else(|| {
        de::Error::custom(format!(
            "unknown currency '{}', expected one of TRY, USD, EUR, GBP",
            code
        ))
    })
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Storefront configuration

[catalog]
endpoint = "{endpoint}"
connect_timeout_ms = {connect}
timeout_ms = {total}

[cart]
# storage_dir = "/path/to/cart"
storage_key = "{key}"

[display]
currency = "TRY"
"#,
        endpoint = DEFAULT_CATALOG_ENDPOINT,
        connect = default_connect_timeout_ms(),
        total = default_timeout_ms(),
        key = CART_STORAGE_KEY,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: StorefrontConfig = toml::from_str("").unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.catalog.endpoint, DEFAULT_CATALOG_ENDPOINT);
        assert_eq!(config.cart.storage_key, "cart");
        assert_eq!(config.display.currency, Currency::TRY);
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: StorefrontConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, StorefrontConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config: StorefrontConfig = toml::from_str(
            r#"
            [catalog]
            timeout_ms = 500

            [display]
            currency = "USD"
            "#,
        )
        .unwrap();

        assert_eq!(config.catalog.endpoint, DEFAULT_CATALOG_ENDPOINT);
        assert_eq!(config.catalog.timeout().total.as_millis(), 500);
        assert_eq!(config.display.currency, Currency::USD);
    }

    #[test]
    fn test_currency_code_is_case_insensitive() {
        let config: StorefrontConfig = toml::from_str("[display]\ncurrency = \"gbp\"\n").unwrap();
        assert_eq!(config.display.currency, Currency::GBP);

        let err = toml::from_str::<StorefrontConfig>("[display]\ncurrency = \"XYZ\"\n").unwrap_err();
        assert!(err.to_string().contains("unknown currency 'XYZ'"));
    }

    #[test]
    fn test_save_and_load_json_and_toml() {
        let dir = tempdir().unwrap();
        let mut config = StorefrontConfig::default();
        config.cart.storage_dir = Some(dir.path().join("cart"));
        config.display.currency = Currency::EUR;

        for name in ["storefront.toml", "storefront.json"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            assert_eq!(StorefrontConfig::load(&path).unwrap(), config);
        }
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(&path, "[catalog]\ntimeout_ms = \"soon\"\n").unwrap();

        let err = StorefrontConfig::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse TOML config"));
    }

    #[test]
    fn test_validate() {
        let (errors, warnings) = StorefrontConfig::default().validate();
        assert!(errors.is_empty());
        assert!(warnings.is_empty());

        let mut config = StorefrontConfig::default();
        config.catalog.endpoint = "ftp://example.com".to_string();
        config.catalog.timeout_ms = 0;
        config.cart.storage_key = String::new();
        let (errors, warnings) = config.validate();
        assert_eq!(errors.len(), 3);
        assert_eq!(warnings.len(), 1);
    }
}
