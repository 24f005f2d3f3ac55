//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use storefront_cache::FileStore;
use storefront_core::cart::CartStore;
use storefront_core::catalog::{CatalogStore, FetchStatus, HttpCatalog};
use storefront_data::{FetchClient, FetchPolicy};

use crate::config::{StorefrontConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: StorefrontConfig,
    /// Where the configuration was read from, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = resolve_path(&cwd, path);
                (StorefrontConfig::load(&path)?, Some(path))
            }
            None => match find_config(&cwd)? {
                Some(path) => (StorefrontConfig::load(&path)?, Some(path)),
                None => (StorefrontConfig::default(), None),
            },
        };

        if let Some(ref path) = config_path {
            output.debug(&format!("Using config: {}", path.display()));
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Directory the cart is persisted in.
    pub fn storage_dir(&self) -> Result<PathBuf> {
        match self.config.cart.storage_dir {
            Some(ref dir) => Ok(resolve_path(&self.cwd, dir)),
            None => default_storage_dir(),
        }
    }

    /// Open the persisted cart.
    pub fn open_cart(&self) -> Result<CartStore<FileStore>> {
        let dir = self.storage_dir()?;
        let store = FileStore::open(&dir)
            .with_context(|| format!("Failed to open cart storage: {}", dir.display()))?;

        let mut cart = CartStore::with_key(store, self.config.cart.storage_key.clone());
        cart.load_persisted();
        Ok(cart)
    }

    /// Catalog provider built from the `[catalog]` section.
    pub fn catalog_source(&self) -> Result<HttpCatalog> {
        let policy = FetchPolicy::new(self.config.catalog.timeout());
        let client = FetchClient::with_policy(policy).context("Failed to build HTTP client")?;
        Ok(HttpCatalog::new(client, self.config.catalog.endpoint.clone()))
    }

    /// Fetch the catalog once, with a spinner while the request runs.
    ///
    /// A failed fetch is returned as an error carrying the store's message.
    pub async fn fetch_catalog(&self, search_term: Option<&str>) -> Result<CatalogStore> {
        let source = self.catalog_source()?;
        let mut catalog = CatalogStore::new();
        if let Some(term) = search_term {
            catalog.set_search_term(term);
        }

        if catalog.needs_fetch() {
            tracing::debug!(endpoint = source.endpoint(), "fetching products");
            let spinner = self.output.spinner("Loading products...");
            catalog.fetch_catalog(&source).await;
            spinner.finish_and_clear();
        }

        if catalog.status() == FetchStatus::Failed {
            bail!("{}", catalog.error().unwrap_or_default());
        }
        Ok(catalog)
    }
}

/// Find the nearest config file, walking up from `start`.
fn find_config(start: &Path) -> Result<Option<PathBuf>> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_FILE_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Ok(Some(candidate));
            }
        }

        if !current.pop() {
            return Ok(None);
        }
    }
}

/// Resolve a path relative to the working directory.
fn resolve_path(cwd: &Path, path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Platform-specific data directory for the cart.
fn default_storage_dir() -> Result<PathBuf> {
    match std::env::var_os("HOME") {
        Some(home) => Ok(PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("storefront")),
        None => bail!("HOME is not set; configure cart.storage_dir"),
    }
}
