//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use cart_data::{HttpCatalog, LocalCatalog};
use cart_engine::{CartDeps, CartEngine};
use cart_store::{store_key, FileStore, SnapshotStore};

use crate::config::CliConfig;
use crate::output::{ConsoleSink, Output};

/// File names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["cart.toml", ".cart.toml", "cart.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Cart profile; each profile gets its own snapshot key.
    pub profile: Option<String>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, profile: Option<String>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            match Self::find_config(&cwd) {
                Some((path, config)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        // Relative paths in a config file are relative to the file itself
        let cwd = config_path
            .as_deref()
            .and_then(Path::parent)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| cwd.join(dir))
            .unwrap_or(cwd);

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            profile,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(PathBuf, CliConfig)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config_path, config));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Key of the cart snapshot, including the profile suffix.
    pub fn cart_key(&self) -> String {
        match &self.profile {
            Some(profile) => store_key!(&self.config.store.key, profile),
            None => self.config.store.key.clone(),
        }
    }

    /// Open the snapshot store.
    pub fn open_store(&self) -> Result<FileStore> {
        let dir = self.resolve_path(&self.config.store.dir);
        FileStore::open(&dir)
            .with_context(|| format!("Failed to open cart store at {}", dir.display()))
    }

    /// Build a cart engine over the configured catalog and store.
    pub fn engine(&self) -> Result<CartEngine> {
        let store: Arc<dyn SnapshotStore> = Arc::new(self.open_store()?);
        let sink = Arc::new(ConsoleSink::new(self.output));
        let catalog = &self.config.catalog;

        let deps = match (&catalog.base_url, &catalog.db_file) {
            (Some(url), _) => {
                let http = HttpCatalog::new(url, catalog.timeout())
                    .with_context(|| format!("Invalid catalog.base_url: {}", url))?;
                self.output.debug(&format!(
                    "Using HTTP catalog at {} (timeout {:?})",
                    http.base_url(),
                    http.timeout().total
                ));
                CartDeps::from_catalog(Arc::new(http), store, sink)
            }
            (None, Some(file)) => {
                let path = self.resolve_path(file);
                self.output.debug(&format!("Using local catalog {}", path.display()));
                let local = LocalCatalog::load(&path)
                    .with_context(|| format!("Failed to load catalog database {}", path.display()))?;
                CartDeps::from_catalog(Arc::new(local), store, sink)
            }
            (None, None) => bail!(
                "No catalog configured. Set catalog.base_url or catalog.db_file, or run `cart config init`."
            ),
        };

        Ok(CartEngine::load(deps, self.cart_key()).with_messages(self.config.messages.clone()))
    }
}
