//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use cart_cache::FileStore;
use cart_store::notify::RecordingNotifier;
use cart_store::service::{HttpStockService, MemoryStockService, StockDocument, StockService};
use cart_store::{CartConfig, CartStore};

use crate::config;
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Cart configuration.
    pub config: CartConfig,
    /// File the configuration was read from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// json-server database used instead of the API.
    pub offline: Option<PathBuf>,
}

/// A store opened for one command, with the notices it raised.
pub struct Session {
    pub store: CartStore,
    pub notices: Arc<RecordingNotifier>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, offline: Option<String>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(resolve(&cwd, path)),
            None => config::find(&cwd),
        };
        let config = match &config_path {
            Some(path) => {
                output.debug(&format!("Using config {}", path.display()));
                config::load(path)?
            }
            None => CartConfig::default(),
        };

        Ok(Self {
            config,
            config_path,
            output,
            offline: offline.map(|p| resolve(&cwd, &p)),
            cwd,
        })
    }

    /// Directory holding the snapshot slot.
    pub fn storage_dir(&self) -> PathBuf {
        // `join` keeps absolute paths as they are.
        self.cwd.join(&self.config.storage.dir)
    }

    /// Open the cart store against the configured storage and stock service.
    pub fn open_store(&self) -> Result<Session> {
        let storage_dir = self.storage_dir();
        let storage = FileStore::open(&storage_dir)
            .with_context(|| format!("Failed to open cart storage: {}", storage_dir.display()))?;

        let stock = self.stock_service()?;
        let notices = Arc::new(RecordingNotifier::new());
        let store = CartStore::open(&self.config, Arc::new(storage), stock, notices.clone());

        Ok(Session { store, notices })
    }

    fn stock_service(&self) -> Result<Arc<dyn StockService>> {
        if let Some(path) = &self.offline {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read stock database: {}", path.display()))?;
            let document = StockDocument::from_json(&content)
                .with_context(|| format!("Failed to parse stock database: {}", path.display()))?;
            self.output
                .debug(&format!("Serving stock offline from {}", path.display()));
            return Ok(Arc::new(MemoryStockService::from_document(document)));
        }

        let service = HttpStockService::from_config(&self.config.api)
            .context("Failed to build stock API client")?;
        self.output
            .debug(&format!("Using stock API at {}", self.config.api.base_url));
        Ok(Arc::new(service))
    }
}

/// Resolve a path relative to the working directory.
fn resolve(cwd: &Path, path: &str) -> PathBuf {
    if Path::new(path).is_absolute() {
        PathBuf::from(path)
    } else {
        cwd.join(path)
    }
}
