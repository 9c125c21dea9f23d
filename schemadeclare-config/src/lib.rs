// Configuration management for schemadeclare
//
// Sources are merged in the order they are loaded; later sources win key by
// key. Typical order: config file, .env file, process environment.

pub mod env;
pub mod error;
pub mod loader;

pub use env::{DEFAULT_ENV_PREFIX, EnvLoader};
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Main configuration manager
#[derive(Clone)]
pub struct ConfigManager {
    root: Arc<RwLock<Value>>,
    env: Arc<EnvLoader>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_ENV_PREFIX)
    }

    /// Create with a custom environment variable prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            root: Arc::new(RwLock::new(Value::Object(Map::new()))),
            env: Arc::new(EnvLoader::new(prefix)),
        }
    }

    /// Merge a parsed tree into the configuration
    pub fn merge_value(&self, value: Value) {
        loader::merge(&mut self.root.write(), value);
    }

    /// Load a file, detecting its format from the name
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let value = ConfigLoader::auto(path)?.load_file(path)?;
        self.merge_value(value);

        debug!(path = %path.display(), "Configuration file loaded");
        Ok(())
    }

    /// Load configuration from a string in the given format
    pub fn load_str(&self, content: &str, format: FileFormat) -> Result<()> {
        let value = ConfigLoader::new(format).parse(content)?;
        self.merge_value(value);
        Ok(())
    }

    /// Load prefixed variables from the process environment
    pub fn load_env(&self) {
        let value = self.env.load();
        self.merge_value(value);

        debug!(prefix = self.env.prefix(), "Environment configuration loaded");
    }

    /// Load a .env file into the process environment, then the environment
    ///
    /// Without a path, a missing `.env` in the working directory is not an
    /// error.
    pub fn load_dotenv(&self, path: Option<&Path>) -> Result<()> {
        match path {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
            }
            None => {
                dotenvy::dotenv().ok();
            }
        }
        self.load_env();
        Ok(())
    }

    /// Set a value at a dotted key such as `graphql.max_depth`
    pub fn set<T: serde::Serialize>(&self, key: &str, value: T) -> Result<()> {
        let value = serde_json::to_value(value).map_err(|e| {
            ConfigError::DeserializationError {
                key: key.to_string(),
                message: e.to_string(),
            }
        })?;
        loader::insert_path(&mut self.root.write(), &dotted(key), value);
        Ok(())
    }

    fn lookup(&self, key: &str) -> Option<Value> {
        let root = self.root.read();
        dotted(key)
            .iter()
            .try_fold(&*root, |node, segment| node.get(segment))
            .cloned()
    }

    /// Get a value at a dotted key
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self
            .lookup(key)
            .ok_or_else(|| ConfigError::KeyNotFound(key.to_string()))?;

        serde_json::from_value(value).map_err(|e| ConfigError::DeserializationError {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    /// Get a value, falling back when it is missing or malformed
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// Deserialize a whole section; a missing section yields `T::default()`
    pub fn section<T: DeserializeOwned + Default>(&self, name: &str) -> Result<T> {
        match self.get(name) {
            Err(ConfigError::KeyNotFound(_)) => Ok(T::default()),
            other => other,
        }
    }

    pub fn has(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Snapshot of the merged configuration
    pub fn to_value(&self) -> Value {
        self.root.read().clone()
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn dotted(key: &str) -> Vec<String> {
    key.split('.')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
