// Environment variable loading

use crate::loader::{insert_path, key_path, scalar};
use serde_json::{Map, Value};
use std::env;

/// Prefix recognised when none is configured
pub const DEFAULT_ENV_PREFIX: &str = "SCHEMADECLARE";

/// Environment variable loader
///
/// `SCHEMADECLARE_GRAPHQL__MAX_DEPTH=4` becomes `{"graphql": {"max_depth": 4}}`.
pub struct EnvLoader {
    prefix: String,
}

impl EnvLoader {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Load the prefixed variables of the process environment
    pub fn load(&self) -> Value {
        self.load_from(env::vars())
    }

    /// Load from explicit pairs; variables without the prefix are skipped
    pub fn load_from<I, K, V>(&self, vars: I) -> Value
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut root = Value::Object(Map::new());

        for (key, value) in vars {
            let Some(rest) = self.strip(key.as_ref()) else {
                continue;
            };
            let path = key_path(rest);
            if !path.is_empty() {
                insert_path(&mut root, &path, scalar(value.as_ref()));
            }
        }

        root
    }

    fn strip<'a>(&self, key: &'a str) -> Option<&'a str> {
        key.strip_prefix(self.prefix.as_str())?.strip_prefix('_')
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(DEFAULT_ENV_PREFIX)
    }
}
