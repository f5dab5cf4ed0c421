//! Environment variable port

use std::collections::HashMap;

/// Read access to configuration values keyed by environment variable name.
pub trait EnvSource: Send + Sync {
    /// Returns the raw value of `key`, if set.
    fn get(&self, key: &str) -> Option<String>;

    /// Returns the value of `key` when it is set and not blank.
    fn non_empty(&self, key: &str) -> Option<String> {
        self.get(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}
