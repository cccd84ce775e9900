//! In-process session store and credential resolution.
//!
//! API keys are resolved from the process environment first, with a secondary
//! lookup in a per-process session store populated by the hosting runtime
//! (for example, keys entered through a UI session). The store is read-mostly
//! and shared across tools via `Arc`.

use std::collections::HashMap;
use std::sync::RwLock;

/// Thread-safe string map standing in for the hosting runtime's session state.
#[derive(Debug, Default)]
pub struct SessionStore {
    values: RwLock<HashMap<String, String>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
        }
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        let mut values = self.values.write().expect("session store lock poisoned");
        values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let values = self.values.read().expect("session store lock poisoned");
        values.get(key).cloned()
    }
}

/// Resolve a named credential: process environment first, session store second.
///
/// Empty environment values are treated as unset so a blank export does not
/// shadow a session-provided key.
pub fn resolve_credential(name: &str, session: &SessionStore) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .or_else(|| session.get(name))
}
