use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use recall_core::{FactStore, Result};

/// Process-local fact store. Clones share the underlying map.
pub struct InMemoryFactStore {
    facts: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryFactStore {
    pub fn new() -> Self {
        Self {
            facts: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryFactStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryFactStore {
    fn clone(&self) -> Self {
        Self {
            facts: Arc::clone(&self.facts),
        }
    }
}

#[async_trait]
impl FactStore for InMemoryFactStore {
    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.facts.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.facts.read().get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.facts.write().remove(key);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        Ok(self.facts.read().keys().cloned().collect())
    }
}
