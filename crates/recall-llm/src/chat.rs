//! Memory-injecting chat adapter

use std::sync::Arc;

use recall_core::{
    CompletionConfig, CompletionModel, KEY_SYSTEM, KEY_USER, MemoryEntry, MemoryStore, Result,
};

const DEFAULT_CONTEXT_WINDOW: usize = 10;

/// Wraps a completion model with memory pre- and post-processing.
///
/// `send` persists incoming user/system turns into the store, retrieves
/// recent context, composes context followed by the new turns, calls the
/// model, and writes the assistant reply back. Any propagated error is
/// terminal for that turn; callers may retry the whole turn.
pub struct ChatAdapter {
    store: Arc<dyn MemoryStore>,
    model: Arc<dyn CompletionModel>,
    config: Option<CompletionConfig>,
    context_window: usize,
}

impl ChatAdapter {
    pub fn new(store: Arc<dyn MemoryStore>, model: Arc<dyn CompletionModel>) -> Self {
        Self {
            store,
            model,
            config: None,
            context_window: DEFAULT_CONTEXT_WINDOW,
        }
    }

    pub fn with_config(mut self, config: CompletionConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// How many context entries to pull from memory per call.
    pub fn with_context_window(mut self, top_k: usize) -> Self {
        self.context_window = top_k;
        self
    }

    /// Sends `turns` to the model with memory context injected, returning
    /// the assistant reply.
    pub async fn send(&self, turns: &[MemoryEntry]) -> Result<String> {
        for turn in turns {
            if turn.key == KEY_USER || turn.key == KEY_SYSTEM {
                self.store.add(turn.clone()).await?;
            }
        }

        let mut payload = self.store.query("", self.context_window).await?;
        payload.extend(turns.iter().cloned());

        tracing::debug!(
            context = payload.len() - turns.len(),
            turns = turns.len(),
            "composing completion request"
        );

        let response = self.model.complete(&payload, self.config.as_ref()).await?;
        let reply = response.content;

        self.store.add(MemoryEntry::assistant(&reply)).await?;
        Ok(reply)
    }
}
