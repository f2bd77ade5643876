//! Summarizer trait and implementations for threshold-triggered compaction

use std::sync::Arc;

use async_trait::async_trait;

use recall_core::{CompletionConfig, CompletionModel, MemoryEntry, MemoryError, Result};

/// Condenses a batch of entries into one string.
///
/// The seam between the summarizing store and the external completion
/// service: implementations are injected at construction so tests can
/// substitute fakes.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, entries: &[MemoryEntry]) -> Result<String>;
}

pub const DEFAULT_SUMMARY_PROMPT: &str = r#"You are a summarizer. Condense the following conversation into one concise statement:

{conversation}"#;

/// Summarizer backed by a completion model.
pub struct LlmSummarizer {
    model: Arc<dyn CompletionModel>,
    prompt_template: String,
    config: Option<CompletionConfig>,
}

impl LlmSummarizer {
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self {
            model,
            prompt_template: DEFAULT_SUMMARY_PROMPT.to_string(),
            config: None,
        }
    }

    /// Replaces the prompt template. `{conversation}` is substituted with the
    /// rendered transcript.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt_template = prompt.into();
        self
    }

    pub fn with_config(mut self, config: CompletionConfig) -> Self {
        self.config = Some(config);
        self
    }

    fn render_transcript(entries: &[MemoryEntry]) -> String {
        entries
            .iter()
            .map(|e| format!("{}: {}", e.key, e.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl Summarizer for LlmSummarizer {
    async fn summarize(&self, entries: &[MemoryEntry]) -> Result<String> {
        if entries.is_empty() {
            return Ok(String::new());
        }

        let conversation = Self::render_transcript(entries);
        let prompt = self.prompt_template.replace("{conversation}", &conversation);

        let response = self
            .model
            .complete(&[MemoryEntry::user(prompt)], self.config.as_ref())
            .await
            .map_err(|e| MemoryError::Summarization(e.to_string()))?;

        Ok(response.content.trim().to_string())
    }
}

/// Joins entry contents without calling any external service. Test support
/// and a sensible offline fallback.
pub struct NoopSummarizer;

#[async_trait]
impl Summarizer for NoopSummarizer {
    async fn summarize(&self, entries: &[MemoryEntry]) -> Result<String> {
        Ok(entries
            .iter()
            .map(|e| e.content.clone())
            .collect::<Vec<_>>()
            .join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use recall_core::{CompletionConfig, CompletionError, CompletionResponse};

    struct ScriptedModel {
        responses: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        fn new(responses: Vec<String>) -> Self {
            Self {
                responses: Mutex::new(responses),
            }
        }
    }

    #[async_trait]
    impl CompletionModel for ScriptedModel {
        async fn complete(
            &self,
            _messages: &[MemoryEntry],
            _config: Option<&CompletionConfig>,
        ) -> std::result::Result<CompletionResponse, CompletionError> {
            let content = self
                .responses
                .lock()
                .pop()
                .unwrap_or_else(|| "Condensed summary.".to_string());
            Ok(CompletionResponse::new(content))
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    struct BrokenModel;

    #[async_trait]
    impl CompletionModel for BrokenModel {
        async fn complete(
            &self,
            _messages: &[MemoryEntry],
            _config: Option<&CompletionConfig>,
        ) -> std::result::Result<CompletionResponse, CompletionError> {
            Err(CompletionError::RateLimit)
        }

        fn model_name(&self) -> &str {
            "broken"
        }
    }

    #[tokio::test]
    async fn test_llm_summarizer_basic() {
        let model = Arc::new(ScriptedModel::new(vec!["A short summary".to_string()]));
        let summarizer = LlmSummarizer::new(model);

        let entries = vec![MemoryEntry::user("Hello"), MemoryEntry::assistant("Hi!")];
        let summary = summarizer.summarize(&entries).await.unwrap();
        assert_eq!(summary, "A short summary");
    }

    #[tokio::test]
    async fn test_llm_summarizer_empty_entries() {
        let model = Arc::new(ScriptedModel::new(vec![]));
        let summarizer = LlmSummarizer::new(model);

        let summary = summarizer.summarize(&[]).await.unwrap();
        assert!(summary.is_empty());
    }

    #[tokio::test]
    async fn test_llm_summarizer_failure_maps_to_summarization_error() {
        let summarizer = LlmSummarizer::new(Arc::new(BrokenModel));

        let err = summarizer
            .summarize(&[MemoryEntry::user("Hello")])
            .await
            .unwrap_err();
        assert!(matches!(err, MemoryError::Summarization(_)));
    }

    #[test]
    fn test_render_transcript() {
        let entries = vec![MemoryEntry::user("u1"), MemoryEntry::assistant("a1")];
        assert_eq!(
            LlmSummarizer::render_transcript(&entries),
            "user: u1\nassistant: a1"
        );
    }

    #[tokio::test]
    async fn test_noop_summarizer() {
        let entries = vec![MemoryEntry::user("Hello"), MemoryEntry::assistant("Hi")];
        let summary = NoopSummarizer.summarize(&entries).await.unwrap();
        assert!(summary.contains("Hello"));
        assert!(summary.contains("Hi"));
    }
}
