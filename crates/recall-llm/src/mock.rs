use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use recall_core::{
    CompletionConfig, CompletionError, CompletionModel, CompletionResponse, EmbeddingError,
    EmbeddingProvider, MemoryEntry,
};

/// Scripted completion model for tests.
#[derive(Clone)]
pub struct MockCompletionModel {
    inner: Arc<RwLock<MockInner>>,
}

struct MockInner {
    responses: Vec<String>,
    response_index: usize,
    cycle_responses: bool,
    call_history: Vec<Vec<MemoryEntry>>,
    should_error: bool,
    error_message: String,
}

impl MockCompletionModel {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MockInner {
                responses: Vec::new(),
                response_index: 0,
                cycle_responses: false,
                call_history: Vec::new(),
                should_error: false,
                error_message: "Mock error".to_string(),
            })),
        }
    }

    pub fn set_response(&self, response: impl Into<String>) {
        let mut inner = self.inner.write();
        inner.responses = vec![response.into()];
        inner.response_index = 0;
    }

    pub fn set_responses(&self, responses: Vec<String>, cycle: bool) {
        let mut inner = self.inner.write();
        inner.responses = responses;
        inner.response_index = 0;
        inner.cycle_responses = cycle;
    }

    pub fn set_error(&self, error_message: impl Into<String>) {
        let mut inner = self.inner.write();
        inner.should_error = true;
        inner.error_message = error_message.into();
    }

    pub fn clear_error(&self) {
        self.inner.write().should_error = false;
    }

    pub fn call_count(&self) -> usize {
        self.inner.read().call_history.len()
    }

    pub fn last_call(&self) -> Option<Vec<MemoryEntry>> {
        self.inner.read().call_history.last().cloned()
    }

    pub fn reset(&self) {
        let mut inner = self.inner.write();
        inner.responses.clear();
        inner.response_index = 0;
        inner.cycle_responses = false;
        inner.call_history.clear();
        inner.should_error = false;
        inner.error_message = "Mock error".to_string();
    }

    fn next_response(&self) -> String {
        let mut inner = self.inner.write();
        if inner.responses.is_empty() {
            return "Mock response".to_string();
        }

        let content = inner.responses[inner.response_index].clone();
        if inner.cycle_responses {
            inner.response_index = (inner.response_index + 1) % inner.responses.len();
        } else if inner.response_index < inner.responses.len() - 1 {
            inner.response_index += 1;
        }
        content
    }
}

impl Default for MockCompletionModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionModel for MockCompletionModel {
    async fn complete(
        &self,
        messages: &[MemoryEntry],
        _config: Option<&CompletionConfig>,
    ) -> Result<CompletionResponse, CompletionError> {
        self.inner.write().call_history.push(messages.to_vec());

        let inner = self.inner.read();
        if inner.should_error {
            return Err(CompletionError::Other(inner.error_message.clone()));
        }
        drop(inner);

        Ok(CompletionResponse::new(self.next_response()).with_model("mock-model"))
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

/// Deterministic local embedder for tests.
///
/// Tokens are hashed into buckets of a normalized bag-of-words vector, so
/// equal texts embed identically and overlapping texts land near each other.
/// No external service is involved.
pub struct MockEmbedder {
    dimension: usize,
    fail_with: RwLock<Option<String>>,
}

impl MockEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            fail_with: RwLock::new(None),
        }
    }

    /// Makes every subsequent `embed` call fail with `message`.
    pub fn set_error(&self, message: impl Into<String>) {
        *self.fail_with.write() = Some(message.into());
    }

    pub fn clear_error(&self) {
        *self.fail_with.write() = None;
    }

    fn bucket(&self, token: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        (hasher.finish() as usize) % self.dimension
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if let Some(message) = self.fail_with.read().clone() {
            return Err(EmbeddingError::Network(message));
        }

        let mut vector = vec![0.0f32; self.dimension];
        for token in text.split_whitespace() {
            let token = token.to_lowercase();
            vector[self.bucket(&token)] += 1.0;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_model_scripted_responses() {
        let mock = MockCompletionModel::new();
        mock.set_responses(vec!["First".to_string(), "Second".to_string()], false);

        let messages = vec![MemoryEntry::user("Hello")];
        assert_eq!(
            mock.complete(&messages, None).await.unwrap().content,
            "First"
        );
        assert_eq!(
            mock.complete(&messages, None).await.unwrap().content,
            "Second"
        );
        // Sticks on the last response once exhausted.
        assert_eq!(
            mock.complete(&messages, None).await.unwrap().content,
            "Second"
        );
    }

    #[tokio::test]
    async fn test_mock_model_cycles() {
        let mock = MockCompletionModel::new();
        mock.set_responses(vec!["A".to_string(), "B".to_string()], true);

        let messages = vec![MemoryEntry::user("Hello")];
        assert_eq!(mock.complete(&messages, None).await.unwrap().content, "A");
        assert_eq!(mock.complete(&messages, None).await.unwrap().content, "B");
        assert_eq!(mock.complete(&messages, None).await.unwrap().content, "A");
    }

    #[tokio::test]
    async fn test_mock_model_error_and_history() {
        let mock = MockCompletionModel::new();
        mock.set_error("boom");

        let messages = vec![MemoryEntry::user("Hello")];
        assert!(mock.complete(&messages, None).await.is_err());
        assert_eq!(mock.call_count(), 1);

        mock.clear_error();
        mock.set_response("ok");
        assert!(mock.complete(&messages, None).await.is_ok());
        assert_eq!(mock.call_count(), 2);
        assert_eq!(mock.last_call().unwrap()[0].content, "Hello");
    }

    #[tokio::test]
    async fn test_mock_embedder_deterministic() {
        let embedder = MockEmbedder::new(32);

        let a = embedder.embed("hello world").await.unwrap();
        let b = embedder.embed("hello world").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 32);
    }

    #[tokio::test]
    async fn test_mock_embedder_overlap_is_closer() {
        let embedder = MockEmbedder::new(32);

        let base = embedder.embed("the quick brown fox").await.unwrap();
        let near = embedder.embed("the quick brown dog").await.unwrap();
        let far = embedder.embed("unrelated words entirely").await.unwrap();

        let dist = |x: &[f32], y: &[f32]| -> f32 {
            x.iter().zip(y).map(|(a, b)| (a - b) * (a - b)).sum()
        };
        assert!(dist(&base, &near) < dist(&base, &far));
    }

    #[tokio::test]
    async fn test_mock_embedder_error_injection() {
        let embedder = MockEmbedder::new(8);
        embedder.set_error("down");
        assert!(embedder.embed("x").await.is_err());

        embedder.clear_error();
        assert!(embedder.embed("x").await.is_ok());
    }
}
