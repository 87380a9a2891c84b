//! FaithLoop LLM Provider Layer
//!
//! Structured-completion providers implementing `CompletionProvider` from
//! `faithloop-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OllamaProvider`: Local Ollama chat API with JSON-schema constrained output
//!
//! # Examples
//!
//! ```
//! use faithloop_domain::{ChatMessage, CompletionProvider};
//! use faithloop_llm::MockProvider;
//! use serde_json::json;
//!
//! let provider = MockProvider::new(json!({"summary": "ok"}));
//! let schema = json!({"type": "object"});
//! let result = provider
//!     .complete_structured(&[ChatMessage::user("hi")], &schema, 0.7)
//!     .unwrap();
//! assert_eq!(result["summary"], "ok");
//! ```

#![warn(missing_docs)]

pub mod ollama;

use faithloop_domain::{ChatMessage, CompletionProvider, Role};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use ollama::{OllamaConfig, OllamaProvider};

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Response parsed but does not have the requested shape
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Async runtime could not be started
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// A structured request as seen by [`MockProvider`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// Messages sent
    pub messages: Vec<ChatMessage>,
    /// Schema sent
    pub schema: Value,
    /// Sampling temperature
    pub temperature: f32,
}

/// Mock completion provider for deterministic testing
///
/// Returns pre-configured JSON values without making any network calls.
/// Responses are keyed by the content of the last user message.
///
/// # Examples
///
/// ```
/// use faithloop_domain::{ChatMessage, CompletionProvider};
/// use faithloop_llm::MockProvider;
/// use serde_json::json;
///
/// let mut provider = MockProvider::default();
/// provider.add_response("week 1", json!({"summary": "first"}));
/// provider.add_error("week 2");
///
/// let schema = json!({});
/// let first = provider.complete_structured(&[ChatMessage::user("week 1")], &schema, 0.0);
/// assert_eq!(first.unwrap()["summary"], "first");
/// assert!(provider
///     .complete_structured(&[ChatMessage::user("week 2")], &schema, 0.0)
///     .is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: Value,
    responses: Arc<Mutex<HashMap<String, Option<Value>>>>,
    always_fail: bool,
    call_count: Arc<Mutex<usize>>,
    last_request: Arc<Mutex<Option<RecordedRequest>>>,
}

impl MockProvider {
    /// Create a new MockProvider returning `response` for every request
    pub fn new(response: Value) -> Self {
        Self {
            default_response: response,
            responses: Arc::new(Mutex::new(HashMap::new())),
            always_fail: false,
            call_count: Arc::new(Mutex::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// A provider that reports itself unavailable on every call
    pub fn unavailable() -> Self {
        Self {
            always_fail: true,
            ..Self::default()
        }
    }

    /// Add a specific response for a given user prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: Value) {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.into(), Some(response));
    }

    /// Configure to return an error for a specific user prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        self.responses.lock().unwrap().insert(prompt.into(), None);
    }

    /// Get the number of completion calls
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }

    /// The most recent request, if any
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new(Value::Object(serde_json::Map::new()))
    }
}

impl CompletionProvider for MockProvider {
    type Error = LlmError;

    fn complete_structured(
        &self,
        messages: &[ChatMessage],
        schema: &Value,
        temperature: f32,
    ) -> Result<Value, Self::Error> {
        *self.call_count.lock().unwrap() += 1;
        *self.last_request.lock().unwrap() = Some(RecordedRequest {
            messages: messages.to_vec(),
            schema: schema.clone(),
            temperature,
        });

        if self.always_fail {
            return Err(LlmError::Communication("Mock provider unavailable".to_string()));
        }

        let prompt = messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or_default();

        let responses = self.responses.lock().unwrap();
        match responses.get(prompt) {
            Some(Some(value)) => Ok(value.clone()),
            Some(None) => Err(LlmError::Other("Mock error".to_string())),
            None => Ok(self.default_response.clone()),
        }
    }
}
