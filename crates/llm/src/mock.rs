//! Mock LLM Service Implementation
//!
//! Programmable mock used by `LlmServiceFactory` when provider is `"mock"`:
//! - `MockLlmService`: deterministic completions with request recording
//! - `MockLlmBehavior`: controls outcome and queued responses
//! - `MockOutcome`: Complete or Fail

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, RwLock};

use crate::{CompletionRequest, CompletionResponse, LlmError, LlmService};

/// What outcome the mock should produce
#[derive(Debug, Clone, Default, PartialEq)]
pub enum MockOutcome {
    /// Return a completion
    #[default]
    Complete,
    /// Return an upstream error with the given status
    Fail { status: u16, message: String },
}

/// Programmable behavior for the mock LLM service
#[derive(Debug, Clone, Default)]
pub struct MockLlmBehavior {
    pub outcome: Arc<RwLock<MockOutcome>>,
    pub responses: Arc<Mutex<VecDeque<String>>>,
}

impl MockLlmBehavior {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the mock outcome
    pub fn set_outcome(&self, outcome: MockOutcome) {
        *self.outcome.write().unwrap() = outcome;
    }

    /// Queue a completion text; queued texts are returned in order before
    /// falling back to the echo response
    pub fn push_response(&self, content: impl Into<String>) {
        self.responses.lock().unwrap().push_back(content.into());
    }

    /// Reset to default behavior
    pub fn reset(&self) {
        *self.outcome.write().unwrap() = MockOutcome::Complete;
        self.responses.lock().unwrap().clear();
    }

    /// Read current outcome
    pub fn get_outcome(&self) -> MockOutcome {
        self.outcome.read().unwrap().clone()
    }

    fn next_response(&self) -> Option<String> {
        self.responses.lock().unwrap().pop_front()
    }
}

/// Mock LLM service for testing
#[derive(Debug, Clone, Default)]
pub struct MockLlmService {
    behavior: Arc<MockLlmBehavior>,
    history: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockLlmService {
    /// Create a new mock LLM service
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_behavior(behavior: Arc<MockLlmBehavior>) -> Self {
        Self {
            behavior,
            history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get the shared behavior for external configuration
    pub fn behavior(&self) -> &Arc<MockLlmBehavior> {
        &self.behavior
    }

    /// Get recorded completion requests
    pub fn recorded_requests(&self) -> Vec<CompletionRequest> {
        self.history.lock().unwrap().clone()
    }

    /// Prompt of every recorded request, in call order
    pub fn recorded_prompts(&self) -> Vec<String> {
        self.history
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.prompt.clone())
            .collect()
    }

    /// Clear history
    pub fn reset_history(&self) {
        self.history.lock().unwrap().clear();
    }
}

#[async_trait::async_trait]
impl LlmService for MockLlmService {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        tracing::info!("Mock LLM service processing completion request");

        self.history.lock().unwrap().push(request.clone());

        if let MockOutcome::Fail { status, message } = self.behavior.get_outcome() {
            return Err(LlmError::Upstream { status, message });
        }

        let content = self
            .behavior
            .next_response()
            .unwrap_or_else(|| format!("Mock response to: {}", request.prompt));
        let input_tokens = request.prompt.len() as i32 / 4;
        let output_tokens = content.len() as i32 / 4;

        Ok(CompletionResponse {
            content,
            model: "mock-model".to_string(),
            input_tokens,
            output_tokens,
            stop_reason: "STOP".to_string(),
        })
    }
}
