//! Mock Image Service Implementation
//!
//! Programmable mock for testing image workflows:
//! - `MockImageService`: configurable mock with request recording
//! - `MockImageBehavior`: controls outcome, delay, and payload
//! - `MockOutcome`: Complete or Fail

use crate::{ImageError, ImageRequest, ImageService};
use std::sync::{Arc, Mutex, RwLock};

/// Minimal PNG signature returned when no payload is configured
pub const DEFAULT_MOCK_PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// What outcome the mock should produce
#[derive(Debug, Clone, Default, PartialEq)]
pub enum MockOutcome {
    /// Return the configured payload
    #[default]
    Complete,
    /// Return an upstream error
    Fail { status: u16, message: String },
}

/// Programmable behavior for the mock image service
#[derive(Debug, Clone)]
pub struct MockImageBehavior {
    pub outcome: Arc<RwLock<MockOutcome>>,
    pub delay_ms: Arc<RwLock<u64>>,
    pub payload: Arc<RwLock<Vec<u8>>>,
}

impl Default for MockImageBehavior {
    fn default() -> Self {
        Self {
            outcome: Arc::new(RwLock::new(MockOutcome::Complete)),
            delay_ms: Arc::new(RwLock::new(0)),
            payload: Arc::new(RwLock::new(DEFAULT_MOCK_PNG.to_vec())),
        }
    }
}

impl MockImageBehavior {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the mock outcome
    pub fn set_outcome(&self, outcome: MockOutcome) {
        *self.outcome.write().unwrap() = outcome;
    }

    /// Configure delay before answering
    pub fn set_delay_ms(&self, delay: u64) {
        *self.delay_ms.write().unwrap() = delay;
    }

    /// Configure the bytes returned on success
    pub fn set_payload(&self, payload: Vec<u8>) {
        *self.payload.write().unwrap() = payload;
    }

    /// Reset to default behavior
    pub fn reset(&self) {
        *self.outcome.write().unwrap() = MockOutcome::Complete;
        *self.delay_ms.write().unwrap() = 0;
        *self.payload.write().unwrap() = DEFAULT_MOCK_PNG.to_vec();
    }

    /// Read current outcome
    pub fn get_outcome(&self) -> MockOutcome {
        self.outcome.read().unwrap().clone()
    }

    /// Read current delay
    pub fn get_delay_ms(&self) -> u64 {
        *self.delay_ms.read().unwrap()
    }
}

/// Mock image service with programmable behavior
#[derive(Debug, Clone, Default)]
pub struct MockImageService {
    behavior: Arc<MockImageBehavior>,
    history: Arc<Mutex<Vec<ImageRequest>>>,
}

impl MockImageService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_behavior(behavior: Arc<MockImageBehavior>) -> Self {
        Self {
            behavior,
            history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get the shared behavior for external configuration
    pub fn behavior(&self) -> &Arc<MockImageBehavior> {
        &self.behavior
    }

    /// Get recorded image requests
    pub fn recorded_requests(&self) -> Vec<ImageRequest> {
        self.history.lock().unwrap().clone()
    }

    /// Clear history
    pub fn reset_history(&self) {
        self.history.lock().unwrap().clear();
    }
}

#[async_trait::async_trait]
impl ImageService for MockImageService {
    async fn generate(&self, request: ImageRequest) -> Result<Vec<u8>, ImageError> {
        tracing::info!(prompt_len = request.prompt.len(), "Mock image: received request");

        self.history.lock().unwrap().push(request);

        let delay_ms = self.behavior.get_delay_ms();
        if delay_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
        }

        match self.behavior.get_outcome() {
            MockOutcome::Complete => Ok(self.behavior.payload.read().unwrap().clone()),
            MockOutcome::Fail { status, message } => {
                Err(ImageError::Upstream { status, message })
            }
        }
    }
}
