//! Mock Speech Service Implementation

use crate::{SpeechError, SpeechService};
use std::sync::{Arc, Mutex, RwLock};

/// MPEG frame header returned when no payload is configured
pub const DEFAULT_MOCK_MP3: &[u8] = &[0xFF, 0xFB, 0x90, 0x64, 0x00];

#[derive(Debug, Clone, Default, PartialEq)]
pub enum MockOutcome {
    #[default]
    Complete,
    Fail { status: u16, message: String },
}

/// Programmable behavior for the mock speech service
#[derive(Debug, Clone)]
pub struct MockSpeechBehavior {
    pub outcome: Arc<RwLock<MockOutcome>>,
    pub delay_ms: Arc<RwLock<u64>>,
    pub payload: Arc<RwLock<Vec<u8>>>,
}

impl Default for MockSpeechBehavior {
    fn default() -> Self {
        Self {
            outcome: Arc::new(RwLock::new(MockOutcome::Complete)),
            delay_ms: Arc::new(RwLock::new(0)),
            payload: Arc::new(RwLock::new(DEFAULT_MOCK_MP3.to_vec())),
        }
    }
}

impl MockSpeechBehavior {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_outcome(&self, outcome: MockOutcome) {
        *self.outcome.write().unwrap() = outcome;
    }

    pub fn set_delay_ms(&self, delay: u64) {
        *self.delay_ms.write().unwrap() = delay;
    }

    pub fn set_payload(&self, payload: Vec<u8>) {
        *self.payload.write().unwrap() = payload;
    }

    pub fn get_outcome(&self) -> MockOutcome {
        self.outcome.read().unwrap().clone()
    }

    pub fn get_delay_ms(&self) -> u64 {
        *self.delay_ms.read().unwrap()
    }
}

/// Mock speech service recording every synthesized text
#[derive(Debug, Clone, Default)]
pub struct MockSpeechService {
    behavior: Arc<MockSpeechBehavior>,
    history: Arc<Mutex<Vec<String>>>,
}

impl MockSpeechService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_behavior(behavior: Arc<MockSpeechBehavior>) -> Self {
        Self {
            behavior,
            history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn behavior(&self) -> &Arc<MockSpeechBehavior> {
        &self.behavior
    }

    /// Texts passed to `synthesize`, in call order
    pub fn recorded_texts(&self) -> Vec<String> {
        self.history.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SpeechService for MockSpeechService {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        tracing::info!(text_len = text.len(), "Mock speech: received request");

        self.history.lock().unwrap().push(text.to_string());

        let delay_ms = self.behavior.get_delay_ms();
        if delay_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
        }

        match self.behavior.get_outcome() {
            MockOutcome::Complete => Ok(self.behavior.payload.read().unwrap().clone()),
            MockOutcome::Fail { status, message } => {
                Err(SpeechError::Upstream { status, message })
            }
        }
    }
}
