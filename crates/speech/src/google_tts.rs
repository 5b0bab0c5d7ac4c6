//! Google Translate TTS Implementation
//!
//! The `translate_tts` endpoint accepts at most 100 characters per request, so
//! narration is split on word boundaries and the MP3 frames of every chunk are
//! concatenated in order.

use reqwest::Client;
use serde::Serialize;

use crate::{SpeechConfig, SpeechError, SpeechService};

const DEFAULT_BASE_URL: &str = "https://translate.google.com";

/// Per-request character limit of the endpoint
pub const MAX_CHUNK_CHARS: usize = 100;

#[derive(Debug, Serialize)]
struct TtsQuery<'a> {
    ie: &'static str,
    q: &'a str,
    tl: &'a str,
    total: usize,
    idx: usize,
    textlen: usize,
    client: &'static str,
}

pub struct GoogleTtsService {
    client: Client,
    config: SpeechConfig,
    base_url: String,
}

impl GoogleTtsService {
    pub fn new(config: SpeechConfig) -> Result<Self, SpeechError> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    async fn fetch_chunk(
        &self,
        chunk: &str,
        idx: usize,
        total: usize,
    ) -> Result<Vec<u8>, SpeechError> {
        let query = TtsQuery {
            ie: "UTF-8",
            q: chunk,
            tl: &self.config.language,
            total,
            idx,
            textlen: chunk.chars().count(),
            client: "tw-ob",
        };

        let response = self
            .client
            .get(format!("{}/translate_tts", self.base_url))
            .query(&query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SpeechError::Timeout
                } else {
                    SpeechError::Request(format!("HTTP request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(SpeechError::Upstream {
                status: status.as_u16(),
                message: format!("chunk {} of {}: {}", idx + 1, total, message.trim()),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SpeechError::Response(format!("Failed to read audio body: {}", e)))?;

        Ok(bytes.to_vec())
    }
}

#[async_trait::async_trait]
impl SpeechService for GoogleTtsService {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        let chunks = split_into_chunks(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(SpeechError::InvalidInput("text must not be empty".to_string()));
        }

        tracing::debug!(
            chunks = chunks.len(),
            language = %self.config.language,
            "Sending Google TTS requests"
        );

        let total = chunks.len();
        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            audio.extend(self.fetch_chunk(chunk, idx, total).await?);
        }

        if audio.is_empty() {
            return Err(SpeechError::Response(
                "Provider returned empty audio".to_string(),
            ));
        }

        Ok(audio)
    }
}

/// Split text into chunks of at most `max_chars` characters.
///
/// Whitespace is collapsed; words are kept whole unless a single word exceeds
/// the limit, in which case it is cut at character boundaries.
pub fn split_into_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() {
            word_len
        } else {
            current_len + 1 + word_len
        };

        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_len = needed;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> SpeechConfig {
        SpeechConfig {
            provider: "google-tts".to_string(),
            base_url: Some(server.uri()),
            ..SpeechConfig::default()
        }
    }

    #[test]
    fn test_split_short_text_is_single_chunk() {
        assert_eq!(
            split_into_chunks("Welcome to the show", 100),
            vec!["Welcome to the show"]
        );
    }

    #[test]
    fn test_split_respects_limit_on_word_boundaries() {
        let text = "alpha beta gamma delta epsilon";
        let chunks = split_into_chunks(text, 11);
        assert_eq!(chunks, vec!["alpha beta", "gamma delta", "epsilon"]);
        assert!(chunks.iter().all(|c| c.chars().count() <= 11));
    }

    #[test]
    fn test_split_cuts_oversized_word() {
        let chunks = split_into_chunks("ab abcdefgh cd", 4);
        assert_eq!(chunks, vec!["ab", "abcd", "efgh", "cd"]);
    }

    #[test]
    fn test_split_blank_text_is_empty() {
        assert!(split_into_chunks(" \t ", 100).is_empty());
    }

    #[tokio::test]
    async fn test_synthesize_concatenates_chunks_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_tts"))
            .and(query_param("idx", "0"))
            .and(query_param("tl", "en"))
            .and(query_param("client", "tw-ob"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1, 2]))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/translate_tts"))
            .and(query_param("idx", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![3]))
            .expect(1)
            .mount(&server)
            .await;

        let service = GoogleTtsService::new(config_for(&server)).unwrap();
        let text = format!("{} {}", "a".repeat(60), "b".repeat(60));
        let audio = service.synthesize(&text).await.unwrap();

        assert_eq!(audio, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_synthesize_reports_failed_chunk() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
            .mount(&server)
            .await;

        let service = GoogleTtsService::new(config_for(&server)).unwrap();
        let err = service.synthesize("hello there").await.unwrap_err();

        match err {
            SpeechError::Upstream { status, message } => {
                assert_eq!(status, 429);
                assert!(message.contains("chunk 1 of 1"));
            }
            other => panic!("Expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_synthesize_rejects_blank_text() {
        let server = MockServer::start().await;
        let service = GoogleTtsService::new(config_for(&server)).unwrap();
        let err = service.synthesize("   ").await.unwrap_err();
        assert!(matches!(err, SpeechError::InvalidInput(_)));
    }
}
