//! Remote "ask a question" backend.
//!
//! Every failure mode (bad URL, transport error, non-200 status, undecodable
//! body) is reported as the same [`AskError::Failed`]. The underlying cause
//! is only logged at debug level.

use std::time::Duration;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Time allowed for the backend to produce an answer
pub const ASK_TIMEOUT: Duration = Duration::from_secs(30);

const SEARCH_BASE_URL: &str = "https://duckduckgo.com/?q=";

// Characters that must not appear raw in a query string
const QUERY_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Web search URL for `query`, used when a guide has no source link
pub fn search_url(query: &str) -> String {
    format!("{}{}", SEARCH_BASE_URL, utf8_percent_encode(query, QUERY_ENCODE_SET))
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AskError {
    #[error("Failed to get AI response. Please try again.")]
    Failed,
}

/// A backend answer, optionally pointing at where it came from
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Answer {
    pub answer: String,
    #[serde(default)]
    pub source_url: Option<String>,
}

/// Answers free-text questions.
pub trait AskClient: Send + Sync {
    fn ask(&self, question: &str) -> Result<Answer, AskError>;
}

#[derive(Debug, Serialize)]
struct AskRequest<'a> {
    question: &'a str,
}

/// Posts questions to `{backend_url}/ask`
#[derive(Debug, Clone)]
pub struct HttpAskClient {
    backend_url: String,
    timeout: Duration,
}

impl HttpAskClient {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self { backend_url: backend_url.into(), timeout: ASK_TIMEOUT }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}/ask", self.backend_url.trim_end_matches('/'))
    }

    fn send(&self, question: &str) -> anyhow::Result<Answer> {
        let endpoint = reqwest::Url::parse(&self.endpoint())?;
        let client = reqwest::blocking::Client::builder().timeout(self.timeout).build()?;
        let resp = client.post(endpoint).json(&AskRequest { question }).send()?;

        if resp.status() != reqwest::StatusCode::OK {
            anyhow::bail!("backend returned HTTP {}", resp.status().as_u16());
        }

        Ok(resp.json()?)
    }
}

impl AskClient for HttpAskClient {
    fn ask(&self, question: &str) -> Result<Answer, AskError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AskError::Failed);
        }

        self.send(question).map_err(|e| {
            debug!(endpoint = %self.endpoint(), "ask request failed: {:#}", e);
            AskError::Failed
        })
    }
}
