use serde::{Deserialize, Serialize};

use crate::constants::{NO_ANSWER, UPLOAD_COMPLETE};

/// A model the server can answer with, as reported by `/api/models`
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ModelDescriptor {
    pub name: String,
}

impl ModelDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        ModelDescriptor { name: name.into() }
    }
}

/// Body returned by `/api/upload`
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct UploadResult {
    #[serde(default)]
    pub message: Option<String>,
    /// Set by the server on non-2xx responses
    #[serde(default)]
    pub error: Option<String>,
}

impl UploadResult {
    /// Text for the upload status panel; empty messages count as absent
    pub fn display_text(&self) -> String {
        non_empty(self.message.as_deref())
            .unwrap_or(UPLOAD_COMPLETE)
            .to_string()
    }
}

/// Body returned by `/api/ask`
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AnswerResult {
    #[serde(default)]
    pub answer: Option<String>,
    /// Set by the server on non-2xx responses
    #[serde(default)]
    pub error: Option<String>,
}

impl AnswerResult {
    /// Text for the answer panel; empty answers count as absent
    pub fn display_text(&self) -> String {
        non_empty(self.answer.as_deref()).unwrap_or(NO_ANSWER).to_string()
    }
}

/// JSON body posted to `/api/ask`
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AskPayload {
    pub question: String,
    pub model: String,
    pub temperature: f64,
}

/// Error body the server sends alongside 4xx/5xx statuses
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.is_empty())
}
