use serde::{Deserialize, Serialize};

use crate::core::FetchError;

/// One timed caption unit. The CLI only consumes `text`; timing is kept so
/// library callers can line segments up against the video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// A transcript track fetched for one video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedTranscript {
    pub video_id: String,
    pub language_code: String,
    pub is_generated: bool,
    pub segments: Vec<TranscriptSegment>,
}

impl FetchedTranscript {
    /// Concatenates segment texts in sequence order, one space between segments.
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .map(|segment| segment.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// The one JSON object this tool prints to stdout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranscriptOutcome {
    Success {
        success: bool,
        transcript: String,
        language: String,
    },
    Failure {
        success: bool,
        error: String,
    },
}

impl TranscriptOutcome {
    pub fn success(transcript: String, language: String) -> Self {
        Self::Success {
            success: true,
            transcript,
            language,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            success: false,
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Serializes for stdout, falling back to a literal failure object if
    /// encoding ever fails.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"success":false,"error":"Failed to encode result"}"#.to_string())
    }
}

impl From<Result<FetchedTranscript, FetchError>> for TranscriptOutcome {
    fn from(result: Result<FetchedTranscript, FetchError>) -> Self {
        match result {
            Ok(transcript) => {
                let text = transcript.text();
                Self::success(text, transcript.language_code)
            }
            Err(err) => Self::failure(err.to_string()),
        }
    }
}
