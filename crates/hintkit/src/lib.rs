//! Attempt-gated hint sessions for a single tutoring exercise.
//!
//! `hintkit` holds the hint-session protocol: the state a conversation
//! carries, the rule that stops generating hints after a fixed number of
//! attempts, and the deterministic prompt assembly that encodes the
//! progressive-disclosure pedagogy. The generative model itself sits behind
//! the [`CompletionClient`] trait; [`GeminiClient`] is the production
//! implementation.
//!
//! Nothing here keeps state between requests. The caller resends the whole
//! conversation with every [`HintRequest`], so a single [`Tutor`] can be
//! shared behind an `Arc` and driven from any number of concurrent tasks.
//!
//! # Getting started
//!
//! ```ignore
//! use std::sync::Arc;
//! use hintkit::{Exercise, GeminiClient, GeminiConfig, HintRequest, Tutor};
//!
//! let client = GeminiClient::new(GeminiConfig::new(api_key))?;
//! let tutor = Tutor::new(Exercise::builtin(), 10, Arc::new(client));
//!
//! let request: HintRequest = serde_json::from_str(body)?;
//! let response = tutor.produce_hint(&request).await;
//! println!("{}", serde_json::to_string(&response)?);
//! ```
//!
//! # Where to find things
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`session`] | [`SessionGate`]: Continue vs Terminal from the attempt count |
//! | [`prompt`] | [`PromptBuilder`], the four prompt blocks and the policy document |
//! | [`exercise`] | [`Exercise`] content bundle, built-in ODE exercise, TOML loading |
//! | [`gemini`] | [`GeminiClient`] for the Generative Language API |
//! | [`tutor`] | [`Tutor`]: gate, compose, complete |
//! | [`config`] | [`TutorConfig`] process settings |
//! | [`trace`] | Request correlation ids |

pub mod config;
pub mod exercise;
pub mod gemini;
pub mod prompt;
pub mod session;
pub mod trace;
pub mod tutor;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use config::TutorConfig;
pub use exercise::{Exercise, ExerciseError};
pub use gemini::{GeminiClient, GeminiConfig};
pub use prompt::{PromptBuilder, PromptComposer};
pub use session::{GateDecision, SessionGate};
pub use tutor::Tutor;

/// Default attempt ceiling.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

// ── Conversation types ─────────────────────────────────────────────

/// One student/tutor exchange, as sent back by the client on every call.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ConversationTurn {
    #[serde(rename = "user")]
    pub student_answer: String,
    #[serde(rename = "ai")]
    pub tutor_reply: String,
}

impl ConversationTurn {
    pub fn new(student_answer: impl Into<String>, tutor_reply: impl Into<String>) -> Self {
        Self {
            student_answer: student_answer.into(),
            tutor_reply: tutor_reply.into(),
        }
    }
}

/// Selects the terminal response once the attempt ceiling is reached.
///
/// On the wire this is the integer `exerciseMode`: `1` is training, anything
/// else (including a missing field) is standard.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(from = "serde_json::Value", into = "u8")]
pub enum ExerciseMode {
    /// Reveal the full worked solution at the ceiling.
    Training,
    /// Impose a cooldown at the ceiling.
    #[default]
    Standard,
}

impl From<serde_json::Value> for ExerciseMode {
    fn from(value: serde_json::Value) -> Self {
        if value.as_f64() == Some(1.0) {
            ExerciseMode::Training
        } else {
            ExerciseMode::Standard
        }
    }
}

impl From<ExerciseMode> for u8 {
    fn from(mode: ExerciseMode) -> Self {
        match mode {
            ExerciseMode::Training => 1,
            ExerciseMode::Standard => 2,
        }
    }
}

impl std::fmt::Display for ExerciseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExerciseMode::Training => write!(f, "training"),
            ExerciseMode::Standard => write!(f, "standard"),
        }
    }
}

/// A student's latest answer plus everything the server needs to respond.
///
/// `history.len()` is the number of attempts already made.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HintRequest {
    #[serde(rename = "userInput")]
    pub student_input: String,
    /// Opaque exercise descriptor from the client. Passed through, never read.
    #[serde(rename = "problemData", default)]
    pub exercise_descriptor: serde_json::Value,
    #[serde(rename = "conversationHistory")]
    pub history: Vec<ConversationTurn>,
    #[serde(rename = "exerciseMode", default)]
    pub mode: ExerciseMode,
}

impl HintRequest {
    pub fn new(student_input: impl Into<String>, mode: ExerciseMode) -> Self {
        Self {
            student_input: student_input.into(),
            exercise_descriptor: serde_json::Value::Null,
            history: Vec::new(),
            mode,
        }
    }

    pub fn with_history(mut self, history: Vec<ConversationTurn>) -> Self {
        self.history = history;
        self
    }
}

/// Exactly one of `{ "hint": ... }` or `{ "error": ... }`.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum HintResponse {
    Hint { hint: String },
    Failure { error: String },
}

impl HintResponse {
    pub fn hint(text: impl Into<String>) -> Self {
        HintResponse::Hint { hint: text.into() }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        HintResponse::Failure {
            error: message.into(),
        }
    }
}

// ── Completion capability ──────────────────────────────────────────

/// Errors from the external completion service.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("completion API HTTP {status}: {body}")]
    Api { status: u16, body: String },
    #[error("rate limited")]
    RateLimited,
    #[error("failed to parse response: {0}")]
    Parse(String),
    #[error("completion blocked: {0}")]
    Blocked(String),
}

/// Opaque text-completion capability: one prompt in, one text out.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Model identifier used for every call.
    fn model(&self) -> &str;

    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_deserializes_wire_names() {
        let json = r#"{
            "userInput": "y = sin(x)",
            "problemData": {"id": 6},
            "conversationHistory": [{"user": "a", "ai": "b"}],
            "exerciseMode": 1
        }"#;
        let req: HintRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.student_input, "y = sin(x)");
        assert_eq!(req.exercise_descriptor["id"], 6);
        assert_eq!(req.history, vec![ConversationTurn::new("a", "b")]);
        assert_eq!(req.mode, ExerciseMode::Training);
    }

    #[test]
    fn mode_other_than_one_is_standard() {
        for raw in ["2", "0", "\"1\"", "null", "true"] {
            let mode: ExerciseMode = serde_json::from_str(raw).unwrap();
            assert_eq!(mode, ExerciseMode::Standard, "input {raw}");
        }
        let mode: ExerciseMode = serde_json::from_str("1.0").unwrap();
        assert_eq!(mode, ExerciseMode::Training);
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{"userInput": "x", "conversationHistory": []}"#;
        let req: HintRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.mode, ExerciseMode::Standard);
        assert!(req.exercise_descriptor.is_null());
    }

    #[test]
    fn missing_history_is_rejected() {
        let json = r#"{"userInput": "x"}"#;
        assert!(serde_json::from_str::<HintRequest>(json).is_err());
    }

    #[test]
    fn response_shapes_are_exclusive() {
        let hint = serde_json::to_value(HintResponse::hint("try r² + 1 = 0")).unwrap();
        assert_eq!(hint, serde_json::json!({"hint": "try r² + 1 = 0"}));

        let failure = serde_json::to_value(HintResponse::failure("oops")).unwrap();
        assert_eq!(failure, serde_json::json!({"error": "oops"}));
    }

    #[test]
    fn mode_serializes_as_integer() {
        assert_eq!(serde_json::to_value(ExerciseMode::Training).unwrap(), 1);
        assert_eq!(serde_json::to_value(ExerciseMode::Standard).unwrap(), 2);
    }
}
