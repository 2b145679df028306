//! Process-wide tutor settings with sensible defaults.
//!
//! [`TutorConfig`] is read once at startup and converted into the pieces the
//! pipeline needs via [`load_exercise`](TutorConfig::load_exercise),
//! [`gemini_config`](TutorConfig::gemini_config) and
//! [`build_tutor`](TutorConfig::build_tutor).

use std::path::PathBuf;
use std::sync::Arc;

use crate::exercise::{Exercise, ExerciseError};
use crate::gemini::{DEFAULT_MODEL, GeminiConfig};
use crate::tutor::Tutor;
use crate::{CompletionClient, DEFAULT_MAX_ATTEMPTS};

#[derive(Debug, Clone)]
pub struct TutorConfig {
    /// Model identifier. Default: `"gemini-2.5-flash"`.
    pub model: String,
    /// Attempt ceiling. Default: `10`.
    pub max_attempts: usize,
    /// Exercise bundle to load. `None` uses the built-in exercise.
    pub exercise_path: Option<PathBuf>,
    /// Sampling temperature. Default: model default.
    pub temperature: Option<f32>,
    /// Output token cap. Default: model default.
    pub max_output_tokens: Option<u32>,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            exercise_path: None,
            temperature: None,
            max_output_tokens: None,
        }
    }
}

impl TutorConfig {
    /// Load the configured exercise, or the built-in one.
    pub fn load_exercise(&self) -> Result<Exercise, ExerciseError> {
        match &self.exercise_path {
            Some(path) => Exercise::load(path),
            None => Ok(Exercise::builtin()),
        }
    }

    /// Gemini client settings for `api_key`.
    pub fn gemini_config(&self, api_key: impl Into<String>) -> GeminiConfig {
        GeminiConfig::new(api_key)
            .with_model(self.model.clone())
            .with_temperature(self.temperature)
            .with_max_output_tokens(self.max_output_tokens)
    }

    /// Load the exercise and build a [`Tutor`] around `client`.
    pub fn build_tutor(&self, client: Arc<dyn CompletionClient>) -> Result<Tutor, ExerciseError> {
        let exercise = self.load_exercise()?;
        Ok(Tutor::new(exercise, self.max_attempts, client))
    }
}
