//! Exercise content: everything the tutor says that is specific to one problem.
//!
//! An [`Exercise`] is plain data. The session gate and the prompt composer
//! only read it, so swapping the problem means loading a different bundle
//! (see [`Exercise::load`]) rather than touching any logic. The built-in
//! bundle is the second-order ODE `y'' + y = x`.

mod builtin;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Placeholder substituted with the attempt ceiling in templated texts.
pub const CEILING_PLACEHOLDER: &str = "{ceiling}";

/// Errors loading an exercise bundle.
#[derive(Debug, thiserror::Error)]
pub enum ExerciseError {
    #[error("failed to read exercise file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid exercise TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid exercise: {0}")]
    Invalid(String),
}

/// The full content bundle for one exercise.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Exercise {
    /// Short name used in the policy title, e.g. `"Exercise 6"`.
    pub title: String,
    /// The equation students must solve.
    pub equation: String,
    /// One-line classification of the problem.
    pub classification: String,
    /// Expected solution method.
    pub method: String,
    /// Complete correct solution (markdown). Given to the model so it can
    /// judge answers; the policy forbids revealing it.
    pub solution: String,
    /// Default response language. Students may always override it.
    pub primary_language: String,
    pub directive: Directive,
    /// Disclosures the model must never make before the ceiling.
    pub forbidden: Vec<String>,
    /// When the allowed hints kick in.
    pub allowed_when: String,
    /// Allowed hints, grouped by solution part.
    pub allowed: Vec<HintGroup>,
    /// Tables that may always be shown in full.
    pub reference_tables: Vec<ReferenceTable>,
    /// Steps for answering an incorrect attempt.
    pub incorrect_answer_steps: Vec<String>,
    pub labels: TranscriptLabels,
    pub terminal: TerminalTemplates,
    /// User-facing message when the completion service fails.
    pub service_error: String,
}

/// Exercise-specific part of the anti-repetition directive.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Directive {
    /// Heading for the exercise-specific rules.
    pub focus: String,
    /// The generic hint the model tends to repeat.
    pub repeated_hint: String,
    /// Progressive milestones, in solution order.
    pub milestones: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HintGroup {
    pub title: String,
    pub hints: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ReferenceTable {
    pub title: String,
    /// Markdown body (intro line plus table).
    pub body: String,
}

/// Labels used when rendering the conversation into the prompt.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TranscriptLabels {
    pub student: String,
    pub tutor: String,
    pub current: String,
}

/// Terminal texts, with [`CEILING_PLACEHOLDER`] for the attempt ceiling.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TerminalTemplates {
    /// Training mode: the worked solution.
    pub training: String,
    /// Standard mode: the cooldown notice.
    pub cooldown: String,
}

impl TerminalTemplates {
    pub fn render_training(&self, ceiling: usize) -> String {
        render_ceiling(&self.training, ceiling)
    }

    pub fn render_cooldown(&self, ceiling: usize) -> String {
        render_ceiling(&self.cooldown, ceiling)
    }
}

fn render_ceiling(template: &str, ceiling: usize) -> String {
    template.replace(CEILING_PLACEHOLDER, &ceiling.to_string())
}

impl Exercise {
    /// The built-in `y'' + y = x` exercise.
    pub fn builtin() -> Self {
        builtin::ode_exercise()
    }

    /// Parse an exercise bundle from TOML.
    pub fn from_toml_str(text: &str) -> Result<Self, ExerciseError> {
        let exercise: Exercise = toml::from_str(text)?;
        exercise.validate()?;
        Ok(exercise)
    }

    /// Load an exercise bundle from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ExerciseError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ExerciseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<(), ExerciseError> {
        let required = [
            ("title", &self.title),
            ("equation", &self.equation),
            ("solution", &self.solution),
            ("primary_language", &self.primary_language),
            ("terminal.training", &self.terminal.training),
            ("terminal.cooldown", &self.terminal.cooldown),
            ("service_error", &self.service_error),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ExerciseError::Invalid(format!("`{name}` must not be empty")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = r#"
title = "Exercise 1"
equation = "y' = y"
classification = "First-order linear ODE."
method = "Separation of variables"
solution = "y = Ce^x"
primary_language = "English"
forbidden = ["The final answer"]
allowed_when = "After 2 attempts:"
incorrect_answer_steps = ["Say what is wrong"]
service_error = "Something went wrong"

[directive]
focus = "FIRST ORDER ODEs"
repeated_hint = "separate the variables"
milestones = ["Divide by y", "Integrate both sides"]

[[allowed]]
title = "Separation"
hints = ["Can mention: \"dy/y = dx\""]

[[reference_tables]]
title = "Integrals"
body = "| f | F |\n|---|---|\n| 1/y | ln|y| |"

[labels]
student = "Student"
tutor = "Tutor"
current = "Current answer"

[terminal]
training = "Out of {ceiling} attempts. Solution: y = Ce^x"
cooldown = "Out of {ceiling} attempts. Come back in 24 hours."
"#;

    #[test]
    fn builtin_is_valid() {
        let exercise = Exercise::builtin();
        assert!(exercise.validate().is_ok());
        assert_eq!(exercise.equation, "y'' + y = x");
        assert_eq!(exercise.directive.milestones.len(), 4);
        assert_eq!(exercise.reference_tables.len(), 2);
    }

    #[test]
    fn parses_minimal_toml() {
        let exercise = Exercise::from_toml_str(MINIMAL).unwrap();
        assert_eq!(exercise.title, "Exercise 1");
        assert_eq!(exercise.allowed[0].hints.len(), 1);
        assert_eq!(exercise.labels.current, "Current answer");
        assert_eq!(
            exercise.terminal.render_cooldown(3),
            "Out of 3 attempts. Come back in 24 hours."
        );
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();
        let exercise = Exercise::load(file.path()).unwrap();
        assert_eq!(exercise.equation, "y' = y");
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let err = Exercise::load(&path).unwrap_err();
        assert!(matches!(err, ExerciseError::Io { .. }));
        assert!(err.to_string().contains("nope.toml"));
    }

    #[test]
    fn empty_terminal_text_rejected() {
        let text = MINIMAL.replace(
            "cooldown = \"Out of {ceiling} attempts. Come back in 24 hours.\"",
            "cooldown = \"  \"",
        );
        let err = Exercise::from_toml_str(&text).unwrap_err();
        assert!(err.to_string().contains("terminal.cooldown"));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = Exercise::from_toml_str("title = ").unwrap_err();
        assert!(matches!(err, ExerciseError::Parse(_)));
    }

    #[test]
    fn builtin_templates_mention_ceiling() {
        let exercise = Exercise::builtin();
        assert!(exercise.terminal.render_training(10).contains("10"));
        let cooldown = exercise.terminal.render_cooldown(10);
        assert!(cooldown.contains("10"));
        assert!(cooldown.contains("24"));
        assert!(!cooldown.contains(CEILING_PLACEHOLDER));
    }
}
