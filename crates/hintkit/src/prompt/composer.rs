//! Prompt composition for one hint request.
//!
//! The prompt is four blocks joined by a `---` divider, always in this order:
//!
//! 1. [`directive_block`]: override and anti-repetition rules
//! 2. [`transcript_block`]: prior turns (omitted when there are none)
//! 3. [`current_turn_block`]: the student's latest answer, verbatim
//! 4. [`policy_block`](super::policy_block): pedagogy and content policy
//!
//! Only the transcript and the current turn vary between requests. The
//! directive and both mode variants of the policy are rendered once, in
//! [`PromptComposer::new`].

use super::builder::PromptBuilder;
use super::policy::policy_block;
use crate::exercise::{Exercise, TranscriptLabels};
use crate::session::SessionGate;
use crate::{ConversationTurn, ExerciseMode, HintRequest};

/// Divider placed between the four prompt blocks.
pub const BLOCK_DIVIDER: &str = "\n\n---\n\n";

const OVERRIDE_RULES: &str = "\
IF YOU ARE STUCK OR CONTRADICTING YOURSELF:
1. Be yourself (Gemini) - use your own intelligence and creativity
2. BUT: NEVER give the final complete answer
3. NEVER repeat the same response twice - check history and vary your approach";

/// Block 1: fixed override rules plus the exercise's progressive milestones.
pub fn directive_block(exercise: &Exercise) -> String {
    let directive = &exercise.directive;
    let milestones = directive
        .milestones
        .iter()
        .enumerate()
        .map(|(i, m)| format!("{}. {m}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    PromptBuilder::new("# OVERRIDE INSTRUCTION - HIGHEST PRIORITY")
        .raw(OVERRIDE_RULES)
        .raw(format!(
            "# {}:\nIf you already said \"{}\", DO NOT repeat this.\nInstead, give ONE of these progressive hints:\n{milestones}",
            directive.focus, directive.repeated_hint
        ))
        .build()
}

/// Block 2: one student/tutor pair per turn, in order. Empty for no history.
pub fn transcript_block(labels: &TranscriptLabels, history: &[ConversationTurn]) -> String {
    if history.is_empty() {
        return String::new();
    }
    let turns = history
        .iter()
        .map(|turn| {
            format!(
                "{}: {}\n{}: {}",
                labels.student, turn.student_answer, labels.tutor, turn.tutor_reply
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("# CONVERSATION HISTORY:\n{turns}")
}

/// Block 3: the student's current answer, labeled as the current turn.
pub fn current_turn_block(labels: &TranscriptLabels, student_input: &str) -> String {
    format!("# {}: {student_input}", labels.current)
}

/// Assembles the full prompt for a hint request.
#[derive(Debug, Clone)]
pub struct PromptComposer {
    labels: TranscriptLabels,
    directive: String,
    training_policy: String,
    standard_policy: String,
}

impl PromptComposer {
    /// Pre-render the fixed blocks. The policy's terminal section is taken
    /// from `gate`, so it always matches what the gate would answer.
    pub fn new(exercise: &Exercise, gate: &SessionGate) -> Self {
        let ceiling = gate.ceiling();
        Self {
            labels: exercise.labels.clone(),
            directive: directive_block(exercise),
            training_policy: policy_block(
                exercise,
                ceiling,
                gate.terminal_text(ExerciseMode::Training),
            ),
            standard_policy: policy_block(
                exercise,
                ceiling,
                gate.terminal_text(ExerciseMode::Standard),
            ),
        }
    }

    pub fn policy(&self, mode: ExerciseMode) -> &str {
        match mode {
            ExerciseMode::Training => &self.training_policy,
            ExerciseMode::Standard => &self.standard_policy,
        }
    }

    /// Build the prompt. Same request, same string.
    pub fn compose(&self, request: &HintRequest) -> String {
        PromptBuilder::new(self.directive.as_str())
            .with_separator(BLOCK_DIVIDER)
            .raw(transcript_block(&self.labels, &request.history))
            .raw(current_turn_block(&self.labels, &request.student_input))
            .raw(self.policy(request.mode))
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composer() -> (PromptComposer, SessionGate) {
        let exercise = Exercise::builtin();
        let gate = SessionGate::new(&exercise, 10);
        (PromptComposer::new(&exercise, &gate), gate)
    }

    fn labels() -> TranscriptLabels {
        Exercise::builtin().labels
    }

    #[test]
    fn empty_history_renders_empty_transcript() {
        assert_eq!(transcript_block(&labels(), &[]), "");
    }

    #[test]
    fn single_turn_renders_one_pair_in_order() {
        let block = transcript_block(&labels(), &[ConversationTurn::new("a", "b")]);
        assert_eq!(
            block,
            "# CONVERSATION HISTORY:\nתשובת סטודנט: a\nתגובת מורה: b"
        );
        assert!(block.find(": a").unwrap() < block.find(": b").unwrap());
    }

    #[test]
    fn turns_keep_their_order() {
        let history = vec![
            ConversationTurn::new("first", "one"),
            ConversationTurn::new("second", "two"),
        ];
        let block = transcript_block(&labels(), &history);
        assert!(block.find("first").unwrap() < block.find("second").unwrap());
        assert_eq!(block.matches("תשובת סטודנט:").count(), 2);
    }

    #[test]
    fn current_turn_is_verbatim() {
        let block = current_turn_block(&labels(), "  y = x + sin(x)\n");
        assert_eq!(block, "# תשובת הסטודנט כעת:   y = x + sin(x)\n");
    }

    #[test]
    fn directive_lists_milestones() {
        let block = directive_block(&Exercise::builtin());
        assert!(block.starts_with("# OVERRIDE INSTRUCTION - HIGHEST PRIORITY"));
        assert!(block.contains("NEVER give the final complete answer"));
        assert!(block.contains("If you already said \"find the homogeneous solution first\""));
        assert!(block.contains("4. Suggest trying y_p = Ax + B for particular solution"));
    }

    #[test]
    fn blocks_appear_in_fixed_order() {
        let (composer, _) = composer();
        let request = HintRequest::new("STUDENT-NOW", ExerciseMode::Standard)
            .with_history(vec![ConversationTurn::new("EARLIER", "REPLY")]);
        let prompt = composer.compose(&request);

        let directive = prompt.find("# OVERRIDE INSTRUCTION").unwrap();
        let transcript = prompt.find("# CONVERSATION HISTORY:").unwrap();
        let current = prompt.find("STUDENT-NOW").unwrap();
        let policy = prompt.find("# Digital Friend").unwrap();
        assert!(directive < transcript && transcript < current && current < policy);
        assert_eq!(prompt.matches(BLOCK_DIVIDER).count(), 3);
    }

    #[test]
    fn empty_history_omits_transcript_block() {
        let (composer, _) = composer();
        let prompt = composer.compose(&HintRequest::new("x", ExerciseMode::Standard));
        assert!(!prompt.contains("CONVERSATION HISTORY"));
        assert_eq!(prompt.matches(BLOCK_DIVIDER).count(), 2);
    }

    #[test]
    fn compose_is_deterministic() {
        let (composer, _) = composer();
        let request = HintRequest::new("r^2 + 1 = 0", ExerciseMode::Training)
            .with_history(vec![ConversationTurn::new("y = x", "check y_h")]);
        assert_eq!(composer.compose(&request), composer.compose(&request));
    }

    #[test]
    fn policy_terminal_text_matches_gate() {
        let (composer, gate) = composer();
        for mode in [ExerciseMode::Training, ExerciseMode::Standard] {
            let prompt = composer.compose(&HintRequest::new("x", mode));
            assert!(prompt.contains(gate.terminal_text(mode)), "mode {mode}");
        }
        assert_ne!(
            composer.policy(ExerciseMode::Training),
            composer.policy(ExerciseMode::Standard)
        );
    }

    #[test]
    fn standard_prompt_does_not_carry_training_solution_text() {
        let (composer, gate) = composer();
        let prompt = composer.compose(&HintRequest::new("x", ExerciseMode::Standard));
        assert!(!prompt.contains(gate.terminal_text(ExerciseMode::Training)));
    }
}
