//! Attempt gating.
//!
//! [`SessionGate`] compares the number of prior turns against the attempt
//! ceiling. Below the ceiling it lets the request through; at or above it,
//! it answers with a fixed terminal text and the model is never consulted.
//! Both terminal texts are rendered once, when the gate is built, so repeated
//! requests at the ceiling get byte-identical answers.

use crate::exercise::Exercise;
use crate::{ConversationTurn, ExerciseMode};

/// Outcome of [`SessionGate::evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision<'a> {
    /// Attempts remain; compose a prompt and ask the model.
    Continue,
    /// Ceiling reached; respond with this text as-is.
    Terminal(&'a str),
}

impl GateDecision<'_> {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GateDecision::Terminal(_))
    }
}

/// Decides Continue vs Terminal from the attempt count.
#[derive(Debug, Clone)]
pub struct SessionGate {
    ceiling: usize,
    training_text: String,
    cooldown_text: String,
}

impl SessionGate {
    /// Build a gate for `exercise` with the given attempt ceiling.
    pub fn new(exercise: &Exercise, ceiling: usize) -> Self {
        Self {
            ceiling,
            training_text: exercise.terminal.render_training(ceiling),
            cooldown_text: exercise.terminal.render_cooldown(ceiling),
        }
    }

    pub fn ceiling(&self) -> usize {
        self.ceiling
    }

    /// Terminal text for `mode`: the worked solution in training mode,
    /// the cooldown notice otherwise.
    pub fn terminal_text(&self, mode: ExerciseMode) -> &str {
        match mode {
            ExerciseMode::Training => &self.training_text,
            ExerciseMode::Standard => &self.cooldown_text,
        }
    }

    /// A history of exactly `ceiling` turns is already terminal.
    pub fn evaluate(&self, history: &[ConversationTurn], mode: ExerciseMode) -> GateDecision<'_> {
        if history.len() >= self.ceiling {
            GateDecision::Terminal(self.terminal_text(mode))
        } else {
            GateDecision::Continue
        }
    }

    pub fn attempts_remaining(&self, history: &[ConversationTurn]) -> usize {
        self.ceiling.saturating_sub(history.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(len: usize) -> Vec<ConversationTurn> {
        (0..len)
            .map(|i| ConversationTurn::new(format!("answer {i}"), format!("hint {i}")))
            .collect()
    }

    fn gate() -> SessionGate {
        SessionGate::new(&Exercise::builtin(), 10)
    }

    #[test]
    fn below_ceiling_continues() {
        let gate = gate();
        for len in 0..10 {
            assert_eq!(
                gate.evaluate(&history(len), ExerciseMode::Standard),
                GateDecision::Continue,
                "len {len}"
            );
        }
    }

    #[test]
    fn ceiling_boundary_is_exclusive() {
        let gate = gate();
        assert_eq!(
            gate.evaluate(&history(9), ExerciseMode::Training),
            GateDecision::Continue
        );
        assert!(gate.evaluate(&history(10), ExerciseMode::Training).is_terminal());
        assert!(gate.evaluate(&history(25), ExerciseMode::Standard).is_terminal());
    }

    #[test]
    fn terminal_text_depends_only_on_mode() {
        let gate = gate();
        let GateDecision::Terminal(training) = gate.evaluate(&history(10), ExerciseMode::Training)
        else {
            panic!("expected terminal");
        };
        let GateDecision::Terminal(standard) = gate.evaluate(&history(12), ExerciseMode::Standard)
        else {
            panic!("expected terminal");
        };

        assert!(training.contains("y = C₁cos(x) + C₂sin(x) + x"));
        assert!(training.contains("r = ±i"));
        assert!(standard.contains("24"));
        assert!(standard.contains("10"));
        assert_ne!(training, standard);

        // Repeated calls are byte-identical.
        assert_eq!(
            gate.evaluate(&history(11), ExerciseMode::Training),
            GateDecision::Terminal(training)
        );
        assert_eq!(gate.terminal_text(ExerciseMode::Standard), standard);
    }

    #[test]
    fn history_contents_do_not_matter() {
        let gate = gate();
        let empty_turns = vec![ConversationTurn::new("", ""); 10];
        assert!(gate.evaluate(&empty_turns, ExerciseMode::Standard).is_terminal());
    }

    #[test]
    fn attempts_remaining_saturates() {
        let gate = gate();
        assert_eq!(gate.attempts_remaining(&history(3)), 7);
        assert_eq!(gate.attempts_remaining(&history(15)), 0);
    }

    #[test]
    fn zero_ceiling_is_always_terminal() {
        let gate = SessionGate::new(&Exercise::builtin(), 0);
        assert!(gate.evaluate(&[], ExerciseMode::Standard).is_terminal());
    }
}
