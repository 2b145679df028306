//! The pedagogy and content policy document.
//!
//! This is the last and largest prompt block. It carries the complete
//! solution so the model can judge answers, together with the rules that keep
//! it from revealing that solution: the forbidden list, the allowed
//! milestone hints, and the reference tables. The "after N attempts" section
//! embeds the session gate's terminal text verbatim.

use super::builder::PromptBuilder;
use crate::exercise::Exercise;

const IMPORTANT_GUIDELINES: &[&str] = &[
    "These are GUIDELINES, not rigid scripts",
    "Use your own intelligence and teaching expertise",
    "Adapt responses based on conversation context",
    "Don't repeat yourself - vary your hints and explanations",
    "Be creative in helping students understand",
    "USE all the reference tables and solution steps provided above",
    "The specific hints listed are SUGGESTIONS - use them when appropriate based on YOUR judgment",
    "Vary your teaching approach - don't give the same hint twice",
    "Draw from the complete solution information to guide students progressively",
];

const STUCK_STRATEGY: &str =
    "Ask where they're having difficulty, then provide targeted guidance.";

fn bullets<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn numbered<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn role(exercise: &Exercise) -> String {
    format!(
        "You are a mathematics tutor helping students solve this specific differential equation:\n**{}**",
        exercise.equation
    )
}

fn style_rules(exercise: &Exercise, ceiling: usize) -> String {
    let language = exercise.primary_language.to_uppercase();
    bullets(&[
        format!(
            "Default to {language}, but immediately adapt to any other language the student uses or explicitly requests - student's language preference always overrides the default"
        ),
        "Keep responses SHORT (1-3 sentences maximum)".to_string(),
        "NO greetings or pleasantries (no \"Hello\", \"Hi\", \"Good luck\", etc.)".to_string(),
        "Be DIRECT and CONCISE".to_string(),
        "Use gender-neutral language in ALL languages (use infinitives, plural forms, or other neutral constructions appropriate to the language - avoid gendered imperatives or forms that assume student's gender)".to_string(),
        format!(
            "Respond to any student request EXCEPT: never give the final answer before {ceiling} total attempts (or as defined in the exercise mode)"
        ),
        "Use mathematical notation when appropriate".to_string(),
        "Focus ONLY on the mathematical content".to_string(),
    ])
}

fn problem(exercise: &Exercise) -> String {
    format!(
        "Students must solve: **{}**\n\n{}\nSolution method: {}",
        exercise.equation, exercise.classification, exercise.method
    )
}

fn hint_rules(exercise: &Exercise) -> String {
    let allowed_groups = exercise
        .allowed
        .iter()
        .map(|group| format!("**{}:**\n{}", group.title, bullets(&group.hints)))
        .collect::<Vec<_>>()
        .join("\n\n");

    let allowed = PromptBuilder::new(exercise.allowed_when.clone())
        .raw(allowed_groups)
        .build();

    PromptBuilder::empty()
        .section_at(3, "FORBIDDEN - Never Give:", bullets(&exercise.forbidden))
        .section_at(3, "ALLOWED - What You Can Hint:", allowed)
        .build()
}

fn reference_tables(exercise: &Exercise) -> String {
    exercise
        .reference_tables
        .iter()
        .fold(PromptBuilder::empty(), |builder, table| {
            builder.section_at(3, &table.title, table.body.clone())
        })
        .build()
}

fn response_strategy(exercise: &Exercise, ceiling: usize, terminal_text: &str) -> String {
    PromptBuilder::empty()
        .section_at(
            3,
            "When Student Gives Correct Answer:",
            format!("Confirm briefly in {}.", exercise.primary_language),
        )
        .section_at(
            3,
            "When Student Gives Incorrect Answer:",
            numbered(&exercise.incorrect_answer_steps),
        )
        .section_at(3, "When Student is Stuck:", STUCK_STRATEGY)
        .section_at(
            3,
            &format!("After {ceiling} Total Attempts:"),
            terminal_text,
        )
        .build()
}

/// Render the policy document for `exercise`.
///
/// `terminal_text` must be the session gate's text for the request's mode.
pub fn policy_block(exercise: &Exercise, ceiling: usize, terminal_text: &str) -> String {
    PromptBuilder::new(format!(
        "# Digital Friend - Gemini Instructions for {}",
        exercise.title
    ))
    .section("Your Role", role(exercise))
    .section("Response Style Rules", style_rules(exercise, ceiling))
    .section("The Problem", problem(exercise))
    .section("The Complete Correct Solution", exercise.solution.clone())
    .section("Hint Rules", hint_rules(exercise))
    .section(
        "Reference Tables (ALWAYS OK to provide)",
        reference_tables(exercise),
    )
    .section(
        "Response Strategy",
        response_strategy(exercise, ceiling, terminal_text),
    )
    .section("IMPORTANT", bullets(IMPORTANT_GUIDELINES))
    .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render() -> String {
        policy_block(&Exercise::builtin(), 10, "TERMINAL-TEXT")
    }

    fn position(haystack: &str, needle: &str) -> usize {
        haystack
            .find(needle)
            .unwrap_or_else(|| panic!("missing {needle:?}"))
    }

    #[test]
    fn sections_appear_in_order() {
        let policy = render();
        let headings = [
            "# Digital Friend - Gemini Instructions for Exercise 6",
            "## Your Role",
            "## Response Style Rules",
            "## The Problem",
            "## The Complete Correct Solution",
            "## Hint Rules",
            "### FORBIDDEN - Never Give:",
            "### ALLOWED - What You Can Hint:",
            "## Reference Tables (ALWAYS OK to provide)",
            "### Table: Homogeneous Solutions by Root Type",
            "### Method of Undetermined Coefficients",
            "## Response Strategy",
            "### After 10 Total Attempts:",
            "## IMPORTANT",
        ];
        let positions: Vec<usize> = headings.iter().map(|h| position(&policy, h)).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    }

    #[test]
    fn language_rule_lets_student_override() {
        let policy = render();
        assert!(policy.contains("Default to HEBREW"));
        assert!(policy.contains("student's language preference always overrides the default"));
        assert!(policy.contains("Confirm briefly in Hebrew."));
    }

    #[test]
    fn ceiling_is_templated() {
        let policy = policy_block(&Exercise::builtin(), 4, "T");
        assert!(policy.contains("never give the final answer before 4 total attempts"));
        assert!(policy.contains("### After 4 Total Attempts:\n\nT"));
    }

    #[test]
    fn contains_solution_and_disclosure_lists() {
        let policy = render();
        assert!(policy.contains("y = C₁cos(x) + C₂sin(x) + x"));
        assert!(policy.contains("- All coefficients A and B directly"));
        assert!(policy.contains("**For Homogeneous Part:**\n- Can mention: \"Solve the characteristic equation r² + 1 = 0\""));
        assert!(policy.contains("**For Particular Part:**"));
        assert!(policy.contains("| r = α ± iβ (complex, β≠0) |"));
        assert!(policy.contains("| e^(ax) | Ae^(ax) |"));
    }

    #[test]
    fn terminal_text_is_embedded_verbatim() {
        let policy = render();
        assert!(policy.contains("TERMINAL-TEXT"));
    }

    #[test]
    fn incorrect_answer_steps_are_numbered() {
        let policy = render();
        assert!(policy.contains("1. Identify what's wrong (y_h, y_p, or both)"));
        assert!(policy.contains("4. Use the reference tables"));
    }
}
