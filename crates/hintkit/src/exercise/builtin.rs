//! Built-in exercise: `y'' + y = x`, default language Hebrew.

use super::{
    Directive, Exercise, HintGroup, ReferenceTable, TerminalTemplates, TranscriptLabels,
};

const SOLUTION: &str = "\
**Homogeneous equation:** y'' + y = 0

**Characteristic equation:** r² + 1 = 0

**Roots:** r = ±i (complex conjugates)

**Homogeneous solution:** y_h = C₁cos(x) + C₂sin(x)

**For particular solution:**
Try y_p = Ax + B (polynomial form matching the RHS)
y_p' = A
y_p'' = 0

Substituting: 0 + (Ax + B) = x
Comparing: A = 1, B = 0

**Particular solution:** y_p = x

**FINAL GENERAL SOLUTION:**
y = C₁cos(x) + C₂sin(x) + x";

const ROOT_TYPE_TABLE: &str = "\
For equation: ay'' + by' + cy = 0
Characteristic equation: ar² + br + c = 0

| Root Type | Basic Solutions |
|-----------|----------------|
| r₁, r₂ real and distinct | y₁ = e^(r₁x), y₂ = e^(r₂x) |
| r₁ = r₂ (repeated root) | y₁ = e^(r₁x), y₂ = xe^(r₁x) |
| r = α ± iβ (complex, β≠0) | y₁ = e^(αx)cos(βx), y₂ = e^(αx)sin(βx) |";

const TRIAL_FORM_TABLE: &str = "\
For y'' + y = g(x):

| g(x) | Form of y_p |
|------|-------------|
| Polynomial degree n | Polynomial degree n |
| e^(ax) | Ae^(ax) |
| sin(bx) or cos(bx) | A·cos(bx) + B·sin(bx) |";

const TRAINING_TEMPLATE: &str = "\
הסתיימה מכסת {ceiling} ניסיונות... זהו תרגיל אימון ולהלן שלד הפתרון

המשוואה: y'' + y = x

פתרון המשוואה ההומוגנית:
y'' + y = 0
משוואה אופיינית: r² + 1 = 0
שורשים: r = ±i
פתרון הומוגני: y_h = C₁cos(x) + C₂sin(x)

מציאת פתרון פרטי:
ננסה y_p = Ax + B
y_p' = A, y_p'' = 0
הצבה: 0 + (Ax + B) = x
מכאן: A = 1, B = 0
פתרון פרטי: y_p = x

הפתרון הכללי: y = C₁cos(x) + C₂sin(x) + x";

const COOLDOWN_TEMPLATE: &str = "הסתיימה מכסת {ceiling} ניסיונות... ניתן להמשיך בעוד 24 שעות";

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

pub(super) fn ode_exercise() -> Exercise {
    Exercise {
        title: "Exercise 6".into(),
        equation: "y'' + y = x".into(),
        classification:
            "This is a second-order linear non-homogeneous ODE with constant coefficients.".into(),
        method: "Homogeneous solution + Particular solution (Method of Undetermined Coefficients)"
            .into(),
        solution: SOLUTION.into(),
        primary_language: "Hebrew".into(),
        directive: Directive {
            focus: "SPECIFIC FOR SECOND ORDER NON-HOMOGENEOUS ODEs".into(),
            repeated_hint: "find the homogeneous solution first".into(),
            milestones: lines(&[
                "Mention the characteristic equation r² + 1 = 0",
                "Show that roots are r = ±i (complex)",
                "Explain the form for complex roots: C₁cos(x) + C₂sin(x)",
                "Suggest trying y_p = Ax + B for particular solution",
            ]),
        },
        forbidden: lines(&[
            "The complete final answer",
            "All coefficients A and B directly",
            "The complete homogeneous and particular solutions together",
        ]),
        allowed_when: "After 2-3 unsuccessful attempts OR when student explicitly asks for a hint:"
            .into(),
        allowed: vec![
            HintGroup {
                title: "For Homogeneous Part".into(),
                hints: lines(&[
                    "Can mention: \"Solve the characteristic equation r² + 1 = 0\"",
                    "Can mention: \"The roots are complex: r = ±i\"",
                    "Can mention: \"For complex roots α ± iβ, use e^(αx)(C₁cos(βx) + C₂sin(βx))\"",
                    "Can mention: \"Here α = 0 and β = 1\"",
                ]),
            },
            HintGroup {
                title: "For Particular Part".into(),
                hints: lines(&[
                    "Can mention: \"Since the RHS is x (polynomial), try a polynomial\"",
                    "Can mention: \"Try y_p = Ax + B\"",
                    "Can mention: \"Substitute and compare coefficients\"",
                    "Can show the substitution setup (but not solve it)",
                ]),
            },
        ],
        reference_tables: vec![
            ReferenceTable {
                title: "Table: Homogeneous Solutions by Root Type".into(),
                body: ROOT_TYPE_TABLE.into(),
            },
            ReferenceTable {
                title: "Method of Undetermined Coefficients".into(),
                body: TRIAL_FORM_TABLE.into(),
            },
        ],
        incorrect_answer_steps: lines(&[
            "Identify what's wrong (y_h, y_p, or both)",
            "Provide a SHORT, TARGETED hint based on what's missing",
            "NEVER repeat the same hint - vary your approach each time",
            "Use the reference tables and solution steps provided above to guide progressively",
        ]),
        labels: TranscriptLabels {
            student: "תשובת סטודנט".into(),
            tutor: "תגובת מורה".into(),
            current: "תשובת הסטודנט כעת".into(),
        },
        terminal: TerminalTemplates {
            training: TRAINING_TEMPLATE.into(),
            cooldown: COOLDOWN_TEMPLATE.into(),
        },
        service_error: "שגיאה בעיבוד הבקשה".into(),
    }
}
