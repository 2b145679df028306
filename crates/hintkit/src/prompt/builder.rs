//! Section-based prompt builder.
//!
//! [`PromptBuilder`] assembles markdown blocks into one prompt string. Empty
//! blocks are dropped along with their separator, so optional content (an
//! empty transcript, say) never leaves a stray divider behind.

/// Builder for multi-section prompts.
///
/// Blocks are joined with a blank line by default; use
/// [`with_separator`](Self::with_separator) for a visible divider.
///
/// # Example
///
/// ```
/// use hintkit::prompt::PromptBuilder;
///
/// let prompt = PromptBuilder::new("# Title")
///     .section("Role", "You are a tutor.")
///     .section_at(3, "Detail", "Keep it short.")
///     .raw("")
///     .build();
///
/// assert_eq!(prompt, "# Title\n\n## Role\n\nYou are a tutor.\n\n### Detail\n\nKeep it short.");
/// ```
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    blocks: Vec<String>,
    separator: String,
}

impl PromptBuilder {
    /// Start with a preamble block, included as-is.
    pub fn new(preamble: impl Into<String>) -> Self {
        Self::empty().raw(preamble)
    }

    /// Start with no preamble.
    pub fn empty() -> Self {
        Self {
            blocks: Vec::new(),
            separator: "\n\n".to_string(),
        }
    }

    /// Text placed between blocks. Default: a blank line.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Append a `## heading` section. Skipped if `content` is empty.
    pub fn section(self, heading: &str, content: impl Into<String>) -> Self {
        self.section_at(2, heading, content)
    }

    /// Append a section with an explicit heading level. Skipped if `content`
    /// is empty.
    pub fn section_at(mut self, level: u8, heading: &str, content: impl Into<String>) -> Self {
        let content = content.into();
        if !content.is_empty() {
            let prefix = "#".repeat(level as usize);
            self.blocks.push(format!("{prefix} {heading}\n\n{content}"));
        }
        self
    }

    /// Append raw text without a heading. Skipped if empty.
    pub fn raw(mut self, content: impl Into<String>) -> Self {
        let content = content.into();
        if !content.is_empty() {
            self.blocks.push(content);
        }
        self
    }

    pub fn build(self) -> String {
        self.blocks.join(&self.separator)
    }
}
