//! Prompt assembly: builder, the four prompt blocks, and the policy document.
//!
//! - [`PromptBuilder`]: low-level builder that joins markdown blocks and
//!   drops empty ones.
//! - [`PromptComposer`]: assembles directive, transcript, current turn and
//!   policy for one [`HintRequest`](crate::HintRequest).
//! - [`policy_block`]: renders the pedagogy and content policy for an
//!   [`Exercise`](crate::Exercise).

pub mod builder;
pub mod composer;
pub mod policy;

pub use builder::PromptBuilder;
pub use composer::{
    BLOCK_DIVIDER, PromptComposer, current_turn_block, directive_block, transcript_block,
};
pub use policy::policy_block;
