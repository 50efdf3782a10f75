// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Retrieval-augmented answers over the HR policy knowledge base.
//!
//! [`ResponseGenerator`] retrieves passages for a query, fills the assistant
//! prompt, invokes the language model and strips reasoning blocks from its
//! output. Missing knowledge base and out-of-domain queries short-circuit to
//! fixed strings.

pub mod generator;
pub mod prompt;
pub mod sanitize;

pub use generator::{
    Answer, AnswerKind, KNOWLEDGE_BASE_UNAVAILABLE, OUT_OF_DOMAIN, ResponseGenerator,
};
pub use prompt::render_prompt;
pub use sanitize::strip_reasoning;
