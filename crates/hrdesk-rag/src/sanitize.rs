// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-processing of raw model output.

use std::sync::LazyLock;

use regex::Regex;

// Non-greedy and dot-matches-newline so each block is removed on its own.
static THINK_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<think>.*?</think>").unwrap());

/// Remove every `<think>...</think>` block and trim the remainder.
pub fn strip_reasoning(raw: &str) -> String {
    THINK_BLOCK.replace_all(raw, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_multiline_block() {
        let raw = "<think>\nplanning\nmore\n</think>\n\n  Leave is 20 days. ";
        assert_eq!(strip_reasoning(raw), "Leave is 20 days.");
    }

    #[test]
    fn removes_each_block_separately() {
        let raw = "<think>a</think>Keep this<think>b</think> and this";
        assert_eq!(strip_reasoning(raw), "Keep this and this");
    }

    #[test]
    fn plain_output_is_only_trimmed() {
        assert_eq!(strip_reasoning("  hello\n"), "hello");
    }

    #[test]
    fn unclosed_block_is_left_alone() {
        assert_eq!(strip_reasoning("<think>never closed"), "<think>never closed");
    }
}
