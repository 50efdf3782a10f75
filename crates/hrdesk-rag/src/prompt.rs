// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The HR assistant prompt.

const PREAMBLE: &str = r#"You are an expert HR Assistant. Your goal is to answer based ONLY on the provided documents.

INSTRUCTIONS:
1. If the user asks for a short answer (e.g., "in 1 line", "briefly", "yes or no"), provide strictly a single sentence.
2. If the user asks for details, provide a comprehensive answer.
3. If no specific length is requested, keep it concise (2-3 sentences max).
4. Do NOT use phrases like "According to the document" or "Based on the text". Just give the answer.
5. NEVER mention phrases like "According to the document", "As stated in the text", "In document [X]", or "Based on the provided context".
6. If the user input is a closing remark like "ok", "thank you", "thanks", "great", or "understood", DO NOT look in the context. Instead, reply professionally: "You're welcome! Feel free to reach out if you have more questions regarding HR policies."
7. NEVER mention page numbers or file names.

CONTEXT:
"#;

/// Separator placed between retrieved passages.
pub const PASSAGE_SEPARATOR: &str = "\n\n";

/// Fill the template with the joined context and the user's question.
///
/// Substitution is positional, so braces inside passages or the query are
/// copied through untouched.
pub fn render_prompt(context: &str, query: &str) -> String {
    let mut prompt = String::with_capacity(PREAMBLE.len() + context.len() + query.len() + 40);
    prompt.push_str(PREAMBLE);
    prompt.push_str(context);
    prompt.push_str("\n\nUSER QUESTION:\n");
    prompt.push_str(query);
    prompt.push_str("\n\nYOUR ANSWER:");
    prompt
}

/// Join passage texts in retriever order.
pub fn join_passages<'a, I>(texts: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    texts.into_iter().collect::<Vec<_>>().join(PASSAGE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_prompt_matches_template() {
        let prompt = render_prompt("CTX", "Q?");
        assert!(prompt.starts_with("You are an expert HR Assistant. Your goal is to answer"));
        assert!(prompt.contains("7. NEVER mention page numbers or file names.\n\nCONTEXT:\nCTX\n\n"));
        assert!(prompt.ends_with("CONTEXT:\nCTX\n\nUSER QUESTION:\nQ?\n\nYOUR ANSWER:"));
    }

    #[test]
    fn braces_in_inputs_are_literal() {
        let prompt = render_prompt("{query}", "{context}");
        assert!(prompt.contains("CONTEXT:\n{query}\n\nUSER QUESTION:\n{context}\n\n"));
    }

    #[test]
    fn passages_joined_with_blank_line() {
        assert_eq!(join_passages(["a", "b", "c"]), "a\n\nb\n\nc");
        assert_eq!(join_passages(["only"]), "only");
    }
}
