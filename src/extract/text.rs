//! Text normalization helpers.

use crate::dom::{ArenaDom, ArenaNodeId};

/// Collapse runs of whitespace (newlines included) to one space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Text of a subtree with whitespace collapsed.
pub fn normalized_text(dom: &ArenaDom, id: ArenaNodeId) -> String {
    collapse_whitespace(&dom.text_content(id))
}

/// Text of a subtree, trimmed.
pub fn trimmed_text(dom: &ArenaDom, id: ArenaNodeId) -> String {
    dom.text_content(id).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse() {
        assert_eq!(collapse_whitespace("  a\r\n  b\tc  "), "a b c");
        assert_eq!(collapse_whitespace("\n\n"), "");
    }
}
