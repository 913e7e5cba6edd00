//! Usage examples under a definition.
//!
//! An example is a `dd` pairing a Finnish sentence with its translation.
//! Editors lay the pair out in one of three ways; [`ExampleShape::detect`]
//! tries them most specific first.

use crate::dom::{ArenaDom, ArenaNodeId};
use crate::error::ExampleError;
use crate::extract::text::collapse_whitespace;
use crate::model::{Example, Link, collect_links, merge_links};

/// Known example layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExampleShape {
    /// `<dd><i>primary</i> … <dl><dd>secondary</dd></dl></dd>`
    Emphasized,
    /// `<dd><ul><li>primary<ul><li>secondary</li></ul></li></ul></dd>`
    NestedList,
    /// `<dd>primary<dl><dd>secondary</dd></dl></dd>`
    Plain,
}

/// Where the primary sentence lives.
enum Primary {
    /// The whole subtree of a node.
    Node(ArenaNodeId),
    /// A node minus one of its children.
    Without {
        container: ArenaNodeId,
        excluded: ArenaNodeId,
    },
}

struct Located {
    shape: ExampleShape,
    primary: Primary,
    secondary: ArenaNodeId,
}

impl ExampleShape {
    pub const ORDER: [ExampleShape; 3] = [
        ExampleShape::Emphasized,
        ExampleShape::NestedList,
        ExampleShape::Plain,
    ];

    /// First shape `dd` matches, if any.
    pub fn detect(dom: &ArenaDom, dd: ArenaNodeId) -> Option<Self> {
        locate(dom, dd).map(|found| found.shape)
    }

    fn locate(self, dom: &ArenaDom, dd: ArenaNodeId) -> Option<Located> {
        match self {
            ExampleShape::Emphasized => {
                let first = dom.first_element_child(dd)?;
                if !dom.is_tag(first, "i") {
                    return None;
                }
                let secondary = dom
                    .following_elements(first)
                    .filter(|&n| dom.is_tag(n, "dl"))
                    .find_map(|dl| first_dd(dom, dl))?;
                Some(Located {
                    shape: self,
                    primary: Primary::Node(first),
                    secondary,
                })
            }
            ExampleShape::NestedList => {
                if has_own_text(dom, dd) {
                    return None;
                }
                let mut children = dom.element_children(dd);
                let (Some(ul), None) = (children.next(), children.next()) else {
                    return None;
                };
                if !dom.is_tag(ul, "ul") {
                    return None;
                }
                let li = dom.first_element_child(ul).filter(|&n| dom.is_tag(n, "li"))?;
                let inner = dom.element_children(li).find(|&n| dom.is_tag(n, "ul"))?;
                let secondary = dom
                    .first_element_child(inner)
                    .filter(|&n| dom.is_tag(n, "li"))?;
                Some(Located {
                    shape: self,
                    primary: Primary::Without {
                        container: li,
                        excluded: inner,
                    },
                    secondary,
                })
            }
            ExampleShape::Plain => {
                let dl = dom.last_element_child(dd).filter(|&n| dom.is_tag(n, "dl"))?;
                let secondary = first_dd(dom, dl)?;
                let has_content_before = dom
                    .children(dd)
                    .take_while(|&n| n != dl)
                    .any(|n| !dom.is_blank(n));
                if !has_content_before {
                    return None;
                }
                Some(Located {
                    shape: self,
                    primary: Primary::Without {
                        container: dd,
                        excluded: dl,
                    },
                    secondary,
                })
            }
        }
    }
}

fn locate(dom: &ArenaDom, dd: ArenaNodeId) -> Option<Located> {
    if !dom.is_tag(dd, "dd") {
        return None;
    }
    ExampleShape::ORDER
        .into_iter()
        .find_map(|shape| shape.locate(dom, dd))
}

fn first_dd(dom: &ArenaDom, dl: ArenaNodeId) -> Option<ArenaNodeId> {
    dom.first_element_child(dl).filter(|&n| dom.is_tag(n, "dd"))
}

fn has_own_text(dom: &ArenaDom, node: ArenaNodeId) -> bool {
    dom.children(node)
        .any(|c| dom.text(c).is_some_and(|t| !t.trim().is_empty()))
}

/// Text and links of the primary sentence.
fn primary_text(dom: &ArenaDom, primary: &Primary) -> (String, Vec<Link>) {
    match *primary {
        Primary::Node(node) => (
            collapse_whitespace(&dom.text_content(node)),
            collect_links(dom, node),
        ),
        Primary::Without {
            container,
            excluded,
        } => {
            let position = dom.children(container).position(|c| c == excluded);
            let (mut copy, root) = dom.clone_subtree(container);
            if let Some(copied) = position.and_then(|i| copy.children(root).nth(i)) {
                copy.detach(copied);
            }
            (
                collapse_whitespace(&copy.text_content(root)),
                collect_links(&copy, root),
            )
        }
    }
}

/// Parse one example `dd`.
pub fn parse_example(dom: &ArenaDom, dd: ArenaNodeId) -> Result<Example, ExampleError> {
    let Some(found) = locate(dom, dd) else {
        return Err(ExampleError::UnknownShape {
            fragment: dom.outer_html(dd),
        });
    };

    let (primary, mut links) = primary_text(dom, &found.primary);
    let split = bracket_split(&primary);
    if split.plain.is_empty() {
        return Err(ExampleError::EmptyText {
            fragment: dom.outer_html(dd),
        });
    }

    merge_links(&mut links, collect_links(dom, found.secondary));
    let annotations = split.annotations();

    Ok(Example {
        primary_text: split.plain,
        secondary_text: collapse_whitespace(&dom.text_content(found.secondary)),
        note: (!annotations.is_empty()).then_some(annotations),
        links,
    })
}

// ============================================================================
// Bracket splitting
// ============================================================================

/// A parenthesized remark lifted out of a sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketNote {
    /// Character offset into the plain text where the remark stood.
    pub offset: usize,
    /// The remark, parentheses included.
    pub text: String,
}

/// A sentence with its parenthesized remarks taken out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BracketSplit {
    pub plain: String,
    pub notes: Vec<BracketNote>,
}

impl BracketSplit {
    /// Remarks rendered as `[offset](text)`, joined by `|`.
    pub fn annotations(&self) -> String {
        self.notes
            .iter()
            .map(|note| format!("[{}]{}", note.offset, note.text))
            .collect::<Vec<_>>()
            .join("|")
    }
}

/// Separate the text outside parentheses from the text inside.
///
/// The space before an opening parenthesis is dropped from the plain text.
/// Nested parentheses stay inside the enclosing remark; an unmatched `)`
/// is ordinary text.
pub fn bracket_split(input: &str) -> BracketSplit {
    let mut plain = String::new();
    let mut plain_len = 0;
    let mut notes = Vec::new();
    let mut current = String::new();
    let mut offset = 0;
    let mut depth = 0usize;

    for ch in input.chars() {
        match ch {
            '(' if depth == 0 => {
                offset = plain_len;
                if plain.ends_with(' ') {
                    plain.pop();
                    plain_len -= 1;
                }
                current.push(ch);
                depth = 1;
            }
            '(' => {
                current.push(ch);
                depth += 1;
            }
            ')' if depth > 0 => {
                current.push(ch);
                depth -= 1;
                if depth == 0 {
                    notes.push(BracketNote {
                        offset,
                        text: std::mem::take(&mut current),
                    });
                }
            }
            _ if depth > 0 => current.push(ch),
            _ => {
                plain.push(ch);
                plain_len += 1;
            }
        }
    }

    if !current.is_empty() {
        notes.push(BracketNote {
            offset,
            text: current,
        });
    }

    BracketSplit {
        plain: plain.trim().to_string(),
        notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{parse_html, queries::DESCRIPTION};

    fn first_dd(html: &str) -> (ArenaDom, ArenaNodeId) {
        let dom = parse_html(html);
        let dd = dom.select_first(dom.document(), &DESCRIPTION).unwrap();
        (dom, dd)
    }

    #[test]
    fn test_bracket_split_offsets() {
        let split = bracket_split("Lorum (ipsum) sic (dolor) amet.");
        assert_eq!(split.plain, "Lorum sic amet.");
        assert_eq!(split.annotations(), "[6](ipsum)|[10](dolor)");
    }

    #[test]
    fn test_bracket_split_plain() {
        let split = bracket_split("Koira haukkuu.");
        assert_eq!(split.plain, "Koira haukkuu.");
        assert!(split.notes.is_empty());
        assert_eq!(split.annotations(), "");
    }

    #[test]
    fn test_bracket_split_nested_and_unmatched() {
        let split = bracket_split("a (b (c) d) e) f");
        assert_eq!(split.plain, "a e) f");
        assert_eq!(split.notes.len(), 1);
        assert_eq!(split.notes[0].text, "(b (c) d)");
        assert_eq!(split.notes[0].offset, 2);
    }

    #[test]
    fn test_bracket_split_multibyte_offsets() {
        let split = bracket_split("Hän (ää) söi.");
        assert_eq!(split.plain, "Hän söi.");
        assert_eq!(split.notes[0].offset, 4);
    }

    #[test]
    fn test_emphasized() {
        let (dom, dd) = first_dd(
            r#"<dl><dd><i>Koira <a href="/wiki/haukkua">haukkuu</a>.</i> (colloquial)<dl><dd>The dog barks.</dd></dl></dd></dl>"#,
        );
        assert_eq!(ExampleShape::detect(&dom, dd), Some(ExampleShape::Emphasized));

        let example = parse_example(&dom, dd).unwrap();
        assert_eq!(example.primary_text, "Koira haukkuu.");
        assert_eq!(example.secondary_text, "The dog barks.");
        assert_eq!(example.note, None);
        assert_eq!(example.links.len(), 1);
    }

    #[test]
    fn test_nested_list() {
        let (dom, dd) = first_dd(
            "<dl><dd><ul><li>Talo on (hyvin) iso.<ul><li>The house is big.</li></ul></li></ul></dd></dl>",
        );
        assert_eq!(ExampleShape::detect(&dom, dd), Some(ExampleShape::NestedList));

        let example = parse_example(&dom, dd).unwrap();
        assert_eq!(example.primary_text, "Talo on iso.");
        assert_eq!(example.secondary_text, "The house is big.");
        assert_eq!(example.note.as_deref(), Some("[8](hyvin)"));
    }

    #[test]
    fn test_plain() {
        let (dom, dd) = first_dd("<dl><dd>Sataa lunta.<dl><dd>It is snowing.</dd></dl></dd></dl>");
        assert_eq!(ExampleShape::detect(&dom, dd), Some(ExampleShape::Plain));

        let example = parse_example(&dom, dd).unwrap();
        assert_eq!(example.primary_text, "Sataa lunta.");
        assert_eq!(example.secondary_text, "It is snowing.");
    }

    #[test]
    fn test_emphasized_wins_over_plain() {
        let (dom, dd) = first_dd("<dl><dd><i>Sataa.</i><dl><dd>It rains.</dd></dl></dd></dl>");
        assert_eq!(ExampleShape::detect(&dom, dd), Some(ExampleShape::Emphasized));
    }

    #[test]
    fn test_unknown_shape() {
        let (dom, dd) = first_dd("<dl><dd>Just a remark.</dd></dl>");
        assert_eq!(ExampleShape::detect(&dom, dd), None);
        let err = parse_example(&dom, dd).unwrap_err();
        assert!(matches!(err, ExampleError::UnknownShape { .. }));
        assert!(err.fragment().contains("Just a remark."));
    }

    #[test]
    fn test_empty_primary() {
        let (dom, dd) = first_dd("<dl><dd><i>(huom.)</i><dl><dd>Note.</dd></dl></dd></dl>");
        assert!(matches!(
            parse_example(&dom, dd),
            Err(ExampleError::EmptyText { .. })
        ));
    }
}
