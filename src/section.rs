//! Heading-driven segmentation of a flat sibling sequence.
//!
//! Wiki pages keep headings and content as siblings; nesting exists only
//! in the heading levels. [`segment`] rebuilds it in one forward pass with
//! an explicit stack of open segments.

use crate::dom::{ArenaDom, ArenaNodeId};

// ============================================================================
// Public Types
// ============================================================================

/// Heading element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeadingTag {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingTag {
    pub const ALL: [HeadingTag; 6] = [
        HeadingTag::H1,
        HeadingTag::H2,
        HeadingTag::H3,
        HeadingTag::H4,
        HeadingTag::H5,
        HeadingTag::H6,
    ];

    /// Heading level (1-6).
    pub fn level(self) -> u8 {
        self as u8 + 1
    }

    pub fn tag(self) -> &'static str {
        match self {
            HeadingTag::H1 => "h1",
            HeadingTag::H2 => "h2",
            HeadingTag::H3 => "h3",
            HeadingTag::H4 => "h4",
            HeadingTag::H5 => "h5",
            HeadingTag::H6 => "h6",
        }
    }

    pub fn of(dom: &ArenaDom, id: ArenaNodeId) -> Option<Self> {
        let tag = dom.tag_name(id)?;
        Self::ALL.into_iter().find(|h| h.tag() == tag)
    }
}

/// A heading together with everything it scopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub heading_node: ArenaNodeId,
    pub level: u8,
    /// Heading text, trimmed.
    pub heading: String,
    /// Non-heading nodes before the first child segment.
    pub body: Vec<ArenaNodeId>,
    /// Segments opened by deeper headings.
    pub children: Vec<Segment>,
}

impl Segment {
    /// Nodes covered by the segment, its heading included.
    pub fn node_count(&self) -> usize {
        1 + self.body.len() + self.children.iter().map(Segment::node_count).sum::<usize>()
    }
}

/// Result of [`segment`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    /// Content before the first heading.
    pub leading: Vec<ArenaNodeId>,
    pub segments: Vec<Segment>,
}

// ============================================================================
// Segmentation
// ============================================================================

/// Partition `nodes` into a heading tree.
///
/// Only elements whose tag is in `heading_tags` open segments; any other
/// heading is ordinary content. The scan stops at the first node for which
/// `boundary` holds.
pub fn segment<I, B>(
    dom: &ArenaDom,
    nodes: I,
    boundary: B,
    heading_tags: &[HeadingTag],
) -> Segmentation
where
    I: IntoIterator<Item = ArenaNodeId>,
    B: Fn(&ArenaDom, ArenaNodeId) -> bool,
{
    let mut result = Segmentation::default();
    let mut open: Vec<Segment> = Vec::new();

    for node in nodes {
        if boundary(dom, node) {
            break;
        }

        let heading = HeadingTag::of(dom, node).filter(|h| heading_tags.contains(h));
        let Some(heading) = heading else {
            match open.last_mut() {
                Some(current) => current.body.push(node),
                None => result.leading.push(node),
            }
            continue;
        };

        let level = heading.level();
        close_to_level(&mut open, &mut result.segments, level);
        open.push(Segment {
            heading_node: node,
            level,
            heading: heading_text(dom, node),
            body: Vec::new(),
            children: Vec::new(),
        });
    }

    close_to_level(&mut open, &mut result.segments, 0);
    result
}

/// Close every open segment at `level` or deeper.
fn close_to_level(open: &mut Vec<Segment>, roots: &mut Vec<Segment>, level: u8) {
    while open.last().is_some_and(|top| top.level >= level) {
        let Some(done) = open.pop() else {
            break;
        };
        match open.last_mut() {
            Some(parent) => parent.children.push(done),
            None => roots.push(done),
        }
    }
}

/// Visible text of a heading.
///
/// Older markup wraps the title in a `span.mw-headline` next to the edit
/// links; then the first element child holds the title.
pub fn heading_text(dom: &ArenaDom, node: ArenaNodeId) -> String {
    let has_own_text = dom
        .children(node)
        .any(|c| dom.text(c).is_some_and(|t| !t.trim().is_empty()));
    let source = match dom.first_element_child(node) {
        Some(child) if !has_own_text => child,
        _ => node,
    };
    dom.text_content(source).trim().to_string()
}
