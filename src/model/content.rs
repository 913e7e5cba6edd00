//! Sections and the content units they hold.

use crate::model::{InflectionBlock, Link};

/// Body of a section: a ranked definition list, a sequence of loose
/// units, or nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(feature = "cli", serde(tag = "type", content = "units", rename_all = "snake_case"))]
pub enum Content {
    Definitions(Vec<Definition>),
    Items(Vec<ContentUnit>),
    #[default]
    Empty,
}

impl Content {
    pub fn is_empty(&self) -> bool {
        match self {
            Content::Definitions(defs) => defs.is_empty(),
            Content::Items(units) => units.is_empty(),
            Content::Empty => true,
        }
    }

    pub fn definitions(&self) -> &[Definition] {
        match self {
            Content::Definitions(defs) => defs,
            _ => &[],
        }
    }

    pub fn units(&self) -> &[ContentUnit] {
        match self {
            Content::Items(units) => units,
            _ => &[],
        }
    }
}

/// A loose unit of section content.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(feature = "cli", serde(tag = "type", rename_all = "snake_case"))]
pub enum ContentUnit {
    Item(Item),
    Inflections(InflectionBlock),
}

/// A paragraph or list entry, reduced to its text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Item {
    pub text: String,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Vec::is_empty"))]
    pub links: Vec<Link>,
}

/// A heading-scoped part of an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Section {
    pub heading: String,
    pub content: Content,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Vec::is_empty"))]
    pub subsections: Vec<Section>,
}

/// One sense of a term.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Definition {
    /// 1-based position within its list.
    pub rank: usize,
    pub text: String,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Vec::is_empty"))]
    pub examples: Vec<Example>,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Vec::is_empty"))]
    pub notes: Vec<Note>,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Vec::is_empty"))]
    pub links: Vec<Link>,
}

/// A usage example: the Finnish sentence and its translation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Example {
    pub primary_text: String,
    pub secondary_text: String,
    /// Parenthesized remarks lifted out of the primary sentence.
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub note: Option<String>,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Vec::is_empty"))]
    pub links: Vec<Link>,
}

/// A remark attached to a definition that is not an example.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Note {
    pub text: String,
    /// Left side of an `a = b` remark.
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub primary: Option<String>,
    /// Right side of an `a = b` remark.
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub secondary: Option<String>,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Vec::is_empty"))]
    pub links: Vec<Link>,
}

impl Note {
    pub fn new(text: impl Into<String>, links: Vec<Link>) -> Self {
        let text = text.into();
        let (primary, secondary) = match (text.split('=').next(), text.rsplit('=').next()) {
            (Some(first), Some(last)) if text.contains('=') => {
                (Some(first.trim().to_string()), Some(last.trim().to_string()))
            }
            _ => (None, None),
        };
        Self {
            text,
            primary,
            secondary,
            links,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_equation_split() {
        let note = Note::new("olla jonkin kanssa = to be with something", vec![]);
        assert_eq!(note.primary.as_deref(), Some("olla jonkin kanssa"));
        assert_eq!(note.secondary.as_deref(), Some("to be with something"));
    }

    #[test]
    fn test_note_without_equation() {
        let note = Note::new("Synonym: koira", vec![]);
        assert!(note.primary.is_none());
        assert!(note.secondary.is_none());
        assert_eq!(note.text, "Synonym: koira");
    }

    #[test]
    fn test_content_accessors() {
        assert!(Content::Empty.is_empty());
        assert!(Content::Items(vec![]).is_empty());
        let item = ContentUnit::Item(Item {
            text: "x".into(),
            links: vec![],
        });
        let content = Content::Items(vec![item]);
        assert!(!content.is_empty());
        assert!(content.definitions().is_empty());
        assert_eq!(content.units().len(), 1);
    }
}
