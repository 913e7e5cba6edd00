//! Tagged word forms recovered from inflection tables.

use crate::diagnostics::Diagnostics;
use crate::model::Link;

/// Known inflection table layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(feature = "cli", serde(rename_all = "snake_case"))]
pub enum TableShape {
    /// English-language verb conjugation table.
    Conjugation,
    /// English-language noun/adjective declension table.
    Declension,
    /// English-language personal pronoun table (nested inside a wrapper table).
    PronounDeclension,
    /// Finnish-language declension table.
    FiDeclension,
    /// Finnish-language finite conjugation table, one per mood.
    FiConjugation,
    /// Finnish-language infinitive and participle table.
    FiVerbid,
}

/// One word form with its morphological attributes.
///
/// Attribute order is part of the contract: it is the order the table
/// shape defines (for example `[person, valence, tense, mood]`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Morpheme {
    pub surface_form: String,
    pub attributes: Vec<String>,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Vec::is_empty"))]
    pub links: Vec<Link>,
}

impl Morpheme {
    pub fn new(surface_form: impl Into<String>, attributes: Vec<String>) -> Self {
        Self {
            surface_form: surface_form.into(),
            attributes,
            links: Vec::new(),
        }
    }

    pub fn has_attribute(&self, attribute: &str) -> bool {
        self.attributes.iter().any(|a| a == attribute)
    }
}

/// Morphemes of one table, as embedded in an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct InflectionBlock {
    pub shape: TableShape,
    pub morphemes: Vec<Morpheme>,
}

/// Result of tagging one table on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InflectionSet {
    pub shape: TableShape,
    pub morphemes: Vec<Morpheme>,
    pub diagnostics: Diagnostics,
}

impl InflectionSet {
    /// Split off the diagnostics, keeping the block.
    pub fn into_parts(self) -> (InflectionBlock, Diagnostics) {
        (
            InflectionBlock {
                shape: self.shape,
                morphemes: self.morphemes,
            },
            self.diagnostics,
        )
    }
}

/// All tables of a separate conjugation page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct InflectionPage {
    pub blocks: Vec<InflectionBlock>,
    pub diagnostics: Diagnostics,
}

impl InflectionPage {
    pub fn morphemes(&self) -> impl Iterator<Item = &Morpheme> {
        self.blocks.iter().flat_map(|b| b.morphemes.iter())
    }
}
