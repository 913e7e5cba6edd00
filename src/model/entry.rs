//! Entries and the per-page result.

use crate::diagnostics::Diagnostics;
use crate::model::{Content, ContentUnit, InflectionBlock, InflectionPage, Link, Morpheme, Section};

/// A top-level section bound to a lexical category ("Noun", "verbi").
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Entry {
    pub heading: String,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub category: Option<String>,
    /// Bolded lemma of the word paragraph.
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub headword: Option<String>,
    /// Rest of the word paragraph: inflection class, gradation, etc.
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub info: Option<String>,
    pub content: Content,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Vec::is_empty"))]
    pub sections: Vec<Section>,
    /// Tables gathered from anywhere in the entry's scope.
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Vec::is_empty"))]
    pub inflections: Vec<InflectionBlock>,
    /// Separate conjugation page linked from the entry.
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub conjugation_page: Option<String>,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Vec::is_empty"))]
    pub links: Vec<Link>,
}

impl Entry {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            category: None,
            headword: None,
            info: None,
            content: Content::Empty,
            sections: Vec::new(),
            inflections: Vec::new(),
            conjugation_page: None,
            links: Vec::new(),
        }
    }

    /// Every morpheme of the entry, wherever its table sat.
    pub fn morphemes(&self) -> Vec<&Morpheme> {
        let mut out = Vec::new();
        collect_content(&self.content, &mut out);
        let mut pending: Vec<&Section> = self.sections.iter().collect();
        while let Some(section) = pending.pop() {
            collect_content(&section.content, &mut out);
            pending.extend(section.subsections.iter());
        }
        out.extend(self.inflections.iter().flat_map(|b| b.morphemes.iter()));
        out
    }

    pub fn section(&self, heading: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.heading == heading)
    }
}

fn collect_content<'a>(content: &'a Content, out: &mut Vec<&'a Morpheme>) {
    for unit in content.units() {
        if let ContentUnit::Inflections(block) = unit {
            out.extend(block.morphemes.iter());
        }
    }
}

/// Everything extracted from one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct PageResult {
    pub term: String,
    /// Message of a substituted error page.
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub error: Option<String>,
    pub entries: Vec<Entry>,
    /// Nodes under the language headline not covered by any entry.
    pub orphans: usize,
    pub diagnostics: Diagnostics,
}

impl PageResult {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &crate::Diagnostic> {
        self.diagnostics.warnings()
    }

    /// Merge the result of another page about the same term.
    pub fn combine(mut self, other: PageResult) -> PageResult {
        if self.term.is_empty() {
            self.term = other.term;
        }
        self.error = self.error.or(other.error);
        self.entries.extend(other.entries);
        self.orphans += other.orphans;
        self.diagnostics.extend(other.diagnostics);
        self
    }

    /// Attach the tables of a conjugation page to the entry linking to it.
    ///
    /// Returns `false` when no entry carries a conjugation link.
    pub fn attach_conjugation_page(&mut self, page: InflectionPage) -> bool {
        let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.conjugation_page.is_some())
        else {
            self.diagnostics.extend(page.diagnostics);
            return false;
        };
        entry.inflections.extend(page.blocks);
        self.diagnostics.extend(page.diagnostics);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Item, TableShape};

    fn block(form: &str) -> InflectionBlock {
        InflectionBlock {
            shape: TableShape::Declension,
            morphemes: vec![Morpheme::new(form, vec!["nominative".into()])],
        }
    }

    #[test]
    fn test_morphemes_walks_sections() {
        let mut entry = Entry::new("Noun");
        entry.sections.push(Section {
            heading: "Declension".into(),
            content: Content::Items(vec![
                ContentUnit::Item(Item {
                    text: "x".into(),
                    links: vec![],
                }),
                ContentUnit::Inflections(block("talo")),
            ]),
            subsections: vec![Section {
                heading: "Inner".into(),
                content: Content::Items(vec![ContentUnit::Inflections(block("talot"))]),
                subsections: vec![],
            }],
        });
        entry.inflections.push(block("talon"));

        let mut forms: Vec<_> = entry
            .morphemes()
            .into_iter()
            .map(|m| m.surface_form.as_str())
            .collect();
        forms.sort_unstable();
        assert_eq!(forms, vec!["talo", "talon", "talot"]);
    }

    #[test]
    fn test_combine_keeps_first_term() {
        let mut fi = PageResult {
            term: "talo".into(),
            ..Default::default()
        };
        fi.entries.push(Entry::new("substantiivi"));
        fi.diagnostics.warn("a");
        let mut en = PageResult {
            term: "talo".into(),
            orphans: 2,
            ..Default::default()
        };
        en.entries.push(Entry::new("Noun"));

        let merged = fi.combine(en);
        assert_eq!(merged.term, "talo");
        assert_eq!(merged.entries.len(), 2);
        assert_eq!(merged.orphans, 2);
        assert_eq!(merged.diagnostics.len(), 1);
    }

    #[test]
    fn test_attach_conjugation_page() {
        let mut result = PageResult::default();
        result.entries.push(Entry::new("substantiivi"));
        let mut verb = Entry::new("verbi");
        verb.conjugation_page = Some("https://fi.wiktionary.org/wiki/x".into());
        result.entries.push(verb);

        let page = InflectionPage {
            blocks: vec![block("sanon")],
            diagnostics: Diagnostics::new(),
        };
        assert!(result.attach_conjugation_page(page));
        assert_eq!(result.entries[1].inflections.len(), 1);
        assert!(result.entries[0].inflections.is_empty());
    }

    #[test]
    fn test_attach_without_link() {
        let mut result = PageResult::default();
        result.entries.push(Entry::new("Noun"));
        assert!(!result.attach_conjugation_page(InflectionPage::default()));
    }
}
