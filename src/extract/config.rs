//! Extraction settings.

use crate::section::HeadingTag;

/// Which Wiktionary edition a page comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum, serde::Serialize))]
#[cfg_attr(feature = "cli", serde(rename_all = "lowercase"))]
pub enum Dialect {
    /// en.wiktionary.org
    #[default]
    #[cfg_attr(feature = "cli", value(name = "en"))]
    English,
    /// fi.wiktionary.org
    #[cfg_attr(feature = "cli", value(name = "fi"))]
    Finnish,
}

impl Dialect {
    /// Wiki language code used in page URLs.
    pub fn code(self) -> &'static str {
        match self {
            Dialect::English => "en",
            Dialect::Finnish => "fi",
        }
    }

    /// Label of the `h2` headline scoping the Finnish term.
    pub fn marker(self) -> &'static str {
        match self {
            Dialect::English => "Finnish",
            Dialect::Finnish => "Suomi",
        }
    }

    /// Headings that structure a language section.
    pub fn heading_tags(self) -> &'static [HeadingTag] {
        &[HeadingTag::H3, HeadingTag::H4, HeadingTag::H5]
    }

    /// Heading level of an entry.
    pub fn entry_level(self) -> u8 {
        HeadingTag::H3.level()
    }
}

/// How category headings map to entries on en pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum EntryLayout {
    /// One entry per level-3 heading.
    #[default]
    #[cfg_attr(feature = "cli", value(name = "entry"))]
    EntryLevel,
    /// Pages with several etymologies put categories one level deeper;
    /// level-4 sections holding definitions become entries of their own.
    #[cfg_attr(feature = "cli", value(name = "section"))]
    SectionLevel,
}

/// Keep only the lines of one section that start with a prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationFilter {
    pub heading: String,
    pub prefix: String,
}

impl TranslationFilter {
    pub fn new(heading: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            prefix: prefix.into(),
        }
    }

    pub fn applies_to(&self, heading: &str) -> bool {
        self.heading == heading
    }

    pub fn keeps(&self, text: &str) -> bool {
        text.starts_with(&self.prefix)
    }
}

/// Configuration for [`Extractor`](super::Extractor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    pub dialect: Dialect,
    /// Overrides the dialect's headline label.
    pub language_marker: Option<String>,
    pub entry_layout: EntryLayout,
    pub translation_filter: Option<TranslationFilter>,
    /// Classes of sibling `div`s ignored under the headline.
    pub skipped_classes: Vec<String>,
}

impl ExtractorConfig {
    pub fn english() -> Self {
        Self {
            dialect: Dialect::English,
            language_marker: None,
            entry_layout: EntryLayout::EntryLevel,
            translation_filter: None,
            skipped_classes: vec!["sister-wikipedia".into(), "sister-project".into()],
        }
    }

    pub fn finnish() -> Self {
        Self {
            dialect: Dialect::Finnish,
            language_marker: None,
            entry_layout: EntryLayout::EntryLevel,
            translation_filter: Some(TranslationFilter::new("Käännökset", "englanti:")),
            skipped_classes: Vec::new(),
        }
    }

    pub fn for_dialect(dialect: Dialect) -> Self {
        match dialect {
            Dialect::English => Self::english(),
            Dialect::Finnish => Self::finnish(),
        }
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.language_marker = Some(marker.into());
        self
    }

    pub fn with_layout(mut self, layout: EntryLayout) -> Self {
        self.entry_layout = layout;
        self
    }

    pub fn marker(&self) -> &str {
        self.language_marker
            .as_deref()
            .unwrap_or(self.dialect.marker())
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self::english()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_per_dialect() {
        let en = ExtractorConfig::default();
        assert_eq!(en.marker(), "Finnish");
        assert!(en.translation_filter.is_none());
        assert!(en.skipped_classes.contains(&"sister-wikipedia".to_string()));

        let fi = ExtractorConfig::finnish();
        assert_eq!(fi.marker(), "Suomi");
        let filter = fi.translation_filter.unwrap();
        assert!(filter.applies_to("Käännökset"));
        assert!(filter.keeps("englanti: house"));
        assert!(!filter.keeps("ruotsi: hus"));
    }

    #[test]
    fn test_marker_override() {
        let config = ExtractorConfig::english().with_marker("Ingrian");
        assert_eq!(config.marker(), "Ingrian");
        assert_eq!(config.dialect.code(), "en");
    }
}
