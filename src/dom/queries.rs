//! Selectors shared by the extractors, parsed once on first use.

use std::sync::LazyLock;

use super::select::Selector;

fn compile(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

// === Page ===

/// Page title holding the term.
pub static TITLE: LazyLock<Selector> = LazyLock::new(|| compile("h1"));

/// Error message of a substituted error page.
pub static ERROR_MESSAGE: LazyLock<Selector> = LazyLock::new(|| compile("p.error"));

/// Language headlines.
pub static HEADLINE: LazyLock<Selector> = LazyLock::new(|| compile("h2"));

// === Content ===

/// Items of a list-like block.
pub static LIST_ENTRIES: LazyLock<Selector> = LazyLock::new(|| compile("li, dl"));

pub static LIST_ITEM: LazyLock<Selector> = LazyLock::new(|| compile("li"));

pub static TABLE: LazyLock<Selector> = LazyLock::new(|| compile("table"));

pub static LINKS: LazyLock<Selector> = LazyLock::new(|| compile("a[href]"));

// === Definitions and examples ===

/// Show/hide quotation toggle rendered inside en definitions.
pub static QUOTATION_TOGGLE: LazyLock<Selector> = LazyLock::new(|| compile("span.HQToggle"));

pub static DEFINITION_LIST: LazyLock<Selector> = LazyLock::new(|| compile("dl"));

pub static DESCRIPTION: LazyLock<Selector> = LazyLock::new(|| compile("dd"));

/// Lemma in the en headword line.
pub static HEADWORD: LazyLock<Selector> = LazyLock::new(|| compile("strong.headword"));

// === Tables ===

/// Footnote marker inside a table cell.
pub static FOOTNOTE: LazyLock<Selector> = LazyLock::new(|| compile("sup"));

pub static EXTERNAL_LINK: LazyLock<Selector> = LazyLock::new(|| compile("a.external"));

pub static TABLE_CELL: LazyLock<Selector> = LazyLock::new(|| compile("th, td"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_selectors_compile() {
        for selector in [
            &TITLE,
            &ERROR_MESSAGE,
            &HEADLINE,
            &LIST_ENTRIES,
            &LIST_ITEM,
            &TABLE,
            &LINKS,
            &QUOTATION_TOGGLE,
            &DEFINITION_LIST,
            &DESCRIPTION,
            &HEADWORD,
            &FOOTNOTE,
            &EXTERNAL_LINK,
            &TABLE_CELL,
        ] {
            assert!(!selector.as_str().is_empty());
        }
    }
}
