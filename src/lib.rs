//! # wikilex
//!
//! Structured extraction of Finnish dictionary entries from Wiktionary pages.
//!
//! ## Features
//!
//! - English-language (en.wiktionary.org) and Finnish-language
//!   (fi.wiktionary.org) page layouts
//! - Heading-driven segmentation of the language section into entries and
//!   nested sections
//! - Ranked definitions with usage examples and notes
//! - Inflection tables virtualized into a span-free grid and tagged with
//!   morphological attributes
//! - Anomalies are reported as [`Diagnostic`]s, never as failures
//!
//! ## Quick Start
//!
//! ```no_run
//! use wikilex::{Dialect, Extractor, ExtractorConfig};
//!
//! let page = Extractor::new()
//!     .with_config(ExtractorConfig::for_dialect(Dialect::Finnish))
//!     .extract_file("talo.html")?;
//!
//! for entry in &page.entries {
//!     println!("{} ({} definitions)", entry.heading, entry.content.definitions().len());
//!     for morpheme in entry.morphemes() {
//!         println!("  {} {:?}", morpheme.surface_form, morpheme.attributes);
//!     }
//! }
//! for diagnostic in &page.diagnostics {
//!     eprintln!("{diagnostic}");
//! }
//! # Ok::<(), wikilex::Error>(())
//! ```
//!
//! ## Inflection tables
//!
//! Tables can also be tagged on their own:
//!
//! ```
//! use wikilex::dom::parse_html;
//! use wikilex::extract_table;
//!
//! let dom = parse_html("<table><tr><td>a</td></tr><tr><td>b</td></tr></table>");
//! let table = dom.find_by_tag("table").unwrap();
//! assert!(extract_table(&dom, table).is_err());
//! ```

pub mod diagnostics;
pub mod dom;
pub mod error;
pub mod extract;
pub mod model;
pub mod section;
pub mod table;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{Error, Result};
pub use extract::{
    Dialect, EntryLayout, Extractor, ExtractorConfig, TranslationFilter, conjugation_url,
    error_page, extract_conjugation_bytes, extract_conjugation_page, extract_page, term_url,
};
pub use model::{
    Content, ContentUnit, Definition, Entry, Example, InflectionBlock, InflectionPage,
    InflectionSet, Item, Link, Morpheme, Note, PageResult, Section, TableShape,
};
pub use table::{UNKNOWN_ATTRIBUTE, extract_table, extract_table_as};
