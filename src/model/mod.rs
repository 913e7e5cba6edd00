//! Typed result tree.
//!
//! This module contains:
//! - Page results and entries
//! - Sections with definitions, examples and loose items
//! - Morphemes and the table shapes they came from
//! - Links

mod content;
mod entry;
mod inflection;
mod link;

pub use content::{Content, ContentUnit, Definition, Example, Item, Note, Section};
pub use entry::{Entry, PageResult};
pub use inflection::{InflectionBlock, InflectionPage, InflectionSet, Morpheme, TableShape};
pub use link::{Link, collect_links, merge_links};
