//! Parsed page tree and the navigation primitives extraction relies on.
//!
//! Pages are parsed once with html5ever into an [`ArenaDom`]; everything
//! downstream navigates it by [`ArenaNodeId`].

mod arena;
pub(crate) mod queries;
mod select;
mod tree_sink;

use std::borrow::Cow;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

pub use arena::{ArenaDom, ArenaNode, ArenaNodeData, ArenaNodeId, Attribute, ChildrenIter, Descendants};
pub use select::{LexSelectors, NodeRef, Selector};
pub use tree_sink::ArenaSink;

/// Parse an HTML document into an arena.
pub fn parse_html(html: &str) -> ArenaDom {
    parse_document(ArenaSink::new(), ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
        .into_dom()
}

/// Parse raw page bytes, decoding them first.
pub fn parse_bytes(bytes: &[u8]) -> ArenaDom {
    parse_html(&decode_text(bytes, meta_charset(bytes)))
}

/// Decode bytes to text, trying UTF-8 first.
///
/// Falls back to the declared charset, then Windows-1252.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);
    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Charset declared by a `<meta charset=...>` within the first kilobyte.
fn meta_charset(bytes: &[u8]) -> Option<&str> {
    let head = &bytes[..bytes.len().min(1024)];
    let needle = b"charset=";
    let start = head
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))?
        + needle.len();
    let rest = &head[start..];
    let rest = rest.strip_prefix(b"\"").unwrap_or(rest);
    let end = rest
        .iter()
        .position(|&b| !(b.is_ascii_alphanumeric() || b == b'-' || b == b'_'))
        .unwrap_or(rest.len());
    std::str::from_utf8(&rest[..end]).ok().filter(|s| !s.is_empty())
}
