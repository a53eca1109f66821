//! Output generators.
//!
//! - **Feed**: RSS 2.0 or Atom 1.0 document built from post records

pub mod feed;

use std::borrow::Cow;

const CDATA_OPEN: &str = "<![CDATA[";
const CDATA_CLOSE: &str = "]]>";

/// Minify XML content if enabled.
///
/// Drops whitespace-only text between markup. Non-blank text and CDATA
/// sections are copied unchanged, so feed content keeps its line breaks.
pub fn minify_xml(content: &str, enabled: bool) -> Cow<'_, str> {
    if !enabled {
        return Cow::Borrowed(content);
    }

    let mut minified = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find('<') {
        push_text(&mut minified, &rest[..start]);
        rest = &rest[start..];

        let end = if rest.starts_with(CDATA_OPEN) {
            rest.find(CDATA_CLOSE).map(|i| i + CDATA_CLOSE.len())
        } else {
            rest.find('>').map(|i| i + 1)
        };
        // Unterminated markup is kept as trailing text
        let Some(end) = end else { break };

        minified.push_str(&rest[..end]);
        rest = &rest[end..];
    }
    push_text(&mut minified, rest);

    Cow::Owned(minified)
}

#[inline]
fn push_text(out: &mut String, text: &str) {
    if !text.trim().is_empty() {
        out.push_str(text);
    }
}
