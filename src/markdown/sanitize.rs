//! Allow-list HTML sanitizer.
//!
//! The input is parsed with `tl` and re-serialized. Only allow-listed
//! elements and attributes survive:
//!
//! - Elements in [`DROPPED_WITH_CONTENT`] vanish together with their children.
//! - Other unknown elements are unwrapped: the tag goes, the children stay.
//! - Comments are removed.
//! - `href`/`src` must be relative or use an allowed scheme.
//!
//! Output text is escaped idempotently, so `sanitize_html(sanitize_html(x))`
//! equals `sanitize_html(x)`.

use crate::utils::html::{decode_entities, escape_attr, escape_text, is_void_element};

/// Elements removed along with everything inside them.
const DROPPED_WITH_CONTENT: &[&str] = &[
    "script", "style", "textarea", "noscript", "iframe", "object", "embed", "template", "option",
    "title",
];

/// Elements kept in the output.
const ALLOWED_ELEMENTS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "br", "hr", "blockquote", "pre", "code", "em",
    "strong", "b", "i", "u", "s", "del", "ins", "sub", "sup", "small", "mark", "abbr", "cite",
    "q", "kbd", "samp", "var", "span", "div", "ul", "ol", "li", "dl", "dt", "dd", "a", "img",
    "figure", "figcaption", "table", "thead", "tbody", "tfoot", "tr", "th", "td", "caption",
];

/// URL schemes allowed in `href`/`src`.
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// Attributes kept per element, in output order.
fn allowed_attributes(element: &str) -> &'static [&'static str] {
    match element {
        "a" => &["href", "title", "name", "target", "rel"],
        "img" => &["src", "alt", "title", "width", "height", "loading"],
        "code" => &["class"],
        "ol" => &["start"],
        "th" | "td" => &["colspan", "rowspan"],
        "abbr" => &["title"],
        _ => &[],
    }
}

#[inline]
fn is_url_attribute(name: &str) -> bool {
    matches!(name, "href" | "src")
}

/// Sanitize an HTML fragment against the fixed allow-list.
pub fn sanitize_html(html: &str) -> String {
    let Ok(dom) = tl::parse(html, tl::ParserOptions::default()) else {
        // Only fails for inputs beyond u32 offsets
        return String::new();
    };

    let parser = dom.parser();
    let mut sanitizer = Sanitizer {
        parser,
        out: String::with_capacity(html.len()),
    };
    for handle in dom.children() {
        sanitizer.write_node(*handle);
    }
    sanitizer.out
}

struct Sanitizer<'p, 'buf> {
    parser: &'p tl::Parser<'buf>,
    out: String,
}

impl<'p, 'buf> Sanitizer<'p, 'buf> {
    fn write_node(&mut self, handle: tl::NodeHandle) {
        let parser = self.parser;
        let Some(node) = handle.get(parser) else {
            return;
        };

        match node {
            tl::Node::Tag(tag) => self.write_tag(tag),
            tl::Node::Raw(bytes) => {
                let text = bytes.as_utf8_str();
                self.out.push_str(&escape_text(&text));
            }
            tl::Node::Comment(_) => {}
        }
    }

    fn write_tag(&mut self, tag: &'p tl::HTMLTag<'buf>) {
        let name = tag.name().as_utf8_str().to_ascii_lowercase();

        if DROPPED_WITH_CONTENT.contains(&name.as_str()) {
            return;
        }
        if !ALLOWED_ELEMENTS.contains(&name.as_str()) {
            self.write_children(tag);
            return;
        }

        self.out.push('<');
        self.out.push_str(&name);
        for (key, value) in collect_attributes(&name, tag) {
            self.out.push(' ');
            self.out.push_str(key);
            self.out.push_str("=\"");
            self.out.push_str(&escape_attr(&value));
            self.out.push('"');
        }

        if is_void_element(&name) {
            self.out.push_str(" />");
            return;
        }

        self.out.push('>');
        self.write_children(tag);
        self.out.push_str("</");
        self.out.push_str(&name);
        self.out.push('>');
    }

    fn write_children(&mut self, tag: &'p tl::HTMLTag<'buf>) {
        for child in tag.children().top().iter() {
            self.write_node(*child);
        }
    }
}

/// Allowed attributes of `tag`, in allow-list order, first occurrence wins.
fn collect_attributes(element: &str, tag: &tl::HTMLTag<'_>) -> Vec<(&'static str, String)> {
    let allowed = allowed_attributes(element);
    if allowed.is_empty() {
        return Vec::new();
    }

    let mut kept: Vec<(usize, &'static str, String)> = Vec::new();
    for (key, value) in tag.attributes().iter() {
        let key = key.to_ascii_lowercase();
        let Some(position) = allowed.iter().position(|a| *a == key) else {
            continue;
        };
        let Some(value) = value else {
            continue;
        };
        if is_url_attribute(&key) && !is_safe_url(&value) {
            continue;
        }
        if kept.iter().any(|(p, _, _)| *p == position) {
            continue;
        }
        kept.push((position, allowed[position], value.into_owned()));
    }

    kept.sort_by_key(|(position, _, _)| *position);
    kept.into_iter().map(|(_, key, value)| (key, value)).collect()
}

/// Check that a URL is relative or uses an allowed scheme.
///
/// Entity references, whitespace and control characters are removed before
/// looking for the scheme, so `jav&#x61;script:` is caught.
fn is_safe_url(value: &str) -> bool {
    let decoded = decode_entities(value);
    let compact: String = decoded
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();

    match compact.find([':', '/', '?', '#']) {
        Some(i) if compact[i..].starts_with(':') => {
            let scheme = compact[..i].to_ascii_lowercase();
            ALLOWED_SCHEMES.contains(&scheme.as_str())
        }
        _ => true,
    }
}
