//! HTML text helpers used by the sanitizer.
//!
//! - `escape_text()`, `escape_attr()` - idempotent escaping (existing entities are kept)
//! - `decode_entities()` - decode entity references for URL inspection
//! - `is_void_element()` - self-closing elements (br, img, etc.)

use std::borrow::Cow;

// =============================================================================
// Escaping
// =============================================================================

/// Escape text content.
///
/// `<` and `>` are always escaped. `&` is escaped only when it does not
/// already start a character reference, so escaping twice is a no-op.
///
/// # Example
/// ```ignore
/// assert_eq!(escape_text("a < b & c"), "a &lt; b &amp; c");
/// assert_eq!(escape_text("&amp;"), "&amp;");
/// ```
#[inline]
pub fn escape_text(s: &str) -> Cow<'_, str> {
    escape_with(s, false)
}

/// Escape an attribute value for a double-quoted attribute.
#[inline]
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    escape_with(s, true)
}

fn escape_with(s: &str, attr: bool) -> Cow<'_, str> {
    let needs_escape = s.char_indices().any(|(i, c)| match c {
        '<' | '>' => true,
        '"' => attr,
        '&' => entity_len(&s[i..]).is_none(),
        _ => false,
    });
    if !needs_escape {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 16);
    for (i, c) in s.char_indices() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' if attr => result.push_str("&quot;"),
            '&' if entity_len(&s[i..]).is_none() => result.push_str("&amp;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Length of the character reference at the start of `s` (including `&` and `;`).
///
/// Accepts `&name;`, `&#123;` and `&#x1F;`.
fn entity_len(s: &str) -> Option<usize> {
    let body = s.strip_prefix('&')?;
    let end = body.find(';')?;
    let name = &body[..end];
    if name.is_empty() || name.len() > 32 {
        return None;
    }

    let valid = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit())
    } else if let Some(dec) = name.strip_prefix('#') {
        !dec.is_empty() && dec.chars().all(|c| c.is_ascii_digit())
    } else {
        name.chars().all(|c| c.is_ascii_alphanumeric())
    };

    valid.then_some(end + 2)
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode character references that can hide URL schemes.
///
/// Covers numeric references plus the named entities that matter for
/// scheme detection. Unknown names are kept verbatim.
pub fn decode_entities(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find('&') {
        result.push_str(&rest[..pos]);
        rest = &rest[pos..];

        let Some(len) = entity_len(rest) else {
            result.push('&');
            rest = &rest[1..];
            continue;
        };

        let name = &rest[1..len - 1];
        match decode_reference(name) {
            Some(c) => result.push(c),
            None => result.push_str(&rest[..len]),
        }
        rest = &rest[len..];
    }
    result.push_str(rest);

    Cow::Owned(result)
}

fn decode_reference(name: &str) -> Option<char> {
    let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        u32::from_str_radix(hex, 16).ok()?
    } else if let Some(dec) = name.strip_prefix('#') {
        dec.parse().ok()?
    } else {
        return match name {
            "lt" => Some('<'),
            "gt" => Some('>'),
            "amp" => Some('&'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            "colon" => Some(':'),
            "Tab" => Some('\t'),
            "NewLine" => Some('\n'),
            "nbsp" => Some('\u{00A0}'),
            _ => None,
        };
    };
    char::from_u32(code)
}

// =============================================================================
// Element Classification
// =============================================================================

/// Check if an HTML tag is a void element (self-closing).
#[inline]
pub fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text_basic() {
        assert_eq!(escape_text("a < b & c > d"), "a &lt; b &amp; c &gt; d");
        assert!(matches!(escape_text("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_text_keeps_entities() {
        assert_eq!(escape_text("&amp; &lt; &#39; &#x27; &copy;"), "&amp; &lt; &#39; &#x27; &copy;");
        assert_eq!(escape_text("AT&T;"), "AT&T;");
        assert_eq!(escape_text("fish & chips; tea"), "fish &amp; chips; tea");
    }

    #[test]
    fn test_escape_is_idempotent() {
        let input = r#"x < y && "q" & &amp; >"#;
        let once = escape_attr(input).into_owned();
        let twice = escape_attr(&once).into_owned();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_escape_attr_quotes() {
        assert_eq!(escape_attr(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape_text(r#"say "hi""#), r#"say "hi""#);
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("jav&#x61;script&colon;"), "javascript:");
        assert_eq!(decode_entities("&#106;s"), "js");
        assert_eq!(decode_entities("a &unknown; b"), "a &unknown; b");
        assert_eq!(decode_entities("a & b"), "a & b");
    }

    #[test]
    fn test_is_void_element() {
        assert!(is_void_element("img"));
        assert!(is_void_element("br"));
        assert!(!is_void_element("p"));
    }
}
