//! Post front-matter: YAML-like (`---`) or TOML (`+++`) blocks.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Deserialize tags, treating `null` as empty vec
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Post metadata from the front-matter block.
///
/// # Standard Fields
///
/// | Field         | Type          | Description                          |
/// |---------------|---------------|--------------------------------------|
/// | `title`       | `String`      | Post title (required)                |
/// | `date`        | `String`      | Publication date (required)          |
/// | `description` | `String`      | Short summary (required)             |
/// | `image`       | `String`      | Cover image lookup key (required)    |
/// | `slug`        | `String`      | URL slug override                    |
/// | `author`      | `String`      | Author name or `email (Name)`        |
/// | `draft`       | `bool`        | Draft status (default: false)        |
/// | `tags`        | `Vec<String>` | Categories in the feed               |
///
/// Any other key lands in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PostMeta {
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub slug: Option<String>,
    pub author: Option<String>,
    pub draft: bool,
    #[serde(deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: FxHashMap<String, Value>,
}

/// Fields kept as plain strings in YAML-like front-matter.
const STRING_FIELDS: &[&str] = &["title", "date", "description", "image", "slug", "author"];

/// Split a post into its metadata and Markdown body.
///
/// Returns `Ok(None)` when the file has no front-matter block.
pub fn extract_frontmatter(content: &str) -> Result<Option<(PostMeta, &str)>, String> {
    let Some((fm, body, is_toml)) = detect_frontmatter(content) else {
        return Ok(None);
    };

    let map = if is_toml {
        parse_toml(fm)?
    } else {
        parse_yaml_like(fm)
    };
    let meta = serde_json::from_value(Value::Object(map)).map_err(|e| e.to_string())?;
    Ok(Some((meta, body)))
}

/// Detect and extract frontmatter.
/// Returns `(frontmatter, body, is_toml)` if found.
fn detect_frontmatter(content: &str) -> Option<(&str, &str, bool)> {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();

    for (fence, is_toml) in [("---", false), ("+++", true)] {
        if let Some(rest) = trimmed.strip_prefix(fence)
            && let Some(end) = rest.find(&format!("\n{fence}"))
        {
            let fm = rest[..end].trim();
            let after = &rest[end + 1 + fence.len()..];
            // Closing fence line may carry trailing whitespace
            let body = after
                .split_once('\n')
                .map_or("", |(_, body)| body)
                .trim_start_matches(['\n', '\r']);
            return Some((fm, body, is_toml));
        }
    }

    None
}

/// Parse TOML frontmatter, stringifying datetimes.
fn parse_toml(content: &str) -> Result<serde_json::Map<String, Value>, String> {
    let table: toml::Table = toml::from_str(content).map_err(|e| e.message().to_string())?;
    Ok(table
        .into_iter()
        .map(|(key, value)| (key, toml_to_json(value)))
        .collect())
}

fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(n) => Value::Number(n.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}

/// Parse simple YAML-like frontmatter (key: value).
fn parse_yaml_like(content: &str) -> serde_json::Map<String, Value> {
    let mut map = serde_json::Map::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();
        let key_lower = key.to_lowercase();

        let json = match key_lower.as_str() {
            k if STRING_FIELDS.contains(&k) => Value::String(unquote(value).to_string()),
            "draft" => Value::Bool(value.eq_ignore_ascii_case("true")),
            "tags" => Value::Array(
                split_list(value)
                    .map(|tag| Value::String(tag.to_string()))
                    .collect(),
            ),
            // Custom field -> extra (preserve original key case)
            _ => {
                map.insert(key.to_string(), parse_yaml_value(value));
                continue;
            }
        };
        map.insert(key_lower, json);
    }

    map
}

/// Strip one pair of matching quotes.
fn unquote(s: &str) -> &str {
    for quote in ['"', '\''] {
        if s.len() >= 2
            && let Some(inner) = s.strip_prefix(quote).and_then(|s| s.strip_suffix(quote))
        {
            return inner;
        }
    }
    s
}

/// Split `a, b` or `[a, "b"]` into trimmed, unquoted, non-empty items.
fn split_list(s: &str) -> impl Iterator<Item = &str> {
    let s = s
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(s);
    s.split(',')
        .map(|item| unquote(item.trim()))
        .filter(|item| !item.is_empty())
}

/// Parse a YAML-like value string to JSON value
///
/// Supports:
/// - Booleans: `true`, `false`
/// - Numbers: `123`, `3.14`
/// - Arrays: `a, b, c` -> `["a", "b", "c"]`
/// - Strings: everything else
fn parse_yaml_value(s: &str) -> Value {
    if s.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if s.eq_ignore_ascii_case("null") || s == "~" {
        return Value::Null;
    }
    if let Ok(n) = s.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(n) = s.parse::<f64>()
        && let Some(num) = serde_json::Number::from_f64(n)
    {
        return Value::Number(num);
    }
    if s.contains(',') || (s.starts_with('[') && s.ends_with(']')) {
        return Value::Array(split_list(s).map(|v| Value::String(v.to_string())).collect());
    }

    Value::String(unquote(s).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_frontmatter() {
        let content = "---\ntitle: Hello\ndate: 2024-01-01\ntags: a, b\nimage: \"/src/assets/posts/images/cat.png\"\n---\n\n# Body";
        let (meta, body) = extract_frontmatter(content).unwrap().unwrap();

        assert_eq!(meta.title.as_deref(), Some("Hello"));
        assert_eq!(meta.date.as_deref(), Some("2024-01-01"));
        assert_eq!(meta.image.as_deref(), Some("/src/assets/posts/images/cat.png"));
        assert_eq!(meta.tags, vec!["a", "b"]);
        assert_eq!(body, "# Body");
    }

    #[test]
    fn test_yaml_time_value_keeps_colons() {
        let content = "---\ndate: 2024-01-01T10:30:00Z\n---\n";
        let (meta, _) = extract_frontmatter(content).unwrap().unwrap();
        assert_eq!(meta.date.as_deref(), Some("2024-01-01T10:30:00Z"));
    }

    #[test]
    fn test_yaml_bracket_tags_and_draft() {
        let content = "---\ntitle: 'Quoted'\ntags: [rust, \"web\"]\ndraft: true\n---\nbody";
        let (meta, body) = extract_frontmatter(content).unwrap().unwrap();
        assert_eq!(meta.title.as_deref(), Some("Quoted"));
        assert_eq!(meta.tags, vec!["rust", "web"]);
        assert!(meta.draft);
        assert_eq!(body, "body");
    }

    #[test]
    fn test_toml_frontmatter() {
        let content = "+++\ntitle = \"Hello\"\ndate = 2024-01-01\ntags = [\"a\", \"b\"]\n+++\n\n# Body";
        let (meta, body) = extract_frontmatter(content).unwrap().unwrap();

        assert_eq!(meta.title.as_deref(), Some("Hello"));
        assert_eq!(meta.date.as_deref(), Some("2024-01-01"));
        assert_eq!(meta.tags, vec!["a", "b"]);
        assert_eq!(body, "# Body");
    }

    #[test]
    fn test_invalid_toml_frontmatter() {
        let content = "+++\ntitle = \n+++\n";
        assert!(extract_frontmatter(content).is_err());
    }

    #[test]
    fn test_no_frontmatter() {
        assert!(extract_frontmatter("# Just content").unwrap().is_none());
        assert!(extract_frontmatter("---\nunterminated").unwrap().is_none());
    }

    #[test]
    fn test_extra_fields() {
        let content =
            "---\ntitle: Hello\ncustom: world\ncount: 42\nflag: true\nitems: x, y, z\n---\n";
        let (meta, _) = extract_frontmatter(content).unwrap().unwrap();

        assert_eq!(meta.extra.get("custom"), Some(&serde_json::json!("world")));
        assert_eq!(meta.extra.get("count"), Some(&serde_json::json!(42)));
        assert_eq!(meta.extra.get("flag"), Some(&serde_json::json!(true)));
        assert_eq!(
            meta.extra.get("items"),
            Some(&serde_json::json!(["x", "y", "z"]))
        );
        assert!(!meta.extra.contains_key("title"));
    }

    #[test]
    fn test_crlf_body() {
        let content = "---\r\ntitle: Hi\r\n---\r\nText";
        let (meta, body) = extract_frontmatter(content).unwrap().unwrap();
        assert_eq!(meta.title.as_deref(), Some("Hi"));
        assert_eq!(body, "Text");
    }
}
