//! Shared helpers: dates, HTML text handling, paths.

pub mod date;
pub mod html;
pub mod path;

/// Format count with noun, handling pluralization
///
/// - `plural_count(0, "post")` -> `"0 posts"`
/// - `plural_count(1, "post")` -> `"1 post"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{suffix}")
}
