//! Validation report types and formatting.

use std::collections::BTreeMap;
use std::fmt;

use owo_colors::OwoColorize;

use crate::utils::plural_count;

/// A single validation error
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The value that failed (date, image key, ...).
    pub target: String,
    /// Error reason/message.
    pub reason: String,
}

/// Grouped validation report.
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// Unreadable posts, bad front-matter, duplicate slugs.
    pub posts: BTreeMap<String, Vec<ValidationError>>,
    /// Unparseable post dates.
    pub dates: BTreeMap<String, Vec<ValidationError>>,
    /// Cover images that do not resolve.
    pub images: BTreeMap<String, Vec<ValidationError>>,
}

impl ValidationReport {
    pub fn add_post(&mut self, source: String, target: String, reason: String) {
        Self::add(&mut self.posts, source, target, reason);
    }

    pub fn add_date(&mut self, source: String, date: String, reason: String) {
        Self::add(&mut self.dates, source, date, reason);
    }

    pub fn add_image(&mut self, source: String, image: String, reason: String) {
        Self::add(&mut self.images, source, image, reason);
    }

    fn add(
        section: &mut BTreeMap<String, Vec<ValidationError>>,
        source: String,
        target: String,
        reason: String,
    ) {
        section
            .entry(source)
            .or_default()
            .push(ValidationError { target, reason });
    }

    /// Total error count across sections.
    pub fn error_count(&self) -> usize {
        [&self.posts, &self.dates, &self.images]
            .iter()
            .flat_map(|section| section.values())
            .map(Vec::len)
            .sum()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Print the full report to stderr (posts -> dates -> images).
    pub fn print(&self) {
        Self::print_section("posts", &self.posts);
        Self::print_section("dates", &self.dates);
        Self::print_section("images", &self.images);
    }

    /// Print section with format (target + reason for non-empty reason).
    fn print_section(name: &str, errors: &BTreeMap<String, Vec<ValidationError>>) {
        if errors.is_empty() {
            return;
        }
        eprintln!();

        let error_count: usize = errors.values().map(Vec::len).sum();
        eprintln!(
            "{} {}",
            name.red().bold(),
            format!(
                "({}, {})",
                plural_count(errors.len(), "file"),
                plural_count(error_count, "error")
            )
            .dimmed()
        );

        for (path, errs) in errors {
            eprintln!("{}{}{}", "[".dimmed(), path.cyan(), "]".dimmed());
            for e in errs {
                if e.reason.is_empty() {
                    eprintln!("{} {}", "→".red(), e.target);
                } else {
                    eprintln!("{} {} {}", "→".red(), e.target, e.reason);
                }
            }
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.error_count();

        if total == 0 {
            write!(f, "{}", "all checks passed".green())
        } else {
            write!(
                f,
                "{} {}",
                "found".dimmed(),
                plural_count(total, "error").red().bold()
            )
        }
    }
}
