//! Header row detection.
//!
//! Row 0 is a header when at least one of its cells satisfies a rule below
//! and row 1 is not empty. Rules are checked in order; the first match wins.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::types::Cell;

static HEADER_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)nome|name|data|date|valor|value|quantidade|quantity|qtd|descri[cç][aã]o|description|total",
    )
    .unwrap()
});

/// A single header heuristic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderRule {
    /// Text longer than `min_len` characters reads as a column label.
    LongText { min_len: usize },
    /// Text containing a column-label keyword.
    Keyword,
}

impl HeaderRule {
    pub fn matches(&self, content: &str) -> bool {
        match *self {
            HeaderRule::LongText { min_len } => content.chars().count() > min_len,
            HeaderRule::Keyword => HEADER_KEYWORDS.is_match(content),
        }
    }
}

/// The ordered header rule table.
pub fn header_rules(min_label_len: usize) -> [HeaderRule; 2] {
    [
        HeaderRule::LongText {
            min_len: min_label_len,
        },
        HeaderRule::Keyword,
    ]
}

/// First rule matched by any row-0 cell, if any.
pub fn matching_header_rule(cells: &[Cell], min_label_len: usize) -> Option<HeaderRule> {
    let rules = header_rules(min_label_len);
    cells
        .iter()
        .filter(|c| c.row == 0)
        .filter_map(|c| c.content.as_deref())
        .find_map(|content| rules.iter().copied().find(|r| r.matches(content)))
}

/// Decide whether row 0 of a grid holds column labels.
pub fn is_header_row(cells: &[Cell], row_count: usize, min_label_len: usize) -> bool {
    if row_count < 2 {
        return false;
    }
    let rule = matching_header_rule(cells, min_label_len);
    let has_data_row = cells.iter().any(|c| c.row == 1);
    debug!(?rule, has_data_row, "header verdict");
    rule.is_some() && has_data_row
}
