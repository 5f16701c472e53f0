//! Field name generation.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Lower-case `text` and strip diacritics ("Salário" -> "salario").
///
/// Characters without an ASCII base letter are kept as they are.
pub fn fold_diacritics(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Turn a display name into an identifier prefix.
///
/// Diacritics are stripped, runs of anything outside `[a-z0-9]` collapse to a
/// single underscore, leading/trailing underscores are removed, and the result
/// is cut to `max_len` characters. An empty result yields `fallback`.
pub fn sanitize_base(name: &str, max_len: usize, fallback: &str) -> String {
    let folded = fold_diacritics(name);
    let collapsed = NON_ALNUM.replace_all(&folded, "_");
    let trimmed = collapsed.trim_matches('_');
    // Only ASCII survives the substitution, so byte and char lengths agree.
    let base = trimmed[..trimmed.len().min(max_len)].trim_end_matches('_');
    if base.is_empty() {
        fallback.to_string()
    } else {
        base.to_string()
    }
}

/// Base name for the fields of a table.
///
/// A sanitized name that fits in `max_len` is used as is. A longer one is cut
/// down to leave room for `_{ordinal}`, which always ends the result, so two
/// tables of one extraction never share a base however short `max_len` is.
/// The suffix is never cut, so very small limits can be exceeded.
pub fn table_base_name(name: &str, ordinal: usize, max_len: usize, fallback: &str) -> String {
    let full = sanitize_base(name, usize::MAX, fallback);
    if full.len() <= max_len {
        return full;
    }
    let suffix = format!("_{ordinal}");
    let stem_source = full.strip_suffix(suffix.as_str()).unwrap_or(&full);
    let stem = sanitize_base(stem_source, max_len.saturating_sub(suffix.len()), fallback);
    format!("{stem}{suffix}")
}

/// Row number shown in names and labels for a data cell.
///
/// With a header row, data rows start at grid row 1 and keep that number;
/// without one, grid row 0 becomes data row 1.
pub fn data_row_number(row: usize, has_header_row: bool) -> usize {
    if has_header_row { row } else { row + 1 }
}

/// Whether a cell at `row` is part of the header.
pub fn is_header_cell(row: usize, has_header_row: bool) -> bool {
    has_header_row && row == 0
}

/// Field name for a table cell. Distinct (row, col) pairs give distinct names.
pub fn cell_field_name(base: &str, row: usize, col: usize, has_header_row: bool) -> String {
    if is_header_cell(row, has_header_row) {
        format!("{base}_header_col{}", col + 1)
    } else {
        format!(
            "{base}_linha{}_col{}",
            data_row_number(row, has_header_row),
            col + 1
        )
    }
}
