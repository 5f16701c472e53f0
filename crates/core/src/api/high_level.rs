//! High-level extraction API.
//!
//! Provides the main entry points:
//! - `extract_table_fields()` - detect tables and map their cells to fields
//! - `extract_table_fields_from_json()` - same, from the detector's JSON output

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::candidate::{FieldCandidate, candidates_from_json, validate_candidates};
use crate::error::Result;
use crate::fields::{
    FieldDescriptor, FieldPosition, FieldSettings, TableFieldMapping, infer_field_type, map_table,
    sanitize_base,
};
use crate::table::{DetectedTable, TableSettings, detect_tables_numbered, standalone_candidates};

/// Options for table detection and field mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Table detection parameters.
    pub table: TableSettings,

    /// Field generation parameters.
    pub fields: FieldSettings,
}

impl ExtractOptions {
    pub fn validate(&self) -> Result<()> {
        self.table.validate()?;
        self.fields.validate()
    }
}

/// Result of one extraction call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Extraction {
    pub tables: Vec<DetectedTable>,
    /// One mapping per table, in the same order.
    pub mappings: Vec<TableFieldMapping>,
    /// Candidates that are not part of any table, in input order.
    pub standalone: Vec<FieldCandidate>,
}

impl Extraction {
    /// Every table field followed by one field per standalone candidate.
    ///
    /// Each input candidate appears exactly once. Standalone names are made
    /// unique against all names emitted before them by a numeric suffix.
    pub fn all_fields(&self, settings: &FieldSettings) -> Vec<FieldDescriptor> {
        let mut fields: Vec<FieldDescriptor> = self
            .mappings
            .iter()
            .flat_map(|m| m.fields.iter().cloned())
            .collect();
        let mut taken: FxHashSet<String> = fields.iter().map(|f| f.name.clone()).collect();

        for c in &self.standalone {
            let base = sanitize_base(
                c.trimmed_label().unwrap_or(&c.id),
                settings.max_base_len,
                &settings.fallback_base,
            );
            let mut name = base.clone();
            let mut suffix = 2;
            while taken.contains(&name) {
                name = format!("{base}_{suffix}");
                suffix += 1;
            }
            taken.insert(name.clone());
            fields.push(FieldDescriptor {
                id: c.id.clone(),
                name,
                field_type: infer_field_type(c.trimmed_label()),
                label: c.trimmed_label().unwrap_or(&c.id).to_string(),
                required: settings.required,
                position: FieldPosition::from_bbox(c.bbox, c.page),
                placeholder: None,
                help_text: None,
            });
        }
        fields
    }
}

/// Detect tables among `candidates` and map each table's cells to fields.
///
/// Candidates are processed page by page in ascending page order. Table
/// numbering continues across pages, so names and ids are unique per call.
pub fn extract_table_fields(
    candidates: &[FieldCandidate],
    options: &ExtractOptions,
) -> Result<Extraction> {
    options.validate()?;
    validate_candidates(candidates)?;

    let mut pages: BTreeMap<u32, Vec<FieldCandidate>> = BTreeMap::new();
    for c in candidates {
        pages.entry(c.page).or_default().push(c.clone());
    }

    let mut next_ordinal = 1;
    let mut tables = Vec::new();
    for (page, page_candidates) in &pages {
        let found = detect_tables_numbered(page_candidates, &options.table, &mut next_ordinal);
        debug!(page, candidates = page_candidates.len(), tables = found.len(), "scanned page");
        tables.extend(found);
    }

    let mappings = tables
        .iter()
        .map(|t| map_table(t, &options.fields))
        .collect();
    let standalone = standalone_candidates(candidates, &tables)
        .into_iter()
        .cloned()
        .collect();

    Ok(Extraction {
        tables,
        mappings,
        standalone,
    })
}

/// Decode candidates from JSON and run [`extract_table_fields`].
pub fn extract_table_fields_from_json(json: &str, options: &ExtractOptions) -> Result<Extraction> {
    let candidates = candidates_from_json(json)?;
    extract_table_fields(&candidates, options)
}
