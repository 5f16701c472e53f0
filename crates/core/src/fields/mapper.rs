//! Cell-to-field mapping.

use tracing::debug;

use crate::table::{Cell, DetectedTable};

use super::infer::infer_field_type;
use super::naming::{cell_field_name, data_row_number, is_header_cell, table_base_name};
use super::types::{FieldDescriptor, FieldPosition, FieldSettings, TableFieldMapping};

/// Turn every cell of a detected table into a form field.
///
/// Names are unique within the table. Generated table names end in their
/// ordinal and truncation keeps it, so names are also unique across the
/// tables of one extraction.
pub fn map_table(table: &DetectedTable, settings: &FieldSettings) -> TableFieldMapping {
    let base = table_base_name(
        &table.name,
        table.ordinal,
        settings.max_base_len,
        &settings.fallback_base,
    );
    let fields: Vec<FieldDescriptor> = table
        .cells
        .iter()
        .map(|cell| map_cell(table, cell, &base, settings))
        .collect();
    debug!(table = %table.id, base = %base, fields = fields.len(), "mapped table");
    TableFieldMapping {
        table_id: table.id.clone(),
        table_name: table.name.clone(),
        fields,
    }
}

fn map_cell(
    table: &DetectedTable,
    cell: &Cell,
    base: &str,
    settings: &FieldSettings,
) -> FieldDescriptor {
    let header = is_header_cell(cell.row, table.has_header_row);
    let data_row = data_row_number(cell.row, table.has_header_row);
    let content = cell.trimmed_content();

    let label = match content {
        Some(text) => text.to_string(),
        None if header => format!("{} - Cabeçalho Col {}", table.name, cell.col + 1),
        None => format!("{} - Linha {}, Col {}", table.name, data_row, cell.col + 1),
    };
    let help_text = if header {
        format!("{}: cabeçalho, coluna {}", table.name, cell.col + 1)
    } else {
        format!("{}: linha {}, coluna {}", table.name, data_row, cell.col + 1)
    };

    FieldDescriptor {
        id: cell.candidate_id.clone(),
        name: cell_field_name(base, cell.row, cell.col, table.has_header_row),
        field_type: infer_field_type(content),
        label,
        required: settings.required,
        position: FieldPosition::from_bbox(cell.bbox, cell.page),
        placeholder: None,
        help_text: Some(help_text),
    }
}
