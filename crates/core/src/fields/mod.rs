//! Field generation for detected tables.
//!
//! Each cell becomes an independently addressable form field with a unique
//! name, an inferred type and a display label.

mod infer;
mod mapper;
mod naming;
mod types;

pub use infer::{TYPE_RULES, TypeRule, infer_field_type, matching_type_rule};
pub use mapper::map_table;
pub use naming::{
    cell_field_name, data_row_number, fold_diacritics, sanitize_base, table_base_name,
};
pub use types::{FieldDescriptor, FieldPosition, FieldSettings, FieldType, TableFieldMapping};
