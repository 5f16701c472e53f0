//! High-level API module.
//!
//! # Example
//!
//! ```
//! use cellmap_core::api::{ExtractOptions, extract_table_fields_from_json};
//!
//! let json = r#"[
//!     {"id": "a", "label": "Nome", "bbox": {"x": 0, "y": 0, "width": 50, "height": 30}},
//!     {"id": "b", "label": "Valor", "bbox": {"x": 60, "y": 0, "width": 50, "height": 30}},
//!     {"id": "c", "bbox": {"x": 0, "y": 40, "width": 50, "height": 30}},
//!     {"id": "d", "bbox": {"x": 60, "y": 40, "width": 50, "height": 30}}
//! ]"#;
//! let out = extract_table_fields_from_json(json, &ExtractOptions::default()).unwrap();
//! assert_eq!(out.mappings[0].fields[0].name, "tabela_1_header_col1");
//! ```

pub mod high_level;

// Re-export for convenience
pub use high_level::{
    ExtractOptions, Extraction, extract_table_fields, extract_table_fields_from_json,
};
