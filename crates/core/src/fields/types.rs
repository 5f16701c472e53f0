//! Form field descriptors produced from table cells.

use serde::{Deserialize, Serialize};

use crate::error::{CellMapError, Result};
use crate::geometry::BBox;

pub(crate) const DEFAULT_MAX_BASE_LEN: usize = 50;
pub(crate) const DEFAULT_FALLBACK_BASE: &str = "campo";

/// The closed set of field kinds a cell can map to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Date,
    Number,
    /// Multi-line free text.
    Textarea,
    /// Single-line text.
    #[default]
    Text,
}

/// Geometry of a field on its page.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldPosition {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub page: u32,
}

impl FieldPosition {
    pub fn from_bbox(bbox: BBox, page: u32) -> Self {
        Self {
            x: bbox.x,
            y: bbox.y,
            width: bbox.width,
            height: bbox.height,
            page,
        }
    }
}

/// A ready-to-store form field, shaped like the standalone fields of a form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Id of the candidate the field was built from.
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    pub required: bool,
    pub position: FieldPosition,
    pub placeholder: Option<String>,
    pub help_text: Option<String>,
}

/// All fields generated from one detected table.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableFieldMapping {
    pub table_id: String,
    pub table_name: String,
    pub fields: Vec<FieldDescriptor>,
}

/// Parameters for field generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSettings {
    /// Maximum length of the sanitized table-name prefix of field names.
    pub max_base_len: usize,

    /// Prefix used when the table name sanitizes to nothing.
    pub fallback_base: String,

    /// Value of `required` on every generated field.
    pub required: bool,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            max_base_len: DEFAULT_MAX_BASE_LEN,
            fallback_base: DEFAULT_FALLBACK_BASE.to_string(),
            required: false,
        }
    }
}

impl FieldSettings {
    pub fn validate(&self) -> Result<()> {
        if self.max_base_len == 0 {
            return Err(CellMapError::InvalidSettings(
                "max_base_len must be at least 1".to_string(),
            ));
        }
        if self.fallback_base.trim().is_empty() {
            return Err(CellMapError::InvalidSettings(
                "fallback_base must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
