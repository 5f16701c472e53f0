//! Field type inference from cell text.
//!
//! Rules are tried in table order against the lower-cased, diacritic-free
//! text; the first rule with a keyword contained in the text decides the type.

use super::naming::fold_diacritics;
use super::types::FieldType;

/// Keywords that select a field type.
#[derive(Clone, Copy, Debug)]
pub struct TypeRule {
    pub field_type: FieldType,
    pub keywords: &'static [&'static str],
}

impl TypeRule {
    /// `folded` must already be lower-cased and diacritic-free.
    pub fn matches(&self, folded: &str) -> bool {
        self.keywords.iter().any(|k| folded.contains(k))
    }
}

pub const TYPE_RULES: &[TypeRule] = &[
    TypeRule {
        field_type: FieldType::Date,
        keywords: &[
            "data",
            "date",
            "nascimento",
            "vencimento",
            "validade",
            "emissao",
            "dd/mm",
        ],
    },
    TypeRule {
        field_type: FieldType::Number,
        keywords: &[
            "valor",
            "preco",
            "quantidade",
            "qtd",
            "quant",
            "total",
            "numero",
            "idade",
            "salario",
            "r$",
            "%",
            "amount",
            "price",
            "number",
        ],
    },
    TypeRule {
        field_type: FieldType::Textarea,
        keywords: &[
            "observac",
            "obs",
            "descricao",
            "comentario",
            "notas",
            "description",
            "notes",
            "comments",
        ],
    },
];

/// The rule that decides the type of `content`, if any.
pub fn matching_type_rule(content: &str) -> Option<&'static TypeRule> {
    let folded = fold_diacritics(content);
    TYPE_RULES.iter().find(|r| r.matches(&folded))
}

/// Infer a field type; absent or unmatched text is single-line text.
pub fn infer_field_type(content: Option<&str>) -> FieldType {
    content
        .and_then(matching_type_rule)
        .map_or(FieldType::Text, |r| r.field_type)
}
