//! Static schema table for the job form
//!
//! The same table drives validation in [`FormState`](super::FormState), the
//! widgets drawn by the UI and the section layout of the summary, so the
//! three can never disagree about which fields or options exist.

use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Cardinality of a choice group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectMode {
    Single,
    Multi,
}

/// Kind of value a field holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    Text {
        #[serde(default)]
        multiline: bool,
    },
    Choice {
        mode: SelectMode,
        options: Vec<String>,
    },
}

/// Declaration of a single form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Create a free text field
    pub fn text(name: &str, label: &str, multiline: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: FieldKind::Text { multiline },
        }
    }

    /// Create a choice group with options in display order
    pub fn choice(name: &str, label: &str, mode: SelectMode, options: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: FieldKind::Choice {
                mode,
                options: options.iter().map(|o| o.to_string()).collect(),
            },
        }
    }

    /// Declared options (empty for text fields)
    pub fn options(&self) -> &[String] {
        match &self.kind {
            FieldKind::Choice { options, .. } => options,
            FieldKind::Text { .. } => &[],
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.kind, FieldKind::Choice { .. })
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self.kind, FieldKind::Text { multiline: true })
    }
}

/// One line of a summary section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineSpec {
    /// Text value, or the joined selection of a choice group.
    /// Rendered as `"{label}: {value}"` when a label is given.
    Value {
        field: String,
        #[serde(default)]
        label: Option<String>,
    },
    /// Free text run through description normalization
    Normalized { field: String },
}

impl LineSpec {
    fn value(field: &str, label: Option<&str>) -> Self {
        LineSpec::Value {
            field: field.to_string(),
            label: label.map(str::to_string),
        }
    }

    fn normalized(field: &str) -> Self {
        LineSpec::Normalized {
            field: field.to_string(),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            LineSpec::Value { field, .. } | LineSpec::Normalized { field } => field,
        }
    }
}

/// A headed block of the summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub header: String,
    /// Emit header and divider even when no line has content
    #[serde(default)]
    pub always: bool,
    pub lines: Vec<LineSpec>,
}

impl SectionSpec {
    fn new(header: &str, always: bool, lines: Vec<LineSpec>) -> Self {
        Self {
            header: header.to_string(),
            always,
            lines,
        }
    }
}

/// Field declarations plus the section layout of the summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub fields: Vec<FieldSpec>,
    pub sections: Vec<SectionSpec>,
}

const RATINGS: &[&str] = &["Easy", "Medium", "Difficult"];
const EQUIPMENT: &[&str] = &["Portable", "Truck mount", "Cimex"];

const STANDARD_PAYMENT: &[&str] = &[
    "Visa",
    "Mastercard",
    "Debit",
    "Cash",
    "Pending – please contact the customer",
    "Commercial",
];

const COMPACT_PAYMENT: &[&str] = &[
    "Visa",
    "Mastercard",
    "Debit",
    "Cash",
    "Pending, please call the customer",
    "Commercial",
];

const COMPACT_PRODUCTS: &[&str] = &[
    "Procyon",
    "Citrus",
    "Releasit",
    "Bio Break",
    "Eco cide",
    "Flex",
    "Groutmaster",
    "Protector",
    "Petzap IQ",
    "Triplephase",
    "Volume 40",
    "Wool Medic",
];

const STANDARD_PRODUCTS: &[&str] = &[
    "Procyon",
    "Citrus",
    "Releasit",
    "Bio Break",
    "Eco cide",
    "Flex",
    "Groutmaster",
    "Protector",
    "Petzap IQ",
    "Triplephase",
    "Volume 40",
    "Wool Medic",
    "Encapsulator",
    "Deodorizer",
    "Spot remover",
];

impl Schema {
    /// The canonical job form, including the carpet fiber group
    pub fn standard() -> Self {
        Self::build(STANDARD_PAYMENT, STANDARD_PRODUCTS, true)
    }

    /// The earlier, smaller variant of the form
    pub fn compact() -> Self {
        Self::build(COMPACT_PAYMENT, COMPACT_PRODUCTS, false)
    }

    fn build(payment: &[&str], products: &[&str], with_fiber: bool) -> Self {
        let mut fields = vec![
            FieldSpec::text("check_in", "Check in", false),
            FieldSpec::text("check_out", "Check out", false),
            FieldSpec::choice("payment", "Payment", SelectMode::Multi, payment),
            FieldSpec::choice("parking", "Parking", SelectMode::Single, RATINGS),
            FieldSpec::choice("setup", "Setup", SelectMode::Single, RATINGS),
            FieldSpec::choice("equipment", "Equipment", SelectMode::Multi, EQUIPMENT),
        ];
        if with_fiber {
            fields.push(FieldSpec::choice(
                "fiber",
                "Carpet fiber type",
                SelectMode::Multi,
                &["Wool", "Synthetic"],
            ));
        }
        fields.push(FieldSpec::choice(
            "products",
            "Products applied",
            SelectMode::Multi,
            products,
        ));
        fields.push(FieldSpec::text("description", "Job description", true));

        let mut sections = vec![
            SectionSpec::new(
                "JOB TIME",
                true,
                vec![
                    LineSpec::value("check_in", Some("Check-in")),
                    LineSpec::value("check_out", Some("Check-out")),
                ],
            ),
            SectionSpec::new(
                "PAYMENT INFORMATION",
                false,
                vec![LineSpec::value("payment", None)],
            ),
            SectionSpec::new(
                "SITE LOGISTICS",
                false,
                vec![
                    LineSpec::value("parking", Some("Parking")),
                    LineSpec::value("setup", Some("Setup")),
                ],
            ),
            SectionSpec::new(
                "EQUIPMENT USED",
                false,
                vec![LineSpec::value("equipment", None)],
            ),
        ];
        if with_fiber {
            sections.push(SectionSpec::new(
                "CARPET FIBER TYPE",
                false,
                vec![LineSpec::value("fiber", None)],
            ));
        }
        sections.push(SectionSpec::new(
            "PRODUCTS APPLIED",
            false,
            vec![LineSpec::value("products", None)],
        ));
        sections.push(SectionSpec::new(
            "JOB DESCRIPTION",
            false,
            vec![LineSpec::normalized("description")],
        ));

        Self { fields, sections }
    }

    /// Look up a field declaration by name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Position of a field in declaration order
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Check the table is internally consistent
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut names = HashSet::new();
        for field in &self.fields {
            if !names.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
            if let FieldKind::Choice { options, .. } = &field.kind {
                if options.is_empty() {
                    return Err(SchemaError::EmptyGroup(field.name.clone()));
                }
                let mut seen = HashSet::new();
                for option in options {
                    if !seen.insert(option.as_str()) {
                        return Err(SchemaError::DuplicateOption {
                            field: field.name.clone(),
                            option: option.clone(),
                        });
                    }
                }
            }
        }

        for section in &self.sections {
            for line in &section.lines {
                let Some(field) = self.field(line.field()) else {
                    return Err(SchemaError::UnknownSectionField {
                        section: section.header.clone(),
                        field: line.field().to_string(),
                    });
                };
                if matches!(line, LineSpec::Normalized { .. }) && field.is_choice() {
                    return Err(SchemaError::NormalizedChoice {
                        section: section.header.clone(),
                        field: field.name.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_schema_is_valid() {
        assert_eq!(Schema::standard().validate(), Ok(()));
    }

    #[test]
    fn test_compact_schema_is_valid() {
        assert_eq!(Schema::compact().validate(), Ok(()));
    }

    #[test]
    fn test_standard_field_order() {
        let schema = Schema::standard();
        let names: Vec<&str> = schema.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "check_in",
                "check_out",
                "payment",
                "parking",
                "setup",
                "equipment",
                "fiber",
                "products",
                "description"
            ]
        );
    }

    #[test]
    fn test_standard_groups() {
        let schema = Schema::standard();
        assert_eq!(schema.field("products").unwrap().options().len(), 15);
        assert_eq!(schema.field("payment").unwrap().options().len(), 6);
        assert_eq!(
            schema.field("parking").unwrap().kind,
            FieldKind::Choice {
                mode: SelectMode::Single,
                options: vec!["Easy".into(), "Medium".into(), "Difficult".into()],
            }
        );
        assert!(schema.field("description").unwrap().is_multiline());
        assert!(!schema.field("check_in").unwrap().is_multiline());
    }

    #[test]
    fn test_compact_has_no_fiber() {
        let schema = Schema::compact();
        assert!(schema.field("fiber").is_none());
        assert_eq!(schema.field("products").unwrap().options().len(), 12);
        assert!(schema
            .sections
            .iter()
            .all(|s| s.header != "CARPET FIBER TYPE"));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let mut schema = Schema::standard();
        schema.fields.push(FieldSpec::text("check_in", "Again", false));
        assert_eq!(
            schema.validate(),
            Err(SchemaError::DuplicateField("check_in".into()))
        );
    }

    #[test]
    fn test_empty_group_rejected() {
        let mut schema = Schema::standard();
        schema
            .fields
            .push(FieldSpec::choice("extras", "Extras", SelectMode::Multi, &[]));
        assert_eq!(
            schema.validate(),
            Err(SchemaError::EmptyGroup("extras".into()))
        );
    }

    #[test]
    fn test_duplicate_option_rejected() {
        let mut schema = Schema::standard();
        schema.fields.push(FieldSpec::choice(
            "extras",
            "Extras",
            SelectMode::Multi,
            &["Rug", "Rug"],
        ));
        assert!(matches!(
            schema.validate(),
            Err(SchemaError::DuplicateOption { .. })
        ));
    }

    #[test]
    fn test_section_with_unknown_field_rejected() {
        let mut schema = Schema::standard();
        schema.sections.push(SectionSpec::new(
            "EXTRAS",
            false,
            vec![LineSpec::value("extras", None)],
        ));
        assert_eq!(
            schema.validate(),
            Err(SchemaError::UnknownSectionField {
                section: "EXTRAS".into(),
                field: "extras".into(),
            })
        );
    }

    #[test]
    fn test_normalized_choice_rejected() {
        let mut schema = Schema::standard();
        schema.sections.push(SectionSpec::new(
            "BROKEN",
            false,
            vec![LineSpec::normalized("payment")],
        ));
        assert!(matches!(
            schema.validate(),
            Err(SchemaError::NormalizedChoice { .. })
        ));
    }

    #[test]
    fn test_schema_deserializes_from_json() {
        let json = r#"{
            "fields": [
                {"name": "notes", "label": "Notes", "kind": "text", "multiline": true},
                {"name": "rooms", "label": "Rooms", "kind": "choice",
                 "mode": "multi", "options": ["Hall", "Stairs"]}
            ],
            "sections": [
                {"header": "ROOMS", "lines": [{"kind": "value", "field": "rooms"}]},
                {"header": "NOTES", "lines": [{"kind": "normalized", "field": "notes"}]}
            ]
        }"#;
        let schema: Schema = serde_json::from_str(json).unwrap();
        assert_eq!(schema.validate(), Ok(()));
        assert!(schema.field("notes").unwrap().is_multiline());
        assert_eq!(schema.field("rooms").unwrap().options(), ["Hall", "Stairs"]);
        assert!(!schema.sections[0].always);
    }

    #[test]
    fn test_index_of() {
        let schema = Schema::standard();
        assert_eq!(schema.index_of("check_in"), Some(0));
        assert_eq!(schema.index_of("description"), Some(8));
        assert_eq!(schema.index_of("missing"), None);
    }
}
