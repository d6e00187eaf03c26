//! Validation rule synthesis
//!
//! Derives the normalized constraint rule list for one field from its
//! metadata bag and its classified type shape. Rules are appended in a
//! fixed order (numeric bounds, length bounds, cross-field requirements,
//! unconditional requiredness) so consumers that stop on the first failing
//! rule behave deterministically.

use crate::schema::classifier::Classification;
use crate::schema::types::{RawField, ValidationRule};

/// Synthesize the rule list for one field.
///
/// Requiredness is decided by the type shape alone: a field gets a
/// Required rule exactly when no optional wrapper was stripped during
/// classification. A declared default does not make a field optional.
pub fn synthesize(
    field_name: &str,
    raw: &RawField,
    classification: &Classification,
) -> Vec<ValidationRule> {
    let meta = &raw.metadata;
    let display = meta.label.as_deref().unwrap_or(field_name);
    let mut rules = Vec::new();

    if let Some(bound) = meta.greater_than {
        rules.push(ValidationRule::GreaterThan {
            value: bound,
            error_text: format!("{} must be greater than {}", display, bound),
        });
    }
    if let Some(bound) = meta.less_than {
        rules.push(ValidationRule::LessThan {
            value: bound,
            error_text: format!("{} must be less than {}", display, bound),
        });
    }

    if let Some(length) = meta.min_length {
        rules.push(ValidationRule::MinLength {
            length,
            error_text: format!("Minimum length of {} is {}", display, length),
        });
    }
    if let Some(length) = meta.max_length {
        rules.push(ValidationRule::MaxLength {
            length,
            error_text: format!("Maximum length of {} is {}", display, length),
        });
    }

    if let Some(other) = &meta.required_if {
        rules.push(ValidationRule::RequiredIf {
            other_field_name: other.clone(),
            error_text: format!("{} is required when {} has a value.", display, other),
        });
    }
    if let Some(other) = &meta.required_unless {
        rules.push(ValidationRule::RequiredUnless {
            other_field_name: other.clone(),
            error_text: format!("{} is required unless {} has a value.", display, other),
        });
    }
    if let Some(other) = &meta.same_as {
        rules.push(ValidationRule::SameAs {
            other_field_name: other.clone(),
            error_text: format!("{} must match {}.", display, other),
        });
    }

    if !classification.optional {
        let error_text = meta
            .required_error_message
            .clone()
            .unwrap_or_else(|| format!("{} is required.", display));
        rules.push(ValidationRule::Required { error_text });
    }

    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::classifier::classify;
    use crate::schema::types::{FieldMetadata, TypeExpr};

    fn rules_for(raw: &RawField) -> Vec<ValidationRule> {
        let classification = classify(&raw.type_expr).unwrap();
        synthesize(&raw.name, raw, &classification)
    }

    #[test]
    fn required_appended_for_non_optional_type() {
        let raw = RawField::new("username", TypeExpr::Text);
        let rules = rules_for(&raw);
        assert_eq!(rules.len(), 1);
        assert!(matches!(rules[0], ValidationRule::Required { .. }));
        assert_eq!(rules[0].error_text(), "username is required.");
    }

    #[test]
    fn optional_type_gets_no_required_rule() {
        let raw = RawField::new("nickname", TypeExpr::optional(TypeExpr::Text));
        assert!(rules_for(&raw).is_empty());
    }

    #[test]
    fn default_value_does_not_suppress_required() {
        let raw =
            RawField::new("country", TypeExpr::Text).with_default(serde_json::json!("sweden"));
        let rules = rules_for(&raw);
        assert!(rules
            .iter()
            .any(|r| matches!(r, ValidationRule::Required { .. })));
    }

    #[test]
    fn bounds_precede_cross_field_rules_which_precede_required() {
        let raw = RawField::new("age", TypeExpr::Number).with_metadata(FieldMetadata {
            greater_than: Some(0.0),
            less_than: Some(150.0),
            min_length: Some(1),
            max_length: Some(3),
            required_if: Some("member".to_string()),
            ..FieldMetadata::default()
        });
        let names: Vec<&str> = rules_for(&raw).iter().map(|r| r.name()).collect();
        assert_eq!(
            names,
            vec![
                "GreaterThan",
                "LessThan",
                "MinLength",
                "MaxLength",
                "RequiredIf",
                "Required"
            ]
        );
    }

    #[test]
    fn error_text_uses_label_when_present() {
        let raw = RawField::new("zip", TypeExpr::Text).with_metadata(FieldMetadata {
            label: Some("Zip code".to_string()),
            min_length: Some(5),
            ..FieldMetadata::default()
        });
        let rules = rules_for(&raw);
        assert_eq!(rules[0].error_text(), "Minimum length of Zip code is 5");
        assert_eq!(rules[1].error_text(), "Zip code is required.");
    }

    #[test]
    fn required_error_message_overrides_generated_text() {
        let raw = RawField::new("password", TypeExpr::Text).with_metadata(FieldMetadata {
            required_error_message: Some("Please pick a password.".to_string()),
            ..FieldMetadata::default()
        });
        let rules = rules_for(&raw);
        assert_eq!(rules[0].error_text(), "Please pick a password.");
    }

    #[test]
    fn required_if_on_optional_type_yields_only_the_conditional_rule() {
        let raw =
            RawField::new("company", TypeExpr::optional(TypeExpr::Text)).with_metadata(
                FieldMetadata {
                    required_if: Some("is_business".to_string()),
                    ..FieldMetadata::default()
                },
            );
        let rules = rules_for(&raw);
        assert_eq!(rules.len(), 1);
        match &rules[0] {
            ValidationRule::RequiredIf {
                other_field_name, ..
            } => assert_eq!(other_field_name, "is_business"),
            other => panic!("expected RequiredIf, got {:?}", other),
        }
    }
}
