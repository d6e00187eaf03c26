use serde::{Deserialize, Serialize};

/// Normalized constraint rule derived from declarative field metadata.
///
/// Rules are synthesized in a fixed order so consumers that stop on the
/// first failing rule behave deterministically. The engine only derives
/// rules; evaluating them against values is the consumer's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule")]
pub enum ValidationRule {
    Required {
        error_text: String,
    },
    RequiredIf {
        other_field_name: String,
        error_text: String,
    },
    RequiredUnless {
        other_field_name: String,
        error_text: String,
    },
    SameAs {
        other_field_name: String,
        error_text: String,
    },
    MinLength {
        length: u64,
        error_text: String,
    },
    MaxLength {
        length: u64,
        error_text: String,
    },
    GreaterThan {
        value: f64,
        error_text: String,
    },
    LessThan {
        value: f64,
        error_text: String,
    },
}

impl ValidationRule {
    /// The human-readable message shown when the rule fails.
    pub fn error_text(&self) -> &str {
        match self {
            Self::Required { error_text }
            | Self::RequiredIf { error_text, .. }
            | Self::RequiredUnless { error_text, .. }
            | Self::SameAs { error_text, .. }
            | Self::MinLength { error_text, .. }
            | Self::MaxLength { error_text, .. }
            | Self::GreaterThan { error_text, .. }
            | Self::LessThan { error_text, .. } => error_text,
        }
    }

    /// The rule's discriminant name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Required { .. } => "Required",
            Self::RequiredIf { .. } => "RequiredIf",
            Self::RequiredUnless { .. } => "RequiredUnless",
            Self::SameAs { .. } => "SameAs",
            Self::MinLength { .. } => "MinLength",
            Self::MaxLength { .. } => "MaxLength",
            Self::GreaterThan { .. } => "GreaterThan",
            Self::LessThan { .. } => "LessThan",
        }
    }
}
