use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declarative predicate over another field's value, controlling whether a
/// descriptor is presented.
///
/// `property_path` references another field, sibling-relative for a plain
/// name or dotted for deeper paths. `has_value` of `None` means "any
/// non-empty value". Nested conditions AND with the direct comparison; an
/// empty list means the direct comparison alone decides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderCondition {
    pub property_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<RenderCondition>,
}

impl RenderCondition {
    /// Condition satisfied by any non-empty value at `property_path`.
    pub fn any_value(property_path: impl Into<String>) -> Self {
        Self {
            property_path: property_path.into(),
            has_value: None,
            conditions: Vec::new(),
        }
    }

    /// Condition satisfied when the value at `property_path` equals
    /// `expected`.
    pub fn equals(property_path: impl Into<String>, expected: Value) -> Self {
        Self {
            property_path: property_path.into(),
            has_value: Some(expected),
            conditions: Vec::new(),
        }
    }

    pub fn with_condition(mut self, condition: RenderCondition) -> Self {
        self.conditions.push(condition);
        self
    }
}
