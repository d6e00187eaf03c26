//! Model declarations consumed by the derivation engine
//!
//! This module is the crate's side of the type-descriptor-accessor
//! contract: any modeling system that can list its fields as `RawField`
//! values (declared type, default, metadata bag) can be derived. The
//! declared type is a closed expression tree rather than host reflection,
//! so classification stays total and testable.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::types::RenderCondition;

/// Declared type expression for one model field.
///
/// `Optional<T>` is spelled as a union with the absence marker; the
/// [`TypeExpr::optional`] constructor produces that shape. Wrappers
/// (`Union`, `Annotated`) are stripped by the classifier before the kind
/// is decided.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeExpr {
    Number,
    Text,
    Boolean,
    DateTime,
    /// Fixed constant value. Classified as Text; not editable, so its
    /// computed rendering default is false.
    Literal(Value),
    /// Closed set of named constant values, in declaration order.
    Enumeration { name: String, values: Vec<Value> },
    /// Binary-payload-carrying structure.
    Attachment,
    /// Ordered repetition of a single item type.
    List(Box<TypeExpr>),
    /// Nested model with its own field set, resolved by name through the
    /// registry.
    Model(String),
    /// Recognized but unsupported; fields of this type are skipped during
    /// derivation.
    Map(Box<TypeExpr>, Box<TypeExpr>),
    /// Union of types. Only a union of exactly one concrete type with
    /// `Absent` is accepted.
    Union(Vec<TypeExpr>),
    /// Absence marker inside a union.
    Absent,
    /// Pass-through annotation layer with no schema meaning of its own.
    Annotated(Box<TypeExpr>),
    /// Open-ended extension marker with a consumer-defined tag.
    Extension { tag: String },
}

impl TypeExpr {
    /// `Optional<T>`, declared as a union with the absence marker.
    pub fn optional(inner: TypeExpr) -> Self {
        Self::Union(vec![inner, Self::Absent])
    }

    pub fn list(item: TypeExpr) -> Self {
        Self::List(Box::new(item))
    }

    pub fn model(name: impl Into<String>) -> Self {
        Self::Model(name.into())
    }

    pub fn map(key: TypeExpr, value: TypeExpr) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }

    pub fn annotated(inner: TypeExpr) -> Self {
        Self::Annotated(Box::new(inner))
    }

    pub fn extension(tag: impl Into<String>) -> Self {
        Self::Extension { tag: tag.into() }
    }

    pub fn enumeration(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self::Enumeration {
            name: name.into(),
            values,
        }
    }
}

/// Metadata bag attached to one declared field.
///
/// Recognized keys are typed; everything else is preserved opaquely in
/// `extra` and re-emitted on the derived descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Presentation order; unindexed fields sort last.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rendered: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub render_conditions: Vec<RenderCondition>,
    /// Explicit choice list; overrides an enumeration's declared values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_value_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_text_key: Option<String>,
    /// Overrides the generated error text of the Required rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greater_than: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub less_than: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
    /// Sibling field whose presence makes this field required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_if: Option<String>,
    /// Sibling field whose presence makes this field optional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_unless: Option<String>,
    /// Sibling field this field's value must equal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub same_as: Option<String>,
    /// Unrecognized keys, preserved opaquely.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// One declared field: name, type expression, optional default, metadata.
///
/// Optionality is carried by the type shape itself (a union with the
/// absence marker), not by a separate flag; a default value does not make
/// a field optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawField {
    pub name: String,
    pub type_expr: TypeExpr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default)]
    pub metadata: FieldMetadata,
}

impl RawField {
    pub fn new(name: impl Into<String>, type_expr: TypeExpr) -> Self {
        Self {
            name: name.into(),
            type_expr,
            default: None,
            metadata: FieldMetadata::default(),
        }
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_metadata(mut self, metadata: FieldMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// A declared model: a name and its fields in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDef {
    pub name: String,
    pub fields: Vec<RawField>,
}

impl ModelDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn add_field(&mut self, field: RawField) {
        self.fields.push(field);
    }

    pub fn with_field(mut self, field: RawField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn get_field(&self, name: &str) -> Option<&RawField> {
        self.fields.iter().find(|f| f.name == name)
    }
}
