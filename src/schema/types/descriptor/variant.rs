use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::impl_descriptor;
use crate::schema::types::descriptor::{Descriptor, DescriptorCommon};

/// Discriminant identifying which descriptor variant a field was
/// classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Number,
    Text,
    Boolean,
    DateTime,
    Enumeration,
    Attachment,
    Object,
    List,
    Extension,
    /// Recognized but underivable (maps/dictionaries). Produced by the
    /// classifier only; never appears in a descriptor tree.
    Unsupported,
}

/// Numeric input field.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberDescriptor {
    pub inner: DescriptorCommon,
}

/// Free-text input field.
#[derive(Debug, Clone, PartialEq)]
pub struct TextDescriptor {
    pub inner: DescriptorCommon,
}

/// Yes/no field.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanDescriptor {
    pub inner: DescriptorCommon,
}

/// Date-time field. Values travel as RFC 3339 text.
#[derive(Debug, Clone, PartialEq)]
pub struct DateTimeDescriptor {
    pub inner: DescriptorCommon,
}

/// Closed choice list, either declared inline or externally sourced.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumerationDescriptor {
    pub inner: DescriptorCommon,
    /// Scalar choice values, in declaration order.
    pub choices: Vec<Value>,
    pub data_source: Option<String>,
    pub item_value_key: Option<String>,
    pub item_text_key: Option<String>,
}

/// Binary attachment field.
#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentDescriptor {
    pub inner: DescriptorCommon,
}

/// Nested model with its own field set.
///
/// `model` names the source model. A re-entrant reference (a model that
/// recurses into itself through a list) is emitted with `model` set and
/// empty `properties`; consumers expand it on demand, so the expansion
/// depth is bounded by actual data rather than by the schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectDescriptor {
    pub inner: DescriptorCommon,
    pub model: Option<String>,
    pub properties: Vec<FieldDescriptor>,
}

/// Ordered repetition of one item shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ListDescriptor {
    pub inner: DescriptorCommon,
    /// Template describing every element.
    pub item_definition: Box<FieldDescriptor>,
}

/// Open-ended descriptor for schema shapes outside the engine's built-in
/// vocabulary. `kind` carries the consumer-defined tag.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionDescriptor {
    pub inner: DescriptorCommon,
    pub kind: String,
}

impl_descriptor!(NumberDescriptor);
impl_descriptor!(TextDescriptor);
impl_descriptor!(BooleanDescriptor);
impl_descriptor!(DateTimeDescriptor);
impl_descriptor!(EnumerationDescriptor);
impl_descriptor!(AttachmentDescriptor);
impl_descriptor!(ObjectDescriptor);
impl_descriptor!(ListDescriptor);
impl_descriptor!(ExtensionDescriptor);

/// Enumeration over all descriptor variants.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldDescriptor {
    Number(NumberDescriptor),
    Text(TextDescriptor),
    Boolean(BooleanDescriptor),
    DateTime(DateTimeDescriptor),
    Enumeration(EnumerationDescriptor),
    Attachment(AttachmentDescriptor),
    Object(ObjectDescriptor),
    List(ListDescriptor),
    Extension(ExtensionDescriptor),
}

impl FieldDescriptor {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Number(_) => FieldKind::Number,
            Self::Text(_) => FieldKind::Text,
            Self::Boolean(_) => FieldKind::Boolean,
            Self::DateTime(_) => FieldKind::DateTime,
            Self::Enumeration(_) => FieldKind::Enumeration,
            Self::Attachment(_) => FieldKind::Attachment,
            Self::Object(_) => FieldKind::Object,
            Self::List(_) => FieldKind::List,
            Self::Extension(_) => FieldKind::Extension,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectDescriptor> {
        match self {
            Self::Object(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ListDescriptor> {
        match self {
            Self::List(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_enumeration(&self) -> Option<&EnumerationDescriptor> {
        match self {
            Self::Enumeration(d) => Some(d),
            _ => None,
        }
    }
}

impl Descriptor for FieldDescriptor {
    fn common(&self) -> &DescriptorCommon {
        match self {
            Self::Number(d) => d.common(),
            Self::Text(d) => d.common(),
            Self::Boolean(d) => d.common(),
            Self::DateTime(d) => d.common(),
            Self::Enumeration(d) => d.common(),
            Self::Attachment(d) => d.common(),
            Self::Object(d) => d.common(),
            Self::List(d) => d.common(),
            Self::Extension(d) => d.common(),
        }
    }

    fn common_mut(&mut self) -> &mut DescriptorCommon {
        match self {
            Self::Number(d) => d.common_mut(),
            Self::Text(d) => d.common_mut(),
            Self::Boolean(d) => d.common_mut(),
            Self::DateTime(d) => d.common_mut(),
            Self::Enumeration(d) => d.common_mut(),
            Self::Attachment(d) => d.common_mut(),
            Self::Object(d) => d.common_mut(),
            Self::List(d) => d.common_mut(),
            Self::Extension(d) => d.common_mut(),
        }
    }
}

impl Serialize for FieldDescriptor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        struct Helper<'a> {
            #[serde(flatten)]
            inner: &'a DescriptorCommon,
            field_kind: FieldKind,
            #[serde(skip_serializing_if = "Option::is_none")]
            choices: Option<&'a Vec<Value>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            data_source: Option<&'a String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            item_value_key: Option<&'a String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            item_text_key: Option<&'a String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            model: Option<&'a String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            properties: Option<&'a Vec<FieldDescriptor>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            item_definition: Option<&'a FieldDescriptor>,
            #[serde(skip_serializing_if = "Option::is_none")]
            kind: Option<&'a String>,
        }

        let mut helper = Helper {
            inner: self.common(),
            field_kind: self.kind(),
            choices: None,
            data_source: None,
            item_value_key: None,
            item_text_key: None,
            model: None,
            properties: None,
            item_definition: None,
            kind: None,
        };

        match self {
            Self::Enumeration(d) => {
                helper.choices = Some(&d.choices);
                helper.data_source = d.data_source.as_ref();
                helper.item_value_key = d.item_value_key.as_ref();
                helper.item_text_key = d.item_text_key.as_ref();
            }
            Self::Object(d) => {
                helper.model = d.model.as_ref();
                helper.properties = Some(&d.properties);
            }
            Self::List(d) => {
                helper.item_definition = Some(&*d.item_definition);
            }
            Self::Extension(d) => {
                helper.kind = Some(&d.kind);
            }
            _ => {}
        }

        helper.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FieldDescriptor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            #[serde(flatten)]
            inner: DescriptorCommon,
            field_kind: FieldKind,
            #[serde(default)]
            choices: Option<Vec<Value>>,
            #[serde(default)]
            data_source: Option<String>,
            #[serde(default)]
            item_value_key: Option<String>,
            #[serde(default)]
            item_text_key: Option<String>,
            #[serde(default)]
            model: Option<String>,
            #[serde(default)]
            properties: Option<Vec<FieldDescriptor>>,
            #[serde(default)]
            item_definition: Option<Box<FieldDescriptor>>,
            #[serde(default)]
            kind: Option<String>,
        }

        let helper = Helper::deserialize(deserializer)?;
        Ok(match helper.field_kind {
            FieldKind::Number => Self::Number(NumberDescriptor {
                inner: helper.inner,
            }),
            FieldKind::Text => Self::Text(TextDescriptor {
                inner: helper.inner,
            }),
            FieldKind::Boolean => Self::Boolean(BooleanDescriptor {
                inner: helper.inner,
            }),
            FieldKind::DateTime => Self::DateTime(DateTimeDescriptor {
                inner: helper.inner,
            }),
            FieldKind::Enumeration => Self::Enumeration(EnumerationDescriptor {
                inner: helper.inner,
                choices: helper.choices.unwrap_or_default(),
                data_source: helper.data_source,
                item_value_key: helper.item_value_key,
                item_text_key: helper.item_text_key,
            }),
            FieldKind::Attachment => Self::Attachment(AttachmentDescriptor {
                inner: helper.inner,
            }),
            FieldKind::Object => Self::Object(ObjectDescriptor {
                inner: helper.inner,
                model: helper.model,
                properties: helper.properties.unwrap_or_default(),
            }),
            FieldKind::List => {
                let item_definition = helper
                    .item_definition
                    .ok_or_else(|| serde::de::Error::missing_field("item_definition"))?;
                Self::List(ListDescriptor {
                    inner: helper.inner,
                    item_definition,
                })
            }
            FieldKind::Extension => Self::Extension(ExtensionDescriptor {
                kind: helper
                    .kind
                    .ok_or_else(|| serde::de::Error::missing_field("kind"))?,
                inner: helper.inner,
            }),
            FieldKind::Unsupported => {
                return Err(serde::de::Error::custom(
                    "unsupported fields are never part of a schema document",
                ))
            }
        })
    }
}
