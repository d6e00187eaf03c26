use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Runtime attachment value.
///
/// `name` is the storage-relative identifier, `path` an optional
/// external-storage location, `data` the inline base64 payload. At rest at
/// most one of inline `data` / externalized `path` is populated; both
/// coexist only transiently between a load and the following clear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttachmentValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl AttachmentValue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            data: None,
            name: name.into(),
            path: None,
        }
    }

    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// A fully-populated runtime value tree, the input of the payload
/// manager.
///
/// Serialization is untagged: values travel as plain JSON. An object
/// whose keys are exactly the attachment shape (`name` with optional
/// `data`/`path`) deserializes as an attachment leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Null,
    Boolean(bool),
    Number(serde_json::Number),
    Text(String),
    Attachment(AttachmentValue),
    Object(BTreeMap<String, FormValue>),
    List(Vec<FormValue>),
}

impl FormValue {
    pub fn object(entries: impl IntoIterator<Item = (String, FormValue)>) -> Self {
        Self::Object(entries.into_iter().collect())
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn number(value: i64) -> Self {
        Self::Number(serde_json::Number::from(value))
    }
}

impl From<AttachmentValue> for FormValue {
    fn from(attachment: AttachmentValue) -> Self {
        Self::Attachment(attachment)
    }
}
