use serde::{Deserialize, Serialize};

use super::descriptor::{Descriptor, FieldDescriptor};

/// Top-level derived schema for one model: a self-describing document a
/// remote UI can render from.
///
/// Fields appear in model-declaration order. Sorting by `order_index` is a
/// presentation concern and deliberately not done here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
}

impl FormSchema {
    pub fn new(name: String) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    pub fn get_field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name() == name)
    }
}
