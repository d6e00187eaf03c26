use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::schema::types::condition::RenderCondition;
use crate::schema::types::rules::ValidationRule;

/// Order sentinel placing unindexed fields after every indexed one.
pub const ORDER_UNINDEXED: u32 = u32::MAX;

/// Common interface for all descriptor variants.
///
/// The `Descriptor` trait exposes accessors for the attributes shared by
/// every field descriptor, so consumers can walk a schema tree without
/// matching on the kind.
pub trait Descriptor {
    /// Returns the shared attributes of this descriptor.
    fn common(&self) -> &DescriptorCommon;

    /// Returns the shared attributes of this descriptor, mutably.
    fn common_mut(&mut self) -> &mut DescriptorCommon;

    /// The field name, unique within its parent's field set.
    fn name(&self) -> &str {
        &self.common().name
    }

    /// The display label, if one was declared.
    fn label(&self) -> Option<&str> {
        self.common().label.as_deref()
    }

    /// Whether the field is presented at all.
    fn rendered(&self) -> bool {
        self.common().rendered
    }

    /// The synthesized constraint rules, in evaluation order.
    fn validation_rules(&self) -> &[ValidationRule] {
        &self.common().validation_rules
    }
}

/// Attributes shared by every descriptor variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptorCommon {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default = "default_order_index", skip_serializing_if = "is_unindexed")]
    pub order_index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default = "default_rendered")]
    pub rendered: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub render_conditions: Vec<RenderCondition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation_rules: Vec<ValidationRule>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

fn default_rendered() -> bool {
    true
}

fn default_order_index() -> u32 {
    ORDER_UNINDEXED
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_unindexed(index: &u32) -> bool {
    *index == ORDER_UNINDEXED
}

impl DescriptorCommon {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            hint: None,
            style: None,
            order_index: ORDER_UNINDEXED,
            default: None,
            rendered: true,
            render_conditions: Vec::new(),
            validation_rules: Vec::new(),
            metadata: Map::new(),
        }
    }
}

#[macro_export]
macro_rules! impl_descriptor {
    ($t:ty) => {
        impl $crate::schema::types::descriptor::Descriptor for $t {
            fn common(&self) -> &$crate::schema::types::descriptor::DescriptorCommon {
                &self.inner
            }

            fn common_mut(&mut self) -> &mut $crate::schema::types::descriptor::DescriptorCommon {
                &mut self.inner
            }
        }
    };
}

// Re-export the macro for use in this module
pub use impl_descriptor;
