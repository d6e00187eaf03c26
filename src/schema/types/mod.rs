pub mod condition;
pub mod descriptor;
pub mod errors;
pub mod model;
pub mod rules;
pub mod schema;

pub use condition::RenderCondition;
pub use descriptor::{
    AttachmentDescriptor, BooleanDescriptor, DateTimeDescriptor, Descriptor, DescriptorCommon,
    EnumerationDescriptor, ExtensionDescriptor, FieldDescriptor, FieldKind, ListDescriptor,
    NumberDescriptor, ObjectDescriptor, TextDescriptor, ORDER_UNINDEXED,
};
pub use errors::SchemaError;
pub use model::{FieldMetadata, ModelDef, RawField, TypeExpr};
pub use rules::ValidationRule;
pub use schema::FormSchema;
