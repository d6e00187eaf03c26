pub mod common;
pub mod variant;

pub use common::{Descriptor, DescriptorCommon, ORDER_UNINDEXED};
pub use variant::{
    AttachmentDescriptor, BooleanDescriptor, DateTimeDescriptor, EnumerationDescriptor,
    ExtensionDescriptor, FieldDescriptor, FieldKind, ListDescriptor, NumberDescriptor,
    ObjectDescriptor, TextDescriptor,
};
