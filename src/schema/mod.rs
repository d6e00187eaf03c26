//! Form schema derivation
//!
//! This module contains the engine that turns declared data models into
//! serializable form schemas:
//! - `types` - model declarations, field descriptors, rules, conditions
//! - `classifier` - declared-type classification and unwrapping
//! - `builder` - recursive descriptor derivation
//! - `rules` - validation rule synthesis from field metadata
//! - `validator` - registration-time validation of model declarations
//! - `registry` - model registry and extension strategy table

pub mod builder;
pub mod classifier;
pub mod registry;
pub mod rules;
pub mod types;
pub mod validator;

mod tests;

pub use classifier::{classify, Classification};
pub use registry::ModelRegistry;

// Re-export the main types at the schema module level
pub use types::{
    Descriptor, DescriptorCommon, FieldDescriptor, FieldKind, FieldMetadata, FormSchema, ModelDef,
    RawField, RenderCondition, SchemaError, TypeExpr, ValidationRule,
};
