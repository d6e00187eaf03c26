//! formfold derives a declarative, serializable form schema from a
//! statically declared data model.
//!
//! A [`schema::types::ModelDef`] declares a tree of typed fields
//! (primitives, enumerations, nested models, lists, optional values, binary
//! attachments, and open extension points). Registering the model with a
//! [`ModelRegistry`] validates the declaration once, up front; deriving it
//! produces a [`schema::types::FormSchema`] tree of field descriptors
//! carrying presentation metadata, conditional-rendering rules, and
//! validation constraints: everything a remote UI needs to render and
//! validate the form without re-reading the model definition.
//!
//! The [`attachments`] module operates on *value* trees rather than schema
//! trees: it locates attachment leaves and moves their binary payloads
//! between the inline encoded representation and files under a storage
//! root.

pub mod attachments;
pub mod error;
pub mod schema;

pub use attachments::{
    clear_payloads, collect_attachments, load_payloads, persist_payloads, AttachmentValue,
    FormValue, StorageError,
};
pub use error::{FormFoldError, FormFoldResult};
pub use schema::registry::ModelRegistry;
pub use schema::types::{
    Descriptor, FieldDescriptor, FieldKind, FieldMetadata, FormSchema, ModelDef, RawField,
    RenderCondition, SchemaError, TypeExpr, ValidationRule,
};
