//! Model registry and extension strategy table
//!
//! Models are registered before derivation; registration is the fail-fast
//! point for every declaration error that can be caught statically, so a
//! bad model surfaces when it is first introspected rather than on each
//! request. The registry is read-only during derivation and safe to share
//! across threads.

use std::collections::HashMap;

use log::{debug, info};

use crate::schema::builder::DescriptorBuilder;
use crate::schema::types::{
    DescriptorCommon, FieldDescriptor, FormSchema, ModelDef, RawField, SchemaError,
};
use crate::schema::validator::RegistrationValidator;

/// Descriptor-producing strategy for one extension tag.
///
/// The strategy receives the field name, the raw declaration, and the
/// already-merged common shell, and returns the finished descriptor.
pub type ExtensionStrategy = Box<
    dyn Fn(&str, &RawField, DescriptorCommon) -> Result<FieldDescriptor, SchemaError>
        + Send
        + Sync,
>;

/// Registry of model declarations and extension strategies.
pub struct ModelRegistry {
    models: HashMap<String, ModelDef>,
    extensions: HashMap<String, ExtensionStrategy>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self {
            models: HashMap::new(),
            extensions: HashMap::new(),
        }
    }

    /// Install a descriptor strategy for an extension tag.
    ///
    /// Strategies must be installed before registering models that use the
    /// tag; extension fields with no strategy derive to the generic
    /// extension descriptor.
    pub fn register_extension<F>(&mut self, tag: impl Into<String>, strategy: F)
    where
        F: Fn(&str, &RawField, DescriptorCommon) -> Result<FieldDescriptor, SchemaError>
            + Send
            + Sync
            + 'static,
    {
        let tag = tag.into();
        debug!("Registered extension strategy for tag '{}'", tag);
        self.extensions.insert(tag, Box::new(strategy));
    }

    /// Register one model. Equivalent to a single-model batch.
    pub fn register(&mut self, model: ModelDef) -> Result<(), SchemaError> {
        self.register_all(vec![model])
    }

    /// Validate and register a batch of models.
    ///
    /// Models in a batch may reference each other, which is how mutually
    /// recursive declarations are introduced. On any validation failure
    /// nothing from the batch is registered.
    pub fn register_all(&mut self, models: Vec<ModelDef>) -> Result<(), SchemaError> {
        RegistrationValidator::new(self).validate_batch(&models)?;
        for model in models {
            info!(
                "Registered model '{}' with {} fields",
                model.name,
                model.fields.len()
            );
            self.models.insert(model.name.clone(), model);
        }
        Ok(())
    }

    pub fn get_model(&self, name: &str) -> Option<&ModelDef> {
        self.models.get(name)
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    pub fn has_extension(&self, tag: &str) -> bool {
        self.extensions.contains_key(tag)
    }

    pub(crate) fn models(&self) -> &HashMap<String, ModelDef> {
        &self.models
    }

    pub(crate) fn extension_strategy(&self, tag: &str) -> Option<&ExtensionStrategy> {
        self.extensions.get(tag)
    }

    /// Derive the form schema for a registered model.
    ///
    /// Every call builds a fresh descriptor tree; the result is immutable
    /// and freely shareable afterward.
    pub fn derive(&self, model_name: &str) -> Result<FormSchema, SchemaError> {
        let model = self
            .models
            .get(model_name)
            .ok_or_else(|| SchemaError::NotFound(model_name.to_string()))?;
        let fields = DescriptorBuilder::new(self).derive_fields(model)?;
        debug!(
            "Derived {} field descriptors for model '{}'",
            fields.len(),
            model_name
        );
        Ok(FormSchema {
            name: model.name.clone(),
            fields,
        })
    }

    /// Derive an ad-hoc model that is not registered. Nested model
    /// references still resolve against the registry, and declaration
    /// errors surface here instead of at registration.
    pub fn derive_fields(&self, model: &ModelDef) -> Result<Vec<FieldDescriptor>, SchemaError> {
        DescriptorBuilder::new(self).derive_fields(model)
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
