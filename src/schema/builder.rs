//! Descriptor derivation
//!
//! Walks a model declaration field by field, classifies each declared
//! type, merges the metadata bag onto a descriptor shell, and recurses
//! into nested models and list item types. Derivation is a pure function
//! of the registered declarations: every call builds a fresh, immutable
//! descriptor tree.

use log::info;

use crate::schema::classifier::{classify, Classification};
use crate::schema::registry::ModelRegistry;
use crate::schema::rules::synthesize;
use crate::schema::types::{
    AttachmentDescriptor, BooleanDescriptor, DateTimeDescriptor, DescriptorCommon,
    EnumerationDescriptor, ExtensionDescriptor, FieldDescriptor, FieldKind, ListDescriptor,
    ModelDef, NumberDescriptor, ObjectDescriptor, RawField, SchemaError, TextDescriptor, TypeExpr,
    ORDER_UNINDEXED,
};

/// One derivation pass over a model tree.
///
/// The builder tracks the stack of model names currently being derived so
/// a model re-entered through a list emits a reference-only Object
/// descriptor instead of expanding forever. Direct cycles never reach the
/// builder; registration rejects them.
pub(crate) struct DescriptorBuilder<'a> {
    registry: &'a ModelRegistry,
    stack: Vec<String>,
}

impl<'a> DescriptorBuilder<'a> {
    pub fn new(registry: &'a ModelRegistry) -> Self {
        Self {
            registry,
            stack: Vec::new(),
        }
    }

    /// Derive the full descriptor sequence for a model, in declaration
    /// order. Unsupported fields are dropped from the sequence.
    pub fn derive_fields(&mut self, model: &ModelDef) -> Result<Vec<FieldDescriptor>, SchemaError> {
        self.stack.push(model.name.clone());
        let mut fields = Vec::new();
        for raw in &model.fields {
            if let Some(descriptor) = self.derive_field(&raw.name, raw)? {
                fields.push(descriptor);
            }
        }
        self.stack.pop();
        Ok(fields)
    }

    /// Derive one field. Returns `None` for the deliberate
    /// unsupported-type skip; errors are prefixed with the field name at
    /// each recursion level.
    pub fn derive_field(
        &mut self,
        field_name: &str,
        raw: &RawField,
    ) -> Result<Option<FieldDescriptor>, SchemaError> {
        self.derive_field_inner(field_name, raw)
            .map_err(|e| e.prefix_field(field_name))
    }

    fn derive_field_inner(
        &mut self,
        field_name: &str,
        raw: &RawField,
    ) -> Result<Option<FieldDescriptor>, SchemaError> {
        let classification = classify(&raw.type_expr)?;

        if classification.kind == FieldKind::Unsupported {
            info!(
                "Skipping unsupported map field '{}' during derivation",
                field_name
            );
            return Ok(None);
        }

        let inner = build_common(field_name, raw, &classification);

        let descriptor = match classification.kind {
            FieldKind::Number => FieldDescriptor::Number(NumberDescriptor { inner }),
            FieldKind::Text => FieldDescriptor::Text(TextDescriptor { inner }),
            FieldKind::Boolean => FieldDescriptor::Boolean(BooleanDescriptor { inner }),
            FieldKind::DateTime => FieldDescriptor::DateTime(DateTimeDescriptor { inner }),
            FieldKind::Attachment => FieldDescriptor::Attachment(AttachmentDescriptor { inner }),
            FieldKind::Enumeration => {
                let TypeExpr::Enumeration { values, .. } = &classification.unwrapped else {
                    unreachable!("enumeration kind always unwraps to an enumeration type");
                };
                // Explicit choices metadata wins over the declared values.
                let choices = raw
                    .metadata
                    .choices
                    .clone()
                    .unwrap_or_else(|| values.clone());
                FieldDescriptor::Enumeration(EnumerationDescriptor {
                    inner,
                    choices,
                    data_source: raw.metadata.data_source.clone(),
                    item_value_key: raw.metadata.item_value_key.clone(),
                    item_text_key: raw.metadata.item_text_key.clone(),
                })
            }
            FieldKind::List => {
                let TypeExpr::List(item_type) = &classification.unwrapped else {
                    unreachable!("list kind always unwraps to a list type");
                };
                let item_name = format!("{}_item", field_name);
                let item_raw = RawField::new(item_name.clone(), (**item_type).clone());
                let item = self.derive_field(&item_name, &item_raw)?.ok_or_else(|| {
                    SchemaError::InvalidDefinition("list item type is unsupported".to_string())
                })?;
                FieldDescriptor::List(ListDescriptor {
                    inner,
                    item_definition: Box::new(item),
                })
            }
            FieldKind::Object => {
                let TypeExpr::Model(model_name) = &classification.unwrapped else {
                    unreachable!("object kind always unwraps to a model reference");
                };
                if self.stack.contains(model_name) {
                    // Re-entered through a list; emit the reference only.
                    FieldDescriptor::Object(ObjectDescriptor {
                        inner,
                        model: Some(model_name.clone()),
                        properties: Vec::new(),
                    })
                } else {
                    let model = self.registry.get_model(model_name).ok_or_else(|| {
                        SchemaError::InvalidDefinition(format!(
                            "unknown model reference '{}'",
                            model_name
                        ))
                    })?;
                    let properties = self.derive_fields(model)?;
                    FieldDescriptor::Object(ObjectDescriptor {
                        inner,
                        model: Some(model_name.clone()),
                        properties,
                    })
                }
            }
            FieldKind::Extension => {
                let TypeExpr::Extension { tag } = &classification.unwrapped else {
                    unreachable!("extension kind always unwraps to an extension marker");
                };
                match self.registry.extension_strategy(tag) {
                    Some(factory) => return factory(field_name, raw, inner).map(Some),
                    None => FieldDescriptor::Extension(ExtensionDescriptor {
                        inner,
                        kind: tag.clone(),
                    }),
                }
            }
            FieldKind::Unsupported => unreachable!("handled above"),
        };

        Ok(Some(descriptor))
    }
}

/// Merge the field's metadata bag onto a descriptor shell.
///
/// Precedence is layered: an explicit metadata key wins over the computed
/// default, which wins over absence. The only kind-dependent computed
/// default is `rendered`, false for literal constants.
fn build_common(
    field_name: &str,
    raw: &RawField,
    classification: &Classification,
) -> DescriptorCommon {
    let meta = &raw.metadata;
    DescriptorCommon {
        name: field_name.to_string(),
        label: meta.label.clone(),
        hint: meta.hint.clone(),
        style: meta.style.clone(),
        order_index: meta.index.unwrap_or(ORDER_UNINDEXED),
        default: raw.default.clone(),
        rendered: meta.rendered.unwrap_or(!classification.is_literal()),
        render_conditions: meta.render_conditions.clone(),
        validation_rules: synthesize(field_name, raw, classification),
        metadata: meta.extra.clone(),
    }
}
