//! Registration-time validation of model declarations
//!
//! A declaration error is a model-authoring bug, not a runtime condition,
//! so everything that can be checked statically is checked here, once,
//! when the model is registered: name rules, classifiability of every
//! declared type, resolvability of model references and extension tags,
//! sibling scoping of cross-field rules and render-condition paths, and
//! the absence of direct model cycles.

use std::collections::{HashMap, HashSet};

use chrono::DateTime;
use log::debug;

use crate::schema::classifier::classify;
use crate::schema::registry::ModelRegistry;
use crate::schema::types::{
    FieldKind, ModelDef, RawField, RenderCondition, SchemaError, TypeExpr,
};

/// Validates a batch of [`ModelDef`]s before they are registered.
pub(crate) struct RegistrationValidator<'a> {
    registry: &'a ModelRegistry,
}

impl<'a> RegistrationValidator<'a> {
    pub fn new(registry: &'a ModelRegistry) -> Self {
        Self { registry }
    }

    pub fn validate_batch(&self, batch: &[ModelDef]) -> Result<(), SchemaError> {
        let mut batch_names = HashSet::new();
        for model in batch {
            if !batch_names.insert(model.name.as_str()) {
                return Err(SchemaError::InvalidDefinition(format!(
                    "duplicate model '{}' in batch",
                    model.name
                )));
            }
        }

        for model in batch {
            self.validate_model(model, &batch_names)
                .map_err(|e| e.prefix_model(&model.name))?;
        }

        self.check_cycles(batch)
    }

    fn validate_model(
        &self,
        model: &ModelDef,
        batch_names: &HashSet<&str>,
    ) -> Result<(), SchemaError> {
        if model.name.is_empty() {
            return Err(SchemaError::InvalidDefinition(
                "Model name cannot be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for field in &model.fields {
            if field.name.is_empty() {
                return Err(SchemaError::InvalidDefinition(
                    "Field name cannot be empty".to_string(),
                ));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::InvalidDefinition(format!(
                    "duplicate field '{}'",
                    field.name
                )));
            }
            self.validate_field(model, field, batch_names)
                .map_err(|e| e.prefix_field(&field.name))?;
        }

        Ok(())
    }

    fn validate_field(
        &self,
        model: &ModelDef,
        field: &RawField,
        batch_names: &HashSet<&str>,
    ) -> Result<(), SchemaError> {
        let classification = classify(&field.type_expr)?;
        self.validate_type(&classification.unwrapped, batch_names)?;

        // A date-time default must already be a well-formed timestamp.
        if classification.kind == FieldKind::DateTime {
            if let Some(serde_json::Value::String(default)) = &field.default {
                DateTime::parse_from_rfc3339(default).map_err(|e| {
                    SchemaError::InvalidDefinition(format!(
                        "date-time default '{}' is not valid RFC 3339: {}",
                        default, e
                    ))
                })?;
            }
        }

        if let TypeExpr::Extension { tag } = &classification.unwrapped {
            if !self.registry.has_extension(tag) {
                debug!(
                    "No strategy registered for extension tag '{}'; the generic descriptor will be derived",
                    tag
                );
            }
        }

        let cross_field = [
            ("required_if", field.metadata.required_if.as_ref()),
            ("required_unless", field.metadata.required_unless.as_ref()),
            ("same_as", field.metadata.same_as.as_ref()),
        ];
        for (key, target) in cross_field {
            let Some(target) = target else { continue };
            if target == &field.name {
                return Err(SchemaError::InvalidDefinition(format!(
                    "{} cannot reference its own field",
                    key
                )));
            }
            if model.get_field(target).is_none() {
                return Err(SchemaError::InvalidDefinition(format!(
                    "{} references unknown sibling field '{}'",
                    key, target
                )));
            }
        }

        for condition in &field.metadata.render_conditions {
            self.validate_condition(model, condition)?;
        }

        Ok(())
    }

    /// Walk the nested type layers that classification alone does not
    /// recurse into.
    fn validate_type(
        &self,
        unwrapped: &TypeExpr,
        batch_names: &HashSet<&str>,
    ) -> Result<(), SchemaError> {
        match unwrapped {
            TypeExpr::List(item) => {
                let inner = classify(item)?;
                self.validate_type(&inner.unwrapped, batch_names)
            }
            TypeExpr::Model(name) => {
                if self.registry.get_model(name).is_none() && !batch_names.contains(name.as_str())
                {
                    return Err(SchemaError::InvalidDefinition(format!(
                        "unknown model reference '{}'",
                        name
                    )));
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Single-segment condition paths are sibling references and must
    /// resolve; dotted paths are resolved by the presentation layer.
    fn validate_condition(
        &self,
        model: &ModelDef,
        condition: &RenderCondition,
    ) -> Result<(), SchemaError> {
        if condition.property_path.is_empty() {
            return Err(SchemaError::InvalidDefinition(
                "render condition path cannot be empty".to_string(),
            ));
        }
        if !condition.property_path.contains('.')
            && model.get_field(&condition.property_path).is_none()
        {
            return Err(SchemaError::InvalidDefinition(format!(
                "render condition references unknown sibling field '{}'",
                condition.property_path
            )));
        }
        for sub in &condition.conditions {
            self.validate_condition(model, sub)?;
        }
        Ok(())
    }

    /// Reject direct model cycles.
    ///
    /// Only required object references count as cycle edges. A list or an
    /// optional wrapper is a terminal case that keeps the value tree
    /// finite, so cycles broken by either are legal and handled at
    /// derivation time by reference-only re-entry.
    fn check_cycles(&self, batch: &[ModelDef]) -> Result<(), SchemaError> {
        let mut universe: HashMap<&str, &ModelDef> = HashMap::new();
        for model in self.registry.models().values() {
            universe.insert(model.name.as_str(), model);
        }
        for model in batch {
            universe.insert(model.name.as_str(), model);
        }

        let mut done = HashSet::new();
        for model in batch {
            let mut path = Vec::new();
            self.visit(&model.name, &universe, &mut path, &mut done)?;
        }
        Ok(())
    }

    fn visit(
        &self,
        name: &str,
        universe: &HashMap<&str, &ModelDef>,
        path: &mut Vec<String>,
        done: &mut HashSet<String>,
    ) -> Result<(), SchemaError> {
        if done.contains(name) {
            return Ok(());
        }
        if let Some(pos) = path.iter().position(|n| n == name) {
            let mut cycle = path[pos..].to_vec();
            cycle.push(name.to_string());
            return Err(SchemaError::InvalidDefinition(format!(
                "cyclic model reference: {}",
                cycle.join(" -> ")
            )));
        }
        // Unknown references are reported by per-field validation.
        let Some(model) = universe.get(name) else {
            return Ok(());
        };

        path.push(name.to_string());
        for field in &model.fields {
            if let Some(edge) = required_object_edge(field) {
                self.visit(&edge, universe, path, done)?;
            }
        }
        path.pop();
        done.insert(name.to_string());
        Ok(())
    }
}

/// The model this field references as a required, directly nested object,
/// if any.
fn required_object_edge(field: &RawField) -> Option<String> {
    let classification = classify(&field.type_expr).ok()?;
    if classification.optional {
        return None;
    }
    match classification.unwrapped {
        TypeExpr::Model(name) => Some(name),
        _ => None,
    }
}
