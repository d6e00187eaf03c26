//! Declared-type classification
//!
//! Normalizes a raw type expression into exactly one semantic kind,
//! unwrapping optionality and pass-through annotation layers first. This is
//! a pure function over the closed [`TypeExpr`] vocabulary, evaluated in a
//! fixed priority order, so classification is total and testable without
//! any host reflection API.

use crate::schema::types::{FieldKind, SchemaError, TypeExpr};

/// Result of classifying one declared type expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub kind: FieldKind,
    /// The type with every optional/annotation wrapper stripped.
    pub unwrapped: TypeExpr,
    /// True when an optional wrapper was stripped along the way.
    pub optional: bool,
}

impl Classification {
    /// A literal constant classifies as Text but is not editable, so its
    /// computed rendering default differs from every other kind.
    pub fn is_literal(&self) -> bool {
        matches!(self.unwrapped, TypeExpr::Literal(_))
    }
}

/// Classify a declared type expression.
///
/// Wrapper layers are stripped repeatedly: a union with the absence marker
/// records optionality, an annotation layer is passed through. A union of
/// two or more concrete types is rejected; restricting unions to
/// `Optional<T>` keeps every field's kind unambiguous.
pub fn classify(type_expr: &TypeExpr) -> Result<Classification, SchemaError> {
    let mut current = type_expr.clone();
    let mut optional = false;

    loop {
        current = match current {
            TypeExpr::Union(arms) => {
                optional = true;
                unpack_union(arms)?
            }
            TypeExpr::Annotated(inner) => *inner,
            other => {
                current = other;
                break;
            }
        };
    }

    let kind = match &current {
        TypeExpr::Extension { .. } => FieldKind::Extension,
        TypeExpr::Enumeration { .. } => FieldKind::Enumeration,
        TypeExpr::Attachment => FieldKind::Attachment,
        TypeExpr::List(_) => FieldKind::List,
        TypeExpr::Model(_) => FieldKind::Object,
        TypeExpr::Map(_, _) => FieldKind::Unsupported,
        TypeExpr::Number => FieldKind::Number,
        TypeExpr::Text | TypeExpr::Literal(_) => FieldKind::Text,
        TypeExpr::Boolean => FieldKind::Boolean,
        TypeExpr::DateTime => FieldKind::DateTime,
        TypeExpr::Absent => {
            return Err(SchemaError::InvalidDefinition(
                "the absence marker is not a type of its own".to_string(),
            ))
        }
        // Unreachable after the unwrap loop, but kept total.
        TypeExpr::Union(_) | TypeExpr::Annotated(_) => {
            return Err(SchemaError::InvalidDefinition(format!(
                "unclassifiable type expression {:?}",
                current
            )))
        }
    };

    Ok(Classification {
        kind,
        unwrapped: current,
        optional,
    })
}

/// Unpack a union wrapper into its single concrete arm.
///
/// Only a union of exactly one concrete type with the absence marker
/// (`Optional<T>`) is supported.
fn unpack_union(mut arms: Vec<TypeExpr>) -> Result<TypeExpr, SchemaError> {
    if arms.len() != 2 {
        return Err(SchemaError::InvalidDefinition(format!(
            "only a union of one type with the absence marker is supported, but the union has {} arms",
            arms.len()
        )));
    }

    let second = arms.pop();
    let first = arms.pop();
    match (first, second) {
        (Some(TypeExpr::Absent), Some(concrete)) | (Some(concrete), Some(TypeExpr::Absent))
            if concrete != TypeExpr::Absent =>
        {
            Ok(concrete)
        }
        (first, second) => Err(SchemaError::InvalidDefinition(format!(
            "only a union of one type with the absence marker is supported, but the union is {:?}",
            (first, second)
        ))),
    }
}
