//! Payload extract/inject operations over a value tree
//!
//! The manager walks a caller-supplied value tree in place, visiting
//! attachment leaves through nested objects and lists. Loading and
//! persisting perform blocking filesystem I/O under a storage root;
//! callers needing non-blocking behavior dispatch these calls to their
//! own execution context.

use std::fs;
use std::path::Path;

use base64::{engine::general_purpose, Engine as _};
use log::debug;

use crate::attachments::errors::StorageError;
use crate::attachments::value::{AttachmentValue, FormValue};

/// Collect mutable handles to every attachment leaf in the value tree.
///
/// Traversal is depth-first: object entries in map order, list elements
/// in sequence order. Non-attachment leaves are ignored.
pub fn collect_attachments(value: &mut FormValue) -> Vec<&mut AttachmentValue> {
    let mut out = Vec::new();
    collect_into(value, &mut out);
    out
}

fn collect_into<'a>(value: &'a mut FormValue, out: &mut Vec<&'a mut AttachmentValue>) {
    match value {
        FormValue::Attachment(attachment) => out.push(attachment),
        FormValue::Object(entries) => {
            for child in entries.values_mut() {
                collect_into(child, out);
            }
        }
        FormValue::List(items) => {
            for child in items.iter_mut() {
                collect_into(child, out);
            }
        }
        _ => {}
    }
}

fn collect_refs<'a>(value: &'a FormValue, out: &mut Vec<&'a AttachmentValue>) {
    match value {
        FormValue::Attachment(attachment) => out.push(attachment),
        FormValue::Object(entries) => {
            for child in entries.values() {
                collect_refs(child, out);
            }
        }
        FormValue::List(items) => {
            for child in items.iter() {
                collect_refs(child, out);
            }
        }
        _ => {}
    }
}

/// Strip the inline payload from every attachment, leaving `name` and
/// `path` untouched. Idempotent.
pub fn clear_payloads(value: &mut FormValue) {
    for attachment in collect_attachments(value) {
        attachment.data = None;
    }
}

/// Read every attachment's file at `storage_root/name` and set the inline
/// payload.
///
/// A missing or unreadable file is fatal to the whole load call, not
/// skipped: a loaded tree either has every payload or reports which one
/// was absent.
pub fn load_payloads(value: &mut FormValue, storage_root: &Path) -> Result<(), StorageError> {
    for attachment in collect_attachments(value) {
        let file_path = storage_root.join(&attachment.name);
        let bytes = fs::read(&file_path).map_err(|source| StorageError::Missing {
            name: attachment.name.clone(),
            source,
        })?;
        debug!(
            "Loaded {} bytes into attachment '{}'",
            bytes.len(),
            attachment.name
        );
        attachment.data = Some(general_purpose::STANDARD.encode(&bytes));
    }
    Ok(())
}

/// Decode and write every attachment payload to `storage_root/name`.
///
/// An attachment without inline data is treated as already persisted and
/// skipped; persistence is best-effort per attachment, not
/// all-or-nothing across the tree.
pub fn persist_payloads(value: &FormValue, storage_root: &Path) -> Result<(), StorageError> {
    let mut attachments = Vec::new();
    collect_refs(value, &mut attachments);

    for attachment in attachments {
        let Some(data) = &attachment.data else {
            debug!(
                "Attachment '{}' carries no payload; skipping persist",
                attachment.name
            );
            continue;
        };
        let bytes =
            general_purpose::STANDARD
                .decode(data)
                .map_err(|source| StorageError::Decode {
                    name: attachment.name.clone(),
                    source,
                })?;
        let file_path = storage_root.join(&attachment.name);
        fs::write(&file_path, &bytes)?;
        debug!(
            "Persisted {} bytes for attachment '{}'",
            bytes.len(),
            attachment.name
        );
    }
    Ok(())
}
