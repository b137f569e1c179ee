//! The patch-to-update translation loop.
//!
//! Operations are folded left to right into one [`UpdateDocument`]. Ordering
//! is load-bearing: the array-insert merge decides contiguity against the
//! state accumulated by earlier operations, so reordering input changes
//! results.

use patch_to_mongo_pointer::{is_integer, to_dot};
use serde_json::Value;

use crate::options::TranslateOptions;
use crate::types::{Op, TranslateError};
use crate::update::{PushEntry, PushSpec, UpdateDocument};

/// Translates a patch into a MongoDB update document with default options.
///
/// ```
/// use patch_to_mongo::{translate, Op};
/// use serde_json::json;
///
/// let update = translate(&[Op::Replace { path: "/name".into(), value: json!("dave") }])?;
/// assert_eq!(update.to_value(), json!({"$set": {"name": "dave"}}));
/// # Ok::<(), patch_to_mongo::TranslateError>(())
/// ```
pub fn translate(ops: &[Op]) -> Result<UpdateDocument, TranslateError> {
    translate_with(ops, &TranslateOptions::default())
}

/// Translates a patch, offering each operation to the hooks in `options`
/// before standard dispatch.
///
/// An operation claimed by a hook skips standard dispatch entirely; see
/// [`TranslateOptions`] for the claiming rules. On error the update built so
/// far is dropped, never returned.
pub fn translate_with(
    ops: &[Op],
    options: &TranslateOptions,
) -> Result<UpdateDocument, TranslateError> {
    let mut update = UpdateDocument::new();
    for op in ops {
        if options.intercept(&mut update, op)? {
            continue;
        }
        match op {
            Op::Add { path, value } => translate_add(&mut update, path, value)?,
            Op::Remove { path } => translate_remove(&mut update, path),
            Op::Replace { path, value } => translate_replace(&mut update, path, value),
            Op::Test { .. } => {}
            Op::Move { .. } | Op::Copy { .. } => {
                return Err(TranslateError::UnsupportedOp(op.op_name().to_string()));
            }
        }
    }
    Ok(update)
}

fn translate_add(
    update: &mut UpdateDocument,
    path: &str,
    value: &Value,
) -> Result<(), TranslateError> {
    let field = to_dot(path);
    if let Some((key, token)) = field.rsplit_once('.') {
        if token == "-" {
            return push_append(update, key, value);
        }
        if let Some(position) = parse_index(token) {
            return push_at(update, key, position, value);
        }
    }
    // Single-segment paths and non-index trailing tokens are plain field
    // writes, covering object-member adds and whole-field replacement.
    update.set.insert(field, value.clone());
    Ok(())
}

fn translate_remove(update: &mut UpdateDocument, path: &str) {
    update.unset.insert(to_dot(path));
}

fn translate_replace(update: &mut UpdateDocument, path: &str, value: &Value) {
    update.set.insert(to_dot(path), value.clone());
}

/// Interprets a trailing path token as an array index.
///
/// Only all-digit tokens qualify; `1234abc`, `+1`, and `1e3` are field names,
/// not indexes. Digit runs too large for `usize` are field names too.
fn parse_index(token: &str) -> Option<usize> {
    if !is_integer(token) {
        return None;
    }
    token.parse().ok()
}

fn push_append(
    update: &mut UpdateDocument,
    key: &str,
    value: &Value,
) -> Result<(), TranslateError> {
    let Some(entry) = update.push.get_mut(key) else {
        // First append stays a bare value, the form MongoDB accepts without
        // $each.
        update.push.insert(key.to_string(), PushEntry::Single(value.clone()));
        return Ok(());
    };
    match entry {
        PushEntry::Single(prior) => {
            let prior = prior.take();
            *entry = PushEntry::Spec(PushSpec {
                each: vec![prior, value.clone()],
                position: None,
            });
        }
        PushEntry::Spec(spec) => {
            if spec.position.is_some() {
                return Err(TranslateError::MixedPositions(key.to_string()));
            }
            spec.each.push(value.clone());
        }
    }
    Ok(())
}

fn push_at(
    update: &mut UpdateDocument,
    key: &str,
    position: usize,
    value: &Value,
) -> Result<(), TranslateError> {
    let Some(entry) = update.push.get_mut(key) else {
        update.push.insert(
            key.to_string(),
            PushEntry::Spec(PushSpec {
                each: vec![value.clone()],
                position: Some(position),
            }),
        );
        return Ok(());
    };
    let PushEntry::Spec(spec) = entry else {
        return Err(TranslateError::MixedPositions(key.to_string()));
    };
    let Some(anchor) = spec.position else {
        return Err(TranslateError::MixedPositions(key.to_string()));
    };
    // Each accepted insert keeps the run contiguous: its offset from the
    // run's start must land within or immediately after the accumulated
    // values. Positions before the start are valid and extend the run
    // leftward.
    let index = if position >= anchor {
        let offset = position - anchor;
        if offset > spec.each.len() {
            return Err(TranslateError::NonContiguousPositions(key.to_string()));
        }
        offset
    } else {
        0
    };
    spec.each.insert(index, value.clone());
    spec.position = Some(anchor.min(position));
    Ok(())
}
