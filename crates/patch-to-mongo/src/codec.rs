//! JSON codec for RFC 6902 operation objects.
//!
//! Decoding is strict about the members each operation requires and ignores
//! anything extra. A present-but-null `value` is a valid value; a missing
//! one is an error.

use serde_json::{json, Map, Value};

use patch_to_mongo_pointer::validate_pointer;

use crate::types::{Op, TranslateError};

/// Decodes one operation object.
///
/// Unknown `op` tags are rejected as unsupported; malformed members are
/// rejected as invalid.
pub fn from_json(value: &Value) -> Result<Op, TranslateError> {
    let obj = value
        .as_object()
        .ok_or_else(|| TranslateError::InvalidOp("operation must be an object".to_string()))?;
    let op = obj
        .get("op")
        .and_then(Value::as_str)
        .ok_or_else(|| TranslateError::InvalidOp("missing string \"op\" member".to_string()))?;
    let path = pointer_member(obj, "path")?;
    match op {
        "add" => Ok(Op::Add { path, value: value_member(obj, "add")? }),
        "remove" => Ok(Op::Remove { path }),
        "replace" => Ok(Op::Replace { path, value: value_member(obj, "replace")? }),
        "copy" => Ok(Op::Copy { path, from: pointer_member(obj, "from")? }),
        "move" => Ok(Op::Move { path, from: pointer_member(obj, "from")? }),
        "test" => Ok(Op::Test { path, value: value_member(obj, "test")? }),
        other => Err(TranslateError::UnsupportedOp(other.to_string())),
    }
}

/// Decodes a whole patch, an array of operation objects, preserving order.
pub fn from_json_patch(value: &Value) -> Result<Vec<Op>, TranslateError> {
    let ops = value.as_array().ok_or_else(|| {
        TranslateError::InvalidOp("patch must be an array of operations".to_string())
    })?;
    ops.iter().map(from_json).collect()
}

/// Encodes one operation as its RFC 6902 object form.
pub fn to_json(op: &Op) -> Value {
    match op {
        Op::Add { path, value } => json!({"op": "add", "path": path, "value": value}),
        Op::Remove { path } => json!({"op": "remove", "path": path}),
        Op::Replace { path, value } => json!({"op": "replace", "path": path, "value": value}),
        Op::Copy { path, from } => json!({"op": "copy", "path": path, "from": from}),
        Op::Move { path, from } => json!({"op": "move", "path": path, "from": from}),
        Op::Test { path, value } => json!({"op": "test", "path": path, "value": value}),
    }
}

/// Encodes a patch as a JSON array of operation objects.
pub fn to_json_patch(ops: &[Op]) -> Value {
    Value::Array(ops.iter().map(to_json).collect())
}

fn pointer_member(obj: &Map<String, Value>, member: &str) -> Result<String, TranslateError> {
    let path = obj.get(member).and_then(Value::as_str).ok_or_else(|| {
        TranslateError::InvalidOp(format!("missing string \"{member}\" member"))
    })?;
    if path.is_empty() {
        return Err(TranslateError::InvalidOp(format!(
            "\"{member}\" must be a non-empty pointer"
        )));
    }
    validate_pointer(path).map_err(|error| {
        TranslateError::InvalidOp(format!("invalid \"{member}\" pointer: {error}"))
    })?;
    Ok(path.to_string())
}

fn value_member(obj: &Map<String, Value>, op: &str) -> Result<Value, TranslateError> {
    obj.get("value").cloned().ok_or_else(|| {
        TranslateError::InvalidOp(format!("{op} operation requires a \"value\" member"))
    })
}
