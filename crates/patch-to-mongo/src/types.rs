//! Core types for the patch-to-update translation.

use serde_json::Value;
use thiserror::Error;

// ── Errors ─────────────────────────────────────────────────────────────────

/// Error returned by a caller-supplied hook (custom-key handler or updater
/// callback).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerError(pub String);

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for HandlerError {}

/// Error aborting a translation call.
///
/// Every variant except a failing custom-key handler (which is downgraded to
/// a warning, see the options module) is fatal: the update built so far is
/// dropped and never returned.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TranslateError {
    /// The operation kind is `move`, `copy`, or an unrecognized tag.
    #[error("unsupported operation: op = {0}")]
    UnsupportedOp(String),
    /// An end-append and a positional insert target the same array key
    /// within one call, in either order.
    #[error("can't use add op with mixed positions (key = {0})")]
    MixedPositions(String),
    /// A positional insert's offset fell outside the contiguous run already
    /// accumulated for its key.
    #[error("can use add op only with contiguous positions (key = {0})")]
    NonContiguousPositions(String),
    /// A raw operation object could not be decoded.
    #[error("invalid operation: {0}")]
    InvalidOp(String),
    /// The updater callback returned an error; unlike custom-key handlers,
    /// this aborts the whole call.
    #[error("updater failed: {0}")]
    UpdaterFailed(#[from] HandlerError),
}

// ── Op enum ────────────────────────────────────────────────────────────────

/// A JSON Patch operation in the RFC 6902 shape the translator accepts.
///
/// `path` (and `from`) are pointer-syntax strings beginning with `/`;
/// segments may carry the usual escapes (`~1` = `/`, `~0` = `~`).
///
/// `Move` and `Copy` exist so RFC 6902 input decodes without loss, but both
/// are rejected whenever translation reaches them.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Add {
        path: String,
        value: Value,
    },
    Remove {
        path: String,
    },
    Replace {
        path: String,
        value: Value,
    },
    Copy {
        path: String,
        from: String,
    },
    Move {
        path: String,
        from: String,
    },
    /// Precondition assertion; a structural no-op for update building.
    Test {
        path: String,
        value: Value,
    },
}

impl Op {
    /// Returns the operation tag string.
    pub fn op_name(&self) -> &'static str {
        match self {
            Op::Add { .. } => "add",
            Op::Remove { .. } => "remove",
            Op::Replace { .. } => "replace",
            Op::Copy { .. } => "copy",
            Op::Move { .. } => "move",
            Op::Test { .. } => "test",
        }
    }

    /// Returns the target path of the operation.
    pub fn path(&self) -> &str {
        match self {
            Op::Add { path, .. } => path,
            Op::Remove { path } => path,
            Op::Replace { path, .. } => path,
            Op::Copy { path, .. } => path,
            Op::Move { path, .. } => path,
            Op::Test { path, .. } => path,
        }
    }

    /// Returns the carried value for ops that have one.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Op::Add { value, .. } | Op::Replace { value, .. } | Op::Test { value, .. } => {
                Some(value)
            }
            _ => None,
        }
    }
}
