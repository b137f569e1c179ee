//! Caller-supplied extension hooks.
//!
//! Hooks run before standard dispatch for every operation and may claim it,
//! replacing the default handling. Two shapes are supported: keyed
//! interceptors selected by the operation's dotted path, and a single
//! updater callback that claims an operation by writing through an observed
//! view of the update.

use patch_to_mongo_pointer::to_dot;
use regex::Regex;
use serde_json::Value;

use crate::types::{HandlerError, Op, TranslateError};
use crate::update::{PushEntry, UpdateDocument};

// ── Custom-key selectors ───────────────────────────────────────────────────

/// Selects operations for a keyed interceptor by their dotted field path.
///
/// Patterns use the `regex` crate, whose linear-time engine keeps matching
/// bounded even for caller-supplied patterns.
#[derive(Debug, Clone)]
pub enum PathKey {
    /// Matches when the dotted path equals this string exactly.
    Exact(String),
    /// Matches when the pattern finds a match in the dotted path.
    Pattern(Regex),
}

impl PathKey {
    fn matches(&self, field: &str) -> bool {
        match self {
            PathKey::Exact(key) => key == field,
            PathKey::Pattern(pattern) => pattern.is_match(field),
        }
    }
}

impl From<&str> for PathKey {
    fn from(key: &str) -> PathKey {
        PathKey::Exact(key.to_string())
    }
}

impl From<String> for PathKey {
    fn from(key: String) -> PathKey {
        PathKey::Exact(key)
    }
}

impl From<Regex> for PathKey {
    fn from(pattern: Regex) -> PathKey {
        PathKey::Pattern(pattern)
    }
}

/// Handler for a matched custom key.
///
/// Receives the operation and a snapshot of the update built so far, and
/// returns the replacement update. An `Err` discards the handler's effect
/// and the scan moves on as if the key had not matched.
pub type CustomKeyFn = dyn Fn(&Op, UpdateDocument) -> Result<UpdateDocument, HandlerError>;

/// Per-operation callback given a write-observing view of the update.
///
/// Writing through the view claims the operation. An `Err` aborts the whole
/// translation call.
pub type UpdaterFn = dyn Fn(&mut ObservedUpdate<'_>, &Op) -> Result<(), HandlerError>;

// ── Options ────────────────────────────────────────────────────────────────

/// Hook configuration for [`translate_with`](crate::translate_with).
///
/// Keyed interceptors are consulted first, in registration order, first
/// match wins; the updater callback runs only when no key claimed the
/// operation.
#[derive(Default)]
pub struct TranslateOptions {
    custom_keys: Vec<(PathKey, Box<CustomKeyFn>)>,
    updater: Option<Box<UpdaterFn>>,
}

impl TranslateOptions {
    pub fn new() -> TranslateOptions {
        TranslateOptions::default()
    }

    /// Registers a keyed interceptor for operations whose dotted path
    /// matches `key`.
    ///
    /// ```
    /// use patch_to_mongo::TranslateOptions;
    /// use regex::Regex;
    ///
    /// let options = TranslateOptions::new().custom_key(
    ///     Regex::new(r"^custom\.[0-9]+$").unwrap(),
    ///     |op, mut update| {
    ///         update.set.insert("custom.flag".into(), serde_json::json!(true));
    ///         let _ = op;
    ///         Ok(update)
    ///     },
    /// );
    /// ```
    pub fn custom_key<K, F>(mut self, key: K, handler: F) -> TranslateOptions
    where
        K: Into<PathKey>,
        F: Fn(&Op, UpdateDocument) -> Result<UpdateDocument, HandlerError> + 'static,
    {
        self.custom_keys.push((key.into(), Box::new(handler)));
        self
    }

    /// Installs the updater callback.
    pub fn updater<F>(mut self, updater: F) -> TranslateOptions
    where
        F: Fn(&mut ObservedUpdate<'_>, &Op) -> Result<(), HandlerError> + 'static,
    {
        self.updater = Some(Box::new(updater));
        self
    }

    /// Offers `op` to the configured hooks. Returns `Ok(true)` when a hook
    /// claimed the operation and standard dispatch must be skipped.
    pub(crate) fn intercept(
        &self,
        update: &mut UpdateDocument,
        op: &Op,
    ) -> Result<bool, TranslateError> {
        let field = to_dot(op.path());
        for (key, handler) in &self.custom_keys {
            if !key.matches(&field) {
                continue;
            }
            match handler(op, update.clone()) {
                Ok(replacement) => {
                    *update = replacement;
                    return Ok(true);
                }
                Err(error) => {
                    // A failing handler is treated as a non-match; the scan
                    // continues and standard dispatch remains available.
                    tracing::warn!(
                        op = op.op_name(),
                        path = %field,
                        error = %error,
                        "custom key handler failed, skipping it"
                    );
                }
            }
        }
        if let Some(updater) = &self.updater {
            let mut view = ObservedUpdate::new(update);
            updater(&mut view, op)?;
            if view.is_dirty() {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

// ── Observed view ──────────────────────────────────────────────────────────

/// A write-observing view of the in-progress update, handed to the updater
/// callback.
///
/// The dirty flag is scoped to one callback invocation: writes made through
/// the view during the call claim the current operation, writes the
/// translator performs afterward do not.
pub struct ObservedUpdate<'a> {
    update: &'a mut UpdateDocument,
    dirty: bool,
}

impl<'a> ObservedUpdate<'a> {
    pub(crate) fn new(update: &'a mut UpdateDocument) -> ObservedUpdate<'a> {
        ObservedUpdate { update, dirty: false }
    }

    /// Read access to the update built so far. Reading never claims the
    /// operation.
    pub fn update(&self) -> &UpdateDocument {
        self.update
    }

    /// True once any write went through this view.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Writes `value` under `$set`, claiming the operation.
    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.update.set.insert(field.into(), value);
        self.dirty = true;
    }

    /// Marks `field` for `$unset`, claiming the operation.
    pub fn unset(&mut self, field: impl Into<String>) {
        self.update.unset.insert(field.into());
        self.dirty = true;
    }

    /// Writes a `$push` entry for `field`, claiming the operation.
    pub fn push(&mut self, field: impl Into<String>, entry: PushEntry) {
        self.update.push.insert(field.into(), entry);
        self.dirty = true;
    }
}
