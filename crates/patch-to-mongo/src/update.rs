//! The MongoDB update document accumulator.
//!
//! A translation call folds a patch into one [`UpdateDocument`]: dotted field
//! paths grouped under the `$set`, `$unset`, and `$push` operators. Insertion
//! order of keys is preserved so the rendered document lists fields in the
//! order the patch touched them.

use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value};

// ── Push accumulation ──────────────────────────────────────────────────────

/// Accumulated state for one `$push` key.
///
/// A single end-append stays in the bare form MongoDB accepts
/// (`{"$push": {"k": v}}`); everything else needs the `$each` modifier.
#[derive(Debug, Clone, PartialEq)]
pub enum PushEntry {
    /// Exactly one appended value so far.
    Single(Value),
    /// Two or more appends, or any positional insert.
    Spec(PushSpec),
}

/// The `$each` form of a `$push`: a run of values and, for positional
/// inserts, the index where the run starts.
#[derive(Debug, Clone, PartialEq)]
pub struct PushSpec {
    pub each: Vec<Value>,
    /// `Some` for positional runs, `None` for plural end-appends.
    pub position: Option<usize>,
}

impl PushEntry {
    fn to_value(&self) -> Value {
        match self {
            PushEntry::Single(value) => value.clone(),
            PushEntry::Spec(spec) => spec.to_value(),
        }
    }
}

impl PushSpec {
    fn to_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("$each".to_string(), Value::Array(self.each.clone()));
        if let Some(position) = self.position {
            obj.insert("$position".to_string(), Value::from(position));
        }
        Value::Object(obj)
    }
}

// ── Update document ────────────────────────────────────────────────────────

/// A MongoDB update document under construction.
///
/// The three sections map dotted field paths to their pending writes. The
/// translator and any updater callback write the fields directly; rendering
/// happens once at the end via [`to_value`](UpdateDocument::to_value).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateDocument {
    /// Fields written via `$set`.
    pub set: IndexMap<String, Value>,
    /// Fields removed via `$unset` (rendered with the conventional `1`).
    pub unset: IndexSet<String>,
    /// Array appends and inserts via `$push`.
    pub push: IndexMap<String, PushEntry>,
}

impl UpdateDocument {
    pub fn new() -> UpdateDocument {
        UpdateDocument::default()
    }

    /// True when no operation contributed anything, e.g. a patch of only
    /// `test` ops.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.unset.is_empty() && self.push.is_empty()
    }

    /// Renders the accumulated update as a JSON object.
    ///
    /// Sections with no entries are omitted entirely; an untouched document
    /// renders as `{}`.
    pub fn to_value(&self) -> Value {
        let mut doc = Map::new();
        if !self.set.is_empty() {
            let mut set = Map::new();
            for (field, value) in &self.set {
                set.insert(field.clone(), value.clone());
            }
            doc.insert("$set".to_string(), Value::Object(set));
        }
        if !self.unset.is_empty() {
            let mut unset = Map::new();
            for field in &self.unset {
                unset.insert(field.clone(), Value::from(1));
            }
            doc.insert("$unset".to_string(), Value::Object(unset));
        }
        if !self.push.is_empty() {
            let mut push = Map::new();
            for (field, entry) in &self.push {
                push.insert(field.clone(), entry.to_value());
            }
            doc.insert("$push".to_string(), Value::Object(push));
        }
        Value::Object(doc)
    }
}
