//! patch-to-mongo — translate JSON Patch (RFC 6902) into MongoDB updates.
//!
//! A patch computed against an in-memory document becomes a single partial
//! update document (`$set` / `$unset` / `$push`) that applies the whole diff
//! atomically, without re-reading and re-writing the persisted document.
//!
//! ```
//! use patch_to_mongo::{from_json_patch, translate};
//! use serde_json::json;
//!
//! let patch = from_json_patch(&json!([
//!     {"op": "add", "path": "/tags/-", "value": "expired"},
//!     {"op": "replace", "path": "/owner/name", "value": "dave"},
//!     {"op": "remove", "path": "/draft"},
//! ]))?;
//!
//! let update = translate(&patch)?;
//! assert_eq!(update.to_value(), json!({
//!     "$set": {"owner.name": "dave"},
//!     "$unset": {"draft": 1},
//!     "$push": {"tags": "expired"},
//! }));
//! # Ok::<(), patch_to_mongo::TranslateError>(())
//! ```
//!
//! `move` and `copy` decode but are rejected at translation time; `test` is
//! a structural no-op. Successive `add`s into the same array merge into one
//! `$push` run, and callers can override handling for chosen paths through
//! [`TranslateOptions`].

pub mod codec;
pub mod options;
pub mod translate;
pub mod types;
pub mod update;

pub use codec::{from_json, from_json_patch, to_json, to_json_patch};
pub use options::{CustomKeyFn, ObservedUpdate, PathKey, TranslateOptions, UpdaterFn};
pub use translate::{translate, translate_with};
pub use types::{HandlerError, Op, TranslateError};
pub use update::{PushEntry, PushSpec, UpdateDocument};

pub use patch_to_mongo_pointer::to_dot;
