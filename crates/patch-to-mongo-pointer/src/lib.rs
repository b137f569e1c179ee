//! JSON Pointer (RFC 6901) utilities and MongoDB dotted field-path conversion.
//!
//! MongoDB update operators address nested fields with dot notation
//! (`"address.city"`), while JSON Patch addresses them with
//! [JSON Pointer (RFC 6901)](https://tools.ietf.org/html/rfc6901) strings
//! (`"/address/city"`). This crate provides the conversion between the two,
//! plus the usual pointer helpers (escape, parse, format).
//!
//! # Example
//!
//! ```
//! use patch_to_mongo_pointer::{to_dot, parse_json_pointer};
//!
//! // Convert a pointer to MongoDB dot notation
//! assert_eq!(to_dot("/address/city"), "address.city");
//!
//! // Escapes decode after the dot-join: `~1` is `/`, `~0` is `~`
//! assert_eq!(to_dot("/foo~1bar~0"), "foo/bar~");
//!
//! // Parse a pointer into its components
//! let path = parse_json_pointer("/foo/bar");
//! assert_eq!(path, vec!["foo".to_string(), "bar".to_string()]);
//! ```

use thiserror::Error;

/// Maximum allowed pointer string length for [`validate_pointer`].
const MAX_POINTER_LENGTH: usize = 1024;

/// Convert a JSON Pointer string to MongoDB dot notation.
///
/// The single leading `/` is stripped, every remaining `/` becomes a `.`,
/// and escape sequences decode afterwards (`~1` → `/`, `~0` → `~`). The
/// escapes decode after the dot-join on purpose: a decoded `/` is a literal
/// character inside one field name and must not be re-split into segments.
///
/// Total over valid pointers; the root pointer `"/"` converts to `""`.
///
/// # Example
///
/// ```
/// use patch_to_mongo_pointer::to_dot;
///
/// assert_eq!(to_dot("/name"), "name");
/// assert_eq!(to_dot("/address/city"), "address.city");
/// assert_eq!(to_dot("/foo~1bar~0"), "foo/bar~");
/// assert_eq!(to_dot("/"), "");
/// ```
pub fn to_dot(pointer: &str) -> String {
    let trimmed = pointer.strip_prefix('/').unwrap_or(pointer);
    trimmed
        .replace('/', ".")
        .replace("~1", "/")
        .replace("~0", "~")
}

/// Unescapes a JSON Pointer path component.
///
/// Per RFC 6901, `~1` is replaced with `/` and `~0` is replaced with `~`.
///
/// # Example
///
/// ```
/// use patch_to_mongo_pointer::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// assert_eq!(unescape_component("no-escapes"), "no-escapes");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // Order matters: ~1 must be replaced before ~0
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer path component.
///
/// Per RFC 6901, `/` is replaced with `~1` and `~` is replaced with `~0`.
///
/// # Example
///
/// ```
/// use patch_to_mongo_pointer::escape_component;
///
/// assert_eq!(escape_component("a~b"), "a~0b");
/// assert_eq!(escape_component("c/d"), "c~1d");
/// ```
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    // Order matters: ~ must be escaped before /
    component.replace('~', "~0").replace('/', "~1")
}

/// Parse a JSON Pointer string into unescaped path components.
///
/// The empty string is the root pointer and returns an empty vec; otherwise
/// the leading `/` is stripped and each component is unescaped.
///
/// # Example
///
/// ```
/// use patch_to_mongo_pointer::parse_json_pointer;
///
/// assert_eq!(parse_json_pointer(""), Vec::<String>::new());
/// assert_eq!(parse_json_pointer("/foo/bar"), vec!["foo", "bar"]);
/// assert_eq!(parse_json_pointer("/a~0b/c~1d"), vec!["a~b", "c/d"]);
/// ```
pub fn parse_json_pointer(pointer: &str) -> Vec<String> {
    if pointer.is_empty() {
        return Vec::new();
    }
    pointer[1..].split('/').map(unescape_component).collect()
}

/// Format path components into a JSON Pointer string.
///
/// Returns an empty string for the root path (no components).
///
/// # Example
///
/// ```
/// use patch_to_mongo_pointer::format_json_pointer;
///
/// assert_eq!(format_json_pointer(&[]), "");
/// assert_eq!(
///     format_json_pointer(&["a~b".to_string(), "c/d".to_string()]),
///     "/a~0b/c~1d"
/// );
/// ```
pub fn format_json_pointer(path: &[String]) -> String {
    if path.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    for component in path {
        out.push('/');
        out.push_str(&escape_component(component));
    }
    out
}

/// Check if a string consists only of ASCII digits.
///
/// This is the array-index test for path segments. It is deliberately not a
/// general numeric parse: `"+1"`, `"1e3"`, and `"1234abc"` are all rejected,
/// as is the empty string. `"0"` and `"007"` are accepted.
///
/// # Example
///
/// ```
/// use patch_to_mongo_pointer::is_integer;
///
/// assert!(is_integer("0"));
/// assert!(is_integer("123"));
/// assert!(!is_integer("+1"));
/// assert!(!is_integer("1234abc"));
/// assert!(!is_integer(""));
/// ```
pub fn is_integer(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    s.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PointerError {
    #[error("POINTER_INVALID")]
    PointerInvalid,
    #[error("POINTER_TOO_LONG")]
    PointerTooLong,
}

/// Validate a JSON Pointer string before converting or parsing it.
///
/// # Errors
///
/// - [`PointerError::PointerInvalid`] if the pointer is non-empty but does
///   not start with `/`
/// - [`PointerError::PointerTooLong`] if the pointer exceeds 1024 characters
///
/// # Example
///
/// ```
/// use patch_to_mongo_pointer::validate_pointer;
///
/// validate_pointer("").unwrap(); // root is valid
/// validate_pointer("/foo/bar").unwrap();
/// validate_pointer("foo").unwrap_err(); // missing leading /
/// ```
pub fn validate_pointer(pointer: &str) -> Result<(), PointerError> {
    if pointer.is_empty() {
        return Ok(());
    }
    if !pointer.starts_with('/') {
        return Err(PointerError::PointerInvalid);
    }
    if pointer.len() > MAX_POINTER_LENGTH {
        return Err(PointerError::PointerTooLong);
    }
    Ok(())
}
