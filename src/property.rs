//! Dotted-path property access over structured values.

use std::fmt;

use serde_json::Value;

/// The property-resolution capability the evaluator reads values through.
///
/// Implementations answer whether a dotted path is readable on a value
/// and, if so, what it resolves to. The evaluator always guards
/// `get_value` with `is_readable`, so a conforming implementation only
/// fails on paths it reported unreadable.
pub trait PropertyAccessor {
    /// Whether `path` can be read on `value`.
    fn is_readable(&self, value: &Value, path: &str) -> bool;

    /// Resolves `path` on `value`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] when the path is not readable.
    fn get_value(&self, value: &Value, path: &str) -> Result<Value, PropertyError>;
}

/// The default accessor: splits the path on `.` and descends object
/// fields.
///
/// This is the shared "mapping as readable object" adapter: the evaluator
/// wraps a request's parameter mapping in a [`Value::Object`] once and
/// reads dotted paths through this type, instead of rebuilding ad-hoc
/// lookup logic per call. Only object fields are descended; array
/// indexing and other addressing schemes belong to custom accessors.
///
/// # Examples
///
/// ```
/// use verifier_params::{PathAccessor, PropertyAccessor};
/// use serde_json::json;
///
/// let accessor = PathAccessor;
/// let value = json!({"entity": {"id": 1}});
/// assert!(accessor.is_readable(&value, "entity.id"));
/// assert_eq!(accessor.get_value(&value, "entity.id").unwrap(), json!(1));
/// assert!(!accessor.is_readable(&value, "entity.missing"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PathAccessor;

impl PathAccessor {
    fn resolve<'a>(&self, value: &'a Value, path: &str) -> Option<&'a Value> {
        let mut current = value;
        for segment in path.split('.') {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }
}

impl PropertyAccessor for PathAccessor {
    fn is_readable(&self, value: &Value, path: &str) -> bool {
        self.resolve(value, path).is_some()
    }

    fn get_value(&self, value: &Value, path: &str) -> Result<Value, PropertyError> {
        self.resolve(value, path)
            .cloned()
            .ok_or_else(|| PropertyError::unreadable(path))
    }
}

/// A property-resolution failure reported by a [`PropertyAccessor`].
///
/// The evaluator adds no translation layer for these; they propagate to
/// callers as raised.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyError {
    path: String,
}

impl PropertyError {
    /// Creates an error for a path that cannot be read.
    pub fn unreadable(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// The path that failed to resolve.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for PropertyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Property path '{}' is not readable.", self.path)
    }
}

impl std::error::Error for PropertyError {}
