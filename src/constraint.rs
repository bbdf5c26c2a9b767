//! The constraint-validation seam.
//!
//! Constraint semantics are entirely external to this crate: a
//! [`Constraint`] is an opaque payload handed verbatim to whatever
//! [`ConstraintValidator`] the host binds at construction time, and the
//! resulting [`ViolationList`] is passed through to callers unmodified.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An opaque constraint specification.
///
/// This crate never interprets the payload; it only carries it from the
/// rule descriptor to the bound [`ConstraintValidator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Constraint(Value);

impl Constraint {
    /// Wraps a constraint payload.
    pub fn new(payload: impl Into<Value>) -> Self {
        Self(payload.into())
    }

    /// The raw payload, for the validator implementation to interpret.
    pub fn payload(&self) -> &Value {
        &self.0
    }
}

/// One reported constraint violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintViolation {
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    path: Option<String>,
}

impl ConstraintViolation {
    /// Creates a violation with a message and no path.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
        }
    }

    /// Attaches the property path the violation refers to.
    pub fn at(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Human-readable description of what failed.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Property path within the validated value, if the validator
    /// reported one.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}

/// The countable result of a constraint check.
///
/// An empty list means the value passed; anything else means failure.
/// The evaluator never inspects individual entries, but callers may, to
/// render which field failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViolationList(Vec<ConstraintViolation>);

impl ViolationList {
    /// An empty list, i.e. a passing result.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of reported violations.
    pub fn count(&self) -> usize {
        self.0.len()
    }

    /// Whether the check passed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the reported violations.
    pub fn iter(&self) -> impl Iterator<Item = &ConstraintViolation> {
        self.0.iter()
    }
}

impl FromIterator<ConstraintViolation> for ViolationList {
    fn from_iter<I: IntoIterator<Item = ConstraintViolation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<ConstraintViolation>> for ViolationList {
    fn from(violations: Vec<ConstraintViolation>) -> Self {
        Self(violations)
    }
}

/// The external constraint-checking capability.
///
/// Implementations interpret constraint payloads however they like;
/// returning an empty [`ViolationList`] means the value satisfies all
/// given constraints. Implementations must be stateless with respect to
/// evaluation: the same `(value, constraints)` pair always yields the
/// same outcome.
pub trait ConstraintValidator {
    /// Checks `value` against `constraints` and reports violations.
    fn validate(&self, value: &Value, constraints: &[Constraint]) -> ViolationList;
}

/// Closures are validators, which keeps host wiring and tests light.
///
/// # Examples
///
/// ```
/// use verifier_params::{Constraint, ConstraintValidator, ConstraintViolation, ViolationList};
/// use serde_json::Value;
///
/// let not_null = |value: &Value, _: &[Constraint]| {
///     if value.is_null() {
///         ViolationList::from(vec![ConstraintViolation::new("value must not be null")])
///     } else {
///         ViolationList::empty()
///     }
/// };
/// assert_eq!(not_null.validate(&Value::Null, &[]).count(), 1);
/// ```
impl<F> ConstraintValidator for F
where
    F: Fn(&Value, &[Constraint]) -> ViolationList,
{
    fn validate(&self, value: &Value, constraints: &[Constraint]) -> ViolationList {
        self(value, constraints)
    }
}
