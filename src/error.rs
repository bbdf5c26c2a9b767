use std::fmt;

use serde_json::Value;

use crate::constraint::ViolationList;
use crate::property::PropertyError;
use crate::rule::ValidateRule;

/// Errors that can occur while checking a rule against a request.
#[derive(Debug)]
pub enum CheckError {
    /// The dispatcher handed this evaluator a rule kind it does not
    /// implement. A miswiring signal, never a validation outcome.
    UnknownRule {
        /// Name of the unexpected rule kind.
        kind: &'static str,
    },
    /// The resolved value failed its constraints: the expected "request
    /// denied" answer, carrying the full failure context.
    Failed(ValidationFailure),
    /// A property-resolution error from the bound accessor, propagated
    /// unchanged.
    Property(PropertyError),
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckError::UnknownRule { kind } => write!(f, "Unknown rule '{}' given.", kind),
            CheckError::Failed(failure) => write!(f, "{}", failure),
            CheckError::Property(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CheckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CheckError::UnknownRule { .. } => None,
            CheckError::Failed(failure) => Some(failure),
            CheckError::Property(err) => Some(err),
        }
    }
}

impl From<ValidationFailure> for CheckError {
    fn from(failure: ValidationFailure) -> Self {
        CheckError::Failed(failure)
    }
}

impl From<PropertyError> for CheckError {
    fn from(err: PropertyError) -> Self {
        CheckError::Property(err)
    }
}

/// A failed parameter validation, with everything a caller needs to turn
/// it into an access denial.
///
/// Constructed at the failure site inside the evaluator and never
/// mutated afterwards. Callers are expected to catch it and respond with
/// a denial; the structured fields support logging and rendering which
/// field failed, beyond the summary [`message`](Self::message).
#[derive(Debug)]
pub struct ValidationFailure {
    rule: ValidateRule,
    component: Option<String>,
    value: Value,
    violations: ViolationList,
    message: String,
}

impl ValidationFailure {
    pub(crate) fn new(
        rule: ValidateRule,
        component: Option<String>,
        value: Value,
        violations: ViolationList,
        message: String,
    ) -> Self {
        Self {
            rule,
            component,
            value,
            violations,
            message,
        }
    }

    /// The rule descriptor whose check failed.
    pub fn rule(&self) -> &ValidateRule {
        &self.rule
    }

    /// The component scope in effect, if any.
    pub fn component(&self) -> Option<&str> {
        self.component.as_deref()
    }

    /// The resolved value that was actually validated.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The violations reported by the constraint validator, unmodified.
    pub fn violations(&self) -> &ViolationList {
        &self.violations
    }

    /// Human-readable summary naming the offending parameter.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationFailure {}
