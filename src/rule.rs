use serde::{Deserialize, Serialize};

use crate::constraint::Constraint;

/// A rule in the host framework's shared rule vocabulary.
///
/// The rule-aggregation engine holds rules as values of this type and
/// dispatches each kind to the evaluator that understands it. This crate
/// implements the evaluator for [`Rule::Validate`]; sibling kinds are
/// listed so that dispatch mismatches are representable, but they are
/// checked elsewhere in the host framework.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "kebab-case")]
pub enum Rule {
    /// Validate request parameters against declarative constraints.
    Validate(ValidateRule),
    /// Require an authenticated user session (handled by the host
    /// framework's security evaluator, not by this crate).
    LoggedIn,
}

impl Rule {
    /// Returns a stable name for this rule kind, used in dispatch
    /// error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Rule::Validate(_) => "validate",
            Rule::LoggedIn => "logged-in",
        }
    }
}

impl From<ValidateRule> for Rule {
    fn from(rule: ValidateRule) -> Self {
        Rule::Validate(rule)
    }
}

/// Declares which request parameter must satisfy which constraints.
///
/// A descriptor is plain data: an optional dotted parameter path and the
/// constraints to check it against. It carries no behavior; evaluation
/// lives in [`ValidateRuleHandler`](crate::ValidateRuleHandler).
///
/// When `parameter` is absent the entire parameter set of the request is
/// validated as one object.
///
/// # Examples
///
/// ```
/// use verifier_params::{Constraint, ValidateRule};
/// use serde_json::json;
///
/// // Validate the "id" parameter.
/// let rule = ValidateRule::for_parameter("id", [Constraint::new(json!({"not_null": true}))]);
/// assert_eq!(rule.parameter(), Some("id"));
///
/// // Validate the whole parameter set.
/// let rule = ValidateRule::new([Constraint::new(json!({"expr": "from < to"}))]);
/// assert_eq!(rule.parameter(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidateRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parameter: Option<String>,
    constraints: Vec<Constraint>,
}

impl ValidateRule {
    /// Creates a rule validating the whole parameter set as one object.
    ///
    /// `constraints` must not be empty; a rule with nothing to check is
    /// meaningless and the aggregation engine never produces one.
    pub fn new(constraints: impl IntoIterator<Item = Constraint>) -> Self {
        Self {
            parameter: None,
            constraints: constraints.into_iter().collect(),
        }
    }

    /// Creates a rule validating a single parameter.
    ///
    /// `parameter` is a dotted path: `"id"` reads the request parameter
    /// `id`, `"entity.id"` reads field `id` of the value stored under the
    /// `entity` parameter.
    pub fn for_parameter(
        parameter: impl Into<String>,
        constraints: impl IntoIterator<Item = Constraint>,
    ) -> Self {
        Self {
            parameter: Some(parameter.into()),
            constraints: constraints.into_iter().collect(),
        }
    }

    /// The dotted parameter path, or `None` when the whole parameter set
    /// is validated.
    ///
    /// An empty path is treated the same as an absent one; callers never
    /// see `Some("")`.
    pub fn parameter(&self) -> Option<&str> {
        match self.parameter.as_deref() {
            Some("") | None => None,
            some => some,
        }
    }

    /// The constraints the resolved value must satisfy.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }
}
