use serde_json::{Map, Value};

use crate::constraint::ConstraintValidator;
use crate::error::{CheckError, ValidationFailure};
use crate::property::{PathAccessor, PropertyAccessor};
use crate::request::Request;
use crate::rule::{Rule, ValidateRule};

/// The entry point a rule-dispatch engine calls on each evaluator.
///
/// The engine matches rule kinds to handlers and aggregates pass/fail
/// outcomes into an allow/deny decision; a handler only answers for the
/// one rule kind it implements.
pub trait RuleHandler {
    /// Checks one rule against a request, optionally scoped to a named
    /// UI component.
    ///
    /// Returns `Ok(())` when the rule is satisfied.
    ///
    /// # Errors
    ///
    /// [`CheckError::UnknownRule`] when `rule` is a kind this handler
    /// does not implement, [`CheckError::Failed`] when the request does
    /// not satisfy the rule.
    fn check_rule(
        &self,
        rule: &Rule,
        request: &Request,
        component: Option<&str>,
    ) -> Result<(), CheckError>;
}

/// Evaluates [`ValidateRule`] descriptors against requests.
///
/// Holds the two collaborator capabilities injected at construction
/// time: the constraint validator that interprets constraint payloads
/// and the property accessor that resolves dotted paths. Both are held
/// immutably, so a handler is safe to share across concurrent request
/// checks.
///
/// # Examples
///
/// ```
/// use verifier_params::{
///     Constraint, ConstraintViolation, Request, Rule, RuleHandler, ValidateRule,
///     ValidateRuleHandler, ViolationList,
/// };
/// use serde_json::{json, Value};
///
/// // A toy validator: the "not_null" constraint rejects null values.
/// let handler = ValidateRuleHandler::new(|value: &Value, _: &[Constraint]| {
///     if value.is_null() {
///         ViolationList::from(vec![ConstraintViolation::new("must not be null")])
///     } else {
///         ViolationList::empty()
///     }
/// });
///
/// let rule = Rule::from(ValidateRule::for_parameter("id", [Constraint::new(json!("not_null"))]));
/// let request = Request::new("Article").with_parameter("id", json!(2));
/// assert!(handler.check_rule(&rule, &request, None).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ValidateRuleHandler<V, A = PathAccessor> {
    validator: V,
    accessor: A,
}

impl<V> ValidateRuleHandler<V>
where
    V: ConstraintValidator,
{
    /// Creates a handler using the default dotted-path accessor.
    pub fn new(validator: V) -> Self {
        Self {
            validator,
            accessor: PathAccessor,
        }
    }
}

impl<V, A> ValidateRuleHandler<V, A>
where
    V: ConstraintValidator,
    A: PropertyAccessor,
{
    /// Creates a handler with a custom property accessor.
    pub fn with_accessor(validator: V, accessor: A) -> Self {
        Self {
            validator,
            accessor,
        }
    }

    fn check_validate(
        &self,
        rule: &ValidateRule,
        request: &Request,
        component: Option<&str>,
    ) -> Result<(), CheckError> {
        let (effective_key, value) = self.resolve(rule, request, component)?;

        let violations = self.validator.validate(&value, rule.constraints());
        if violations.is_empty() {
            tracing::trace!(key = ?effective_key, "parameter validation passed");
            return Ok(());
        }

        let message = match &effective_key {
            Some(key) => format!("Parameter \"{}\" does not match the constraints.", key),
            None => "Parameters do not match the constraints.".to_string(),
        };
        tracing::debug!(
            key = ?effective_key,
            component,
            violations = violations.count(),
            "parameter validation failed"
        );
        Err(ValidationFailure::new(
            rule.clone(),
            component.map(str::to_string),
            value,
            violations,
            message,
        )
        .into())
    }

    /// Resolves the value to validate and, when the rule names a
    /// parameter, the effective (component-prefixed) key used for it.
    fn resolve(
        &self,
        rule: &ValidateRule,
        request: &Request,
        component: Option<&str>,
    ) -> Result<(Option<String>, Value), CheckError> {
        match (rule.parameter(), component) {
            // A named parameter: read the effective key off the parameter
            // mapping as one structured object, descending dotted paths.
            // An absent key is a checkable null, not an error.
            (Some(parameter), _) => {
                let key = match component {
                    Some(component) => format!("{}-{}", component, parameter),
                    None => parameter.to_string(),
                };
                let parameters = Value::Object(request.parameters().clone());
                let value = if self.accessor.is_readable(&parameters, &key) {
                    self.accessor.get_value(&parameters, &key)?
                } else {
                    Value::Null
                };
                Ok((Some(key), value))
            }
            // No parameter but a component: everything belonging to the
            // component, prefixes stripped, validated as one object.
            (None, Some(component)) => {
                let prefix = format!("{}-", component);
                let mut composite = Map::new();
                for (key, value) in request.parameters() {
                    if let Some(stripped) = key.strip_prefix(&prefix) {
                        composite.insert(stripped.to_string(), value.clone());
                    }
                }
                Ok((None, Value::Object(composite)))
            }
            // Neither: the whole parameter set as one object.
            (None, None) => Ok((None, Value::Object(request.parameters().clone()))),
        }
    }
}

impl<V, A> RuleHandler for ValidateRuleHandler<V, A>
where
    V: ConstraintValidator,
    A: PropertyAccessor,
{
    fn check_rule(
        &self,
        rule: &Rule,
        request: &Request,
        component: Option<&str>,
    ) -> Result<(), CheckError> {
        match rule {
            Rule::Validate(rule) => self.check_validate(rule, request, component),
            other => Err(CheckError::UnknownRule { kind: other.kind() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::{Constraint, ConstraintViolation, ViolationList};
    use serde_json::json;
    use std::cell::RefCell;

    // Records every value it is asked to validate and reports a fixed
    // number of violations, standing in for the external validation
    // library.
    fn scripted_validator(
        calls: &RefCell<Vec<Value>>,
        violations: usize,
    ) -> impl ConstraintValidator + '_ {
        move |value: &Value, _: &[Constraint]| {
            calls.borrow_mut().push(value.clone());
            (0..violations)
                .map(|n| ConstraintViolation::new(format!("violation {}", n)))
                .collect::<ViolationList>()
        }
    }

    fn rule(parameter: Option<&str>) -> Rule {
        let constraints = [Constraint::new(json!({"equal_to": "parameter-value"}))];
        match parameter {
            Some(parameter) => ValidateRule::for_parameter(parameter, constraints).into(),
            None => ValidateRule::new(constraints).into(),
        }
    }

    #[test]
    fn passing_parameter_returns_ok() {
        let calls = RefCell::new(Vec::new());
        let handler = ValidateRuleHandler::new(scripted_validator(&calls, 0));
        let request = Request::new("Test").with_parameter("parameter", json!("parameter-value"));

        handler
            .check_rule(&rule(Some("parameter")), &request, None)
            .unwrap();
        assert_eq!(*calls.borrow(), [json!("parameter-value")]);
    }

    #[test]
    fn failing_parameter_carries_full_context() {
        let calls = RefCell::new(Vec::new());
        let handler = ValidateRuleHandler::new(scripted_validator(&calls, 1));
        let request = Request::new("Test").with_parameter("parameter", json!("wrong-value"));

        let err = handler
            .check_rule(&rule(Some("parameter")), &request, None)
            .unwrap_err();
        match err {
            CheckError::Failed(failure) => {
                assert_eq!(
                    failure.message(),
                    "Parameter \"parameter\" does not match the constraints."
                );
                assert_eq!(failure.component(), None);
                assert_eq!(failure.value(), &json!("wrong-value"));
                assert_eq!(failure.violations().count(), 1);
                assert_eq!(failure.rule().parameter(), Some("parameter"));
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn dotted_path_descends_into_parameter_value() {
        let calls = RefCell::new(Vec::new());
        let handler = ValidateRuleHandler::new(scripted_validator(&calls, 0));
        let request =
            Request::new("Test").with_parameter("parameter", json!({"property": "property-value"}));

        handler
            .check_rule(&rule(Some("parameter.property")), &request, None)
            .unwrap();
        assert_eq!(*calls.borrow(), [json!("property-value")]);
    }

    #[test]
    fn component_prefixes_the_effective_key() {
        let calls = RefCell::new(Vec::new());
        let handler = ValidateRuleHandler::new(scripted_validator(&calls, 1));
        let request = Request::new("Test")
            .with_parameter("component-parameter", json!({"property": "wrong-value"}));

        let err = handler
            .check_rule(&rule(Some("parameter.property")), &request, Some("component"))
            .unwrap_err();
        match err {
            CheckError::Failed(failure) => {
                assert_eq!(
                    failure.message(),
                    "Parameter \"component-parameter.property\" does not match the constraints."
                );
                assert_eq!(failure.component(), Some("component"));
                assert_eq!(failure.value(), &json!("wrong-value"));
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn missing_parameter_is_validated_as_null() {
        let calls = RefCell::new(Vec::new());
        let handler = ValidateRuleHandler::new(scripted_validator(&calls, 0));
        let request = Request::new("Test").with_parameter("other", json!(1));

        handler
            .check_rule(&rule(Some("parameter")), &request, None)
            .unwrap();
        assert_eq!(*calls.borrow(), [Value::Null]);
    }

    #[test]
    fn whole_parameter_set_is_validated_as_one_object() {
        let calls = RefCell::new(Vec::new());
        let handler = ValidateRuleHandler::new(scripted_validator(&calls, 0));
        let request = Request::new("Test")
            .with_parameter("from", json!(1))
            .with_parameter("to", json!(2));

        handler.check_rule(&rule(None), &request, None).unwrap();
        assert_eq!(*calls.borrow(), [json!({"from": 1, "to": 2})]);
    }

    #[test]
    fn component_scope_collects_prefixed_parameters() {
        let calls = RefCell::new(Vec::new());
        let handler = ValidateRuleHandler::new(scripted_validator(&calls, 0));
        let request = Request::new("Test")
            .with_parameter("article-from", json!(1))
            .with_parameter("article-to", json!(2))
            .with_parameter("unrelated", json!(3));

        handler
            .check_rule(&rule(None), &request, Some("article"))
            .unwrap();
        assert_eq!(*calls.borrow(), [json!({"from": 1, "to": 2})]);
    }

    #[test]
    fn whole_object_failure_uses_the_generic_message() {
        let calls = RefCell::new(Vec::new());
        let handler = ValidateRuleHandler::new(scripted_validator(&calls, 2));
        let request = Request::new("Test").with_parameter("article-from", json!(2));

        let err = handler
            .check_rule(&rule(None), &request, Some("article"))
            .unwrap_err();
        match err {
            CheckError::Failed(failure) => {
                assert_eq!(failure.message(), "Parameters do not match the constraints.");
                assert_eq!(failure.component(), Some("article"));
                assert_eq!(failure.violations().count(), 2);
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn unknown_rule_kind_is_rejected() {
        let calls = RefCell::new(Vec::new());
        let handler = ValidateRuleHandler::new(scripted_validator(&calls, 0));
        let request = Request::new("Test");

        let err = handler
            .check_rule(&Rule::LoggedIn, &request, None)
            .unwrap_err();
        match err {
            CheckError::UnknownRule { kind } => assert_eq!(kind, "logged-in"),
            other => panic!("expected unknown-rule error, got {:?}", other),
        }
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn empty_parameter_behaves_like_whole_object() {
        let calls = RefCell::new(Vec::new());
        let handler = ValidateRuleHandler::new(scripted_validator(&calls, 0));
        let request = Request::new("Test").with_parameter("id", json!(7));

        handler
            .check_rule(&rule(Some("")), &request, None)
            .unwrap();
        assert_eq!(*calls.borrow(), [json!({"id": 7})]);
    }
}
