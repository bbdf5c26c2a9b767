//! Declarative request-parameter validation for Verifier-style
//! authorization pipelines.
//!
//! This crate ships one rule kind and its evaluator:
//!
//! - [`ValidateRule`]: a data-only descriptor naming a request parameter
//!   (optionally nested via a dotted path) and the constraints it must
//!   satisfy
//! - [`ValidateRuleHandler`]: resolves the target value from a request's
//!   parameter mapping, delegates to an external constraint validator,
//!   and reports failures with full structured context
//!
//! Constraint semantics and property resolution are capabilities the
//! host binds at construction time ([`ConstraintValidator`],
//! [`PropertyAccessor`]); this crate never interprets constraints itself.
//!
//! # Examples
//!
//! ```
//! use verifier_params::{
//!     Constraint, ConstraintViolation, Request, Rule, RuleHandler, ValidateRule,
//!     ValidateRuleHandler, ViolationList,
//! };
//! use serde_json::{json, Value};
//!
//! // Bind whatever validation library the host uses; a closure will do.
//! let handler = ValidateRuleHandler::new(|value: &Value, constraints: &[Constraint]| {
//!     constraints
//!         .iter()
//!         .filter(|c| c.payload() != value)
//!         .map(|c| ConstraintViolation::new(format!("expected {}", c.payload())))
//!         .collect::<ViolationList>()
//! });
//!
//! let rule = Rule::from(ValidateRule::for_parameter("id", [Constraint::new(json!(2))]));
//!
//! // Component scoping: the "article" component's "id" parameter lives
//! // under the key "article-id".
//! let request = Request::new("Article").with_parameter("article-id", json!(2));
//! assert!(handler.check_rule(&rule, &request, Some("article")).is_ok());
//!
//! let request = Request::new("Article").with_parameter("article-id", json!(3));
//! assert!(handler.check_rule(&rule, &request, Some("article")).is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod constraint;
mod error;
mod evaluator;
mod property;
mod request;
mod rule;

pub use constraint::{Constraint, ConstraintValidator, ConstraintViolation, ViolationList};
pub use error::{CheckError, ValidationFailure};
pub use evaluator::{RuleHandler, ValidateRuleHandler};
pub use property::{PathAccessor, PropertyAccessor, PropertyError};
pub use request::Request;
pub use rule::{Rule, ValidateRule};
