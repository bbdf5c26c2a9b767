use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A read-only view of an incoming application request.
///
/// Carries the presenter/action identity (used by the dispatching engine,
/// not by the evaluator) and the ordered parameter mapping the evaluator
/// resolves values from. Parameter order follows insertion order, matching
/// the host framework's request objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    presenter: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    action: Option<String>,
    parameters: Map<String, Value>,
}

impl Request {
    /// Creates a request for the given presenter with no parameters.
    pub fn new(presenter: impl Into<String>) -> Self {
        Self {
            presenter: presenter.into(),
            action: None,
            parameters: Map::new(),
        }
    }

    /// Sets the action identity. Returns the request for chaining.
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Adds a parameter. Returns the request for chaining.
    ///
    /// # Examples
    ///
    /// ```
    /// use verifier_params::Request;
    /// use serde_json::json;
    ///
    /// let request = Request::new("Article")
    ///     .with_parameter("id", json!(2))
    ///     .with_parameter("entity", json!({"id": 1}));
    /// assert_eq!(request.parameters().len(), 2);
    /// ```
    pub fn with_parameter(mut self, key: impl Into<String>, value: Value) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }

    /// Replaces the whole parameter mapping. Returns the request for chaining.
    pub fn with_parameters(mut self, parameters: Map<String, Value>) -> Self {
        self.parameters = parameters;
        self
    }

    /// The presenter (target) this request is addressed to.
    pub fn presenter(&self) -> &str {
        &self.presenter
    }

    /// The action/signal identity, if any.
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// The ordered parameter mapping.
    pub fn parameters(&self) -> &Map<String, Value> {
        &self.parameters
    }
}
