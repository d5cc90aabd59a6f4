//! Compiled route table.

use http::Method;
use http::request::Parts;
use offcache::{Strategy, StrategySelector};
use regex::Regex;

/// How a rule matches the request path.
#[derive(Debug, Clone)]
pub enum PathMatcher {
    /// The path equals the string.
    Exact(String),
    /// The path starts with the string.
    Prefix(String),
    /// The regex finds a match anywhere in the path.
    Regex(Regex),
}

impl PathMatcher {
    /// Whether `path` satisfies this matcher.
    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathMatcher::Exact(expected) => path == expected,
            PathMatcher::Prefix(prefix) => path.starts_with(prefix.as_str()),
            PathMatcher::Regex(regex) => regex.is_match(path),
        }
    }
}

/// One rule of the route table.
///
/// A rule without a method matches every method, a rule without a path
/// matcher matches every path.
#[derive(Debug, Clone)]
pub struct Route {
    method: Option<Method>,
    path: Option<PathMatcher>,
    strategy: Strategy,
}

impl Route {
    /// Rule matching every request.
    pub fn new(strategy: Strategy) -> Self {
        Self {
            method: None,
            path: None,
            strategy,
        }
    }

    /// Restricts the rule to one method.
    pub fn method(self, method: Method) -> Self {
        Self {
            method: Some(method),
            ..self
        }
    }

    /// Restricts the rule to matching paths.
    pub fn path(self, path: PathMatcher) -> Self {
        Self {
            path: Some(path),
            ..self
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Whether the request head satisfies both the method and path.
    pub fn matches(&self, parts: &Parts) -> bool {
        if let Some(method) = &self.method
            && *method != parts.method
        {
            return false;
        }
        self.path
            .as_ref()
            .is_none_or(|path| path.matches(parts.uri.path()))
    }
}

/// Ordered list of [`Route`]s with a fallback strategy.
#[derive(Debug, Clone)]
pub struct RouteSelector {
    routes: Vec<Route>,
    default: Strategy,
}

impl RouteSelector {
    /// Empty table answering `default` for every request.
    pub fn new(default: Strategy) -> Self {
        Self {
            routes: Vec::new(),
            default,
        }
    }

    /// Appends a rule. Rules added earlier take precedence.
    pub fn route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Strategy for requests that match no rule.
    pub fn default_strategy(&self) -> Strategy {
        self.default
    }
}

impl StrategySelector for RouteSelector {
    fn select(&self, parts: &Parts) -> Strategy {
        self.routes
            .iter()
            .find(|route| route.matches(parts))
            .map(Route::strategy)
            .unwrap_or(self.default)
    }
}
