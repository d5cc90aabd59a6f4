//! Serializable route table.

use std::str::FromStr;

use http::Method;
use offcache::{Strategy, TokioOffload, WriteMode};
use offcache_core::{CacheName, PartitionNames};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::route::{PathMatcher, Route, RouteSelector};

/// Top level configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRoutes {
    /// Storage names of the STATIC and DYNAMIC partitions.
    #[serde(default)]
    pub cache_names: PartitionNames,
    /// Inline or offloaded cache writes.
    #[serde(default)]
    pub write: WriteConfig,
    /// Strategy for requests that match no route.
    #[serde(default = "default_strategy")]
    pub default: Strategy,
    /// Rules in precedence order.
    #[serde(default)]
    pub routes: Vec<ConfigRoute>,
}

fn default_strategy() -> Strategy {
    Strategy::NetworkOnly
}

impl Default for ConfigRoutes {
    fn default() -> Self {
        Self {
            cache_names: PartitionNames::default(),
            write: WriteConfig::default(),
            default: default_strategy(),
            routes: Vec::new(),
        }
    }
}

impl ConfigRoutes {
    /// Compiles the route table, rejecting unknown methods, relative paths
    /// and invalid regexes.
    pub fn into_selector(self) -> Result<RouteSelector, ConfigError> {
        self.routes
            .into_iter()
            .try_fold(RouteSelector::new(self.default), |selector, route| {
                Ok(selector.route(route.into_route()?))
            })
    }

    /// Validated partition names.
    pub fn into_partition_names(self) -> Result<PartitionNames, ConfigError> {
        let static_name = self.cache_names.resolve(CacheName::Static);
        if static_name == self.cache_names.resolve(CacheName::Dynamic) {
            return Err(ConfigError::DuplicateCacheName(static_name.to_owned()));
        }
        Ok(self.cache_names)
    }

    /// Write mode for [`offcache::CacheStrategies::with_write_mode`].
    pub fn write_mode(&self) -> WriteMode<TokioOffload> {
        self.write.into_write_mode()
    }
}

/// How cache writes are performed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WriteConfig {
    /// Await writes before the response is returned.
    #[default]
    Inline,
    /// Spawn writes onto the tokio runtime.
    Offload,
}

impl WriteConfig {
    /// Offloaded writes go to [`TokioOffload`].
    pub fn into_write_mode(self) -> WriteMode<TokioOffload> {
        match self {
            WriteConfig::Inline => WriteMode::Inline,
            WriteConfig::Offload => WriteMode::Offload(TokioOffload),
        }
    }
}

/// One route rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRoute {
    /// HTTP method, case-insensitive. Absent matches every method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Absent matches every path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathConfig>,
    /// Strategy for requests this rule matches.
    pub strategy: Strategy,
}

impl ConfigRoute {
    /// Validates the method and path matcher.
    pub fn into_route(self) -> Result<Route, ConfigError> {
        let mut route = Route::new(self.strategy);
        if let Some(method) = self.method {
            let parsed = Method::from_str(&method.to_ascii_uppercase())
                .map_err(|_| ConfigError::InvalidMethod(method.clone()))?;
            if !is_known_method(&parsed) {
                return Err(ConfigError::InvalidMethod(method));
            }
            route = route.method(parsed);
        }
        if let Some(path) = self.path {
            route = route.path(path.into_matcher()?);
        }
        Ok(route)
    }
}

// `Method::from_str` accepts any token as an extension method, which would
// turn a typo into a rule that never matches.
fn is_known_method(method: &Method) -> bool {
    [
        Method::GET,
        Method::HEAD,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::PATCH,
        Method::OPTIONS,
        Method::CONNECT,
        Method::TRACE,
    ]
    .contains(method)
}

/// Path matcher of a route.
///
/// ```yaml
/// path: { exact: "/index.html" }
/// path: { prefix: "/api/" }
/// path: { regex: "\\.(css|js)$" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathConfig {
    /// Whole-path comparison.
    Exact(String),
    /// Leading segment of the path.
    Prefix(String),
    /// Regex searched anywhere in the path.
    Regex(String),
}

impl PathConfig {
    /// Exact and prefix paths must start with `/`; regexes must compile.
    pub fn into_matcher(self) -> Result<PathMatcher, ConfigError> {
        match self {
            PathConfig::Exact(path) => absolute(path).map(PathMatcher::Exact),
            PathConfig::Prefix(path) => absolute(path).map(PathMatcher::Prefix),
            PathConfig::Regex(pattern) => match Regex::new(&pattern) {
                Ok(regex) => Ok(PathMatcher::Regex(regex)),
                Err(source) => Err(ConfigError::InvalidRegex { pattern, source }),
            },
        }
    }
}

fn absolute(path: String) -> Result<String, ConfigError> {
    if path.starts_with('/') {
        Ok(path)
    } else {
        Err(ConfigError::InvalidPath(path))
    }
}
