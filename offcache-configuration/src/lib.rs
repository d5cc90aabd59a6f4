//! # offcache-configuration
//!
//! Declarative configuration for offcache, deserialized from YAML with
//! `serde-saphyr`:
//!
//! ```yaml
//! cache_names:
//!   static: app-static-v1
//!   dynamic: app-dynamic-v1
//! write: Offload
//! default: NetworkOnly
//! routes:
//!   - path: { prefix: "/assets/" }
//!     strategy: StaticOnly
//!   - method: GET
//!     path: { regex: "\\.(css|js|png)$" }
//!     strategy: CacheFirst
//!   - method: GET
//!     path: { prefix: "/api/" }
//!     strategy: NetworkFirst
//! ```
//!
//! [`ConfigRoutes::into_selector`] compiles the route table into a
//! [`RouteSelector`]. Rules are tried in order and the first match wins;
//! requests matching no rule use the `default` strategy.

pub mod config;
pub mod error;
pub mod route;

pub use config::{ConfigRoute, ConfigRoutes, PathConfig, WriteConfig};
pub use error::ConfigError;
pub use route::{PathMatcher, Route, RouteSelector};
