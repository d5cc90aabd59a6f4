//! Cache partition names.
//!
//! Strategies only ever refer to partitions symbolically through
//! [`CacheName`]. The concrete string a storage uses for a partition comes
//! from [`PartitionNames`], which is shared configuration owned by whoever
//! wires the storage at startup.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;

/// A logical partition of cache storage.
///
/// # Example
/// ```
/// use offcache_core::CacheName;
///
/// assert_eq!(CacheName::Static.to_string(), "STATIC");
/// assert_eq!(CacheName::Dynamic.as_str(), "DYNAMIC");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CacheName {
    /// Long-lived assets, populated by cache-first and read by static-only.
    #[serde(rename = "STATIC", alias = "Static", alias = "static")]
    Static,
    /// Runtime data, populated and read by network-first.
    #[serde(rename = "DYNAMIC", alias = "Dynamic", alias = "dynamic")]
    Dynamic,
}

impl CacheName {
    /// Both partitions, in a stable order.
    pub const ALL: [CacheName; 2] = [CacheName::Static, CacheName::Dynamic];

    /// Returns the symbolic name of the partition.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            CacheName::Static => "STATIC",
            CacheName::Dynamic => "DYNAMIC",
        }
    }
}

impl fmt::Display for CacheName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Concrete storage names for the two partitions.
///
/// Storages resolve a [`CacheName`] through this mapping. Changing a value
/// (for example bumping a version suffix) points the partition at a fresh,
/// empty store.
///
/// # Example
/// ```
/// use offcache_core::{CacheName, PartitionNames};
///
/// let names = PartitionNames::new("app-static-v2", "app-dynamic-v2");
/// assert_eq!(names.resolve(CacheName::Static), "app-static-v2");
/// assert_eq!(PartitionNames::default().resolve(CacheName::Dynamic), "dynamic");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionNames {
    #[serde(rename = "static")]
    static_name: SmolStr,
    #[serde(rename = "dynamic")]
    dynamic_name: SmolStr,
}

impl PartitionNames {
    /// Creates a mapping from explicit partition names.
    pub fn new(static_name: impl Into<SmolStr>, dynamic_name: impl Into<SmolStr>) -> Self {
        Self {
            static_name: static_name.into(),
            dynamic_name: dynamic_name.into(),
        }
    }

    /// Returns the concrete name for a partition.
    #[inline]
    pub fn resolve(&self, name: CacheName) -> &str {
        match name {
            CacheName::Static => &self.static_name,
            CacheName::Dynamic => &self.dynamic_name,
        }
    }
}

impl Default for PartitionNames {
    fn default() -> Self {
        Self {
            static_name: SmolStr::new_static("static"),
            dynamic_name: SmolStr::new_static("dynamic"),
        }
    }
}
