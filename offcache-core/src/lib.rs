#![warn(missing_docs)]
//! # offcache-core
//!
//! Core types shared by every crate of the offcache offline caching layer.
//!
//! This crate defines the vocabulary that storages (like `offcache-moka`),
//! the strategy executor (`offcache`) and the intercept boundary
//! (`offcache-tower`) speak:
//!
//! - **Name** cache partitions ([`CacheName`], [`PartitionNames`])
//! - **Key** cache entries by request ([`RequestKey`])
//! - **Hold** buffered responses that must be duplicated explicitly ([`StoredResponse`])
//! - **Track** where a response came from ([`ResponseSource`])
//! - **Call** the network ([`Upstream`])
//! - **Detach** background cache writes ([`Offload`])

pub mod key;
pub mod name;
pub mod offload;
pub mod response;
pub mod upstream;

pub use key::RequestKey;
pub use name::{CacheName, PartitionNames};
pub use offload::Offload;
pub use response::{
    OFFLINE_BODY, OFFLINE_STATUS, OFFLINE_STATUS_TEXT, ResponseSource, StoredResponse,
};
#[doc(hidden)]
pub use smol_str::SmolStr;
pub use upstream::{FnUpstream, Upstream, upstream_fn};

/// Raw byte data type used for buffered response bodies.
/// Using `Bytes` makes [`StoredResponse::duplicate`] a reference count bump.
pub type Raw = bytes::Bytes;
