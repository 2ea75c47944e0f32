#![deny(warnings)]
#![allow(missing_docs)]
//! Core functionality for Stash.
//!
//! A single-process, in-memory keyed store with get-or-create semantics and
//! the two access patterns built on it:
//!
//! * [`SharedValuePool`] hands out one shared instance per distinct key
//!   (flyweight style), and [`Collection`] attaches those shared instances to
//!   tagged records.
//! * [`ResultCache`] memoizes an expensive [`Resolver`] so each distinct key
//!   is resolved once (proxy style).
//!
//! Components are plain owned values. There is no global pool: callers build
//! a pool and lend it to the collections that need it.

/// Tagged records referencing pooled descriptors
pub mod collection;
/// Environment-based configuration
pub mod config;
/// Error types
pub mod error;
/// Reference geocoder and its memoizing caches
pub mod geocoder;
/// Computer inventory on top of the descriptor pool
pub mod inventory;
/// Get-or-create keyed store
pub mod keyed_store;
/// Memoizing result cache
pub mod result_cache;
/// Shared value pool
pub mod shared_pool;

pub use collection::{Collection, Record};
pub use config::StashConfig;
pub use error::{StashError, StashResult};
pub use geocoder::{GeocodeCache, Geocoder, StrictGeocodeCache, StrictGeocoder};
pub use inventory::{Computer, ComputerCollection, DescriptorFactory, DescriptorPool};
pub use keyed_store::{KeyedStore, StoreStats};
pub use result_cache::{Resolver, ResultCache};
pub use shared_pool::{Constructor, SharedValuePool};

// Key and value types used by the inventory and geocoder
pub use stash_types::{Coordinates, Descriptor, DescriptorKey};
