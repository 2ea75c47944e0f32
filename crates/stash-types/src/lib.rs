//! Stash Types
//!
//! This crate defines the value types shared across the Stash workspace
//! (currently `stash-core` and `stash-cli`): the structural descriptor key,
//! the immutable descriptor it identifies, and the coordinates produced by
//! the reference geocoder.

#![deny(missing_docs)]

mod types;
pub use types::{Coordinates, Descriptor, DescriptorKey};
