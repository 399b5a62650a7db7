//! Pocket Shop Core - Shared catalog types.
//!
//! This crate provides the types used across all Pocket Shop components:
//! - `storefront` - State store, catalog view and screen controller
//! - `cli` - Interactive terminal front-end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no shared
//! state. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, prices, products and the catalog envelope

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
