//! Gold Sabertooth Core - Shared types library.
//!
//! This crate provides common types used across all Gold Sabertooth components:
//! - `storefront` - Shopify Storefront API client, cart store and JSON API
//! - `cli` - Command-line driver for the catalog and the persisted cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for Shopify IDs, money and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
