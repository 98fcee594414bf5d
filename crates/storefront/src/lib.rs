//! Gold Sabertooth Storefront library.
//!
//! - [`shopify`] - Storefront API client: catalog reads and cart mutations
//! - [`cart`] - Cart store mirroring the shopper's Shopify cart, with persistence
//! - [`routes`] - JSON API served by the `goldsabertooth-storefront` binary

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod shopify;
pub mod state;
