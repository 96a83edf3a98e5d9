//! HTTP handlers for the products resource.

pub mod products;
pub use products::*;
