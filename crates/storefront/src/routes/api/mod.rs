//! JSON API routes.

pub mod products;
