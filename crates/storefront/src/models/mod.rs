//! Session-held models for the storefront.

pub mod session;

pub use session::{keys as session_keys, load_shop_state, save_shop_state};
