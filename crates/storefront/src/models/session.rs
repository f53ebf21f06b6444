//! Session-related types.
//!
//! Each visitor's [`ShopState`] (cart, visible screen, checkout draft) is
//! stored in their session between requests.

use tower_sessions::Session;

use toybox_core::ShopState;

/// Session keys for storefront data.
pub mod keys {
    /// Key for the visitor's serialized shop state.
    pub const SHOP_STATE: &str = "shop_state";
}

/// Load the visitor's shop state, starting fresh if the session has none.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn load_shop_state(
    session: &Session,
) -> Result<ShopState, tower_sessions::session::Error> {
    Ok(session
        .get::<ShopState>(keys::SHOP_STATE)
        .await?
        .unwrap_or_default())
}

/// Save the visitor's shop state.
///
/// # Errors
///
/// Returns an error if the session store cannot be written.
pub async fn save_shop_state(
    session: &Session,
    state: &ShopState,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::SHOP_STATE, state).await
}
