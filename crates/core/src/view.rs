//! Screen visibility state machine.
//!
//! ```text
//!   Browsing --RequestCheckout (cart not empty)--> Checkout
//!   Checkout --Back--------------------------------> Browsing
//!   Checkout --OrderConfirmed----------------------> Confirmation
//!   Confirmation --ShopAgain-----------------------> Browsing
//! ```
//!
//! Any other navigation leaves the state unchanged.

use serde::{Deserialize, Serialize};

/// The mutually exclusive screen currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    /// Product grid plus cart.
    #[default]
    Browsing,
    /// Checkout form.
    Checkout,
    /// Thank-you screen after a placed order.
    Confirmation,
}

impl ViewState {
    /// Target state for a navigation request, or `None` if the request is not
    /// a valid transition from this state.
    #[must_use]
    pub const fn next(self, navigation: Navigation, cart_is_empty: bool) -> Option<Self> {
        match (self, navigation) {
            (Self::Browsing, Navigation::RequestCheckout) if !cart_is_empty => {
                Some(Self::Checkout)
            }
            (Self::Checkout, Navigation::Back) | (Self::Confirmation, Navigation::ShopAgain) => {
                Some(Self::Browsing)
            }
            (Self::Checkout, Navigation::OrderConfirmed) => Some(Self::Confirmation),
            _ => None,
        }
    }

    /// Whether the product grid and cart are visible.
    #[must_use]
    pub const fn shows_catalog(self) -> bool {
        matches!(self, Self::Browsing)
    }

    /// Checkout and confirmation share the narrow single-column layout.
    #[must_use]
    pub const fn uses_checkout_layout(self) -> bool {
        matches!(self, Self::Checkout | Self::Confirmation)
    }

    /// Stable lowercase name, used in logs and markup.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browsing => "browsing",
            Self::Checkout => "checkout",
            Self::Confirmation => "confirmation",
        }
    }
}

impl core::fmt::Display for ViewState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to change screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    RequestCheckout,
    Back,
    OrderConfirmed,
    ShopAgain,
}

/// Holds the current [`ViewState`] and applies guarded transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewController {
    current: ViewState,
}

impl ViewController {
    /// Start on the browsing screen.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: ViewState::Browsing,
        }
    }

    /// The visible screen.
    #[must_use]
    pub const fn current(&self) -> ViewState {
        self.current
    }

    /// Apply a navigation request. Returns the new state if it changed.
    pub fn navigate(&mut self, navigation: Navigation, cart_is_empty: bool) -> Option<ViewState> {
        let next = self.current.next(navigation, cart_is_empty)?;
        tracing::debug!(from = %self.current, to = %next, "view transition");
        self.current = next;
        Some(next)
    }
}
