//! Single-page shop route handlers.
//!
//! The page shows exactly one section at a time, chosen by the visitor's
//! [`ViewState`]. Every other route applies one event and redirects back here.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;
use tracing::instrument;

use toybox_core::{
    Cart, CartLine, Catalog, CheckoutForm, Event, Outcome, Product, ShopState, ViewState,
};

use crate::error::Result;
use crate::filters;
use crate::models::{load_shop_state, save_shop_state};
use crate::state::AppState;

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub image_url: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            price: product.price.display(),
            image_url: image_url(&product.image),
        }
    }
}

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub product_id: i32,
    pub name: String,
    pub quantity: u32,
    pub line_price: String,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id.as_i32(),
            name: line.name.clone(),
            quantity: line.quantity,
            line_price: line.line_total().display(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: String,
    pub item_count: u32,
    pub is_empty: bool,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().iter().map(CartLineView::from).collect(),
            total: cart.total().display(),
            item_count: cart.item_count(),
            is_empty: cart.is_empty(),
        }
    }
}

/// The shop page template.
#[derive(Template, WebTemplate)]
#[template(path = "shop/index.html")]
pub struct ShopPageTemplate {
    pub view: ViewState,
    pub show_catalog: bool,
    pub show_checkout: bool,
    pub show_confirmation: bool,
    pub checkout_layout: bool,
    pub products: Vec<ProductCardView>,
    pub cart: CartView,
    pub form: CheckoutForm,
    pub notice: Option<String>,
    pub order_reference: Option<String>,
}

impl ShopPageTemplate {
    /// Build the page for a visitor's current state.
    #[must_use]
    pub fn build(catalog: &Catalog, state: &ShopState, notice: Option<String>) -> Self {
        let view = state.view.current();
        Self {
            view,
            show_catalog: view.shows_catalog(),
            show_checkout: view == ViewState::Checkout,
            show_confirmation: view == ViewState::Confirmation,
            checkout_layout: view.uses_checkout_layout(),
            products: catalog
                .list_products()
                .iter()
                .map(ProductCardView::from)
                .collect(),
            cart: CartView::from(&state.cart),
            form: state.form.clone(),
            notice,
            order_reference: state.last_order.map(|id| id.reference()),
        }
    }
}

/// Resolve a catalog image reference to a URL.
///
/// Relative paths are served from `/static`; absolute paths and URLs pass
/// through.
fn image_url(image: &str) -> String {
    if image.starts_with('/') || image.starts_with("http://") || image.starts_with("https://") {
        image.to_string()
    } else {
        format!("/static/{image}")
    }
}

/// Load the visitor's state, apply one event, and save the result.
///
/// State is only written back when the event changed something.
pub async fn apply_event(
    state: &AppState,
    session: &Session,
    event: Event,
) -> Result<(Outcome, ShopState)> {
    let current = load_shop_state(session).await?;
    let (outcome, next) = state.dispatch(current, event);
    if outcome.needs_render() {
        save_shop_state(session, &next).await?;
    }
    Ok((outcome, next))
}

/// Display the shop page in its current view.
#[instrument(skip(state, session))]
pub async fn index(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let shop_state = load_shop_state(&session).await?;
    Ok(ShopPageTemplate::build(state.catalog(), &shop_state, None))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use toybox_core::{MemorySink, ProductId, Shop};

    use super::*;

    #[test]
    fn test_image_url() {
        assert_eq!(image_url("imagenes/arte.svg"), "/static/imagenes/arte.jpg");
        assert_eq!(image_url("/img/a.png"), "/img/a.png");
        assert_eq!(image_url("https://cdn.example/a.png"), "https://cdn.example/a.png");
    }

    #[test]
    fn test_build_browsing_page() {
        let catalog = Catalog::builtin();
        let sink = MemorySink::new();
        let mut shop = Shop::new(&catalog, &sink);
        shop.dispatch(Event::AddProduct(ProductId::new(1)));
        shop.dispatch(Event::AddProduct(ProductId::new(1)));

        let page = ShopPageTemplate::build(&catalog, shop.state(), None);
        assert!(page.show_catalog);
        assert!(!page.show_checkout);
        assert!(!page.checkout_layout);
        assert_eq!(page.products.len(), 6);
        assert_eq!(page.cart.total, "$39.98");
        assert_eq!(page.cart.item_count, 2);
        assert_eq!(page.cart.lines.first().unwrap().line_price, "$39.98");
    }

    #[test]
    fn test_render_empty_cart_disables_checkout() {
        let catalog = Catalog::builtin();
        let page = ShopPageTemplate::build(&catalog, &ShopState::default(), None);
        let html = page.render().unwrap();

        assert!(html.contains("Your cart is empty"));
        assert!(html.contains("$0.00"));
        assert!(html.contains("disabled"));
        assert!(html.contains("Dragón de peluche"));
    }

    #[test]
    fn test_render_checkout_with_notice() {
        let catalog = Catalog::builtin();
        let sink = MemorySink::new();
        let mut shop = Shop::new(&catalog, &sink);
        shop.dispatch(Event::AddProduct(ProductId::new(2)));
        shop.dispatch(Event::RequestCheckout);

        let page = ShopPageTemplate::build(
            &catalog,
            shop.state(),
            Some("Please fill in all required fields.".to_string()),
        );
        let html = page.render().unwrap();

        assert!(html.contains("Please fill in all required fields."));
        assert!(html.contains("action=\"/checkout/submit\""));
        assert!(!html.contains("add-to-cart-button"));
    }

    #[test]
    fn test_render_escapes_customer_input() {
        let catalog = Catalog::builtin();
        let sink = MemorySink::new();
        let mut shop = Shop::new(&catalog, &sink);
        shop.dispatch(Event::AddProduct(ProductId::new(3)));
        shop.dispatch(Event::RequestCheckout);
        shop.dispatch(Event::SubmitOrder(CheckoutForm {
            name: "<script>alert(1)</script>".to_string(),
            email: String::new(),
            address: String::new(),
        }));

        let html = ShopPageTemplate::build(&catalog, shop.state(), None)
            .render()
            .unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
    }
}
