//! Integration tests for Toybox.
//!
//! The storefront router is driven in-process, one request at a time, with
//! the session cookie carried between requests the way a browser would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p toybox-integration-tests
//! ```

use std::path::PathBuf;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use tower::ServiceExt;

use toybox_core::Catalog;
use toybox_storefront::config::StorefrontConfig;
use toybox_storefront::state::AppState;

/// A response with its body read into a string.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Value of a response header, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Redirect target of a 303/307 response.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.header(header::LOCATION.as_str())
    }
}

/// One simulated browser session against a fresh storefront.
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl TestClient {
    /// Storefront with the built-in catalog and default configuration.
    #[must_use]
    pub fn new() -> Self {
        let config = StorefrontConfig {
            static_dir: static_dir(),
            ..StorefrontConfig::default()
        };
        Self::with_state(AppState::new(config, Catalog::builtin()))
    }

    #[must_use]
    pub fn with_state(state: AppState) -> Self {
        Self {
            app: toybox_storefront::app(state),
            cookie: None,
        }
    }

    /// Send a GET request.
    ///
    /// # Panics
    ///
    /// Panics if the router fails to produce a response.
    pub async fn get(&mut self, path: &str) -> TestResponse {
        self.send(Request::get(path), Body::empty()).await
    }

    /// Send a urlencoded form POST.
    ///
    /// # Panics
    ///
    /// Panics if the router fails to produce a response.
    pub async fn post_form(&mut self, path: &str, form: &str) -> TestResponse {
        let builder =
            Request::post(path).header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        self.send(builder, Body::from(form.to_string())).await
    }

    /// Send a request built by the caller, carrying the session cookie.
    ///
    /// # Panics
    ///
    /// Panics if the request is invalid or the body cannot be read.
    #[allow(clippy::unwrap_used)]
    pub async fn send(
        &mut self,
        mut builder: axum::http::request::Builder,
        body: Body,
    ) -> TestResponse {
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie.as_str());
        }
        let request = builder.body(body).unwrap();
        let response = self.app.clone().oneshot(request).await.unwrap();

        if let Some(cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
        {
            self.cookie = Some(cookie.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Storefront static assets, resolved from this crate's location.
#[must_use]
pub fn static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront/static")
}
