//! Page routes and the host navigation hook.

use std::fmt;

use aether_commerce::checkout::RedirectTarget;
use aether_commerce::ProductId;
use serde::{Deserialize, Serialize};

/// A storefront page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "page", content = "id", rename_all = "lowercase")]
pub enum Route {
    /// Landing page with the featured grid.
    #[default]
    Home,
    /// Product listing, optionally narrowed to a category.
    Products(Option<String>),
    /// Product detail page.
    Product(ProductId),
    /// The checkout wizard.
    Checkout,
    /// Any other host path.
    Other(String),
}

impl Route {
    /// Parse a host path such as `/product/3` or `/products?category=bags`.
    pub fn parse(path: &str) -> Self {
        let (path, query) = match path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (path, None),
        };
        let trimmed = path.trim_end_matches('/');

        match trimmed {
            "" => Route::Home,
            "/checkout" => Route::Checkout,
            "/products" => Route::Products(query.and_then(|q| {
                q.split('&')
                    .filter_map(|pair| pair.split_once('='))
                    .find(|(key, _)| *key == "category")
                    .map(|(_, value)| value.to_string())
            })),
            _ => match trimmed.strip_prefix("/product/") {
                Some(id) if !id.is_empty() && !id.contains('/') => {
                    Route::Product(ProductId::new(id))
                }
                _ => Route::Other(path.to_string()),
            },
        }
    }

    /// The host path for this route.
    pub fn to_path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Products(None) => "/products".to_string(),
            Route::Products(Some(category)) => format!("/products?category={}", category),
            Route::Product(id) => format!("/product/{}", id),
            Route::Checkout => "/checkout".to_string(),
            Route::Other(path) => path.clone(),
        }
    }

    pub fn is_checkout(&self) -> bool {
        matches!(self, Route::Checkout)
    }
}

impl From<&RedirectTarget> for Route {
    fn from(target: &RedirectTarget) -> Self {
        match target {
            RedirectTarget::Home => Route::Home,
            RedirectTarget::Path(path) => Route::parse(path),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// Implemented by the host to move the shopper to another page.
///
/// Called from the redirect task, so it must be thread-safe.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &Route);
}

/// A navigator for sessions with no host router attached.
#[derive(Debug, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&self, route: &Route) {
        tracing::debug!(route = %route, "Navigation requested with no host attached");
    }
}
