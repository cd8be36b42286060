//! Order confirmation and the post-order redirect.

use crate::cart::OrderTotals;
use crate::checkout::PaymentMethod;
use crate::ids::OrderId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Delay between placing an order and leaving the confirmation screen.
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_secs(3);

/// Where the shopper is sent after an order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(into = "String", from = "String")]
pub enum RedirectTarget {
    /// The storefront home page.
    #[default]
    Home,
    /// Any other path.
    Path(String),
}

impl RedirectTarget {
    pub fn as_path(&self) -> &str {
        match self {
            RedirectTarget::Home => "/",
            RedirectTarget::Path(path) => path,
        }
    }
}

impl From<String> for RedirectTarget {
    fn from(s: String) -> Self {
        match s.as_str() {
            "home" | "/" | "" => RedirectTarget::Home,
            _ => RedirectTarget::Path(s),
        }
    }
}

impl From<RedirectTarget> for String {
    fn from(target: RedirectTarget) -> Self {
        match target {
            RedirectTarget::Home => "home".to_string(),
            RedirectTarget::Path(path) => path,
        }
    }
}

impl FromStr for RedirectTarget {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(RedirectTarget::from(s.to_string()))
    }
}

impl fmt::Display for RedirectTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_path())
    }
}

/// A navigation the host should perform after a delay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectRequest {
    pub target: RedirectTarget,
    pub delay: Duration,
}

impl RedirectRequest {
    pub fn new(target: RedirectTarget, delay: Duration) -> Self {
        Self { target, delay }
    }
}

impl Default for RedirectRequest {
    fn default() -> Self {
        Self::new(RedirectTarget::Home, DEFAULT_REDIRECT_DELAY)
    }
}

/// What the shopper sees after placing an order.
///
/// Totals are captured before the cart is cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub placed_at: DateTime<Utc>,
    pub email: String,
    pub payment_method: Option<PaymentMethod>,
    /// Units ordered.
    pub item_count: i64,
    pub totals: OrderTotals,
    /// Navigation to schedule once the confirmation is shown.
    pub redirect: RedirectRequest,
}
