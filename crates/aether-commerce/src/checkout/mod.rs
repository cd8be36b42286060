//! Checkout module.
//!
//! Contains the checkout wizard, its form fields and the order confirmation.

mod step;
mod shipping;
mod payment;
mod order;
mod wizard;

pub use step::{CheckoutStep, StepStatus};
pub use shipping::{ShippingDetails, ShippingField};
pub use payment::{CardDetails, PaymentMethod};
pub use order::{OrderConfirmation, RedirectRequest, RedirectTarget, DEFAULT_REDIRECT_DELAY};
pub use wizard::{CheckoutView, CheckoutWizard};
