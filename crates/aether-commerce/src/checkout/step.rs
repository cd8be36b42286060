//! Checkout steps.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Steps in the checkout wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    /// Contact and shipping address.
    Shipping,
    /// Payment method selection.
    Payment,
    /// Order review before submission.
    Review,
}

impl CheckoutStep {
    /// All steps in wizard order.
    pub const ALL: [CheckoutStep; 3] = [
        CheckoutStep::Shipping,
        CheckoutStep::Payment,
        CheckoutStep::Review,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "shipping",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Review => "review",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CheckoutStep::Shipping => "Shipping",
            CheckoutStep::Payment => "Payment",
            CheckoutStep::Review => "Review",
        }
    }

    /// Zero-based position in the wizard.
    pub fn index(&self) -> usize {
        match self {
            CheckoutStep::Shipping => 0,
            CheckoutStep::Payment => 1,
            CheckoutStep::Review => 2,
        }
    }

    /// The step "Continue" leads to.
    pub fn next(&self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::Shipping => Some(CheckoutStep::Payment),
            CheckoutStep::Payment => Some(CheckoutStep::Review),
            CheckoutStep::Review => None,
        }
    }

    /// The step "Back" leads to.
    pub fn previous(&self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::Shipping => None,
            CheckoutStep::Payment => Some(CheckoutStep::Shipping),
            CheckoutStep::Review => Some(CheckoutStep::Payment),
        }
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a step is drawn in the progress indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Completed,
    Active,
    Upcoming,
}

impl StepStatus {
    /// Status of `step` while the wizard is on `current`.
    pub fn of(step: CheckoutStep, current: CheckoutStep) -> Self {
        match step.index().cmp(&current.index()) {
            std::cmp::Ordering::Less => StepStatus::Completed,
            std::cmp::Ordering::Equal => StepStatus::Active,
            std::cmp::Ordering::Greater => StepStatus::Upcoming,
        }
    }
}
