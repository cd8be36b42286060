//! Payment method selection.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Payment options offered on the payment step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    ApplePay,
    GooglePay,
    Affirm,
    Klarna,
    Afterpay,
    Card,
}

impl PaymentMethod {
    /// All methods in the order they are offered.
    pub const ALL: [PaymentMethod; 6] = [
        PaymentMethod::ApplePay,
        PaymentMethod::GooglePay,
        PaymentMethod::Affirm,
        PaymentMethod::Klarna,
        PaymentMethod::Afterpay,
        PaymentMethod::Card,
    ];

    /// Wire identifier (e.g. "apple-pay").
    pub fn id(&self) -> &'static str {
        match self {
            PaymentMethod::ApplePay => "apple-pay",
            PaymentMethod::GooglePay => "google-pay",
            PaymentMethod::Affirm => "affirm",
            PaymentMethod::Klarna => "klarna",
            PaymentMethod::Afterpay => "afterpay",
            PaymentMethod::Card => "card",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::ApplePay => "Apple Pay",
            PaymentMethod::GooglePay => "Google Pay",
            PaymentMethod::Affirm => "Affirm",
            PaymentMethod::Klarna => "Klarna",
            PaymentMethod::Afterpay => "Afterpay",
            PaymentMethod::Card => "Credit / Debit Card",
        }
    }

    /// Whether the card sub-form applies.
    pub fn requires_card_details(&self) -> bool {
        matches!(self, PaymentMethod::Card)
    }
}

impl FromStr for PaymentMethod {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|m| m.id() == s)
            .ok_or_else(|| CommerceError::UnknownPaymentMethod(s.to_string()))
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Card fields, only consulted when [`PaymentMethod::Card`] is selected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct CardDetails {
    pub card_number: String,
    /// MM/YY as typed.
    pub expiry: String,
    pub cvv: String,
    pub name_on_card: String,
}

impl CardDetails {
    /// Labels of blank card fields.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            (&self.card_number, "card number"),
            (&self.expiry, "expiry"),
            (&self.cvv, "cvv"),
            (&self.name_on_card, "name on card"),
        ]
        .into_iter()
        .filter(|(value, _)| value.trim().is_empty())
        .map(|(_, label)| label)
        .collect()
    }

    /// Card number with all but the last four digits hidden.
    pub fn masked_number(&self) -> String {
        let digits: Vec<char> = self.card_number.chars().filter(char::is_ascii_digit).collect();
        let visible = digits.len().min(4);
        let last: String = digits[digits.len() - visible..].iter().collect();
        format!("•••• {}", last)
    }
}
