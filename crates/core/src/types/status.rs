//! Status and payment-method enums for orders.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Order fulfillment status.
///
/// Orders are created as `Processing`; the remaining states exist for
/// order-history display and have no transition logic in this system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        };
        f.write_str(s)
    }
}

/// Payment method selected at checkout.
///
/// Persisted using the checkout form tags
/// (`credit-card`, `upi`, `netbanking`, `cod`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "credit-card")]
    CreditCard,
    #[serde(rename = "upi")]
    Upi,
    #[serde(rename = "netbanking")]
    NetBanking,
    #[serde(rename = "cod")]
    CashOnDelivery,
}

impl PaymentMethod {
    /// The persisted wire tag for this method.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CreditCard => "credit-card",
            Self::Upi => "upi",
            Self::NetBanking => "netbanking",
            Self::CashOnDelivery => "cod",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credit-card" => Ok(Self::CreditCard),
            "upi" => Ok(Self::Upi),
            "netbanking" => Ok(Self::NetBanking),
            "cod" => Ok(Self::CashOnDelivery),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}
