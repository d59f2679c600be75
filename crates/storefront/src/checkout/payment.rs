//! Payment gateway seam.
//!
//! The state machine is written against [`PaymentGateway`] so the
//! simulation can be swapped for a real processor (or a deterministic
//! test double) without touching checkout logic.

use std::time::Duration;

use rand::Rng;
use tracing::{debug, warn};

use crate::orders::OrderDraft;

/// Result of a charge attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// The charge went through.
    Approved,
    /// The charge was declined; always retryable.
    Declined {
        /// User-facing reason.
        reason: String,
    },
}

/// An external payment processor.
#[allow(async_fn_in_trait)]
pub trait PaymentGateway: Send + Sync {
    /// Attempt to charge for a draft order. Never fails at the Rust
    /// level; a refused charge is a [`PaymentOutcome::Declined`].
    async fn charge(&self, draft: &OrderDraft) -> PaymentOutcome;
}

/// Stand-in gateway: waits a configured latency, then approves with a
/// configured probability, independent of the order contents.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    success_rate: f64,
    latency: Duration,
}

impl SimulatedGateway {
    /// Create a gateway with the given approval probability (clamped to
    /// `0.0..=1.0`) and simulated processing latency.
    #[must_use]
    pub fn new(success_rate: f64, latency: Duration) -> Self {
        Self {
            success_rate: success_rate.clamp(0.0, 1.0),
            latency,
        }
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(0.9, Duration::from_millis(400))
    }
}

impl PaymentGateway for SimulatedGateway {
    async fn charge(&self, draft: &OrderDraft) -> PaymentOutcome {
        tokio::time::sleep(self.latency).await;
        let approved = rand::rng().random_bool(self.success_rate);
        if approved {
            debug!(total = %draft.total, method = %draft.payment_method, "charge approved");
            PaymentOutcome::Approved
        } else {
            warn!(total = %draft.total, method = %draft.payment_method, "charge declined");
            PaymentOutcome::Declined {
                reason: "Payment could not be completed. Please try again.".to_owned(),
            }
        }
    }
}

/// Deterministic gateway that approves every charge immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysApprove;

impl PaymentGateway for AlwaysApprove {
    async fn charge(&self, _draft: &OrderDraft) -> PaymentOutcome {
        PaymentOutcome::Approved
    }
}

/// Deterministic gateway that declines every charge immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysDecline;

impl PaymentGateway for AlwaysDecline {
    async fn charge(&self, _draft: &OrderDraft) -> PaymentOutcome {
        PaymentOutcome::Declined {
            reason: "Payment could not be completed. Please try again.".to_owned(),
        }
    }
}
