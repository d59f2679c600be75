//! Checkout flow: a linear, user-driven state machine.
//!
//! `Address -> Payment -> Processing -> Completed`, with a declined
//! charge dropping back to `Payment` for a retry. The machine borrows
//! itself mutably while processing, so overlapping charge attempts are
//! impossible by construction; no lock is needed.

mod address;
mod payment;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info, warn};

use fenestra_core::{PaymentMethod, Price};

use crate::cart::CartStore;
use crate::notify::Notifier;
use crate::orders::{Order, OrderBook, OrderDraft, OrderLine};
use crate::storage::StorageError;

pub use address::{AddressForm, FieldError, ShippingAddress};
pub use payment::{AlwaysApprove, AlwaysDecline, PaymentGateway, PaymentOutcome, SimulatedGateway};

/// Current step of a checkout in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStep {
    /// Entering the shipping address.
    Address,
    /// Selecting a payment method.
    Payment,
    /// A charge is in flight with the gateway.
    Processing,
    /// Terminal: the order was placed and the cart cleared.
    Completed,
}

/// Errors produced by the checkout flow.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout cannot start (or finish) with an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// The operation is not valid in the current step.
    #[error("not valid in the {0:?} step")]
    WrongStep(CheckoutStep),

    /// The address form failed validation; the flow stays at `Address`.
    #[error("address form is invalid")]
    InvalidAddress(Vec<FieldError>),

    /// The gateway declined the charge; the flow is back at `Payment`
    /// with cart and address intact.
    #[error("payment declined: {0}")]
    PaymentDeclined(String),

    /// Storage failure reading the cart or writing the order.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// A checkout in progress over a cart, an order book, and a gateway.
pub struct Checkout<'a, G> {
    cart: &'a CartStore,
    orders: &'a OrderBook,
    gateway: &'a G,
    notifier: &'a dyn Notifier,
    tax_rate: Decimal,
    step: CheckoutStep,
    form: AddressForm,
    shipping_address: Option<ShippingAddress>,
}

impl<'a, G: PaymentGateway> Checkout<'a, G> {
    /// Begin a checkout. Requires a non-empty cart; callers should route
    /// the user back to the shop otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if there is nothing to buy,
    /// or [`CheckoutError::Storage`] if the cart cannot be read.
    pub fn begin(
        cart: &'a CartStore,
        orders: &'a OrderBook,
        gateway: &'a G,
        notifier: &'a dyn Notifier,
        tax_rate: Decimal,
    ) -> Result<Self, CheckoutError> {
        if cart.is_empty()? {
            return Err(CheckoutError::EmptyCart);
        }
        debug!("checkout started");
        Ok(Self {
            cart,
            orders,
            gateway,
            notifier,
            tax_rate,
            step: CheckoutStep::Address,
            form: AddressForm::default(),
            shipping_address: None,
        })
    }

    /// The current step.
    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    /// The retained form state, for re-rendering after a back action or a
    /// validation failure.
    #[must_use]
    pub const fn form(&self) -> &AddressForm {
        &self.form
    }

    /// Submit the address form. On success the flow advances to
    /// `Payment`; on validation failure it stays at `Address` with the
    /// submitted form retained and no other side effect.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidAddress`] with field-level errors,
    /// or [`CheckoutError::WrongStep`] outside the `Address` step.
    pub fn submit_address(&mut self, form: AddressForm) -> Result<(), CheckoutError> {
        if self.step != CheckoutStep::Address {
            return Err(CheckoutError::WrongStep(self.step));
        }
        match form.validate() {
            Ok(address) => {
                self.form = form;
                self.shipping_address = Some(address);
                self.step = CheckoutStep::Payment;
                debug!("address accepted, moving to payment");
                Ok(())
            }
            Err(errors) => {
                self.form = form;
                debug!(fields = errors.len(), "address rejected");
                Err(CheckoutError::InvalidAddress(errors))
            }
        }
    }

    /// Go back from `Payment` to `Address`. Form state is retained.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::WrongStep`] outside the `Payment` step.
    pub fn back(&mut self) -> Result<(), CheckoutError> {
        if self.step != CheckoutStep::Payment {
            return Err(CheckoutError::WrongStep(self.step));
        }
        self.step = CheckoutStep::Address;
        Ok(())
    }

    /// Submit the selected payment method and run the charge.
    ///
    /// Enters `Processing`, builds an order draft from the cart as it
    /// stands right now, and asks the gateway to charge it. On approval,
    /// exactly one order is appended, the cart is cleared, and the flow
    /// completes. On decline, the flow returns to `Payment` with cart and
    /// address intact for a retry.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::WrongStep`] outside the `Payment` step,
    /// [`CheckoutError::EmptyCart`] if the cart was emptied since the
    /// flow began, [`CheckoutError::PaymentDeclined`] on a refused
    /// charge, or [`CheckoutError::Storage`] on storage failure.
    pub async fn place_order(&mut self, method: PaymentMethod) -> Result<Order, CheckoutError> {
        if self.step != CheckoutStep::Payment {
            return Err(CheckoutError::WrongStep(self.step));
        }
        let Some(address) = self.shipping_address.clone() else {
            // unreachable through the public API; Payment implies a
            // validated address
            return Err(CheckoutError::WrongStep(self.step));
        };

        let lines = self.cart.lines()?;
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        self.step = CheckoutStep::Processing;
        let subtotal: Price = lines.iter().map(crate::cart::CartLine::line_price).sum();
        let tax = subtotal.at_rate(self.tax_rate);
        let draft = OrderDraft {
            items: lines.iter().map(OrderLine::from).collect(),
            shipping_address: address,
            payment_method: method,
            subtotal,
            tax,
            total: subtotal + tax,
        };

        info!(total = %draft.total, method = %method, "processing payment");
        match self.gateway.charge(&draft).await {
            PaymentOutcome::Approved => {
                let order = self.orders.place(draft)?;
                self.cart.clear()?;
                self.step = CheckoutStep::Completed;
                self.notifier.notify(
                    "Order Placed Successfully!",
                    &format!(
                        "Your order total of {} has been placed successfully.",
                        order.total
                    ),
                );
                Ok(order)
            }
            PaymentOutcome::Declined { reason } => {
                self.step = CheckoutStep::Payment;
                warn!(%reason, "payment declined, returning to payment step");
                self.notifier.notify("Payment Failed", &reason);
                Err(CheckoutError::PaymentDeclined(reason))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::catalog::seed::initial_products;
    use crate::notify::RecordingNotifier;
    use crate::storage::{KvStore, MemoryStore};

    pub(crate) fn small_draft() -> OrderDraft {
        OrderDraft {
            items: vec![OrderLine {
                name: "Sliding UPVC Window".to_owned(),
                quantity: 1,
                price: Price::from_major(29000),
            }],
            shipping_address: valid_form().validate().unwrap(),
            payment_method: PaymentMethod::Upi,
            subtotal: Price::from_major(29000),
            tax: Price::from_major(5220),
            total: Price::from_major(34220),
        }
    }

    fn valid_form() -> AddressForm {
        AddressForm {
            full_name: "Asha Kulkarni".to_owned(),
            phone_number: "9876543210".to_owned(),
            address: "14 Hill Road, Bandra West".to_owned(),
            city: "Mumbai".to_owned(),
            state: "Maharashtra".to_owned(),
            pincode: "400050".to_owned(),
        }
    }

    struct Fixture {
        cart: CartStore,
        orders: OrderBook,
        sink: RecordingNotifier,
    }

    fn fixture_with_items(product_ids: &[&str]) -> Fixture {
        let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        let cart = CartStore::new(Arc::clone(&store));
        for id in product_ids {
            let product = initial_products()
                .into_iter()
                .find(|p| p.id.as_str() == *id)
                .unwrap();
            cart.add(&product).unwrap();
        }
        Fixture {
            cart,
            orders: OrderBook::new(store),
            sink: RecordingNotifier::new(),
        }
    }

    fn tax_rate() -> Decimal {
        Decimal::new(18, 2)
    }

    #[test]
    fn test_begin_requires_non_empty_cart() {
        let f = fixture_with_items(&[]);
        let err = Checkout::begin(&f.cart, &f.orders, &AlwaysApprove, &f.sink, tax_rate())
            .err()
            .unwrap();
        assert!(matches!(err, CheckoutError::EmptyCart));
    }

    #[test]
    fn test_invalid_address_stays_at_address() {
        let f = fixture_with_items(&["1"]);
        let mut checkout =
            Checkout::begin(&f.cart, &f.orders, &AlwaysApprove, &f.sink, tax_rate()).unwrap();
        assert_eq!(checkout.step(), CheckoutStep::Address);

        let mut form = valid_form();
        form.pincode = "40".to_owned();
        let err = checkout.submit_address(form).unwrap_err();
        assert!(matches!(err, CheckoutError::InvalidAddress(_)));
        assert_eq!(checkout.step(), CheckoutStep::Address);
        // the rejected input is retained for re-rendering
        assert_eq!(checkout.form().pincode, "40");
        // no side effect
        assert!(f.orders.all().unwrap().is_empty());
    }

    #[test]
    fn test_back_retains_form_state() {
        let f = fixture_with_items(&["1"]);
        let mut checkout =
            Checkout::begin(&f.cart, &f.orders, &AlwaysApprove, &f.sink, tax_rate()).unwrap();
        checkout.submit_address(valid_form()).unwrap();
        assert_eq!(checkout.step(), CheckoutStep::Payment);

        checkout.back().unwrap();
        assert_eq!(checkout.step(), CheckoutStep::Address);
        assert_eq!(checkout.form().full_name, "Asha Kulkarni");

        // and forward again without retyping
        let form = checkout.form().clone();
        checkout.submit_address(form).unwrap();
        assert_eq!(checkout.step(), CheckoutStep::Payment);
    }

    #[test]
    fn test_step_guards() {
        let f = fixture_with_items(&["1"]);
        let mut checkout =
            Checkout::begin(&f.cart, &f.orders, &AlwaysApprove, &f.sink, tax_rate()).unwrap();

        // back is only valid in Payment
        assert!(matches!(
            checkout.back(),
            Err(CheckoutError::WrongStep(CheckoutStep::Address))
        ));

        checkout.submit_address(valid_form()).unwrap();
        // address resubmission is only valid in Address
        assert!(matches!(
            checkout.submit_address(valid_form()),
            Err(CheckoutError::WrongStep(CheckoutStep::Payment))
        ));
    }

    #[tokio::test]
    async fn test_successful_checkout_places_one_order_and_clears_cart() {
        let f = fixture_with_items(&["1", "8"]); // 29000 + 23000
        let mut checkout =
            Checkout::begin(&f.cart, &f.orders, &AlwaysApprove, &f.sink, tax_rate()).unwrap();
        checkout.submit_address(valid_form()).unwrap();

        let order = checkout
            .place_order(PaymentMethod::CashOnDelivery)
            .await
            .unwrap();
        assert_eq!(checkout.step(), CheckoutStep::Completed);

        // 52000 subtotal + 9360 tax
        assert_eq!(order.total, Price::from_major(61360));
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.payment_method, PaymentMethod::CashOnDelivery);

        let history = f.orders.all().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history.first().unwrap().id, order.id);
        assert!(f.cart.is_empty().unwrap());
        assert!(f.sink.has_title("Order Placed Successfully!"));
    }

    #[tokio::test]
    async fn test_declined_charge_returns_to_payment_with_cart_intact() {
        let f = fixture_with_items(&["4"]);
        let mut checkout =
            Checkout::begin(&f.cart, &f.orders, &AlwaysDecline, &f.sink, tax_rate()).unwrap();
        checkout.submit_address(valid_form()).unwrap();

        let err = checkout.place_order(PaymentMethod::Upi).await.unwrap_err();
        assert!(matches!(err, CheckoutError::PaymentDeclined(_)));
        assert_eq!(checkout.step(), CheckoutStep::Payment);

        assert!(f.orders.all().unwrap().is_empty());
        assert_eq!(f.cart.total_items().unwrap(), 1);
        assert!(f.sink.has_title("Payment Failed"));
    }

    #[tokio::test]
    async fn test_retry_after_decline_succeeds() {
        let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        let cart = CartStore::new(Arc::clone(&store));
        let product = initial_products().into_iter().next().unwrap();
        cart.add(&product).unwrap();
        let orders = OrderBook::new(store);
        let sink = RecordingNotifier::new();

        // first attempt declines
        {
            let mut checkout =
                Checkout::begin(&cart, &orders, &AlwaysDecline, &sink, tax_rate()).unwrap();
            checkout.submit_address(valid_form()).unwrap();
            assert!(checkout.place_order(PaymentMethod::Upi).await.is_err());
            assert_eq!(checkout.step(), CheckoutStep::Payment);
            // retry against the same machine is permitted; this one will
            // decline again
            assert!(checkout.place_order(PaymentMethod::Upi).await.is_err());
        }

        // a fresh attempt with a working gateway completes
        let mut checkout =
            Checkout::begin(&cart, &orders, &AlwaysApprove, &sink, tax_rate()).unwrap();
        checkout.submit_address(valid_form()).unwrap();
        checkout.place_order(PaymentMethod::Upi).await.unwrap();
        assert_eq!(orders.all().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_total_reflects_cart_at_submission_time() {
        let f = fixture_with_items(&["1"]);
        let mut checkout =
            Checkout::begin(&f.cart, &f.orders, &AlwaysApprove, &f.sink, tax_rate()).unwrap();
        checkout.submit_address(valid_form()).unwrap();

        // the cart grows after the flow began but before placement
        let extra = initial_products()
            .into_iter()
            .find(|p| p.id.as_str() == "1")
            .unwrap();
        f.cart.add(&extra).unwrap();

        let order = checkout.place_order(PaymentMethod::CreditCard).await.unwrap();
        // 2 x 29000 = 58000 subtotal, + 10440 tax
        assert_eq!(order.total, Price::from_major(68440));
        assert_eq!(order.items.first().unwrap().quantity, 2);
    }
}
