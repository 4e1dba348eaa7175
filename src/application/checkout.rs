use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::timeout;

use crate::domain::cart::Cart;
use crate::domain::errors::{CheckoutError, GatewayError};
use crate::domain::order::{OrderDraft, OrderReceipt};
use crate::domain::ports::OrderGateway;
use crate::domain::pricing;
use crate::domain::promo::{PromoRegistry, PromoStatus};
use crate::domain::session::{DiningSession, OrderType};

/// Observable state of the submission flow.
///
/// `Succeeded` and `Failed` record the outcome of the most recent attempt;
/// both accept a new checkout. Only `Submitting` rejects one.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded { order_id: String },
    Failed { reason: String },
}

/// The order submission flow for one dining session.
///
/// Drives `Idle → Submitting → Succeeded | Failed` around the remote
/// order-creation call. At most one submission is in flight at a time; the
/// request is built from a snapshot of the cart taken when checkout starts,
/// so edits made while the call is pending affect only the next submission.
/// The cart is cleared only after a confirmed success and is left untouched
/// on every failure path.
pub struct CheckoutFlow<G> {
    gateway: G,
    session: DiningSession,
    promos: PromoRegistry,
    request_timeout: Duration,
    in_flight: AtomicBool,
    state: Mutex<SubmissionState>,
}

impl<G: OrderGateway> CheckoutFlow<G> {
    pub fn new(
        gateway: G,
        session: DiningSession,
        promos: PromoRegistry,
        request_timeout: Duration,
    ) -> Self {
        Self {
            gateway,
            session,
            promos,
            request_timeout,
            in_flight: AtomicBool::new(false),
            state: Mutex::new(SubmissionState::Idle),
        }
    }

    pub fn session(&self) -> &DiningSession {
        &self.session
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn state(&self) -> SubmissionState {
        self.state.lock().expect("submission state lock poisoned").clone()
    }

    /// Whether a submission is currently pending. UI uses this to disable
    /// the checkout control.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Submits the current cart as an order.
    ///
    /// Rejects locally, without touching the network, when the cart is empty
    /// or another submission is pending. On success the cart is cleared and
    /// the receipt returned; on failure the cart is preserved unchanged and
    /// the error carries a human-readable reason. No automatic retry: the
    /// caller re-invokes checkout, which runs the full flow again.
    pub async fn checkout(
        &self,
        cart: &Mutex<Cart>,
        order_type: OrderType,
        promo_code: Option<&str>,
        notes: &str,
    ) -> Result<OrderReceipt, CheckoutError> {
        let _guard =
            InFlightGuard::acquire(&self.in_flight).ok_or(CheckoutError::SubmissionInFlight)?;

        // Snapshot under the lock, then release it for the duration of the
        // network call. Concurrent edits land in the cart, not the request.
        let snapshot = cart.lock().expect("cart lock poisoned").snapshot();
        if snapshot.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let totals = pricing::compute_totals(&snapshot, promo_code, &self.promos);
        if let PromoStatus::Invalid { code } = &totals.promo {
            log::warn!("ignoring unrecognized promo code {:?}", code);
        }

        let draft = OrderDraft::new(&self.session, snapshot, order_type, &totals, notes);
        self.set_state(SubmissionState::Submitting);
        log::info!(
            "submitting order: table {} at restaurant {}, {} line(s), total {}",
            self.session.table_id,
            self.session.restaurant_id,
            draft.items.len(),
            draft.total
        );

        let outcome = match timeout(self.request_timeout, self.gateway.create_order(draft)).await {
            Ok(result) => result,
            Err(_) => Err(GatewayError::Timeout),
        };

        match outcome {
            Ok(receipt) => {
                cart.lock().expect("cart lock poisoned").clear();
                self.set_state(SubmissionState::Succeeded { order_id: receipt.id.clone() });
                log::info!("order {} created ({})", receipt.order_number, receipt.id);
                Ok(receipt)
            }
            Err(err) => {
                self.set_state(SubmissionState::Failed { reason: err.to_string() });
                log::warn!("order submission failed: {}", err);
                Err(CheckoutError::Gateway(err))
            }
        }
    }

    fn set_state(&self, next: SubmissionState) {
        *self.state.lock().expect("submission state lock poisoned") = next;
    }
}

/// RAII guard for the single in-flight submission slot. Dropping it (on any
/// exit path, including local validation errors) reopens the slot.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_flight_guard_admits_one_holder() {
        let flag = AtomicBool::new(false);

        let first = InFlightGuard::acquire(&flag);
        assert!(first.is_some());
        assert!(InFlightGuard::acquire(&flag).is_none());

        drop(first);
        assert!(InFlightGuard::acquire(&flag).is_some());
    }
}
