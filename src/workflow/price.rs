//! Price confirmation gate for the send step
//!
//! The dialog state is never set directly by callers. The controller hands the
//! gate the current `EffectDeps` after every mutation; when the dependencies
//! differ from the last observed ones the gate re-derives `is_open` and
//! `estimate` from the current step.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use super::step::WorkflowStep;

/// Flat platform fee charged to send an invitation
pub const PLATFORM_FEE: f64 = 99.99;

/// Values the gate's effect is keyed on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectDeps {
    pub step: WorkflowStep,
    pub template_id: Option<String>,
    pub guest_ids: Vec<String>,
}

/// Visible state of the price confirmation dialog
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PriceConfirmationState {
    pub is_open: bool,
    pub estimate: f64,
}

/// A payment method offered by the dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: u32,
    pub label: String,
}

impl PaymentMethod {
    /// Methods listed in the dialog
    pub fn defaults() -> Vec<PaymentMethod> {
        vec![
            PaymentMethod {
                id: 1,
                label: "Credit / Debit Card".to_string(),
            },
            PaymentMethod {
                id: 2,
                label: "Bank Transfer".to_string(),
            },
            PaymentMethod {
                id: 3,
                label: "Crypto Wallet".to_string(),
            },
        ]
    }
}

/// Payment intent a method selection would produce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
    pub amount: f64,
    pub currency: String,
    pub status: String,
}

/// Errors raised by the payment dialog's actions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// Payment method selection has no backing implementation
    #[error("payment method {method} is not implemented yet")]
    Unimplemented { method: u32 },
}

/// Details the dialog reports when the user confirms payment
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    pub transaction_id: Option<String>,
    pub payment_intent_id: Option<String>,
    pub amount: Option<f64>,
}

/// Acknowledgement shown in the success dialog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentReceipt {
    pub transaction_id: String,
    pub payment_intent_id: String,
    pub amount: f64,
}

impl PaymentReceipt {
    /// Label/value rows for the success dialog
    pub fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Transaction ID", self.transaction_id.clone()),
            ("Payment Intent", self.payment_intent_id.clone()),
            ("Amount", format!("{:.2}$", self.amount)),
        ]
    }
}

/// Two-state (closed/open) gate driven by the current step
#[derive(Debug, Clone)]
pub struct PriceGate {
    fee: f64,
    state: PriceConfirmationState,
    last_deps: Option<EffectDeps>,
}

impl PriceGate {
    pub fn new(fee: f64) -> Self {
        Self {
            fee,
            state: PriceConfirmationState::default(),
            last_deps: None,
        }
    }

    pub fn state(&self) -> PriceConfirmationState {
        self.state
    }

    pub fn fee(&self) -> f64 {
        self.fee
    }

    /// Re-derive the dialog state if the dependencies changed.
    ///
    /// Returns true when the effect ran.
    pub fn observe(&mut self, deps: EffectDeps) -> bool {
        if self.last_deps.as_ref() == Some(&deps) {
            return false;
        }

        let was_open = self.state.is_open;
        if deps.step == WorkflowStep::Send {
            self.state = PriceConfirmationState {
                is_open: true,
                estimate: self.fee,
            };
        } else {
            self.state.is_open = false;
        }

        match (was_open, self.state.is_open) {
            (false, true) => info!(estimate = self.state.estimate, "price confirmation opened"),
            (true, false) => info!(step = %deps.step, "price confirmation closed"),
            _ => debug!(step = %deps.step, "price confirmation effect re-evaluated"),
        }

        self.last_deps = Some(deps);
        true
    }

    /// Close the dialog and build the success receipt.
    ///
    /// No payment is processed; missing details fall back to placeholders and
    /// the current estimate.
    pub fn confirm(&mut self, payment: PaymentConfirmation) -> PaymentReceipt {
        self.state.is_open = false;
        let receipt = PaymentReceipt {
            transaction_id: payment.transaction_id.unwrap_or_else(|| "-".to_string()),
            payment_intent_id: payment.payment_intent_id.unwrap_or_else(|| "-".to_string()),
            amount: payment.amount.unwrap_or(self.state.estimate),
        };
        info!(
            transaction_id = %receipt.transaction_id,
            amount = receipt.amount,
            "payment confirmed"
        );
        receipt
    }

    /// Selecting a payment method always fails: there is no payment backend
    pub fn select_method(&self, method: u32) -> Result<PaymentIntent, PaymentError> {
        debug!(method, "payment method selected");
        Err(PaymentError::Unimplemented { method })
    }
}

impl Default for PriceGate {
    fn default() -> Self {
        Self::new(PLATFORM_FEE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deps(step: WorkflowStep) -> EffectDeps {
        EffectDeps {
            step,
            template_id: None,
            guest_ids: Vec::new(),
        }
    }

    #[test]
    fn test_closed_by_default() {
        let gate = PriceGate::default();
        assert!(!gate.state().is_open);
        assert_eq!(gate.state().estimate, 0.0);
    }

    #[test]
    fn test_opens_on_send() {
        let mut gate = PriceGate::default();
        assert!(gate.observe(deps(WorkflowStep::Send)));
        assert!(gate.state().is_open);
        assert_eq!(gate.state().estimate, 99.99);
    }

    #[test]
    fn test_closes_when_leaving_send() {
        let mut gate = PriceGate::default();
        gate.observe(deps(WorkflowStep::Send));
        gate.observe(deps(WorkflowStep::Guests));
        assert!(!gate.state().is_open);
    }

    #[test]
    fn test_unchanged_deps_skip_effect() {
        let mut gate = PriceGate::default();
        gate.observe(deps(WorkflowStep::Send));
        gate.confirm(PaymentConfirmation::default());
        assert!(!gate.observe(deps(WorkflowStep::Send)));
        assert!(!gate.state().is_open);
    }

    #[test]
    fn test_changed_guests_rerun_effect_on_send() {
        let mut gate = PriceGate::default();
        gate.observe(deps(WorkflowStep::Send));
        gate.confirm(PaymentConfirmation::default());
        let mut with_guest = deps(WorkflowStep::Send);
        with_guest.guest_ids.push("g1".to_string());
        assert!(gate.observe(with_guest));
        assert!(gate.state().is_open);
    }

    #[test]
    fn test_custom_fee() {
        let mut gate = PriceGate::new(49.5);
        gate.observe(deps(WorkflowStep::Send));
        assert_eq!(gate.state().estimate, 49.5);
        assert_eq!(gate.fee(), 49.5);
    }

    #[test]
    fn test_select_method_always_fails() {
        let gate = PriceGate::default();
        for method in [0, 1, 2, 3, u32::MAX] {
            assert_eq!(
                gate.select_method(method),
                Err(PaymentError::Unimplemented { method })
            );
        }
    }

    #[test]
    fn test_confirm_fills_receipt_defaults() {
        let mut gate = PriceGate::default();
        gate.observe(deps(WorkflowStep::Send));
        let receipt = gate.confirm(PaymentConfirmation::default());
        assert!(!gate.state().is_open);
        assert_eq!(receipt.transaction_id, "-");
        assert_eq!(receipt.payment_intent_id, "-");
        assert_eq!(receipt.amount, 99.99);
        assert_eq!(receipt.details()[2], ("Amount", "99.99$".to_string()));
    }

    #[test]
    fn test_confirm_keeps_reported_details() {
        let mut gate = PriceGate::default();
        gate.observe(deps(WorkflowStep::Send));
        let receipt = gate.confirm(PaymentConfirmation {
            transaction_id: Some("tx-1".to_string()),
            payment_intent_id: Some("pi-1".to_string()),
            amount: Some(120.0),
        });
        assert_eq!(receipt.transaction_id, "tx-1");
        assert_eq!(receipt.payment_intent_id, "pi-1");
        assert_eq!(receipt.amount, 120.0);
    }
}
