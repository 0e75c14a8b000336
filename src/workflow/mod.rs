//! Invitation workflow core: event -> template -> customize -> guests ->
//! preview -> send.

mod controller;
mod preview;
mod price;
mod step;
mod store;

pub use controller::{StepCommand, WorkflowController};
pub use preview::{build_preview, InvitationPreview};
pub use price::{
    EffectDeps, PaymentConfirmation, PaymentError, PaymentIntent, PaymentMethod, PaymentReceipt,
    PriceConfirmationState, PriceGate, PLATFORM_FEE,
};
pub use step::{StepSequencer, Transition, UnknownStep, WorkflowStep};
pub use store::SelectionStore;
