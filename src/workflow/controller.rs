//! Workflow controller - owns the sequencer, the selection store and the
//! price gate, and keeps the gate in sync after every mutation.

use tracing::{debug, info};

use super::preview::{build_preview, InvitationPreview};
use super::price::{
    EffectDeps, PaymentConfirmation, PaymentError, PaymentIntent, PaymentReceipt,
    PriceConfirmationState, PriceGate, PLATFORM_FEE,
};
use super::step::{StepSequencer, Transition, WorkflowStep};
use super::store::SelectionStore;
use crate::types::{CustomizationPatch, Customizations, Guest, InvitationEvent, InvitationTemplate};

/// Store/sequencer mutations a step view can ask for
#[derive(Debug, Clone, PartialEq)]
pub enum StepCommand {
    /// Store the event and advance to template selection
    SetEvent(InvitationEvent),
    /// Store the template and advance to customization
    SetTemplate(InvitationTemplate),
    UpdateCustomizations(CustomizationPatch),
    /// Replace the guest list; does not advance
    SetGuests(Vec<Guest>),
    GoTo(WorkflowStep),
    Next,
    Previous,
}

/// Top-level owner of all invitation workflow state
#[derive(Debug, Clone)]
pub struct WorkflowController {
    sequencer: StepSequencer,
    store: SelectionStore,
    price: PriceGate,
}

impl WorkflowController {
    pub fn new() -> Self {
        Self::with_platform_fee(PLATFORM_FEE)
    }

    pub fn with_platform_fee(fee: f64) -> Self {
        let mut controller = Self {
            sequencer: StepSequencer::new(),
            store: SelectionStore::new(),
            price: PriceGate::new(fee),
        };
        controller.sync_effects();
        controller
    }

    // ─── Sequencer ──────────────────────────────────────────────────────────

    pub fn current_step(&self) -> WorkflowStep {
        self.sequencer.current()
    }

    pub fn progress(&self) -> u8 {
        self.sequencer.progress()
    }

    pub fn go_to(&mut self, step: WorkflowStep) {
        let transition = self.sequencer.go_to(step);
        self.after_move(transition);
    }

    pub fn next(&mut self) {
        let transition = self.sequencer.next();
        self.after_move(transition);
    }

    pub fn previous(&mut self) {
        let transition = self.sequencer.previous();
        self.after_move(transition);
    }

    fn after_move(&mut self, transition: Option<Transition>) {
        match transition {
            Some(t) => info!(from = %t.from, to = %t.to, progress = t.to.progress(), "step changed"),
            None => debug!(step = %self.current_step(), "step unchanged"),
        }
        self.sync_effects();
    }

    // ─── Selection store ────────────────────────────────────────────────────

    pub fn event(&self) -> Option<&InvitationEvent> {
        self.store.event()
    }

    pub fn template(&self) -> Option<&InvitationTemplate> {
        self.store.template()
    }

    pub fn customizations(&self) -> &Customizations {
        self.store.customizations()
    }

    pub fn guests(&self) -> &[Guest] {
        self.store.guests()
    }

    /// Store the event, then move to template selection
    pub fn set_event(&mut self, event: InvitationEvent) {
        info!(event_id = %event.id, title = %event.title, "event selected");
        self.store.set_event(event);
        self.go_to(WorkflowStep::Template);
    }

    /// Store the template, then move to customization
    pub fn set_template(&mut self, template: InvitationTemplate) {
        info!(template_id = %template.id, "template selected");
        self.store.set_template(template);
        self.go_to(WorkflowStep::Customize);
    }

    pub fn update_customizations(&mut self, patch: CustomizationPatch) {
        debug!(?patch, "customizations updated");
        self.store.update_customizations(patch);
        self.sync_effects();
    }

    pub fn set_guests(&mut self, guests: Vec<Guest>) {
        info!(count = guests.len(), "guest list replaced");
        self.store.set_guests(guests);
        self.sync_effects();
    }

    /// Apply a command emitted by a step view
    pub fn apply(&mut self, command: StepCommand) {
        match command {
            StepCommand::SetEvent(event) => self.set_event(event),
            StepCommand::SetTemplate(template) => self.set_template(template),
            StepCommand::UpdateCustomizations(patch) => self.update_customizations(patch),
            StepCommand::SetGuests(guests) => self.set_guests(guests),
            StepCommand::GoTo(step) => self.go_to(step),
            StepCommand::Next => self.next(),
            StepCommand::Previous => self.previous(),
        }
    }

    // ─── Derived state ──────────────────────────────────────────────────────

    /// Current preview; recomputed on every call
    pub fn preview(&self) -> Option<InvitationPreview<'_>> {
        build_preview(
            self.store.event(),
            self.store.template(),
            self.store.customizations(),
        )
    }

    pub fn price_confirmation(&self) -> PriceConfirmationState {
        self.price.state()
    }

    pub fn platform_fee(&self) -> f64 {
        self.price.fee()
    }

    fn effect_deps(&self) -> EffectDeps {
        EffectDeps {
            step: self.sequencer.current(),
            template_id: self.store.template().map(|t| t.id.clone()),
            guest_ids: self.store.guests().iter().map(|g| g.id.clone()).collect(),
        }
    }

    fn sync_effects(&mut self) {
        let deps = self.effect_deps();
        self.price.observe(deps);
    }

    // ─── Price dialog actions ───────────────────────────────────────────────

    /// Dialog "confirm": close and acknowledge
    pub fn confirm_payment(&mut self, payment: PaymentConfirmation) -> PaymentReceipt {
        self.price.confirm(payment)
    }

    /// Dialog "previous": back to the preview step
    pub fn payment_previous(&mut self) {
        self.go_to(WorkflowStep::Preview);
    }

    /// Dialog method selection; always fails
    pub fn select_payment_method(&self, method: u32) -> Result<PaymentIntent, PaymentError> {
        self.price.select_method(method)
    }
}

impl Default for WorkflowController {
    fn default() -> Self {
        Self::new()
    }
}
