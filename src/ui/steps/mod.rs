//! One view per workflow step
//!
//! Views never own workflow state. They read the controller, keep only
//! ephemeral view state (highlighted row, open form, preview mode) and answer
//! input with a [`StepAction`] that the app applies.

mod customize;
mod event;
mod guests;
mod preview;
mod send;
mod template;

pub use customize::{CustomizeOption, CustomizeView, PreviewMode};
pub use event::EventView;
pub use guests::GuestsView;
pub use preview::PreviewView;
pub use send::SendView;
pub use template::TemplateView;

pub(crate) use preview::{hex_color, render_invitation_card, render_missing_preview};

use crossterm::event::KeyCode;
use ratatui::{layout::Rect, Frame};

use crate::api::ApiError;
use crate::types::{EventDraft, Guest, InvitationEvent, NewGuest};
use crate::workflow::{StepCommand, WorkflowController, WorkflowStep};

/// Collaborator call a view wants made
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    ListEvents,
    CreateEvent(EventDraft),
    ListGuests { event_id: String },
    InviteGuest { event_id: String, guest: NewGuest },
}

impl ApiRequest {
    pub fn describe(&self) -> &'static str {
        match self {
            ApiRequest::ListEvents => "loading events",
            ApiRequest::CreateEvent(_) => "creating event",
            ApiRequest::ListGuests { .. } => "loading guests",
            ApiRequest::InviteGuest { .. } => "inviting guest",
        }
    }
}

/// Outcome of an `ApiRequest`, routed back to the view that asked
#[derive(Debug, Clone)]
pub enum ApiResponse {
    Events(Result<Vec<InvitationEvent>, ApiError>),
    EventCreated(Result<InvitationEvent, ApiError>),
    Guests {
        event_id: String,
        result: Result<Vec<Guest>, ApiError>,
    },
    GuestInvited(Result<Guest, ApiError>),
}

/// What a view asks the app to do after input or a response
#[derive(Debug, Clone, PartialEq)]
pub enum StepAction {
    None,
    Command(StepCommand),
    Request(ApiRequest),
    /// Status-line message
    Notice(String),
}

/// Renderer and input handler for one workflow step
pub trait StepView {
    fn step(&self) -> WorkflowStep;

    fn render(&mut self, frame: &mut Frame, area: Rect, workflow: &WorkflowController);

    fn handle_key(&mut self, key: KeyCode, workflow: &WorkflowController) -> StepAction;

    /// Called whenever the step becomes current
    fn on_enter(&mut self, _workflow: &WorkflowController) -> Option<ApiRequest> {
        None
    }

    fn on_response(
        &mut self,
        _response: ApiResponse,
        _workflow: &WorkflowController,
    ) -> StepAction {
        StepAction::None
    }

    /// Called with the action produced by a response that arrived after the
    /// step stopped being current and was therefore not applied
    fn on_discarded(&mut self, _action: &StepAction) {}

    /// True while a form is open and every key belongs to the view
    fn captures_input(&self) -> bool {
        false
    }

    /// Footer hints as (key, action)
    fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        Vec::new()
    }
}

/// One view per step, indexed by `WorkflowStep::index`
pub fn default_views() -> Vec<Box<dyn StepView>> {
    vec![
        Box::new(EventView::new()),
        Box::new(TemplateView::new()),
        Box::new(CustomizeView::new()),
        Box::new(GuestsView::new()),
        Box::new(PreviewView::new()),
        Box::new(SendView::new()),
    ]
}
