//! Guests step: load the event's guest list and invite new guests

use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use tracing::{debug, warn};

use super::{ApiRequest, ApiResponse, StepAction, StepView};
use crate::types::{Guest, NewGuest, RsvpStatus};
use crate::ui::dialogs::centered_rect;
use crate::ui::form_field::{FieldKind, FieldSpec, FormInput, InputForm};
use crate::workflow::{StepCommand, WorkflowController, WorkflowStep};

fn guest_form() -> InputForm {
    InputForm::new(
        "Invite Guest",
        vec![
            FieldSpec::text("name", "Name").required(),
            FieldSpec::text("email", "Email")
                .required()
                .placeholder("guest@example.com"),
            FieldSpec::text("phone", "Phone"),
            FieldSpec::text("note", "Note").with_kind(FieldKind::Text {
                max_length: Some(140),
            }),
        ],
    )
}

fn rsvp_style(status: RsvpStatus) -> Style {
    match status {
        RsvpStatus::Accepted => Style::default().fg(Color::Green),
        RsvpStatus::Declined => Style::default().fg(Color::Red),
        RsvpStatus::Maybe => Style::default().fg(Color::Yellow),
        RsvpStatus::Pending => Style::default().fg(Color::DarkGray),
    }
}

pub struct GuestsView {
    list_state: ListState,
    /// Event whose guests are in the store
    loaded_for: Option<String>,
    loading_for: Option<String>,
    form: Option<InputForm>,
    submitting: bool,
}

impl GuestsView {
    pub fn new() -> Self {
        Self {
            list_state: ListState::default(),
            loaded_for: None,
            loading_for: None,
            form: None,
            submitting: false,
        }
    }

    pub fn is_form_open(&self) -> bool {
        self.form.is_some()
    }

    fn load(&mut self, event_id: &str) -> ApiRequest {
        self.loading_for = Some(event_id.to_string());
        ApiRequest::ListGuests {
            event_id: event_id.to_string(),
        }
    }

    fn handle_form_key(&mut self, key: KeyCode, workflow: &WorkflowController) -> StepAction {
        let Some(form) = self.form.as_mut() else {
            return StepAction::None;
        };
        match form.handle_key(key) {
            FormInput::Cancel => {
                self.form = None;
                StepAction::None
            }
            FormInput::Submit if self.submitting => StepAction::None,
            FormInput::Submit => {
                let Some(event) = workflow.event() else {
                    form.set_error("Choose an event before inviting guests");
                    return StepAction::None;
                };
                let guest = NewGuest {
                    name: form.value("name").trim().to_string(),
                    email: form.value("email").trim().to_string(),
                    phone: form.optional("phone"),
                    note: form.optional("note"),
                };
                if let Err(e) = guest.validate() {
                    form.set_error(e);
                    return StepAction::None;
                }
                debug!(email = %guest.email, "inviting guest");
                self.submitting = true;
                StepAction::Request(ApiRequest::InviteGuest {
                    event_id: event.id.clone(),
                    guest,
                })
            }
            FormInput::Consumed | FormInput::Ignored => StepAction::None,
        }
    }

    fn move_selection(&mut self, forward: bool, len: usize) {
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let i = self.list_state.selected().map_or(0, |i| {
            if forward {
                (i + 1) % len
            } else if i == 0 {
                len - 1
            } else {
                i - 1
            }
        });
        self.list_state.select(Some(i));
    }
}

impl StepView for GuestsView {
    fn step(&self) -> WorkflowStep {
        WorkflowStep::Guests
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, workflow: &WorkflowController) {
        let guests = workflow.guests();
        let title = match (workflow.event(), &self.loading_for) {
            (_, Some(_)) => " Guests (loading...) ".to_string(),
            (Some(event), None) => format!(" Guests for {} ({}) ", event.title, guests.len()),
            (None, None) => " Guests ".to_string(),
        };
        let block = Block::default().title(title).borders(Borders::ALL);

        if guests.is_empty() {
            let text = if workflow.event().is_none() {
                "Choose an event first (press 1)"
            } else {
                "No guests yet. Press a to invite someone."
            };
            frame.render_widget(
                Paragraph::new(Span::styled(text, Style::default().fg(Color::DarkGray)))
                    .block(block),
                area,
            );
        } else {
            if self.list_state.selected().map_or(true, |i| i >= guests.len()) {
                self.list_state.select(Some(0));
            }
            let items: Vec<ListItem> = guests
                .iter()
                .map(|g| {
                    let mut spans = vec![
                        Span::styled(
                            format!("{:<9}", g.rsvp_status.label()),
                            rsvp_style(g.rsvp_status),
                        ),
                        Span::styled(g.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                        Span::styled(
                            format!("  {}", g.email),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ];
                    if g.plus_ones > 0 {
                        spans.push(Span::raw(format!("  +{}", g.plus_ones)));
                    }
                    ListItem::new(Line::from(spans))
                })
                .collect();
            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("> ");
            frame.render_stateful_widget(list, area, &mut self.list_state);
        }

        if let Some(form) = self.form.as_mut() {
            form.render(frame, centered_rect(60, 70, area));
        }
    }

    fn handle_key(&mut self, key: KeyCode, workflow: &WorkflowController) -> StepAction {
        if self.form.is_some() {
            return self.handle_form_key(key, workflow);
        }
        let len = workflow.guests().len();
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection(false, len);
                StepAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection(true, len);
                StepAction::None
            }
            KeyCode::Char('a') => {
                if workflow.event().is_none() {
                    return StepAction::Notice("Choose an event before inviting guests".into());
                }
                self.form = Some(guest_form());
                self.submitting = false;
                StepAction::None
            }
            KeyCode::Char('d') | KeyCode::Delete => match self.list_state.selected() {
                Some(i) if i < len => {
                    let mut guests = workflow.guests().to_vec();
                    let removed = guests.remove(i);
                    debug!(guest_id = %removed.id, "guest removed from list");
                    StepAction::Command(StepCommand::SetGuests(guests))
                }
                _ => StepAction::None,
            },
            KeyCode::Char('r') => match workflow.event() {
                Some(event) if self.loading_for.is_none() => {
                    let id = event.id.clone();
                    StepAction::Request(self.load(&id))
                }
                _ => StepAction::None,
            },
            KeyCode::Enter => StepAction::Command(StepCommand::Next),
            KeyCode::Esc => StepAction::Command(StepCommand::Previous),
            _ => StepAction::None,
        }
    }

    fn on_enter(&mut self, workflow: &WorkflowController) -> Option<ApiRequest> {
        let event = workflow.event()?;
        if self.loaded_for.as_deref() == Some(event.id.as_str())
            || self.loading_for.as_deref() == Some(event.id.as_str())
        {
            return None;
        }
        let id = event.id.clone();
        Some(self.load(&id))
    }

    fn on_response(&mut self, response: ApiResponse, workflow: &WorkflowController) -> StepAction {
        match response {
            ApiResponse::Guests { event_id, result } => {
                if self.loading_for.as_deref() == Some(event_id.as_str()) {
                    self.loading_for = None;
                }
                if workflow.event().map(|e| e.id.as_str()) != Some(event_id.as_str()) {
                    warn!(%event_id, "dropping guest list for an event that is no longer selected");
                    return StepAction::None;
                }
                match result {
                    Ok(guests) => {
                        self.loaded_for = Some(event_id);
                        self.list_state
                            .select(if guests.is_empty() { None } else { Some(0) });
                        StepAction::Command(StepCommand::SetGuests(guests))
                    }
                    Err(e) => StepAction::Notice(format!("Could not load guests: {}", e)),
                }
            }
            ApiResponse::GuestInvited(result) => {
                self.submitting = false;
                match result {
                    Ok(guest) => {
                        self.form = None;
                        let mut guests: Vec<Guest> = workflow.guests().to_vec();
                        guests.push(guest);
                        self.list_state.select(Some(guests.len() - 1));
                        StepAction::Command(StepCommand::SetGuests(guests))
                    }
                    Err(e) => {
                        let message = format!("Could not invite guest: {}", e);
                        if let Some(form) = self.form.as_mut() {
                            form.set_error(message.clone());
                        }
                        StepAction::Notice(message)
                    }
                }
            }
            _ => StepAction::None,
        }
    }

    fn on_discarded(&mut self, action: &StepAction) {
        // the store never saw this list, so the next visit has to fetch it again
        if let StepAction::Command(StepCommand::SetGuests(_)) = action {
            debug!(loaded_for = ?self.loaded_for, "guest list not applied, will reload");
            self.loaded_for = None;
        }
    }

    fn captures_input(&self) -> bool {
        self.form.is_some()
    }

    fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.form.is_some() {
            return Vec::new();
        }
        vec![
            ("a", "invite"),
            ("d", "remove"),
            ("r", "reload"),
            ("Enter", "preview"),
        ]
    }
}

impl Default for GuestsView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::types::InvitationEvent;

    fn with_event(id: &str) -> WorkflowController {
        let mut wf = WorkflowController::new();
        wf.set_event(InvitationEvent {
            id: id.to_string(),
            title: "Launch".to_string(),
            ..Default::default()
        });
        wf.go_to(WorkflowStep::Guests);
        wf
    }

    fn guest(id: &str) -> Guest {
        Guest {
            id: id.to_string(),
            name: format!("Guest {}", id),
            email: format!("{}@example.com", id),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_event_means_no_request() {
        let wf = WorkflowController::new();
        let mut view = GuestsView::new();
        assert_eq!(view.on_enter(&wf), None);
        assert!(matches!(
            view.handle_key(KeyCode::Char('a'), &wf),
            StepAction::Notice(_)
        ));
        assert!(!view.is_form_open());
    }

    #[test]
    fn test_loads_once_per_event() {
        let wf = with_event("e1");
        let mut view = GuestsView::new();
        assert_eq!(
            view.on_enter(&wf),
            Some(ApiRequest::ListGuests {
                event_id: "e1".to_string()
            })
        );
        assert_eq!(view.on_enter(&wf), None);

        let action = view.on_response(
            ApiResponse::Guests {
                event_id: "e1".to_string(),
                result: Ok(vec![guest("g1")]),
            },
            &wf,
        );
        assert_eq!(
            action,
            StepAction::Command(StepCommand::SetGuests(vec![guest("g1")]))
        );
        assert_eq!(view.on_enter(&wf), None);

        let other = with_event("e2");
        assert!(view.on_enter(&other).is_some());
    }

    #[test]
    fn test_discarded_list_is_fetched_again() {
        let wf = with_event("e1");
        let mut view = GuestsView::new();
        view.on_enter(&wf);
        let action = view.on_response(
            ApiResponse::Guests {
                event_id: "e1".to_string(),
                result: Ok(vec![guest("g1")]),
            },
            &wf,
        );
        assert_eq!(view.on_enter(&wf), None);

        view.on_discarded(&action);
        assert_eq!(
            view.on_enter(&wf),
            Some(ApiRequest::ListGuests {
                event_id: "e1".to_string()
            })
        );
    }

    #[test]
    fn test_discarded_notice_keeps_loaded_list() {
        let wf = with_event("e1");
        let mut view = GuestsView::new();
        view.on_enter(&wf);
        view.on_response(
            ApiResponse::Guests {
                event_id: "e1".to_string(),
                result: Ok(Vec::new()),
            },
            &wf,
        );
        view.on_discarded(&StepAction::Notice("Could not invite guest".to_string()));
        assert_eq!(view.on_enter(&wf), None);
    }

    #[test]
    fn test_guests_for_other_event_are_dropped() {
        let wf = with_event("e2");
        let mut view = GuestsView::new();
        let action = view.on_response(
            ApiResponse::Guests {
                event_id: "e1".to_string(),
                result: Ok(vec![guest("g1")]),
            },
            &wf,
        );
        assert_eq!(action, StepAction::None);
    }

    #[test]
    fn test_invite_validates_before_request() {
        let wf = with_event("e1");
        let mut view = GuestsView::new();
        view.handle_key(KeyCode::Char('a'), &wf);
        assert!(view.captures_input());
        if let Some(form) = view.form.as_mut() {
            form.set_value("name", "Ana");
            form.set_value("email", "not-an-email");
        }
        assert_eq!(view.handle_key(KeyCode::Enter, &wf), StepAction::None);
        assert!(view.form.as_ref().and_then(|f| f.error.clone()).is_some());

        if let Some(form) = view.form.as_mut() {
            form.set_value("email", "ana@example.com");
        }
        match view.handle_key(KeyCode::Enter, &wf) {
            StepAction::Request(ApiRequest::InviteGuest { event_id, guest }) => {
                assert_eq!(event_id, "e1");
                assert_eq!(guest.name, "Ana");
                assert!(guest.phone.is_none());
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn test_invited_guest_is_appended() {
        let mut wf = with_event("e1");
        wf.set_guests(vec![guest("g1")]);
        let mut view = GuestsView::new();
        view.handle_key(KeyCode::Char('a'), &wf);

        let action = view.on_response(ApiResponse::GuestInvited(Ok(guest("g2"))), &wf);
        assert_eq!(
            action,
            StepAction::Command(StepCommand::SetGuests(vec![guest("g1"), guest("g2")]))
        );
        assert!(!view.is_form_open());
    }

    #[test]
    fn test_invite_failure_keeps_form_open() {
        let wf = with_event("e1");
        let mut view = GuestsView::new();
        view.handle_key(KeyCode::Char('a'), &wf);
        let action = view.on_response(
            ApiResponse::GuestInvited(Err(ApiError::network("/api/guest", "timeout"))),
            &wf,
        );
        assert!(matches!(action, StepAction::Notice(msg) if msg.contains("timeout")));
        assert!(view.is_form_open());
    }

    #[test]
    fn test_remove_highlighted_guest() {
        let mut wf = with_event("e1");
        wf.set_guests(vec![guest("g1"), guest("g2")]);
        let mut view = GuestsView::new();
        view.handle_key(KeyCode::Down, &wf);
        view.handle_key(KeyCode::Down, &wf);
        assert_eq!(
            view.handle_key(KeyCode::Char('d'), &wf),
            StepAction::Command(StepCommand::SetGuests(vec![guest("g1")]))
        );
    }
}
