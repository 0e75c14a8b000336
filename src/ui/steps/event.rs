//! Event step: pick one of the user's events or create a new one

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use tracing::debug;

use super::{ApiRequest, ApiResponse, StepAction, StepView};
use crate::types::{EventCategory, EventDraft, InvitationEvent, ValidationError};
use crate::ui::dialogs::centered_rect;
use crate::ui::form_field::{FieldKind, FieldSpec, FormInput, InputForm};
use crate::workflow::{StepCommand, WorkflowController, WorkflowStep};

fn event_form() -> InputForm {
    let categories = EventCategory::all()
        .iter()
        .map(|c| c.as_str().to_string())
        .collect();
    InputForm::new(
        "Create Event",
        vec![
            FieldSpec::text("title", "Title")
                .with_kind(FieldKind::Text {
                    max_length: Some(80),
                })
                .required()
                .placeholder("Rooftop Launch Party"),
            FieldSpec::text("description", "Description")
                .with_kind(FieldKind::LongText)
                .placeholder("What should guests expect?"),
            FieldSpec::text("date", "Date")
                .with_kind(FieldKind::Date)
                .required(),
            FieldSpec::text("time", "Time")
                .with_kind(FieldKind::Time)
                .required(),
            FieldSpec::text("venue", "Venue")
                .required()
                .placeholder("Sky Bar"),
            FieldSpec::text("address", "Address").placeholder("123 Downtown Plaza"),
            FieldSpec::text("category", "Category")
                .with_kind(FieldKind::Choice(categories))
                .default_value(EventCategory::default().as_str()),
            FieldSpec::text("capacity", "Capacity").with_kind(FieldKind::Number),
            FieldSpec::text("ticket_price", "Ticket price").with_kind(FieldKind::Number),
        ],
    )
}

/// Build a draft from the form, checking it the way the server would
fn draft_from_form(form: &InputForm) -> Result<EventDraft, ValidationError> {
    let draft = EventDraft {
        title: form.value("title").trim().to_string(),
        description: form.optional("description"),
        date: form.value("date").trim().to_string(),
        time: form.value("time").trim().to_string(),
        venue: form.value("venue").trim().to_string(),
        address: form.optional("address"),
        category: form.value("category").parse().ok(),
        capacity: EventDraft::parse_capacity(&form.value("capacity"))?,
        ticket_price: EventDraft::parse_ticket_price(&form.value("ticket_price"))?,
    };
    draft.validate()?;
    Ok(draft)
}

pub struct EventView {
    events: Vec<InvitationEvent>,
    list_state: ListState,
    loading: bool,
    loaded: bool,
    form: Option<InputForm>,
    submitting: bool,
}

impl EventView {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            list_state: ListState::default(),
            loading: false,
            loaded: false,
            form: None,
            submitting: false,
        }
    }

    pub fn events(&self) -> &[InvitationEvent] {
        &self.events
    }

    pub fn is_form_open(&self) -> bool {
        self.form.is_some()
    }

    fn selected_event(&self) -> Option<&InvitationEvent> {
        self.list_state.selected().and_then(|i| self.events.get(i))
    }

    fn select_offset(&mut self, forward: bool) {
        if self.events.is_empty() {
            return;
        }
        let len = self.events.len();
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

    fn reload(&mut self) -> StepAction {
        if self.loading {
            return StepAction::None;
        }
        self.loading = true;
        StepAction::Request(ApiRequest::ListEvents)
    }

    fn handle_form_key(&mut self, key: KeyCode) -> StepAction {
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
                if let Some(label) = form.first_missing() {
                    form.set_error(format!("{} is required", label));
                    return StepAction::None;
                }
                match draft_from_form(form) {
                    Ok(draft) => {
                        debug!(title = %draft.title, "submitting event draft");
                        self.submitting = true;
                        StepAction::Request(ApiRequest::CreateEvent(draft))
                    }
                    Err(e) => {
                        form.set_error(e.to_string());
                        StepAction::None
                    }
                }
            }
            FormInput::Consumed | FormInput::Ignored => StepAction::None,
        }
    }

    fn render_list(&mut self, frame: &mut Frame, area: Rect, workflow: &WorkflowController) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        let current_id = workflow.event().map(|e| e.id.as_str());
        let items: Vec<ListItem> = self
            .events
            .iter()
            .map(|event| {
                let marker = if Some(event.id.as_str()) == current_id {
                    Span::styled("* ", Style::default().fg(Color::Green))
                } else {
                    Span::raw("  ")
                };
                ListItem::new(vec![
                    Line::from(vec![
                        marker,
                        Span::styled(
                            event.title.as_str(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                    ]),
                    Line::from(Span::styled(
                        format!("  {}", event.schedule_line()),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect();

        let title = if self.loading {
            " Your Events (loading...) "
        } else {
            " Your Events "
        };
        let block = Block::default().title(title).borders(Borders::ALL);

        if self.events.is_empty() {
            let text = if self.loading {
                "Loading events..."
            } else {
                "No events yet. Press n to create one."
            };
            frame.render_widget(
                Paragraph::new(Span::styled(text, Style::default().fg(Color::DarkGray)))
                    .block(block),
                chunks[0],
            );
        } else {
            if self.list_state.selected().is_none() {
                self.list_state.select(Some(0));
            }
            let list = List::new(items)
                .block(block)
                .highlight_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::REVERSED),
                )
                .highlight_symbol("> ");
            frame.render_stateful_widget(list, chunks[0], &mut self.list_state);
        }

        let details = match self.selected_event() {
            Some(event) => event_details(event),
            None => vec![Line::from(Span::styled(
                "Select an event to build an invitation for.",
                Style::default().fg(Color::DarkGray),
            ))],
        };
        frame.render_widget(
            Paragraph::new(details)
                .wrap(Wrap { trim: true })
                .block(Block::default().title(" Details ").borders(Borders::ALL)),
            chunks[1],
        );
    }
}

fn event_details(event: &InvitationEvent) -> Vec<Line<'static>> {
    let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::Gray));
    let mut lines = vec![
        Line::from(Span::styled(
            event.title.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![label("When:     "), Span::raw(event.schedule_line())]),
        Line::from(vec![label("Address:  "), Span::raw(event.address.clone())]),
        Line::from(vec![label("Category: "), Span::raw(event.category.to_string())]),
    ];
    if event.capacity > 0 {
        lines.push(Line::from(vec![
            label("Capacity: "),
            Span::raw(event.capacity.to_string()),
        ]));
    }
    if let Some(price) = event.ticket_price {
        lines.push(Line::from(vec![
            label("Ticket:   "),
            Span::raw(format!("{:.2}", price)),
        ]));
    }
    if event.is_private {
        lines.push(Line::from(Span::styled(
            "Private event",
            Style::default().fg(Color::Magenta),
        )));
    }
    if !event.description.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(event.description.clone()));
    }
    lines
}

impl StepView for EventView {
    fn step(&self) -> WorkflowStep {
        WorkflowStep::Event
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, workflow: &WorkflowController) {
        self.render_list(frame, area, workflow);
        if let Some(form) = self.form.as_mut() {
            form.render(frame, centered_rect(70, 90, area));
        }
    }

    fn handle_key(&mut self, key: KeyCode, _workflow: &WorkflowController) -> StepAction {
        if self.form.is_some() {
            return self.handle_form_key(key);
        }
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_offset(false);
                StepAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_offset(true);
                StepAction::None
            }
            KeyCode::Enter => match self.selected_event() {
                Some(event) => StepAction::Command(StepCommand::SetEvent(event.clone())),
                None => StepAction::Notice("No event selected".to_string()),
            },
            KeyCode::Char('n') => {
                self.form = Some(event_form());
                self.submitting = false;
                StepAction::None
            }
            KeyCode::Char('r') => self.reload(),
            _ => StepAction::None,
        }
    }

    fn on_enter(&mut self, _workflow: &WorkflowController) -> Option<ApiRequest> {
        if self.loaded || self.loading {
            return None;
        }
        self.loading = true;
        Some(ApiRequest::ListEvents)
    }

    fn on_response(&mut self, response: ApiResponse, _workflow: &WorkflowController) -> StepAction {
        match response {
            ApiResponse::Events(result) => {
                self.loading = false;
                match result {
                    Ok(events) => {
                        self.loaded = true;
                        self.events = events;
                        self.list_state
                            .select(if self.events.is_empty() { None } else { Some(0) });
                        StepAction::None
                    }
                    Err(e) => StepAction::Notice(format!("Could not load events: {}", e)),
                }
            }
            ApiResponse::EventCreated(result) => {
                self.submitting = false;
                match result {
                    Ok(event) => {
                        self.form = None;
                        self.events.insert(0, event.clone());
                        self.list_state.select(Some(0));
                        StepAction::Command(StepCommand::SetEvent(event))
                    }
                    Err(e) => {
                        let message = format!("Could not create event: {}", e);
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

    fn captures_input(&self) -> bool {
        self.form.is_some()
    }

    fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.form.is_some() {
            return Vec::new();
        }
        vec![("Enter", "use event"), ("n", "new event"), ("r", "reload")]
    }
}

impl Default for EventView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    fn sample_events() -> Vec<InvitationEvent> {
        vec![
            InvitationEvent {
                id: "e1".to_string(),
                title: "Launch".to_string(),
                ..Default::default()
            },
            InvitationEvent {
                id: "e2".to_string(),
                title: "Gala".to_string(),
                ..Default::default()
            },
        ]
    }

    fn type_into(view: &mut EventView, wf: &WorkflowController, text: &str) {
        for c in text.chars() {
            view.handle_key(KeyCode::Char(c), wf);
        }
    }

    #[test]
    fn test_on_enter_loads_once() {
        let wf = WorkflowController::new();
        let mut view = EventView::new();
        assert_eq!(view.on_enter(&wf), Some(ApiRequest::ListEvents));
        assert_eq!(view.on_enter(&wf), None);

        view.on_response(ApiResponse::Events(Ok(sample_events())), &wf);
        assert_eq!(view.on_enter(&wf), None);
    }

    #[test]
    fn test_pick_event_issues_set_event() {
        let wf = WorkflowController::new();
        let mut view = EventView::new();
        view.on_response(ApiResponse::Events(Ok(sample_events())), &wf);
        view.handle_key(KeyCode::Down, &wf);

        match view.handle_key(KeyCode::Enter, &wf) {
            StepAction::Command(StepCommand::SetEvent(event)) => assert_eq!(event.id, "e2"),
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn test_load_failure_is_a_notice() {
        let wf = WorkflowController::new();
        let mut view = EventView::new();
        view.on_enter(&wf);
        let action = view.on_response(
            ApiResponse::Events(Err(ApiError::network("/api/events/getByAuth", "refused"))),
            &wf,
        );
        assert!(matches!(action, StepAction::Notice(msg) if msg.contains("refused")));
        // retry is allowed after a failure
        assert_eq!(view.on_enter(&wf), Some(ApiRequest::ListEvents));
    }

    #[test]
    fn test_form_requires_title() {
        let wf = WorkflowController::new();
        let mut view = EventView::new();
        view.handle_key(KeyCode::Char('n'), &wf);
        assert!(view.captures_input());

        assert_eq!(view.handle_key(KeyCode::Enter, &wf), StepAction::None);
        let error = view.form.as_ref().and_then(|f| f.error.clone());
        assert_eq!(error.as_deref(), Some("Title is required"));
    }

    #[test]
    fn test_form_submits_valid_draft() {
        let wf = WorkflowController::new();
        let mut view = EventView::new();
        view.handle_key(KeyCode::Char('n'), &wf);
        if let Some(form) = view.form.as_mut() {
            form.set_value("title", "Test Party");
            form.set_value("date", "2025-07-15");
            form.set_value("time", "20:00");
            form.set_value("venue", "Sky Bar");
            form.set_value("capacity", "50");
        }

        match view.handle_key(KeyCode::Enter, &wf) {
            StepAction::Request(ApiRequest::CreateEvent(draft)) => {
                assert_eq!(draft.title, "Test Party");
                assert_eq!(draft.capacity, Some(50));
                assert_eq!(draft.category, Some(EventCategory::Party));
                assert!(draft.description.is_none());
            }
            other => panic!("unexpected action: {:?}", other),
        }
        // a second Enter while the request is in flight does nothing
        assert_eq!(view.handle_key(KeyCode::Enter, &wf), StepAction::None);
    }

    #[test]
    fn test_form_rejects_bad_time() {
        let wf = WorkflowController::new();
        let mut view = EventView::new();
        view.handle_key(KeyCode::Char('n'), &wf);
        if let Some(form) = view.form.as_mut() {
            form.set_value("title", "Test Party");
            form.set_value("date", "2025-07-15");
            form.set_value("time", "25:99");
            form.set_value("venue", "Sky Bar");
        }
        assert_eq!(view.handle_key(KeyCode::Enter, &wf), StepAction::None);
        let error = view.form.as_ref().and_then(|f| f.error.clone()).unwrap();
        assert!(error.starts_with("time must be HH:MM"));
    }

    #[test]
    fn test_created_event_closes_form_and_sets_event() {
        let wf = WorkflowController::new();
        let mut view = EventView::new();
        view.handle_key(KeyCode::Char('n'), &wf);
        type_into(&mut view, &wf, "Gala");

        let created = InvitationEvent {
            id: "new-1".to_string(),
            title: "Gala".to_string(),
            ..Default::default()
        };
        let action = view.on_response(ApiResponse::EventCreated(Ok(created.clone())), &wf);
        assert_eq!(action, StepAction::Command(StepCommand::SetEvent(created)));
        assert!(!view.is_form_open());
        assert_eq!(view.events()[0].id, "new-1");
    }

    #[test]
    fn test_create_failure_keeps_form_open() {
        let wf = WorkflowController::new();
        let mut view = EventView::new();
        view.handle_key(KeyCode::Char('n'), &wf);
        let action = view.on_response(
            ApiResponse::EventCreated(Err(ApiError::from_status(
                "/api/events",
                422,
                r#"{"message":"Venue is required"}"#,
                None,
            ))),
            &wf,
        );
        assert!(matches!(action, StepAction::Notice(_)));
        assert!(view.is_form_open());
    }

    #[test]
    fn test_escape_closes_form() {
        let wf = WorkflowController::new();
        let mut view = EventView::new();
        view.handle_key(KeyCode::Char('n'), &wf);
        view.handle_key(KeyCode::Esc, &wf);
        assert!(!view.captures_input());
    }
}
