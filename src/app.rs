use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::{EventsApi, GuestsApi, HttpApiClient};
use crate::config::Config;
use crate::ui::dialogs::{PriceDialog, PriceDialogAction, SuccessDialog, SuccessDialogResult};
use crate::ui::panels::{HeaderBar, StatusBar};
use crate::ui::steps::{default_views, ApiRequest, ApiResponse, StepAction, StepView};
use crate::ui::TerminalGuard;
use crate::workflow::{PaymentConfirmation, StepCommand, WorkflowController, WorkflowStep};

type Tagged = (WorkflowStep, ApiResponse);

pub struct App {
    workflow: WorkflowController,
    views: Vec<Box<dyn StepView>>,
    events_api: Arc<dyn EventsApi>,
    guests_api: Arc<dyn GuestsApi>,
    price_dialog: PriceDialog,
    success_dialog: SuccessDialog,
    /// Status-line message, cleared on the next key press
    notice: Option<String>,
    should_quit: bool,
    /// Printed after the terminal is restored
    exit_message: Option<String>,
    tx: mpsc::UnboundedSender<Tagged>,
    rx: mpsc::UnboundedReceiver<Tagged>,
    tick_rate: Duration,
}

impl App {
    pub fn new(
        config: &Config,
        events_api: Arc<dyn EventsApi>,
        guests_api: Arc<dyn GuestsApi>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            workflow: WorkflowController::with_platform_fee(config.pricing.platform_fee),
            views: default_views(),
            events_api,
            guests_api,
            price_dialog: PriceDialog::new(),
            success_dialog: SuccessDialog::new(),
            notice: None,
            should_quit: false,
            exit_message: None,
            tx,
            rx,
            tick_rate: Duration::from_millis(config.ui.tick_rate_ms),
        }
    }

    /// App wired to the platform API described by `config.api`
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Arc::new(HttpApiClient::from_config(&config.api)?);
        info!(base_url = client.base_url(), "API client configured");
        Ok(Self::new(config, client.clone(), client))
    }

    pub fn workflow(&self) -> &WorkflowController {
        &self.workflow
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn exit_message(&self) -> Option<&str> {
        self.exit_message.as_deref()
    }

    pub async fn run(&mut self) -> Result<()> {
        let guard = TerminalGuard::new()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.clear()?;

        self.enter_current_step();

        while !self.should_quit {
            terminal.draw(|f| self.render(f))?;

            self.drain_responses();

            if event::poll(self.tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        guard.release();
        if let Some(message) = &self.exit_message {
            println!("{}", message);
        }
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(10),   // Step view
                Constraint::Length(2), // Status bar
            ])
            .split(frame.area());

        let current = self.workflow.current_step();
        HeaderBar {
            version: env!("CARGO_PKG_VERSION"),
            current,
            progress: self.workflow.progress(),
        }
        .render(frame, chunks[0]);

        let view = &mut self.views[current.index()];
        view.render(frame, chunks[1], &self.workflow);

        StatusBar {
            notice: self.notice.as_deref(),
            hints: view.key_hints(),
        }
        .render(frame, chunks[2]);

        self.price_dialog
            .render(frame, self.workflow.price_confirmation());
        self.success_dialog.render(frame);
    }

    fn current_view(&mut self) -> &mut Box<dyn StepView> {
        &mut self.views[self.workflow.current_step().index()]
    }

    /// Route one key press: dialogs first, then capturing forms, then globals
    pub fn handle_key(&mut self, key: KeyCode) {
        self.notice = None;

        if self.success_dialog.visible {
            match self.success_dialog.handle_key(key) {
                SuccessDialogResult::Finish => {
                    self.exit_message = Some(self.sent_message());
                    self.should_quit = true;
                }
                SuccessDialogResult::Dismiss | SuccessDialogResult::None => {}
            }
            return;
        }

        if self.workflow.price_confirmation().is_open {
            match self.price_dialog.handle_key(key) {
                PriceDialogAction::SelectMethod(method) => {
                    if let Err(e) = self.workflow.select_payment_method(method) {
                        warn!(method, error = %e, "payment method selection failed");
                        self.price_dialog.show_error(&e);
                    }
                }
                PriceDialogAction::Confirm => {
                    let receipt = self
                        .workflow
                        .confirm_payment(PaymentConfirmation::default());
                    self.success_dialog.show(receipt);
                }
                PriceDialogAction::Previous => {
                    self.with_step_tracking(|wf| wf.payment_previous());
                }
                PriceDialogAction::None => {}
            }
            if key == KeyCode::Char('q') {
                self.should_quit = true;
            }
            return;
        }

        if self.current_view().captures_input() {
            let action = {
                let step = self.workflow.current_step();
                self.views[step.index()].handle_key(key, &self.workflow)
            };
            self.apply_action(action);
            return;
        }

        match key {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char(c @ '1'..='6') => {
                let index = c as usize - '1' as usize;
                if let Some(step) = WorkflowStep::from_index(index) {
                    self.apply_action(StepAction::Command(StepCommand::GoTo(step)));
                }
            }
            KeyCode::Char(']') => self.apply_action(StepAction::Command(StepCommand::Next)),
            KeyCode::Char('[') => self.apply_action(StepAction::Command(StepCommand::Previous)),
            _ => {
                let step = self.workflow.current_step();
                let action = self.views[step.index()].handle_key(key, &self.workflow);
                self.apply_action(action);
            }
        }
    }

    fn sent_message(&self) -> String {
        let title = self
            .workflow
            .event()
            .map_or("your event", |e| e.title.as_str());
        format!(
            "Invitation for {} sent to {} guest(s).",
            title,
            self.workflow.guests().len()
        )
    }

    fn apply_action(&mut self, action: StepAction) {
        match action {
            StepAction::None => {}
            StepAction::Command(command) => {
                self.with_step_tracking(|wf| wf.apply(command));
            }
            StepAction::Request(request) => {
                let step = self.workflow.current_step();
                self.dispatch(step, request);
            }
            StepAction::Notice(message) => {
                self.notice = Some(message);
            }
        }
    }

    /// Run a controller mutation, then react to a step change or a newly
    /// opened price dialog
    fn with_step_tracking(&mut self, mutate: impl FnOnce(&mut WorkflowController)) {
        let before = self.workflow.current_step();
        let was_open = self.workflow.price_confirmation().is_open;

        mutate(&mut self.workflow);

        if !was_open && self.workflow.price_confirmation().is_open {
            self.price_dialog.reset();
        }
        if self.workflow.current_step() != before {
            self.enter_current_step();
        }
    }

    fn enter_current_step(&mut self) {
        let step = self.workflow.current_step();
        if let Some(request) = self.views[step.index()].on_enter(&self.workflow) {
            self.dispatch(step, request);
        }
    }

    /// Spawn the API call; the response comes back tagged with `step`
    fn dispatch(&mut self, step: WorkflowStep, request: ApiRequest) {
        debug!(%step, request = request.describe(), "dispatching API request");
        let tx = self.tx.clone();
        let events = Arc::clone(&self.events_api);
        let guests = Arc::clone(&self.guests_api);

        tokio::spawn(async move {
            let response = match request {
                ApiRequest::ListEvents => ApiResponse::Events(events.list_events().await),
                ApiRequest::CreateEvent(draft) => {
                    ApiResponse::EventCreated(events.create_event(&draft).await)
                }
                ApiRequest::ListGuests { event_id } => {
                    let result = guests.list_guests(&event_id).await;
                    ApiResponse::Guests { event_id, result }
                }
                ApiRequest::InviteGuest { event_id, guest } => {
                    ApiResponse::GuestInvited(guests.invite_guest(&event_id, &guest).await)
                }
            };
            if tx.send((step, response)).is_err() {
                debug!("app closed before API response arrived");
            }
        });
    }

    /// Apply every response that has arrived so far
    pub fn drain_responses(&mut self) {
        while let Ok((step, response)) = self.rx.try_recv() {
            self.handle_response(step, response);
        }
    }

    /// Wait for the next response; for tests and one-shot callers
    pub async fn next_response(&mut self) -> bool {
        match self.rx.recv().await {
            Some((step, response)) => {
                self.handle_response(step, response);
                true
            }
            None => false,
        }
    }

    pub fn handle_response(&mut self, step: WorkflowStep, response: ApiResponse) {
        let failed = response_error(&response);
        if let Some(error) = &failed {
            warn!(%step, %error, "API request failed");
        }

        let action = self.views[step.index()].on_response(response, &self.workflow);

        if step != self.workflow.current_step() {
            if action != StepAction::None {
                warn!(
                    issued_on = %step,
                    current = %self.workflow.current_step(),
                    "discarding stale API response"
                );
                self.views[step.index()].on_discarded(&action);
            }
            return;
        }
        self.apply_action(action);
    }
}

fn response_error(response: &ApiResponse) -> Option<String> {
    match response {
        ApiResponse::Events(Err(e))
        | ApiResponse::EventCreated(Err(e))
        | ApiResponse::Guests { result: Err(e), .. }
        | ApiResponse::GuestInvited(Err(e)) => Some(e.to_string()),
        _ => None,
    }
}
