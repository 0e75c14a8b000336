use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::centered_rect;
use crate::workflow::{PaymentError, PaymentMethod, PriceConfirmationState};

/// What the user asked the price dialog to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceDialogAction {
    None,
    SelectMethod(u32),
    Confirm,
    Previous,
}

/// View state of the price confirmation modal.
///
/// Whether it is shown is owned by the workflow controller; this only keeps
/// the highlighted method and the error line.
pub struct PriceDialog {
    pub methods: Vec<PaymentMethod>,
    pub selected: usize,
    pub error: Option<String>,
}

impl PriceDialog {
    pub fn new() -> Self {
        Self {
            methods: PaymentMethod::defaults(),
            selected: 0,
            error: None,
        }
    }

    pub fn reset(&mut self) {
        self.selected = 0;
        self.error = None;
    }

    pub fn selected_method(&self) -> Option<&PaymentMethod> {
        self.methods.get(self.selected)
    }

    /// Show a failed method selection on the error line
    pub fn show_error(&mut self, error: &PaymentError) {
        self.error = Some(error.to_string());
    }

    pub fn handle_key(&mut self, key: KeyCode) -> PriceDialogAction {
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                PriceDialogAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.methods.len() {
                    self.selected += 1;
                }
                PriceDialogAction::None
            }
            KeyCode::Enter => self
                .selected_method()
                .map(|m| PriceDialogAction::SelectMethod(m.id))
                .unwrap_or(PriceDialogAction::None),
            KeyCode::Char('c') | KeyCode::Char('C') => PriceDialogAction::Confirm,
            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => PriceDialogAction::Previous,
            _ => PriceDialogAction::None,
        }
    }

    pub fn render(&self, frame: &mut Frame, state: PriceConfirmationState) {
        if !state.is_open {
            return;
        }

        let area = centered_rect(56, 60, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Confirm Price ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2), // Amount
                Constraint::Length(1), // Label
                Constraint::Min(3),    // Methods
                Constraint::Length(2), // Error
                Constraint::Length(1), // Footer
            ])
            .split(inner);

        let amount = Paragraph::new(vec![
            Line::from(Span::styled(
                format!("{:.2}$", state.estimate),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Platform fee for sending this invitation",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(amount, chunks[0]);

        frame.render_widget(
            Paragraph::new(Span::styled(
                "Payment method:",
                Style::default().fg(Color::Yellow),
            )),
            chunks[1],
        );

        let items: Vec<ListItem> = self
            .methods
            .iter()
            .map(|m| ListItem::new(m.label.as_str()))
            .collect();
        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::REVERSED),
            )
            .highlight_symbol("> ");
        let mut list_state = ListState::default();
        list_state.select(Some(self.selected));
        frame.render_stateful_widget(list, chunks[2], &mut list_state);

        if let Some(error) = &self.error {
            frame.render_widget(
                Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red)))
                    .wrap(Wrap { trim: true }),
                chunks[3],
            );
        }

        let footer = Paragraph::new(Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(" use method  "),
            Span::styled("c", Style::default().fg(Color::Yellow)),
            Span::raw(" confirm  "),
            Span::styled("p/Esc", Style::default().fg(Color::Yellow)),
            Span::raw(" previous"),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(footer, chunks[4]);
    }
}

impl Default for PriceDialog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_clamps() {
        let mut dialog = PriceDialog::new();
        dialog.handle_key(KeyCode::Up);
        assert_eq!(dialog.selected, 0);
        for _ in 0..10 {
            dialog.handle_key(KeyCode::Down);
        }
        assert_eq!(dialog.selected, dialog.methods.len() - 1);
    }

    #[test]
    fn test_enter_selects_highlighted_method() {
        let mut dialog = PriceDialog::new();
        dialog.handle_key(KeyCode::Down);
        assert_eq!(
            dialog.handle_key(KeyCode::Enter),
            PriceDialogAction::SelectMethod(2)
        );
    }

    #[test]
    fn test_confirm_and_previous_keys() {
        let mut dialog = PriceDialog::new();
        assert_eq!(dialog.handle_key(KeyCode::Char('c')), PriceDialogAction::Confirm);
        assert_eq!(dialog.handle_key(KeyCode::Char('p')), PriceDialogAction::Previous);
        assert_eq!(dialog.handle_key(KeyCode::Esc), PriceDialogAction::Previous);
    }

    #[test]
    fn test_error_line() {
        let mut dialog = PriceDialog::new();
        dialog.show_error(&PaymentError::Unimplemented { method: 3 });
        assert_eq!(
            dialog.error.as_deref(),
            Some("payment method 3 is not implemented yet")
        );
        dialog.reset();
        assert!(dialog.error.is_none());
    }
}
