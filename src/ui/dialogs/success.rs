use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::centered_rect;
use crate::workflow::PaymentReceipt;

/// Result of a key press in the success dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessDialogResult {
    None,
    Finish,
    Dismiss,
}

/// Shown after the price was confirmed
pub struct SuccessDialog {
    pub visible: bool,
    pub receipt: Option<PaymentReceipt>,
}

impl SuccessDialog {
    pub fn new() -> Self {
        Self {
            visible: false,
            receipt: None,
        }
    }

    pub fn show(&mut self, receipt: PaymentReceipt) {
        self.receipt = Some(receipt);
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn handle_key(&mut self, key: KeyCode) -> SuccessDialogResult {
        match key {
            KeyCode::Enter => {
                self.hide();
                SuccessDialogResult::Finish
            }
            KeyCode::Esc => {
                self.hide();
                SuccessDialogResult::Dismiss
            }
            _ => SuccessDialogResult::None,
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        if !self.visible {
            return;
        }
        let Some(receipt) = &self.receipt else {
            return;
        };

        let area = centered_rect(50, 40, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(" Invitation Sent ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(inner);

        frame.render_widget(
            Paragraph::new(Span::styled(
                "Payment successful",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            chunks[0],
        );

        let lines: Vec<Line> = receipt
            .details()
            .into_iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!("{:<16}", label), Style::default().fg(Color::Gray)),
                    Span::styled(value, Style::default().fg(Color::White)),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), chunks[1]);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Enter", Style::default().fg(Color::Yellow)),
                Span::raw(" finish  "),
                Span::styled("Esc", Style::default().fg(Color::Yellow)),
                Span::raw(" close"),
            ]))
            .alignment(Alignment::Center),
            chunks[2],
        );
    }
}

impl Default for SuccessDialog {
    fn default() -> Self {
        Self::new()
    }
}
