//! Send step: summary of what will go out; the price dialog sits on top

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{StepAction, StepView};
use crate::workflow::{StepCommand, WorkflowController, WorkflowStep};

fn summary_lines(workflow: &WorkflowController) -> Vec<Line<'static>> {
    let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::Gray));
    let missing = || Span::styled("not chosen", Style::default().fg(Color::Red));

    let event = workflow
        .event()
        .map_or_else(missing, |e| Span::raw(e.title.clone()));
    let template = workflow
        .template()
        .map_or_else(missing, |t| Span::raw(t.name.clone()));
    let features = workflow.customizations().enabled_features();

    vec![
        Line::from(vec![label("Event:     "), event]),
        Line::from(vec![label("Template:  "), template]),
        Line::from(vec![
            label("Features:  "),
            Span::raw(if features.is_empty() {
                "none".to_string()
            } else {
                features.join(", ")
            }),
        ]),
        Line::from(vec![
            label("Guests:    "),
            Span::raw(workflow.guests().len().to_string()),
        ]),
        Line::from(""),
        Line::from(vec![
            label("Platform fee: "),
            Span::styled(
                format!("{:.2}$", workflow.platform_fee()),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ]
}

pub struct SendView;

impl SendView {
    pub fn new() -> Self {
        Self
    }
}

impl StepView for SendView {
    fn step(&self) -> WorkflowStep {
        WorkflowStep::Send
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, workflow: &WorkflowController) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(3)])
            .split(area);

        frame.render_widget(
            Paragraph::new(summary_lines(workflow))
                .wrap(Wrap { trim: true })
                .block(Block::default().title(" Send ").borders(Borders::ALL)),
            chunks[0],
        );

        let hint = if workflow.price_confirmation().is_open {
            "Review the price to send your invitation."
        } else {
            "Press p to review the price again."
        };
        frame.render_widget(
            Paragraph::new(Span::styled(hint, Style::default().fg(Color::DarkGray)))
                .block(Block::default().borders(Borders::ALL)),
            chunks[1],
        );
    }

    fn handle_key(&mut self, key: KeyCode, _workflow: &WorkflowController) -> StepAction {
        match key {
            // Revisiting preview and coming back reopens the dialog
            KeyCode::Char('p') | KeyCode::Esc => StepAction::Command(StepCommand::Previous),
            _ => StepAction::None,
        }
    }

    fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        vec![("p", "back to preview")]
    }
}

impl Default for SendView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InvitationEvent;

    fn text_of(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect()
    }

    #[test]
    fn test_summary_flags_missing_selections() {
        let wf = WorkflowController::new();
        let text = text_of(&summary_lines(&wf));
        assert!(text.contains("not chosen"));
        assert!(text.contains("99.99$"));
        assert!(text.contains("Guests:    0"));
    }

    #[test]
    fn test_summary_uses_configured_fee() {
        let mut wf = WorkflowController::with_platform_fee(12.5);
        wf.set_event(InvitationEvent {
            id: "e1".to_string(),
            title: "Gala".to_string(),
            ..Default::default()
        });
        let text = text_of(&summary_lines(&wf));
        assert!(text.contains("Gala"));
        assert!(text.contains("12.50$"));
    }

    #[test]
    fn test_p_goes_back_to_preview() {
        let wf = WorkflowController::new();
        let mut view = SendView::new();
        assert_eq!(
            view.handle_key(KeyCode::Char('p'), &wf),
            StepAction::Command(StepCommand::Previous)
        );
    }
}
