//! Template step: choose from the built-in catalog

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::{ApiRequest, StepAction, StepView};
use crate::types::{template_catalog, InvitationTemplate};
use crate::workflow::{StepCommand, WorkflowController, WorkflowStep};

pub struct TemplateView {
    list_state: ListState,
}

impl TemplateView {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self { list_state }
    }

    fn highlighted(&self) -> Option<&'static InvitationTemplate> {
        self.list_state
            .selected()
            .and_then(|i| template_catalog().get(i))
    }
}

fn template_details(template: &InvitationTemplate) -> Vec<Line<'static>> {
    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
    };
    let bullet = |text: &str| Line::from(format!("  + {}", text));

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                template.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                if template.is_premium { "  PREMIUM" } else { "" },
                Style::default().fg(Color::Magenta),
            ),
        ]),
        Line::from(Span::styled(
            template.category.label(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        heading("Features"),
    ];
    lines.extend(template.features.iter().map(|f| bullet(f)));

    if template.supports_ar() {
        lines.push(heading("AR elements"));
        lines.extend(template.ar_elements.iter().map(|f| bullet(f)));
    }
    if !template.interactive_features.is_empty() {
        lines.push(heading("Interactive"));
        lines.extend(template.interactive_features.iter().map(|f| bullet(f)));
    }

    let mut flags = Vec::new();
    if template.supports_nft() {
        flags.push("NFT passes".to_string());
    }
    if template.supports_music() {
        flags.push("music".to_string());
    }
    if let Some(level) = &template.gamification_level {
        flags.push(format!("gamification: {}", level.label()));
    }
    if let Some(region) = &template.cultural_region {
        flags.push(format!("region: {}", region));
    }
    if !flags.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            flags.join(" | "),
            Style::default().fg(Color::Cyan),
        )));
    }
    lines
}

impl StepView for TemplateView {
    fn step(&self) -> WorkflowStep {
        WorkflowStep::Template
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, workflow: &WorkflowController) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        let chosen = workflow.template().map(|t| t.id.as_str());
        let items: Vec<ListItem> = template_catalog()
            .iter()
            .map(|t| {
                let marker = if Some(t.id.as_str()) == chosen { "* " } else { "  " };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(Color::Green)),
                    Span::raw(t.name.as_str()),
                ]))
            })
            .collect();
        let list = List::new(items)
            .block(Block::default().title(" Templates ").borders(Borders::ALL))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::REVERSED),
            )
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, chunks[0], &mut self.list_state);

        let details = self.highlighted().map(template_details).unwrap_or_default();
        frame.render_widget(
            Paragraph::new(details)
                .wrap(Wrap { trim: false })
                .block(Block::default().title(" Template ").borders(Borders::ALL)),
            chunks[1],
        );
    }

    fn handle_key(&mut self, key: KeyCode, _workflow: &WorkflowController) -> StepAction {
        let len = template_catalog().len();
        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                let i = self
                    .list_state
                    .selected()
                    .map_or(0, |i| if i == 0 { len - 1 } else { i - 1 });
                self.list_state.select(Some(i));
                StepAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let i = self.list_state.selected().map_or(0, |i| (i + 1) % len);
                self.list_state.select(Some(i));
                StepAction::None
            }
            KeyCode::Enter => match self.highlighted() {
                Some(t) => StepAction::Command(StepCommand::SetTemplate(t.clone())),
                None => StepAction::None,
            },
            KeyCode::Esc | KeyCode::Backspace => StepAction::Command(StepCommand::Previous),
            _ => StepAction::None,
        }
    }

    fn on_enter(&mut self, workflow: &WorkflowController) -> Option<ApiRequest> {
        // Highlight the current choice when coming back
        if let Some(current) = workflow.template() {
            if let Some(i) = template_catalog().iter().position(|t| t.id == current.id) {
                self.list_state.select(Some(i));
            }
        }
        None
    }

    fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        vec![("Enter", "use template"), ("Esc", "back")]
    }
}

impl Default for TemplateView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_sets_highlighted_template() {
        let wf = WorkflowController::new();
        let mut view = TemplateView::new();
        view.handle_key(KeyCode::Down, &wf);
        let expected = template_catalog()[1].clone();
        assert_eq!(
            view.handle_key(KeyCode::Enter, &wf),
            StepAction::Command(StepCommand::SetTemplate(expected))
        );
    }

    #[test]
    fn test_navigation_wraps() {
        let wf = WorkflowController::new();
        let mut view = TemplateView::new();
        view.handle_key(KeyCode::Up, &wf);
        assert_eq!(view.list_state.selected(), Some(template_catalog().len() - 1));
        view.handle_key(KeyCode::Down, &wf);
        assert_eq!(view.list_state.selected(), Some(0));
    }

    #[test]
    fn test_escape_goes_back() {
        let wf = WorkflowController::new();
        let mut view = TemplateView::new();
        assert_eq!(
            view.handle_key(KeyCode::Esc, &wf),
            StepAction::Command(StepCommand::Previous)
        );
    }

    #[test]
    fn test_reentry_highlights_current_template() {
        let mut wf = WorkflowController::new();
        wf.set_template(template_catalog()[2].clone());
        let mut view = TemplateView::new();
        view.on_enter(&wf);
        assert_eq!(view.list_state.selected(), Some(2));
    }

    #[test]
    fn test_details_list_features() {
        let lines = template_details(&template_catalog()[0]);
        assert!(lines.len() > 3);
    }
}
