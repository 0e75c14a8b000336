//! Preview step and the invitation card shared with the customize step

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::{PreviewMode, StepAction, StepView};
use crate::workflow::{InvitationPreview, StepCommand, WorkflowController, WorkflowStep};

/// Parse `#rrggbb`; anything else renders white
pub(crate) fn hex_color(hex: &str) -> Color {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 {
        return Color::White;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2).unwrap_or(""), 16).ok();
    match (channel(0), channel(2), channel(4)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => Color::White,
    }
}

fn card_area(area: Rect, mode: PreviewMode) -> Rect {
    if mode != PreviewMode::Mobile || area.width <= 40 {
        return area;
    }
    let side = (area.width - 40) / 2;
    Rect::new(area.x + side, area.y, 40, area.height)
}

/// Draw the invitation as guests would see it
pub(crate) fn render_invitation_card(
    frame: &mut Frame,
    area: Rect,
    preview: &InvitationPreview<'_>,
    mode: PreviewMode,
) {
    let c = preview.customizations;
    let primary = hex_color(&c.colors[0]);
    let secondary = hex_color(&c.colors[1]);
    let area = card_area(area, mode);

    let block = Block::default()
        .title(format!(" {} ({}) ", preview.template.name, mode.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(primary));

    let mut lines = vec![
        Line::from(Span::styled(
            "You're invited!",
            Style::default().fg(secondary).add_modifier(Modifier::ITALIC),
        )),
        Line::from(Span::styled(
            preview.event.title.clone(),
            Style::default().fg(primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(preview.event.schedule_line()),
    ];
    if !preview.event.address.is_empty() {
        lines.push(Line::from(preview.event.address.clone()));
    }
    if !preview.event.host_name.is_empty() {
        lines.push(Line::from(format!("Hosted by {}", preview.event.host_name)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("{} / {}", c.fonts[0], c.fonts[1]),
        Style::default().fg(Color::DarkGray),
    )));

    match mode {
        PreviewMode::Ar => {
            let text = if preview.template.supports_ar() {
                format!("AR: {}", preview.template.ar_elements.join(", "))
            } else {
                "AR: this template has no AR elements".to_string()
            };
            lines.push(Line::from(Span::styled(text, Style::default().fg(Color::Cyan))));
        }
        PreviewMode::Nft => {
            let text = if c.nft_pass_preview {
                "NFT pass: minted per guest at send time"
            } else {
                "NFT pass: disabled"
            };
            lines.push(Line::from(Span::styled(
                text,
                Style::default().fg(Color::Magenta),
            )));
        }
        PreviewMode::Desktop | PreviewMode::Mobile => {}
    }

    let features = c.enabled_features();
    if !features.is_empty() {
        lines.push(Line::from(format!("Includes: {}", features.join(", "))));
    }
    if !c.cultural_elements.is_empty() {
        lines.push(Line::from(format!(
            "Cultural: {}",
            c.cultural_elements.join(", ")
        )));
    }
    if let Some(track) = &c.music_preview {
        lines.push(Line::from(format!("Music: {}", track)));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

/// Placeholder shown when the event or template is missing
pub(crate) fn render_missing_preview(frame: &mut Frame, area: Rect, workflow: &WorkflowController) {
    let mut lines = vec![Line::from(Span::styled(
        "Nothing to preview yet",
        Style::default().fg(Color::Yellow),
    ))];
    if workflow.event().is_none() {
        lines.push(Line::from("  - choose an event (press 1)"));
    }
    if workflow.template().is_none() {
        lines.push(Line::from("  - choose a template (press 2)"));
    }
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().title(" Preview ").borders(Borders::ALL)),
        area,
    );
}

pub struct PreviewView;

impl PreviewView {
    pub fn new() -> Self {
        Self
    }
}

impl StepView for PreviewView {
    fn step(&self) -> WorkflowStep {
        WorkflowStep::Preview
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, workflow: &WorkflowController) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        match workflow.preview() {
            Some(preview) => {
                render_invitation_card(frame, chunks[0], &preview, PreviewMode::Desktop)
            }
            None => render_missing_preview(frame, chunks[0], workflow),
        }

        let guests = workflow.guests();
        let items: Vec<ListItem> = if guests.is_empty() {
            vec![ListItem::new(Span::styled(
                "No guests yet (press 4)",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            guests
                .iter()
                .map(|g| {
                    ListItem::new(Line::from(vec![
                        Span::raw(g.name.as_str()),
                        Span::styled(
                            format!("  {}", g.email),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ]))
                })
                .collect()
        };
        frame.render_widget(
            List::new(items).block(
                Block::default()
                    .title(format!(" Guests ({}) ", guests.len()))
                    .borders(Borders::ALL),
            ),
            chunks[1],
        );
    }

    fn handle_key(&mut self, key: KeyCode, _workflow: &WorkflowController) -> StepAction {
        match key {
            KeyCode::Enter => StepAction::Command(StepCommand::Next),
            KeyCode::Esc => StepAction::Command(StepCommand::Previous),
            _ => StepAction::None,
        }
    }

    fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        vec![("Enter", "continue to send"), ("Esc", "back")]
    }
}

impl Default for PreviewView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{template_catalog, InvitationEvent};
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color("#6366f1"), Color::Rgb(0x63, 0x66, 0xf1));
        assert_eq!(hex_color("8b5cf6"), Color::Rgb(0x8b, 0x5c, 0xf6));
        assert_eq!(hex_color("#111"), Color::White);
        assert_eq!(hex_color("#zzzzzz"), Color::White);
    }

    #[test]
    fn test_mobile_card_is_narrow() {
        let area = Rect::new(0, 0, 100, 20);
        assert_eq!(card_area(area, PreviewMode::Mobile).width, 40);
        assert_eq!(card_area(area, PreviewMode::Desktop), area);
    }

    #[test]
    fn test_renders_empty_state_without_selections() {
        let wf = WorkflowController::new();
        let mut view = PreviewView::new();
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal
            .draw(|f| view.render(f, f.area(), &wf))
            .unwrap();
        assert!(buffer_text(&terminal).contains("Nothing to preview yet"));
    }

    #[test]
    fn test_renders_event_title() {
        let mut wf = WorkflowController::new();
        wf.set_event(InvitationEvent {
            id: "e1".to_string(),
            title: "Rooftop Launch".to_string(),
            ..Default::default()
        });
        wf.set_template(template_catalog()[0].clone());
        let mut view = PreviewView::new();
        let mut terminal = Terminal::new(TestBackend::new(120, 24)).unwrap();
        terminal
            .draw(|f| view.render(f, f.area(), &wf))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Rooftop Launch"));
        assert!(text.contains("Guests (0)"));
    }

    #[test]
    fn test_enter_moves_to_send() {
        let wf = WorkflowController::new();
        let mut view = PreviewView::new();
        assert_eq!(
            view.handle_key(KeyCode::Enter, &wf),
            StepAction::Command(StepCommand::Next)
        );
    }
}
