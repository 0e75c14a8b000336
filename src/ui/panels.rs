use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::workflow::WorkflowStep;

/// Title, progress gauge and the numbered step strip
pub struct HeaderBar {
    pub version: &'static str,
    pub current: WorkflowStep,
    pub progress: u8,
}

impl HeaderBar {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let title = Line::from(vec![
            Span::styled(
                " Create Invitation",
                Style::default()
                    .fg(Color::LightMagenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" v{}", self.version),
                Style::default().fg(Color::Gray),
            ),
        ]);
        frame.render_widget(Paragraph::new(title), rows[0]);

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Magenta).bg(Color::Black))
            .percent(u16::from(self.progress.min(100)))
            .label(format!(
                "Step {} of {}",
                self.current.index() + 1,
                WorkflowStep::ALL.len()
            ));
        frame.render_widget(gauge, rows[1]);

        frame.render_widget(Paragraph::new(step_strip(self.current)), rows[2]);
    }
}

fn step_strip(current: WorkflowStep) -> Line<'static> {
    let mut spans = Vec::with_capacity(WorkflowStep::ALL.len() * 2);
    for step in WorkflowStep::ALL {
        let style = if step == current {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD)
        } else if step.index() < current.index() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(
            format!(" {} {} ", step.index() + 1, step.label()),
            style,
        ));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Notice line plus key hints
pub struct StatusBar<'a> {
    pub notice: Option<&'a str>,
    pub hints: Vec<(&'static str, &'static str)>,
}

impl StatusBar<'_> {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        if let Some(notice) = self.notice {
            spans.push(Span::styled(
                format!("{}  ", notice),
                Style::default().fg(Color::Yellow),
            ));
        }
        for (key, action) in &self.hints {
            spans.push(Span::styled(
                format!("[{}]", key),
                Style::default().fg(Color::Cyan),
            ));
            spans.push(Span::styled(
                format!("{} ", action),
                Style::default().fg(Color::DarkGray),
            ));
        }
        spans.push(Span::styled(
            "[1-6]jump []/[]step [q]uit",
            Style::default().fg(Color::DarkGray),
        ));

        let bar = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::TOP));
        frame.render_widget(bar, area);
    }
}
