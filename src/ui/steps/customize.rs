//! Customize step: option list on the left, live preview on the right

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use super::{hex_color, render_invitation_card, render_missing_preview, StepAction, StepView};
use crate::types::{
    pair, CustomizationPatch, Customizations, CULTURAL_ELEMENTS, FONT_PRESETS, PALETTE_PRESETS,
};
use crate::workflow::{StepCommand, WorkflowController, WorkflowStep};

/// Track attached when music preview is switched on
pub const DEFAULT_MUSIC_PREVIEW: &str = "ambient-lounge";

/// How the live preview pane frames the card
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PreviewMode {
    #[default]
    Desktop,
    Mobile,
    Ar,
    Nft,
}

impl PreviewMode {
    pub fn next(self) -> Self {
        match self {
            PreviewMode::Desktop => PreviewMode::Mobile,
            PreviewMode::Mobile => PreviewMode::Ar,
            PreviewMode::Ar => PreviewMode::Nft,
            PreviewMode::Nft => PreviewMode::Desktop,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PreviewMode::Desktop => "desktop",
            PreviewMode::Mobile => "mobile",
            PreviewMode::Ar => "AR",
            PreviewMode::Nft => "NFT",
        }
    }
}

/// One editable row of the option list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomizeOption {
    Palette,
    Fonts,
    Animations,
    Music,
    ArExperience,
    NftPass,
    Gamification,
    Sustainability,
    Cultural(&'static str),
}

impl CustomizeOption {
    pub fn all() -> Vec<CustomizeOption> {
        let mut options = vec![
            CustomizeOption::Palette,
            CustomizeOption::Fonts,
            CustomizeOption::Animations,
            CustomizeOption::Music,
            CustomizeOption::ArExperience,
            CustomizeOption::NftPass,
            CustomizeOption::Gamification,
            CustomizeOption::Sustainability,
        ];
        options.extend(CULTURAL_ELEMENTS.iter().copied().map(CustomizeOption::Cultural));
        options
    }

    fn label(self) -> &'static str {
        match self {
            CustomizeOption::Palette => "Colors",
            CustomizeOption::Fonts => "Fonts",
            CustomizeOption::Animations => "Animations",
            CustomizeOption::Music => "Music preview",
            CustomizeOption::ArExperience => "AR experience",
            CustomizeOption::NftPass => "NFT pass preview",
            CustomizeOption::Gamification => "Gamification",
            CustomizeOption::Sustainability => "Sustainability badges",
            CustomizeOption::Cultural(name) => name,
        }
    }

    /// Patch that activates this row given the current settings
    pub fn patch(self, current: &Customizations) -> CustomizationPatch {
        match self {
            CustomizeOption::Palette => {
                let preset = next_preset(PALETTE_PRESETS, &current.colors);
                CustomizationPatch::colors(preset)
            }
            CustomizeOption::Fonts => {
                let preset = next_preset(FONT_PRESETS, &current.fonts);
                CustomizationPatch::fonts(preset)
            }
            CustomizeOption::Animations => CustomizationPatch::animations(!current.animations),
            CustomizeOption::Music => CustomizationPatch {
                music_preview: Some(match current.music_preview {
                    Some(_) => None,
                    None => Some(DEFAULT_MUSIC_PREVIEW.to_string()),
                }),
                ..Default::default()
            },
            CustomizeOption::ArExperience => CustomizationPatch {
                ar_experience: Some(!current.ar_experience),
                ..Default::default()
            },
            CustomizeOption::NftPass => CustomizationPatch {
                nft_pass_preview: Some(!current.nft_pass_preview),
                ..Default::default()
            },
            CustomizeOption::Gamification => CustomizationPatch {
                gamification_elements: Some(!current.gamification_elements),
                ..Default::default()
            },
            CustomizeOption::Sustainability => CustomizationPatch {
                sustainability_badges: Some(!current.sustainability_badges),
                ..Default::default()
            },
            CustomizeOption::Cultural(name) => {
                let mut elements = current.cultural_elements.clone();
                if let Some(pos) = elements.iter().position(|e| e == name) {
                    elements.remove(pos);
                } else {
                    elements.push(name.to_string());
                }
                CustomizationPatch {
                    cultural_elements: Some(elements),
                    ..Default::default()
                }
            }
        }
    }
}

/// Preset after the one matching `current`; the first preset for custom values
fn next_preset(presets: &[[&'static str; 2]], current: &[String; 2]) -> [&'static str; 2] {
    let next = presets
        .iter()
        .position(|p| pair(*p) == *current)
        .map_or(0, |i| (i + 1) % presets.len());
    presets[next]
}

fn checkbox(on: bool) -> Span<'static> {
    if on {
        Span::styled("[x] ", Style::default().fg(Color::Green))
    } else {
        Span::styled("[ ] ", Style::default().fg(Color::DarkGray))
    }
}

fn option_line(option: CustomizeOption, c: &Customizations) -> Line<'static> {
    let label = Span::raw(option.label());
    match option {
        CustomizeOption::Palette => Line::from(vec![
            Span::raw("Colors  "),
            Span::styled("##", Style::default().fg(hex_color(&c.colors[0]))),
            Span::styled("##", Style::default().fg(hex_color(&c.colors[1]))),
            Span::styled(
                format!(" {} {}", c.colors[0], c.colors[1]),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        CustomizeOption::Fonts => Line::from(vec![
            Span::raw("Fonts   "),
            Span::styled(
                format!("{} / {}", c.fonts[0], c.fonts[1]),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        CustomizeOption::Animations => Line::from(vec![checkbox(c.animations), label]),
        CustomizeOption::Music => Line::from(vec![checkbox(c.music_preview.is_some()), label]),
        CustomizeOption::ArExperience => Line::from(vec![checkbox(c.ar_experience), label]),
        CustomizeOption::NftPass => Line::from(vec![checkbox(c.nft_pass_preview), label]),
        CustomizeOption::Gamification => {
            Line::from(vec![checkbox(c.gamification_elements), label])
        }
        CustomizeOption::Sustainability => {
            Line::from(vec![checkbox(c.sustainability_badges), label])
        }
        CustomizeOption::Cultural(name) => Line::from(vec![
            checkbox(c.cultural_elements.iter().any(|e| e == name)),
            Span::styled(name, Style::default().fg(Color::Yellow)),
        ]),
    }
}

pub struct CustomizeView {
    options: Vec<CustomizeOption>,
    list_state: ListState,
    pub preview_mode: PreviewMode,
}

impl CustomizeView {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            options: CustomizeOption::all(),
            list_state,
            preview_mode: PreviewMode::default(),
        }
    }

    fn highlighted(&self) -> Option<CustomizeOption> {
        self.list_state
            .selected()
            .and_then(|i| self.options.get(i).copied())
    }
}

impl StepView for CustomizeView {
    fn step(&self) -> WorkflowStep {
        WorkflowStep::Customize
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, workflow: &WorkflowController) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        let current = workflow.customizations();
        let items: Vec<ListItem> = self
            .options
            .iter()
            .map(|o| ListItem::new(option_line(*o, current)))
            .collect();
        let list = List::new(items)
            .block(Block::default().title(" Customize ").borders(Borders::ALL))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, chunks[0], &mut self.list_state);

        match workflow.preview() {
            Some(preview) => render_invitation_card(frame, chunks[1], &preview, self.preview_mode),
            None => render_missing_preview(frame, chunks[1], workflow),
        }
    }

    fn handle_key(&mut self, key: KeyCode, workflow: &WorkflowController) -> StepAction {
        let len = self.options.len();
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
            KeyCode::Enter | KeyCode::Char(' ') => match self.highlighted() {
                Some(option) => StepAction::Command(StepCommand::UpdateCustomizations(
                    option.patch(workflow.customizations()),
                )),
                None => StepAction::None,
            },
            KeyCode::Char('m') => {
                self.preview_mode = self.preview_mode.next();
                StepAction::None
            }
            KeyCode::Esc => StepAction::Command(StepCommand::Previous),
            _ => StepAction::None,
        }
    }

    fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            ("Space", "change"),
            ("m", "preview mode"),
            ("]", "guests"),
            ("Esc", "back"),
        ]
    }
}

impl Default for CustomizeView {
    fn default() -> Self {
        Self::new()
    }
}
