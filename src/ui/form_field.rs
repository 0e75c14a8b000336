//! Form widgets for the event-creation and add-guest forms

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use tui_textarea::TextArea;

/// Input kind of a form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Single line, optionally length-limited
    Text { max_length: Option<usize> },
    /// Multi-line free text
    LongText,
    /// One of a fixed set of options
    Choice(Vec<String>),
    Toggle,
    /// YYYY-MM-DD
    Date,
    /// HH:MM
    Time,
    /// Digits and an optional decimal point
    Number,
}

/// Declarative description of one form field
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: &'static str,
    pub default: Option<String>,
}

impl FieldSpec {
    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Text { max_length: None },
            required: false,
            placeholder: "",
            default: None,
        }
    }

    pub fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// Character filter and limit for masked single-line inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMask {
    Date,
    Time,
    Number,
}

impl InputMask {
    fn accepts(self, c: char) -> bool {
        match self {
            InputMask::Date => c.is_ascii_digit() || c == '-',
            InputMask::Time => c.is_ascii_digit() || c == ':',
            InputMask::Number => c.is_ascii_digit() || c == '.',
        }
    }

    fn max_len(self) -> usize {
        match self {
            InputMask::Date => 10,
            InputMask::Time => 5,
            InputMask::Number => 12,
        }
    }

    fn hint(self) -> &'static str {
        match self {
            InputMask::Date => "YYYY-MM-DD",
            InputMask::Time => "HH:MM",
            InputMask::Number => "0",
        }
    }
}

/// A form field widget that can handle different input types
pub enum FormField {
    /// Single-line text input
    TextInput {
        value: String,
        cursor_pos: usize,
        placeholder: String,
        max_length: Option<usize>,
    },
    /// Multi-line text input using tui-textarea
    TextArea {
        textarea: Box<TextArea<'static>>,
        placeholder: String,
    },
    /// Selection from predefined options
    EnumSelect { options: Vec<String>, selected: usize },
    /// Boolean toggle
    Toggle { value: bool },
    /// Date, time or number input
    Masked {
        value: String,
        cursor_pos: usize,
        mask: InputMask,
    },
}

fn prev_boundary(value: &str, pos: usize) -> usize {
    value[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_boundary(value: &str, pos: usize) -> usize {
    value[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(pos)
}

/// Shared editing keys for single-line inputs; `accept` filters typed chars
fn edit_line(
    value: &mut String,
    cursor_pos: &mut usize,
    key: KeyCode,
    max_chars: Option<usize>,
    accept: impl Fn(char) -> bool,
) -> bool {
    match key {
        KeyCode::Char(c) if accept(c) => {
            if max_chars.map(|m| value.chars().count() < m).unwrap_or(true) {
                value.insert(*cursor_pos, c);
                *cursor_pos += c.len_utf8();
            }
            true
        }
        KeyCode::Backspace => {
            if *cursor_pos > 0 {
                let start = prev_boundary(value, *cursor_pos);
                value.replace_range(start..*cursor_pos, "");
                *cursor_pos = start;
            }
            true
        }
        KeyCode::Delete => {
            if *cursor_pos < value.len() {
                let end = next_boundary(value, *cursor_pos);
                value.replace_range(*cursor_pos..end, "");
            }
            true
        }
        KeyCode::Left => {
            *cursor_pos = prev_boundary(value, *cursor_pos);
            true
        }
        KeyCode::Right => {
            *cursor_pos = next_boundary(value, *cursor_pos);
            true
        }
        KeyCode::Home => {
            *cursor_pos = 0;
            true
        }
        KeyCode::End => {
            *cursor_pos = value.len();
            true
        }
        _ => false,
    }
}

fn with_cursor(value: &str, cursor_pos: usize) -> String {
    let mut text = value.to_string();
    text.insert(cursor_pos.min(text.len()), '|');
    text
}

impl FormField {
    pub fn from_spec(spec: &FieldSpec) -> Self {
        let default_value = spec.default.clone().unwrap_or_default();
        match &spec.kind {
            FieldKind::Text { max_length } => FormField::TextInput {
                cursor_pos: default_value.len(),
                value: default_value,
                placeholder: spec.placeholder.to_string(),
                max_length: *max_length,
            },
            FieldKind::LongText => {
                let mut textarea = TextArea::default();
                textarea.insert_str(&default_value);
                FormField::TextArea {
                    textarea: Box::new(textarea),
                    placeholder: spec.placeholder.to_string(),
                }
            }
            FieldKind::Choice(options) => {
                let selected = options
                    .iter()
                    .position(|o| *o == default_value)
                    .unwrap_or(0);
                FormField::EnumSelect {
                    options: options.clone(),
                    selected,
                }
            }
            FieldKind::Toggle => FormField::Toggle {
                value: default_value == "true" || default_value == "yes",
            },
            FieldKind::Date | FieldKind::Time | FieldKind::Number => {
                let mask = match spec.kind {
                    FieldKind::Date => InputMask::Date,
                    FieldKind::Time => InputMask::Time,
                    _ => InputMask::Number,
                };
                FormField::Masked {
                    cursor_pos: default_value.len(),
                    value: default_value,
                    mask,
                }
            }
        }
    }

    /// Get the current value as a string
    pub fn value(&self) -> String {
        match self {
            FormField::TextInput { value, .. } | FormField::Masked { value, .. } => value.clone(),
            FormField::TextArea { textarea, .. } => textarea.lines().join("\n"),
            FormField::EnumSelect {
                options, selected, ..
            } => options.get(*selected).cloned().unwrap_or_default(),
            FormField::Toggle { value } => value.to_string(),
        }
    }

    pub fn set_value(&mut self, new_value: &str) {
        match self {
            FormField::TextInput {
                value, cursor_pos, ..
            }
            | FormField::Masked {
                value, cursor_pos, ..
            } => {
                *value = new_value.to_string();
                *cursor_pos = value.len();
            }
            FormField::TextArea { textarea, .. } => {
                textarea.select_all();
                textarea.cut();
                textarea.insert_str(new_value);
            }
            FormField::EnumSelect { options, selected } => {
                if let Some(idx) = options.iter().position(|o| o == new_value) {
                    *selected = idx;
                }
            }
            FormField::Toggle { value } => {
                *value = new_value == "true" || new_value == "yes";
            }
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            FormField::TextArea { textarea, .. } => {
                textarea.lines().iter().all(|l| l.trim().is_empty())
            }
            FormField::EnumSelect { options, .. } => options.is_empty(),
            FormField::Toggle { .. } => false,
            _ => self.value().trim().is_empty(),
        }
    }

    /// Whether Enter belongs to the field rather than the form
    pub fn consumes_enter(&self) -> bool {
        matches!(self, FormField::TextArea { .. } | FormField::Toggle { .. })
    }

    /// Handle a key event, returns true if the key was consumed
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match self {
            FormField::TextInput {
                value,
                cursor_pos,
                max_length,
                ..
            } => edit_line(value, cursor_pos, key, *max_length, |_| true),
            FormField::Masked {
                value,
                cursor_pos,
                mask,
            } => {
                let mask = *mask;
                edit_line(value, cursor_pos, key, Some(mask.max_len()), |c| {
                    mask.accepts(c)
                })
            }
            FormField::TextArea { textarea, .. } => {
                textarea.input(KeyEvent::new(key, KeyModifiers::NONE));
                true
            }
            FormField::EnumSelect { options, selected } => match key {
                KeyCode::Up | KeyCode::Left => {
                    *selected = selected.saturating_sub(1);
                    true
                }
                KeyCode::Down | KeyCode::Right => {
                    if *selected + 1 < options.len() {
                        *selected += 1;
                    }
                    true
                }
                _ => false,
            },
            FormField::Toggle { value } => match key {
                KeyCode::Char(' ') | KeyCode::Enter => {
                    *value = !*value;
                    true
                }
                KeyCode::Left => {
                    *value = false;
                    true
                }
                KeyCode::Right => {
                    *value = true;
                    true
                }
                _ => false,
            },
        }
    }

    /// Get the height needed to render this field
    pub fn render_height(&self) -> u16 {
        match self {
            FormField::TextArea { .. } => 4,
            _ => 1,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let text_style = Style::default().fg(if focused { Color::White } else { Color::Gray });
        let placeholder_style = Style::default().fg(Color::DarkGray);

        match self {
            FormField::TextInput {
                value,
                cursor_pos,
                placeholder,
                max_length,
            } => {
                let content = if value.is_empty() && !focused {
                    Line::from(Span::styled(placeholder.as_str(), placeholder_style))
                } else {
                    let text = if focused {
                        with_cursor(value, *cursor_pos)
                    } else {
                        value.clone()
                    };
                    let suffix = max_length
                        .map(|m| format!(" ({}/{})", value.chars().count(), m))
                        .unwrap_or_default();
                    Line::from(vec![Span::raw(text), Span::styled(suffix, placeholder_style)])
                };
                frame.render_widget(Paragraph::new(content).style(text_style), area);
            }
            FormField::Masked {
                value,
                cursor_pos,
                mask,
            } => {
                let content = if value.is_empty() && !focused {
                    Line::from(Span::styled(mask.hint(), placeholder_style))
                } else if focused {
                    Line::from(with_cursor(value, *cursor_pos))
                } else {
                    Line::from(value.clone())
                };
                frame.render_widget(Paragraph::new(content).style(text_style), area);
            }
            FormField::TextArea {
                textarea,
                placeholder,
            } => {
                textarea.set_cursor_line_style(Style::default());
                textarea.set_cursor_style(if focused {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                });
                textarea.set_block(
                    Block::default()
                        .borders(Borders::LEFT)
                        .border_style(Style::default().fg(if focused {
                            Color::Cyan
                        } else {
                            Color::DarkGray
                        })),
                );
                if textarea.lines().iter().all(|l| l.is_empty()) && !focused {
                    textarea.set_placeholder_text(placeholder.clone());
                    textarea.set_placeholder_style(placeholder_style);
                }
                frame.render_widget(&**textarea, area);
            }
            FormField::EnumSelect { options, selected } => {
                // One row: the current option between arrows
                let current = options.get(*selected).cloned().unwrap_or_default();
                let line = Line::from(vec![
                    Span::styled("< ", placeholder_style),
                    Span::styled(current, Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(" >", placeholder_style),
                ]);
                frame.render_widget(Paragraph::new(line).style(text_style), area);
            }
            FormField::Toggle { value } => {
                let on = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);
                let off = Style::default().fg(Color::DarkGray);
                let line = Line::from(vec![
                    Span::styled("[Yes]", if *value { on } else { off }),
                    Span::raw(" / "),
                    Span::styled("[No]", if *value { off } else { on }),
                ]);
                frame.render_widget(Paragraph::new(line), area);
            }
        }
    }
}

/// What a key press did to the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormInput {
    Consumed,
    Submit,
    Cancel,
    Ignored,
}

/// An ordered set of fields with focus and an error line
pub struct InputForm {
    pub title: String,
    specs: Vec<FieldSpec>,
    fields: Vec<FormField>,
    pub focused_index: usize,
    pub error: Option<String>,
}

impl InputForm {
    pub fn new(title: impl Into<String>, specs: Vec<FieldSpec>) -> Self {
        let fields = specs.iter().map(FormField::from_spec).collect();
        Self {
            title: title.into(),
            specs,
            fields,
            focused_index: 0,
            error: None,
        }
    }

    pub fn focused_field_name(&self) -> Option<&'static str> {
        self.specs.get(self.focused_index).map(|s| s.name)
    }

    pub fn next_field(&mut self) {
        if self.focused_index + 1 < self.fields.len() {
            self.focused_index += 1;
        }
    }

    pub fn prev_field(&mut self) {
        self.focused_index = self.focused_index.saturating_sub(1);
    }

    /// Value of a named field; empty when the name is unknown
    pub fn value(&self, name: &str) -> String {
        self.specs
            .iter()
            .position(|s| s.name == name)
            .and_then(|i| self.fields.get(i))
            .map(FormField::value)
            .unwrap_or_default()
    }

    /// Trimmed value, `None` when blank
    pub fn optional(&self, name: &str) -> Option<String> {
        let value = self.value(name);
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    pub fn set_value(&mut self, name: &str, value: &str) {
        if let Some(i) = self.specs.iter().position(|s| s.name == name) {
            if let Some(field) = self.fields.get_mut(i) {
                field.set_value(value);
            }
        }
    }

    /// Label of the first required field left blank
    pub fn first_missing(&self) -> Option<&'static str> {
        self.specs
            .iter()
            .zip(&self.fields)
            .find(|(spec, field)| spec.required && field.is_blank())
            .map(|(spec, _)| spec.label)
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    pub fn handle_key(&mut self, key: KeyCode) -> FormInput {
        match key {
            KeyCode::Esc => return FormInput::Cancel,
            KeyCode::Tab => {
                self.next_field();
                return FormInput::Consumed;
            }
            KeyCode::BackTab => {
                self.prev_field();
                return FormInput::Consumed;
            }
            _ => {}
        }

        let Some(field) = self.fields.get_mut(self.focused_index) else {
            return FormInput::Ignored;
        };
        if key == KeyCode::Enter && !field.consumes_enter() {
            return FormInput::Submit;
        }
        if field.handle_key(key) {
            self.error = None;
            FormInput::Consumed
        } else {
            FormInput::Ignored
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut constraints: Vec<Constraint> = self
            .fields
            .iter()
            .map(|f| Constraint::Length(f.render_height()))
            .collect();
        constraints.push(Constraint::Min(0));
        constraints.push(Constraint::Length(1)); // error
        constraints.push(Constraint::Length(1)); // footer

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(constraints)
            .split(inner);

        for (i, (spec, field)) in self.specs.iter().zip(self.fields.iter_mut()).enumerate() {
            let focused = i == self.focused_index;
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(16), Constraint::Min(10)])
                .split(rows[i]);

            let marker = if spec.required { "*" } else { " " };
            let label_style = if focused {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(spec.label, label_style),
                    Span::styled(marker, Style::default().fg(Color::Red)),
                ])),
                cols[0],
            );
            field.render(frame, cols[1], focused);
        }

        let n = self.fields.len();
        if let Some(error) = &self.error {
            frame.render_widget(
                Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
                rows[n + 1],
            );
        }
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Tab", Style::default().fg(Color::Yellow)),
                Span::raw(" next field  "),
                Span::styled("Enter", Style::default().fg(Color::Yellow)),
                Span::raw(" submit  "),
                Span::styled("Esc", Style::default().fg(Color::Yellow)),
                Span::raw(" cancel"),
            ])),
            rows[n + 2],
        );
    }
}
