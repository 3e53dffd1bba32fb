//! # Model Picker Component
//!
//! Overlay for choosing which model the backend answers with. Opened with
//! Ctrl+P; the list comes from the `[[models]]` entries of the config file.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ModelPickerState` lives in `TuiState` while the overlay is open
//! - `ModelPicker` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};

use crate::core::config::ModelEntry;
use crate::tui::components::overlay::{centered_rect, truncate_str};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

/// Persistent state for the model picker overlay.
pub struct ModelPickerState {
    pub models: Vec<ModelEntry>,
    pub selected: usize,
    pub list_state: ListState,
}

impl ModelPickerState {
    /// Opens with the active model highlighted, if it is listed.
    pub fn new(models: Vec<ModelEntry>, current: Option<&str>) -> Self {
        let selected = current
            .and_then(|name| models.iter().position(|m| m.name == name))
            .unwrap_or(0);
        let mut list_state = ListState::default();
        if !models.is_empty() {
            list_state.select(Some(selected));
        }
        Self {
            models,
            selected,
            list_state,
        }
    }

    /// Handle a key event, returning a ModelPickerEvent if the overlay should act.
    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<ModelPickerEvent> {
        match event {
            TuiEvent::Escape => Some(ModelPickerEvent::Dismiss),
            TuiEvent::CursorUp => {
                if !self.models.is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if !self.models.is_empty() {
                    self.selected = (self.selected + 1).min(self.models.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit => self
                .models
                .get(self.selected)
                .map(|model| ModelPickerEvent::Select(model.name.clone())),
            _ => None,
        }
    }
}

/// Events emitted by the model picker.
#[derive(Debug, PartialEq)]
pub enum ModelPickerEvent {
    Select(String),
    Dismiss,
}

/// Transient render wrapper for the model picker overlay.
pub struct ModelPicker<'a> {
    state: &'a mut ModelPickerState,
    current_model: Option<&'a str>,
    palette: &'a Palette,
}

impl<'a> ModelPicker<'a> {
    pub fn new(
        state: &'a mut ModelPickerState,
        current_model: Option<&'a str>,
        palette: &'a Palette,
    ) -> Self {
        Self {
            state,
            current_model,
            palette,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 50, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.palette.muted))
            .style(Style::default().bg(self.palette.background))
            .title(" Models ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Select  Esc Back ").centered())
            .padding(Padding::horizontal(1));

        if self.state.models.is_empty() {
            let empty =
                Paragraph::new("No models configured.\nAdd [[models]] entries to ~/.docchat/config.toml")
                    .style(Style::default().fg(self.palette.muted))
                    .alignment(Alignment::Center)
                    .block(block);
            frame.render_widget(empty, overlay);
            return;
        }

        let inner_width = overlay.width.saturating_sub(4) as usize; // borders + padding
        let items: Vec<ListItem> = self
            .state
            .models
            .iter()
            .enumerate()
            .map(|(i, model)| {
                let is_active = self.current_model == Some(model.name.as_str());
                let is_selected = i == self.state.selected;
                let marker = if is_active { " *" } else { "" };
                let desc = model
                    .description
                    .as_deref()
                    .map(|d| format!("  {d}"))
                    .unwrap_or_default();

                let name_width = inner_width
                    .saturating_sub(marker.len())
                    .saturating_sub(desc.len())
                    .max(8);
                let name = format!(
                    "{:<width$}",
                    truncate_str(&model.name, name_width),
                    width = name_width
                );

                let style = if is_selected {
                    Style::default()
                        .fg(self.palette.foreground)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else if is_active {
                    Style::default().fg(self.palette.accent)
                } else {
                    Style::default().fg(self.palette.foreground)
                };
                let desc_style = if is_selected {
                    style
                } else {
                    Style::default().fg(self.palette.muted)
                };

                let mut spans = vec![Span::styled(name, style)];
                if !desc.is_empty() {
                    spans.push(Span::styled(desc, desc_style));
                }
                if is_active {
                    spans.push(Span::styled(marker, style));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::ThemeMode;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn models() -> Vec<ModelEntry> {
        vec![
            ModelEntry {
                name: "gpt-4-0".into(),
                description: Some("OpenAI".into()),
            },
            ModelEntry {
                name: "mistral".into(),
                description: None,
            },
        ]
    }

    #[test]
    fn opens_on_current_model() {
        let state = ModelPickerState::new(models(), Some("mistral"));
        assert_eq!(state.selected, 1);
        let state = ModelPickerState::new(models(), Some("unknown"));
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn navigation_is_clamped() {
        let mut state = ModelPickerState::new(models(), None);
        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.selected, 0);
        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.selected, 1);
    }

    #[test]
    fn enter_selects_and_escape_dismisses() {
        let mut state = ModelPickerState::new(models(), None);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(ModelPickerEvent::Select("mistral".into()))
        );
        assert_eq!(
            state.handle_event(&TuiEvent::Escape),
            Some(ModelPickerEvent::Dismiss)
        );
    }

    #[test]
    fn empty_list_selects_nothing() {
        let mut state = ModelPickerState::new(vec![], None);
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
    }

    #[test]
    fn renders_models_and_descriptions() {
        let palette = Palette::for_mode(ThemeMode::Dark);
        let mut state = ModelPickerState::new(models(), Some("gpt-4-0"));
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|f| ModelPicker::new(&mut state, Some("gpt-4-0"), &palette).render(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Models"));
        assert!(text.contains("gpt-4-0"));
        assert!(text.contains("OpenAI"));
        assert!(text.contains("mistral"));
    }
}
