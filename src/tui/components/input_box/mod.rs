//! # InputBox Component
//!
//! The composer: a multi-line text field with a voice trigger.
//!
//! ## Responsibilities
//!
//! - Capture and edit text (cursor movement, backspace/delete, paste)
//! - Submit on Enter, insert a newline on Ctrl+J
//! - Request voice capture on Ctrl+V
//! - Show a listening indicator while voice capture is active
//!
//! ## State Management
//!
//! The buffer is the composer's own copy of the session draft. Every edit
//! emits `ContentChanged` so the parent can forward it to core; when core
//! replaces the draft (a voice transcript, a sent message) the parent pushes
//! it back with [`InputBox::set_text`]. Submitting does not clear the
//! buffer: core clears the draft once the message is actually sent.

mod text_wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

use text_wrap::{
    CONTENT_OFFSET_X, MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, cursor_row_col, inner_width,
    line_bounds, next_char_boundary, offset_at_char, prev_char_boundary, wrap_rows,
};

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter pressed; the parent submits the current draft.
    Submit,
    /// Ctrl+V pressed.
    StartListening,
    /// Buffer text changed.
    ContentChanged,
}

/// Multi-line composer.
///
/// # Props
///
/// Set by the parent each frame from session state: `palette`,
/// `is_listening`, `voice_supported`.
pub struct InputBox {
    pub buffer: String,
    pub palette: Palette,
    pub is_listening: bool,
    pub voice_supported: bool,
    /// Cursor as a byte offset into `buffer`
    cursor: usize,
    /// First visible row when the content is taller than the box
    scroll_offset: u16,
}

impl InputBox {
    pub fn new(palette: Palette) -> Self {
        Self {
            buffer: String::new(),
            palette,
            is_listening: false,
            voice_supported: true,
            cursor: 0,
            scroll_offset: 0,
        }
    }

    /// Replace the buffer, leaving the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.cursor = self.buffer.len();
        self.scroll_offset = 0;
    }

    /// Box height for the current buffer at `width`, borders included.
    pub fn calculate_height(&self, width: u16) -> u16 {
        let rows = wrap_rows(&self.buffer, inner_width(width)).len() as u16;
        rows.clamp(1, MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    fn keep_cursor_visible(&mut self, width: u16) {
        let (row, _) = cursor_row_col(&self.buffer, self.cursor, width);
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = row + 1 - MAX_VISIBLE_LINES;
        }
    }

    /// Move to the same column on the previous or next logical line.
    fn move_vertically(&mut self, up: bool) -> bool {
        let (start, end) = line_bounds(&self.buffer, self.cursor);
        let column = self.buffer[start..self.cursor].chars().count();
        let target = if up {
            if start == 0 {
                return false;
            }
            line_bounds(&self.buffer, start - 1)
        } else {
            if end == self.buffer.len() {
                return false;
            }
            line_bounds(&self.buffer, end + 1)
        };
        let line = &self.buffer[target.0..target.1];
        self.cursor = target.0 + offset_at_char(line, column);
        true
    }

    fn title(&self) -> Line<'static> {
        if self.is_listening {
            return Line::from(vec![
                Span::styled(" ● ", Style::default().fg(self.palette.error)),
                Span::styled(
                    "Listening... ",
                    Style::default()
                        .fg(self.palette.error)
                        .add_modifier(Modifier::BOLD),
                ),
            ]);
        }
        let mut spans = vec![Span::raw(" Message ")];
        if self.voice_supported {
            spans.push(Span::styled(
                "(Ctrl+V to speak) ",
                Style::default().fg(self.palette.muted),
            ));
        }
        Line::from(spans)
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = inner_width(area.width);
        self.keep_cursor_visible(width);

        let rows = wrap_rows(&self.buffer, width);
        let start = (self.scroll_offset as usize).min(rows.len());
        let end = (start + MAX_VISIBLE_LINES as usize).min(rows.len());
        let visible: Vec<Line> = rows[start..end]
            .iter()
            .map(|row| Line::from(row.clone()))
            .collect();

        let border_color = if self.is_listening {
            self.palette.error
        } else {
            self.palette.user
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .title(self.title())
            .padding(Padding::horizontal(1));

        let input = Paragraph::new(visible)
            .block(block)
            .style(Style::default().fg(self.palette.foreground));
        frame.render_widget(input, area);

        let (row, col) = cursor_row_col(&self.buffer, self.cursor, width);
        let x = area.x + CONTENT_OFFSET_X + col.min(width.saturating_sub(1));
        let y = area.y + 1 + row.saturating_sub(self.scroll_offset);
        frame.set_cursor_position((x, y));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Terminals send CR line endings in pastes
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                self.buffer.insert_str(self.cursor, &text);
                self.cursor += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                InputEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorRight => {
                if self.cursor < self.buffer.len() {
                    self.cursor = next_char_boundary(&self.buffer, self.cursor);
                }
                None
            }
            TuiEvent::Home => {
                self.cursor = line_bounds(&self.buffer, self.cursor).0;
                None
            }
            TuiEvent::End => {
                self.cursor = line_bounds(&self.buffer, self.cursor).1;
                None
            }
            TuiEvent::CursorUp => {
                self.move_vertically(true);
                None
            }
            TuiEvent::CursorDown => {
                self.move_vertically(false);
                None
            }
            TuiEvent::Submit => Some(InputEvent::Submit),
            TuiEvent::StartVoice => Some(InputEvent::StartListening),
            _ => None,
        }
    }
}
