//! # TitleBar Component
//!
//! Top status bar: app name, the selected document, the confirmed model,
//! the current status message, and a "↓ New" marker when newer messages
//! are scrolled out of view.
//!
//! ## Design Decisions
//!
//! ### Stateless Component
//!
//! TitleBar is purely presentational. It receives all data as props and has
//! no internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(
//!     app.selected_file_name(),
//!     app.model_name.clone(),
//!     app.status_message.clone(),
//!     tui.message_list.has_unseen_content(),
//!     palette,
//! );
//! title_bar.render(frame, title_area);
//! ```
//!
//! ### Segment Order
//!
//! Segments are joined with `|` and only present ones are shown:
//!
//! `"docchat | lease.pdf | model: mistral | Document ready | ↓ New"`
//!
//! The status goes last-but-one so that on narrow terminals the document
//! name stays visible.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;
use crate::tui::theme::Palette;

pub struct TitleBar {
    pub file_name: Option<String>,
    pub model_name: Option<String>,
    pub status_message: String,
    pub has_unseen_content: bool,
    pub palette: Palette,
}

impl TitleBar {
    pub fn new(
        file_name: Option<String>,
        model_name: Option<String>,
        status_message: String,
        has_unseen_content: bool,
        palette: Palette,
    ) -> Self {
        Self {
            file_name,
            model_name,
            status_message,
            has_unseen_content,
            palette,
        }
    }

    fn segments(&self) -> Vec<Span<'static>> {
        let sep = || Span::styled(" | ", Style::default().fg(self.palette.muted));
        let mut spans = vec![Span::styled(
            "docchat",
            Style::default()
                .fg(self.palette.accent)
                .add_modifier(Modifier::BOLD),
        )];

        let file = self.file_name.as_deref().unwrap_or("no document");
        spans.push(sep());
        spans.push(Span::styled(
            file.to_string(),
            Style::default().fg(self.palette.foreground),
        ));

        if let Some(model) = &self.model_name {
            spans.push(sep());
            spans.push(Span::styled(
                format!("model: {model}"),
                Style::default().fg(self.palette.foreground),
            ));
        }

        if !self.status_message.is_empty() {
            spans.push(sep());
            spans.push(Span::styled(
                self.status_message.clone(),
                Style::default().fg(self.palette.muted),
            ));
        }

        if self.has_unseen_content {
            spans.push(sep());
            spans.push(Span::styled(
                "↓ New",
                Style::default()
                    .fg(self.palette.label)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        spans
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Line::from(self.segments()), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::ThemeMode;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(title_bar: &mut TitleBar) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 1)).unwrap();
        terminal.draw(|f| title_bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn palette() -> Palette {
        Palette::for_mode(ThemeMode::Dark)
    }

    #[test]
    fn shows_everything_present() {
        let mut title_bar = TitleBar::new(
            Some("lease.pdf".into()),
            Some("mistral".into()),
            "Document ready".into(),
            true,
            palette(),
        );
        let text = render(&mut title_bar);
        assert!(text.contains("docchat"));
        assert!(text.contains("lease.pdf"));
        assert!(text.contains("model: mistral"));
        assert!(text.contains("Document ready"));
        assert!(text.contains("↓ New"));
    }

    #[test]
    fn placeholder_without_document() {
        let mut title_bar = TitleBar::new(None, None, String::new(), false, palette());
        let text = render(&mut title_bar);
        assert!(text.contains("no document"));
        assert!(!text.contains("model:"));
        assert!(!text.contains("↓ New"));
    }
}
