//! # Notice Component
//!
//! Modal box for a [`Notice`]. While one is shown it takes all input;
//! Enter or Esc dismisses it.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph, Wrap};

use crate::core::state::{Notice, NoticeKind};
use crate::tui::component::Component;
use crate::tui::components::overlay::centered_fixed;
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

const WIDTH: u16 = 60;

/// True if `event` should close the notice.
pub fn dismisses(event: &TuiEvent) -> bool {
    matches!(event, TuiEvent::Escape | TuiEvent::Submit)
}

pub struct NoticeView<'a> {
    pub notice: &'a Notice,
    pub palette: &'a Palette,
}

impl<'a> NoticeView<'a> {
    pub fn new(notice: &'a Notice, palette: &'a Palette) -> Self {
        Self { notice, palette }
    }

    fn title(&self) -> &'static str {
        match self.notice.kind {
            NoticeKind::Validation => " Notice ",
            NoticeKind::Failure => " Error ",
            NoticeKind::Unsupported => " Unsupported ",
        }
    }

    fn color(&self) -> ratatui::style::Color {
        match self.notice.kind {
            NoticeKind::Validation => self.palette.label,
            NoticeKind::Failure => self.palette.error,
            NoticeKind::Unsupported => self.palette.muted,
        }
    }

    fn body(&self) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(Span::styled(
            self.notice.text.clone(),
            Style::default()
                .fg(self.palette.foreground)
                .add_modifier(Modifier::BOLD),
        ))];
        if let Some(detail) = &self.notice.detail {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                detail.clone(),
                Style::default().fg(self.palette.muted),
            )));
        }
        lines
    }
}

impl<'a> Component for NoticeView<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.color()))
            .style(Style::default().bg(self.palette.background))
            .title(self.title())
            .title_bottom(Line::from(" Enter/Esc OK ").centered())
            .padding(Padding::new(2, 2, 1, 1));

        let paragraph = Paragraph::new(self.body())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        // Borders (2) + vertical padding (2)
        let text_width = WIDTH.min(area.width).saturating_sub(6);
        let height = (paragraph.line_count(text_width) as u16).max(1) + 4;

        let rect = centered_fixed(WIDTH, height, area);
        frame.render_widget(Clear, rect);
        frame.render_widget(paragraph.block(block), rect);
    }
}
