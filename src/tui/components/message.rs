use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::transcript::{ChatMessage, Section, Sender};
use crate::tui::component::Component;
use crate::tui::markdown;
use crate::tui::theme::Palette;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders one transcript entry.
///
/// The border title is the sender badge ("You" or "Bot"). User text is shown
/// as typed. Bot text is Markdown; a structured answer shows its reference,
/// extraction and summary as labelled sections, skipping the empty ones.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub message: &'a ChatMessage,
    pub palette: &'a Palette,
}

impl<'a> Message<'a> {
    pub fn new(message: &'a ChatMessage, palette: &'a Palette) -> Self {
        Self { message, palette }
    }

    /// Rendered height at `width`, borders included.
    pub fn calculate_height(message: &ChatMessage, palette: &Palette, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding
            return 1;
        }
        let lines = body_paragraph(message, palette).line_count(content_width);
        (lines as u16).max(1) + VERTICAL_OVERHEAD
    }
}

fn sender_style(sender: Sender, palette: &Palette) -> Style {
    match sender {
        Sender::User => Style::default().fg(palette.user),
        Sender::Bot => Style::default().fg(palette.bot),
    }
}

fn body_paragraph(message: &ChatMessage, palette: &Palette) -> Paragraph<'static> {
    Paragraph::new(body(message, palette)).wrap(Wrap { trim: false })
}

/// Build the message body as styled text.
fn body(message: &ChatMessage, palette: &Palette) -> Text<'static> {
    let sections = message.sections();
    if sections.is_empty() {
        return Text::from(Span::styled(
            "(empty response)",
            Style::default()
                .fg(palette.muted)
                .add_modifier(Modifier::ITALIC),
        ));
    }

    if message.sender == Sender::User {
        let text = message.text.as_deref().unwrap_or_default();
        return Text::styled(text.to_string(), Style::default().fg(palette.foreground));
    }

    let label_style = Style::default()
        .fg(palette.label)
        .add_modifier(Modifier::BOLD);

    let mut out = Text::default();
    for (i, section) in sections.into_iter().enumerate() {
        if i > 0 {
            out.lines.push(Line::default());
        }
        let (label, content) = match section {
            Section::Text(content) => (None, content),
            Section::Reference(content) => (Some("Reference:"), content),
            Section::Extraction(content) => (Some("Extraction:"), content),
            Section::Summary(content) => (Some("Summary:"), content),
        };
        if let Some(label) = label {
            out.lines.push(Line::from(Span::styled(label, label_style)));
        }
        out.lines
            .extend(markdown::render(content, palette).lines);
    }
    out
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = sender_style(self.message.sender, self.palette);

        let block = Block::bordered()
            .title(self.message.sender.label())
            .border_type(BorderType::Rounded)
            .border_style(style.add_modifier(Modifier::DIM))
            .title_style(style.add_modifier(Modifier::BOLD))
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);
        body_paragraph(self.message, self.palette).render(inner_area, buf);
    }
}

impl<'a> Component for Message<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BotReply;
    use crate::core::state::ThemeMode;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn palette() -> Palette {
        Palette::for_mode(ThemeMode::Dark)
    }

    fn render_to_string(message: &ChatMessage, width: u16) -> String {
        let palette = palette();
        let height = Message::calculate_height(message, &palette, width);
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                Component::render(&mut Message::new(message, &palette), f, area);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    // ==========================================================================
    // calculate_height
    // ==========================================================================

    #[test]
    fn single_line_message_is_three_rows() {
        let message = ChatMessage::user("Hello");
        assert_eq!(
            Message::calculate_height(&message, &palette(), 80),
            1 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn narrow_width_wraps() {
        let message = ChatMessage::user("Hello world");
        // content width 5: "Hello" | "world"
        assert_eq!(
            Message::calculate_height(&message, &palette(), 9),
            2 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn degenerate_width_returns_minimum() {
        let message = ChatMessage::user("Hello");
        assert_eq!(
            Message::calculate_height(&message, &palette(), HORIZONTAL_OVERHEAD),
            1
        );
    }

    #[test]
    fn structured_reply_counts_labels_and_gaps() {
        let message = ChatMessage::bot_reply(BotReply {
            reference: Some("Page 3".into()),
            extraction: None,
            summary: Some("Short.".into()),
        });
        // "Reference:" / "Page 3" / gap / "Summary:" / "Short."
        assert_eq!(
            Message::calculate_height(&message, &palette(), 80),
            5 + VERTICAL_OVERHEAD
        );
    }

    // ==========================================================================
    // Rendering
    // ==========================================================================

    #[test]
    fn user_message_has_you_badge() {
        let text = render_to_string(&ChatMessage::user("What is the rent?"), 40);
        assert!(text.contains("You"));
        assert!(text.contains("What is the rent?"));
    }

    #[test]
    fn bot_reply_shows_present_sections_in_order() {
        let message = ChatMessage::bot_reply(BotReply {
            reference: Some("Section 2".into()),
            extraction: Some("Rent is due monthly.".into()),
            summary: Some("Monthly rent.".into()),
        });
        let text = render_to_string(&message, 50);

        assert!(text.contains("Bot"));
        let reference = text.find("Reference:").unwrap();
        let extraction = text.find("Extraction:").unwrap();
        let summary = text.find("Summary:").unwrap();
        assert!(reference < extraction && extraction < summary);
        assert!(text.contains("Rent is due monthly."));
    }

    #[test]
    fn missing_sections_are_not_rendered() {
        let message = ChatMessage::bot_reply(BotReply {
            summary: Some("Only a summary.".into()),
            ..Default::default()
        });
        let text = render_to_string(&message, 50);
        assert!(text.contains("Summary:"));
        assert!(!text.contains("Reference:"));
        assert!(!text.contains("Extraction:"));
    }

    #[test]
    fn bot_text_renders_markdown() {
        let text = render_to_string(&ChatMessage::bot_text("Thank you for **the PDF**."), 50);
        assert!(text.contains("Thank you for the PDF."));
        assert!(!text.contains("**"));
    }

    #[test]
    fn empty_reply_shows_placeholder() {
        let text = render_to_string(&ChatMessage::bot_reply(BotReply::default()), 40);
        assert!(text.contains("(empty response)"));
    }
}
