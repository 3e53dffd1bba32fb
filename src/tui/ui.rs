use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Block;

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    FilePicker, MessageList, ModelPicker, NoticeView, TitleBar,
};
use crate::tui::theme::Palette;

/// Key hints shown in the bottom row.
fn help_line(app: &App, palette: &Palette) -> Line<'static> {
    let mut hints = vec![
        ("Enter", "send"),
        ("Ctrl+J", "newline"),
        ("Ctrl+O", "open PDF"),
        ("Ctrl+U", "upload"),
    ];
    if app.voice_supported {
        hints.push(("Ctrl+V", "speak"));
    }
    hints.extend([("Ctrl+P", "model"), ("Ctrl+T", "theme"), ("Ctrl+C", "quit")]);

    let mut spans = Vec::new();
    for (key, label) in hints {
        spans.push(Span::styled(
            format!(" {key} "),
            Style::default().fg(palette.accent),
        ));
        spans.push(Span::styled(
            format!("{label} "),
            Style::default().fg(palette.muted),
        ));
    }
    Line::from(spans)
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    let palette = Palette::for_mode(app.theme);
    let area = frame.area();

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.foreground)),
        area,
    );

    let input_height = tui.input_box.calculate_height(area.width);
    let [title_area, main_area, input_area, help_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(input_height),
        Constraint::Length(1),
    ])
    .areas(area);

    MessageList::new(
        &mut tui.message_list,
        &app.transcript,
        &palette,
        app.is_bot_responding,
        spinner_frame,
    )
    .render(frame, main_area);

    TitleBar::new(
        app.selected_file_name(),
        app.model_name.clone(),
        app.status_message.clone(),
        tui.message_list.has_unseen_content(),
        palette,
    )
    .render(frame, title_area);

    tui.input_box.palette = palette;
    tui.input_box.is_listening = app.is_listening;
    tui.input_box.voice_supported = app.voice_supported;
    tui.input_box.render(frame, input_area);

    frame.render_widget(help_line(app, &palette), help_area);

    // Overlays, lowest first
    if let Some(picker) = tui.file_picker.as_mut() {
        FilePicker::new(picker, &palette).render(frame, area);
    }
    if let Some(picker) = tui.model_picker.as_mut() {
        ModelPicker::new(picker, app.model_name.as_deref(), &palette).render(frame, area);
    }
    if let Some(notice) = app.notice() {
        NoticeView::new(notice, &palette).render(frame, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::core::state::Notice;
    use crate::core::transcript::ChatMessage;
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App, tui: &mut TuiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui, 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn tui_state() -> TuiState {
        TuiState::new(Vec::new(), std::env::temp_dir())
    }

    #[test]
    fn draws_title_transcript_and_help() {
        let mut app = test_app();
        app.transcript.push(ChatMessage::user("What is the rent?"));
        app.transcript.push(ChatMessage::bot_text("It is due monthly."));
        let text = draw(&app, &mut tui_state());

        assert!(text.contains("docchat"));
        assert!(text.contains("What is the rent?"));
        assert!(text.contains("It is due monthly."));
        assert!(text.contains("Ctrl+O"));
    }

    #[test]
    fn notice_is_drawn_on_top() {
        let mut app = test_app();
        app.raise(Notice::validation("Please enter a message"));
        let text = draw(&app, &mut tui_state());
        assert!(text.contains("Please enter a message"));
    }

    #[test]
    fn typing_indicator_while_responding() {
        let mut app = test_app();
        update(&mut app, Action::EditDraft("hello".into()));
        update(&mut app, Action::SubmitMessage(None));
        let text = draw(&app, &mut tui_state());
        assert!(text.contains("is typing"));
    }

    #[test]
    fn voice_hint_follows_support() {
        let mut app = test_app();
        assert!(draw(&app, &mut tui_state()).contains("speak"));
        app.voice_supported = false;
        assert!(!draw(&app, &mut tui_state()).contains("speak"));
    }
}
