//! # File Picker Component
//!
//! Overlay for choosing the PDF to upload. Opened with Ctrl+O.
//!
//! Lists the subdirectories and `.pdf` files of one directory. Typing
//! filters the list; Enter descends into a directory or picks a file;
//! Backspace on an empty filter goes up one level. Picking a file only
//! selects it; the upload is a separate step.
//!
//! Same persistent state + transient wrapper split as the model picker.

use std::path::{Path, PathBuf};

use log::warn;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};

use crate::tui::components::overlay::{centered_rect, truncate_str};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Subdirectories first, then PDFs, each sorted case-insensitively.
/// Hidden entries are skipped.
pub fn list_dir(dir: &Path) -> std::io::Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for item in std::fs::read_dir(dir)? {
        let item = item?;
        let name = item.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let path = item.path();
        let is_dir = path.is_dir();
        if is_dir || is_pdf(&path) {
            entries.push(Entry { name, path, is_dir });
        }
    }
    entries.sort_by(|a, b| {
        b.is_dir
            .cmp(&a.is_dir)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    Ok(entries)
}

/// Persistent state for the file picker overlay.
pub struct FilePickerState {
    pub dir: PathBuf,
    pub entries: Vec<Entry>,
    pub filter: String,
    pub selected: usize,
    pub list_state: ListState,
    /// Why the directory could not be listed.
    pub error: Option<String>,
}

impl FilePickerState {
    pub fn open(dir: &Path) -> Self {
        let dir = std::fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
        let mut state = Self {
            dir: dir.clone(),
            entries: Vec::new(),
            filter: String::new(),
            selected: 0,
            list_state: ListState::default(),
            error: None,
        };
        state.load(dir);
        state
    }

    fn load(&mut self, dir: PathBuf) {
        match list_dir(&dir) {
            Ok(entries) => {
                self.entries = entries;
                self.error = None;
            }
            Err(e) => {
                warn!("Failed to list {}: {}", dir.display(), e);
                self.entries.clear();
                self.error = Some(e.to_string());
            }
        }
        self.dir = dir;
        self.filter.clear();
        self.select(0);
    }

    fn select(&mut self, index: usize) {
        self.selected = index;
        let visible = self.visible().len();
        self.list_state
            .select((visible > 0).then(|| index.min(visible - 1)));
    }

    /// Entries matching the filter, in display order.
    pub fn visible(&self) -> Vec<&Entry> {
        let needle = self.filter.to_lowercase();
        self.entries
            .iter()
            .filter(|e| needle.is_empty() || e.name.to_lowercase().contains(&needle))
            .collect()
    }

    fn go_up(&mut self) {
        if let Some(parent) = self.dir.parent().map(Path::to_path_buf) {
            self.load(parent);
        }
    }

    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<FilePickerEvent> {
        match event {
            TuiEvent::Escape => return Some(FilePickerEvent::Dismiss),
            TuiEvent::CursorUp => self.select(self.selected.saturating_sub(1)),
            TuiEvent::CursorDown => {
                let last = self.visible().len().saturating_sub(1);
                self.select((self.selected + 1).min(last));
            }
            TuiEvent::InputChar(c) if *c != '\n' => {
                self.filter.push(*c);
                self.select(0);
            }
            TuiEvent::Backspace => {
                if self.filter.pop().is_some() {
                    self.select(0);
                } else {
                    self.go_up();
                }
            }
            TuiEvent::Submit => {
                let entry = self.visible().get(self.selected).map(|e| (*e).clone())?;
                if entry.is_dir {
                    self.load(entry.path);
                } else {
                    return Some(FilePickerEvent::Select(entry.path));
                }
            }
            _ => {}
        }
        None
    }
}

/// Events emitted by the file picker.
#[derive(Debug, PartialEq)]
pub enum FilePickerEvent {
    Select(PathBuf),
    Dismiss,
}

/// Transient render wrapper for the file picker overlay.
pub struct FilePicker<'a> {
    state: &'a mut FilePickerState,
    palette: &'a Palette,
}

impl<'a> FilePicker<'a> {
    pub fn new(state: &'a mut FilePickerState, palette: &'a Palette) -> Self {
        Self { state, palette }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 70, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.palette.muted))
            .style(Style::default().bg(self.palette.background))
            .title(" Select a PDF ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Open  Backspace Up  Esc Back ").centered())
            .padding(Padding::horizontal(1));
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let [header_area, list_area] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).areas(inner);
        let width = inner.width as usize;

        let dir = self.state.dir.display().to_string();
        let filter = if self.state.filter.is_empty() {
            Span::styled("type to filter", Style::default().fg(self.palette.muted))
        } else {
            Span::styled(
                self.state.filter.clone(),
                Style::default().fg(self.palette.accent),
            )
        };
        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                truncate_str(&dir, width),
                Style::default()
                    .fg(self.palette.foreground)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![Span::raw("/ "), filter]),
        ]);
        frame.render_widget(header, header_area);

        if let Some(error) = &self.state.error {
            let message = Paragraph::new(format!("Cannot read directory: {error}"))
                .style(Style::default().fg(self.palette.error));
            frame.render_widget(message, list_area);
            return;
        }

        let visible = self.state.visible();
        if visible.is_empty() {
            let message = Paragraph::new("No PDF files here")
                .style(Style::default().fg(self.palette.muted))
                .alignment(Alignment::Center);
            frame.render_widget(message, list_area);
            return;
        }

        let items: Vec<ListItem> = visible
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let label = if entry.is_dir {
                    format!("{}/", entry.name)
                } else {
                    entry.name.clone()
                };
                let style = if i == self.state.selected {
                    Style::default()
                        .fg(self.palette.foreground)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else if entry.is_dir {
                    Style::default().fg(self.palette.accent)
                } else {
                    Style::default().fg(self.palette.foreground)
                };
                ListItem::new(Span::styled(truncate_str(&label, width), style))
            })
            .collect();

        frame.render_stateful_widget(List::new(items), list_area, &mut self.state.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::ThemeMode;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::fs;

    /// Fresh scratch directory: `contracts/`, `lease.pdf`, `Appendix.PDF`, `notes.txt`, `.hidden.pdf`.
    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("docchat-picker-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("contracts")).unwrap();
        fs::write(dir.join("contracts").join("nda.pdf"), b"%PDF-1.4").unwrap();
        fs::write(dir.join("lease.pdf"), b"%PDF-1.4").unwrap();
        fs::write(dir.join("Appendix.PDF"), b"%PDF-1.4").unwrap();
        fs::write(dir.join("notes.txt"), b"hello").unwrap();
        fs::write(dir.join(".hidden.pdf"), b"%PDF-1.4").unwrap();
        dir
    }

    fn names(state: &FilePickerState) -> Vec<String> {
        state.visible().iter().map(|e| e.name.clone()).collect()
    }

    #[test]
    fn lists_dirs_then_pdfs_only() {
        let dir = scratch("list");
        let state = FilePickerState::open(&dir);
        assert_eq!(names(&state), vec!["contracts", "Appendix.PDF", "lease.pdf"]);
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn typing_filters_entries() {
        let dir = scratch("filter");
        let mut state = FilePickerState::open(&dir);
        state.handle_event(&TuiEvent::InputChar('L'));
        state.handle_event(&TuiEvent::InputChar('e'));
        assert_eq!(names(&state), vec!["lease.pdf"]);

        state.handle_event(&TuiEvent::Backspace);
        state.handle_event(&TuiEvent::Backspace);
        assert_eq!(state.visible().len(), 3);
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn enter_on_file_selects_it() {
        let dir = scratch("select");
        let mut state = FilePickerState::open(&dir);
        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::CursorDown);
        match state.handle_event(&TuiEvent::Submit) {
            Some(FilePickerEvent::Select(path)) => {
                assert_eq!(path.file_name().unwrap(), "lease.pdf");
            }
            other => panic!("unexpected event: {other:?}"),
        }
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn enter_on_dir_descends_and_backspace_returns() {
        let dir = scratch("descend");
        let mut state = FilePickerState::open(&dir);
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
        assert_eq!(names(&state), vec!["nda.pdf"]);

        state.handle_event(&TuiEvent::Backspace);
        assert_eq!(state.visible().len(), 3);
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn missing_dir_reports_error() {
        let state = FilePickerState::open(Path::new("/definitely/not/a/dir"));
        assert!(state.error.is_some());
        assert!(state.visible().is_empty());
    }

    #[test]
    fn escape_dismisses() {
        let dir = scratch("escape");
        let mut state = FilePickerState::open(&dir);
        assert_eq!(
            state.handle_event(&TuiEvent::Escape),
            Some(FilePickerEvent::Dismiss)
        );
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn renders_entries() {
        let dir = scratch("render");
        let palette = Palette::for_mode(ThemeMode::Dark);
        let mut state = FilePickerState::open(&dir);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|f| FilePicker::new(&mut state, &palette).render(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Select a PDF"));
        assert!(text.contains("contracts/"));
        assert!(text.contains("lease.pdf"));
        assert!(!text.contains("notes.txt"));
        fs::remove_dir_all(dir).ok();
    }
}
