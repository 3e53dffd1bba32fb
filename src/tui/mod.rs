//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Routing
//!
//! Each terminal event goes to the first taker, in this order:
//!
//! 1. An open notice (modal; Enter/Esc dismiss it, everything else is ignored)
//! 2. An open overlay (file picker, then model picker)
//! 3. Transcript scrolling
//! 4. Global shortcuts (open picker, upload, theme)
//! 5. The composer
//!
//! ## Redraw Strategy
//!
//! While the bot is responding or a voice capture is running the loop redraws
//! every ~80ms to animate the typing indicator. Otherwise it sleeps up to
//! 500ms and only redraws on events.

mod component;
mod components;
mod event;
pub mod markdown;
pub mod theme;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::path::PathBuf;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::backend::DocumentBackend;
use crate::core::action::{Action, Effect, update};
use crate::core::config::{ModelEntry, ResolvedConfig};
use crate::core::effects;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::notice;
use crate::tui::components::{
    FilePickerEvent, FilePickerState, InputBox, InputEvent, MessageListState, ModelPickerEvent,
    ModelPickerState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::theme::Palette;
use crate::voice::SpeechRecognizer;

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    // Overlays (None = hidden)
    pub file_picker: Option<FilePickerState>,
    pub model_picker: Option<ModelPickerState>,
    /// Choices offered by the model picker
    pub models: Vec<ModelEntry>,
    /// Where the file picker opens when no file is selected yet
    pub pick_dir: PathBuf,
}

impl TuiState {
    pub fn new(models: Vec<ModelEntry>, pick_dir: PathBuf) -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(Palette::for_mode(Default::default())),
            file_picker: None,
            model_picker: None,
            models,
            pick_dir,
        }
    }

    /// The file picker starts next to the selected file, if any.
    fn picker_start_dir(&self, app: &App) -> PathBuf {
        app.selected_file
            .as_deref()
            .and_then(|path| path.parent())
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| dir.to_path_buf())
            .unwrap_or_else(|| self.pick_dir.clone())
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets Shift+Enter through; other terminals ignore it
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

/// Runs effects on the tokio runtime and reports completions over a channel.
struct EffectRunner {
    backend: Arc<dyn DocumentBackend>,
    recognizer: Option<Arc<dyn SpeechRecognizer>>,
    tx: mpsc::Sender<Action>,
}

impl EffectRunner {
    fn spawn(&self, effect: Effect) {
        info!("Spawning effect: {:?}", effect);
        let backend = self.backend.clone();
        let recognizer = self.recognizer.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let completion =
                effects::execute(effect, backend.as_ref(), recognizer.as_deref()).await;
            if let Some(action) = completion {
                if tx.send(action).is_err() {
                    warn!("Failed to deliver effect result: receiver dropped");
                }
            }
        });
    }
}

/// Apply an action and start whatever it asks for. Returns true on quit.
fn dispatch(app: &mut App, action: Action, runner: &EffectRunner) -> bool {
    match update(app, action) {
        Effect::Quit => true,
        Effect::None => false,
        effect => {
            runner.spawn(effect);
            false
        }
    }
}

/// Route one terminal event. Returns the action it produces, if any.
fn route_event(app: &App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }

    if app.notice().is_some() {
        return notice::dismisses(&event).then_some(Action::DismissNotice);
    }

    if let Some(picker) = tui.file_picker.as_mut() {
        return match picker.handle_event(&event)? {
            FilePickerEvent::Select(path) => {
                tui.file_picker = None;
                Some(Action::SelectFile(path))
            }
            FilePickerEvent::Dismiss => {
                tui.file_picker = None;
                None
            }
        };
    }

    if let Some(picker) = tui.model_picker.as_mut() {
        return match picker.handle_event(&event)? {
            ModelPickerEvent::Select(name) => {
                tui.model_picker = None;
                Some(Action::SelectModel(name))
            }
            ModelPickerEvent::Dismiss => {
                tui.model_picker = None;
                None
            }
        };
    }

    match event {
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.message_list.handle_event(&event);
            None
        }
        TuiEvent::OpenFilePicker => {
            tui.file_picker = Some(FilePickerState::open(&tui.picker_start_dir(app)));
            None
        }
        TuiEvent::OpenModelPicker => {
            tui.model_picker = Some(ModelPickerState::new(
                tui.models.clone(),
                app.model_name.as_deref(),
            ));
            None
        }
        TuiEvent::Upload => Some(Action::UploadDocument),
        TuiEvent::ToggleTheme => Some(Action::ToggleTheme),
        TuiEvent::Escape | TuiEvent::Resize => None,
        _ => match tui.input_box.handle_event(&event)? {
            InputEvent::Submit => Some(Action::SubmitMessage(None)),
            InputEvent::StartListening => Some(Action::StartListening),
            InputEvent::ContentChanged => Some(Action::EditDraft(tui.input_box.buffer.clone())),
        },
    }
}

pub fn run(
    config: ResolvedConfig,
    backend: Arc<dyn DocumentBackend>,
    recognizer: Option<Arc<dyn SpeechRecognizer>>,
) -> std::io::Result<()> {
    let mut app = App::from_config(&config, recognizer.is_some());
    let mut tui = TuiState::new(config.models.clone(), config.pick_dir.clone());

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let runner = EffectRunner {
        backend,
        recognizer,
        tx,
    };

    // Tell the backend which model to use before the first question
    if let Some(model) = config.model_name.clone() {
        dispatch(&mut app, Action::SelectModel(model), &runner);
    }

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame
    let mut should_quit = false;

    while !should_quit {
        // Core may have replaced the draft (voice transcript, sent message)
        if tui.input_box.buffer != app.draft {
            tui.input_box.set_text(&app.draft);
        }

        let animating = app.is_bot_responding || app.is_listening;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 4.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain all pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = route_event(&app, &mut tui, event) {
                should_quit |= dispatch(&mut app, action, &runner);
            }
            if should_quit {
                break;
            }
        }

        // Completions from background effects
        for action in rx.try_iter() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            should_quit |= dispatch(&mut app, action, &runner);
        }
    }

    info!("docchat shutting down");
    ratatui::restore();
    Ok(())
}
