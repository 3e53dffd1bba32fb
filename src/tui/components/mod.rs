//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters:
//! - `TitleBar`: document name, model, status
//! - `Message`: one transcript entry with its sender badge
//! - `NoticeView`: modal notification
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep local state and emit events:
//! - `InputBox`: the composer
//! - `MessageList`: scrollable transcript with layout caching
//! - `FilePicker`, `ModelPicker`: overlays, opened on demand
//!
//! ### Props-Based Data Flow
//!
//! Components receive external data as props, never by reaching into `App`.
//!
//! ```rust,ignore
//! // Good: Dependencies are explicit
//! TitleBar::new(app.selected_file_name(), app.model_name.clone(), ...).render(frame, area);
//!
//! // Bad: Hidden dependency on global state
//! title_bar.render(frame, area); // reads from global App
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (top status bar)
//! ├── message.rs       (single message renderer)
//! ├── message_list.rs  (scrollable transcript)
//! ├── input_box/       (composer)
//! ├── file_picker.rs   (PDF chooser overlay)
//! ├── model_picker.rs  (model chooser overlay)
//! ├── notice.rs        (modal notice)
//! └── overlay.rs       (layout helpers)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod file_picker;
pub mod input_box;
pub mod message;
pub mod message_list;
pub mod model_picker;
pub mod notice;
pub mod overlay;

pub use file_picker::{FilePicker, FilePickerEvent, FilePickerState};
pub use input_box::{InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use model_picker::{ModelPicker, ModelPickerEvent, ModelPickerState};
pub use notice::NoticeView;
