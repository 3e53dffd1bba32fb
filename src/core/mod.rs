//! # Core Application Logic
//!
//! The chat session itself: transcript, state, the reducer and the effect
//! executor. It knows nothing about the terminal.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!                                ▼
//!                    ┌─────────────────────────┐
//!                    │  effects::execute()     │──► DocumentBackend
//!                    │                         │──► SpeechRecognizer
//!                    └───────────┬─────────────┘
//!                                │ Action
//!                                ▼
//!                          back to update()
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all session state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`effects`]: Runs effects against the backend and recognizer
//! - [`transcript`]: Chat messages and the append-only transcript
//! - [`config`]: Layered configuration

pub mod action;
pub mod config;
pub mod effects;
pub mod state;
pub mod transcript;
