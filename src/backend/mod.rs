//! # Document Backend
//!
//! The remote service that ingests PDFs and answers questions about them.
//! This crate only talks to it; the backend itself lives elsewhere.
//!
//! - [`client`]: the `DocumentBackend` trait and `BackendError`
//! - [`http`]: `HttpBackend`, the reqwest implementation
//! - [`types`]: wire formats of the three endpoints

pub mod client;
pub mod http;
pub mod types;

pub use client::{BackendError, DocumentBackend};
pub use http::HttpBackend;
pub use types::BotReply;
