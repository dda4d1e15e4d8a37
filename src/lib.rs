//! # PDF Q&A TUI
//!
//! A terminal client for a PDF question-answering server.
//!
//! ## Features
//! - Model picker filled from `/api/models`
//! - PDF upload to `/api/upload` (multipart field `file`)
//! - Questions with model and temperature to `/api/ask`
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (view state + controller commands)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod messages;
pub mod models;
pub mod network;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use config::Settings;
pub use error::ApiError;
pub use messages::{NetworkCommand, NetworkResponse, Operation, RenderState, UiEvent};
pub use models::{AnswerResult, AskPayload, ModelDescriptor, UploadResult};
pub use network::{ApiClient, NetworkActor};
