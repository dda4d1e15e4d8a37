//! Render state - data structure sent from App layer to UI for rendering

use crate::constants::DEFAULT_TEMPERATURE;
use crate::messages::ui_events::{InputMode, Panel};

/// Complete state needed by the UI to render
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    // Model picker
    pub model_options: Vec<String>,
    pub selected_model: usize,
    pub models_loading: bool,

    // Upload
    pub pdf_path: String,
    pub upload_status: String,
    pub upload_in_flight: bool,

    // Question
    pub question: String,
    pub temperature: String,
    pub answer: String,
    pub answer_scroll: u16,
    pub ask_in_flight: bool,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // Popups and status line
    pub alert: Option<String>,
    pub show_help: bool,
    pub last_error: Option<String>,
    pub server_url: String,
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            model_options: Vec::new(),
            selected_model: 0,
            models_loading: false,
            pdf_path: String::new(),
            upload_status: String::new(),
            upload_in_flight: false,
            question: String::new(),
            temperature: format!("{}", DEFAULT_TEMPERATURE),
            answer: String::new(),
            answer_scroll: 0,
            ask_in_flight: false,
            active_panel: Panel::Models,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            alert: None,
            show_help: false,
            last_error: None,
            server_url: String::new(),
        }
    }
}
