//! Command handlers - controller logic for UI events and server responses

use std::path::PathBuf;

use crate::app::state::parse_temperature;
use crate::app::AppState;
use crate::constants::{
    ALERT_NO_FILE, ALERT_NO_QUESTION, DEFAULT_TEMPERATURE, THINKING, UPLOADING,
};
use crate::messages::ui_events::InputMode;
use crate::messages::{NetworkCommand, NetworkResponse, Operation};
use crate::models::AskPayload;

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn next_panel(&mut self) {
        self.stop_editing();
        self.active_panel = self.active_panel.next();
    }

    pub fn prev_panel(&mut self) {
        self.stop_editing();
        self.active_panel = self.active_panel.prev();
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        if self.active_panel.is_text_input() {
            self.input_mode = InputMode::Editing;
            self.cursor_position = self.current_input().len();
        }
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
        self.cursor_position = 0;
    }

    /// Keep the cursor inside the current field and on a char boundary
    fn clamp_cursor(&mut self) {
        let input = self.current_input();
        let mut pos = self.cursor_position.min(input.len());
        while !input.is_char_boundary(pos) {
            pos -= 1;
        }
        self.cursor_position = pos;
    }

    pub fn move_cursor_left(&mut self) {
        self.clamp_cursor();
        let input = self.current_input();
        if self.cursor_position > 0 {
            let new_pos = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        self.clamp_cursor();
        let input = self.current_input();
        if self.cursor_position < input.len() {
            let new_pos = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        if self.input_mode != InputMode::Editing {
            return;
        }
        self.clamp_cursor();
        let cursor_pos = self.cursor_position;
        if let Some(input) = self.current_input_mut() {
            if cursor_pos <= input.len() {
                input.insert(cursor_pos, c);
                self.cursor_position = cursor_pos + c.len_utf8();
            }
        }
    }

    pub fn delete_char(&mut self) {
        if self.input_mode != InputMode::Editing {
            return;
        }
        self.clamp_cursor();
        if self.cursor_position == 0 {
            return;
        }
        let cursor_pos = self.cursor_position;
        if let Some(input) = self.current_input_mut() {
            let prev_pos = input[..cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev_pos);
            self.cursor_position = prev_pos;
        }
    }

    // ========================
    // Model picker & slider
    // ========================

    pub fn next_model(&mut self) {
        self.models.select_next();
    }

    pub fn prev_model(&mut self) {
        self.models.select_prev();
    }

    pub fn temperature_up(&mut self) {
        self.temperature.increase();
    }

    pub fn temperature_down(&mut self) {
        self.temperature.decrease();
    }

    // ========================
    // Answer scrolling
    // ========================

    pub fn scroll_up(&mut self) {
        self.answer_scroll = self.answer_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        if self.answer_scroll < self.answer_max_scroll {
            self.answer_scroll += 1;
        }
    }

    /// Record how far the answer can scroll at the current panel size
    pub fn set_answer_scroll_limit(&mut self, max_scroll: u16) {
        self.answer_max_scroll = max_scroll;
        self.answer_scroll = self.answer_scroll.min(max_scroll);
    }

    // ========================
    // Server operations
    // ========================

    /// Start fetching the model list
    pub fn load_models(&mut self) -> Option<NetworkCommand> {
        let id = self.begin(Operation::LoadModels)?;
        Some(NetworkCommand::LoadModels { id })
    }

    /// Start uploading the selected PDF; alerts instead when no file is given
    pub fn upload_pdf(&mut self) -> Option<NetworkCommand> {
        let path = self.pdf_path.trim().to_string();
        if path.is_empty() {
            self.raise_alert(ALERT_NO_FILE);
            return None;
        }
        let path = PathBuf::from(path);

        let id = self.begin(Operation::Upload)?;
        self.upload_status = UPLOADING.to_string();
        Some(NetworkCommand::UploadPdf { id, path })
    }

    /// Start asking the current question; alerts instead when it is empty
    pub fn ask_question(&mut self) -> Option<NetworkCommand> {
        let question = self.question.clone();
        let model = self.models.value().to_string();
        let temperature = parse_temperature(&self.temperature.value()).unwrap_or(DEFAULT_TEMPERATURE);

        if question.is_empty() {
            self.raise_alert(ALERT_NO_QUESTION);
            return None;
        }

        let id = self.begin(Operation::Ask)?;
        self.answer = THINKING.to_string();
        self.answer_scroll = 0;
        Some(NetworkCommand::AskQuestion {
            id,
            payload: AskPayload {
                question,
                model,
                temperature,
            },
        })
    }

    /// Apply a server response to the view state
    pub fn handle_response(&mut self, response: NetworkResponse) {
        let operation = response.operation();
        let id = response.id();
        if self.in_flight.get(operation) != Some(id) {
            tracing::debug!(id, %operation, "Ignoring stale response");
            return;
        }
        *self.in_flight.slot_mut(operation) = None;

        match response {
            NetworkResponse::ModelsLoaded { models, .. } => {
                tracing::info!(count = models.len(), "Models loaded");
                self.models.replace(models);
            }
            NetworkResponse::UploadFinished { result, .. } => {
                self.upload_status = result.display_text();
            }
            NetworkResponse::AnswerReceived { result, .. } => {
                self.answer = result.display_text();
                self.answer_scroll = 0;
            }
            NetworkResponse::Failed { message, .. } => {
                tracing::error!(id, %operation, error = %message, "Request failed");
                match operation {
                    Operation::LoadModels => {}
                    Operation::Upload => self.upload_status = format!("Upload failed: {}", message),
                    Operation::Ask => self.answer = format!("Error: {}", message),
                }
                self.last_error = Some(format!("{} failed: {}", operation, message));
            }
        }
    }

    /// Reserve an id for `operation`, or `None` if one is already pending
    fn begin(&mut self, operation: Operation) -> Option<u64> {
        if let Some(pending) = self.in_flight.get(operation) {
            tracing::debug!(pending, %operation, "Request already in flight, ignoring trigger");
            return None;
        }
        let id = self.next_id();
        *self.in_flight.slot_mut(operation) = Some(id);
        self.last_error = None;
        Some(id)
    }

    // ========================
    // Popups
    // ========================

    fn raise_alert(&mut self, message: &str) {
        tracing::warn!(alert = message, "Precondition failed");
        self.stop_editing();
        self.alert = Some(message.to_string());
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}
