//! App state - pure data structure with no I/O logic

use crate::config::Settings;
use crate::messages::ui_events::{InputMode, Panel};
use crate::messages::{Operation, RenderState};
use crate::models::ModelDescriptor;

/// Option list of the model picker
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModelPicker {
    options: Vec<String>,
    selected: usize,
}

impl ModelPicker {
    /// Replace every option, keeping server order; the first option becomes selected
    pub fn replace(&mut self, models: Vec<ModelDescriptor>) {
        self.options = models.into_iter().map(|m| m.name).collect();
        self.selected = 0;
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Current value, empty when there are no options
    pub fn value(&self) -> &str {
        self.options
            .get(self.selected)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.options.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

/// Range slider over [0, 1] in steps of 0.1
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TemperatureSlider {
    tenths: u8,
}

impl TemperatureSlider {
    const MAX_TENTHS: u8 = 10;

    pub fn from_value(value: f64) -> Self {
        let tenths = (value.clamp(0.0, 1.0) * 10.0).round() as u8;
        TemperatureSlider {
            tenths: tenths.min(Self::MAX_TENTHS),
        }
    }

    /// The slider's string value, formatted the way a range input reports it
    pub fn value(&self) -> String {
        match self.tenths {
            0 => "0".to_string(),
            Self::MAX_TENTHS => "1".to_string(),
            t => format!("0.{}", t),
        }
    }

    /// Position in [0, 1], for drawing
    pub fn ratio(&self) -> f64 {
        f64::from(self.tenths) / f64::from(Self::MAX_TENTHS)
    }

    pub fn increase(&mut self) {
        self.tenths = (self.tenths + 1).min(Self::MAX_TENTHS);
    }

    pub fn decrease(&mut self) {
        self.tenths = self.tenths.saturating_sub(1);
    }
}

impl Default for TemperatureSlider {
    fn default() -> Self {
        TemperatureSlider::from_value(crate::constants::DEFAULT_TEMPERATURE)
    }
}

/// Parse a slider string value into the number sent to the server
pub fn parse_temperature(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Id of the pending request per operation; `None` means idle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InFlight {
    pub models: Option<u64>,
    pub upload: Option<u64>,
    pub ask: Option<u64>,
}

impl InFlight {
    pub fn get(&self, operation: Operation) -> Option<u64> {
        match operation {
            Operation::LoadModels => self.models,
            Operation::Upload => self.upload,
            Operation::Ask => self.ask,
        }
    }

    pub fn slot_mut(&mut self, operation: Operation) -> &mut Option<u64> {
        match operation {
            Operation::LoadModels => &mut self.models,
            Operation::Upload => &mut self.upload,
            Operation::Ask => &mut self.ask,
        }
    }

    pub fn is_pending(&self, operation: Operation) -> bool {
        self.get(operation).is_some()
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    // modelSelect
    pub models: ModelPicker,

    // pdfFile / uploadStatus
    pub pdf_path: String,
    pub upload_status: String,

    // questionInput / temperatureRange / answerBox
    pub question: String,
    pub temperature: TemperatureSlider,
    pub answer: String,
    pub answer_scroll: u16,
    /// Wrapped answer lines beyond the visible height, reported by the UI
    pub answer_max_scroll: u16,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // Requests
    pub next_request_id: u64,
    pub in_flight: InFlight,

    // Popups and status line
    pub alert: Option<String>,
    pub show_help: bool,
    pub last_error: Option<String>,

    pub server_url: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        AppState {
            models: ModelPicker::default(),
            pdf_path: String::new(),
            upload_status: String::new(),
            question: String::new(),
            temperature: TemperatureSlider::from_value(settings.default_temperature),
            answer: String::new(),
            answer_scroll: 0,
            answer_max_scroll: 0,
            active_panel: Panel::Models,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            next_request_id: 1,
            in_flight: InFlight::default(),
            alert: None,
            show_help: false,
            last_error: None,
            server_url: settings.base_url().to_string(),
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Get the current input field content
    pub fn current_input(&self) -> &str {
        match self.active_panel {
            Panel::PdfFile => &self.pdf_path,
            Panel::Question => &self.question,
            _ => "",
        }
    }

    /// Get mutable reference to current input field
    pub fn current_input_mut(&mut self) -> Option<&mut String> {
        match self.active_panel {
            Panel::PdfFile => Some(&mut self.pdf_path),
            Panel::Question => Some(&mut self.question),
            _ => None,
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            model_options: self.models.options().to_vec(),
            selected_model: self.models.selected_index(),
            models_loading: self.in_flight.is_pending(Operation::LoadModels),
            pdf_path: self.pdf_path.clone(),
            upload_status: self.upload_status.clone(),
            upload_in_flight: self.in_flight.is_pending(Operation::Upload),
            question: self.question.clone(),
            temperature: self.temperature.value(),
            answer: self.answer.clone(),
            answer_scroll: self.answer_scroll,
            ask_in_flight: self.in_flight.is_pending(Operation::Ask),
            active_panel: self.active_panel,
            input_mode: self.input_mode,
            cursor_position: self.cursor_position,
            alert: self.alert.clone(),
            show_help: self.show_help,
            last_error: self.last_error.clone(),
            server_url: self.server_url.clone(),
        }
    }
}
