//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Panel navigation
    NextPanel,
    PrevPanel,
    ScrollUp,
    ScrollDown,
    /// Answer panel was laid out; carries the maximum useful scroll offset
    AnswerScrollLimit(u16),

    // Input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,

    // Model picker
    NextModel,
    PrevModel,
    ReloadModels,

    // Temperature slider
    TemperatureUp,
    TemperatureDown,

    // Server actions
    UploadPdf,
    AskQuestion,

    // Popups
    DismissAlert,
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Focusable panels, named after the controls they stand in for
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Panel {
    /// `modelSelect`
    #[default]
    Models,
    /// `pdfFile`
    PdfFile,
    /// `questionInput`
    Question,
    /// `temperatureRange`
    Temperature,
    /// `answerBox`
    Answer,
}

impl Panel {
    pub fn next(&self) -> Panel {
        match self {
            Panel::Models => Panel::PdfFile,
            Panel::PdfFile => Panel::Question,
            Panel::Question => Panel::Temperature,
            Panel::Temperature => Panel::Answer,
            Panel::Answer => Panel::Models,
        }
    }

    pub fn prev(&self) -> Panel {
        match self {
            Panel::Models => Panel::Answer,
            Panel::PdfFile => Panel::Models,
            Panel::Question => Panel::PdfFile,
            Panel::Temperature => Panel::Question,
            Panel::Answer => Panel::Temperature,
        }
    }

    /// Panels that hold editable text
    pub fn is_text_input(&self) -> bool {
        matches!(self, Panel::PdfFile | Panel::Question)
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    active_panel: Panel,
    input_mode: InputMode,
    show_help: bool,
    alert_open: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    // Alerts are modal: the next key only dismisses them
    if alert_open {
        return Some(UiEvent::DismissAlert);
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match input_mode {
        InputMode::Normal => normal_mode_keys(key, active_panel),
        InputMode::Editing => editing_mode_keys(key, active_panel),
    }
}

fn normal_mode_keys(key: KeyEvent, active_panel: Panel) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Tab => Some(UiEvent::NextPanel),
        KeyCode::BackTab => Some(UiEvent::PrevPanel),
        KeyCode::Char('u') => Some(UiEvent::UploadPdf),
        KeyCode::Char('a') => Some(UiEvent::AskQuestion),
        KeyCode::Char('r') => Some(UiEvent::ReloadModels),
        KeyCode::Char('e') | KeyCode::Enter if active_panel.is_text_input() => {
            Some(UiEvent::StartEditing)
        }
        KeyCode::Up => match active_panel {
            Panel::Models => Some(UiEvent::PrevModel),
            Panel::Answer => Some(UiEvent::ScrollUp),
            Panel::Temperature => Some(UiEvent::TemperatureUp),
            _ => None,
        },
        KeyCode::Down => match active_panel {
            Panel::Models => Some(UiEvent::NextModel),
            Panel::Answer => Some(UiEvent::ScrollDown),
            Panel::Temperature => Some(UiEvent::TemperatureDown),
            _ => None,
        },
        KeyCode::Right | KeyCode::Char('+') if active_panel == Panel::Temperature => {
            Some(UiEvent::TemperatureUp)
        }
        KeyCode::Left | KeyCode::Char('-') if active_panel == Panel::Temperature => {
            Some(UiEvent::TemperatureDown)
        }
        _ => None,
    }
}

fn editing_mode_keys(key: KeyEvent, active_panel: Panel) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::StopEditing),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        KeyCode::Enter => match active_panel {
            Panel::PdfFile => Some(UiEvent::UploadPdf),
            Panel::Question => Some(UiEvent::AskQuestion),
            _ => Some(UiEvent::StopEditing),
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn alert_swallows_any_key() {
        let event = key_to_ui_event(press(KeyCode::Char('q')), Panel::Models, InputMode::Normal, false, true);
        assert_eq!(event, Some(UiEvent::DismissAlert));
    }

    #[test]
    fn ctrl_c_quits_even_with_alert_open() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            key_to_ui_event(key, Panel::Question, InputMode::Editing, false, true),
            Some(UiEvent::Quit)
        );
    }

    #[test]
    fn arrows_depend_on_panel() {
        let up = press(KeyCode::Up);
        assert_eq!(
            key_to_ui_event(up, Panel::Models, InputMode::Normal, false, false),
            Some(UiEvent::PrevModel)
        );
        assert_eq!(
            key_to_ui_event(up, Panel::Answer, InputMode::Normal, false, false),
            Some(UiEvent::ScrollUp)
        );
        assert_eq!(
            key_to_ui_event(press(KeyCode::Right), Panel::Temperature, InputMode::Normal, false, false),
            Some(UiEvent::TemperatureUp)
        );
        assert_eq!(key_to_ui_event(up, Panel::PdfFile, InputMode::Normal, false, false), None);
    }

    #[test]
    fn enter_while_editing_submits_the_field() {
        let enter = press(KeyCode::Enter);
        assert_eq!(
            key_to_ui_event(enter, Panel::Question, InputMode::Editing, false, false),
            Some(UiEvent::AskQuestion)
        );
        assert_eq!(
            key_to_ui_event(enter, Panel::PdfFile, InputMode::Editing, false, false),
            Some(UiEvent::UploadPdf)
        );
    }

    #[test]
    fn typing_shortcut_letters_while_editing_inserts_them() {
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('a')), Panel::Question, InputMode::Editing, false, false),
            Some(UiEvent::CharInput('a'))
        );
    }

    #[test]
    fn editing_only_starts_on_text_panels() {
        let e = press(KeyCode::Char('e'));
        assert_eq!(
            key_to_ui_event(e, Panel::PdfFile, InputMode::Normal, false, false),
            Some(UiEvent::StartEditing)
        );
        assert_eq!(key_to_ui_event(e, Panel::Models, InputMode::Normal, false, false), None);
    }

    #[test]
    fn panel_cycle_round_trips() {
        let mut panel = Panel::Models;
        for _ in 0..5 {
            panel = panel.next();
        }
        assert_eq!(panel, Panel::Models);
        assert_eq!(Panel::Models.prev(), Panel::Answer);
    }
}
