//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::config::Settings;
use crate::messages::ui_events::InputMode;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        settings: &Settings,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(settings),
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Populate the model picker once at start-up
        let cmd = self.state.load_models();
        self.dispatch(cmd);
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    self.state.handle_response(response);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    fn dispatch(&mut self, cmd: Option<NetworkCommand>) {
        let Some(cmd) = cmd else { return };
        let request = cmd.request();
        if self.network_tx.send(cmd).is_err() {
            tracing::warn!("Network actor is gone, command dropped");
            // Release the in-flight slot so the operation can be retried
            if let Some((id, operation)) = request {
                self.state.handle_response(NetworkResponse::Failed {
                    id,
                    operation,
                    message: String::from("network worker unavailable"),
                });
            }
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Panel navigation
            UiEvent::NextPanel => self.state.next_panel(),
            UiEvent::PrevPanel => self.state.prev_panel(),
            UiEvent::ScrollUp => self.state.scroll_up(),
            UiEvent::ScrollDown => self.state.scroll_down(),
            UiEvent::AnswerScrollLimit(max) => self.state.set_answer_scroll_limit(max),

            // Input editing
            UiEvent::StartEditing => self.state.start_editing(),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),

            // Model picker & slider
            UiEvent::NextModel => self.state.next_model(),
            UiEvent::PrevModel => self.state.prev_model(),
            UiEvent::TemperatureUp => self.state.temperature_up(),
            UiEvent::TemperatureDown => self.state.temperature_down(),

            // Server actions
            UiEvent::ReloadModels => {
                let cmd = self.state.load_models();
                self.dispatch(cmd);
            }
            UiEvent::UploadPdf => {
                self.finish_editing();
                let cmd = self.state.upload_pdf();
                self.dispatch(cmd);
            }
            UiEvent::AskQuestion => {
                self.finish_editing();
                let cmd = self.state.ask_question();
                self.dispatch(cmd);
            }

            // Popups
            UiEvent::DismissAlert => self.state.dismiss_alert(),
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }

    fn finish_editing(&mut self) {
        if self.state.input_mode == InputMode::Editing {
            self.state.stop_editing();
        }
    }
}
