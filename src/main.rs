//! PDF Q&A TUI - actor-based client for a PDF question-answering server
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - view state updated by controller commands
//! - Network Layer (Tokio) - async HTTP execution

use std::io;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use pdfqa_tui::cli::Cli;
use pdfqa_tui::config::Settings;
use pdfqa_tui::constants::{APP_NAME, APP_VERSION};
use pdfqa_tui::messages::ui_events::{key_to_ui_event, InputMode, Panel};
use pdfqa_tui::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use pdfqa_tui::ui::{
    answer_scroll_limit, border_style, centered_rect, input_cursor, input_scroll, render_input,
    render_model_list, render_temperature, status_color,
};
use pdfqa_tui::{ApiClient, AppActor, NetworkActor};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = cli.resolve_settings()?;

    // Log to file; the terminal belongs to the UI
    let _log_guard = init_logging(&settings)?;
    tracing::info!(server = %settings.base_url(), "Starting {} {}", APP_NAME, APP_VERSION);

    let client = ApiClient::new(&settings).context("building HTTP client")?;

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(client, net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(&settings, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Shutting down");
    Ok(())
}

fn init_logging(settings: &Settings) -> anyhow::Result<tracing_appender::non_blocking::WorkerGuard> {
    let path = &settings.log_file;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| std::path::Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("log file path has no file name: {}", path.display()))?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();
    Ok(guard)
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();
    let mut sent_scroll_limit = 0;

    loop {
        let mut scroll_limit = 0;
        terminal.draw(|f| scroll_limit = draw_ui(f, &current_state))?;

        // Answer wrapping depends on the terminal size, only known here
        if scroll_limit != sent_scroll_limit {
            let _ = ui_tx.send(UiEvent::AnswerScrollLimit(scroll_limit));
            sent_scroll_limit = scroll_limit;
        }

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.active_panel,
                    current_state.input_mode,
                    current_state.show_help,
                    current_state.alert.is_some(),
                ) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

/// Draw the whole screen, returning the answer panel's scroll limit
fn draw_ui(f: &mut Frame, state: &RenderState) -> u16 {
    let area = f.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_title(f, state, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(rows[1]);

    draw_left_column(f, state, columns[0]);
    let scroll_limit = draw_right_column(f, state, columns[1]);
    draw_status_bar(f, state, rows[2]);

    if state.show_help {
        draw_help_popup(f, area);
    }

    if let Some(message) = &state.alert {
        draw_alert_popup(f, message, area);
    }

    scroll_limit
}

fn draw_title(f: &mut Frame, state: &RenderState, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", APP_NAME),
            Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
        ),
        Span::styled(format!(" {}", state.server_url), Style::default().fg(Color::Gray)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_left_column(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Models
            Constraint::Length(3), // PDF path
            Constraint::Length(3), // Upload status
        ])
        .split(area);

    // Models
    let loading = if state.models_loading { " [...]" } else { "" };
    let title = format!(" Model{} (↑/↓, r:reload) ", loading);
    let list = render_model_list(&state.model_options, title, border_style(state, Panel::Models));
    let mut list_state = ListState::default();
    if !state.model_options.is_empty() {
        list_state.select(Some(state.selected_model));
    }
    f.render_stateful_widget(list, chunks[0], &mut list_state);

    // PDF path
    let input = render_input(
        &state.pdf_path,
        "Path to a PDF file...",
        String::from(" PDF file (e:edit, u:upload) "),
        border_style(state, Panel::PdfFile),
        input_scroll(chunks[1], &state.pdf_path, field_cursor(state, Panel::PdfFile)),
    );
    f.render_widget(input, chunks[1]);
    if state.active_panel == Panel::PdfFile && state.input_mode == InputMode::Editing {
        f.set_cursor_position(input_cursor(chunks[1], &state.pdf_path, state.cursor_position));
    }

    // Upload status
    let color = status_color(&state.upload_status, state.upload_in_flight);
    let status = Paragraph::new(Span::styled(state.upload_status.as_str(), Style::default().fg(color)))
        .block(Block::default().borders(Borders::ALL).title(" Upload status "));
    f.render_widget(status, chunks[2]);
}

fn draw_right_column(f: &mut Frame, state: &RenderState, area: Rect) -> u16 {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Question
            Constraint::Length(3), // Temperature
            Constraint::Min(5),    // Answer
        ])
        .split(area);

    // Question
    let input = render_input(
        &state.question,
        "Ask something about the document...",
        String::from(" Question (e:edit, a:ask) "),
        border_style(state, Panel::Question),
        input_scroll(chunks[0], &state.question, field_cursor(state, Panel::Question)),
    );
    f.render_widget(input, chunks[0]);
    if state.active_panel == Panel::Question && state.input_mode == InputMode::Editing {
        f.set_cursor_position(input_cursor(chunks[0], &state.question, state.cursor_position));
    }

    // Temperature
    let gauge = render_temperature(&state.temperature, border_style(state, Panel::Temperature));
    f.render_widget(gauge, chunks[1]);

    // Answer
    let loading = if state.ask_in_flight { " [...]" } else { "" };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(state, Panel::Answer))
        .title(format!(" Answer{} ", loading));
    let answer_style = if state.ask_in_flight {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let answer = Paragraph::new(Span::styled(state.answer.as_str(), answer_style))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.answer_scroll, 0));
    f.render_widget(answer, chunks[2]);

    answer_scroll_limit(&state.answer, chunks[2])
}

/// Cursor of the field being edited, 0 for the other fields
fn field_cursor(state: &RenderState, panel: Panel) -> usize {
    if state.active_panel == panel && state.input_mode == InputMode::Editing {
        state.cursor_position
    } else {
        0
    }
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let bar = if let Some(error) = &state.last_error {
        Paragraph::new(format!(" {} ", error)).style(Style::default().fg(Color::Red))
    } else if state.input_mode == InputMode::Editing {
        Paragraph::new(" ESC:stop editing | arrows:move | Enter:submit ")
            .style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(" Tab:panel | e:edit | u:upload | a:ask | r:reload models | ?:help | q:quit ")
            .style(Style::default().fg(Color::DarkGray))
    };
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 PDF Q&A - Keyboard Shortcuts

 NAVIGATION
   Tab / Shift+Tab    Switch panels
   ↑ / ↓              Pick model / scroll answer

 DOCUMENT
   e / Enter          Edit PDF path (PDF panel)
   u                  Upload PDF

 QUESTION
   e / Enter          Edit question (Question panel)
   a                  Ask (Enter while editing)
   ← / →              Adjust temperature (Temperature panel)
   r                  Reload model list

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn draw_alert_popup(f: &mut Frame, message: &str, area: Rect) {
    let popup_area = centered_rect(50, 20, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Alert (any key to close) ")
        .style(Style::default().bg(Color::Black));

    let text = Paragraph::new(format!("\n{}", message))
        .alignment(Alignment::Center)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(text, popup_area);
}
