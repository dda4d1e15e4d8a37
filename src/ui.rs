use ratatui::{prelude::*, widgets::*};

use crate::messages::ui_events::{InputMode, Panel};
use crate::messages::RenderState;

/// Border style for a panel given focus and editing state
pub fn border_style(state: &RenderState, panel: Panel) -> Style {
    let is_focused = state.active_panel == panel;
    if is_focused && state.input_mode == InputMode::Editing {
        Style::default().fg(Color::Yellow)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

/// Renders a text input field, with a dimmed placeholder when empty.
/// `scroll` is the horizontal offset from [`input_scroll`].
pub fn render_input<'a>(
    content: &'a str,
    placeholder: &'a str,
    title: String,
    style: Style,
    scroll: u16,
) -> Paragraph<'a> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title);

    if content.is_empty() {
        Paragraph::new(Span::styled(placeholder, Style::default().fg(Color::DarkGray))).block(block)
    } else {
        Paragraph::new(content).block(block).scroll((0, scroll))
    }
}

/// Renders the model picker options
pub fn render_model_list<'a>(options: &'a [String], title: String, style: Style) -> List<'a> {
    let items: Vec<ListItem> = options.iter().map(|name| ListItem::new(name.as_str())).collect();

    List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(style)
                .title(title),
        )
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .highlight_symbol("> ")
}

/// Renders the temperature slider as a gauge
pub fn render_temperature<'a>(value: &str, style: Style) -> Gauge<'a> {
    let ratio = crate::app::state::parse_temperature(value)
        .unwrap_or(0.0)
        .clamp(0.0, 1.0);

    Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(style)
                .title(" Temperature (←/→) "),
        )
        .gauge_style(Style::default().fg(temperature_color(ratio)))
        .ratio(ratio)
        .label(value.to_string())
}

/// Cool colors for focused answers, warm for creative ones
pub fn temperature_color(ratio: f64) -> Color {
    if ratio < 0.34 {
        Color::Cyan
    } else if ratio < 0.67 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Color for in-progress and result status text
pub fn status_color(text: &str, in_flight: bool) -> Color {
    if in_flight {
        Color::Yellow
    } else if text.starts_with("Upload failed") || text.starts_with("Error:") {
        Color::Red
    } else {
        Color::Green
    }
}

fn cursor_column(content: &str, cursor_position: usize) -> usize {
    content
        .get(..cursor_position)
        .map(|s| s.chars().count())
        .unwrap_or(0)
}

/// Horizontal scroll that keeps the cursor visible in a one-line bordered input
pub fn input_scroll(area: Rect, content: &str, cursor_position: usize) -> u16 {
    let inner_width = usize::from(area.width.saturating_sub(2));
    let column = cursor_column(content, cursor_position);
    let scroll = column.saturating_sub(inner_width.saturating_sub(1));
    u16::try_from(scroll).unwrap_or(u16::MAX)
}

/// Cursor position inside a one-line bordered input, after [`input_scroll`]
pub fn input_cursor(area: Rect, content: &str, cursor_position: usize) -> Position {
    let column = cursor_column(content, cursor_position);
    let scroll = usize::from(input_scroll(area, content, cursor_position));
    let offset = u16::try_from(column.saturating_sub(scroll)).unwrap_or(u16::MAX);
    let max_x = area.x.saturating_add(area.width.saturating_sub(2));
    Position::new(
        area.x.saturating_add(1).saturating_add(offset).min(max_x),
        area.y.saturating_add(1),
    )
}

/// How far a wrapped, bordered paragraph can scroll before only blank rows remain
pub fn answer_scroll_limit(text: &str, area: Rect) -> u16 {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    let lines = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .line_count(inner.width);
    u16::try_from(lines)
        .unwrap_or(u16::MAX)
        .saturating_sub(inner.height)
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_counts_chars_not_bytes() {
        let area = Rect::new(0, 0, 40, 3);
        assert_eq!(input_cursor(area, "héllo", 3), Position::new(3, 1));
        assert_eq!(input_cursor(area, "", 0), Position::new(1, 1));
    }

    #[test]
    fn cursor_is_clamped_to_the_box() {
        let area = Rect::new(0, 0, 5, 3);
        assert_eq!(input_cursor(area, "abcdefgh", 8), Position::new(3, 1));
    }

    #[test]
    fn long_input_scrolls_instead_of_overflowing() {
        let area = Rect::new(0, 0, 6, 3);
        assert_eq!(input_scroll(area, "abcdefghij", 10), 7);
        assert_eq!(input_cursor(area, "abcdefghij", 10), Position::new(4, 1));
        assert_eq!(input_scroll(area, "abcdefghij", 0), 0);
        assert_eq!(input_cursor(area, "abcdefghij", 0), Position::new(1, 1));
    }

    #[test]
    fn huge_input_saturates() {
        let area = Rect::new(0, 0, 20, 3);
        let content = "x".repeat(70_000);
        assert_eq!(input_scroll(area, &content, 70_000), u16::MAX);
        assert_eq!(input_cursor(area, &content, 70_000), Position::new(18, 1));
    }

    #[test]
    fn answer_scroll_limit_counts_wrapped_lines() {
        // 3 visible rows inside the border
        let area = Rect::new(0, 0, 12, 5);
        assert_eq!(answer_scroll_limit("a\nb\nc\nd\ne", area), 2);
        assert_eq!(answer_scroll_limit("short", area), 0);
        assert_eq!(answer_scroll_limit("", area), 0);

        // 10 columns wide, one visible row
        let narrow = Rect::new(0, 0, 12, 3);
        assert_eq!(answer_scroll_limit(&"x".repeat(25), narrow), 2);
    }

    #[test]
    fn failure_text_is_red() {
        assert_eq!(status_color("Upload failed: boom", false), Color::Red);
        assert_eq!(status_color("Uploading...", true), Color::Yellow);
        assert_eq!(status_color("Upload complete.", false), Color::Green);
    }
}
