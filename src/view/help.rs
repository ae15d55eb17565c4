//! Help overlay widget displaying keyboard shortcuts.
//!
//! Shows a centered modal overlay listing all bindings, grouped by
//! category. Triggered by '?', dismissed by pressing '?' again.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const POPUP_WIDTH_PERCENT: u16 = 50;
const POPUP_HEIGHT_PERCENT: u16 = 70;

/// Render the help overlay centered on the screen.
pub fn render_help_overlay(frame: &mut Frame) {
    let popup_area = centered_rect(POPUP_WIDTH_PERCENT, POPUP_HEIGHT_PERCENT, frame.area());

    frame.render_widget(Clear, popup_area);

    let paragraph = Paragraph::new(build_help_content())
        .block(
            Block::default()
                .title(" Keyboard Shortcuts ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, popup_area);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(1),
        width: popup_area.width,
        height: 1,
    };
    let hint = Paragraph::new(Line::from(Span::styled(
        " Press ? to close ",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(hint, hint_area);
}

/// Centered rect covering the given percentage of the screen.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    Rect {
        x: area.x + (area.width.saturating_sub(popup_width)) / 2,
        y: area.y + (area.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height,
    }
}

fn build_help_content() -> Vec<Line<'static>> {
    let category_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(Color::White);

    let entry = |key: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(key, key_style),
            Span::styled(desc, desc_style),
        ])
    };

    vec![
        Line::from(Span::styled("Navigation", category_style)),
        entry("  j/Down           ", "Scroll down one line"),
        entry("  k/Up             ", "Scroll up one line"),
        entry("  Ctrl+d/Page Down ", "Page down"),
        entry("  Ctrl+u/Page Up   ", "Page up"),
        entry("  g/Home           ", "Go to top"),
        entry("  G/End            ", "Go to bottom of loaded data"),
        Line::from(""),
        Line::from(Span::styled("Application", category_style)),
        entry("  r                ", "Reload from the start"),
        entry("  ?                ", "Toggle this overlay"),
        entry("  q/Ctrl+c         ", "Quit"),
    ]
}
