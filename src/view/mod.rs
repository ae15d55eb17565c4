//! TUI rendering and terminal management (impure shell).

mod help;

pub use help::render_help_overlay;

use crate::config::keybindings::KeyBindings;
use crate::config::ResolvedConfig;
use crate::model::{KeyAction, SourceError};
use crate::render::{render, DisplayLine, BYTES_PER_LINE};
use crate::session::{FetchController, FetchStatus, Session};
use crate::source::ByteSource;
use crate::state::{handle_scroll_action, near_end, AppState};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Poll interval for fetch results between input events.
const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Width of the hex column: 16 bytes at "xx " minus the trailing space.
const HEX_COLUMN_WIDTH: usize = BYTES_PER_LINE * 3 - 1;

/// Errors that can occur during TUI operations.
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Byte source error
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// Main TUI application.
///
/// Generic over backend to support testing with TestBackend.
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    state: AppState,
    controller: FetchController,
    source: Arc<dyn ByteSource>,
    key_bindings: KeyBindings,
    near_end_margin: usize,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application.
    ///
    /// Sets up the terminal in raw mode with alternate screen, spawns the
    /// fetch worker, and kicks off the page-0 fetch for the given source.
    ///
    /// # Errors
    ///
    /// Returns `TuiError` if the terminal cannot be initialized or the
    /// source's size cannot be read.
    pub fn new(source: Arc<dyn ByteSource>, config: &ResolvedConfig) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let controller = FetchController::new(Duration::from_millis(config.fetch_timeout_ms))?;
        let mut state = AppState::new(Session::new(config.page_size));
        controller.reset(&mut state.session, source.clone())?;

        info!(
            source = source.name(),
            total_size = state.session.total_size(),
            total_pages = state.session.total_pages(),
            page_size = config.page_size,
            "viewer session opened"
        );

        Ok(Self {
            terminal,
            state,
            controller,
            source,
            key_bindings: KeyBindings::default(),
            near_end_margin: config.near_end_margin,
        })
    }

    /// Run the main event loop.
    ///
    /// Returns when the user quits (q or Ctrl+C). Key events redraw
    /// immediately; timer ticks poll the fetch controller and redraw only
    /// when the session changed.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            if event::poll(TICK_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key)? {
                            return Ok(());
                        }
                        self.draw()?;
                    }
                    Event::Resize(_, _) => {
                        self.draw()?;
                    }
                    _ => {}
                }
            } else if self.controller.poll(&mut self.state.session) {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Handle a key event. Returns `Ok(true)` when the user quit.
    fn handle_key(&mut self, key: KeyEvent) -> Result<bool, TuiError> {
        // Ctrl+C always quits, bindings aside.
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(true);
        }

        let Some(action) = self.key_bindings.get(key) else {
            return Ok(false);
        };

        match action {
            KeyAction::Quit => return Ok(true),
            KeyAction::Help => {
                self.state.help_visible = !self.state.help_visible;
            }
            KeyAction::Reload => {
                info!(source = self.source.name(), "session reset requested");
                self.controller
                    .reset(&mut self.state.session, self.source.clone())?;
                self.state.scroll.vertical_offset = 0;
            }
            scroll_action => {
                let (viewport_height, content_height) = self.geometry();
                let page_size = self.state.session.page_size();
                let state = std::mem::replace(
                    &mut self.state,
                    AppState::new(Session::new(page_size)),
                );
                self.state =
                    handle_scroll_action(state, scroll_action, viewport_height, content_height);
            }
        }

        Ok(false)
    }

    /// Current viewport height and rendered content height, in lines.
    fn geometry(&self) -> (usize, usize) {
        let viewport_height = self
            .terminal
            .size()
            .map(|size| size.height.saturating_sub(1) as usize)
            .unwrap_or(24);
        let content_height = self
            .state
            .session
            .loaded_bytes()
            .div_ceil(BYTES_PER_LINE as u64) as usize;
        (viewport_height, content_height)
    }

    /// Render the current state and re-evaluate the near-end signal.
    fn draw(&mut self) -> Result<(), TuiError> {
        let state = &self.state;
        let name = self.source.name().to_string();
        self.terminal.draw(|frame| draw_frame(frame, state, &name))?;

        // Near-end is re-checked on every draw; the controller's gates
        // drop the signal while a fetch is outstanding or when every page
        // is already loaded.
        let (viewport_height, content_height) = self.geometry();
        if near_end(
            self.state.scroll.vertical_offset,
            viewport_height,
            content_height,
            self.near_end_margin,
        ) {
            self.controller.on_viewport_near_end(&mut self.state.session);
        }

        Ok(())
    }
}

/// Draw one frame: hex lines, status line, and the help overlay when
/// toggled. Pure with respect to `state`; shared with TestBackend tests.
pub fn draw_frame(frame: &mut Frame, state: &AppState, source_name: &str) {
    let [main_area, status_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

    draw_hex_pane(frame, main_area, state);
    draw_status_line(frame, status_area, state, source_name);

    if state.help_visible {
        render_help_overlay(frame);
    }
}

fn draw_hex_pane(frame: &mut Frame, area: Rect, state: &AppState) {
    let session = &state.session;
    let lines = render(session.pages(), session.page_size());

    let top = state.scroll.vertical_offset.min(lines.len());
    let bottom = (top + area.height as usize).min(lines.len());

    let text: Vec<Line> = lines[top..bottom].iter().map(hex_line).collect();
    frame.render_widget(Paragraph::new(text), area);
}

/// Style one display line as offset / hex / ASCII columns.
fn hex_line(line: &DisplayLine) -> Line<'static> {
    Line::from(vec![
        Span::styled(line.offset_text(), Style::default().fg(Color::DarkGray)),
        Span::raw("  "),
        Span::raw(format!("{:<width$}", line.hex_text(), width = HEX_COLUMN_WIDTH)),
        Span::raw("  "),
        Span::styled(line.ascii_text(), Style::default().fg(Color::Green)),
    ])
}

fn draw_status_line(frame: &mut Frame, area: Rect, state: &AppState, source_name: &str) {
    let session = &state.session;

    let progress = format!(
        "{}  {} / {} bytes  page {}/{}",
        source_name,
        session.loaded_bytes(),
        session.total_size(),
        session.pages().len(),
        session.total_pages(),
    );

    let (indicator, style) = match session.fetch() {
        FetchStatus::InFlight { .. } => (
            "  loading...".to_string(),
            Style::default().fg(Color::Yellow),
        ),
        FetchStatus::Failed { message, .. } => (
            format!("  fetch failed: {message} (scroll to retry)"),
            Style::default().fg(Color::Red),
        ),
        FetchStatus::Idle if session.has_more() => {
            ("  more below".to_string(), Style::default().fg(Color::DarkGray))
        }
        FetchStatus::Idle => (String::new(), Style::default()),
    };

    let line = Line::from(vec![
        Span::styled(progress, Style::default().fg(Color::Gray)),
        Span::styled(indicator, style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Set up the terminal, run the app to completion, and restore the
/// terminal even when the run fails.
///
/// # Errors
///
/// Returns the first `TuiError` from setup or the event loop.
pub fn run_with_source(
    source: Arc<dyn ByteSource>,
    config: &ResolvedConfig,
) -> Result<(), TuiError> {
    let mut app = TuiApp::new(source, config)?;
    let result = app.run();

    let _ = disable_raw_mode();
    let _ = io::stdout().execute(LeaveAlternateScreen);

    result
}
