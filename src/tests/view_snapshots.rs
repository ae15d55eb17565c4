//! TestBackend rendering tests for the TUI frame.
//!
//! Draws full frames into an in-memory backend and asserts on the visual
//! output: hex pane columns, status line, fetch indicators, and the help
//! overlay.

use crate::model::SourceError;
use crate::session::{FetchController, FetchStatus, Session};
use crate::source::{ByteSource, MemSource};
use crate::state::AppState;
use crate::view::draw_frame;
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::sync::Arc;
use std::time::{Duration, Instant};

// ===== Test Helpers =====

/// Convert a ratatui buffer to a string representation.
///
/// Captures the visual output character by character, preserving layout.
/// Empty trailing lines are removed to keep assertions clean.
fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

fn create_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(width, height)).unwrap()
}

fn draw_to_string(state: &AppState, source_name: &str) -> String {
    // Wide enough that the 50%-width help popup still fits a full
    // binding line inside its borders.
    let mut terminal = create_terminal(100, 12);
    terminal
        .draw(|frame| draw_frame(frame, state, source_name))
        .unwrap();
    buffer_to_string(terminal.backend().buffer())
}

/// Poll until the session settles out of `InFlight`.
fn poll_until_settled(controller: &FetchController, session: &mut Session) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while session.fetch_in_flight() {
        assert!(Instant::now() < deadline, "fetch never settled");
        if !controller.poll(session) {
            std::thread::sleep(Duration::from_millis(1));
        }
    }
}

fn fully_loaded_state(bytes: Vec<u8>, page_size: usize) -> AppState {
    let controller = FetchController::new(Duration::from_secs(5)).unwrap();
    let mut session = Session::new(page_size);
    controller
        .reset(&mut session, Arc::new(MemSource::new("demo", bytes)))
        .unwrap();
    loop {
        poll_until_settled(&controller, &mut session);
        if !session.has_more() {
            break;
        }
        controller.on_viewport_near_end(&mut session);
    }
    AppState::new(session)
}

/// A source whose page reads always fail.
#[derive(Debug)]
struct BrokenSource {
    len: u64,
}

impl ByteSource for BrokenSource {
    fn total_size(&self) -> Result<u64, SourceError> {
        Ok(self.len)
    }

    fn read_page(&self, _index: u64, _page_size: usize) -> Result<Vec<u8>, SourceError> {
        Err(SourceError::Io(std::io::Error::other("disk on fire")))
    }

    fn name(&self) -> &str {
        "broken"
    }
}

// ===== Frame Tests =====

#[test]
fn frame_shows_offset_hex_and_ascii_columns() {
    let state = fully_loaded_state(b"Hello, World!!\x00\x00\x00\x00".to_vec(), 16);
    let output = draw_to_string(&state, "demo");

    assert!(output.contains("00000000"), "offset column missing:\n{output}");
    assert!(
        output.contains("48 65 6c 6c 6f 2c 20 57 6f 72 6c 64 21 21 00 00"),
        "hex column missing:\n{output}"
    );
    assert!(
        output.contains("Hello, World!!.."),
        "ascii column missing:\n{output}"
    );
    assert!(output.contains("00000010"), "second line missing:\n{output}");
}

#[test]
fn frame_status_line_reports_progress() {
    let state = fully_loaded_state(b"Hello, World!!\x00\x00\x00\x00".to_vec(), 16);
    let output = draw_to_string(&state, "demo");

    assert!(
        output.contains("demo  18 / 18 bytes  page 2/2"),
        "status line wrong:\n{output}"
    );
}

#[test]
fn frame_shows_loading_indicator_while_fetch_outstanding() {
    let controller = FetchController::new(Duration::from_secs(5)).unwrap();
    let mut session = Session::new(16);
    controller
        .reset(&mut session, Arc::new(MemSource::new("demo", vec![0u8; 64])))
        .unwrap();

    // The page-0 fetch is outstanding until the next poll.
    assert!(session.fetch_in_flight());
    let output = draw_to_string(&AppState::new(session), "demo");
    assert!(output.contains("loading..."), "no loading indicator:\n{output}");
}

#[test]
fn frame_shows_more_below_when_pages_remain() {
    let controller = FetchController::new(Duration::from_secs(5)).unwrap();
    let mut session = Session::new(16);
    controller
        .reset(&mut session, Arc::new(MemSource::new("demo", vec![0u8; 64])))
        .unwrap();
    poll_until_settled(&controller, &mut session);

    assert_eq!(session.pages().len(), 1);
    assert!(session.has_more());
    let output = draw_to_string(&AppState::new(session), "demo");
    assert!(output.contains("more below"), "no more-below hint:\n{output}");
}

#[test]
fn frame_shows_failure_message() {
    let controller = FetchController::new(Duration::from_secs(5)).unwrap();
    let mut session = Session::new(16);
    controller
        .reset(&mut session, Arc::new(BrokenSource { len: 64 }))
        .unwrap();
    poll_until_settled(&controller, &mut session);

    assert!(matches!(session.fetch(), FetchStatus::Failed { .. }));
    let output = draw_to_string(&AppState::new(session), "demo");
    assert!(
        output.contains("fetch failed:"),
        "no failure indicator:\n{output}"
    );
    assert!(output.contains("disk on fire"), "error detail lost:\n{output}");
}

#[test]
fn frame_scroll_offset_moves_top_line() {
    let mut state = fully_loaded_state((0u8..=255).collect(), 64);
    state.scroll.vertical_offset = 2;

    let output = draw_to_string(&state, "demo");
    let first_line = output.lines().next().unwrap();
    assert!(
        first_line.starts_with("00000020"),
        "viewport not scrolled:\n{output}"
    );
    assert!(!output.contains("00000000"), "line above viewport leaked:\n{output}");
}

#[test]
fn frame_help_overlay_renders_on_top() {
    let mut state = fully_loaded_state(vec![0u8; 32], 16);
    state.help_visible = true;

    let output = draw_to_string(&state, "demo");
    assert!(
        output.contains("Keyboard Shortcuts"),
        "help overlay missing:\n{output}"
    );
    assert!(output.contains("Scroll down one line"), "bindings missing:\n{output}");
}

#[test]
fn frame_empty_source_draws_only_status() {
    let state = fully_loaded_state(Vec::new(), 8192);
    let output = draw_to_string(&state, "empty");

    assert!(!output.contains("00000000"), "no lines expected:\n{output}");
    assert!(
        output.contains("empty  0 / 0 bytes  page 1/1"),
        "status line wrong:\n{output}"
    );
}
