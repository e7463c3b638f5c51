//! Terminal display and input handling.

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, stdout, BufWriter, Stdout, Write};
use std::time::{Duration, Instant};

/// The single render surface: an alternate-screen raw-mode terminal with
/// buffered writes, restored on drop.
pub struct TerminalDisplay {
    width: u16,
    height: u16,
    last_resize_check: Instant,
    buffer: BufWriter<Stdout>,
}

impl TerminalDisplay {
    pub fn new() -> io::Result<Self> {
        let mut out = stdout();
        execute!(out, EnterAlternateScreen, cursor::Hide)?;
        terminal::enable_raw_mode()?;
        execute!(out, Clear(ClearType::All))?;

        let (width, height) = terminal::size()?;

        Ok(Self {
            width,
            // Bottom two rows are reserved for the status line.
            height: height.saturating_sub(2),
            last_resize_check: Instant::now(),
            buffer: BufWriter::new(out),
        })
    }

    /// Viewport size in character cells (status rows excluded).
    pub fn size(&self) -> (usize, usize) {
        (self.width as usize, self.height as usize)
    }

    /// Poll for a size change, throttled to avoid a syscall per frame.
    pub fn check_resize(&mut self) -> bool {
        if self.last_resize_check.elapsed() < Duration::from_millis(100) {
            return false;
        }
        self.last_resize_check = Instant::now();

        if let Ok((width, height)) = terminal::size() {
            let height = height.saturating_sub(2);
            if width != self.width || height != self.height {
                self.width = width;
                self.height = height;
                return true;
            }
        }
        false
    }

    /// Paint one frame plus the status line.
    ///
    /// Each line is positioned explicitly so an over-long line cannot shift
    /// the ones after it; leftovers from a larger previous frame are cleared.
    pub fn paint(&mut self, frame: &str, status: &str) -> io::Result<()> {
        let mut row = 0u16;
        for line in frame.lines() {
            queue!(self.buffer, cursor::MoveTo(0, row), Print(line))?;
            row = row.saturating_add(1);
        }
        queue!(
            self.buffer,
            cursor::MoveTo(0, row),
            Clear(ClearType::FromCursorDown),
            Print(status)
        )?;
        self.buffer.flush()
    }

    /// Wait up to `timeout` for a key press.
    pub fn poll_input(&self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        if event::poll(timeout)? {
            if let Event::Key(key_event) = event::read()? {
                return Ok(Some(key_event));
            }
        }
        Ok(None)
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = self.buffer.flush();
        let _ = terminal::disable_raw_mode();
        let _ = execute!(stdout(), cursor::Show, LeaveAlternateScreen);
    }
}

/// User actions for the demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    /// Swap between the color and ASCII render paths.
    ToggleEffect,
    RotationUp,
    RotationDown,
    BounceUp,
    BounceDown,
    Reset,
}

/// Map a key press to an action.
pub fn parse_key_event(event: KeyEvent) -> Action {
    match event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('t') | KeyCode::Char('T') => Action::ToggleEffect,
        KeyCode::Up => Action::RotationUp,
        KeyCode::Down => Action::RotationDown,
        KeyCode::Right => Action::BounceUp,
        KeyCode::Left => Action::BounceDown,
        KeyCode::Char('r') | KeyCode::Char('R') => Action::Reset,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_parse_quit() {
        assert_eq!(parse_key_event(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(parse_key_event(key(KeyCode::Esc)), Action::Quit);
    }

    #[test]
    fn test_parse_toggle() {
        assert_eq!(parse_key_event(key(KeyCode::Char('t'))), Action::ToggleEffect);
        assert_eq!(parse_key_event(key(KeyCode::Char('T'))), Action::ToggleEffect);
    }

    #[test]
    fn test_parse_rotation_keys() {
        assert_eq!(parse_key_event(key(KeyCode::Up)), Action::RotationUp);
        assert_eq!(parse_key_event(key(KeyCode::Down)), Action::RotationDown);
    }

    #[test]
    fn test_parse_bounce_keys() {
        assert_eq!(parse_key_event(key(KeyCode::Right)), Action::BounceUp);
        assert_eq!(parse_key_event(key(KeyCode::Left)), Action::BounceDown);
    }

    #[test]
    fn test_parse_reset() {
        assert_eq!(parse_key_event(key(KeyCode::Char('r'))), Action::Reset);
    }

    #[test]
    fn test_parse_unmapped_key() {
        assert_eq!(parse_key_event(key(KeyCode::Char('x'))), Action::None);
    }
}
