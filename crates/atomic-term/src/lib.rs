//! **atomic-term** — Crossterm frontend for the atomic engine.
//!
//! Renders the handheld's 16-bit framebuffer as Unicode half blocks and
//! maps the keyboard onto the nine-button pad, so games written against
//! [`atomic_core`] run unchanged in a terminal.

mod input;
mod renderer;

pub use input::TermPad;
pub use renderer::{DEFAULT_SCALE, TermSurface};

use std::io;

use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{self, ClearType},
};

use atomic_core::Console;

/// Owns the terminal session: raw mode, the alternate screen, and the
/// surface/pad pair games draw and read through.
pub struct TermConsole {
    surface: TermSurface,
    pad: TermPad,
    enhanced_keys: bool,
}

impl TermConsole {
    /// Create a console for a `width x height` pixel display.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            surface: TermSurface::new(width, height),
            pad: TermPad::new(),
            enhanced_keys: false,
        }
    }

    /// Configure how many pixels one cell column covers.
    pub fn with_scale(mut self, scale: usize) -> Self {
        self.surface = self.surface.with_scale(scale);
        self
    }

    /// Put the terminal into raw alternate-screen mode.
    ///
    /// Terminals speaking the keyboard enhancement protocol report real
    /// key releases; elsewhere the pad falls back to hold decay.
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        self.enhanced_keys = terminal::supports_keyboard_enhancement().unwrap_or(false)
            && execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .is_ok();
        self.pad.set_release_events(self.enhanced_keys);
        if !self.enhanced_keys {
            log::info!("terminal reports no key releases, holds decay on a timer");
        }
        let (need_w, need_h) = self.surface.cell_size();
        if let Ok((cols, rows)) = terminal::size() {
            if (cols as usize) < need_w || (rows as usize) < need_h {
                log::warn!("terminal is {cols}x{rows} cells, display needs {need_w}x{need_h}");
            }
        }
        Ok(())
    }

    /// Borrow the surface and pad as a [`Console`] for one game run.
    pub fn console(&mut self) -> Console<'_> {
        Console::new(&mut self.surface, &mut self.pad)
    }

    /// Restore the terminal. Failures are ignored so teardown always runs
    /// to the end.
    pub fn close(&mut self) {
        let mut stdout = io::stdout();
        if self.enhanced_keys {
            let _ = execute!(stdout, PopKeyboardEnhancementFlags);
            self.enhanced_keys = false;
        }
        let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
