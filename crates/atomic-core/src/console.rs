//! The session context handed to a running game.

use std::error::Error;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use crate::input::{Button, ButtonPad};
use crate::surface::Surface;

/// Poll granularity for the blocking helpers.
const SLICE: Duration = Duration::from_millis(10);

/// The console a game runs on: one screen, one pad.
///
/// The launcher builds this from the active frontend and lends it to each
/// game for the duration of a session. Everything a game touches goes
/// through here; there is no process-wide display or input state.
pub struct Console<'a> {
    pub screen: &'a mut dyn Surface,
    pub pad: &'a mut dyn ButtonPad,
}

impl<'a> Console<'a> {
    pub fn new(screen: &'a mut dyn Surface, pad: &'a mut dyn ButtonPad) -> Self {
        Self { screen, pad }
    }

    /// Sleep for `dur`, pumping input in short slices so the pad keeps up
    /// while the game idles.
    pub fn delay(&mut self, dur: Duration) {
        let end = Instant::now() + dur;
        loop {
            self.pad.poll();
            let now = Instant::now();
            if now >= end {
                break;
            }
            thread::sleep((end - now).min(SLICE));
        }
    }

    /// Block until `button` is no longer held (or a quit is requested).
    pub fn wait_release(&mut self, button: Button) {
        loop {
            self.pad.poll();
            if self.pad.quit_requested() || !self.pad.pressed(button) {
                break;
            }
            thread::sleep(SLICE);
        }
    }

    /// Block until one of `buttons` is pressed and return it.
    ///
    /// Returns `None` when a quit is requested instead; callers unwind to
    /// the launcher.
    pub fn wait_any(&mut self, buttons: &[Button]) -> Option<Button> {
        loop {
            self.pad.poll();
            if self.pad.quit_requested() {
                return None;
            }
            for &b in buttons {
                if self.pad.pressed(b) {
                    return Some(b);
                }
            }
            thread::sleep(SLICE);
        }
    }
}

/// A bootable game.
///
/// `dir` is the game's library directory (metadata and assets live there).
/// A session ends by returning; the launcher then drops the game value, so
/// nothing survives between plays.
pub trait Game {
    fn run(&mut self, con: &mut Console<'_>, dir: &Path) -> Result<(), Box<dyn Error>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::BufferSurface;

    /// A pad whose button goes down at a scripted poll count.
    struct ScriptPad {
        polls: usize,
        press_at: usize,
        button: Button,
        quit_at: Option<usize>,
    }

    impl ButtonPad for ScriptPad {
        fn poll(&mut self) {
            self.polls += 1;
        }

        fn read(&self, button: Button) -> bool {
            !(button == self.button && self.polls >= self.press_at)
        }

        fn quit_requested(&self) -> bool {
            self.quit_at.is_some_and(|at| self.polls >= at)
        }
    }

    #[test]
    fn delay_pumps_the_pad() {
        let mut screen = BufferSurface::new(4, 4);
        let mut pad = ScriptPad { polls: 0, press_at: usize::MAX, button: Button::A, quit_at: None };
        let mut con = Console::new(&mut screen, &mut pad);
        con.delay(Duration::from_millis(30));
        assert!(pad.polls >= 2);
    }

    #[test]
    fn wait_any_returns_the_pressed_button() {
        let mut screen = BufferSurface::new(4, 4);
        let mut pad = ScriptPad { polls: 0, press_at: 3, button: Button::X, quit_at: None };
        let mut con = Console::new(&mut screen, &mut pad);
        assert_eq!(con.wait_any(&[Button::A, Button::X]), Some(Button::X));
    }

    #[test]
    fn wait_any_yields_none_on_quit() {
        let mut screen = BufferSurface::new(4, 4);
        let mut pad =
            ScriptPad { polls: 0, press_at: usize::MAX, button: Button::A, quit_at: Some(2) };
        let mut con = Console::new(&mut screen, &mut pad);
        assert_eq!(con.wait_any(&[Button::A]), None);
    }

    #[test]
    fn wait_release_returns_once_level_clears() {
        struct ReleasePad {
            polls: usize,
        }
        impl ButtonPad for ReleasePad {
            fn poll(&mut self) {
                self.polls += 1;
            }
            fn read(&self, _button: Button) -> bool {
                self.polls >= 3
            }
        }
        let mut screen = BufferSurface::new(4, 4);
        let mut pad = ReleasePad { polls: 0 };
        let mut con = Console::new(&mut screen, &mut pad);
        con.wait_release(Button::B);
        assert!(pad.polls >= 3);
    }
}
