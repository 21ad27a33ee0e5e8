//! Translates crossterm key events into button levels.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use atomic_core::{Button, ButtonPad};

/// How long a key counts as held after its last press or repeat event,
/// on terminals that never report releases.
const KEY_DECAY: Duration = Duration::from_millis(400);

/// Maps a key code to the button it drives.
pub(crate) fn button_for(code: KeyCode) -> Option<Button> {
    match code {
        KeyCode::Up => Some(Button::Up),
        KeyCode::Down => Some(Button::Down),
        KeyCode::Left => Some(Button::Left),
        KeyCode::Right => Some(Button::Right),
        KeyCode::Enter => Some(Button::Center),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'a' => Some(Button::A),
            'b' => Some(Button::B),
            'x' => Some(Button::X),
            'y' => Some(Button::Y),
            _ => None,
        },
        _ => None,
    }
}

const fn idx(button: Button) -> usize {
    match button {
        Button::Up => 0,
        Button::Down => 1,
        Button::Left => 2,
        Button::Right => 3,
        Button::Center => 4,
        Button::A => 5,
        Button::B => 6,
        Button::X => 7,
        Button::Y => 8,
    }
}

/// Keyboard-backed [`ButtonPad`].
///
/// With keyboard enhancement available the terminal reports real release
/// events and levels track the keyboard exactly. Without it, a pressed
/// key stays held until no press or repeat has arrived for the decay
/// window, so a held arrow drops out briefly before auto-repeat kicks in.
pub struct TermPad {
    held: [bool; 9],
    seen: [Option<Instant>; 9],
    release_events: bool,
    decay: Duration,
    quit: bool,
}

impl TermPad {
    pub(crate) fn new() -> Self {
        Self {
            held: [false; 9],
            seen: [None; 9],
            release_events: false,
            decay: KEY_DECAY,
            quit: false,
        }
    }

    pub(crate) fn set_release_events(&mut self, available: bool) {
        self.release_events = available;
    }

    #[cfg(test)]
    fn set_decay(&mut self, decay: Duration) {
        self.decay = decay;
    }

    pub(crate) fn handle_event(&mut self, ev: &Event) {
        let Event::Key(KeyEvent { code, modifiers, kind, .. }) = ev else {
            return;
        };
        if matches!(kind, KeyEventKind::Press) {
            let ctrl_c =
                *code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL);
            if ctrl_c || *code == KeyCode::Esc || *code == KeyCode::Char('q') {
                self.quit = true;
                return;
            }
        }
        let Some(button) = button_for(*code) else {
            return;
        };
        let i = idx(button);
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.held[i] = true;
                self.seen[i] = Some(Instant::now());
            }
            KeyEventKind::Release => {
                self.held[i] = false;
                self.seen[i] = None;
            }
        }
    }

    fn decay_stale(&mut self) {
        for i in 0..9 {
            if self.held[i] {
                let stale = self.seen[i].is_none_or(|at| at.elapsed() > self.decay);
                if stale {
                    self.held[i] = false;
                    self.seen[i] = None;
                }
            }
        }
    }
}

impl ButtonPad for TermPad {
    fn poll(&mut self) {
        while let Ok(true) = event::poll(Duration::ZERO) {
            match event::read() {
                Ok(ev) => self.handle_event(&ev),
                Err(err) => {
                    log::debug!("dropping terminal event: {err}");
                    break;
                }
            }
        }
        if !self.release_events {
            self.decay_stale();
        }
    }

    fn read(&self, button: Button) -> bool {
        // Raw lines are active-low.
        !self.held[idx(button)]
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press))
    }

    fn release(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release))
    }

    #[test]
    fn keys_map_to_buttons() {
        assert_eq!(button_for(KeyCode::Up), Some(Button::Up));
        assert_eq!(button_for(KeyCode::Enter), Some(Button::Center));
        assert_eq!(button_for(KeyCode::Char('a')), Some(Button::A));
        assert_eq!(button_for(KeyCode::Char('Y')), Some(Button::Y));
        assert_eq!(button_for(KeyCode::Char('z')), None);
        assert_eq!(button_for(KeyCode::Tab), None);
    }

    #[test]
    fn press_and_release_track_levels() {
        let mut pad = TermPad::new();
        pad.set_release_events(true);
        assert!(!pad.pressed(Button::A));

        pad.handle_event(&press(KeyCode::Char('a')));
        assert!(pad.pressed(Button::A));
        assert!(!pad.read(Button::A));

        pad.handle_event(&release(KeyCode::Char('a')));
        assert!(!pad.pressed(Button::A));
    }

    #[test]
    fn esc_and_q_request_quit() {
        let mut pad = TermPad::new();
        pad.handle_event(&press(KeyCode::Esc));
        assert!(pad.quit_requested());

        let mut pad = TermPad::new();
        pad.handle_event(&press(KeyCode::Char('q')));
        assert!(pad.quit_requested());

        let mut pad = TermPad::new();
        pad.handle_event(&Event::Key(KeyEvent::new_with_kind(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            KeyEventKind::Press,
        )));
        assert!(pad.quit_requested());
    }

    #[test]
    fn held_keys_decay_without_release_events() {
        let mut pad = TermPad::new();
        pad.set_decay(Duration::from_millis(5));
        pad.handle_event(&press(KeyCode::Right));
        assert!(pad.pressed(Button::Right));

        thread::sleep(Duration::from_millis(10));
        pad.decay_stale();
        assert!(!pad.pressed(Button::Right));
    }

    #[test]
    fn repeat_refreshes_the_hold() {
        let mut pad = TermPad::new();
        pad.set_decay(Duration::from_millis(150));
        pad.handle_event(&press(KeyCode::Right));
        thread::sleep(Duration::from_millis(100));
        pad.handle_event(&Event::Key(KeyEvent::new_with_kind(
            KeyCode::Right,
            KeyModifiers::NONE,
            KeyEventKind::Repeat,
        )));
        thread::sleep(Duration::from_millis(100));
        pad.decay_stale();
        assert!(pad.pressed(Button::Right), "repeat should have refreshed the hold");
    }
}
