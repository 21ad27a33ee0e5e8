//! Input debouncing.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use atomic_core::Button;

/// Accepts a press only after a minimum delay since the last accepted
/// press of the same button.
///
/// Menus pair this with edge detection: the edge stops auto-repeat within
/// a hold, the gate stops mechanical bounce and twitch double-presses.
#[derive(Debug)]
pub struct PressGate {
    min_delay: Duration,
    last: HashMap<Button, Instant>,
}

impl PressGate {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(250);

    pub fn new(min_delay: Duration) -> Self {
        Self { min_delay, last: HashMap::new() }
    }

    /// Try to register a press of `button` now. Accepting records the
    /// press time; the first press of each button is always accepted.
    pub fn try_press(&mut self, button: Button) -> bool {
        let now = Instant::now();
        match self.last.get(&button) {
            Some(&at) if now.duration_since(at) < self.min_delay => false,
            _ => {
                self.last.insert(button, now);
                true
            }
        }
    }
}

impl Default for PressGate {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn first_press_is_accepted() {
        let mut gate = PressGate::default();
        assert!(gate.try_press(Button::Down));
    }

    #[test]
    fn rapid_repeat_is_rejected() {
        let mut gate = PressGate::default();
        assert!(gate.try_press(Button::Down));
        assert!(!gate.try_press(Button::Down));
    }

    #[test]
    fn buttons_gate_independently() {
        let mut gate = PressGate::default();
        assert!(gate.try_press(Button::Down));
        assert!(gate.try_press(Button::Up));
        assert!(gate.try_press(Button::A));
    }

    #[test]
    fn presses_pass_again_after_the_delay() {
        let mut gate = PressGate::new(Duration::from_millis(20));
        assert!(gate.try_press(Button::A));
        assert!(!gate.try_press(Button::A));
        thread::sleep(Duration::from_millis(25));
        assert!(gate.try_press(Button::A));
    }
}
