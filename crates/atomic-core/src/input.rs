//! Button identities and the input collaborator.

/// The nine buttons of the handheld: a D-pad with a centre press and four
/// face buttons.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    Center,
    A,
    B,
    X,
    Y,
}

impl Button {
    /// Every button, D-pad first.
    pub const ALL: [Button; 9] = [
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::Center,
        Button::A,
        Button::B,
        Button::X,
        Button::Y,
    ];
}

/// Convert a raw line level to a pressed flag.
///
/// The button lines are active-low: a held button reads `false`.
#[inline]
pub const fn is_pressed(raw: bool) -> bool {
    !raw
}

/// A source of button levels.
///
/// Implementations are polled cooperatively: [`poll`](ButtonPad::poll) pumps
/// the underlying source once per frame, then [`read`](ButtonPad::read) and
/// [`pressed`](ButtonPad::pressed) report the captured levels.
pub trait ButtonPad {
    /// Pump the underlying source. Call once per frame before reading.
    fn poll(&mut self);

    /// Raw active-low level of `button`: `false` while held.
    fn read(&self, button: Button) -> bool;

    /// Whether `button` is currently held.
    #[inline]
    fn pressed(&self, button: Button) -> bool {
        is_pressed(self.read(button))
    }

    /// Whether the user asked to leave the session entirely.
    ///
    /// The handheld has no such control; frontends that do (a terminal's
    /// Esc) report it here so loops can hand control back.
    fn quit_requested(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_active_low() {
        assert!(is_pressed(false));
        assert!(!is_pressed(true));
    }

    #[test]
    fn all_lists_each_button_once() {
        for (i, a) in Button::ALL.iter().enumerate() {
            for b in &Button::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(Button::ALL.len(), 9);
    }

    #[test]
    fn pad_defaults() {
        struct Stuck;
        impl ButtonPad for Stuck {
            fn poll(&mut self) {}
            fn read(&self, _button: Button) -> bool {
                false
            }
        }
        let pad = Stuck;
        assert!(pad.pressed(Button::A));
        assert!(!pad.quit_requested());
    }
}
