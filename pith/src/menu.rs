//! The game-select menu.

use std::io;
use std::thread;
use std::time::Duration;

use atomic_core::{Button, ButtonPad, Font, Rgb565, Surface, draw_text, wrap_text};
use atomic_session::PressGate;

use crate::catalog::GameEntry;
use crate::version::version_at_least;

const BLACK: Rgb565 = Rgb565::from_rgb(0, 0, 0);
const WHITE: Rgb565 = Rgb565::from_rgb(255, 255, 255);
const GREY: Rgb565 = Rgb565::from_rgb(215, 215, 215);

const BOX_W: i32 = 224;
const BOX_H: i32 = 96;
const LEFT_X: i32 = 8;
const START_Y: i32 = 16;
const PADDING_Y: i32 = 16;
const MAX_VISIBLE: usize = 2;
const TITLE_OFFSET: i32 = 8;
const DESC_OFFSET: i32 = 44;

/// Characters per description line.
const DESC_COLS: usize = 26;

/// What the menu resolved to.
#[derive(Debug, PartialEq, Eq)]
pub enum MenuChoice {
    /// Index into the entry list passed to [`run_menu`].
    Launch(usize),
    Quit,
}

/// Paint the visible window of the catalog.
pub fn draw_menu(screen: &mut dyn Surface, games: &[GameEntry], sel: usize, scroll: usize) {
    screen.fill(WHITE);
    if games.is_empty() {
        draw_text(
            screen,
            Font::SMALL,
            "No games installed",
            120,
            120,
            BLACK,
            Some(WHITE),
            0.5,
            0.5,
        );
        return;
    }

    let mut y = START_Y;
    for (idx, entry) in games.iter().enumerate().skip(scroll).take(MAX_VISIBLE) {
        let highlighted = idx == sel;
        let bg = if highlighted { GREY } else { WHITE };

        if highlighted {
            screen.fill_rect(LEFT_X, y, BOX_W, BOX_H, GREY);
        }
        screen.rect(LEFT_X, y, BOX_W, BOX_H, BLACK);

        let title: String = entry.title.chars().take(12).collect();
        draw_text(screen, Font::LARGE, &title, 120, y + TITLE_OFFSET, BLACK, Some(bg), 0.5, 0.0);

        if !version_at_least(atomic_core::VERSION, &entry.req_atomic) {
            let req = format!("Requires Atomic v{}", entry.req_atomic);
            let have = format!("Installed: v{}", atomic_core::VERSION);
            draw_text(screen, Font::SMALL, &req, 120, y + DESC_OFFSET, BLACK, Some(bg), 0.5, 0.0);
            draw_text(
                screen,
                Font::SMALL,
                &have,
                120,
                y + DESC_OFFSET + 16,
                BLACK,
                Some(bg),
                0.5,
                0.0,
            );
        } else {
            for (row, line) in wrap_text(&entry.description, DESC_COLS).iter().take(2).enumerate() {
                draw_text(
                    screen,
                    Font::SMALL,
                    line,
                    120,
                    y + DESC_OFFSET + row as i32 * 16,
                    BLACK,
                    Some(bg),
                    0.5,
                    0.0,
                );
            }
        }

        if !entry.version.is_empty() {
            let tag = format!("v{}", entry.version);
            draw_text(screen, Font::SMALL, &tag, LEFT_X + 6, y + BOX_H - 3, BLACK, Some(bg), 0.0, 1.0);
        }
        draw_text(
            screen,
            Font::SMALL,
            "MAIN",
            (240 - LEFT_X) - 6,
            y + BOX_H - 3,
            BLACK,
            Some(bg),
            1.0,
            1.0,
        );

        y += BOX_H + PADDING_Y;
    }
}

/// Keep the selection inside the visible window.
fn adjust_scroll(sel: usize, scroll: usize) -> usize {
    if sel < scroll {
        sel
    } else if sel >= scroll + MAX_VISIBLE {
        sel - MAX_VISIBLE + 1
    } else {
        scroll
    }
}

/// Drive the menu until a game is picked or the session ends.
///
/// Up and Down move the selection with wrap-around, A launches. Movement
/// is edge-triggered and rate-limited, so holding a key does not spin
/// through the list.
pub fn run_menu(
    screen: &mut dyn Surface,
    pad: &mut dyn ButtonPad,
    games: &[GameEntry],
) -> io::Result<MenuChoice> {
    let mut sel = 0usize;
    let mut scroll = 0usize;
    let mut gate = PressGate::default();
    let (mut prev_up, mut prev_down, mut prev_a) = (false, false, false);

    draw_menu(screen, games, sel, scroll);
    screen.present()?;

    loop {
        pad.poll();
        if pad.quit_requested() {
            return Ok(MenuChoice::Quit);
        }

        let up = pad.pressed(Button::Up);
        let down = pad.pressed(Button::Down);
        let a = pad.pressed(Button::A);

        let mut moved = false;
        if !games.is_empty() {
            if down {
                if !prev_down && gate.try_press(Button::Down) {
                    sel = (sel + 1) % games.len();
                    moved = true;
                }
            } else if up {
                if !prev_up && gate.try_press(Button::Up) {
                    sel = (sel + games.len() - 1) % games.len();
                    moved = true;
                }
            } else if a && !prev_a && gate.try_press(Button::A) {
                return Ok(MenuChoice::Launch(sel));
            }
        }

        prev_up = up;
        prev_down = down;
        prev_a = a;

        if moved {
            scroll = adjust_scroll(sel, scroll);
            draw_menu(screen, games, sel, scroll);
            screen.present()?;
        }

        thread::sleep(Duration::from_millis(10));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atomic_core::BufferSurface;

    fn entry(title: &str) -> GameEntry {
        GameEntry {
            slug: title.to_lowercase(),
            title: title.to_string(),
            description: "A little game".to_string(),
            version: "1.0".to_string(),
            req_atomic: String::new(),
            priority: 1,
        }
    }

    /// Replays a per-poll script of held buttons.
    struct ScriptPad {
        frames: Vec<Vec<Button>>,
        step: usize,
        quit_at: Option<usize>,
    }

    impl ScriptPad {
        fn new(frames: Vec<Vec<Button>>) -> Self {
            Self { frames, step: 0, quit_at: None }
        }

        fn held(&self) -> &[Button] {
            self.frames
                .get(self.step.saturating_sub(1))
                .map(Vec::as_slice)
                .unwrap_or(&[])
        }
    }

    impl ButtonPad for ScriptPad {
        fn poll(&mut self) {
            self.step += 1;
        }

        fn read(&self, button: Button) -> bool {
            !self.held().contains(&button)
        }

        fn quit_requested(&self) -> bool {
            self.quit_at.is_some_and(|at| self.step >= at)
        }
    }

    #[test]
    fn scroll_follows_the_selection() {
        assert_eq!(adjust_scroll(0, 0), 0);
        assert_eq!(adjust_scroll(1, 0), 0);
        assert_eq!(adjust_scroll(2, 0), 1);
        assert_eq!(adjust_scroll(3, 1), 2);
        assert_eq!(adjust_scroll(0, 1), 0);
    }

    #[test]
    fn down_then_a_launches_the_second_game() {
        let games = vec![entry("First"), entry("Second"), entry("Third")];
        let mut screen = BufferSurface::new(240, 240);
        let mut pad = ScriptPad::new(vec![
            vec![],
            vec![Button::Down],
            vec![Button::Down],
            vec![],
            vec![Button::A],
        ]);
        let choice = run_menu(&mut screen, &mut pad, &games).unwrap();
        assert_eq!(choice, MenuChoice::Launch(1));
    }

    #[test]
    fn up_from_the_top_wraps_to_the_last_game() {
        let games = vec![entry("First"), entry("Second"), entry("Third")];
        let mut screen = BufferSurface::new(240, 240);
        let mut pad = ScriptPad::new(vec![vec![Button::Up], vec![], vec![Button::A]]);
        let choice = run_menu(&mut screen, &mut pad, &games).unwrap();
        assert_eq!(choice, MenuChoice::Launch(2));
    }

    #[test]
    fn holding_down_moves_once() {
        let games = vec![entry("First"), entry("Second"), entry("Third")];
        let mut screen = BufferSurface::new(240, 240);
        let mut pad = ScriptPad::new(vec![
            vec![Button::Down],
            vec![Button::Down],
            vec![Button::Down],
            vec![],
            vec![Button::A],
        ]);
        let choice = run_menu(&mut screen, &mut pad, &games).unwrap();
        assert_eq!(choice, MenuChoice::Launch(1));
    }

    #[test]
    fn quit_wins_even_with_no_games() {
        let mut screen = BufferSurface::new(240, 240);
        let mut pad = ScriptPad::new(vec![vec![Button::A]; 4]);
        pad.quit_at = Some(3);
        let choice = run_menu(&mut screen, &mut pad, &[]).unwrap();
        assert_eq!(choice, MenuChoice::Quit);
    }

    #[test]
    fn menu_paints_highlight_and_outline() {
        let games = vec![entry("First"), entry("Second")];
        let mut screen = BufferSurface::new(240, 240);
        draw_menu(&mut screen, &games, 0, 0);
        // Selected box interior is grey, the second box stays white.
        assert_eq!(screen.read_pixel(20, 30), GREY);
        assert_eq!(screen.read_pixel(20, 140), WHITE);
        // Both carry the black outline.
        assert_eq!(screen.read_pixel(8, 16), BLACK);
        assert_eq!(screen.read_pixel(8, 128), BLACK);
    }
}
