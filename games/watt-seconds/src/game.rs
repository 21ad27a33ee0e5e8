//! The session loop: title, story, then the grind.

use std::error::Error;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use atomic_assets::GameInfo;
use atomic_core::{Button, Console};
use atomic_session::{FramePacer, PressGate};

use crate::state::{Screen, State};
use crate::ui::{self, StatsBar};

const FPS: u32 = 60;

/// Re-arm delay for A on the generator screen, crank included.
const BUY_DELAY: Duration = Duration::from_millis(500);

pub fn run(con: &mut Console<'_>, dir: &Path) -> Result<(), Box<dyn Error>> {
    let version = GameInfo::load(dir).map(|info| format!("v{}", info.version)).unwrap_or_default();

    ui::draw_title(con.screen, &version);
    con.screen.present()?;
    if !wait_for(con, Button::A) {
        return Ok(());
    }

    ui::draw_story(con.screen);
    con.screen.present()?;
    if !wait_for(con, Button::A) {
        return Ok(());
    }

    play(con)?;
    Ok(())
}

/// Block until `button` is pressed and released again. Returns false
/// when the player quit instead.
fn wait_for(con: &mut Console<'_>, button: Button) -> bool {
    if con.wait_any(&[button]).is_none() {
        return false;
    }
    con.wait_release(button);
    !con.pad.quit_requested()
}

fn play(con: &mut Console<'_>) -> io::Result<()> {
    let mut state = State::new();
    let mut bar = StatsBar::default();
    let mut pacer = FramePacer::new(FPS);
    let mut nav_gate = PressGate::default();
    let mut buy_gate = PressGate::new(BUY_DELAY);
    let mut last_tick = Instant::now();

    ui::draw_screen(con.screen, &state, &mut bar);
    con.screen.present()?;

    loop {
        pacer.start_frame();
        con.pad.poll();
        if con.pad.quit_requested() {
            return Ok(());
        }

        let dt = last_tick.elapsed().as_secs_f64();
        last_tick = Instant::now();
        // The prestige shop is outside time; everywhere else the plant
        // keeps selling.
        if state.screen != Screen::Prestige {
            state.earn(dt);
        }

        let mut repaint = false;
        for button in [Button::Up, Button::Down, Button::Left, Button::Right, Button::A, Button::X] {
            if !con.pad.pressed(button) {
                continue;
            }
            let gate = if button == Button::A && state.screen == Screen::Generators {
                &mut buy_gate
            } else {
                &mut nav_gate
            };
            if gate.try_press(button) && state.press(button) {
                repaint = true;
            }
        }

        if repaint {
            ui::draw_screen(con.screen, &state, &mut bar);
        }
        match state.screen {
            Screen::Prestige => bar.draw_prestige(con.screen, &state),
            Screen::PrestigeIntro => {}
            _ => bar.draw(con.screen, &state),
        }
        con.screen.present()?;
        pacer.finish_frame();
    }
}
