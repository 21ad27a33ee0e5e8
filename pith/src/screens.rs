//! Boot and failure screens.

use std::io;
use std::time::Duration;

use atomic_core::{Button, Console, Font, Rgb565, draw_text};

const BLACK: Rgb565 = Rgb565::from_rgb(0, 0, 0);
const WHITE: Rgb565 = Rgb565::from_rgb(255, 255, 255);

/// Launcher release tag shown on the boot screen.
const VERSION_TAG: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Splash shown once at power-on.
pub fn title_screen(con: &mut Console<'_>) -> io::Result<()> {
    con.screen.fill(WHITE);
    draw_text(con.screen, Font::LARGE, "PithOS", 120, 120, BLACK, Some(WHITE), 0.5, 0.5);
    draw_text(con.screen, Font::SMALL, VERSION_TAG, 8, 5, BLACK, Some(WHITE), 0.0, 0.0);
    draw_text(con.screen, Font::SMALL, "by Henry Gurney", 120, 235, BLACK, Some(WHITE), 0.5, 1.0);
    con.screen.present()?;
    con.delay(Duration::from_secs(2));
    Ok(())
}

/// Shown when a game dies. Any button returns to the menu.
pub fn error_screen(con: &mut Console<'_>, detail: &str) -> io::Result<()> {
    let detail: String = detail.chars().take(240).collect();
    con.screen.fill(WHITE);
    draw_text(con.screen, Font::SMALL, "Error:", 120, 100, BLACK, Some(WHITE), 0.5, 0.0);
    draw_text(con.screen, Font::SMALL, &detail, 120, 116, BLACK, Some(WHITE), 0.5, 0.0);
    con.screen.present()?;
    let _ = con.wait_any(&Button::ALL);
    Ok(())
}
