//! Scenes and ball physics.

use std::error::Error;
use std::path::Path;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use atomic_assets::GameInfo;
use atomic_core::{Button, ButtonPad, Console, Font, Rgb565, Surface, draw_text};
use atomic_session::FramePacer;

use crate::modes::{MODE_SELECT, Mode};

const BLACK: Rgb565 = Rgb565::from_rgb(0, 0, 0);
const WHITE: Rgb565 = Rgb565::from_rgb(255, 255, 255);

/// Square playfield edge in pixels.
const FIELD: i32 = 240;

// ---------------------------------------------------------------------------
// Bodies
// ---------------------------------------------------------------------------

/// A square body. `x, y` is the on-screen centre; `sx, sy` accumulate
/// subpixel motion so speeds below one pixel per frame still move.
struct Body {
    x: i32,
    y: i32,
    rx: i32,
    ry: i32,
    dx: f32,
    dy: f32,
    sx: f32,
    sy: f32,
}

impl Body {
    fn new(x: i32, y: i32, rx: i32, ry: i32, dx: f32, dy: f32) -> Self {
        Self { x, y, rx, ry, dx, dy, sx: x as f32, sy: y as f32 }
    }

    fn step(&mut self) {
        self.sx += self.dx;
        self.sy += self.dy;
        self.x = self.sx as i32;
        self.y = self.sy as i32;
    }
}

fn draw_body(screen: &mut dyn Surface, body: &Body, color: Rgb565) {
    screen.fill_rect(
        body.x - body.rx,
        body.y - body.ry,
        body.rx * 2,
        body.ry * 2,
        color,
    );
}

// ---------------------------------------------------------------------------
// Rounds
// ---------------------------------------------------------------------------

/// One game in progress.
struct Round {
    mode: Mode,
    ball: Body,
    paddle: Body,
    points: u32,
}

impl Round {
    fn new(mode: Mode, rng: &mut SmallRng) -> Self {
        let speed = mode.ball_speed;
        let dx = if rng.random::<bool>() { speed } else { -speed };
        let dy = if rng.random::<bool>() { speed } else { -speed };
        let ball = Body::new(
            rng.random_range(40..=200),
            40,
            mode.ball_size,
            mode.ball_size,
            dx,
            dy,
        );
        let paddle = Body::new(120, 200, mode.paddle_size, mode.ball_size, 0.0, 0.0);
        Self { mode, ball, paddle, points: 0 }
    }

    /// Left or Right steers the paddle; both (or neither) stops it.
    fn steer(&mut self, pad: &dyn ButtonPad) {
        let left = pad.pressed(Button::Left);
        let right = pad.pressed(Button::Right);
        self.paddle.dx = if left != right {
            if left { -self.mode.paddle_speed } else { self.mode.paddle_speed }
        } else {
            0.0
        };
    }

    /// Advance one simulation step. True when the ball reached the floor.
    ///
    /// Death is checked after moving and before wall reflection, so the
    /// bottom wall kills instead of bouncing.
    fn advance(&mut self) -> bool {
        self.ball.step();
        self.paddle.step();
        let over = self.ball.y >= FIELD - self.ball.ry;
        self.bounce();
        self.points += self.paddle_collision();
        over
    }

    fn bounce(&mut self) {
        let b = &mut self.ball;
        if b.x <= b.rx || b.x >= FIELD - b.rx {
            b.dx = -b.dx;
        }
        if b.y <= b.ry || b.y >= FIELD - b.ry {
            b.dy = -b.dy;
        }
        let p = &mut self.paddle;
        if p.sx < p.rx as f32 {
            p.sx = p.rx as f32;
            p.x = p.rx;
        } else if p.sx > (FIELD - p.rx) as f32 {
            p.sx = (FIELD - p.rx) as f32;
            p.x = FIELD - p.rx;
        }
    }

    /// Reflect the ball off the paddle's top edge and speed everything up.
    fn paddle_collision(&mut self) -> u32 {
        let b = &mut self.ball;
        let p = &self.paddle;
        let hit = b.dy > 0.0
            && (b.x - p.x).abs() < b.rx + p.rx
            && b.y + b.ry >= p.y - p.ry
            && b.y - b.ry <= p.y - p.ry;
        if !hit {
            return 0;
        }
        let sign = if b.dx >= 0.0 { 1.0 } else { -1.0 };
        b.dx += self.mode.ball_speed_increase * sign;
        b.dy = -(b.dy + self.mode.ball_speed_increase).abs();
        self.mode.paddle_speed += self.mode.paddle_speed_increase;
        self.mode.score_increase
    }
}

// ---------------------------------------------------------------------------
// Scenes
// ---------------------------------------------------------------------------

enum Scene {
    Start,
    Main(Round),
    GameOver { points: u32, mode: Mode },
}

fn start_frame(con: &mut Console<'_>, version: &str, rng: &mut SmallRng) -> Scene {
    draw_text(con.screen, Font::LARGE, "PicoPong", 120, 108, WHITE, Some(BLACK), 0.5, 0.5);
    draw_text(con.screen, Font::SMALL, "Press A to Start", 120, 144, WHITE, Some(BLACK), 0.5, 0.5);
    draw_text(con.screen, Font::SMALL, version, 4, 2, WHITE, Some(BLACK), 0.0, 0.0);
    for (button, mode) in MODE_SELECT {
        if con.pad.pressed(button) {
            log::debug!("starting a {} round", mode.name);
            let round = Round::new(mode, rng);
            con.wait_release(button);
            con.screen.fill(BLACK);
            return Scene::Main(round);
        }
    }
    Scene::Start
}

fn main_frame(con: &mut Console<'_>, mut round: Round) -> Scene {
    round.steer(con.pad);
    draw_body(con.screen, &round.ball, BLACK);
    draw_body(con.screen, &round.paddle, BLACK);
    let over = round.advance();
    draw_body(con.screen, &round.ball, WHITE);
    draw_body(con.screen, &round.paddle, WHITE);
    draw_text(
        con.screen,
        Font::SMALL,
        &round.points.to_string(),
        4,
        2,
        WHITE,
        Some(BLACK),
        0.0,
        0.0,
    );
    if over {
        con.screen.fill(BLACK);
        return Scene::GameOver { points: round.points, mode: round.mode };
    }
    Scene::Main(round)
}

fn game_over_frame(con: &mut Console<'_>, points: u32, mode: Mode) -> Scene {
    draw_text(con.screen, Font::LARGE, "GAME OVER", 120, 80, WHITE, Some(BLACK), 0.5, 0.5);
    draw_text(con.screen, Font::LARGE, "Score", 120, 124, WHITE, Some(BLACK), 0.5, 0.5);
    draw_text(con.screen, Font::LARGE, &points.to_string(), 120, 160, WHITE, Some(BLACK), 0.5, 0.5);
    let label = format!("{} mode", mode.name);
    draw_text(con.screen, Font::SMALL, &label, 120, 238, WHITE, Some(BLACK), 0.5, 1.0);
    for (button, _) in MODE_SELECT {
        if con.pad.pressed(button) {
            con.wait_release(button);
            con.screen.fill(BLACK);
            return Scene::Start;
        }
    }
    Scene::GameOver { points, mode }
}

pub(crate) fn run(con: &mut Console<'_>, dir: &Path) -> Result<(), Box<dyn Error>> {
    let version = GameInfo::load(dir)
        .map(|info| format!("v{}", info.version))
        .unwrap_or_default();
    let mut rng = SmallRng::from_os_rng();
    let mut pacer = FramePacer::new(60);
    let mut scene = Scene::Start;

    con.screen.fill(BLACK);
    loop {
        pacer.start_frame();
        con.pad.poll();
        if con.pad.quit_requested() {
            return Ok(());
        }
        scene = match scene {
            Scene::Start => start_frame(con, &version, &mut rng),
            Scene::Main(round) => main_frame(con, round),
            Scene::GameOver { points, mode } => game_over_frame(con, points, mode),
        };
        con.screen.present()?;
        pacer.finish_frame();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_with(ball: Body, mode: Mode) -> Round {
        let paddle = Body::new(120, 200, mode.paddle_size, mode.ball_size, 0.0, 0.0);
        Round { mode, ball, paddle, points: 0 }
    }

    #[test]
    fn subpixel_motion_truncates_toward_zero() {
        let mut body = Body::new(0, 0, 4, 4, 0.6, -0.6);
        body.step();
        assert_eq!((body.x, body.y), (0, 0));
        body.step();
        assert_eq!((body.x, body.y), (1, -1));
    }

    #[test]
    fn floor_contact_ends_the_round() {
        let ball = Body::new(120, 230, 4, 4, 0.0, 3.0);
        let mut round = round_with(ball, Mode::NORMAL);
        assert!(!round.advance());
        assert!(round.advance());
    }

    #[test]
    fn side_walls_reflect_the_ball() {
        let ball = Body::new(6, 120, 4, 4, -2.0, 0.0);
        let mut round = round_with(ball, Mode::NORMAL);
        round.advance();
        assert!(round.ball.dx > 0.0);
    }

    #[test]
    fn paddle_hit_reflects_scores_and_speeds_up() {
        let ball = Body::new(120, 193, 4, 4, 1.0, 1.0);
        let mut round = round_with(ball, Mode::NORMAL);
        let scored = round.paddle_collision();
        assert_eq!(scored, 10);
        assert!((round.ball.dx - 1.1).abs() < 1e-6);
        assert!((round.ball.dy - -1.1).abs() < 1e-6);
        assert!((round.mode.paddle_speed - 2.05).abs() < 1e-6);
    }

    #[test]
    fn ball_above_or_rising_does_not_score() {
        let rising = Body::new(120, 193, 4, 4, 1.0, -1.0);
        let mut round = round_with(rising, Mode::NORMAL);
        assert_eq!(round.paddle_collision(), 0);

        let high = Body::new(120, 100, 4, 4, 1.0, 1.0);
        let mut round = round_with(high, Mode::NORMAL);
        assert_eq!(round.paddle_collision(), 0);
    }

    #[test]
    fn paddle_stops_at_the_walls() {
        let mut round = round_with(Body::new(120, 40, 4, 4, 0.0, 0.0), Mode::NORMAL);
        round.paddle.sx = 250.0;
        round.bounce();
        assert_eq!(round.paddle.x, 220);
        round.paddle.sx = 3.0;
        round.bounce();
        assert_eq!(round.paddle.x, 20);
    }

    #[test]
    fn difficulty_table_matches_the_labels() {
        assert_eq!(Mode::INSANE.paddle_size, 12);
        assert_eq!(Mode::INSANE.score_increase, 30);
        assert_eq!(Mode::ENDURANCE.score_increase, 5);
        assert!((Mode::HARD.ball_speed - 1.5).abs() < 1e-6);
    }
}
