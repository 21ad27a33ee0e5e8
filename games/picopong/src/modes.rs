//! Difficulty presets.

use atomic_core::Button;

/// Tuning for one difficulty. `paddle_speed` is live state during a round:
/// every paddle hit raises it by `paddle_speed_increase`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mode {
    pub name: &'static str,
    pub ball_size: i32,
    pub paddle_size: i32,
    pub ball_speed: f32,
    pub paddle_speed: f32,
    pub ball_speed_increase: f32,
    pub paddle_speed_increase: f32,
    pub score_increase: u32,
}

impl Mode {
    pub const NORMAL: Mode = Mode {
        name: "Normal",
        ball_size: 4,
        paddle_size: 20,
        ball_speed: 1.0,
        paddle_speed: 2.0,
        ball_speed_increase: 0.1,
        paddle_speed_increase: 0.05,
        score_increase: 10,
    };

    pub const HARD: Mode = Mode {
        name: "Hard",
        ball_size: 4,
        paddle_size: 16,
        ball_speed: 1.5,
        paddle_speed: 2.25,
        ball_speed_increase: 0.2,
        paddle_speed_increase: 0.1,
        score_increase: 20,
    };

    pub const INSANE: Mode = Mode {
        name: "Insane",
        ball_size: 4,
        paddle_size: 12,
        ball_speed: 2.0,
        paddle_speed: 2.0,
        ball_speed_increase: 0.2,
        paddle_speed_increase: 0.2,
        score_increase: 30,
    };

    pub const ENDURANCE: Mode = Mode {
        name: "Endurance",
        ball_size: 4,
        paddle_size: 20,
        ball_speed: 2.0,
        paddle_speed: 2.5,
        ball_speed_increase: 0.025,
        paddle_speed_increase: 0.0125,
        score_increase: 5,
    };
}

/// Which face button starts which difficulty.
pub const MODE_SELECT: [(Button, Mode); 4] = [
    (Button::A, Mode::NORMAL),
    (Button::B, Mode::HARD),
    (Button::X, Mode::INSANE),
    (Button::Y, Mode::ENDURANCE),
];
