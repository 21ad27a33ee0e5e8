//! Combat and encounter rolls.
//!
//! Everything random funnels through a caller-supplied [`Rng`], so the
//! battle and overworld loops stay deterministic under a seeded generator.

use rand::Rng;

use atomic_session::bell_curve;

use crate::data::{BASE_LEVEL, Element, MoveDef, SPECIES, Species, type_multiplier};
use crate::party::Pico;

/// How a move's element landed against the defender.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Effectiveness {
    Critical,
    Resisted,
    Neutral,
}

impl Effectiveness {
    /// The word battle messages use, or `None` for a plain hit.
    pub fn label(self) -> Option<&'static str> {
        match self {
            Effectiveness::Critical => Some("critical"),
            Effectiveness::Resisted => Some("resisted"),
            Effectiveness::Neutral => None,
        }
    }
}

/// Roll damage for one use of `mv`.
///
/// Base power scales with the attacker's level, the element chart, and
/// two stacked swing rolls in `0.9..1.111`, truncated to whole points.
pub fn roll_damage(
    rng: &mut impl Rng,
    attacker: &Pico,
    defender: &Pico,
    mv: &MoveDef,
) -> (i32, Effectiveness) {
    let mult = type_multiplier(mv.element, defender.species.element);
    let swing: f64 = rng.random_range(0.9..1.111) * rng.random_range(0.9..1.111);
    let raw = f64::from(mv.power) * f64::from(attacker.level) / f64::from(BASE_LEVEL)
        * mult
        * swing;
    let eff = if mult > 1.0 {
        Effectiveness::Critical
    } else if mult < 1.0 {
        Effectiveness::Resisted
    } else {
        Effectiveness::Neutral
    };
    (raw as i32, eff)
}

/// Roll a capture attempt against `defender`.
///
/// The level gap feeds a bonus (steeper when the defender is ahead) and
/// remaining health a penalty of up to 150 points against a base chance
/// of 100. Poulter never counts as more than two levels ahead.
pub fn attempt_capture(rng: &mut impl Rng, attacker: &Pico, defender: &Pico) -> bool {
    let mut gap = attacker.level - defender.level;
    if defender.species.name == "Poulter" {
        gap = gap.max(2);
    }
    let bonus = if gap > 0 { 5 } else { 10 } * gap;
    let penalty = 150.0 * f64::from(defender.hp) / f64::from(defender.max_hp);
    let chance = 100.0 + f64::from(bonus) - penalty;
    rng.random::<f64>() * 100.0 < chance
}

/// Probability of gaining a level for defeating an enemy, from the level
/// difference. Doubles per level of disadvantage, capped at certainty;
/// enemies more than two levels below award nothing.
pub fn level_up_chance(player_level: i32, enemy_level: i32) -> f64 {
    let diff = enemy_level - player_level;
    if diff < -2 {
        return 0.0;
    }
    (f64::from(diff).exp2() / 12.5).min(1.0)
}

/// Roll a wild creature's level.
///
/// A bell curve around [`BASE_LEVEL`] clamped to `5..=15`, then up to two
/// reduction rolls that get likelier the further level plus team size
/// sits above the base.
pub fn wild_level(rng: &mut impl Rng, team_len: usize) -> i32 {
    let mut level = bell_curve(rng, f64::from(BASE_LEVEL), 2.0, Some(5.0), Some(15.0)).round()
        as i32;
    for _ in 0..2 {
        let diff = level + team_len as i32 - BASE_LEVEL;
        if diff > 0 && rng.random::<f64>() < 0.0625 * f64::from(diff).powf(1.5) {
            level -= 1;
        }
    }
    level
}

/// Pick a wild species from an encounter table's element weights.
///
/// Weights line up with [`Element::WILD`]; a zero weight removes the
/// element from the draw. When nothing wins the draw the pick falls
/// through to Dark.
pub fn choose_wild_species(rng: &mut impl Rng, weights: &[f64; 4]) -> &'static Species {
    let pool: Vec<(Element, f64)> = Element::WILD
        .into_iter()
        .zip(weights.iter().copied())
        .filter(|&(_, w)| w > 0.0)
        .collect();
    let total: f64 = pool.iter().map(|&(_, w)| w).sum();
    let mut element = Element::Dark;
    if total > 0.0 {
        let threshold = rng.random_range(0.0..=total);
        let mut cumulative = 0.0;
        for (el, w) in pool {
            cumulative += w;
            if threshold <= cumulative {
                element = el;
                break;
            }
        }
    }
    let candidates: Vec<&'static Species> =
        SPECIES.iter().filter(|s| s.element == element).collect();
    candidates[rng.random_range(0..candidates.len())]
}
