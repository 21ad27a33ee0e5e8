//! Species, moves, and the element chart.
//!
//! Hit points, move power, and the strong/weak pairs below are balance
//! data; the derived numbers (damage, power ratings) live next to the
//! combat rules that consume them.

use atomic_core::Rgb565;

/// Level at which a species' base hit points apply unscaled.
pub const BASE_LEVEL: i32 = 10;

// ---------------------------------------------------------------------------
// Elements
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Element {
    Fire,
    Grass,
    Electric,
    Water,
    Dark,
}

impl Element {
    /// The elements wild encounter tables weight. Dark never appears in a
    /// table; it is the fallback when no weighted element wins.
    pub const WILD: [Element; 4] =
        [Element::Fire, Element::Grass, Element::Electric, Element::Water];

    /// Accent colour used for names, move labels, and attack flashes.
    pub const fn colour(self) -> Rgb565 {
        match self {
            Element::Fire => Rgb565::from_rgb(0xDF, 0x5F, 0x17),
            Element::Grass => Rgb565::from_rgb(0x4F, 0xBF, 0x37),
            Element::Electric => Rgb565::from_rgb(0xF7, 0xCF, 0x00),
            Element::Water => Rgb565::from_rgb(0x2F, 0x7F, 0xEF),
            Element::Dark => Rgb565::from_rgb(0x37, 0x0F, 0x7F),
        }
    }
}

/// Attacker-beats-defender pairs. A pair here reads one way: the reverse
/// matchup resists.
const BEATS: &[(Element, Element)] = &[
    (Element::Fire, Element::Grass),
    (Element::Grass, Element::Electric),
    (Element::Electric, Element::Water),
    (Element::Water, Element::Fire),
    (Element::Dark, Element::Fire),
    (Element::Dark, Element::Grass),
    (Element::Dark, Element::Electric),
    (Element::Dark, Element::Water),
];

/// Damage multiplier for a move element against a defending species.
/// Elementless moves are always neutral.
pub fn type_multiplier(attack: Option<Element>, defend: Element) -> f64 {
    let Some(attack) = attack else {
        return 1.0;
    };
    if BEATS.contains(&(attack, defend)) {
        1.5
    } else if BEATS.contains(&(defend, attack)) {
        2.0 / 3.0
    } else {
        1.0
    }
}

// ---------------------------------------------------------------------------
// Moves
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MoveDef {
    pub name: &'static str,
    pub power: i32,
    pub element: Option<Element>,
}

const fn mv(name: &'static str, power: i32, element: Option<Element>) -> MoveDef {
    MoveDef { name, power, element }
}

pub const PUNCH: MoveDef = mv("Punch", 10, None);
pub const TAIL_WHIP: MoveDef = mv("Tail Whip", 10, None);
pub const CRUSH: MoveDef = mv("Crush", 15, None);
pub const SLICE: MoveDef = mv("Slice", 20, None);
pub const BURN: MoveDef = mv("Burn", 15, Some(Element::Fire));
pub const FLAME_KICK: MoveDef = mv("Flame Kick", 20, Some(Element::Fire));
pub const EXPLODE: MoveDef = mv("Explode", 20, Some(Element::Fire));
pub const INFERNO: MoveDef = mv("Inferno", 25, Some(Element::Fire));
pub const BUZZ: MoveDef = mv("Buzz", 12, Some(Element::Electric));
pub const DISCHARGE: MoveDef = mv("Discharge", 20, Some(Element::Electric));
pub const ELECTROCUTE: MoveDef = mv("Electrocute", 20, Some(Element::Electric));
pub const LEAF_SLASH: MoveDef = mv("Leaf Slash", 20, Some(Element::Grass));
pub const POISON_BITE: MoveDef = mv("Poison Bite", 30, Some(Element::Grass));
pub const WHIRLPOOL: MoveDef = mv("Whirlpool", 15, Some(Element::Water));
pub const WATER_JET: MoveDef = mv("Water Jet", 20, Some(Element::Water));
pub const WITHER: MoveDef = mv("Wither", 12, Some(Element::Dark));
pub const DEATH_TAP: MoveDef = mv("Death Tap", 18, Some(Element::Dark));

/// Every move in the game, including ones no current species learns.
pub const MOVES: &[MoveDef] = &[
    PUNCH, TAIL_WHIP, CRUSH, SLICE, BURN, FLAME_KICK, EXPLODE, INFERNO, BUZZ, DISCHARGE,
    ELECTROCUTE, LEAF_SLASH, POISON_BITE, WHIRLPOOL, WATER_JET, WITHER, DEATH_TAP,
];

// ---------------------------------------------------------------------------
// Species
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq)]
pub struct Species {
    pub name: &'static str,
    pub element: Element,
    /// Hit points at [`BASE_LEVEL`].
    pub hp: i32,
    pub moves: [MoveDef; 2],
    pub description: &'static str,
}

pub const SPECIES: [Species; 9] = [
    Species {
        name: "Embash",
        element: Element::Fire,
        hp: 80,
        moves: [PUNCH, FLAME_KICK],
        description: "Powerful flaming boar Picomon",
    },
    Species {
        name: "Cinder",
        element: Element::Fire,
        hp: 55,
        moves: [BURN, INFERNO],
        description: "Blazing coal Picomon",
    },
    Species {
        name: "Hissnake",
        element: Element::Grass,
        hp: 50,
        moves: [TAIL_WHIP, POISON_BITE],
        description: "Venomous snake Picomon",
    },
    Species {
        name: "Segbug",
        element: Element::Grass,
        hp: 60,
        moves: [BUZZ, LEAF_SLASH],
        description: "Electric bug Picomon",
    },
    Species {
        name: "Bulbomb",
        element: Element::Electric,
        hp: 50,
        moves: [EXPLODE, ELECTROCUTE],
        description: "Superheated lightbulb Picomon",
    },
    Species {
        name: "Dynabird",
        element: Element::Electric,
        hp: 50,
        moves: [LEAF_SLASH, DISCHARGE],
        description: "Generator bird Picomon",
    },
    Species {
        name: "Voltray",
        element: Element::Water,
        hp: 60,
        moves: [WHIRLPOOL, ELECTROCUTE],
        description: "Electric sting ray Picomon",
    },
    Species {
        name: "Belugas",
        element: Element::Water,
        hp: 80,
        moves: [TAIL_WHIP, WATER_JET],
        description: "Beluga whale Picomon",
    },
    Species {
        name: "Poulter",
        element: Element::Dark,
        hp: 100,
        moves: [WITHER, DEATH_TAP],
        description: "Picomon of death and decay",
    },
];

pub fn species_by_name(name: &str) -> Option<&'static Species> {
    SPECIES.iter().find(|s| s.name == name)
}

/// Index of a species' strongest move. Ties keep the earlier slot.
pub fn best_move(species: &Species) -> usize {
    if species.moves[1].power > species.moves[0].power { 1 } else { 0 }
}

/// Single-number strength summary shown on detail screens.
///
/// Elemental moves score 25% over their base power and the best move 50%
/// more again; covering exactly two elements adds 10% overall. The sum is
/// scaled by bulk and rounded.
pub fn power_rating(species: &Species) -> i32 {
    let best = best_move(species);
    let mut total = 0.0;
    let mut elements: Vec<Element> = Vec::new();
    for (i, mv) in species.moves.iter().enumerate() {
        let mut power = f64::from(mv.power);
        if let Some(el) = mv.element {
            power *= 1.25;
            if !elements.contains(&el) {
                elements.push(el);
            }
        }
        if i == best {
            power *= 1.5;
        }
        total += power;
    }
    if elements.len() == 2 {
        total *= 1.1;
    }
    let rating = total * (f64::from(species.hp) + 12.5) / 50.0;
    rating.round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_is_a_cycle_plus_dark() {
        assert_eq!(type_multiplier(Some(Element::Fire), Element::Grass), 1.5);
        assert_eq!(type_multiplier(Some(Element::Grass), Element::Electric), 1.5);
        assert_eq!(type_multiplier(Some(Element::Electric), Element::Water), 1.5);
        assert_eq!(type_multiplier(Some(Element::Water), Element::Fire), 1.5);
        assert_eq!(type_multiplier(Some(Element::Grass), Element::Fire), 2.0 / 3.0);
        assert_eq!(type_multiplier(Some(Element::Fire), Element::Electric), 1.0);
        assert_eq!(type_multiplier(None, Element::Dark), 1.0);
    }

    #[test]
    fn dark_beats_everything_and_fears_nothing() {
        for el in Element::WILD {
            assert_eq!(type_multiplier(Some(Element::Dark), el), 1.5);
            assert_eq!(type_multiplier(Some(el), Element::Dark), 2.0 / 3.0);
        }
        assert_eq!(type_multiplier(Some(Element::Dark), Element::Dark), 1.0);
    }

    #[test]
    fn every_wild_element_has_a_species() {
        for el in Element::WILD {
            assert!(SPECIES.iter().any(|s| s.element == el), "{el:?}");
        }
        assert!(SPECIES.iter().any(|s| s.element == Element::Dark));
    }

    #[test]
    fn species_moves_come_from_the_registry() {
        for species in &SPECIES {
            for mv in &species.moves {
                assert!(MOVES.contains(mv), "{} learns unknown {}", species.name, mv.name);
            }
        }
    }

    #[test]
    fn power_ratings_match_known_values() {
        assert_eq!(power_rating(species_by_name("Embash").unwrap()), 88);
        assert_eq!(power_rating(species_by_name("Poulter").unwrap()), 110);
        assert_eq!(power_rating(species_by_name("Voltray").unwrap()), 90);
    }

    #[test]
    fn tied_move_power_keeps_the_first_slot_best() {
        // Bulbomb's moves tie at 20; Explode in slot 0 takes the best-move
        // bonus, so the rating differs from a last-slot tie break.
        let bulbomb = species_by_name("Bulbomb").unwrap();
        assert_eq!(best_move(bulbomb), 0);
        assert_eq!(power_rating(bulbomb), 86);
    }
}
