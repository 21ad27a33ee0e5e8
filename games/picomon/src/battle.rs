//! Turn-based battles.
//!
//! The screen splits into two sprite stages with name cards above and a
//! boxed info strip along the bottom that doubles as the message line,
//! the action labels, and the team picker. One player action (switching
//! is free) alternates with one enemy move until a side runs out.

use std::io;
use std::time::Duration;

use rand::Rng;

use atomic_core::{Button, Console, Font, Surface, draw_text};

use crate::assets::Assets;
use crate::data::{Element, MoveDef};
use crate::draw::{BLACK, SCALE, WHITE, draw_scaled, flash_scaled};
use crate::party::{Party, Pico};
use crate::rules::{Effectiveness, attempt_capture, level_up_chance, roll_damage};

const INFO1_X: i32 = 20;
const INFO2_X: i32 = 140;
const PICO1_X: i32 = 15;
const PICO2_X: i32 = 135;
const SPRITE_Y: i32 = 75;
const SPRITE_PX: i32 = 16 * SCALE;

const MSG_HOLD: Duration = Duration::from_secs(2);
const CATCH_SETTLE: Duration = Duration::from_secs(1);
const ENEMY_THINK: Duration = Duration::from_millis(500);
const LUNGE_HOLD: Duration = Duration::from_millis(100);
const FLASH_TICK: Duration = Duration::from_millis(50);
const POLL: Duration = Duration::from_millis(10);

/// Buttons that pick a team slot, in slot order.
const SLOT_SELECT: [Button; 4] = [Button::A, Button::B, Button::X, Button::Y];

/// How a battle handed control back.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum BattleEnd {
    /// Won, lost, or fled; the overworld resumes.
    Done,
    /// The user quit mid-battle; unwind to the launcher.
    Quit,
}

/// Fight `enemies` in order until the player wins, loses, or flees.
/// Whatever happens, the team leaves fully healed.
pub(crate) fn run(
    con: &mut Console<'_>,
    assets: &Assets,
    party: &mut Party,
    mut enemies: Vec<Pico>,
    rng: &mut impl Rng,
) -> io::Result<BattleEnd> {
    let mut at = 0;

    con.screen.fill(WHITE);
    con.screen.rect(2, 198, 236, 40, BLACK);
    draw_labels(con.screen, party.active());
    draw_info(con.screen, party.active(), INFO1_X);
    draw_info(con.screen, &enemies[at], INFO2_X);
    draw_combatant(con.screen, assets, party.active(), PICO1_X, true);
    draw_combatant(con.screen, assets, &enemies[at], PICO2_X, false);
    con.screen.present()?;
    // A Center still held from the overworld must not read as a flee.
    con.wait_release(Button::Center);

    let end = loop {
        let mut caught = false;
        let mut fled = false;
        let mut move_used = false;
        while !move_used {
            con.pad.poll();
            if con.pad.quit_requested() {
                return Ok(BattleEnd::Quit);
            }
            if con.pad.pressed(Button::A) || con.pad.pressed(Button::B) {
                let slot = usize::from(!con.pad.pressed(Button::A));
                player_attack(con, assets, party, &mut enemies[at], slot, rng)?;
                move_used = true;
            } else if con.pad.pressed(Button::X) {
                match try_capture(con, party, &mut enemies[at], rng)? {
                    Some(c) => caught = c,
                    None => return Ok(BattleEnd::Quit),
                }
                move_used = true;
            } else if con.pad.pressed(Button::Y) {
                // Switching is free; the enemy gets no turn for it.
                if switch_prompt(con, assets, party)?.is_none() {
                    return Ok(BattleEnd::Quit);
                }
            } else if con.pad.pressed(Button::Center) {
                fled = try_flee(con, party.active(), rng)?;
                move_used = true;
            } else {
                con.delay(POLL);
            }
        }

        if enemies[at].fainted() {
            if !caught {
                announce(con, &format!("{} fainted!", enemies[at].species.name))?;
                if rng.random::<f64>() < level_up_chance(party.active().level, enemies[at].level)
                {
                    party.active_mut().level_up(1);
                    draw_info(con.screen, party.active(), INFO1_X);
                    announce(con, &format!("{} levelled up!", party.active().species.name))?;
                }
            }
            at += 1;
            if at >= enemies.len() {
                announce(con, "You win the battle!")?;
                break BattleEnd::Done;
            }
            draw_info(con.screen, &enemies[at], INFO2_X);
            con.screen.fill_rect(PICO2_X, SPRITE_Y, SPRITE_PX, SPRITE_PX, WHITE);
            draw_combatant(con.screen, assets, &enemies[at], PICO2_X, false);
            announce(con, &format!("{} steps up!", enemies[at].species.name))?;
            draw_labels(con.screen, party.active());
            con.screen.present()?;
            continue;
        }
        if fled {
            break BattleEnd::Done;
        }

        con.delay(ENEMY_THINK);
        let mv = enemies[at].species.moves[rng.random_range(0..2)];
        let (dmg, eff) = roll_damage(rng, &enemies[at], party.active(), &mv);
        animate_attack(con, assets, &enemies[at], party.active(), mv.element, false)?;
        party.active_mut().take_damage(dmg);
        draw_info(con.screen, party.active(), INFO1_X);
        announce(con, &hit_message(&enemies[at], &mv, eff))?;
        draw_labels(con.screen, party.active());
        con.screen.present()?;

        if party.active().fainted() {
            announce(con, &format!("{} fainted!", party.active().species.name))?;
            let humiliated = party.active().level >= enemies[at].level
                || enemies[at].species.name == "Poulter";
            if humiliated {
                announce(con, &format!("{} lost a level!", party.active().species.name))?;
                party.active_mut().level_up(-1);
            }
            match party.first_alive() {
                Some(slot) => {
                    party.switch_to(slot);
                    draw_info(con.screen, party.active(), INFO1_X);
                    con.screen.fill_rect(PICO1_X, SPRITE_Y, SPRITE_PX, SPRITE_PX, WHITE);
                    draw_combatant(con.screen, assets, party.active(), PICO1_X, true);
                    draw_labels(con.screen, party.active());
                    con.screen.present()?;
                }
                None => {
                    announce(con, "You lose the battle!")?;
                    break BattleEnd::Done;
                }
            }
        }
    };

    party.heal_all();
    Ok(end)
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

fn player_attack(
    con: &mut Console<'_>,
    assets: &Assets,
    party: &Party,
    enemy: &mut Pico,
    slot: usize,
    rng: &mut impl Rng,
) -> io::Result<()> {
    let attacker = party.active();
    let mv = attacker.species.moves[slot];
    let (dmg, eff) = roll_damage(rng, attacker, enemy, &mv);
    animate_attack(con, assets, attacker, enemy, mv.element, true)?;
    enemy.take_damage(dmg);
    draw_info(con.screen, enemy, INFO2_X);
    announce(con, &hit_message(attacker, &mv, eff))?;
    draw_labels(con.screen, attacker);
    con.screen.present()?;
    Ok(())
}

/// Roll a capture. A caught enemy joins at zero health and one level
/// down; with a full team the player picks who makes room. `None` means
/// a quit interrupted the picker.
fn try_capture(
    con: &mut Console<'_>,
    party: &mut Party,
    enemy: &mut Pico,
    rng: &mut impl Rng,
) -> io::Result<Option<bool>> {
    if !attempt_capture(rng, party.active(), enemy) {
        announce(con, "Catch failed!")?;
        draw_labels(con.screen, party.active());
        con.screen.present()?;
        return Ok(Some(false));
    }
    announce(con, &format!("Caught the {}!", enemy.species.name))?;
    announce(con, "This reduced its level by 1")?;
    enemy.hp = 0;
    enemy.level -= 1;
    let prize = enemy.clone();
    if !party.add(prize.clone()) {
        announce(con, "Who do you replace?")?;
        draw_team(con.screen, party);
        con.screen.present()?;
        let Some(slot) = pick_slot(con) else {
            return Ok(None);
        };
        let old = party.replace(slot, prize);
        let msg =
            format!("{} replaced with {}", old.species.name, party.active().species.name);
        announce(con, &msg)?;
    }
    draw_labels(con.screen, party.active());
    con.screen.present()?;
    con.delay(CATCH_SETTLE);
    Ok(Some(true))
}

/// Offer the team picker and switch if the choice is a live member.
/// `None` means a quit interrupted the picker.
fn switch_prompt(
    con: &mut Console<'_>,
    assets: &Assets,
    party: &mut Party,
) -> io::Result<Option<()>> {
    announce(con, "Who do you swap with?")?;
    draw_team(con.screen, party);
    con.screen.present()?;
    let Some(slot) = pick_slot(con) else {
        return Ok(None);
    };
    if let Some(target) = party.get(slot) {
        if target.fainted() {
            announce(con, "That Picomon has fainted!")?;
        } else {
            party.switch_to(slot);
            draw_info(con.screen, party.active(), INFO1_X);
            con.screen.fill_rect(PICO1_X, SPRITE_Y, SPRITE_PX, SPRITE_PX, WHITE);
            draw_combatant(con.screen, assets, party.active(), PICO1_X, true);
        }
    }
    draw_labels(con.screen, party.active());
    con.screen.present()?;
    Ok(Some(()))
}

fn try_flee(con: &mut Console<'_>, active: &Pico, rng: &mut impl Rng) -> io::Result<bool> {
    if rng.random_range(1..=3) == 1 {
        announce(con, "You flee successfully")?;
        Ok(true)
    } else {
        announce(con, "Flee failed!")?;
        draw_labels(con.screen, active);
        con.screen.present()?;
        Ok(false)
    }
}

/// Wait for all slot buttons to clear, then for one press, and map it
/// to a team slot. `None` when a quit arrives instead.
fn pick_slot(con: &mut Console<'_>) -> Option<usize> {
    for b in SLOT_SELECT {
        con.wait_release(b);
    }
    let choice = con.wait_any(&SLOT_SELECT)?;
    con.wait_release(choice);
    SLOT_SELECT.iter().position(|&b| b == choice)
}

fn hit_message(attacker: &Pico, mv: &MoveDef, eff: Effectiveness) -> String {
    match eff.label() {
        Some(word) => format!("{} was {word}!", mv.name),
        None => format!("{} used {}!", attacker.species.name, mv.name),
    }
}

// ---------------------------------------------------------------------------
// Scene drawing
// ---------------------------------------------------------------------------

fn draw_combatant(screen: &mut dyn Surface, assets: &Assets, pico: &Pico, x: i32, flip: bool) {
    if let Some(tile) = assets.sprite(pico.species.name) {
        draw_scaled(screen, tile, x, SPRITE_Y, flip);
    }
}

/// Lunge the attacker towards the defender, then flash the defender in
/// the move's element colour three times.
fn animate_attack(
    con: &mut Console<'_>,
    assets: &Assets,
    attacker: &Pico,
    defender: &Pico,
    element: Option<Element>,
    player_attacking: bool,
) -> io::Result<()> {
    let (ax, dx) = if player_attacking { (PICO1_X, PICO2_X) } else { (PICO2_X, PICO1_X) };
    let lunge = if player_attacking { 12 } else { -12 };
    let flip = player_attacking;
    let flash = element.map(Element::colour).unwrap_or(WHITE);

    con.screen.fill_rect(ax, SPRITE_Y, SPRITE_PX, SPRITE_PX, WHITE);
    draw_combatant(con.screen, assets, attacker, ax + lunge, flip);
    con.screen.present()?;
    con.delay(LUNGE_HOLD);
    con.screen.fill_rect(ax + lunge, SPRITE_Y, SPRITE_PX, SPRITE_PX, WHITE);
    draw_combatant(con.screen, assets, attacker, ax, flip);
    con.screen.present()?;

    for _ in 0..3 {
        match assets.sprite(defender.species.name) {
            Some(tile) => flash_scaled(con.screen, tile, dx, SPRITE_Y, flash, !flip),
            None => con.screen.fill_rect(dx, SPRITE_Y, SPRITE_PX, SPRITE_PX, flash),
        }
        con.screen.present()?;
        con.delay(FLASH_TICK);
        draw_combatant(con.screen, assets, defender, dx, !flip);
        con.screen.present()?;
        con.delay(FLASH_TICK);
    }
    Ok(())
}

/// Name, level, and health at the top of one side's stage.
fn draw_info(screen: &mut dyn Surface, pico: &Pico, x: i32) {
    let blank = " ".repeat(15);
    for row in 0..3 {
        draw_text(screen, Font::SMALL, &blank, x, 5 + row * 16, BLACK, Some(WHITE), 0.0, 0.0);
    }
    draw_text(screen, Font::SMALL, pico.species.name, x, 5, BLACK, Some(WHITE), 0.0, 0.0);
    let level = format!("Lvl {}", pico.level);
    draw_text(screen, Font::SMALL, &level, x, 21, BLACK, Some(WHITE), 0.0, 0.0);
    let health = format!("{}/{}hp", pico.hp, pico.max_hp);
    draw_text(screen, Font::SMALL, &health, x, 37, BLACK, Some(WHITE), 0.0, 0.0);
}

fn clear_info(screen: &mut dyn Surface) {
    screen.fill_rect(3, 199, 234, 38, WHITE);
}

/// Clear the info strip, write one centred line, and hold it on screen.
fn announce(con: &mut Console<'_>, msg: &str) -> io::Result<()> {
    clear_info(con.screen);
    draw_text(con.screen, Font::SMALL, msg, 120, 210, BLACK, Some(WHITE), 0.5, 0.0);
    con.screen.present()?;
    con.delay(MSG_HOLD);
    Ok(())
}

/// The action labels: both moves coloured by element, catch, and switch.
/// The button prefix is overdrawn in black so only the name carries the
/// element colour.
fn draw_labels(screen: &mut dyn Surface, active: &Pico) {
    clear_info(screen);
    for (slot, (key, y, jy)) in [("A:", 201, 0.0), ("B:", 237, 1.0)].into_iter().enumerate() {
        let mv = &active.species.moves[slot];
        let colour = mv.element.map(Element::colour).unwrap_or(BLACK);
        let label = format!("   {}", mv.name);
        draw_text(screen, Font::SMALL, &label, 8, y, colour, Some(WHITE), 0.0, jy);
        draw_text(screen, Font::SMALL, key, 8, y, BLACK, Some(WHITE), 0.0, jy);
    }
    draw_text(screen, Font::SMALL, "X: Catch", 160, 201, BLACK, Some(WHITE), 0.0, 0.0);
    draw_text(screen, Font::SMALL, "Y: Switch", 160, 237, BLACK, Some(WHITE), 0.0, 1.0);
}

/// The team picker: one slot per select button, names in their element
/// colour, empty slots dashed out.
fn draw_team(screen: &mut dyn Surface, party: &Party) {
    clear_info(screen);
    let spots = [(5, 202, 0.0), (5, 236, 1.0), (120, 202, 0.0), (120, 236, 1.0)];
    let keys = ["A:", "B:", "X:", "Y:"];
    for (slot, &(x, y, jy)) in spots.iter().enumerate() {
        match party.get(slot) {
            Some(pico) => {
                let colour = pico.species.element.colour();
                let label = format!("{} {}", keys[slot], pico.species.name);
                draw_text(screen, Font::SMALL, &label, x, y, colour, Some(WHITE), 0.0, jy);
                draw_text(screen, Font::SMALL, keys[slot], x, y, BLACK, Some(WHITE), 0.0, jy);
            }
            None => {
                let label = format!("{} ---", keys[slot]);
                draw_text(screen, Font::SMALL, &label, x, y, BLACK, Some(WHITE), 0.0, jy);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atomic_core::BufferSurface;

    use crate::data::{FLAME_KICK, PUNCH, species_by_name};

    fn pico(name: &str) -> Pico {
        Pico::new(species_by_name(name).unwrap(), 10)
    }

    #[test]
    fn hit_messages_follow_effectiveness() {
        let embash = pico("Embash");
        assert_eq!(
            hit_message(&embash, &PUNCH, Effectiveness::Neutral),
            "Embash used Punch!"
        );
        assert_eq!(
            hit_message(&embash, &FLAME_KICK, Effectiveness::Critical),
            "Flame Kick was critical!"
        );
        assert_eq!(
            hit_message(&embash, &FLAME_KICK, Effectiveness::Resisted),
            "Flame Kick was resisted!"
        );
    }

    #[test]
    fn slot_buttons_map_in_order() {
        assert_eq!(SLOT_SELECT.iter().position(|&b| b == Button::A), Some(0));
        assert_eq!(SLOT_SELECT.iter().position(|&b| b == Button::Y), Some(3));
    }

    #[test]
    fn the_info_strip_sits_inside_its_border() {
        let mut screen = BufferSurface::new(240, 240);
        screen.fill(WHITE);
        screen.rect(2, 198, 236, 40, BLACK);
        clear_info(&mut screen);
        // Border pixels survive the clear.
        assert_eq!(screen.read_pixel(2, 198), BLACK);
        assert_eq!(screen.read_pixel(237, 237), BLACK);
        assert_eq!(screen.read_pixel(120, 210), WHITE);
    }

    #[test]
    fn the_team_grid_repaints_the_strip() {
        let mut party = Party::new();
        party.add(pico("Embash"));
        let mut screen = BufferSurface::new(240, 240);
        screen.fill(BLACK);
        draw_team(&mut screen, &party);
        // Every slot cell painted its white background over the black.
        assert_eq!(screen.read_pixel(10, 208), WHITE);
        assert_eq!(screen.read_pixel(10, 228), WHITE);
        assert_eq!(screen.read_pixel(125, 208), WHITE);
        assert_eq!(screen.read_pixel(125, 228), WHITE);
    }
}
