//! Session state: the plant, the bankroll, and the shop cursors.

use atomic_core::Button;

use crate::economy::{self, Generator, HAND_CRANK, LARGE_NUKE};
use crate::perks::{CATEGORIES, PerkSet};

/// Rows visible at once in each shop column.
pub const WINDOW: usize = 4;

/// Cheap models that stay readable ahead of the owned frontier.
const MASK_EXEMPT: &[&str] = &["Potato Battery", "Handheld Wind Turbine"];

/// Which screen the session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Generators,
    Upgrades,
    PrestigeIntro,
    Prestige,
}

/// Everything a run owns, plus the cursors over it.
#[derive(Debug)]
pub struct State {
    pub money: f64,
    pub total_earnings: f64,
    pub prestige_points: u32,
    pub prestige_count: u32,
    pub gens: Vec<Generator>,
    pub perks: PerkSet,
    pub screen: Screen,
    pub sel: usize,
    pub scroll: usize,
    pub upg_sel: usize,
    pub upg_scroll: usize,
    pub cat_sel: usize,
    pub cat_open: Option<usize>,
    pub perk_sel: usize,
}

impl State {
    pub fn new() -> Self {
        Self {
            // One crank's worth of seed money.
            money: 0.05,
            total_earnings: 0.0,
            prestige_points: 0,
            prestige_count: 0,
            gens: economy::fresh_plant(),
            perks: PerkSet::default(),
            screen: Screen::Generators,
            sel: 0,
            scroll: 0,
            upg_sel: 0,
            upg_scroll: 0,
            cat_sel: 0,
            cat_open: None,
            perk_sel: 0,
        }
    }

    // -- shop queries -------------------------------------------------------

    /// Rows listed in the shop. Everything through the Large Nuclear
    /// Reactor always shows; rows past it need the Research Lab.
    pub fn shop_len(&self) -> usize {
        if self.perks.lab_built() { self.gens.len() } else { LARGE_NUKE + 1 }
    }

    /// Highest row the player owns any of.
    fn best_owned(&self) -> Option<usize> {
        self.gens.iter().rposition(|g| g.count > 0)
    }

    /// Whether a row renders as question marks. Rows more than two past
    /// the owned frontier stay hidden, bar a couple of early teasers.
    pub fn masked(&self, idx: usize) -> bool {
        let frontier = self.best_owned().map_or(1, |b| b + 2);
        idx > frontier && !MASK_EXEMPT.contains(&self.gens[idx].def.name)
    }

    /// Live output of the whole plant.
    pub fn total_watts(&self) -> f64 {
        self.gens.iter().map(|g| g.power_output(&self.perks)).sum()
    }

    /// Sell `dt` seconds of output at a dollar per watt-second.
    pub fn earn(&mut self, dt: f64) {
        let gain = self.total_watts() * dt;
        self.money += gain;
        self.total_earnings += gain;
    }

    // -- input --------------------------------------------------------------

    /// Apply one accepted button press. Returns whether the screen
    /// needs a repaint.
    pub fn press(&mut self, button: Button) -> bool {
        match self.screen {
            Screen::Generators => self.press_generators(button),
            Screen::Upgrades => self.press_upgrades(button),
            Screen::PrestigeIntro => self.press_prestige_intro(button),
            Screen::Prestige => self.press_prestige(button),
        }
    }

    fn press_generators(&mut self, button: Button) -> bool {
        match button {
            // The list stacks bottom-up, so Up walks toward pricier rows.
            Button::Up => {
                if self.sel + 1 >= self.shop_len() {
                    return false;
                }
                self.sel += 1;
                if self.sel >= self.scroll + WINDOW {
                    self.scroll += 1;
                }
                true
            }
            Button::Down => {
                if self.sel == 0 {
                    return false;
                }
                self.sel -= 1;
                if self.sel < self.scroll {
                    self.scroll -= 1;
                }
                true
            }
            Button::A => self.activate_selected(),
            Button::Right => self.open_upgrades(),
            Button::X => self.start_prestige(),
            _ => false,
        }
    }

    /// Turn the crank, or buy a unit of the selected row.
    fn activate_selected(&mut self) -> bool {
        if self.sel == HAND_CRANK {
            self.money += self.gens[HAND_CRANK].unit_watts(&self.perks);
            return false;
        }
        let cost = self.gens[self.sel].current_cost();
        if self.money < cost {
            return false;
        }
        self.money -= cost;
        self.gens[self.sel].count += 1;
        true
    }

    fn open_upgrades(&mut self) -> bool {
        let g = &self.gens[self.sel];
        if g.upgrades().is_empty() || g.count == 0 {
            return false;
        }
        self.screen = Screen::Upgrades;
        self.upg_sel = 0;
        self.upg_scroll = 0;
        true
    }

    fn start_prestige(&mut self) -> bool {
        if self.gens[LARGE_NUKE].count == 0 {
            return false;
        }
        self.prestige_count += 1;
        log::info!("prestige {}", self.prestige_count);
        if self.prestige_count == 1 {
            self.screen = Screen::PrestigeIntro;
        } else {
            self.prestige_points += 1;
            self.reset_plant();
            self.money = self.perks.starting_money();
            self.total_earnings = self.money;
            self.screen = Screen::Prestige;
            self.cat_sel = 0;
            self.cat_open = None;
            self.perk_sel = 0;
        }
        true
    }

    fn press_upgrades(&mut self, button: Button) -> bool {
        let len = self.gens[self.sel].upgrades().len();
        match button {
            Button::Up => {
                if self.upg_sel + 1 >= len {
                    return false;
                }
                self.upg_sel += 1;
                if self.upg_sel >= self.upg_scroll + WINDOW {
                    self.upg_scroll += 1;
                }
                true
            }
            Button::Down => {
                if self.upg_sel == 0 {
                    return false;
                }
                self.upg_sel -= 1;
                if self.upg_sel < self.upg_scroll {
                    self.upg_scroll -= 1;
                }
                true
            }
            Button::A => {
                let g = &self.gens[self.sel];
                if g.upgrade_bought(self.upg_sel) {
                    return false;
                }
                let cost = g.upgrade_cost(self.upg_sel);
                if self.money < cost {
                    return false;
                }
                self.money -= cost;
                self.gens[self.sel].buy_upgrade(self.upg_sel);
                true
            }
            Button::Left => {
                self.screen = Screen::Generators;
                true
            }
            _ => false,
        }
    }

    fn press_prestige_intro(&mut self, button: Button) -> bool {
        if button != Button::X {
            return false;
        }
        // The first prestige pays no points: it builds the Research Lab
        // and wipes the run.
        self.perks.research_lab.bought = 1;
        self.reset_plant();
        self.money = 0.0;
        self.total_earnings = 0.0;
        self.screen = Screen::Generators;
        true
    }

    fn press_prestige(&mut self, button: Button) -> bool {
        if button == Button::X {
            self.screen = Screen::Generators;
            return true;
        }
        match self.cat_open {
            None => match button {
                Button::Up => {
                    if self.cat_sel + 1 >= CATEGORIES.len() {
                        return false;
                    }
                    self.cat_sel += 1;
                    true
                }
                Button::Down => {
                    if self.cat_sel == 0 {
                        return false;
                    }
                    self.cat_sel -= 1;
                    true
                }
                Button::Right => {
                    self.cat_open = Some(self.cat_sel);
                    self.perk_sel = 0;
                    true
                }
                _ => false,
            },
            Some(cat) => {
                let ids = CATEGORIES[cat].1;
                match button {
                    Button::Up => {
                        if self.perk_sel + 1 >= ids.len() {
                            return false;
                        }
                        self.perk_sel += 1;
                        true
                    }
                    Button::Down => {
                        if self.perk_sel == 0 {
                            return false;
                        }
                        self.perk_sel -= 1;
                        true
                    }
                    Button::A => {
                        let points = self.prestige_points;
                        let perk = self.perks.get_mut(ids[self.perk_sel]);
                        if !perk.can_buy(points) {
                            return false;
                        }
                        self.prestige_points -= perk.next_cost();
                        perk.bought += 1;
                        true
                    }
                    Button::Left => {
                        self.cat_open = None;
                        true
                    }
                    _ => false,
                }
            }
        }
    }

    fn reset_plant(&mut self) {
        for g in &mut self.gens {
            g.reset();
        }
        self.sel = 0;
        self.scroll = 0;
        self.upg_sel = 0;
        self.upg_scroll = 0;
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cranking_earns_a_crank_of_watts() {
        let mut st = State::new();
        assert!(!st.press(Button::A));
        assert!((st.money - 0.10).abs() < 1e-9);
    }

    #[test]
    fn buying_needs_the_full_price() {
        let mut st = State::new();
        st.sel = 1; // Potato Battery, $1
        assert!(!st.press(Button::A));
        assert_eq!(st.gens[1].count, 0);
        st.money = 1.0;
        assert!(st.press(Button::A));
        assert_eq!(st.gens[1].count, 1);
        assert!(st.money.abs() < 1e-9);
    }

    #[test]
    fn the_cursor_drags_the_window() {
        let mut st = State::new();
        for _ in 0..5 {
            st.press(Button::Up);
        }
        assert_eq!(st.sel, 5);
        assert_eq!(st.scroll, 2);
        st.press(Button::Down);
        assert_eq!(st.sel, 4);
        assert_eq!(st.scroll, 2);
        for _ in 0..4 {
            st.press(Button::Down);
        }
        assert_eq!(st.sel, 0);
        assert_eq!(st.scroll, 0);
    }

    #[test]
    fn unowned_rows_mask_past_the_frontier() {
        let mut st = State::new();
        assert!(!st.masked(1));
        assert!(!st.masked(2)); // wind teaser
        assert!(st.masked(3));
        st.gens[3].count = 1;
        assert!(!st.masked(5));
        assert!(st.masked(6));
    }

    #[test]
    fn upgrades_need_an_owned_unit() {
        let mut st = State::new();
        st.sel = 1;
        assert!(!st.press(Button::Right));
        st.gens[1].count = 1;
        assert!(st.press(Button::Right));
        assert_eq!(st.screen, Screen::Upgrades);
    }

    #[test]
    fn upgrade_purchases_spend_and_stick() {
        let mut st = State::new();
        st.sel = 1;
        st.gens[1].count = 1;
        st.press(Button::Right);
        st.money = 1.0; // Yukon Gold Potato costs $1
        assert!(st.press(Button::A));
        assert!(st.gens[1].upgrade_bought(0));
        assert!(!st.press(Button::A));
        st.press(Button::Left);
        assert_eq!(st.screen, Screen::Generators);
    }

    #[test]
    fn income_scales_with_time() {
        let mut st = State::new();
        st.gens[1].count = 2; // two potatoes, 0.1W each
        st.earn(10.0);
        assert!((st.money - 2.05).abs() < 1e-9);
        assert!((st.total_earnings - 2.0).abs() < 1e-9);
    }

    #[test]
    fn the_first_prestige_builds_the_lab_for_free() {
        let mut st = State::new();
        assert!(!st.press(Button::X)); // no reactor yet
        st.gens[LARGE_NUKE].count = 1;
        st.money = 5.0;
        assert!(st.press(Button::X));
        assert_eq!(st.screen, Screen::PrestigeIntro);
        assert_eq!(st.prestige_points, 0);
        assert!(st.press(Button::X));
        assert_eq!(st.screen, Screen::Generators);
        assert!(st.perks.lab_built());
        assert_eq!(st.gens[LARGE_NUKE].count, 0);
        assert_eq!(st.money, 0.0);
    }

    #[test]
    fn later_prestiges_pay_a_point_and_the_start_cash() {
        let mut st = State::new();
        st.gens[LARGE_NUKE].count = 1;
        st.press(Button::X);
        st.press(Button::X); // lab built
        st.perks.start_cash.bought = 2;
        st.gens[LARGE_NUKE].count = 1;
        assert!(st.press(Button::X));
        assert_eq!(st.screen, Screen::Prestige);
        assert_eq!(st.prestige_points, 1);
        assert_eq!(st.money, 20_000_000.0);
    }

    #[test]
    fn the_prestige_shop_sells_by_category() {
        let mut st = State::new();
        st.screen = Screen::Prestige;
        st.prestige_points = 3;
        assert!(st.press(Button::Up)); // "Other"
        assert!(st.press(Button::Right));
        assert!(st.press(Button::A)); // All Output +25%, 2 PC
        assert_eq!(st.perks.global_boost.bought, 1);
        assert_eq!(st.prestige_points, 1);
        assert!(!st.press(Button::A)); // next copy costs 4 PC
        st.press(Button::X);
        assert_eq!(st.screen, Screen::Generators);
    }
}
