//! Prestige points and the perks they buy.

use crate::economy::Family;

/// A perk in the prestige shop.
#[derive(Debug, Clone)]
pub struct Perk {
    pub name: &'static str,
    pub base_cost: u32,
    pub max_buys: Option<u32>,
    pub bought: u32,
}

impl Perk {
    const fn new(name: &'static str, base_cost: u32, max_buys: Option<u32>) -> Self {
        Self { name, base_cost, max_buys, bought: 0 }
    }

    /// Price of the next copy. Scales linearly with copies bought.
    pub fn next_cost(&self) -> u32 {
        self.base_cost * (self.bought + 1)
    }

    pub fn maxed(&self) -> bool {
        self.max_buys.is_some_and(|m| self.bought >= m)
    }

    pub fn can_buy(&self, points: u32) -> bool {
        !self.maxed() && points >= self.next_cost()
    }
}

/// Shop row identifiers. The Research Lab is not listed anywhere; the
/// first prestige grants it outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerkId {
    SolarBoost,
    GlobalBoost,
    StartCash,
}

/// The prestige shop, grouped the way the screen lists it.
pub const CATEGORIES: &[(&str, &[PerkId])] = &[
    ("Type Boosts", &[PerkId::SolarBoost]),
    ("Other", &[PerkId::GlobalBoost, PerkId::StartCash]),
];

/// Everything bought across prestiges, plus the lab from the first one.
#[derive(Debug, Clone)]
pub struct PerkSet {
    pub research_lab: Perk,
    pub solar_boost: Perk,
    pub global_boost: Perk,
    pub start_cash: Perk,
}

impl Default for PerkSet {
    fn default() -> Self {
        Self {
            research_lab: Perk::new("Research Lab", 1, Some(1)),
            solar_boost: Perk::new("Solar Output +1000%", 1, None),
            global_boost: Perk::new("All Output +25%", 2, None),
            start_cash: Perk::new("Start Cash +$10M", 1, None),
        }
    }
}

impl PerkSet {
    pub fn get(&self, id: PerkId) -> &Perk {
        match id {
            PerkId::SolarBoost => &self.solar_boost,
            PerkId::GlobalBoost => &self.global_boost,
            PerkId::StartCash => &self.start_cash,
        }
    }

    pub fn get_mut(&mut self, id: PerkId) -> &mut Perk {
        match id {
            PerkId::SolarBoost => &mut self.solar_boost,
            PerkId::GlobalBoost => &mut self.global_boost,
            PerkId::StartCash => &mut self.start_cash,
        }
    }

    pub fn lab_built(&self) -> bool {
        self.research_lab.bought > 0
    }

    /// Bankroll granted after a prestige reset.
    pub fn starting_money(&self) -> f64 {
        self.start_cash.bought as f64 * 10_000_000.0
    }

    /// Watts one unit of a model produces once perks apply: solar gains
    /// +1000% per Solar Output copy, everything gains +25% per All
    /// Output copy, and the Research Lab doubles the lot.
    pub fn boosted_watts(&self, watts: f64, family: Family) -> f64 {
        let mut w = watts;
        if family == Family::SolarPanel {
            w *= 1.0 + 10.0 * self.solar_boost.bought as f64;
        }
        w *= 1.0 + 0.25 * self.global_boost.bought as f64;
        if self.lab_built() {
            w *= 2.0;
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perk_prices_scale_linearly() {
        let mut global = PerkSet::default().global_boost;
        assert_eq!(global.next_cost(), 2);
        global.bought = 2;
        assert_eq!(global.next_cost(), 6);
    }

    #[test]
    fn capped_perks_stop_selling() {
        let mut lab = PerkSet::default().research_lab;
        assert!(lab.can_buy(1));
        lab.bought = 1;
        assert!(lab.maxed());
        assert!(!lab.can_buy(100));
    }

    #[test]
    fn boosts_stack_multiplicatively() {
        let mut perks = PerkSet::default();
        perks.solar_boost.bought = 1;
        perks.global_boost.bought = 1;
        perks.research_lab.bought = 1;
        assert!((perks.boosted_watts(2.0, Family::SolarPanel) - 55.0).abs() < 1e-9);
        assert!((perks.boosted_watts(2.0, Family::Burner) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn start_cash_grants_ten_million_per_copy() {
        let mut perks = PerkSet::default();
        assert_eq!(perks.starting_money(), 0.0);
        perks.start_cash.bought = 3;
        assert_eq!(perks.starting_money(), 30_000_000.0);
    }
}
