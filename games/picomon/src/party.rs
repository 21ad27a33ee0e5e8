//! Owned creatures and the player's team.

use crate::data::{BASE_LEVEL, Species};

/// One creature instance: a species at a level, with current hit points.
#[derive(Clone, Debug)]
pub struct Pico {
    pub species: &'static Species,
    pub level: i32,
    pub max_hp: i32,
    pub hp: i32,
}

impl Pico {
    pub fn new(species: &'static Species, level: i32) -> Self {
        let max_hp = species.hp * level / BASE_LEVEL;
        Self { species, level, max_hp, hp: max_hp }
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount).max(0);
    }

    /// Change level by `amount` (negative to lose levels) and rescale the
    /// hit point ceiling from its current value. Current hit points are
    /// left alone; healing is a separate step.
    pub fn level_up(&mut self, amount: i32) {
        let old = self.level;
        self.level += amount;
        self.max_hp = self.max_hp * self.level / old;
    }

    pub fn heal(&mut self) {
        self.hp = self.max_hp;
    }

    pub fn fainted(&self) -> bool {
        self.hp <= 0
    }
}

/// The player's team. One member is active at a time; the rest wait on
/// the bench until a switch, a faint, or a capture brings them in.
pub struct Party {
    members: Vec<Pico>,
    active: usize,
}

impl Party {
    pub const MAX: usize = 4;

    pub fn new() -> Self {
        Self { members: Vec::new(), active: 0 }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, slot: usize) -> Option<&Pico> {
        self.members.get(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pico> {
        self.members.iter()
    }

    pub fn active(&self) -> &Pico {
        &self.members[self.active]
    }

    pub fn active_mut(&mut self) -> &mut Pico {
        &mut self.members[self.active]
    }

    /// Add to the first free slot. False when the team is full.
    pub fn add(&mut self, pico: Pico) -> bool {
        if self.members.len() >= Self::MAX {
            return false;
        }
        self.members.push(pico);
        true
    }

    pub fn switch_to(&mut self, slot: usize) {
        if slot < self.members.len() {
            self.active = slot;
        }
    }

    /// Swap the member in `slot` for `pico`, make the slot active, and
    /// return the member that left.
    pub fn replace(&mut self, slot: usize, pico: Pico) -> Pico {
        let old = std::mem::replace(&mut self.members[slot], pico);
        self.active = slot;
        old
    }

    /// First slot holding a conscious member, scanning from the top.
    pub fn first_alive(&self) -> Option<usize> {
        self.members.iter().position(|p| !p.fainted())
    }

    pub fn heal_all(&mut self) {
        for pico in &mut self.members {
            pico.heal();
        }
    }
}

impl Default for Party {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::species_by_name;

    fn pico(name: &str, level: i32) -> Pico {
        Pico::new(species_by_name(name).unwrap(), level)
    }

    #[test]
    fn hit_points_scale_with_level() {
        assert_eq!(pico("Embash", 10).max_hp, 80);
        assert_eq!(pico("Embash", 12).max_hp, 96);
        // 55 * 13 / 10 truncates.
        assert_eq!(pico("Cinder", 13).max_hp, 71);
    }

    #[test]
    fn level_changes_rescale_the_ceiling_not_the_pool() {
        let mut p = pico("Embash", 10);
        p.take_damage(30);
        p.level_up(1);
        assert_eq!((p.level, p.max_hp, p.hp), (11, 88, 50));
        p.level_up(-1);
        assert_eq!((p.level, p.max_hp, p.hp), (10, 80, 50));
    }

    #[test]
    fn damage_floors_at_zero() {
        let mut p = pico("Hissnake", 10);
        p.take_damage(500);
        assert_eq!(p.hp, 0);
        assert!(p.fainted());
        p.heal();
        assert_eq!(p.hp, p.max_hp);
    }

    #[test]
    fn team_caps_at_four() {
        let mut party = Party::new();
        for _ in 0..Party::MAX {
            assert!(party.add(pico("Segbug", 10)));
        }
        assert!(!party.add(pico("Segbug", 10)));
        assert_eq!(party.len(), 4);
    }

    #[test]
    fn replace_swaps_the_slot_and_activates_it() {
        let mut party = Party::new();
        party.add(pico("Embash", 10));
        party.add(pico("Cinder", 10));
        let old = party.replace(1, pico("Poulter", 19));
        assert_eq!(old.species.name, "Cinder");
        assert_eq!(party.active().species.name, "Poulter");
    }

    #[test]
    fn switch_ignores_out_of_range_slots() {
        let mut party = Party::new();
        party.add(pico("Embash", 10));
        party.switch_to(3);
        assert_eq!(party.active().species.name, "Embash");
    }

    #[test]
    fn first_alive_skips_fainted_members() {
        let mut party = Party::new();
        party.add(pico("Embash", 10));
        party.add(pico("Cinder", 10));
        party.active_mut().take_damage(999);
        assert_eq!(party.first_alive(), Some(1));
        party.heal_all();
        assert_eq!(party.first_alive(), Some(0));
    }
}
