//! Per-player progression session data.

use crate::core::constants::{MAX_BADGES, MAX_TEAM_SIZE, POTION_ID, STARTING_POTIONS};
use crate::creatures::{Creature, Generation};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;

/// Chat/user identifier of the player who owns a session.
pub type PlayerId = u64;

/// Where a career currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    GenRoulette,
    GenderRoulette,
    StarterRoulette,
    StartAdventure,
    GymBattle,
    Evolution,
    Adventure,
    GameOver,
    Victory,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameState::GameOver | GameState::Victory)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameState::GenRoulette => "GEN_ROULETTE",
            GameState::GenderRoulette => "GENDER_ROULETTE",
            GameState::StarterRoulette => "STARTER_ROULETTE",
            GameState::StartAdventure => "START_ADVENTURE",
            GameState::GymBattle => "GYM_BATTLE",
            GameState::Evolution => "EVOLUTION",
            GameState::Adventure => "ADVENTURE",
            GameState::GameOver => "GAME_OVER",
            GameState::Victory => "VICTORY",
        };
        f.write_str(name)
    }
}

/// Avatar gender picked by the gender roulette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub fn avatar(self) -> &'static str {
        match self {
            Gender::Male => "Boy",
            Gender::Female => "Girl",
        }
    }
}

/// A stack of one kind of item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: String,
    pub count: u32,
}

impl Item {
    /// A fresh stack using the catalog name and description for `id`.
    pub fn new(id: &str, count: u32) -> Self {
        let (name, description) = catalog_entry(id);
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            count,
        }
    }
}

/// Display name and description for known item ids.
fn catalog_entry(id: &str) -> (&str, &'static str) {
    match id {
        POTION_ID => ("Potion", "Retry a battle"),
        other => (other, ""),
    }
}

/// Items keyed by id; one stack per id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Inventory {
    items: BTreeMap<String, Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, id: &str) -> u32 {
        self.items.get(id).map_or(0, |item| item.count)
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    /// Add `amount` of `id`, creating the stack if needed.
    pub fn add(&mut self, id: &str, amount: u32) {
        self.items
            .entry(id.to_string())
            .and_modify(|item| item.count = item.count.saturating_add(amount))
            .or_insert_with(|| Item::new(id, amount));
    }

    /// Consume one `id`. Returns false (and changes nothing) when none are left.
    pub fn consume(&mut self, id: &str) -> bool {
        match self.items.get_mut(id) {
            Some(item) if item.count > 0 => {
                item.count -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Where a newly acquired creature ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Team,
    Storage,
}

/// One player's in-progress career.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub player_id: PlayerId,
    pub state: GameState,
    pub generation: Generation,
    pub gender: Gender,
    /// Completed gym battles; also the difficulty input for the next one.
    pub round: u32,
    pub badges: u32,
    pub team: Vec<Creature>,
    pub storage: Vec<Creature>,
    pub inventory: Inventory,
    pub started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(player_id: PlayerId) -> Self {
        let mut inventory = Inventory::new();
        inventory.add(POTION_ID, STARTING_POTIONS);
        Self {
            player_id,
            state: GameState::GenRoulette,
            generation: Generation::FIRST,
            gender: Gender::default(),
            round: 0,
            badges: 0,
            team: Vec::new(),
            storage: Vec::new(),
            inventory,
            started_at: Utc::now(),
        }
    }

    /// Put a creature on the team, or in storage once the team is full.
    pub fn add_creature(&mut self, creature: Creature) -> Placement {
        if self.team.len() < MAX_TEAM_SIZE {
            self.team.push(creature);
            Placement::Team
        } else {
            self.storage.push(creature);
            Placement::Storage
        }
    }

    pub fn potions(&self) -> u32 {
        self.inventory.count(POTION_ID)
    }

    pub fn add_potions(&mut self, amount: u32) {
        self.inventory.add(POTION_ID, amount);
    }

    /// Spend a potion for a retry. False once none are left.
    pub fn use_potion(&mut self) -> bool {
        self.inventory.consume(POTION_ID)
    }

    /// Badge and round move together; badges stop at the gym count.
    pub fn record_gym_win(&mut self) {
        self.badges = (self.badges + 1).min(MAX_BADGES);
        self.round += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mon(id: u32) -> Creature {
        Creature::from_stats(id, format!("Mon{id}"), 300, false)
    }

    #[test]
    fn test_new_session_defaults() {
        let s = Session::new(7);
        assert_eq!(s.player_id, 7);
        assert_eq!(s.state, GameState::GenRoulette);
        assert_eq!(s.generation, Generation::FIRST);
        assert_eq!(s.round, 0);
        assert_eq!(s.badges, 0);
        assert!(s.team.is_empty());
        assert!(s.storage.is_empty());
        assert_eq!(s.potions(), 1);
        let potion = s.inventory.get(POTION_ID).unwrap();
        assert_eq!(potion.name, "Potion");
        assert_eq!(potion.description, "Retry a battle");
    }

    #[test]
    fn test_use_potion_until_empty() {
        let mut s = Session::new(1);
        assert!(s.use_potion());
        assert_eq!(s.potions(), 0);
        for _ in 0..5 {
            assert!(!s.use_potion());
            assert_eq!(s.potions(), 0);
        }
    }

    #[test]
    fn test_add_creature_overflows_to_storage() {
        let mut s = Session::new(1);
        for id in 1..=6 {
            assert_eq!(s.add_creature(mon(id)), Placement::Team);
        }
        assert_eq!(s.add_creature(mon(7)), Placement::Storage);
        assert_eq!(s.team.len(), 6);
        assert_eq!(s.storage.len(), 1);
    }

    #[test]
    fn test_record_gym_win_caps_badges() {
        let mut s = Session::new(1);
        s.badges = 8;
        s.round = 8;
        s.record_gym_win();
        assert_eq!(s.badges, 8);
        assert_eq!(s.round, 9);
    }

    #[test]
    fn test_inventory_generic_ids() {
        let mut inv = Inventory::new();
        inv.add("rare-candy", 2);
        assert_eq!(inv.count("rare-candy"), 2);
        assert_eq!(inv.get("rare-candy").unwrap().name, "rare-candy");
        assert!(inv.consume("rare-candy"));
        assert!(!inv.consume("missing"));
        assert_eq!(inv.iter().count(), 1);
    }

    #[test]
    fn test_terminal_states() {
        assert!(GameState::Victory.is_terminal());
        assert!(GameState::GameOver.is_terminal());
        assert!(!GameState::GymBattle.is_terminal());
        assert_eq!(GameState::StartAdventure.to_string(), "START_ADVENTURE");
    }
}
