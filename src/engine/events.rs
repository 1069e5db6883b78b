//! Roulette tables and adventure event effects.
//!
//! Weights are part of the game's contract: changing one changes how often
//! players see each outcome.

use crate::core::constants::{
    LEGENDARY_POWER_TIER, ROAMING_SHINY_CHANCE, SIDE_BATTLE_WIN_CHANCE,
};
use crate::core::weighted::{Weighted, WeightedTable};
use crate::creatures::{Creature, CreatureProvider, Generation};
use crate::session::{Gender, Placement, Session};
use rand::Rng;

/// Everything that can come up on an adventure spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdventureEvent {
    CatchPokemon,
    BattleTrainer,
    BuyPotions,
    Nothing,
    CatchTwo,
    VisitDaycare,
    TeamRocket,
    MysteriousEgg,
    Legendary,
    Trade,
    FindItem,
    ExploreCave,
    Snorlax,
    Multitask,
    Fishing,
    Fossil,
    Rival,
}

impl AdventureEvent {
    pub fn code(self) -> &'static str {
        match self {
            AdventureEvent::CatchPokemon => "CATCH_POKEMON",
            AdventureEvent::BattleTrainer => "BATTLE_TRAINER",
            AdventureEvent::BuyPotions => "BUY_POTIONS",
            AdventureEvent::Nothing => "NOTHING",
            AdventureEvent::CatchTwo => "CATCH_TWO",
            AdventureEvent::VisitDaycare => "VISIT_DAYCARE",
            AdventureEvent::TeamRocket => "TEAM_ROCKET",
            AdventureEvent::MysteriousEgg => "MYSTERIOUS_EGG",
            AdventureEvent::Legendary => "LEGENDARY",
            AdventureEvent::Trade => "TRADE",
            AdventureEvent::FindItem => "FIND_ITEM",
            AdventureEvent::ExploreCave => "EXPLORE_CAVE",
            AdventureEvent::Snorlax => "SNORLAX",
            AdventureEvent::Multitask => "MULTITASK",
            AdventureEvent::Fishing => "FISHING",
            AdventureEvent::Fossil => "FOSSIL",
            AdventureEvent::Rival => "RIVAL",
        }
    }

    /// Human-readable label ("CATCH_POKEMON" → "CATCH POKEMON").
    pub fn label(self) -> String {
        self.code().replace('_', " ")
    }

    /// How many creatures a capture-family event tries to catch.
    pub fn capture_count(self) -> usize {
        match self {
            AdventureEvent::CatchPokemon
            | AdventureEvent::ExploreCave
            | AdventureEvent::Fishing
            | AdventureEvent::Snorlax
            | AdventureEvent::VisitDaycare
            | AdventureEvent::MysteriousEgg
            | AdventureEvent::Legendary => 1,
            AdventureEvent::CatchTwo => 2,
            _ => 0,
        }
    }

    /// Potions granted by item-family events.
    pub fn potion_reward(self) -> u32 {
        match self {
            AdventureEvent::BuyPotions | AdventureEvent::FindItem | AdventureEvent::Fossil => 1,
            AdventureEvent::Multitask => 2,
            _ => 0,
        }
    }

    pub fn is_side_battle(self) -> bool {
        matches!(
            self,
            AdventureEvent::BattleTrainer | AdventureEvent::Rival | AdventureEvent::TeamRocket
        )
    }
}

const GENERATION_WEIGHTS: &[Weighted<Generation>] = &[
    Weighted::new(Generation(1), 1),
    Weighted::new(Generation(2), 1),
    Weighted::new(Generation(3), 1),
    Weighted::new(Generation(4), 1),
    Weighted::new(Generation(5), 1),
    Weighted::new(Generation(6), 1),
    Weighted::new(Generation(7), 1),
    Weighted::new(Generation(8), 1),
];

pub const GENERATION_TABLE: WeightedTable<Generation> = WeightedTable::new(GENERATION_WEIGHTS);

const GENDER_WEIGHTS: &[Weighted<Gender>] = &[
    Weighted::new(Gender::Male, 1),
    Weighted::new(Gender::Female, 1),
];

pub const GENDER_TABLE: WeightedTable<Gender> = WeightedTable::new(GENDER_WEIGHTS);

/// "What to do first?" before the first gym.
const START_ADVENTURE_WEIGHTS: &[Weighted<AdventureEvent>] = &[
    Weighted::new(AdventureEvent::CatchPokemon, 2),
    Weighted::new(AdventureEvent::BattleTrainer, 2),
    Weighted::new(AdventureEvent::BuyPotions, 2),
    Weighted::new(AdventureEvent::Nothing, 1), // go straight to the gym
];

pub const START_ADVENTURE_TABLE: WeightedTable<AdventureEvent> = WeightedTable::new(START_ADVENTURE_WEIGHTS);

/// Between gyms. Catching is three times as likely as anything else.
const MAIN_ADVENTURE_WEIGHTS: &[Weighted<AdventureEvent>] = &[
    Weighted::new(AdventureEvent::CatchPokemon, 3),
    Weighted::new(AdventureEvent::BattleTrainer, 1),
    Weighted::new(AdventureEvent::BuyPotions, 1),
    Weighted::new(AdventureEvent::Nothing, 1),
    Weighted::new(AdventureEvent::CatchTwo, 1),
    Weighted::new(AdventureEvent::VisitDaycare, 1),
    Weighted::new(AdventureEvent::TeamRocket, 1),
    Weighted::new(AdventureEvent::MysteriousEgg, 1),
    Weighted::new(AdventureEvent::Legendary, 1),
    Weighted::new(AdventureEvent::Trade, 1),
    Weighted::new(AdventureEvent::FindItem, 1),
    Weighted::new(AdventureEvent::ExploreCave, 1),
    Weighted::new(AdventureEvent::Snorlax, 1),
    Weighted::new(AdventureEvent::Multitask, 1),
    Weighted::new(AdventureEvent::Fishing, 1),
    Weighted::new(AdventureEvent::Fossil, 1),
    Weighted::new(AdventureEvent::Rival, 1),
];

pub const MAIN_ADVENTURE_TABLE: WeightedTable<AdventureEvent> = WeightedTable::new(MAIN_ADVENTURE_WEIGHTS);

/// One observable consequence of an adventure event.
#[derive(Debug, Clone, PartialEq)]
pub enum EventEffect {
    Caught {
        creature: Creature,
        placement: Placement,
    },
    /// The provider could not supply a creature; nothing was added.
    Escaped,
    PotionsFound(u32),
    SideBattleWon,
    SideBattleLost,
    Traded {
        given: Creature,
        received: Creature,
    },
    TradeFellThrough,
    NoTradePartner,
    Nothing,
}

/// Fetch a random creature from the session's generation with a roaming shiny roll.
fn fetch_roaming<P, R>(session: &Session, provider: &P, rng: &mut R) -> Option<Creature>
where
    P: CreatureProvider + ?Sized,
    R: Rng,
{
    match provider.fetch_random_in_generation(session.generation, &mut *rng) {
        Ok(creature) => {
            let shiny = rng.gen_bool(ROAMING_SHINY_CHANCE);
            Some(creature.with_shiny(shiny))
        }
        Err(error) => {
            tracing::warn!(player_id = session.player_id, %error, "roaming creature lookup failed");
            None
        }
    }
}

/// Apply an adventure event to the session and report what happened.
pub fn apply_event<P, R>(
    session: &mut Session,
    event: AdventureEvent,
    provider: &P,
    rng: &mut R,
) -> Vec<EventEffect>
where
    P: CreatureProvider + ?Sized,
    R: Rng,
{
    let mut effects = Vec::new();

    let captures = event.capture_count();
    if captures > 0 {
        for _ in 0..captures {
            match fetch_roaming(session, provider, rng) {
                Some(mut creature) => {
                    if event == AdventureEvent::Legendary {
                        creature.power = LEGENDARY_POWER_TIER;
                    }
                    let placement = session.add_creature(creature.clone());
                    effects.push(EventEffect::Caught {
                        creature,
                        placement,
                    });
                }
                None => effects.push(EventEffect::Escaped),
            }
        }
        return effects;
    }

    let potions = event.potion_reward();
    if potions > 0 {
        session.add_potions(potions);
        effects.push(EventEffect::PotionsFound(potions));
        return effects;
    }

    if event.is_side_battle() {
        if rng.gen_bool(SIDE_BATTLE_WIN_CHANCE) {
            session.add_potions(1);
            effects.push(EventEffect::SideBattleWon);
        } else {
            effects.push(EventEffect::SideBattleLost);
        }
        return effects;
    }

    if event == AdventureEvent::Trade {
        if session.team.is_empty() {
            effects.push(EventEffect::NoTradePartner);
            return effects;
        }
        match fetch_roaming(session, provider, rng) {
            Some(received) => {
                let slot = rng.gen_range(0..session.team.len());
                let given = std::mem::replace(&mut session.team[slot], received.clone());
                effects.push(EventEffect::Traded { given, received });
            }
            None => effects.push(EventEffect::TradeFellThrough),
        }
        return effects;
    }

    effects.push(EventEffect::Nothing);
    effects
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_shapes() {
        assert_eq!(GENERATION_TABLE.entries().len(), 8);
        assert_eq!(GENERATION_TABLE.total_weight(), 8);
        assert_eq!(GENDER_TABLE.total_weight(), 2);
        assert_eq!(START_ADVENTURE_TABLE.entries().len(), 4);
        assert_eq!(START_ADVENTURE_TABLE.total_weight(), 7);
        assert_eq!(MAIN_ADVENTURE_TABLE.entries().len(), 17);
        assert_eq!(MAIN_ADVENTURE_TABLE.total_weight(), 19);
    }

    #[test]
    fn test_catch_is_the_only_heavy_main_outcome() {
        for entry in MAIN_ADVENTURE_TABLE.entries() {
            let expected = if entry.outcome == AdventureEvent::CatchPokemon { 3 } else { 1 };
            assert_eq!(entry.weight, expected, "{:?}", entry.outcome);
        }
    }

    #[test]
    fn test_all_weights_positive() {
        assert!(GENERATION_TABLE.entries().iter().all(|e| e.weight > 0));
        assert!(GENDER_TABLE.entries().iter().all(|e| e.weight > 0));
        assert!(START_ADVENTURE_TABLE.entries().iter().all(|e| e.weight > 0));
        assert!(MAIN_ADVENTURE_TABLE.entries().iter().all(|e| e.weight > 0));
    }

    #[test]
    fn test_generation_table_covers_every_generation() {
        let gens: Vec<_> = GENERATION_TABLE.entries().iter().map(|e| e.outcome).collect();
        assert_eq!(gens, Generation::all().collect::<Vec<_>>());
    }

    #[test]
    fn test_event_families() {
        assert_eq!(AdventureEvent::CatchTwo.capture_count(), 2);
        assert_eq!(AdventureEvent::Legendary.capture_count(), 1);
        assert_eq!(AdventureEvent::Trade.capture_count(), 0);
        assert_eq!(AdventureEvent::Multitask.potion_reward(), 2);
        assert_eq!(AdventureEvent::Fossil.potion_reward(), 1);
        assert!(AdventureEvent::Rival.is_side_battle());
        assert!(!AdventureEvent::Nothing.is_side_battle());
        assert_eq!(AdventureEvent::MysteriousEgg.label(), "MYSTERIOUS EGG");
    }
}
