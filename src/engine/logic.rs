//! The progression state machine.
//!
//! [`advance`] runs one accepted action against a session: it matches on the
//! current state, does the work (including provider lookups), picks the next
//! state, and returns the narrative plus the next control. The work happens
//! on a copy of the session which is committed in one assignment, so a
//! session is never observed half-way through a transition.

use super::action::{Action, ActionError, Control, Turn};
use super::events::{
    apply_event, AdventureEvent, GENDER_TABLE, GENERATION_TABLE, MAIN_ADVENTURE_TABLE,
    START_ADVENTURE_TABLE,
};
use super::narrative::{
    describe_effects, describe_evolution, final_summary, gym_banner, status_text,
};
use crate::core::battle::resolve_battle;
use crate::core::constants::{MAX_BADGES, STARTER_SHINY_CHANCE, VICTORY_MIN_ROUND};
use crate::creatures::{resolve_evolution, CreatureProvider};
use crate::session::{lock_session, GameState, PlayerId, Session, SessionStore};
use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;

/// Text and control offered to a player who just (re)started.
pub fn opening_turn(player_id: PlayerId) -> Turn {
    Turn {
        narrative: "🎰 *Pokemon Roulette Started!* \nFirst up: Which Generation will you play?"
            .to_string(),
        control: Some(Control {
            label: "🎲 Spin Generation",
            action: Action::Spin,
            owner: player_id,
        }),
    }
}

/// Run one action against a session.
///
/// Rejects an action the current state does not accept and leaves the
/// session untouched in that case.
pub fn advance<P, R>(
    session: &mut Session,
    action: Action,
    provider: &P,
    rng: &mut R,
) -> Result<Turn, ActionError>
where
    P: CreatureProvider + ?Sized,
    R: Rng,
{
    if let Some(expected) = Action::expected_for(session.state) {
        if expected != action {
            return Err(ActionError::WrongAction {
                state: session.state,
                expected,
                got: action,
            });
        }
    }

    let mut next = session.clone();
    let turn = step(&mut next, provider, rng);
    if next.state != session.state {
        tracing::info!(
            player_id = session.player_id,
            from = %session.state,
            to = %next.state,
            "transition"
        );
    }
    *session = next;
    Ok(turn)
}

fn control(session: &Session, label: &'static str, action: Action) -> Option<Control> {
    Some(Control {
        label,
        action,
        owner: session.player_id,
    })
}

fn step<P, R>(s: &mut Session, provider: &P, rng: &mut R) -> Turn
where
    P: CreatureProvider + ?Sized,
    R: Rng,
{
    match s.state {
        GameState::GenRoulette => {
            s.generation = GENERATION_TABLE.pick(rng);
            s.state = GameState::GenderRoulette;
            Turn {
                narrative: format!(
                    "🌍 *Generation {}* selected!\nNext: Are you a Boy or a Girl?",
                    s.generation
                ),
                control: control(s, "🎲 Spin Gender", Action::Spin),
            }
        }

        GameState::GenderRoulette => {
            s.gender = GENDER_TABLE.pick(rng);
            s.state = GameState::StarterRoulette;
            Turn {
                narrative: format!(
                    "👤 You are a *{}*!\nNext: Who will be your partner?",
                    s.gender.avatar()
                ),
                control: control(s, "🎲 Spin Starter", Action::Spin),
            }
        }

        GameState::StarterRoulette => starter_roulette(s, provider, rng),

        GameState::StartAdventure => {
            let event = START_ADVENTURE_TABLE.pick(rng);
            adventure(s, event, provider, rng)
        }

        GameState::GymBattle => gym_battle(s, rng),

        GameState::Evolution => {
            let outcome = resolve_evolution(&mut s.team, provider, rng);
            s.state = GameState::Adventure;
            Turn {
                narrative: describe_evolution(&outcome),
                control: control(s, "🌲 Continue Adventure", Action::Spin),
            }
        }

        GameState::Adventure => {
            let event = MAIN_ADVENTURE_TABLE.pick(rng);
            adventure(s, event, provider, rng)
        }

        GameState::GameOver | GameState::Victory => Turn {
            narrative: final_summary(s, Utc::now()),
            control: None,
        },
    }
}

fn starter_roulette<P, R>(s: &mut Session, provider: &P, rng: &mut R) -> Turn
where
    P: CreatureProvider + ?Sized,
    R: Rng,
{
    let Some(pick) = s.generation.starters().choose(rng).copied() else {
        // Every generation has starters; stay put rather than skip ahead.
        return Turn {
            narrative: "📦 No starters found for this generation.".to_string(),
            control: control(s, "🎲 Spin Starter", Action::Spin),
        };
    };
    let shiny = rng.gen_bool(STARTER_SHINY_CHANCE);

    match provider.fetch_by_id(pick.species_id, shiny) {
        Ok(starter) => {
            let mut narrative = format!("📦 You obtained *{}*!", starter.name);
            if starter.shiny {
                narrative.push_str("\n✨ *SHINY ALERT!* Your starter is Shiny! ✨");
            }
            narrative.push_str("\n\n🤔 *What to do first?*");
            s.add_creature(starter);
            s.state = GameState::StartAdventure;
            Turn {
                narrative,
                control: control(s, "🎲 Spin First Event", Action::Spin),
            }
        }
        Err(error) => {
            tracing::warn!(
                player_id = s.player_id,
                species = pick.species_id,
                %error,
                "starter lookup failed"
            );
            Turn {
                narrative: format!(
                    "📦 {}'s Poké Ball would not open. Spin again!",
                    pick.name
                ),
                control: control(s, "🎲 Spin Starter", Action::Spin),
            }
        }
    }
}

fn adventure<P, R>(s: &mut Session, event: AdventureEvent, provider: &P, rng: &mut R) -> Turn
where
    P: CreatureProvider + ?Sized,
    R: Rng,
{
    tracing::debug!(player_id = s.player_id, event = event.code(), "adventure event");
    let effects = apply_event(s, event, provider, rng);
    s.state = GameState::GymBattle;
    Turn {
        narrative: format!("{}\n\n{}", describe_effects(event, &effects), gym_banner(s)),
        control: control(s, "⚔️ Battle Gym Leader", Action::Fight),
    }
}

fn gym_battle<R: Rng>(s: &mut Session, rng: &mut R) -> Turn {
    let roll = resolve_battle(&s.team, s.round, rng);

    if roll.won {
        let had_all_badges = s.badges >= MAX_BADGES;
        s.record_gym_win();
        let mut narrative = if had_all_badges {
            "🎉 *VICTORY!* The Champion has fallen!".to_string()
        } else {
            format!("🎉 *VICTORY!* Badge #{} obtained!", s.badges)
        };
        if s.badges >= MAX_BADGES && s.round >= VICTORY_MIN_ROUND {
            s.state = GameState::Victory;
            narrative.push_str("\n\n🏆 *CHAMPION!* You defeated everyone!");
            return Turn {
                narrative,
                control: control(s, "🏁 Hall of Fame", Action::Spin),
            };
        }
        s.state = GameState::Evolution;
        return Turn {
            narrative,
            control: control(s, "🧬 Spin Evolution", Action::Spin),
        };
    }

    if s.use_potion() {
        Turn {
            narrative: "💥 *DEFEAT!* You used a Potion to revive your team. Try again?"
                .to_string(),
            control: control(s, "⚔️ Retry Battle", Action::Fight),
        }
    } else {
        s.state = GameState::GameOver;
        Turn {
            narrative: "☠️ *GAME OVER* You have no Potions left.".to_string(),
            control: control(s, "🏁 See Final Team", Action::Spin),
        }
    }
}

/// Owns the session store and the creature provider, and runs player
/// actions against them.
pub struct ProgressionEngine<P> {
    store: SessionStore,
    provider: P,
}

impl<P: CreatureProvider> ProgressionEngine<P> {
    pub fn new(store: SessionStore, provider: P) -> Self {
        Self { store, provider }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Reset the player's session and offer the first spin.
    ///
    /// An action already running for this player finishes first and is
    /// then wiped by the reset.
    pub fn start(&self, player_id: PlayerId) -> Turn {
        self.store.reset(player_id);
        opening_turn(player_id)
    }

    /// Handle one action. The session lock is held for the whole action.
    pub fn on_action<R: Rng>(
        &self,
        player_id: PlayerId,
        action: Action,
        rng: &mut R,
    ) -> Result<Turn, ActionError> {
        let handle = self.store.get(player_id);
        let mut session = lock_session(&handle);
        advance(&mut session, action, &self.provider, rng)
    }

    /// The ID card for a player, creating the session if needed.
    pub fn status(&self, player_id: PlayerId) -> String {
        let handle = self.store.get(player_id);
        let session = lock_session(&handle);
        status_text(&session)
    }

    pub fn state_of(&self, player_id: PlayerId) -> GameState {
        let handle = self.store.get(player_id);
        let session = lock_session(&handle);
        session.state
    }
}
