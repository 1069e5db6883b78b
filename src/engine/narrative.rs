//! Player-facing text: event write-ups, the ID card, and end screens.

use super::events::{AdventureEvent, EventEffect};
use crate::core::constants::{GYM_COUNT, MAX_BADGES};
use crate::creatures::EvolutionOutcome;
use crate::session::{GameState, Placement, Session};
use chrono::{DateTime, Utc};

pub fn describe_effects(event: AdventureEvent, effects: &[EventEffect]) -> String {
    let mut text = format!("🎲 *Event:* {}\n", event.label());
    for effect in effects {
        let line = match effect {
            EventEffect::Caught {
                creature,
                placement: Placement::Team,
            } => format!(
                "✅ Caught *{}*! {}",
                creature.name,
                if creature.shiny { "✨" } else { "" }
            ),
            EventEffect::Caught {
                creature,
                placement: Placement::Storage,
            } => format!("📦 Caught *{}* (Sent to PC)", creature.name),
            EventEffect::Escaped => "💨 It got away...".to_string(),
            EventEffect::PotionsFound(n) => format!("🧪 Found {n} Potion(s)!"),
            EventEffect::SideBattleWon => "⚔️ Won the battle! +1 Potion.".to_string(),
            EventEffect::SideBattleLost => "😵 Lost the battle (Fled).".to_string(),
            EventEffect::Traded { given, received } => {
                format!("🔄 Traded *{}* for *{}*!", given.name, received.name)
            }
            EventEffect::TradeFellThrough => "🔄 The trade fell through.".to_string(),
            EventEffect::NoTradePartner => "(No Pokemon to trade)".to_string(),
            EventEffect::Nothing => "(Nothing happened)".to_string(),
        };
        text.push_str(line.trim_end());
        text.push('\n');
    }
    text.trim_end().to_string()
}

pub fn describe_evolution(outcome: &EvolutionOutcome) -> String {
    match outcome {
        EvolutionOutcome::Evolved { old, new, .. } => format!(
            "🧬 *Evolution Time!* \nWhat? {old} is evolving... \n\n🎉 Congratulations! Your *{old}* evolved into *{new}*! \n(New Power: {power})",
            old = old.name,
            new = new.name,
            power = new.power
        ),
        EvolutionOutcome::Failed { old, .. } => {
            format!("🧬 {} tried to evolve but failed!", old.name)
        }
        EvolutionOutcome::NoneEligible => {
            "🧬 You watched your team, but none of them can evolve right now.".to_string()
        }
    }
}

/// Banner for the next gym fight; the ninth fight is the Champion.
pub fn gym_banner(session: &Session) -> String {
    if session.round == 0 {
        "🏛️ *First Gym Battle* approaching!".to_string()
    } else if session.badges >= MAX_BADGES {
        "👑 The *Champion* awaits!".to_string()
    } else {
        format!("🏛️ *Gym Battle #{}* upcoming!", session.badges + 1)
    }
}

/// The ID card: avatar, progress, items and team. Valid in any state.
pub fn status_text(session: &Session) -> String {
    let team = if session.team.is_empty() {
        "None".to_string()
    } else {
        session
            .team
            .iter()
            .map(|c| c.label())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let items = if session.inventory.is_empty() {
        "Empty".to_string()
    } else {
        session
            .inventory
            .iter()
            .map(|i| format!("{} x{}", i.name, i.count))
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "🆔 *ID Card*\n👤 {} | Gen: {}\n🏅 Badges: {} | Round: {}/{}\n🎒 Items: {}\n👥 Team: {}\n💻 PC: {}",
        session.gender.avatar(),
        session.generation,
        session.badges,
        session.round,
        GYM_COUNT,
        items,
        team,
        session.storage.len()
    )
}

fn format_play_time(started_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = (now - started_at).num_seconds().max(0);
    let (hours, minutes, seconds) = (elapsed / 3600, (elapsed % 3600) / 60, elapsed % 60);
    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else {
        format!("{minutes}m {seconds}s")
    }
}

/// End screen shown for every action once the career is over.
pub fn final_summary(session: &Session, now: DateTime<Utc>) -> String {
    let title = match session.state {
        GameState::Victory => "🏆 HALL OF FAME 🏆",
        _ => "☠️ GAME OVER ☠️",
    };
    format!(
        "{title}\n\n{}\n⏱️ Played for {}\n\n/start to play again.",
        status_text(session),
        format_play_time(session.started_at, now)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creatures::Creature;
    use chrono::Duration;

    fn mon(name: &str, shiny: bool) -> Creature {
        Creature::from_stats(1, name, 500, shiny)
    }

    #[test]
    fn test_describe_capture_lines() {
        let effects = vec![
            EventEffect::Caught {
                creature: mon("Eevee", true),
                placement: Placement::Team,
            },
            EventEffect::Caught {
                creature: mon("Ditto", false),
                placement: Placement::Storage,
            },
        ];
        let text = describe_effects(AdventureEvent::CatchTwo, &effects);
        assert!(text.starts_with("🎲 *Event:* CATCH TWO"));
        assert!(text.contains("✅ Caught *Eevee*! ✨"));
        assert!(text.contains("📦 Caught *Ditto* (Sent to PC)"));
    }

    #[test]
    fn test_describe_nothing() {
        let text = describe_effects(AdventureEvent::Nothing, &[EventEffect::Nothing]);
        assert!(text.ends_with("(Nothing happened)"));
    }

    #[test]
    fn test_status_text_fresh_session() {
        let s = Session::new(1);
        let text = status_text(&s);
        assert!(text.contains("Badges: 0 | Round: 0/8"));
        assert!(text.contains("Items: Potion x1"));
        assert!(text.contains("Team: None"));
    }

    #[test]
    fn test_status_lists_team() {
        let mut s = Session::new(1);
        s.team.push(mon("Pikachu", true));
        assert!(status_text(&s).contains("✨Pikachu (Pw:3)"));
    }

    #[test]
    fn test_gym_banner() {
        let mut s = Session::new(1);
        assert!(gym_banner(&s).contains("First Gym Battle"));
        s.round = 3;
        s.badges = 3;
        assert!(gym_banner(&s).contains("#4"));
        s.round = 8;
        s.badges = 8;
        assert!(gym_banner(&s).contains("Champion"));
    }

    #[test]
    fn test_final_summary_titles() {
        let mut s = Session::new(1);
        s.state = GameState::Victory;
        let now = s.started_at + Duration::seconds(125);
        let text = final_summary(&s, now);
        assert!(text.starts_with("🏆 HALL OF FAME 🏆"));
        assert!(text.contains("Played for 2m 5s"));
        s.state = GameState::GameOver;
        assert!(final_summary(&s, now).starts_with("☠️ GAME OVER ☠️"));
    }
}
