//! Player actions, the controls offered back, and action rejections.

use crate::session::{GameState, PlayerId};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// What the player pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Spin,
    Fight,
}

impl Action {
    pub fn tag(self) -> &'static str {
        match self {
            Action::Spin => "spin",
            Action::Fight => "fight",
        }
    }

    /// The action a state accepts. Terminal states accept anything.
    pub fn expected_for(state: GameState) -> Option<Action> {
        match state {
            GameState::GymBattle => Some(Action::Fight),
            GameState::GameOver | GameState::Victory => None,
            _ => Some(Action::Spin),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Action {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "spin" => Ok(Action::Spin),
            "fight" => Ok(Action::Fight),
            other => Err(ActionError::UnknownAction(other.to_string())),
        }
    }
}

/// The single button offered after a turn, locked to its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub label: &'static str,
    pub action: Action,
    pub owner: PlayerId,
}

/// Result of one accepted action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub narrative: String,
    /// None once the career is over.
    pub control: Option<Control>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("expected {expected} in state {state}, got {got}")]
    WrongAction {
        state: GameState,
        expected: Action,
        got: Action,
    },

    #[error("player {caller} pressed a control owned by player {owner}")]
    NotYourSession { owner: PlayerId, caller: PlayerId },

    #[error("unknown action '{0}'")]
    UnknownAction(String),
}

impl ActionError {
    /// Short notice shown to the player. Never includes internal details.
    pub fn notice(&self) -> &'static str {
        match self {
            ActionError::WrongAction { .. } => "⌛ That button is out of date. Use the latest one.",
            ActionError::NotYourSession { .. } => {
                "🚫 This is not your game session! Type /start to play."
            }
            ActionError::UnknownAction(_) => "❓ Unknown action.",
        }
    }
}
