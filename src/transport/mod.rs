//! Glue between a chat-style front end and the progression engine.
//!
//! Controls are locked to their owner: the callback data carried by a
//! button is `"<action>|<owner>"`, and a press by anyone else is rejected
//! here, before the engine ever sees it. Rendering goes through the
//! [`Renderer`] trait; a renderer reporting "content unchanged" is benign.

pub mod console;

#[cfg(feature = "web")]
pub mod web;

use crate::creatures::CreatureProvider;
use crate::engine::{Action, ActionError, Control, ProgressionEngine, Turn};
use crate::session::PlayerId;
use rand::Rng;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("content unchanged")]
    Unchanged,

    #[error("render failed: {0}")]
    Failed(String),
}

/// Something that can show text and a single control to a player.
pub trait Renderer {
    fn render(
        &mut self,
        player_id: PlayerId,
        text: &str,
        control: Option<&Control>,
    ) -> Result<(), RenderError>;

    /// Short pop-up style notice (rejected presses and the like).
    fn notify(&mut self, player_id: PlayerId, notice: &str) -> Result<(), RenderError>;
}

/// Render a turn, swallowing "content unchanged".
pub fn deliver<D: Renderer + ?Sized>(
    renderer: &mut D,
    player_id: PlayerId,
    turn: &Turn,
) -> Result<(), RenderError> {
    match renderer.render(player_id, &turn.narrative, turn.control.as_ref()) {
        Err(RenderError::Unchanged) => {
            tracing::debug!(player_id, "render skipped, content unchanged");
            Ok(())
        }
        other => other,
    }
}

/// Encode a control as button callback data.
pub fn callback_data(control: &Control) -> String {
    format!("{}|{}", control.action.tag(), control.owner)
}

/// A decoded button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Callback {
    pub action: Action,
    /// Owner baked into the button, if any.
    pub owner: Option<PlayerId>,
}

pub fn parse_callback(data: &str) -> Result<Callback, ActionError> {
    let (tag, owner) = match data.split_once('|') {
        Some((tag, owner)) => (tag, Some(owner)),
        None => (data, None),
    };
    let action = tag.parse()?;
    let owner = match owner {
        Some(raw) => Some(
            raw.trim()
                .parse()
                .map_err(|_| ActionError::UnknownAction(data.to_string()))?,
        ),
        None => None,
    };
    Ok(Callback { action, owner })
}

/// Only the owner of a locked control may press it.
pub fn authorize(callback: &Callback, caller: PlayerId) -> Result<(), ActionError> {
    match callback.owner {
        Some(owner) if owner != caller => Err(ActionError::NotYourSession { owner, caller }),
        _ => Ok(()),
    }
}

/// A line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Team,
    Press(String),
}

impl Command {
    /// `/start`, `/team`, or anything else as button callback data.
    pub fn parse(input: &str) -> Option<Command> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        Some(match input.trim_start_matches('/') {
            "start" => Command::Start,
            "team" => Command::Team,
            _ => Command::Press(input.to_string()),
        })
    }
}

/// Run one command for `caller` and render the result.
///
/// Rejected presses become notices; only render failures escape.
pub fn dispatch<P, R, D>(
    engine: &ProgressionEngine<P>,
    renderer: &mut D,
    caller: PlayerId,
    command: &Command,
    rng: &mut R,
) -> Result<(), RenderError>
where
    P: CreatureProvider,
    R: Rng,
    D: Renderer + ?Sized,
{
    match command {
        Command::Start => deliver(renderer, caller, &engine.start(caller)),
        Command::Team => {
            let status = engine.status(caller);
            match renderer.render(caller, &status, None) {
                Err(RenderError::Unchanged) => Ok(()),
                other => other,
            }
        }
        Command::Press(data) => {
            let pressed = parse_callback(data).and_then(|callback| {
                authorize(&callback, caller)?;
                engine.on_action(caller, callback.action, rng)
            });
            match pressed {
                Ok(turn) => deliver(renderer, caller, &turn),
                Err(error) => {
                    tracing::info!(player_id = caller, %error, "action rejected");
                    renderer.notify(caller, error.notice())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        rendered: Vec<String>,
        notices: Vec<String>,
        fail_with: Option<RenderError>,
    }

    impl Renderer for Recorder {
        fn render(
            &mut self,
            _player_id: PlayerId,
            text: &str,
            _control: Option<&Control>,
        ) -> Result<(), RenderError> {
            if let Some(err) = self.fail_with.clone() {
                return Err(err);
            }
            self.rendered.push(text.to_string());
            Ok(())
        }

        fn notify(&mut self, _player_id: PlayerId, notice: &str) -> Result<(), RenderError> {
            self.notices.push(notice.to_string());
            Ok(())
        }
    }

    fn turn() -> Turn {
        Turn {
            narrative: "hello".to_string(),
            control: None,
        }
    }

    #[test]
    fn test_callback_roundtrip_with_owner() {
        let control = Control {
            label: "🎲 Spin",
            action: Action::Spin,
            owner: 77,
        };
        let data = callback_data(&control);
        assert_eq!(data, "spin|77");
        let callback = parse_callback(&data).unwrap();
        assert_eq!(callback.action, Action::Spin);
        assert_eq!(callback.owner, Some(77));
    }

    #[test]
    fn test_parse_callback_without_owner() {
        let callback = parse_callback("fight").unwrap();
        assert_eq!(callback.owner, None);
        assert!(authorize(&callback, 5).is_ok());
    }

    #[test]
    fn test_parse_callback_rejects_bad_owner() {
        assert!(parse_callback("spin|abc").is_err());
        assert!(parse_callback("dance|1").is_err());
    }

    #[test]
    fn test_authorize_rejects_other_player() {
        let callback = Callback {
            action: Action::Spin,
            owner: Some(1),
        };
        assert_eq!(
            authorize(&callback, 2),
            Err(ActionError::NotYourSession {
                owner: 1,
                caller: 2
            })
        );
        assert!(authorize(&callback, 1).is_ok());
    }

    #[test]
    fn test_deliver_swallows_unchanged() {
        let mut r = Recorder {
            fail_with: Some(RenderError::Unchanged),
            ..Default::default()
        };
        assert!(deliver(&mut r, 1, &turn()).is_ok());
    }

    #[test]
    fn test_deliver_propagates_failures() {
        let mut r = Recorder {
            fail_with: Some(RenderError::Failed("socket closed".to_string())),
            ..Default::default()
        };
        assert!(matches!(deliver(&mut r, 1, &turn()), Err(RenderError::Failed(_))));
    }

    #[test]
    fn test_command_parse() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("team"), Some(Command::Team));
        assert_eq!(
            Command::parse(" spin|3 "),
            Some(Command::Press("spin|3".to_string()))
        );
        assert_eq!(Command::parse("   "), None);
    }
}
