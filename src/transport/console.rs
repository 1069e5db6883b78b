//! Line-based console front end.
//!
//! Each input line is a command: `start`, `team`, or the callback data of
//! the offered button (`spin|1`, or just `spin`). Prefixing a line with
//! `as <player>` sends it on behalf of another player, which is how the
//! owner lock can be exercised from a single terminal.

use super::{callback_data, dispatch, Command, RenderError, Renderer};
use crate::creatures::CreatureProvider;
use crate::engine::{Control, ProgressionEngine};
use crate::session::PlayerId;
use rand::Rng;
use std::collections::HashMap;
use std::io::{BufRead, Write};

/// Renders turns as plain text on a writer.
pub struct ConsoleRenderer<W: Write> {
    out: W,
    last_rendered: HashMap<PlayerId, String>,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_rendered: HashMap::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_block(&mut self, block: &str) -> Result<(), RenderError> {
        writeln!(self.out, "{block}")
            .and_then(|_| self.out.flush())
            .map_err(|e| RenderError::Failed(e.to_string()))
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn render(
        &mut self,
        player_id: PlayerId,
        text: &str,
        control: Option<&Control>,
    ) -> Result<(), RenderError> {
        let mut block = format!("\n[player {player_id}]\n{text}");
        if let Some(control) = control {
            block.push_str(&format!("\n  [{}] → {}", control.label, callback_data(control)));
        }
        // Same content twice in a row is a no-op, like editing a message to itself
        if self.last_rendered.get(&player_id) == Some(&block) {
            return Err(RenderError::Unchanged);
        }
        self.write_block(&block)?;
        self.last_rendered.insert(player_id, block);
        Ok(())
    }

    fn notify(&mut self, player_id: PlayerId, notice: &str) -> Result<(), RenderError> {
        self.write_block(&format!("[player {player_id}] {notice}"))
    }
}

/// Split an optional `as <player>` prefix off an input line.
pub fn parse_line(line: &str, default_player: PlayerId) -> Option<(PlayerId, Command)> {
    let line = line.trim();
    if let Some(rest) = line.strip_prefix("as ") {
        let (player, command) = rest.trim_start().split_once(' ')?;
        let player = player.parse().ok()?;
        return Command::parse(command).map(|c| (player, c));
    }
    Command::parse(line).map(|c| (default_player, c))
}

/// Read commands until EOF or `quit`, rendering every turn.
pub fn run<P, R, I, W>(
    engine: &ProgressionEngine<P>,
    player_id: PlayerId,
    input: I,
    out: W,
    rng: &mut R,
) -> Result<(), RenderError>
where
    P: CreatureProvider,
    R: Rng,
    I: BufRead,
    W: Write,
{
    let mut renderer = ConsoleRenderer::new(out);
    dispatch(engine, &mut renderer, player_id, &Command::Start, rng)?;

    for line in input.lines() {
        let line = line.map_err(|e| RenderError::Failed(e.to_string()))?;
        if matches!(line.trim(), "quit" | "exit") {
            break;
        }
        match parse_line(&line, player_id) {
            Some((caller, command)) => dispatch(engine, &mut renderer, caller, &command, rng)?,
            None if line.trim().is_empty() => {}
            None => renderer.notify(player_id, "❓ Try: start, team, spin|<id>, fight|<id>")?,
        }
    }
    Ok(())
}
