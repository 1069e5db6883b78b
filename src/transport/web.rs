//! WebSocket front end.
//!
//! Every connection is one player. Clients send JSON such as
//! `{"command": "start"}` or `{"press": "spin|1001"}` and receive
//! `{"player": 1001, "text": "...", "control": {"label": "...", "data": "spin|1001"}}`
//! or `{"player": 1001, "notice": "..."}`. Engine work runs on the blocking
//! pool so a slow provider lookup for one player never stalls another.

use super::{callback_data, dispatch, Command, RenderError, Renderer};
use crate::creatures::CreatureProvider;
use crate::engine::{Control, ProgressionEngine};
use crate::session::PlayerId;
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;

/// First player id handed out to web connections.
const FIRST_WEB_PLAYER: PlayerId = 1000;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Inbound {
    Command { command: String },
    Press { press: String },
}

#[derive(Debug, Serialize, PartialEq)]
struct OutboundControl {
    label: String,
    data: String,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(untagged)]
enum Outbound {
    Turn {
        player: PlayerId,
        text: String,
        control: Option<OutboundControl>,
    },
    Notice {
        player: PlayerId,
        notice: String,
    },
}

/// Collects rendered output for one connection until it is flushed to the socket.
#[derive(Default)]
struct Outbox {
    pending: Vec<Outbound>,
    last_text: Option<String>,
}

impl Renderer for Outbox {
    fn render(
        &mut self,
        player_id: PlayerId,
        text: &str,
        control: Option<&Control>,
    ) -> Result<(), RenderError> {
        let control = control.map(|c| OutboundControl {
            label: c.label.to_string(),
            data: callback_data(c),
        });
        let key = format!("{text}{control:?}");
        if self.last_text.as_deref() == Some(key.as_str()) {
            return Err(RenderError::Unchanged);
        }
        self.last_text = Some(key);
        self.pending.push(Outbound::Turn {
            player: player_id,
            text: text.to_string(),
            control,
        });
        Ok(())
    }

    fn notify(&mut self, player_id: PlayerId, notice: &str) -> Result<(), RenderError> {
        self.pending.push(Outbound::Notice {
            player: player_id,
            notice: notice.to_string(),
        });
        Ok(())
    }
}

fn parse_inbound(text: &str) -> Option<Command> {
    match serde_json::from_str::<Inbound>(text).ok()? {
        Inbound::Command { command } => Command::parse(&command),
        Inbound::Press { press } => Some(Command::Press(press)),
    }
}

/// Accept WebSocket players forever.
pub async fn start_web_server<P>(port: u16, engine: Arc<ProgressionEngine<P>>) -> std::io::Result<()>
where
    P: CreatureProvider + 'static,
{
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    let next_player = Arc::new(AtomicU64::new(FIRST_WEB_PLAYER));
    tracing::info!(%addr, "web transport listening");

    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                let engine = Arc::clone(&engine);
                let player_id = next_player.fetch_add(1, Ordering::SeqCst);
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, peer, player_id, engine).await {
                        tracing::error!(%peer, player_id, error = %e, "connection failed");
                    }
                });
            }
            Err(e) => tracing::warn!(error = %e, "accept failed"),
        }
    }
}

async fn handle_connection<P>(
    stream: TcpStream,
    peer: SocketAddr,
    player_id: PlayerId,
    engine: Arc<ProgressionEngine<P>>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    P: CreatureProvider + 'static,
{
    let ws_stream = tokio_tungstenite::accept_async(stream).await?;
    tracing::info!(%peer, player_id, "player connected");
    let (mut sender, mut receiver) = ws_stream.split();
    let mut outbox = Outbox::default();

    while let Some(msg) = receiver.next().await {
        let text = match msg {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) | Err(_) => break,
            Ok(_) => continue,
        };
        let Some(command) = parse_inbound(&text) else {
            outbox.notify(player_id, "❓ Send {\"command\":\"start\"} or {\"press\":\"spin|<id>\"}")?;
            flush(&mut sender, &mut outbox).await?;
            continue;
        };

        let engine = Arc::clone(&engine);
        let (returned, result) = tokio::task::spawn_blocking(move || {
            let mut rng = rand::thread_rng();
            let result = dispatch(&*engine, &mut outbox, player_id, &command, &mut rng);
            (outbox, result)
        })
        .await?;
        outbox = returned;
        result?;
        flush(&mut sender, &mut outbox).await?;
    }

    tracing::info!(%peer, player_id, "player disconnected");
    Ok(())
}

async fn flush<S>(
    sender: &mut S,
    outbox: &mut Outbox,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    S: futures_util::Sink<Message> + Unpin,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    for message in outbox.pending.drain(..) {
        sender.send(Message::Text(serde_json::to_string(&message)?)).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Action;

    #[test]
    fn test_parse_inbound() {
        assert_eq!(parse_inbound(r#"{"command":"start"}"#), Some(Command::Start));
        assert_eq!(
            parse_inbound(r#"{"press":"spin|1000"}"#),
            Some(Command::Press("spin|1000".to_string()))
        );
        assert_eq!(parse_inbound("not json"), None);
    }

    #[test]
    fn test_outbox_serializes_turns() {
        let mut outbox = Outbox::default();
        let control = Control {
            label: "🎲 Spin Gender",
            action: Action::Spin,
            owner: 1000,
        };
        outbox.render(1000, "hi", Some(&control)).unwrap();
        let json = serde_json::to_string(&outbox.pending[0]).unwrap();
        assert!(json.contains(r#""data":"spin|1000""#));
        assert!(json.contains(r#""text":"hi""#));
    }

    #[test]
    fn test_outbox_unchanged_render() {
        let mut outbox = Outbox::default();
        outbox.render(1, "same", None).unwrap();
        assert_eq!(outbox.render(1, "same", None), Err(RenderError::Unchanged));
        assert_eq!(outbox.pending.len(), 1);
    }
}
