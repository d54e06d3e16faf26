//! Protocol module - JSON message types for the session adapter
//!
//! Line-delimited JSON: one message per line in each direction.
//! Every message carries `type` and `seq`.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::core::{ColumnReadout, SessionSnapshot};
use crate::types::{Action, MAX_ACTIONS_PER_COMMAND};

// ============== Client -> Game Messages ==============

/// Any message a client may send
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientMessage {
    Command(CommandMessage),
    Tick(TickMessage),
    Observe(ObserveMessage),
}

impl ClientMessage {
    pub fn seq(&self) -> u64 {
        match self {
            ClientMessage::Command(m) => m.seq,
            ClientMessage::Tick(m) => m.seq,
            ClientMessage::Observe(m) => m.seq,
        }
    }
}

/// Apply a batch of actions, in order
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommandMessage {
    pub seq: u64,
    pub actions: Vec<String>,
}

/// Advance the lab by `dt_ms` milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TickMessage {
    pub seq: u64,
    pub dt_ms: u32,
}

/// Request an observation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ObserveMessage {
    pub seq: u64,
}

/// Validated action batch
pub type ActionList = ArrayVec<Action, MAX_ACTIONS_PER_COMMAND>;

/// Parse a command's action names.
///
/// The whole batch is rejected if any name is unknown or there are more than
/// `max` entries.
pub fn parse_actions(names: &[String], max: usize) -> Result<ActionList, (ErrorCode, String)> {
    let max = max.min(MAX_ACTIONS_PER_COMMAND);
    if names.len() > max {
        return Err((
            ErrorCode::TooManyActions,
            format!("{} actions sent, at most {max} allowed", names.len()),
        ));
    }

    let mut out = ActionList::new();
    for name in names {
        let Some(action) = Action::from_str(name) else {
            return Err((ErrorCode::InvalidAction, format!("unknown action {name:?}")));
        };
        out.push(action);
    }
    Ok(out)
}

// ============== Game -> Client Messages ==============

/// Any message the game may send
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerMessage {
    Ack(AckMessage),
    Observation(ObservationMessage),
    Error(ErrorMessage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AckStatus {
    Ok,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AckMessage {
    pub seq: u64,
    pub status: AckStatus,
    /// Number of actions applied (0 for ticks)
    pub applied: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidJson,
    InvalidAction,
    TooManyActions,
    OutOfOrder,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorMessage {
    /// Sequence number of the offending message, when it could be read
    pub seq: Option<u64>,
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerObservation {
    pub row: u8,
    pub col: u8,
    pub x: f32,
    pub y: f32,
    pub moving: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnObservation {
    pub index: u8,
    pub timer: String,
    pub remaining: f64,
    pub display: String,
    pub running: bool,
    pub finished: bool,
}

impl From<&ColumnReadout> for ColumnObservation {
    fn from(value: &ColumnReadout) -> Self {
        Self {
            index: value.index,
            timer: value.timer.clone(),
            remaining: value.remaining_secs,
            display: value.display.clone(),
            running: value.running,
            finished: value.finished,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservationMessage {
    pub seq: u64,
    pub scene: &'static str,
    pub player: PlayerObservation,
    pub near_bench: Option<&'static str>,
    pub prompt: Option<String>,
    pub columns: Vec<ColumnObservation>,
    pub quit: bool,
}

impl ObservationMessage {
    pub fn from_snapshot(seq: u64, snapshot: &SessionSnapshot) -> Self {
        let p = snapshot.player;
        Self {
            seq,
            scene: snapshot.scene.as_str(),
            player: PlayerObservation {
                row: p.row,
                col: p.col,
                x: p.x,
                y: p.y,
                moving: p.moving,
            },
            near_bench: snapshot.near_bench,
            prompt: snapshot.prompt.clone(),
            columns: snapshot.columns.iter().map(ColumnObservation::from).collect(),
            quit: snapshot.quit,
        }
    }
}

pub fn create_ack(seq: u64, applied: usize) -> ServerMessage {
    ServerMessage::Ack(AckMessage {
        seq,
        status: AckStatus::Ok,
        applied,
    })
}

pub fn create_error(seq: Option<u64>, code: ErrorCode, message: impl Into<String>) -> ServerMessage {
    ServerMessage::Error(ErrorMessage {
        seq,
        code,
        message: message.into(),
    })
}

/// Pull `seq` out of a line that failed to parse as a known message
pub fn extract_seq_best_effort(line: &str) -> Option<u64> {
    serde_json::from_str::<serde_json::Value>(line)
        .ok()?
        .get("seq")?
        .as_u64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    #[test]
    fn parses_command() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"command","seq":3,"actions":["pressUp","start1"]}"#)
                .unwrap();
        assert_eq!(msg.seq(), 3);
        let ClientMessage::Command(cmd) = msg else {
            panic!("expected command");
        };
        let actions = parse_actions(&cmd.actions, 16).unwrap();
        assert_eq!(
            actions.as_slice(),
            &[Action::PressMove(Direction::Up), Action::StartColumn(1)]
        );
    }

    #[test]
    fn parses_tick_and_observe() {
        let tick: ClientMessage =
            serde_json::from_str(r#"{"type":"tick","seq":1,"dt_ms":16}"#).unwrap();
        assert_eq!(tick, ClientMessage::Tick(TickMessage { seq: 1, dt_ms: 16 }));

        let observe: ClientMessage =
            serde_json::from_str(r#"{"type":"observe","seq":2}"#).unwrap();
        assert_eq!(observe, ClientMessage::Observe(ObserveMessage { seq: 2 }));
    }

    #[test]
    fn unknown_type_fails_but_seq_is_recoverable() {
        let line = r#"{"type":"teleport","seq":9}"#;
        assert!(serde_json::from_str::<ClientMessage>(line).is_err());
        assert_eq!(extract_seq_best_effort(line), Some(9));
        assert_eq!(extract_seq_best_effort("not json"), None);
    }

    #[test]
    fn rejects_unknown_action() {
        let names = vec!["pressUp".to_string(), "fly".to_string()];
        let (code, _) = parse_actions(&names, 16).unwrap_err();
        assert_eq!(code, ErrorCode::InvalidAction);
    }

    #[test]
    fn rejects_oversized_batch() {
        let names = vec!["interact".to_string(); 5];
        let (code, _) = parse_actions(&names, 4).unwrap_err();
        assert_eq!(code, ErrorCode::TooManyActions);

        let names = vec!["interact".to_string(); MAX_ACTIONS_PER_COMMAND + 1];
        let (code, _) = parse_actions(&names, usize::MAX).unwrap_err();
        assert_eq!(code, ErrorCode::TooManyActions);
    }

    #[test]
    fn serializes_tagged_messages() {
        let ack = serde_json::to_value(create_ack(4, 2)).unwrap();
        assert_eq!(ack["type"], "ack");
        assert_eq!(ack["seq"], 4);
        assert_eq!(ack["status"], "ok");
        assert_eq!(ack["applied"], 2);

        let err = serde_json::to_value(create_error(None, ErrorCode::OutOfOrder, "x")).unwrap();
        assert_eq!(err["type"], "error");
        assert_eq!(err["code"], "out_of_order");
        assert!(err["seq"].is_null());
    }
}
