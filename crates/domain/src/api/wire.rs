//! Request and response payloads, one pair per endpoint.

use serde::{Deserialize, Serialize};

use crate::game_state::GameState;
use crate::player::{PeerRecord, SelfRecord};

/// `POST login` body.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// `POST login` reply.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginReply {
    pub token: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// Empty JSON object body (`{}`), sent with `POST logout`.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct EmptyBody {}

/// Reply that carries nothing beyond `ok`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Ack {}

/// `GET state` reply.
#[derive(Debug, Clone, Deserialize)]
pub struct StateReply {
    #[serde(default)]
    pub state: Option<GameState>,
    #[serde(default, rename = "self")]
    pub self_record: Option<SelfRecord>,
    #[serde(default)]
    pub peer: Option<PeerRecord>,
}

/// `POST command` body.
#[derive(Debug, Clone, Serialize)]
pub struct CommandRequest<'a> {
    pub command: &'a str,
}

/// `POST command` reply.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandReply {
    /// Narrative text, possibly spanning several lines.
    #[serde(default)]
    pub event: Option<String>,
}

/// One past command and its narrative, as recorded by the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HistoryEntry {
    pub seq: i64,
    pub cmd: String,
    pub result: String,
    #[serde(default)]
    pub ts: String,
}

/// `GET events` reply. Entries arrive newest first.
#[derive(Debug, Clone, Deserialize)]
pub struct EventsReply {
    #[serde(default)]
    pub events: Vec<HistoryEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faction::Faction;

    #[test]
    fn should_serialize_login_request() {
        let body = serde_json::to_value(LoginRequest {
            username: "alice",
            password: "alicepw",
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"username": "alice", "password": "alicepw"})
        );
    }

    #[test]
    fn should_serialize_empty_body_as_empty_object() {
        assert_eq!(serde_json::to_string(&EmptyBody::default()).unwrap(), "{}");
    }

    #[test]
    fn should_parse_state_reply_with_self_and_peer() {
        let reply: StateReply = serde_json::from_str(
            r#"{"ok":true,
                "state":{"gameId":1,"scenario":"","round":1,"activePlayer":"A","phaseIndex":0,
                         "phase":"Build Ships","vp":{"A":0,"B":0},"bp":{"A":0,"B":0},
                         "notes":"Type: start learning|basic|advanced"},
                "self":{"owner":"A","username":"alice"},
                "peer":{"owner":"B","username":"bob","online":false,"last_seen":""}}"#,
        )
        .unwrap();
        assert_eq!(reply.state.unwrap().phase, "Build Ships");
        assert_eq!(reply.self_record.unwrap().owner, Faction::A);
        assert_eq!(reply.peer.unwrap().username, "bob");
    }

    #[test]
    fn should_parse_state_reply_without_records() {
        let reply: StateReply = serde_json::from_str(r#"{"ok":true}"#).unwrap();
        assert!(reply.state.is_none());
        assert!(reply.self_record.is_none());
        assert!(reply.peer.is_none());
    }

    #[test]
    fn should_parse_command_reply_ignoring_extra_state() {
        let reply: CommandReply = serde_json::from_str(
            r#"{"ok":true,"event":"Phase: Movement\nRound 2","state":{"gameId":1,"round":2}}"#,
        )
        .unwrap();
        assert_eq!(reply.event.as_deref(), Some("Phase: Movement\nRound 2"));
    }

    #[test]
    fn should_parse_command_reply_without_event() {
        let reply: CommandReply = serde_json::from_str(r#"{"ok":true}"#).unwrap();
        assert!(reply.event.is_none());
    }

    #[test]
    fn should_parse_events_reply() {
        let reply: EventsReply = serde_json::from_str(
            r#"{"ok":true,"events":[{"seq":2,"cmd":"next","result":"Phase: Movement","ts":"2025-03-01 10:00:00"}]}"#,
        )
        .unwrap();
        assert_eq!(reply.events.len(), 1);
        assert_eq!(reply.events[0].cmd, "next");
    }
}
