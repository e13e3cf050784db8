//! Player records for the logged-in user ("self") and the other player ("peer").

use serde::{Deserialize, Serialize};

use crate::faction::Faction;

/// The current user's own record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfRecord {
    pub owner: Faction,
    pub username: String,
}

/// The other player's publicly visible record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerRecord {
    pub owner: Faction,
    pub username: String,
    #[serde(default)]
    pub online: bool,
    /// Server-formatted timestamp of the peer's last request; empty if never seen.
    #[serde(default)]
    pub last_seen: String,
}

impl PeerRecord {
    /// The last-seen timestamp, if the peer has ever been seen.
    #[must_use]
    pub fn last_seen(&self) -> Option<&str> {
        if self.last_seen.is_empty() {
            None
        } else {
            Some(&self.last_seen)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_peer_record() {
        let peer: PeerRecord = serde_json::from_str(
            r#"{"owner":"B","username":"bob","online":true,"last_seen":"2025-03-01 10:00:00"}"#,
        )
        .unwrap();
        assert_eq!(peer.owner, Faction::B);
        assert_eq!(peer.username, "bob");
        assert!(peer.online);
        assert_eq!(peer.last_seen(), Some("2025-03-01 10:00:00"));
    }

    #[test]
    fn should_treat_empty_last_seen_as_never_seen() {
        let peer: PeerRecord =
            serde_json::from_str(r#"{"owner":"A","username":"alice","online":false,"last_seen":""}"#)
                .unwrap();
        assert_eq!(peer.last_seen(), None);
    }
}
