//! Game state snapshot — the server-owned view of the current game.
//!
//! The client never derives or patches any of these fields; every successful
//! fetch replaces the whole value.

use serde::{Deserialize, Serialize};

use crate::faction::{Faction, FactionScores};

/// Read-only snapshot of the shared game as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub game_id: i64,
    /// Scenario name; empty until a scenario has been started.
    #[serde(default)]
    pub scenario: String,
    pub round: u32,
    pub active_player: Faction,
    /// Numeric phase position; informational only, `phase` is what gets shown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_index: Option<u8>,
    /// Human-readable phase label.
    pub phase: String,
    /// Victory points per faction.
    #[serde(default)]
    pub vp: FactionScores,
    /// Budget points per faction.
    #[serde(default)]
    pub bp: FactionScores,
    #[serde(default)]
    pub notes: String,
}

impl GameState {
    /// Whether `faction` holds the initiative in this snapshot.
    #[must_use]
    pub fn is_turn_of(&self, faction: Faction) -> bool {
        self.active_player == faction
    }
}
