//! The two sides of a game and their per-faction counters.

use serde::{Deserialize, Serialize};

/// One of the two owning sides of a game.
///
/// The server always spells them as the single letters `"A"` and `"B"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Faction {
    #[default]
    A,
    B,
}

impl Faction {
    /// The opposing faction.
    #[must_use]
    pub fn opponent(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => f.write_str("A"),
            Self::B => f.write_str("B"),
        }
    }
}

/// A counter kept per faction (victory points, budget points).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FactionScores {
    #[serde(rename = "A", default)]
    pub a: i64,
    #[serde(rename = "B", default)]
    pub b: i64,
}

impl FactionScores {
    #[must_use]
    pub fn new(a: i64, b: i64) -> Self {
        Self { a, b }
    }

    /// Value held by `faction`.
    #[must_use]
    pub fn get(&self, faction: Faction) -> i64 {
        match faction {
            Faction::A => self.a,
            Faction::B => self.b,
        }
    }
}
