//! Status rendering — a pure projection of the [`Session`] onto named fields.
//!
//! Field ids match the element ids of the web page, so the dashboard can
//! write each value straight into its element and the terminal front-end can
//! print them as a table.

use crate::faction::Faction;
use crate::player::PeerRecord;
use crate::session::Session;

/// Placeholder shown by every field that has nothing to display.
pub const EMPTY: &str = "-";

pub mod ids {
    pub const USER: &str = "stUser";
    pub const PEER: &str = "stPeer";
    pub const PEER_ONLINE: &str = "stPeerOnline";
    pub const PEER_PHASE: &str = "stPeerPhase";
    pub const GAME_ID: &str = "stGameId";
    pub const SCENARIO: &str = "stScenario";
    pub const ROUND: &str = "stRound";
    pub const PLAYER: &str = "stPlayer";
    pub const PHASE: &str = "stPhase";
    pub const VP: &str = "stVP";
    pub const BP: &str = "stBP";
    pub const NOTES: &str = "stNotes";
    pub const LOGIN_BADGE: &str = "loginBadge";
}

/// Login indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginBadge {
    LoggedIn,
    LoggedOut,
}

impl LoginBadge {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::LoggedIn => "LOGGED IN",
            Self::LoggedOut => "LOGGED OUT",
        }
    }

    /// CSS class of the badge (`good` / `bad`).
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::LoggedIn => "good",
            Self::LoggedOut => "bad",
        }
    }
}

/// Text of every status field, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub user: String,
    pub peer: String,
    pub peer_online: String,
    pub peer_phase: String,
    pub game_id: String,
    pub scenario: String,
    pub round: String,
    pub player: String,
    pub phase: String,
    pub vp: String,
    pub bp: String,
    pub notes: String,
    pub badge: LoginBadge,
}

impl StatusView {
    /// Render the current session.
    #[must_use]
    pub fn render(session: &Session) -> Self {
        let state = session.state();
        let peer = session.peer();

        let peer_phase = match (state, peer) {
            (Some(st), Some(p)) if st.is_turn_of(p.owner) => st.phase.clone(),
            (Some(_), Some(_)) => "waiting".to_string(),
            _ => EMPTY.to_string(),
        };

        let self_owner = session.self_record().map_or(Faction::A, |s| s.owner);

        let notes = state.map_or_else(
            || EMPTY.to_string(),
            |st| match peer {
                Some(p) => format!("{} | {}", st.notes, peer_summary(p)),
                None => st.notes.clone(),
            },
        );

        Self {
            user: session.username().unwrap_or(EMPTY).to_string(),
            peer: peer.map_or_else(
                || EMPTY.to_string(),
                |p| format!("{} ({})", p.username, p.owner),
            ),
            peer_online: peer.map_or_else(|| EMPTY.to_string(), presence),
            peer_phase,
            game_id: or_empty(state.map(|st| st.game_id.to_string())),
            scenario: or_empty(state.map(|st| {
                if st.scenario.is_empty() {
                    "(none)".to_string()
                } else {
                    st.scenario.clone()
                }
            })),
            round: or_empty(state.map(|st| st.round.to_string())),
            player: or_empty(state.map(|st| st.active_player.to_string())),
            phase: or_empty(state.map(|st| st.phase.clone())),
            vp: or_empty(state.map(|st| format!("A:{}  B:{}", st.vp.a, st.vp.b))),
            bp: or_empty(state.map(|st| format!("{self_owner}:{}", st.bp.get(self_owner)))),
            notes,
            badge: if session.is_logged_in() {
                LoginBadge::LoggedIn
            } else {
                LoginBadge::LoggedOut
            },
        }
    }

    /// `(element id, text)` pairs for every status field, in page order.
    #[must_use]
    pub fn fields(&self) -> [(&'static str, &str); 12] {
        [
            (ids::USER, self.user.as_str()),
            (ids::PEER, self.peer.as_str()),
            (ids::PEER_ONLINE, self.peer_online.as_str()),
            (ids::PEER_PHASE, self.peer_phase.as_str()),
            (ids::GAME_ID, self.game_id.as_str()),
            (ids::SCENARIO, self.scenario.as_str()),
            (ids::ROUND, self.round.as_str()),
            (ids::PLAYER, self.player.as_str()),
            (ids::PHASE, self.phase.as_str()),
            (ids::VP, self.vp.as_str()),
            (ids::BP, self.bp.as_str()),
            (ids::NOTES, self.notes.as_str()),
        ]
    }

    /// Text of the field with element id `id`.
    #[must_use]
    pub fn field(&self, id: &str) -> Option<&str> {
        self.fields()
            .into_iter()
            .find_map(|(field_id, text)| (field_id == id).then_some(text))
    }
}

fn or_empty(value: Option<String>) -> String {
    value.unwrap_or_else(|| EMPTY.to_string())
}

fn presence(peer: &PeerRecord) -> String {
    match (peer.online, peer.last_seen()) {
        (true, _) => format!("yes (seen {})", peer.last_seen),
        (false, Some(ts)) => format!("no (last {ts})"),
        (false, None) => "no".to_string(),
    }
}

fn peer_summary(peer: &PeerRecord) -> String {
    let presence = match (peer.online, peer.last_seen()) {
        (true, _) => format!("ONLINE (seen {})", peer.last_seen),
        (false, Some(ts)) => format!("offline (last {ts})"),
        (false, None) => "offline".to_string(),
    };
    format!("Peer: {} ({}) {presence}", peer.username, peer.owner)
}
