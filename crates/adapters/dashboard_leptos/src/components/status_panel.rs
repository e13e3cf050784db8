//! Status fields and the login badge.

use kh_domain::status::{StatusView, ids};
use leptos::prelude::*;

use crate::client::use_game_client;

const ROWS: [(&str, &str); 12] = [
    ("User", ids::USER),
    ("Peer", ids::PEER),
    ("Peer online", ids::PEER_ONLINE),
    ("Peer phase", ids::PEER_PHASE),
    ("Game", ids::GAME_ID),
    ("Scenario", ids::SCENARIO),
    ("Round", ids::ROUND),
    ("Active player", ids::PLAYER),
    ("Phase", ids::PHASE),
    ("VP", ids::VP),
    ("BP", ids::BP),
    ("Notes", ids::NOTES),
];

#[component]
pub fn StatusPanel() -> impl IntoView {
    let status = use_game_client().status();

    let field = move |id: &'static str| {
        move || {
            status.with(|s: &StatusView| s.field(id).unwrap_or_default().to_string())
        }
    };

    view! {
        <section class="status">
            <span
                id=ids::LOGIN_BADGE
                class=move || format!("badge {}", status.with(|s| s.badge.css_class()))
            >
                {move || status.with(|s| s.badge.label())}
            </span>
            <dl>
                {ROWS
                    .into_iter()
                    .map(|(label, id)| view! {
                        <dt>{label}</dt>
                        <dd id=id>{field(id)}</dd>
                    })
                    .collect_view()}
            </dl>
        </section>
    }
}
