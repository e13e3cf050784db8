use leptos::prelude::*;

use crate::client::use_game_client;

/// Map panel placeholder; shown instead of the log when toggled.
#[component]
pub fn MapView() -> impl IntoView {
    let client = use_game_client();

    view! {
        <div
            id="mapView"
            class="map-view"
            style:display=move || if client.view().map_visible() { "" } else { "none" }
        >
            <p class="line-muted">"Map view is not available yet."</p>
        </div>
    }
}

/// Button switching between the log and the map panel.
#[component]
pub fn MapToggle() -> impl IntoView {
    let client = use_game_client();

    view! {
        <button id="btnMap" on:click=move |_| client.toggle_view()>
            {move || client.view().button_label()}
        </button>
    }
}
