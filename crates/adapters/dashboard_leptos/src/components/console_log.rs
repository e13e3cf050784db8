use leptos::prelude::*;

use crate::client::use_game_client;

/// The log panel; hidden while the map is showing.
#[component]
pub fn ConsoleLog() -> impl IntoView {
    let client = use_game_client();
    let log_ref = NodeRef::<leptos::html::Div>::new();

    // Keep the newest line in view.
    Effect::new(move |_| {
        let _ = client.lines().len();
        if let Some(el) = log_ref.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });

    view! {
        <div
            id="consoleLog"
            class="console-log"
            node_ref=log_ref
            style:display=move || if client.view().log_visible() { "" } else { "none" }
        >
            {move || {
                client
                    .lines()
                    .into_iter()
                    .map(|line| {
                        let stamp = line.at.format("%H:%M:%S").to_string();
                        view! { <div class=line.tone.css_class() title=stamp>{line.text}</div> }
                    })
                    .collect_view()
            }}
        </div>
    }
}
