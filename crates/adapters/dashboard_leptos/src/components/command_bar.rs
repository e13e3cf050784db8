//! Command input; Enter or the Send button submits.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::client::use_game_client;

#[component]
pub fn CommandBar() -> impl IntoView {
    let client = use_game_client();
    let (command, set_command) = signal(String::new());

    let submit = move || {
        let text = command.get_untracked();
        set_command.set(String::new());
        spawn_local(client.submit_command(text));
    };

    view! {
        <div class="command-bar">
            <input
                id="commandInput"
                type="text"
                placeholder="command (try: help)"
                prop:value=command
                on:input=move |ev| set_command.set(event_target_value(&ev))
                on:keydown=move |ev| {
                    if ev.key() == "Enter" {
                        ev.prevent_default();
                        submit();
                    }
                }
            />
            <button id="btnSend" on:click=move |_| submit()>
                "Send"
            </button>
        </div>
    }
}
