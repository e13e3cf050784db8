//! Credentials form with login and logout buttons.

use kh_domain::session;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::client::use_game_client;

#[component]
pub fn LoginForm() -> impl IntoView {
    let client = use_game_client();
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_busy, set_is_busy) = signal(false);

    let login = move |_| {
        let user = username.get_untracked().trim().to_string();
        if user.is_empty() {
            client.append_line("Login error: username required", kh_domain::console::LineTone::Bad);
            return;
        }
        let form = session::LoginForm::new(user, password.get_untracked());
        set_password.set(String::new());
        set_is_busy.set(true);
        spawn_local(async move {
            client.login(form).await;
            set_is_busy.set(false);
        });
    };

    let logout = move |_| {
        spawn_local(async move {
            client.logout().await;
        });
    };

    view! {
        <form class="login" on:submit=|ev| ev.prevent_default()>
            <input
                id="loginUser"
                type="text"
                placeholder="username"
                autocomplete="username"
                prop:value=username
                on:input=move |ev| set_username.set(event_target_value(&ev))
            />
            <input
                id="loginPass"
                type="password"
                placeholder="password"
                autocomplete="current-password"
                prop:value=password
                on:input=move |ev| set_password.set(event_target_value(&ev))
            />
            <button id="btnLogin" type="button" on:click=login disabled=move || is_busy.get()>
                "Login"
            </button>
            <button id="btnLogout" type="button" on:click=logout>
                "Logout"
            </button>
        </form>
    }
}
