use leptos::prelude::*;

pub mod api;
pub mod client;
mod components;

use components::{CommandBar, ConsoleLog, LoginForm, MapToggle, MapView, StatusPanel};
use kh_domain::console::{self, LineTone};

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    let client = client::provide_game_client();
    for text in console::WELCOME {
        client.append_line(text, LineTone::Muted);
    }

    view! {
        <header>
            <h1>"Kepler's Horizon"</h1>
            <LoginForm/>
        </header>
        <main>
            <StatusPanel/>
            <section class="panels">
                <MapToggle/>
                <ConsoleLog/>
                <MapView/>
            </section>
            <CommandBar/>
        </main>
    }
}
