//! Login page: email + password against `/User/login`.

use helpdesk::validate::validate_login;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::net::api::{api_client, spawn_scoped, view_scope};
use crate::state::auth::AuthState;
use crate::state::ui::UiState;
use crate::util::browser::redirect_after_delay;
use crate::util::nav::post_login_route;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let scope = view_scope();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let request = match validate_login(&email.get(), &password.get()) {
            Ok(request) => request,
            Err(message) => {
                ui.update(|u| u.show_message(message));
                return;
            }
        };
        busy.set(true);
        let api = api_client();
        let navigate = navigate.clone();
        spawn_scoped(
            &scope,
            ui,
            "Login failed!",
            async move {
                let (state, result) = AuthState::login(&api, &request).await;
                busy.set(false);
                auth.set(state.clone());
                result.map(|_| state)
            },
            move |state| {
                let destination = post_login_route(&state);
                password.set(String::new());
                ui.update(|u| u.show_message("Login successful!"));
                redirect_after_delay(navigate, destination);
            },
        );
    };

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h1>"Login"</h1>
                <input
                    class="auth-input"
                    type="email"
                    placeholder="Email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    class="auth-input"
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button class="btn auth-button" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Logging in..." } else { "Login" }}
                </button>
                <p class="auth-card__switch">
                    "No account? " <a href="/register">"Register"</a>
                </p>
            </form>
        </div>
    }
}
