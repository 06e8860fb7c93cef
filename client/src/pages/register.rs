//! Registration page.
//!
//! Checks required fields, password confirmation, and terms locally; the
//! server decides everything else. On success the form is cleared and the
//! user is sent to `/login` after the fixed delay.

use helpdesk::Role;
use helpdesk::validate::{RegisterForm, validate_register};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::net::api::{api_client, spawn_scoped, view_scope};
use crate::state::ui::UiState;
use crate::util::browser::redirect_after_delay;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let scope = view_scope();
    let navigate = use_navigate();

    let form = RwSignal::new(RegisterForm::default());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let request = match validate_register(&form.get()) {
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
            "Registration failed!",
            async move {
                let result = api.register(&request).await;
                busy.set(false);
                result
            },
            move |response| {
                form.set(RegisterForm::default());
                let message = response
                    .message
                    .unwrap_or_else(|| "Registration successful!".to_owned());
                ui.update(|u| u.show_message(message));
                redirect_after_delay(navigate, "/login");
            },
        );
    };

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h1>"Register"</h1>
                <input
                    class="auth-input"
                    type="email"
                    placeholder="Email"
                    prop:value=move || form.get().email
                    on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                />
                <input
                    class="auth-input"
                    type="password"
                    placeholder="Password"
                    prop:value=move || form.get().password
                    on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                />
                <input
                    class="auth-input"
                    type="password"
                    placeholder="Confirm password"
                    prop:value=move || form.get().confirm_password
                    on:input=move |ev| form.update(|f| f.confirm_password = event_target_value(&ev))
                />
                <select
                    class="auth-input"
                    prop:value=move || form.get().role.as_str()
                    on:change=move |ev| {
                        let role = event_target_value(&ev).parse::<Role>().unwrap_or_default();
                        form.update(|f| f.role = role);
                    }
                >
                    {Role::ALL
                        .iter()
                        .map(|role| view! { <option value=role.as_str()>{role.as_str()}</option> })
                        .collect_view()}
                </select>
                <label class="auth-terms">
                    <input
                        type="checkbox"
                        prop:checked=move || form.get().accepted_terms
                        on:change=move |ev| form.update(|f| f.accepted_terms = event_target_checked(&ev))
                    />
                    " I accept the terms"
                </label>
                <button class="btn auth-button" type="submit" disabled=move || busy.get()>
                    "Register"
                </button>
                <p class="auth-card__switch">
                    "Already registered? " <a href="/login">"Login"</a>
                </p>
            </form>
        </div>
    }
}
