//! Landing page: static introduction with entry links.

use leptos::prelude::*;

use crate::state::auth::AuthState;

#[component]
pub fn LandingPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    view! {
        <div class="landing-page">
            <section class="landing-page__hero">
                <h1>"School Help Desk"</h1>
                <p>"Report broken equipment, access problems, and anything else that needs a hand."</p>
                <Show
                    when=move || auth.get().logged_in
                    fallback=|| view! {
                        <div class="landing-page__actions">
                            <a class="btn" href="/login">"Login"</a>
                            <a class="btn btn--secondary" href="/register">"Register"</a>
                        </div>
                    }
                >
                    <div class="landing-page__actions">
                        <a class="btn" href="/user">"My Tickets"</a>
                        <Show when=move || auth.get().is_admin()>
                            <a class="btn btn--secondary" href="/admin">"Admin"</a>
                        </Show>
                    </div>
                </Show>
            </section>
            <section class="landing-page__about">
                <h2>"About"</h2>
                <p>
                    "Students open tickets and follow them through comments. "
                    "Administrators sort tickets into types, manage user roles, and close tickets once resolved."
                </p>
            </section>
        </div>
    }
}
