//! Site header with role-gated links, theme toggle, and logout.

use leptos::prelude::*;

use crate::net::api::api_client;
use crate::state::auth::AuthState;
use crate::state::ui::UiState;
use crate::util::nav::nav_links;

#[component]
pub fn SiteHeader() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let menu_open = RwSignal::new(false);

    let on_logout = move |_| {
        if let Err(err) = api_client().logout() {
            ui.update(|u| u.show_message(err.user_message("Logout failed.")));
        }
        auth.set(AuthState::default());
        menu_open.set(false);
        crate::util::browser::go_to("/");
    };

    view! {
        <header class="site-header">
            <a class="site-header__brand" href="/">"School Help Desk"</a>
            <button
                class="btn site-header__menu"
                title="Menu"
                on:click=move |_| menu_open.update(|open| *open = !*open)
            >
                "☰"
            </button>
            <nav class="site-header__links" class:site-header__links--open=move || menu_open.get()>
                {move || {
                    nav_links(&auth.get())
                        .into_iter()
                        .map(|link| {
                            view! {
                                <a
                                    class="site-header__link"
                                    href=link.href
                                    on:click=move |_| menu_open.set(false)
                                >
                                    {link.label}
                                </a>
                            }
                        })
                        .collect_view()
                }}
                <Show when=move || auth.get().logged_in>
                    <span class="site-header__self">
                        {move || auth.get().email().unwrap_or("signed in").to_owned()}
                    </span>
                </Show>
            </nav>
            <span class="site-header__spacer"></span>
            <button
                class="btn site-header__dark-toggle"
                title="Toggle dark mode"
                on:click=move |_| {
                    let next = crate::util::dark_mode::toggle(ui.get().dark_mode);
                    ui.update(|u| u.dark_mode = next);
                }
            >
                {move || if ui.get().dark_mode { "☀" } else { "☾" }}
            </button>
            <Show when=move || auth.get().logged_in>
                <button class="btn site-header__logout" on:click=on_logout>
                    "Logout"
                </button>
            </Show>
        </header>
    }
}
