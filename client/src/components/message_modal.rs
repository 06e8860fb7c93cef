//! Dismissible overlay for the single transient message.

use leptos::prelude::*;

use crate::state::ui::UiState;

#[component]
pub fn MessageModal() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let dismiss = move |_| ui.update(UiState::dismiss);
    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            ui.update(UiState::dismiss);
        }
    };

    view! {
        <Show when=move || ui.get().message.is_some()>
            <div class="message-modal__backdrop" on:click=dismiss>
                <div
                    class="message-modal"
                    role="alertdialog"
                    tabindex="0"
                    on:click=move |ev| ev.stop_propagation()
                    on:keydown=on_keydown
                >
                    <p class="message-modal__text">{move || ui.get().message.unwrap_or_default()}</p>
                    <button class="btn message-modal__close" on:click=dismiss>
                        "OK"
                    </button>
                </div>
            </div>
        </Show>
    }
}
