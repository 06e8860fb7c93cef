//! Ticket list views: every ticket for admins, own tickets for students.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both routes share one view. "Mine" is the full list filtered by the
//! caller's `userId` (from `/User/me`, or the token on servers without it).
//! Tickets are grouped by type with the uncategorized bucket last.

use helpdesk::grouping::group_by_type;
use helpdesk::{Id, Ticket, TicketInput, TicketStatus, TicketType};
use leptos::prelude::*;

use crate::components::ticket_groups::TicketGroups;
use crate::net::api::{api_client, spawn_scoped, view_scope};
use crate::state::forms::TicketDraft;
use crate::state::ui::UiState;
use crate::util::browser::confirm;

#[component]
pub fn AdminTicketsPage() -> impl IntoView {
    view! { <TicketsView title="All tickets" mine=false/> }
}

#[component]
pub fn UserTicketsPage() -> impl IntoView {
    view! { <TicketsView title="My tickets" mine=true/> }
}

#[component]
fn TicketsView(title: &'static str, mine: bool) -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let scope = view_scope();

    let types = RwSignal::new(Vec::<TicketType>::new());
    let tickets = RwSignal::new(Vec::<Ticket>::new());
    let loading = RwSignal::new(true);
    let draft = RwSignal::new(TicketDraft::new_ticket());

    let reload = {
        let scope = scope.clone();
        Callback::new(move |()| {
            let api = api_client();
            spawn_scoped(
                &scope,
                ui,
                "Failed to fetch tickets",
                async move {
                    let fetched_types = api.list_ticket_types().await?;
                    let fetched_tickets = if mine {
                        api.list_my_tickets().await?
                    } else {
                        api.list_tickets(None).await?
                    };
                    Ok((fetched_types, fetched_tickets))
                },
                move |(fetched_types, fetched_tickets)| {
                    types.set(fetched_types);
                    tickets.set(fetched_tickets);
                    loading.set(false);
                },
            );
        })
    };

    let create_ticket = {
        let scope = scope.clone();
        Callback::new(move |input: TicketInput| {
            let api = api_client();
            spawn_scoped(
                &scope,
                ui,
                "Failed to create ticket",
                async move { api.create_ticket(&input).await },
                move |_| {
                    draft.set(TicketDraft::new_ticket());
                    reload.run(());
                },
            );
        })
    };

    let delete_ticket = Callback::new(move |id: Id| {
        if !confirm("Delete this ticket?") {
            return;
        }
        let api = api_client();
        spawn_scoped(
            &scope,
            ui,
            "Failed to delete ticket",
            async move { api.delete_ticket(id).await },
            move |()| reload.run(()),
        );
    });

    let on_create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match draft.get().to_input() {
            Ok(input) => create_ticket.run(input),
            Err(message) => ui.update(|u| u.show_message(message)),
        }
    };

    reload.run(());

    view! {
        <div class="tickets-page">
            <h1>{title}</h1>

            <form class="edit-form" on:submit=on_create>
                <h2>"New ticket"</h2>
                <input
                    placeholder="Title"
                    prop:value=move || draft.get().title
                    on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
                />
                <textarea
                    placeholder="Describe the problem"
                    prop:value=move || draft.get().description
                    on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                ></textarea>
                <TypeSelect
                    types=types
                    value=Signal::derive(move || draft.get().type_id)
                    on_change=Callback::new(move |value: String| draft.update(|d| d.type_id = value))
                />
                <button class="btn" type="submit">"Create ticket"</button>
            </form>

            <Show when=move || !loading.get() fallback=|| view! { <p>"Loading tickets..."</p> }>
                {move || {
                    view! {
                        <TicketGroups groups=group_by_type(&types.get(), &tickets.get()) on_delete=delete_ticket/>
                    }
                }}
            </Show>
        </div>
    }
}

/// `<select>` of ticket types with a leading "Uncategorized" option valued `0`.
#[component]
pub fn TypeSelect(
    types: RwSignal<Vec<TicketType>>,
    value: Signal<String>,
    on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <select
            class="type-select"
            prop:value=move || {
                let current = value.get();
                if current.is_empty() { "0".to_owned() } else { current }
            }
            on:change=move |ev| on_change.run(event_target_value(&ev))
        >
            <option value="0">"Uncategorized"</option>
            {move || {
                types
                    .get()
                    .into_iter()
                    .map(|t| view! { <option value=t.id.to_string()>{t.name}</option> })
                    .collect_view()
            }}
        </select>
    }
}

/// `<select>` over both ticket statuses.
#[component]
pub fn StatusSelect(value: Signal<String>, on_change: Callback<String>) -> impl IntoView {
    view! {
        <select
            class="status-select"
            prop:value=move || value.get()
            on:change=move |ev| on_change.run(event_target_value(&ev))
        >
            {TicketStatus::ALL
                .iter()
                .map(|status| view! { <option value=status.as_str()>{status.as_str()}</option> })
                .collect_view()}
        </select>
    }
}
