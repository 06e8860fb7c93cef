//! Ticket-type administration.
//!
//! Lists types with their ticket counts, creates/edits/deletes types, shows
//! the tickets filed under one type (`?typeId=`), and renders every ticket
//! grouped by type with the uncategorized bucket last.

use helpdesk::grouping::{count_for_type, group_by_type};
use helpdesk::validate::validate_ticket_type;
use helpdesk::{Id, Ticket, TicketType, TicketTypeInput};
use leptos::prelude::*;

use crate::components::ticket_groups::TicketGroups;
use crate::net::api::{api_client, spawn_scoped, view_scope};
use crate::state::ui::UiState;
use crate::util::browser::confirm;

#[component]
pub fn TicketTypesPage() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let scope = view_scope();

    let types = RwSignal::new(Vec::<TicketType>::new());
    let tickets = RwSignal::new(Vec::<Ticket>::new());
    let loading = RwSignal::new(true);

    let new_name = RwSignal::new(String::new());
    let new_description = RwSignal::new(String::new());

    let editing = RwSignal::new(None::<Id>);
    let edit_name = RwSignal::new(String::new());
    let edit_description = RwSignal::new(String::new());

    let viewing = RwSignal::new(None::<(Id, Vec<Ticket>)>);

    let reload = {
        let scope = scope.clone();
        Callback::new(move |()| {
            let api = api_client();
            spawn_scoped(
                &scope,
                ui,
                "Failed to fetch ticket types",
                async move {
                    let fetched_types = api.list_ticket_types().await?;
                    let fetched_tickets = api.list_tickets(None).await?;
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

    let create_type = {
        let scope = scope.clone();
        Callback::new(move |input: TicketTypeInput| {
            let api = api_client();
            spawn_scoped(
                &scope,
                ui,
                "Failed to create ticket type",
                async move { api.create_ticket_type(&input).await },
                move |_| {
                    new_name.set(String::new());
                    new_description.set(String::new());
                    reload.run(());
                },
            );
        })
    };

    let update_type = {
        let scope = scope.clone();
        Callback::new(move |(id, input): (Id, TicketTypeInput)| {
            let api = api_client();
            spawn_scoped(
                &scope,
                ui,
                "Failed to update ticket type",
                async move { api.update_ticket_type(id, &input).await },
                move |()| {
                    editing.set(None);
                    reload.run(());
                },
            );
        })
    };

    let delete_type = {
        let scope = scope.clone();
        Callback::new(move |id: Id| {
            if !confirm("Delete this ticket type? Its tickets become uncategorized.") {
                return;
            }
            let api = api_client();
            spawn_scoped(
                &scope,
                ui,
                "Failed to delete ticket type",
                async move { api.delete_ticket_type(id).await },
                move |()| {
                    if viewing.get_untracked().is_some_and(|(shown, _)| shown == id) {
                        viewing.set(None);
                    }
                    reload.run(());
                },
            );
        })
    };

    let view_tickets = {
        let scope = scope.clone();
        Callback::new(move |id: Id| {
            let api = api_client();
            spawn_scoped(
                &scope,
                ui,
                "Failed to fetch tickets",
                async move { api.list_tickets(Some(id)).await },
                move |list| viewing.set(Some((id, list))),
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
            move |()| {
                viewing.update(|shown| {
                    if let Some((_, list)) = shown {
                        list.retain(|ticket| ticket.id != id);
                    }
                });
                reload.run(());
            },
        );
    });

    let on_create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match validate_ticket_type(&new_name.get(), &new_description.get()) {
            Ok(input) => create_type.run(input),
            Err(message) => ui.update(|u| u.show_message(message)),
        }
    };

    let on_edit_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = editing.get() else {
            return;
        };
        match validate_ticket_type(&edit_name.get(), &edit_description.get()) {
            Ok(input) => update_type.run((id, input)),
            Err(message) => ui.update(|u| u.show_message(message)),
        }
    };

    let viewing_label = move || {
        viewing.get().map(|(id, list)| {
            let name = types
                .get()
                .into_iter()
                .find(|t| t.id == id)
                .map_or_else(|| format!("Type #{id}"), |t| t.name);
            (name, list)
        })
    };

    reload.run(());

    view! {
        <div class="ticket-types-page">
            <h1>"Ticket types"</h1>

            <form class="edit-form" on:submit=on_create>
                <h2>"New type"</h2>
                <input
                    placeholder="Name"
                    prop:value=move || new_name.get()
                    on:input=move |ev| new_name.set(event_target_value(&ev))
                />
                <input
                    placeholder="Description (optional)"
                    prop:value=move || new_description.get()
                    on:input=move |ev| new_description.set(event_target_value(&ev))
                />
                <button class="btn" type="submit">"Create"</button>
            </form>

            <Show when=move || !loading.get() fallback=|| view! { <p>"Loading ticket types..."</p> }>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Description"</th>
                            <th>"Tickets"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let all_tickets = tickets.get();
                            types
                                .get()
                                .into_iter()
                                .map(|ticket_type| {
                                    let id = ticket_type.id;
                                    let count = count_for_type(&all_tickets, id);
                                    let name = ticket_type.name.clone();
                                    let description = ticket_type.description.clone().unwrap_or_default();
                                    view! {
                                        <tr>
                                            <td>{ticket_type.name}</td>
                                            <td>{ticket_type.description.unwrap_or_default()}</td>
                                            <td>{count}</td>
                                            <td class="data-table__actions">
                                                <button class="btn btn--secondary" on:click=move |_| view_tickets.run(id)>
                                                    "View Tickets"
                                                </button>
                                                <button
                                                    class="btn btn--secondary"
                                                    on:click=move |_| {
                                                        editing.set(Some(id));
                                                        edit_name.set(name.clone());
                                                        edit_description.set(description.clone());
                                                    }
                                                >
                                                    "Edit"
                                                </button>
                                                <button class="btn btn--danger" on:click=move |_| delete_type.run(id)>
                                                    "Delete"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </Show>

            <Show when=move || editing.get().is_some()>
                <form class="edit-form" on:submit=on_edit_submit>
                    <h2>"Edit type"</h2>
                    <input
                        placeholder="Name"
                        prop:value=move || edit_name.get()
                        on:input=move |ev| edit_name.set(event_target_value(&ev))
                    />
                    <input
                        placeholder="Description (optional)"
                        prop:value=move || edit_description.get()
                        on:input=move |ev| edit_description.set(event_target_value(&ev))
                    />
                    <div class="edit-form__actions">
                        <button class="btn" type="submit">"Save"</button>
                        <button class="btn btn--secondary" type="button" on:click=move |_| editing.set(None)>
                            "Cancel"
                        </button>
                    </div>
                </form>
            </Show>

            {move || {
                viewing_label()
                    .map(|(name, list)| {
                        let empty = list.is_empty();
                        view! {
                            <section class="type-tickets">
                                <h2>{format!("Tickets in {name}")}</h2>
                                <button class="btn btn--secondary" on:click=move |_| viewing.set(None)>
                                    "Close"
                                </button>
                                <Show when=move || empty>
                                    <p>"No tickets of this type."</p>
                                </Show>
                                <ul>
                                    {list
                                        .into_iter()
                                        .map(|ticket| {
                                            view! {
                                                <li>
                                                    <a href=format!("/ticket/{}", ticket.id)>{ticket.title}</a>
                                                </li>
                                            }
                                        })
                                        .collect_view()}
                                </ul>
                            </section>
                        }
                    })
            }}

            <h2>"All tickets by type"</h2>
            {move || {
                view! {
                    <TicketGroups groups=group_by_type(&types.get(), &tickets.get()) on_delete=delete_ticket/>
                }
            }}
        </div>
    }
}
