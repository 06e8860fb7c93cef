//! Tickets rendered as one section per type plus the uncategorized bucket.

use helpdesk::{Id, TicketGroup};
use leptos::prelude::*;

/// Grouped ticket list. Each row links to the ticket detail route and offers
/// a delete action through `on_delete`. Empty typed groups are shown with a
/// placeholder so admins can see unused types; an empty uncategorized bucket
/// is hidden.
#[component]
pub fn TicketGroups(groups: Vec<TicketGroup>, on_delete: Callback<Id>) -> impl IntoView {
    groups
        .into_iter()
        .filter(|group| !(group.is_uncategorized() && group.is_empty()))
        .map(|group| {
            let label = group.label().to_owned();
            let count = group.len();
            let empty = group.is_empty();
            let rows = group
                .tickets
                .into_iter()
                .map(|ticket| {
                    let id = ticket.id;
                    view! {
                        <li class="ticket-row">
                            <a class="ticket-row__title" href=format!("/ticket/{id}")>
                                {ticket.title}
                            </a>
                            <span class="ticket-row__status">{ticket.status.as_str()}</span>
                            <button class="btn btn--danger ticket-row__delete" on:click=move |_| on_delete.run(id)>
                                "Delete"
                            </button>
                        </li>
                    }
                })
                .collect_view();
            view! {
                <section class="ticket-group">
                    <h3 class="ticket-group__label">
                        {label}
                        <span class="ticket-group__count">{format!(" ({count})")}</span>
                    </h3>
                    <Show when=move || empty>
                        <p class="ticket-group__empty">"No tickets."</p>
                    </Show>
                    <ul class="ticket-group__rows">{rows}</ul>
                </section>
            }
        })
        .collect_view()
}
