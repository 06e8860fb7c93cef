//! Single ticket: edit its fields and manage its comments.

use helpdesk::grouping::display_timestamp;
use helpdesk::validate::validate_comment;
use helpdesk::{Comment, Id, Ticket, TicketType};
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::net::api::{api_client, spawn_scoped, view_scope};
use crate::pages::tickets::{StatusSelect, TypeSelect};
use crate::state::auth::AuthState;
use crate::state::forms::TicketDraft;
use crate::state::ui::UiState;
use crate::util::browser::{confirm, go_to};

#[component]
pub fn TicketDetailPage() -> impl IntoView {
    let params = use_params_map();
    let ticket_id = params.with_untracked(|p| p.get("id")).and_then(|raw| raw.parse::<Id>().ok());

    view! {
        {match ticket_id {
            Some(id) => view! { <TicketDetail ticket_id=id/> }.into_any(),
            None => view! { <p class="ticket-detail__missing">"Unknown ticket."</p> }.into_any(),
        }}
    }
}

#[component]
fn TicketDetail(ticket_id: Id) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let scope = view_scope();

    let ticket = RwSignal::new(None::<Ticket>);
    let draft = RwSignal::new(TicketDraft::default());
    let types = RwSignal::new(Vec::<TicketType>::new());
    let comments = RwSignal::new(Vec::<Comment>::new());
    let new_comment = RwSignal::new(String::new());
    let editing_comment = RwSignal::new(None::<Id>);
    let editing_text = RwSignal::new(String::new());

    let reload_ticket = {
        let scope = scope.clone();
        Callback::new(move |()| {
            let api = api_client();
            spawn_scoped(
                &scope,
                ui,
                "Failed to fetch ticket",
                async move {
                    let fetched = api.get_ticket(ticket_id).await?;
                    let fetched_types = api.list_ticket_types().await?;
                    Ok((fetched, fetched_types))
                },
                move |(fetched, fetched_types)| {
                    draft.set(TicketDraft::from_ticket(&fetched));
                    ticket.set(Some(fetched));
                    types.set(fetched_types);
                },
            );
        })
    };

    let reload_comments = {
        let scope = scope.clone();
        Callback::new(move |()| {
            let api = api_client();
            spawn_scoped(
                &scope,
                ui,
                "Failed to fetch comments",
                async move { api.list_comments(ticket_id).await },
                move |list| comments.set(list),
            );
        })
    };

    let save_ticket = {
        let scope = scope.clone();
        Callback::new(move |updated: Ticket| {
            let api = api_client();
            spawn_scoped(
                &scope,
                ui,
                "Failed to update ticket",
                async move { api.update_ticket(&updated).await },
                move |()| {
                    ui.update(|u| u.show_message("Ticket updated."));
                    reload_ticket.run(());
                },
            );
        })
    };

    let delete_ticket = {
        let scope = scope.clone();
        Callback::new(move |()| {
            if !confirm("Delete this ticket?") {
                return;
            }
            let api = api_client();
            spawn_scoped(
                &scope,
                ui,
                "Failed to delete ticket",
                async move { api.delete_ticket(ticket_id).await },
                move |()| {
                    let back = if auth.get_untracked().is_admin() { "/admin/tickets" } else { "/user" };
                    go_to(back);
                },
            );
        })
    };

    let add_comment = {
        let scope = scope.clone();
        Callback::new(move |text: String| {
            let api = api_client();
            spawn_scoped(
                &scope,
                ui,
                "Failed to add comment",
                async move { api.create_comment(ticket_id, &text).await },
                move |_| {
                    new_comment.set(String::new());
                    reload_comments.run(());
                },
            );
        })
    };

    let update_comment = {
        let scope = scope.clone();
        Callback::new(move |(comment_id, text): (Id, String)| {
            let api = api_client();
            spawn_scoped(
                &scope,
                ui,
                "Failed to update comment",
                async move { api.update_comment(ticket_id, comment_id, &text).await },
                move |()| {
                    editing_comment.set(None);
                    reload_comments.run(());
                },
            );
        })
    };

    let delete_comment = Callback::new(move |comment_id: Id| {
        if !confirm("Delete this comment?") {
            return;
        }
        let api = api_client();
        spawn_scoped(
            &scope,
            ui,
            "Failed to delete comment",
            async move { api.delete_comment(ticket_id, comment_id).await },
            move |()| reload_comments.run(()),
        );
    });

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(current) = ticket.get() else {
            return;
        };
        match draft.get().apply_to(&current) {
            Ok(updated) => save_ticket.run(updated),
            Err(message) => ui.update(|u| u.show_message(message)),
        }
    };

    let on_add_comment = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match validate_comment(&new_comment.get()) {
            Ok(text) => add_comment.run(text),
            Err(message) => ui.update(|u| u.show_message(message)),
        }
    };

    let on_save_comment = move |comment_id: Id| match validate_comment(&editing_text.get()) {
        Ok(text) => update_comment.run((comment_id, text)),
        Err(message) => ui.update(|u| u.show_message(message)),
    };

    reload_ticket.run(());
    reload_comments.run(());

    view! {
        <div class="ticket-detail">
            <Show when=move || ticket.get().is_some() fallback=|| view! { <p>"Loading ticket..."</p> }>
                <form class="edit-form" on:submit=on_save>
                    <h1>{format!("Ticket #{ticket_id}")}</h1>
                    <input
                        placeholder="Title"
                        prop:value=move || draft.get().title
                        on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
                    />
                    <textarea
                        placeholder="Description"
                        prop:value=move || draft.get().description
                        on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                    ></textarea>
                    <StatusSelect
                        value=Signal::derive(move || draft.get().status)
                        on_change=Callback::new(move |value: String| draft.update(|d| d.status = value))
                    />
                    <TypeSelect
                        types=types
                        value=Signal::derive(move || draft.get().type_id)
                        on_change=Callback::new(move |value: String| draft.update(|d| d.type_id = value))
                    />
                    <div class="edit-form__actions">
                        <button class="btn" type="submit">"Save"</button>
                        <button class="btn btn--danger" type="button" on:click=move |_| delete_ticket.run(())>
                            "Delete ticket"
                        </button>
                    </div>
                </form>
            </Show>

            <section class="comments">
                <h2>"Comments"</h2>
                <Show when=move || comments.get().is_empty()>
                    <p class="comments__empty">"No comments yet."</p>
                </Show>
                <ul class="comments__list">
                    {move || {
                        comments
                            .get()
                            .into_iter()
                            .map(|comment| {
                                let id = comment.id;
                                let body = comment.body.clone();
                                let shown_body = comment.body.clone();
                                view! {
                                    <li class="comment">
                                        <div class="comment__meta">
                                            {comment.user_id.map(|user| format!("User #{user} · ")).unwrap_or_default()}
                                            {display_timestamp(&comment.created_at)}
                                        </div>
                                        <Show
                                            when=move || editing_comment.get() == Some(id)
                                            fallback=move || view! { <p class="comment__body">{shown_body.clone()}</p> }
                                        >
                                            <textarea
                                                prop:value=move || editing_text.get()
                                                on:input=move |ev| editing_text.set(event_target_value(&ev))
                                            ></textarea>
                                            <button class="btn" on:click=move |_| on_save_comment(id)>"Save"</button>
                                            <button class="btn btn--secondary" on:click=move |_| editing_comment.set(None)>
                                                "Cancel"
                                            </button>
                                        </Show>
                                        <div class="comment__actions">
                                            <button
                                                class="btn btn--secondary"
                                                on:click=move |_| {
                                                    editing_text.set(body.clone());
                                                    editing_comment.set(Some(id));
                                                }
                                            >
                                                "Edit"
                                            </button>
                                            <button class="btn btn--danger" on:click=move |_| delete_comment.run(id)>
                                                "Delete"
                                            </button>
                                        </div>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
                <form class="comments__new" on:submit=on_add_comment>
                    <textarea
                        placeholder="Add a comment"
                        prop:value=move || new_comment.get()
                        on:input=move |ev| new_comment.set(event_target_value(&ev))
                    ></textarea>
                    <button class="btn" type="submit">"Post comment"</button>
                </form>
            </section>
        </div>
    }
}
