//! Admin user management: list, change role, edit credentials, delete.

use helpdesk::validate::validate_user_update;
use helpdesk::{Id, Role, User, UserUpdate};
use leptos::prelude::*;

use crate::net::api::{api_client, spawn_scoped, view_scope};
use crate::state::ui::UiState;
use crate::util::browser::confirm;

#[component]
pub fn AdminUsersPage() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let scope = view_scope();

    let users = RwSignal::new(Vec::<User>::new());
    let loading = RwSignal::new(true);
    let editing = RwSignal::new(None::<Id>);
    let edit_email = RwSignal::new(String::new());
    let edit_password = RwSignal::new(String::new());

    let reload = {
        let scope = scope.clone();
        Callback::new(move |()| {
            let api = api_client();
            spawn_scoped(&scope, ui, "Failed to fetch users", async move { api.list_users().await }, move |list| {
                users.set(list);
                loading.set(false);
            });
        })
    };

    let save_user = {
        let scope = scope.clone();
        Callback::new(move |(id, update): (Id, UserUpdate)| {
            let api = api_client();
            spawn_scoped(
                &scope,
                ui,
                "Failed to update user",
                async move { api.update_user(id, &update).await },
                move |()| {
                    editing.set(None);
                    edit_password.set(String::new());
                    ui.update(|u| u.show_message("User updated."));
                    reload.run(());
                },
            );
        })
    };

    let delete_user = Callback::new(move |id: Id| {
        if !confirm("Delete this user?") {
            return;
        }
        let api = api_client();
        spawn_scoped(
            &scope,
            ui,
            "Failed to delete user",
            async move { api.delete_user(id).await },
            move |()| reload.run(()),
        );
    });

    let change_role = move |id: Id, raw: String| {
        let Ok(role) = raw.parse::<Role>() else {
            return;
        };
        save_user.run((
            id,
            UserUpdate {
                role: Some(role),
                ..UserUpdate::default()
            },
        ));
    };

    let on_edit_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(id) = editing.get() else {
            return;
        };
        match validate_user_update(&edit_email.get(), &edit_password.get(), None) {
            Ok(update) => save_user.run((id, update)),
            Err(message) => ui.update(|u| u.show_message(message)),
        }
    };

    reload.run(());

    view! {
        <div class="admin-users-page">
            <h1>"Users"</h1>
            <Show when=move || !loading.get() fallback=|| view! { <p>"Loading users..."</p> }>
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"ID"</th>
                            <th>"Email"</th>
                            <th>"Role"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            users
                                .get()
                                .into_iter()
                                .map(|user| {
                                    let id = user.id;
                                    let email = user.email.clone();
                                    let role = user.role;
                                    view! {
                                        <tr>
                                            <td>{id}</td>
                                            <td>{user.email}</td>
                                            <td>
                                                <select
                                                    prop:value=role.as_str()
                                                    on:change=move |ev| change_role(id, event_target_value(&ev))
                                                >
                                                    {Role::ALL
                                                        .iter()
                                                        .map(|r| view! { <option value=r.as_str()>{r.as_str()}</option> })
                                                        .collect_view()}
                                                </select>
                                            </td>
                                            <td class="data-table__actions">
                                                <button
                                                    class="btn btn--secondary"
                                                    on:click=move |_| {
                                                        editing.set(Some(id));
                                                        edit_email.set(email.clone());
                                                        edit_password.set(String::new());
                                                    }
                                                >
                                                    "Edit"
                                                </button>
                                                <button class="btn btn--danger" on:click=move |_| delete_user.run(id)>
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
                    <h2>{move || format!("Edit user #{}", editing.get().unwrap_or_default())}</h2>
                    <input
                        type="email"
                        placeholder="Email"
                        prop:value=move || edit_email.get()
                        on:input=move |ev| edit_email.set(event_target_value(&ev))
                    />
                    <input
                        type="password"
                        placeholder="New password (leave blank to keep)"
                        prop:value=move || edit_password.get()
                        on:input=move |ev| edit_password.set(event_target_value(&ev))
                    />
                    <div class="edit-form__actions">
                        <button class="btn" type="submit">"Save"</button>
                        <button class="btn btn--secondary" type="button" on:click=move |_| editing.set(None)>
                            "Cancel"
                        </button>
                    </div>
                </form>
            </Show>
        </div>
    }
}
