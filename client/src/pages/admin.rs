//! Admin dashboard: entry points to the management views.

use leptos::prelude::*;

#[component]
pub fn AdminPage() -> impl IntoView {
    view! {
        <div class="admin-page">
            <h1>"Administration"</h1>
            <div class="admin-page__cards">
                <a class="admin-card" href="/admin/users">
                    <h2>"Users"</h2>
                    <p>"Change roles, update credentials, remove accounts."</p>
                </a>
                <a class="admin-card" href="/admin/ticket-types">
                    <h2>"Ticket types"</h2>
                    <p>"Create and edit the categories tickets are filed under."</p>
                </a>
                <a class="admin-card" href="/admin/tickets">
                    <h2>"All tickets"</h2>
                    <p>"Every ticket, grouped by type."</p>
                </a>
            </div>
        </div>
    }
}
