//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

use crate::components::message_modal::MessageModal;
use crate::components::site_header::SiteHeader;
use crate::pages::{
    admin::AdminPage,
    admin_users::AdminUsersPage,
    landing::LandingPage,
    login::LoginPage,
    register::RegisterPage,
    ticket_detail::TicketDetailPage,
    ticket_types::TicketTypesPage,
    tickets::{AdminTicketsPage, UserTicketsPage},
};
use crate::state::{auth::AuthState, ui::UiState};
use crate::util::{dark_mode, session_store::BrowserSessionStore};

/// Root application component.
///
/// Provides the shared state contexts and sets up client-side routing. Admin
/// routes are not guarded here; the API rejects unauthorized calls.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let dark = dark_mode::read_preference();
    dark_mode::apply(dark);

    let auth = RwSignal::new(AuthState::from_store(&BrowserSessionStore));
    let ui = RwSignal::new(UiState {
        dark_mode: dark,
        message: None,
    });

    provide_context(auth);
    provide_context(ui);

    view! {
        <Title text="School Help Desk"/>

        <Router>
            <SiteHeader/>
            <main class="page">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=path!("/") view=LandingPage/>
                    <Route path=path!("/login") view=LoginPage/>
                    <Route path=path!("/register") view=RegisterPage/>
                    <Route path=path!("/admin") view=AdminPage/>
                    <Route path=path!("/admin/users") view=AdminUsersPage/>
                    <Route path=path!("/admin/ticket-types") view=TicketTypesPage/>
                    <Route path=path!("/admin/tickets") view=AdminTicketsPage/>
                    <Route path=path!("/user") view=UserTicketsPage/>
                    <Route path=path!("/ticket/:id") view=TicketDetailPage/>
                </Routes>
            </main>
            <MessageModal/>
        </Router>
    }
}
