//! Role-gated navigation links and the post-login destination.
//!
//! Visibility only: every admin route is reachable by URL and the API
//! enforces access. Hints come from unverified token claims.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use crate::state::auth::AuthState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
}

const HOME: NavLink = NavLink { href: "/", label: "Home" };
const LOGIN: NavLink = NavLink { href: "/login", label: "Login" };
const REGISTER: NavLink = NavLink { href: "/register", label: "Register" };
const MY_TICKETS: NavLink = NavLink { href: "/user", label: "My Tickets" };
const ADMIN: NavLink = NavLink { href: "/admin", label: "Admin" };

/// Header links for the current session.
pub fn nav_links(auth: &AuthState) -> Vec<NavLink> {
    if !auth.logged_in {
        return vec![HOME, LOGIN, REGISTER];
    }
    let mut links = vec![HOME, MY_TICKETS];
    if auth.is_admin() {
        links.push(ADMIN);
    }
    links
}

/// Where to land after logging in: admin dashboard, the student's own
/// tickets, or home when the token carries no usable role.
pub fn post_login_route(auth: &AuthState) -> &'static str {
    match auth.claims.as_ref().and_then(|claims| claims.role) {
        Some(helpdesk::Role::Admin) => ADMIN.href,
        Some(helpdesk::Role::Student) => MY_TICKETS.href,
        None => HOME.href,
    }
}
