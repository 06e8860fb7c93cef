use super::*;
use helpdesk::{Role, UnverifiedClaims};

fn auth_with_role(role: Option<Role>) -> AuthState {
    AuthState {
        logged_in: true,
        claims: Some(UnverifiedClaims {
            role,
            ..UnverifiedClaims::default()
        }),
    }
}

#[test]
fn logged_out_sees_auth_links() {
    let hrefs: Vec<_> = nav_links(&AuthState::default()).iter().map(|l| l.href).collect();
    assert_eq!(hrefs, ["/", "/login", "/register"]);
}

#[test]
fn student_sees_own_tickets_only() {
    let hrefs: Vec<_> = nav_links(&auth_with_role(Some(Role::Student)))
        .iter()
        .map(|l| l.href)
        .collect();
    assert_eq!(hrefs, ["/", "/user"]);
}

#[test]
fn admin_sees_admin_link() {
    let links = nav_links(&auth_with_role(Some(Role::Admin)));
    assert!(links.iter().any(|l| l.href == "/admin"));
}

#[test]
fn post_login_route_follows_role_hint() {
    assert_eq!(post_login_route(&auth_with_role(Some(Role::Admin))), "/admin");
    assert_eq!(post_login_route(&auth_with_role(Some(Role::Student))), "/user");
    assert_eq!(post_login_route(&auth_with_role(None)), "/");
    assert_eq!(post_login_route(&AuthState::default()), "/");
}
