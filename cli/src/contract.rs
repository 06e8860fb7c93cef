//! Live contract checks against a running API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `helpdesk-cli contract` pins the behaviour the web front-end depends on:
//! login stores a token only on success, created types are listed once, the
//! `?typeId=` filter, uncategorized grouping, comment ordering and deletion,
//! and that deleting a type leaves its tickets readable. The run needs an
//! admin account and creates uniquely named records, deleting them at the end.

#[cfg(test)]
#[path = "contract_test.rs"]
mod contract_test;

use helpdesk::grouping::group_by_type;
use helpdesk::{
    ApiClient, ClientConfig, Id, LoginRequest, MemorySessionStore, Ticket, TicketInput,
    TicketStatus, TicketTypeInput, Transport,
};

use crate::error::CliError;

pub struct Credentials {
    pub email: String,
    pub password: String,
}

fn ensure(check: &'static str, ok: bool, detail: impl FnOnce() -> String) -> Result<(), CliError> {
    if ok {
        tracing::info!(check, "passed");
        Ok(())
    } else {
        Err(CliError::Contract {
            check,
            detail: detail(),
        })
    }
}

fn new_ticket(title: String, type_id: Option<Id>) -> TicketInput {
    TicketInput {
        title,
        description: "Created by helpdesk-cli contract".to_owned(),
        status: TicketStatus::Open,
        type_id,
    }
}

/// Run every check in order; stops at the first failure.
///
/// Returns the names of the checks that passed.
///
/// # Errors
///
/// Returns [`CliError::Contract`] naming the failed check, or the underlying
/// API error when a request that should succeed does not.
pub async fn run<T>(
    transport: T,
    config: ClientConfig,
    credentials: &Credentials,
    suffix: &str,
) -> Result<Vec<&'static str>, CliError>
where
    T: Transport + Clone,
{
    let mut passed = Vec::new();

    // Login
    let rejected = ApiClient::new(transport.clone(), MemorySessionStore::new(), config.clone());
    let outcome = rejected
        .login(&LoginRequest {
            email: credentials.email.clone(),
            password: format!("{}-wrong-{suffix}", credentials.password),
        })
        .await;
    ensure("invalid-login-stores-nothing", outcome.is_err() && !rejected.is_logged_in(), || {
        "a wrong password produced a stored session".to_owned()
    })?;
    passed.push("invalid-login-stores-nothing");

    let api = ApiClient::new(transport, MemorySessionStore::new(), config);
    api.login(&LoginRequest {
        email: credentials.email.clone(),
        password: credentials.password.clone(),
    })
    .await?;
    ensure("valid-login-stores-token", api.is_logged_in(), || {
        "login succeeded but no token was stored".to_owned()
    })?;
    passed.push("valid-login-stores-token");

    // Ticket types
    let type_name = format!("Hardware {suffix}");
    let created = api
        .create_ticket_type(&TicketTypeInput {
            name: type_name.clone(),
            description: None,
        })
        .await?;
    ensure("create-type-echoes-entity", created.name == type_name && created.id > 0, || {
        format!("POST returned {created:?}")
    })?;
    passed.push("create-type-echoes-entity");

    let types = api.list_ticket_types().await?;
    let occurrences = types.iter().filter(|t| t.id == created.id).count();
    ensure("created-type-listed-once", occurrences == 1, || {
        format!("type {} listed {occurrences} times", created.id)
    })?;
    passed.push("created-type-listed-once");

    let before = api.list_tickets(Some(created.id)).await?;
    ensure("type-filter-empty-before-ticket", before.is_empty(), || {
        format!("{} tickets already filed under a new type", before.len())
    })?;
    passed.push("type-filter-empty-before-ticket");

    let typed = api
        .create_ticket(&new_ticket(format!("Typed {suffix}"), Some(created.id)))
        .await?;
    let after = api.list_tickets(Some(created.id)).await?;
    ensure("type-filter-finds-ticket", after.iter().any(|t| t.id == typed.id), || {
        format!("ticket {} missing from ?typeId={}", typed.id, created.id)
    })?;
    passed.push("type-filter-finds-ticket");

    // Grouping
    let loose = api
        .create_ticket(&new_ticket(format!("Loose {suffix}"), None))
        .await?;
    let groups = group_by_type(&api.list_ticket_types().await?, &api.list_tickets(None).await?);
    let in_uncategorized = groups
        .iter()
        .filter(|g| g.is_uncategorized())
        .any(|g| g.tickets.iter().any(|t| t.id == loose.id));
    ensure("untyped-ticket-uncategorized", in_uncategorized, || {
        format!("ticket {} not in the uncategorized bucket", loose.id)
    })?;
    passed.push("untyped-ticket-uncategorized");

    // Comments
    let first = api.create_comment(typed.id, "first").await?;
    let second = api.create_comment(typed.id, "second").await?;
    let listed = api.list_comments(typed.id).await?;
    let position = |id: Id| listed.iter().position(|c| c.id == id);
    ensure(
        "comments-in-creation-order",
        matches!((position(first.id), position(second.id)), (Some(a), Some(b)) if a < b),
        || format!("listed comment ids: {:?}", listed.iter().map(|c| c.id).collect::<Vec<_>>()),
    )?;
    passed.push("comments-in-creation-order");

    api.delete_comment(typed.id, first.id).await?;
    let remaining = api.list_comments(typed.id).await?;
    ensure(
        "comment-delete-isolated",
        remaining.iter().all(|c| c.id != first.id) && remaining.iter().any(|c| c.id == second.id),
        || format!("remaining comment ids: {:?}", remaining.iter().map(|c| c.id).collect::<Vec<_>>()),
    )?;
    passed.push("comment-delete-isolated");

    // Type deletion
    api.delete_ticket_type(created.id).await?;
    let orphan: Ticket = api.get_ticket(typed.id).await?;
    let types = api.list_ticket_types().await?;
    let regrouped = group_by_type(&types, std::slice::from_ref(&orphan));
    ensure(
        "type-delete-keeps-tickets",
        regrouped.iter().any(|g| g.is_uncategorized() && !g.is_empty()),
        || format!("ticket {} still grouped under a deleted type", orphan.id),
    )?;
    passed.push("type-delete-keeps-tickets");

    // Cleanup
    for id in [typed.id, loose.id] {
        if let Err(err) = api.delete_ticket(id).await {
            tracing::warn!(ticket = id, error = %err, "cleanup failed");
        }
    }
    api.logout()?;

    Ok(passed)
}
