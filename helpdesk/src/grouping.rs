//! Client-side ticket grouping and comment ordering.

#[cfg(test)]
#[path = "grouping_test.rs"]
mod grouping_test;

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::types::{Comment, Id, Ticket, TicketType};

pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Tickets sharing one type, or the uncategorized bucket when `ticket_type` is `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TicketGroup {
    pub ticket_type: Option<TicketType>,
    pub tickets: Vec<Ticket>,
}

impl TicketGroup {
    #[must_use]
    pub fn label(&self) -> &str {
        self.ticket_type
            .as_ref()
            .map_or(UNCATEGORIZED_LABEL, |ticket_type| ticket_type.name.as_str())
    }

    #[must_use]
    pub fn is_uncategorized(&self) -> bool {
        self.ticket_type.is_none()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

/// One group per type in `types` order, followed by the uncategorized bucket.
///
/// The uncategorized bucket is always present. Tickets pointing at a type that
/// is not in `types` land there too. Ticket order within a group follows
/// `tickets`.
#[must_use]
pub fn group_by_type(types: &[TicketType], tickets: &[Ticket]) -> Vec<TicketGroup> {
    let mut groups: Vec<TicketGroup> = types
        .iter()
        .map(|ticket_type| TicketGroup {
            ticket_type: Some(ticket_type.clone()),
            tickets: Vec::new(),
        })
        .collect();
    let mut uncategorized = TicketGroup {
        ticket_type: None,
        tickets: Vec::new(),
    };

    for ticket in tickets {
        let slot = ticket.type_id.and_then(|type_id| {
            groups
                .iter_mut()
                .find(|group| group.ticket_type.as_ref().is_some_and(|t| t.id == type_id))
        });
        match slot {
            Some(group) => group.tickets.push(ticket.clone()),
            None => uncategorized.tickets.push(ticket.clone()),
        }
    }

    groups.push(uncategorized);
    groups
}

/// Number of tickets referencing `type_id`.
#[must_use]
pub fn count_for_type(tickets: &[Ticket], type_id: Id) -> usize {
    tickets
        .iter()
        .filter(|ticket| ticket.type_id == Some(type_id))
        .count()
}

/// Tickets owned by `user_id`, in input order.
#[must_use]
pub fn owned_by(tickets: Vec<Ticket>, user_id: Id) -> Vec<Ticket> {
    tickets
        .into_iter()
        .filter(|ticket| ticket.user_id == Some(user_id))
        .collect()
}

/// Sort comments oldest first.
///
/// Timestamps that parse (RFC 3339, or ISO 8601 without offset, read as UTC)
/// order chronologically; unparseable ones sort first by raw text. Ties break
/// on id, which the server assigns in creation order.
pub fn sort_comments(comments: &mut [Comment]) {
    comments.sort_by_cached_key(|comment| {
        (
            parse_timestamp(&comment.created_at),
            comment.created_at.clone(),
            comment.id,
        )
    });
}

/// Nanoseconds since the Unix epoch.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<i128> {
    let raw = raw.trim();
    if let Ok(at) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(at.unix_timestamp_nanos());
    }
    let local = format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
    );
    PrimitiveDateTime::parse(raw, &local)
        .ok()
        .map(|at| at.assume_utc().unix_timestamp_nanos())
}

/// `YYYY-MM-DD HH:MM` in UTC, or the raw text if it does not parse.
#[must_use]
pub fn display_timestamp(raw: &str) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]");
    parse_timestamp(raw)
        .and_then(|nanos| OffsetDateTime::from_unix_timestamp_nanos(nanos).ok())
        .and_then(|at| at.format(&format).ok())
        .unwrap_or_else(|| raw.to_owned())
}
