//! Editable form drafts for tickets.
//!
//! Form inputs are plain strings (what `<input>` and `<select>` produce); the
//! draft converts them into typed requests through `helpdesk::validate`.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use helpdesk::validate::{parse_type_selection, validate_ticket};
use helpdesk::{Ticket, TicketInput, TicketStatus};

/// Raw ticket form values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TicketDraft {
    pub title: String,
    pub description: String,
    pub status: String,
    /// `<select>` value; `""` or `"0"` means uncategorized.
    pub type_id: String,
}

impl TicketDraft {
    /// A blank draft for a new ticket: open and uncategorized.
    pub fn new_ticket() -> Self {
        Self {
            status: TicketStatus::Open.as_str().to_owned(),
            ..Self::default()
        }
    }

    pub fn from_ticket(ticket: &Ticket) -> Self {
        Self {
            title: ticket.title.clone(),
            description: ticket.description.clone(),
            status: ticket.status.as_str().to_owned(),
            type_id: ticket.type_id.map(|id| id.to_string()).unwrap_or_default(),
        }
    }

    /// Validate into a create request.
    ///
    /// # Errors
    ///
    /// Returns the message to display when the title is blank.
    pub fn to_input(&self) -> Result<TicketInput, &'static str> {
        let status = self.status.parse::<TicketStatus>().unwrap_or_default();
        validate_ticket(
            &self.title,
            &self.description,
            status,
            parse_type_selection(&self.type_id),
        )
    }

    /// Apply the draft to `ticket`, keeping its id and owner.
    ///
    /// # Errors
    ///
    /// Returns the message to display when the title is blank.
    pub fn apply_to(&self, ticket: &Ticket) -> Result<Ticket, &'static str> {
        let input = self.to_input()?;
        Ok(input.into_ticket(ticket.id, ticket.user_id))
    }
}

