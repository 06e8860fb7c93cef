//! Client-side form checks.
//!
//! Only presence, password confirmation, and terms acceptance are checked
//! locally; everything else is the server's call. Error strings are shown
//! verbatim in the message overlay.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use crate::types::{
    Id, LoginRequest, RegisterRequest, Role, TicketInput, TicketStatus, TicketTypeInput, UserUpdate,
};

/// Raw register-form fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub accepted_terms: bool,
    pub role: Role,
}

/// Check the register form and build the request body.
///
/// # Errors
///
/// Returns the message to display when a field is missing, the passwords
/// differ, or the terms were not accepted.
pub fn validate_register(form: &RegisterForm) -> Result<RegisterRequest, &'static str> {
    let email = form.email.trim();
    if email.is_empty() || form.password.is_empty() {
        return Err("Email and password are required.");
    }
    if form.password != form.confirm_password {
        return Err("Passwords do not match!");
    }
    if !form.accepted_terms {
        return Err("You must accept the terms!");
    }
    Ok(RegisterRequest {
        email: email.to_owned(),
        password: form.password.clone(),
        role: form.role,
    })
}

/// # Errors
///
/// Returns the message to display when either field is empty.
pub fn validate_login(email: &str, password: &str) -> Result<LoginRequest, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Email and password are required.");
    }
    Ok(LoginRequest {
        email: email.to_owned(),
        password: password.to_owned(),
    })
}

/// # Errors
///
/// Returns the message to display when the name is blank.
pub fn validate_ticket_type(name: &str, description: &str) -> Result<TicketTypeInput, &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Type name is required.");
    }
    let description = description.trim();
    Ok(TicketTypeInput {
        name: name.to_owned(),
        description: (!description.is_empty()).then(|| description.to_owned()),
    })
}

/// # Errors
///
/// Returns the message to display when the title is blank.
pub fn validate_ticket(
    title: &str,
    description: &str,
    status: TicketStatus,
    type_id: Option<Id>,
) -> Result<TicketInput, &'static str> {
    let title = title.trim();
    if title.is_empty() {
        return Err("Title is required.");
    }
    Ok(TicketInput {
        title: title.to_owned(),
        description: description.trim().to_owned(),
        status,
        type_id,
    })
}

/// # Errors
///
/// Returns the message to display when the comment is blank.
pub fn validate_comment(text: &str) -> Result<String, &'static str> {
    let text = text.trim();
    if text.is_empty() {
        return Err("Comment cannot be empty.");
    }
    Ok(text.to_owned())
}

/// Build a user update from the admin edit form. Blank fields are left unchanged.
///
/// # Errors
///
/// Returns the message to display when nothing would change.
pub fn validate_user_update(
    email: &str,
    password: &str,
    role: Option<Role>,
) -> Result<UserUpdate, &'static str> {
    let email = email.trim();
    let update = UserUpdate {
        role,
        email: (!email.is_empty()).then(|| email.to_owned()),
        password: (!password.is_empty()).then(|| password.to_owned()),
    };
    if update.is_empty() {
        return Err("Nothing to update.");
    }
    Ok(update)
}

/// Interpret a `<select>` value for a ticket type: `""` and `"0"` mean uncategorized.
#[must_use]
pub fn parse_type_selection(value: &str) -> Option<Id> {
    value.trim().parse::<Id>().ok().filter(|id| *id > 0)
}
