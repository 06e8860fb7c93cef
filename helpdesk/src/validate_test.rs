use super::*;

fn register_form() -> RegisterForm {
    RegisterForm {
        email: "  student@school.test ".to_owned(),
        password: "hunter22".to_owned(),
        confirm_password: "hunter22".to_owned(),
        accepted_terms: true,
        role: Role::Student,
    }
}

#[test]
fn register_trims_email_and_keeps_role() {
    let request = validate_register(&register_form()).expect("valid");
    assert_eq!(request.email, "student@school.test");
    assert_eq!(request.role, Role::Student);
}

#[test]
fn register_rejects_password_mismatch_before_terms() {
    let form = RegisterForm {
        confirm_password: "other".to_owned(),
        accepted_terms: false,
        ..register_form()
    };
    assert_eq!(validate_register(&form), Err("Passwords do not match!"));
}

#[test]
fn register_requires_terms() {
    let form = RegisterForm {
        accepted_terms: false,
        ..register_form()
    };
    assert_eq!(validate_register(&form), Err("You must accept the terms!"));
}

#[test]
fn register_requires_email_and_password() {
    let form = RegisterForm {
        email: "   ".to_owned(),
        ..register_form()
    };
    assert_eq!(validate_register(&form), Err("Email and password are required."));
}

#[test]
fn login_requires_both_fields() {
    assert!(validate_login("a@b.c", "pw").is_ok());
    assert_eq!(validate_login("", "pw"), Err("Email and password are required."));
    assert_eq!(validate_login("a@b.c", ""), Err("Email and password are required."));
}

#[test]
fn ticket_type_requires_name_and_drops_blank_description() {
    let input = validate_ticket_type(" Hardware ", "  ").expect("valid");
    assert_eq!(input.name, "Hardware");
    assert_eq!(input.description, None);
    assert_eq!(validate_ticket_type(" ", "x"), Err("Type name is required."));
}

#[test]
fn ticket_requires_title() {
    let input = validate_ticket(" Broken chair ", " Room 4 ", TicketStatus::Open, Some(2)).expect("valid");
    assert_eq!(input.title, "Broken chair");
    assert_eq!(input.description, "Room 4");
    assert_eq!(input.type_id, Some(2));
    assert_eq!(
        validate_ticket("", "x", TicketStatus::Open, None),
        Err("Title is required.")
    );
}

#[test]
fn comment_must_not_be_blank() {
    assert_eq!(validate_comment("  thanks  "), Ok("thanks".to_owned()));
    assert_eq!(validate_comment(" \n "), Err("Comment cannot be empty."));
}

#[test]
fn user_update_sends_only_filled_fields() {
    let update = validate_user_update(" new@school.test ", "", None).expect("valid");
    assert_eq!(update.email.as_deref(), Some("new@school.test"));
    assert_eq!(update.password, None);
    assert_eq!(validate_user_update("", "", None), Err("Nothing to update."));
}

#[test]
fn type_selection_zero_and_blank_mean_uncategorized() {
    assert_eq!(parse_type_selection(""), None);
    assert_eq!(parse_type_selection("0"), None);
    assert_eq!(parse_type_selection("3"), Some(3));
    assert_eq!(parse_type_selection("abc"), None);
}
