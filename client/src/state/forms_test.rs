use super::*;

fn ticket() -> Ticket {
    Ticket {
        id: 4,
        user_id: Some(9),
        type_id: Some(2),
        title: "Projector".to_owned(),
        description: "Room 12".to_owned(),
        status: TicketStatus::Open,
    }
}

#[test]
fn new_ticket_draft_is_open_and_uncategorized() {
    let input = TicketDraft {
        title: "Wifi".to_owned(),
        ..TicketDraft::new_ticket()
    }
    .to_input()
    .expect("valid");
    assert_eq!(input.status, TicketStatus::Open);
    assert_eq!(input.type_id, None);
}

#[test]
fn apply_keeps_id_and_owner() {
    let mut draft = TicketDraft::from_ticket(&ticket());
    draft.status = "Closed".to_owned();
    draft.type_id = "0".to_owned();

    let updated = draft.apply_to(&ticket()).expect("valid");
    assert_eq!(updated.id, 4);
    assert_eq!(updated.user_id, Some(9));
    assert_eq!(updated.status, TicketStatus::Closed);
    assert!(updated.is_uncategorized());
}

#[test]
fn blank_title_is_rejected() {
    let mut draft = TicketDraft::from_ticket(&ticket());
    draft.title = "  ".to_owned();
    assert_eq!(draft.apply_to(&ticket()), Err("Title is required."));
}

#[test]
fn from_ticket_round_trips_type_selection() {
    let draft = TicketDraft::from_ticket(&ticket());
    assert_eq!(draft.type_id, "2");
    assert_eq!(parse_type_selection(&draft.type_id), Some(2));
}
