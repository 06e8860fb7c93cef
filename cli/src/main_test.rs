use clap::CommandFactory;

use super::*;

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn defaults_point_at_hosted_api_with_flat_comments() {
    let cli = Cli::try_parse_from(["helpdesk-cli", "types", "list"]).expect("parse");
    assert_eq!(cli.comment_routes, CommentRoutes::Flat);
    assert!(cli.base_url.starts_with("http"));
}

#[test]
fn nested_comment_routes_parse_case_insensitively() {
    let cli = Cli::try_parse_from(["helpdesk-cli", "--comment-routes", "NESTED", "comments", "list", "3"])
        .expect("parse");
    assert_eq!(cli.comment_routes, CommentRoutes::Nested);
    assert!(matches!(
        cli.command,
        Command::Comments(CommentsCommand {
            command: CommentsSubcommand::List { ticket_id: 3 }
        })
    ));
}

#[test]
fn ticket_update_accepts_status_and_type() {
    let cli = Cli::try_parse_from([
        "helpdesk-cli", "tickets", "update", "7", "--status", "closed", "--type-id", "0",
    ])
    .expect("parse");
    let Command::Tickets(TicketsCommand {
        command: TicketsSubcommand::Update { id, status, type_id, .. },
    }) = cli.command
    else {
        panic!("expected tickets update");
    };
    assert_eq!(id, 7);
    assert_eq!(status, Some(TicketStatus::Closed));
    assert_eq!(positive(type_id), None);
}

#[test]
fn register_role_defaults_to_student() {
    let cli = Cli::try_parse_from([
        "helpdesk-cli", "auth", "register", "--email", "a@b.c", "--password", "pw",
    ])
    .expect("parse");
    assert!(matches!(
        cli.command,
        Command::Auth(AuthCommand {
            command: AuthSubcommand::Register { role: Role::Student, .. }
        })
    ));
}

#[test]
fn unknown_role_is_rejected() {
    let result = Cli::try_parse_from(["helpdesk-cli", "users", "update", "1", "--role", "janitor"]);
    assert!(result.is_err());
}

#[test]
fn positive_treats_zero_and_negative_as_none() {
    assert_eq!(positive(Some(0)), None);
    assert_eq!(positive(Some(-2)), None);
    assert_eq!(positive(Some(4)), Some(4));
}
