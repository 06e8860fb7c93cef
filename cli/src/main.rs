mod contract;
mod error;
mod session_file;
mod transport;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use helpdesk::grouping::{display_timestamp, group_by_type};
use helpdesk::validate::{validate_comment, validate_ticket, validate_ticket_type, validate_user_update};
use helpdesk::{
    ApiClient, ClientConfig, CommentRoutes, DEFAULT_BASE_URL, Id, LoginRequest, RegisterRequest,
    Role, TicketStatus,
};
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use crate::contract::Credentials;
use crate::error::CliError;
use crate::session_file::{FileSessionStore, default_session_path};
use crate::transport::ReqwestTransport;

type Api = ApiClient<ReqwestTransport, FileSessionStore>;

#[derive(Parser, Debug)]
#[command(name = "helpdesk-cli", about = "School help-desk API CLI")]
struct Cli {
    #[arg(long, env = "HELPDESK_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(long, env = "HELPDESK_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[arg(long, env = "HELPDESK_COMMENT_ROUTES", default_value = "flat")]
    comment_routes: CommentRoutes,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Auth(AuthCommand),
    Users(UsersCommand),
    Types(TypesCommand),
    Tickets(TicketsCommand),
    Comments(CommentsCommand),
    /// Check the API contract the web front-end relies on. Needs an admin account.
    Contract {
        #[arg(long, env = "HELPDESK_EMAIL")]
        email: String,
        #[arg(long, env = "HELPDESK_PASSWORD")]
        password: String,
    },
}

#[derive(Args, Debug)]
struct AuthCommand {
    #[command(subcommand)]
    command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
enum AuthSubcommand {
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "Student")]
        role: Role,
    },
    Login {
        #[arg(long, env = "HELPDESK_EMAIL")]
        email: String,
        #[arg(long, env = "HELPDESK_PASSWORD")]
        password: String,
    },
    Logout,
    /// Show the authenticated user as reported by `/User/me`.
    Whoami,
}

#[derive(Args, Debug)]
struct UsersCommand {
    #[command(subcommand)]
    command: UsersSubcommand,
}

#[derive(Subcommand, Debug)]
enum UsersSubcommand {
    List,
    Update {
        id: Id,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        role: Option<Role>,
    },
    Delete {
        id: Id,
    },
}

#[derive(Args, Debug)]
struct TypesCommand {
    #[command(subcommand)]
    command: TypesSubcommand,
}

#[derive(Subcommand, Debug)]
enum TypesSubcommand {
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    Update {
        id: Id,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    Delete {
        id: Id,
    },
}

#[derive(Args, Debug)]
struct TicketsCommand {
    #[command(subcommand)]
    command: TicketsSubcommand,
}

#[derive(Subcommand, Debug)]
enum TicketsSubcommand {
    List {
        #[arg(long)]
        type_id: Option<Id>,
    },
    /// Tickets owned by the logged-in user.
    Mine,
    /// Tickets grouped by type, uncategorized last.
    Grouped {
        #[arg(long, default_value_t = false)]
        mine: bool,
    },
    Get {
        id: Id,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, help = "Ticket type id; 0 or omitted for uncategorized")]
        type_id: Option<Id>,
    },
    Update {
        id: Id,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<TicketStatus>,
        #[arg(long, help = "Ticket type id; 0 clears the type")]
        type_id: Option<Id>,
    },
    Delete {
        id: Id,
    },
}

#[derive(Args, Debug)]
struct CommentsCommand {
    #[command(subcommand)]
    command: CommentsSubcommand,
}

#[derive(Subcommand, Debug)]
enum CommentsSubcommand {
    List {
        ticket_id: Id,
    },
    Add {
        ticket_id: Id,
        text: String,
    },
    Edit {
        ticket_id: Id,
        comment_id: Id,
        text: String,
    },
    Delete {
        ticket_id: Id,
        comment_id: Id,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    let config = ClientConfig {
        base_url: cli.base_url,
        comment_routes: cli.comment_routes,
    };
    let transport = ReqwestTransport::new()?;
    let session = FileSessionStore::new(cli.session_file.unwrap_or_else(default_session_path));
    let api = ApiClient::new(transport.clone(), session, config.clone());

    match cli.command {
        Command::Auth(auth) => run_auth(&api, auth).await,
        Command::Users(users) => run_users(&api, users).await,
        Command::Types(types) => run_types(&api, types).await,
        Command::Tickets(tickets) => run_tickets(&api, tickets).await,
        Command::Comments(comments) => run_comments(&api, comments).await,
        Command::Contract { email, password } => {
            run_contract(transport, config, Credentials { email, password }).await
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_contract(
    transport: ReqwestTransport,
    config: ClientConfig,
    credentials: Credentials,
) -> Result<(), CliError> {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    let passed = contract::run(transport, config, &credentials, &suffix[..8]).await?;
    for check in &passed {
        println!("ok  {check}");
    }
    println!("{} checks passed", passed.len());
    Ok(())
}

async fn run_auth(api: &Api, auth: AuthCommand) -> Result<(), CliError> {
    match auth.command {
        AuthSubcommand::Register {
            email,
            password,
            role,
        } => {
            let response = api
                .register(&RegisterRequest {
                    email,
                    password,
                    role,
                })
                .await?;
            print_json(&response)
        }
        AuthSubcommand::Login { email, password } => {
            api.login(&LoginRequest { email, password }).await?;
            let role = api
                .unverified_claims()
                .and_then(|claims| claims.role)
                .map_or("unknown", Role::as_str);
            println!("logged in (role hint: {role})");
            Ok(())
        }
        AuthSubcommand::Logout => {
            api.logout()?;
            println!("logged out");
            Ok(())
        }
        AuthSubcommand::Whoami => print_json(&api.me().await?),
    }
}

async fn run_users(api: &Api, users: UsersCommand) -> Result<(), CliError> {
    match users.command {
        UsersSubcommand::List => print_json(&api.list_users().await?),
        UsersSubcommand::Update {
            id,
            email,
            password,
            role,
        } => {
            let update = validate_user_update(
                email.as_deref().unwrap_or_default(),
                password.as_deref().unwrap_or_default(),
                role,
            )
            .map_err(CliError::Invalid)?;
            api.update_user(id, &update).await?;
            println!("updated user {id}");
            Ok(())
        }
        UsersSubcommand::Delete { id } => {
            api.delete_user(id).await?;
            println!("deleted user {id}");
            Ok(())
        }
    }
}

async fn run_types(api: &Api, types: TypesCommand) -> Result<(), CliError> {
    match types.command {
        TypesSubcommand::List => print_json(&api.list_ticket_types().await?),
        TypesSubcommand::Create { name, description } => {
            let input = validate_ticket_type(&name, &description).map_err(CliError::Invalid)?;
            print_json(&api.create_ticket_type(&input).await?)
        }
        TypesSubcommand::Update {
            id,
            name,
            description,
        } => {
            let input = validate_ticket_type(&name, &description).map_err(CliError::Invalid)?;
            api.update_ticket_type(id, &input).await?;
            println!("updated ticket type {id}");
            Ok(())
        }
        TypesSubcommand::Delete { id } => {
            api.delete_ticket_type(id).await?;
            println!("deleted ticket type {id}");
            Ok(())
        }
    }
}

async fn run_tickets(api: &Api, tickets: TicketsCommand) -> Result<(), CliError> {
    match tickets.command {
        TicketsSubcommand::List { type_id } => print_json(&api.list_tickets(type_id).await?),
        TicketsSubcommand::Mine => print_json(&api.list_my_tickets().await?),
        TicketsSubcommand::Grouped { mine } => {
            let types = api.list_ticket_types().await?;
            let tickets = if mine {
                api.list_my_tickets().await?
            } else {
                api.list_tickets(None).await?
            };
            let groups: Vec<_> = group_by_type(&types, &tickets)
                .into_iter()
                .map(|group| {
                    json!({
                        "type": group.ticket_type.as_ref().map(|t| t.id),
                        "label": group.label(),
                        "tickets": group.tickets,
                    })
                })
                .collect();
            print_json(&groups)
        }
        TicketsSubcommand::Get { id } => print_json(&api.get_ticket(id).await?),
        TicketsSubcommand::Create {
            title,
            description,
            type_id,
        } => {
            let input = validate_ticket(&title, &description, TicketStatus::Open, positive(type_id))
                .map_err(CliError::Invalid)?;
            print_json(&api.create_ticket(&input).await?)
        }
        TicketsSubcommand::Update {
            id,
            title,
            description,
            status,
            type_id,
        } => {
            let current = api.get_ticket(id).await?;
            let input = validate_ticket(
                title.as_deref().unwrap_or(&current.title),
                description.as_deref().unwrap_or(&current.description),
                status.unwrap_or(current.status),
                type_id.map_or(current.type_id, |raw| positive(Some(raw))),
            )
            .map_err(CliError::Invalid)?;
            api.update_ticket(&input.into_ticket(current.id, current.user_id))
                .await?;
            println!("updated ticket {id}");
            Ok(())
        }
        TicketsSubcommand::Delete { id } => {
            api.delete_ticket(id).await?;
            println!("deleted ticket {id}");
            Ok(())
        }
    }
}

async fn run_comments(api: &Api, comments: CommentsCommand) -> Result<(), CliError> {
    match comments.command {
        CommentsSubcommand::List { ticket_id } => {
            let listed = api.list_comments(ticket_id).await?;
            for comment in &listed {
                let author = comment
                    .user_id
                    .map_or_else(|| "?".to_owned(), |id| id.to_string());
                println!(
                    "#{} [{}] user {author}: {}",
                    comment.id,
                    display_timestamp(&comment.created_at),
                    comment.body
                );
            }
            Ok(())
        }
        CommentsSubcommand::Add { ticket_id, text } => {
            let text = validate_comment(&text).map_err(CliError::Invalid)?;
            print_json(&api.create_comment(ticket_id, &text).await?)
        }
        CommentsSubcommand::Edit {
            ticket_id,
            comment_id,
            text,
        } => {
            let text = validate_comment(&text).map_err(CliError::Invalid)?;
            api.update_comment(ticket_id, comment_id, &text).await?;
            println!("updated comment {comment_id}");
            Ok(())
        }
        CommentsSubcommand::Delete {
            ticket_id,
            comment_id,
        } => {
            api.delete_comment(ticket_id, comment_id).await?;
            println!("deleted comment {comment_id}");
            Ok(())
        }
    }
}

/// Ids of zero or below mean "no type".
fn positive(id: Option<Id>) -> Option<Id> {
    id.filter(|id| *id > 0)
}

fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
