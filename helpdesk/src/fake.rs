//! In-memory stand-in for the help-desk REST API.
//!
//! `FakeApi` implements [`Transport`] by routing on [`ApiRequest::endpoint`]
//! against process-local state. It follows the server contract the client
//! relies on: bearer auth on everything but register/login, admin-only user
//! and type management, owner-or-admin ticket and comment writes, `201` with
//! the created entity on POST, `204` on PUT/DELETE, `{message}` on failure.
//! Deleting a type uncategorizes the tickets that referenced it.
//!
//! Comments are returned with a `content` text field so callers exercise the
//! `body`/`content` leniency.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::error::TransportError;
use crate::routes::{Endpoint, Method};
use crate::transport::{ApiRequest, ApiResponse, Transport};
use crate::types::{
    Comment, CommentInput, Id, LoginRequest, LoginResponse, RegisterRequest, Role, Ticket,
    TicketInput, TicketType, TicketTypeInput, User, UserUpdate,
};

#[derive(Clone, Debug)]
struct Account {
    user: User,
    password: String,
}

#[derive(Debug, Default)]
struct FakeState {
    accounts: Vec<Account>,
    tokens: Vec<(String, Id)>,
    ticket_types: Vec<TicketType>,
    tickets: Vec<Ticket>,
    comments: Vec<Comment>,
    user_seq: Id,
    type_seq: Id,
    ticket_seq: Id,
    comment_seq: Id,
    clock: u32,
    requests: Vec<ApiRequest>,
    fail_next: Option<TransportError>,
    without_me: bool,
}

/// Shared in-memory API. Clones observe the same state.
#[derive(Clone, Debug, Default)]
pub struct FakeApi {
    state: Arc<Mutex<FakeState>>,
}

impl FakeApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an account directly, bypassing `/User/register`.
    pub fn seed_user(&self, email: &str, password: &str, role: Role) -> Id {
        self.with_state(|state| state.insert_account(email, password, role))
    }

    /// Make the next request fail at the transport level.
    pub fn fail_next_request(&self, error: TransportError) {
        self.with_state(|state| state.fail_next = Some(error));
    }

    /// Answer `GET /User/me` with 404, like servers that only expose the CRUD routes.
    pub fn remove_me_route(&self) {
        self.with_state(|state| state.without_me = true);
    }

    /// Every request received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.with_state(|state| state.requests.clone())
    }

    #[must_use]
    pub fn ticket_types(&self) -> Vec<TicketType> {
        self.with_state(|state| state.ticket_types.clone())
    }

    #[must_use]
    pub fn tickets(&self) -> Vec<Ticket> {
        self.with_state(|state| state.tickets.clone())
    }

    #[must_use]
    pub fn comments(&self) -> Vec<Comment> {
        self.with_state(|state| state.comments.clone())
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut FakeState) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }
}

#[async_trait(?Send)]
impl Transport for FakeApi {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.with_state(|state| {
            state.requests.push(request.clone());
            if let Some(error) = state.fail_next.take() {
                return Err(error);
            }
            Ok(state.handle(&request))
        })
    }
}

fn json_response(status: u16, value: &impl Serialize) -> ApiResponse {
    ApiResponse::new(status, serde_json::to_string(value).unwrap_or_default())
}

fn error_response(status: u16, message: &str) -> ApiResponse {
    json_response(status, &json!({ "message": message }))
}

fn no_content() -> ApiResponse {
    ApiResponse::new(204, "")
}

fn parse_body<T: DeserializeOwned>(body: Option<&Value>) -> Result<T, ApiResponse> {
    serde_json::from_value(body.cloned().unwrap_or(Value::Null))
        .map_err(|_| error_response(400, "Invalid request body"))
}

fn comment_json(comment: &Comment) -> Value {
    json!({
        "id": comment.id,
        "ticketId": comment.ticket_id,
        "userId": comment.user_id,
        "content": comment.body,
        "createdAt": comment.created_at,
    })
}

fn fake_token(user: &User) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        json!({ "id": user.id, "email": user.email, "role": user.role.as_str() }).to_string(),
    );
    format!("{header}.{payload}.fake")
}

impl FakeState {
    fn insert_account(&mut self, email: &str, password: &str, role: Role) -> Id {
        self.user_seq += 1;
        let user = User {
            id: self.user_seq,
            email: email.to_owned(),
            role,
        };
        self.accounts.push(Account {
            user,
            password: password.to_owned(),
        });
        self.user_seq
    }

    fn tick(&mut self) -> String {
        self.clock += 1;
        let seconds = self.clock;
        format!(
            "2025-01-01T{:02}:{:02}:{:02}Z",
            8 + seconds / 3600,
            (seconds / 60) % 60,
            seconds % 60
        )
    }

    fn caller(&self, bearer: Option<&str>) -> Option<User> {
        let bearer = bearer?;
        let (_, user_id) = self.tokens.iter().find(|(token, _)| token == bearer)?;
        self.accounts
            .iter()
            .find(|account| account.user.id == *user_id)
            .map(|account| account.user.clone())
    }

    fn handle(&mut self, request: &ApiRequest) -> ApiResponse {
        let body = request.body.as_ref();
        let result = match (request.method, request.endpoint) {
            (Method::Post, Endpoint::Register) => self.register(body),
            (Method::Post, Endpoint::Login) => self.login(body),
            (method, endpoint) => match self.caller(request.bearer.as_deref()) {
                Some(caller) => self.authorized(&caller, method, endpoint, body),
                None => Err(error_response(401, "Unauthorized")),
            },
        };
        result.unwrap_or_else(|response| response)
    }

    fn authorized(
        &mut self,
        caller: &User,
        method: Method,
        endpoint: Endpoint,
        body: Option<&Value>,
    ) -> Result<ApiResponse, ApiResponse> {
        match (method, endpoint) {
            (Method::Get, Endpoint::Me) if self.without_me => Err(error_response(404, "Not found")),
            (Method::Get, Endpoint::Me) => Ok(json_response(200, caller)),
            (Method::Get, Endpoint::Users) => {
                require_admin(caller)?;
                let users: Vec<&User> = self.accounts.iter().map(|a| &a.user).collect();
                Ok(json_response(200, &users))
            }
            (Method::Put, Endpoint::User(id)) => self.update_user(caller, id, body),
            (Method::Delete, Endpoint::User(id)) => self.delete_user(caller, id),
            (Method::Get, Endpoint::TicketTypes) => Ok(json_response(200, &self.ticket_types)),
            (Method::Post, Endpoint::TicketTypes) => self.create_ticket_type(caller, body),
            (Method::Put, Endpoint::TicketType(id)) => self.update_ticket_type(caller, id, body),
            (Method::Delete, Endpoint::TicketType(id)) => self.delete_ticket_type(caller, id),
            (Method::Get, Endpoint::Tickets { type_id }) => {
                let tickets: Vec<&Ticket> = self
                    .tickets
                    .iter()
                    .filter(|ticket| type_id.is_none() || ticket.type_id == type_id)
                    .collect();
                Ok(json_response(200, &tickets))
            }
            (Method::Post, Endpoint::Tickets { type_id: None }) => self.create_ticket(caller, body),
            (Method::Get, Endpoint::Ticket(id)) => {
                let ticket = self.ticket(id)?;
                Ok(json_response(200, ticket))
            }
            (Method::Put, Endpoint::Ticket(id)) => self.update_ticket(caller, id, body),
            (Method::Delete, Endpoint::Ticket(id)) => self.delete_ticket(caller, id),
            (Method::Get, Endpoint::Comments { ticket_id }) => {
                self.ticket(ticket_id)?;
                let comments: Vec<Value> = self
                    .comments
                    .iter()
                    .filter(|comment| comment.ticket_id == ticket_id)
                    .map(comment_json)
                    .collect();
                Ok(json_response(200, &comments))
            }
            (Method::Post, Endpoint::Comments { ticket_id }) => {
                self.create_comment(caller, ticket_id, body)
            }
            (
                Method::Put,
                Endpoint::Comment {
                    ticket_id,
                    comment_id,
                },
            ) => self.update_comment(caller, ticket_id, comment_id, body),
            (
                Method::Delete,
                Endpoint::Comment {
                    ticket_id,
                    comment_id,
                },
            ) => self.delete_comment(caller, ticket_id, comment_id),
            _ => Err(error_response(405, "Method not allowed")),
        }
    }

    // ---- auth ----

    fn register(&mut self, body: Option<&Value>) -> Result<ApiResponse, ApiResponse> {
        let request: RegisterRequest = parse_body(body)?;
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(error_response(400, "Email and password are required"));
        }
        if self
            .accounts
            .iter()
            .any(|account| account.user.email.eq_ignore_ascii_case(&request.email))
        {
            return Err(error_response(400, "User already exists"));
        }
        self.insert_account(&request.email, &request.password, request.role);
        Ok(json_response(200, &json!({ "message": "User registered successfully" })))
    }

    fn login(&mut self, body: Option<&Value>) -> Result<ApiResponse, ApiResponse> {
        let request: LoginRequest = parse_body(body)?;
        let user = self
            .accounts
            .iter()
            .find(|account| {
                account.user.email.eq_ignore_ascii_case(&request.email)
                    && account.password == request.password
            })
            .map(|account| account.user.clone())
            .ok_or_else(|| error_response(401, "Invalid email or password"))?;

        let token = fake_token(&user);
        let refresh_token = format!("refresh-{}-{}", user.id, self.tokens.len());
        self.tokens.push((token.clone(), user.id));
        Ok(json_response(
            200,
            &LoginResponse {
                token,
                refresh_token: Some(refresh_token),
            },
        ))
    }

    // ---- users ----

    fn update_user(
        &mut self,
        caller: &User,
        id: Id,
        body: Option<&Value>,
    ) -> Result<ApiResponse, ApiResponse> {
        require_admin(caller)?;
        let update: UserUpdate = parse_body(body)?;
        let account = self
            .accounts
            .iter_mut()
            .find(|account| account.user.id == id)
            .ok_or_else(|| error_response(404, "User not found"))?;
        if let Some(role) = update.role {
            account.user.role = role;
        }
        if let Some(email) = update.email {
            account.user.email = email;
        }
        if let Some(password) = update.password {
            account.password = password;
        }
        Ok(no_content())
    }

    fn delete_user(&mut self, caller: &User, id: Id) -> Result<ApiResponse, ApiResponse> {
        require_admin(caller)?;
        let before = self.accounts.len();
        self.accounts.retain(|account| account.user.id != id);
        if self.accounts.len() == before {
            return Err(error_response(404, "User not found"));
        }
        self.tokens.retain(|(_, user_id)| *user_id != id);
        Ok(no_content())
    }

    // ---- ticket types ----

    fn create_ticket_type(
        &mut self,
        caller: &User,
        body: Option<&Value>,
    ) -> Result<ApiResponse, ApiResponse> {
        require_admin(caller)?;
        let input: TicketTypeInput = parse_body(body)?;
        if input.name.trim().is_empty() {
            return Err(error_response(400, "Name is required"));
        }
        self.type_seq += 1;
        let ticket_type = TicketType {
            id: self.type_seq,
            name: input.name,
            description: input.description,
        };
        self.ticket_types.push(ticket_type.clone());
        Ok(json_response(201, &ticket_type))
    }

    fn update_ticket_type(
        &mut self,
        caller: &User,
        id: Id,
        body: Option<&Value>,
    ) -> Result<ApiResponse, ApiResponse> {
        require_admin(caller)?;
        let input: TicketTypeInput = parse_body(body)?;
        let ticket_type = self
            .ticket_types
            .iter_mut()
            .find(|ticket_type| ticket_type.id == id)
            .ok_or_else(|| error_response(404, "Ticket type not found"))?;
        ticket_type.name = input.name;
        ticket_type.description = input.description;
        Ok(no_content())
    }

    fn delete_ticket_type(&mut self, caller: &User, id: Id) -> Result<ApiResponse, ApiResponse> {
        require_admin(caller)?;
        let before = self.ticket_types.len();
        self.ticket_types.retain(|ticket_type| ticket_type.id != id);
        if self.ticket_types.len() == before {
            return Err(error_response(404, "Ticket type not found"));
        }
        for ticket in &mut self.tickets {
            if ticket.type_id == Some(id) {
                ticket.type_id = None;
            }
        }
        Ok(no_content())
    }

    // ---- tickets ----

    fn ticket(&self, id: Id) -> Result<&Ticket, ApiResponse> {
        self.tickets
            .iter()
            .find(|ticket| ticket.id == id)
            .ok_or_else(|| error_response(404, "Ticket not found"))
    }

    fn check_type(&self, type_id: Option<Id>) -> Result<(), ApiResponse> {
        match type_id {
            Some(type_id) if !self.ticket_types.iter().any(|t| t.id == type_id) => {
                Err(error_response(400, "Ticket type not found"))
            }
            _ => Ok(()),
        }
    }

    fn create_ticket(&mut self, caller: &User, body: Option<&Value>) -> Result<ApiResponse, ApiResponse> {
        let input: TicketInput = parse_body(body)?;
        if input.title.trim().is_empty() {
            return Err(error_response(400, "Title is required"));
        }
        self.check_type(input.type_id)?;
        self.ticket_seq += 1;
        let ticket = input.into_ticket(self.ticket_seq, Some(caller.id));
        self.tickets.push(ticket.clone());
        Ok(json_response(201, &ticket))
    }

    fn update_ticket(
        &mut self,
        caller: &User,
        id: Id,
        body: Option<&Value>,
    ) -> Result<ApiResponse, ApiResponse> {
        let update: Ticket = parse_body(body)?;
        self.check_type(update.type_id)?;
        let owner = self.ticket(id)?.user_id;
        require_owner_or_admin(caller, owner)?;
        if let Some(ticket) = self.tickets.iter_mut().find(|ticket| ticket.id == id) {
            ticket.type_id = update.type_id;
            ticket.title = update.title;
            ticket.description = update.description;
            ticket.status = update.status;
        }
        Ok(no_content())
    }

    fn delete_ticket(&mut self, caller: &User, id: Id) -> Result<ApiResponse, ApiResponse> {
        let owner = self.ticket(id)?.user_id;
        require_owner_or_admin(caller, owner)?;
        self.tickets.retain(|ticket| ticket.id != id);
        self.comments.retain(|comment| comment.ticket_id != id);
        Ok(no_content())
    }

    // ---- comments ----

    fn create_comment(
        &mut self,
        caller: &User,
        ticket_id: Id,
        body: Option<&Value>,
    ) -> Result<ApiResponse, ApiResponse> {
        self.ticket(ticket_id)?;
        let input: CommentInput = parse_body(body)?;
        if input.content.trim().is_empty() {
            return Err(error_response(400, "Content is required"));
        }
        self.comment_seq += 1;
        let comment = Comment {
            id: self.comment_seq,
            ticket_id,
            user_id: Some(caller.id),
            body: input.content,
            created_at: self.tick(),
        };
        self.comments.push(comment.clone());
        Ok(json_response(201, &comment_json(&comment)))
    }

    fn comment_author(&self, ticket_id: Id, comment_id: Id) -> Result<Option<Id>, ApiResponse> {
        self.comments
            .iter()
            .find(|comment| comment.id == comment_id && comment.ticket_id == ticket_id)
            .map(|comment| comment.user_id)
            .ok_or_else(|| error_response(404, "Comment not found"))
    }

    fn update_comment(
        &mut self,
        caller: &User,
        ticket_id: Id,
        comment_id: Id,
        body: Option<&Value>,
    ) -> Result<ApiResponse, ApiResponse> {
        let author = self.comment_author(ticket_id, comment_id)?;
        require_owner_or_admin(caller, author)?;
        let input: CommentInput = parse_body(body)?;
        if let Some(comment) = self.comments.iter_mut().find(|comment| comment.id == comment_id) {
            comment.body = input.content;
        }
        Ok(no_content())
    }

    fn delete_comment(
        &mut self,
        caller: &User,
        ticket_id: Id,
        comment_id: Id,
    ) -> Result<ApiResponse, ApiResponse> {
        let author = self.comment_author(ticket_id, comment_id)?;
        require_owner_or_admin(caller, author)?;
        self.comments.retain(|comment| comment.id != comment_id);
        Ok(no_content())
    }
}

fn require_admin(caller: &User) -> Result<(), ApiResponse> {
    if caller.role == Role::Admin {
        Ok(())
    } else {
        Err(error_response(403, "Forbidden"))
    }
}

fn require_owner_or_admin(caller: &User, owner: Option<Id>) -> Result<(), ApiResponse> {
    if caller.role == Role::Admin || owner == Some(caller.id) {
        Ok(())
    } else {
        Err(error_response(403, "Forbidden"))
    }
}
