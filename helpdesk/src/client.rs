//! Typed API client: one method per REST operation.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every view and CLI command goes through [`ApiClient`]; none of them build
//! URLs, headers, or error messages themselves. The client attaches the stored
//! bearer token, refuses authenticated calls locally when there is none, maps
//! non-2xx responses to [`ApiError::Status`] with the server's `{message}`, and
//! treats an empty 2xx body as JSON `null`.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::claims::UnverifiedClaims;
use crate::error::ApiError;
use crate::grouping::{owned_by, sort_comments};
use crate::routes::{CommentRoutes, Endpoint, Method, endpoint_url};
use crate::session::SessionStore;
use crate::transport::{ApiRequest, Transport};
use crate::types::{
    Comment, CommentInput, ErrorBody, Id, LoginRequest, LoginResponse, RegisterRequest,
    RegisterResponse, Ticket, TicketInput, TicketType, TicketTypeInput, User, UserUpdate,
};

/// Production API base.
pub const DEFAULT_BASE_URL: &str = "https://stpp-3qmk.onrender.com/api";

/// Where the API lives and which comment route shape it speaks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub comment_routes: CommentRoutes,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            comment_routes: CommentRoutes::default(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ApiClient<T, S> {
    transport: T,
    session: S,
    config: ClientConfig,
}

impl<T, S> ApiClient<T, S>
where
    T: Transport,
    S: SessionStore,
{
    pub fn new(transport: T, session: S, config: ClientConfig) -> Self {
        Self {
            transport,
            session,
            config,
        }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    /// Claims decoded from the stored token, for navigation hints only.
    pub fn unverified_claims(&self) -> Option<UnverifiedClaims> {
        self.session
            .token()
            .and_then(|token| UnverifiedClaims::decode(&token).ok())
    }

    // =========================================================
    // Auth
    // =========================================================

    /// `POST /User/register`. A plain-text success body is surfaced as `message`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx response.
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        let body = self
            .execute(Method::Post, Endpoint::Register, Some(to_json(request)?))
            .await?;
        let text = body.trim();
        Ok(serde_json::from_str(text).unwrap_or_else(|_| RegisterResponse {
            token: None,
            message: (!text.is_empty()).then(|| text.to_owned()),
        }))
    }

    /// `POST /User/login`, then persist the returned tokens.
    ///
    /// Any failure clears the stored session, so a rejected login never leaves
    /// a usable token behind.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingToken`] when a 2xx response carries no token,
    /// otherwise the transport/status/storage error. If clearing the old
    /// session also fails, that [`ApiError::Session`] is returned instead,
    /// since a previous token may still be stored.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let outcome = self.login_inner(request).await;
        if outcome.is_err() {
            self.session.clear()?;
        }
        outcome
    }

    async fn login_inner(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let response: LoginResponse = self
            .fetch(Method::Post, Endpoint::Login, Some(to_json(request)?))
            .await?;
        if response.token.trim().is_empty() {
            return Err(ApiError::MissingToken);
        }
        self.session
            .set_token(&response.token, response.refresh_token.as_deref())?;
        Ok(response)
    }

    /// Forget the stored session. No server call is made.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Session`] if storage rejects the removal.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.session.clear_token()?;
        Ok(())
    }

    /// `GET /User/me`: the authenticated identity.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    pub async fn me(&self) -> Result<User, ApiError> {
        self.fetch(Method::Get, Endpoint::Me, None).await
    }

    // =========================================================
    // Users
    // =========================================================

    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.fetch(Method::Get, Endpoint::Users, None).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    pub async fn update_user(&self, id: Id, update: &UserUpdate) -> Result<(), ApiError> {
        self.execute(Method::Put, Endpoint::User(id), Some(to_json(update)?))
            .await
            .map(drop)
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    pub async fn delete_user(&self, id: Id) -> Result<(), ApiError> {
        self.execute(Method::Delete, Endpoint::User(id), None)
            .await
            .map(drop)
    }

    // =========================================================
    // Ticket types
    // =========================================================

    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    pub async fn list_ticket_types(&self) -> Result<Vec<TicketType>, ApiError> {
        self.fetch(Method::Get, Endpoint::TicketTypes, None).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on failure, including a 2xx body that is not the created type.
    pub async fn create_ticket_type(&self, input: &TicketTypeInput) -> Result<TicketType, ApiError> {
        self.fetch(Method::Post, Endpoint::TicketTypes, Some(to_json(input)?))
            .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    pub async fn update_ticket_type(&self, id: Id, input: &TicketTypeInput) -> Result<(), ApiError> {
        self.execute(Method::Put, Endpoint::TicketType(id), Some(to_json(input)?))
            .await
            .map(drop)
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    pub async fn delete_ticket_type(&self, id: Id) -> Result<(), ApiError> {
        self.execute(Method::Delete, Endpoint::TicketType(id), None)
            .await
            .map(drop)
    }

    // =========================================================
    // Tickets
    // =========================================================

    /// `GET /Ticket`, optionally filtered with `?typeId=`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    pub async fn list_tickets(&self, type_id: Option<Id>) -> Result<Vec<Ticket>, ApiError> {
        self.fetch(Method::Get, Endpoint::Tickets { type_id }, None)
            .await
    }

    /// Tickets owned by the authenticated user.
    ///
    /// The owner id comes from `GET /User/me`. Servers without that route
    /// (404/405) fall back to the token's numeric id claim.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotLoggedIn`] without a session, otherwise the
    /// failure of either call.
    pub async fn list_my_tickets(&self) -> Result<Vec<Ticket>, ApiError> {
        let owner = self.current_user_id().await?;
        let tickets = self.list_tickets(None).await?;
        Ok(owned_by(tickets, owner))
    }

    async fn current_user_id(&self) -> Result<Id, ApiError> {
        if !self.is_logged_in() {
            return Err(ApiError::NotLoggedIn);
        }
        match self.me().await {
            Ok(user) => Ok(user.id),
            Err(err) if matches!(err.status(), Some(404 | 405)) => self
                .unverified_claims()
                .and_then(|claims| claims.user_id)
                .and_then(|id| id.trim().parse::<Id>().ok())
                .ok_or(err),
            Err(err) => Err(err),
        }
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    pub async fn get_ticket(&self, id: Id) -> Result<Ticket, ApiError> {
        self.fetch(Method::Get, Endpoint::Ticket(id), None).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on failure, including a 2xx body that is not the created ticket.
    pub async fn create_ticket(&self, input: &TicketInput) -> Result<Ticket, ApiError> {
        self.fetch(
            Method::Post,
            Endpoint::Tickets { type_id: None },
            Some(to_json(input)?),
        )
        .await
    }

    /// `PUT /Ticket/{id}` with the full ticket shape. Comments are never embedded.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    pub async fn update_ticket(&self, ticket: &Ticket) -> Result<(), ApiError> {
        self.execute(Method::Put, Endpoint::Ticket(ticket.id), Some(to_json(ticket)?))
            .await
            .map(drop)
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    pub async fn delete_ticket(&self, id: Id) -> Result<(), ApiError> {
        self.execute(Method::Delete, Endpoint::Ticket(id), None)
            .await
            .map(drop)
    }

    // =========================================================
    // Comments
    // =========================================================

    /// Comments on `ticket_id`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    pub async fn list_comments(&self, ticket_id: Id) -> Result<Vec<Comment>, ApiError> {
        let mut comments: Vec<Comment> = self
            .fetch(Method::Get, Endpoint::Comments { ticket_id }, None)
            .await?;
        sort_comments(&mut comments);
        Ok(comments)
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on failure, including a 2xx body that is not the created comment.
    pub async fn create_comment(&self, ticket_id: Id, text: &str) -> Result<Comment, ApiError> {
        let input = CommentInput {
            ticket_id,
            content: text.to_owned(),
        };
        self.fetch(
            Method::Post,
            Endpoint::Comments { ticket_id },
            Some(to_json(&input)?),
        )
        .await
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    pub async fn update_comment(&self, ticket_id: Id, comment_id: Id, text: &str) -> Result<(), ApiError> {
        let input = CommentInput {
            ticket_id,
            content: text.to_owned(),
        };
        self.execute(
            Method::Put,
            Endpoint::Comment {
                ticket_id,
                comment_id,
            },
            Some(to_json(&input)?),
        )
        .await
        .map(drop)
    }

    /// # Errors
    ///
    /// Returns [`ApiError`] on failure.
    pub async fn delete_comment(&self, ticket_id: Id, comment_id: Id) -> Result<(), ApiError> {
        self.execute(
            Method::Delete,
            Endpoint::Comment {
                ticket_id,
                comment_id,
            },
            None,
        )
        .await
        .map(drop)
    }

    // =========================================================
    // Plumbing
    // =========================================================

    fn build_request(
        &self,
        method: Method,
        endpoint: Endpoint,
        body: Option<Value>,
    ) -> Result<ApiRequest, ApiError> {
        let bearer = self.session.token();
        if endpoint.requires_auth() && bearer.is_none() {
            return Err(ApiError::NotLoggedIn);
        }
        Ok(ApiRequest {
            method,
            endpoint,
            url: endpoint_url(&self.config.base_url, endpoint, self.config.comment_routes),
            bearer,
            body,
        })
    }

    /// Send and return the raw 2xx body.
    async fn execute(
        &self,
        method: Method,
        endpoint: Endpoint,
        body: Option<Value>,
    ) -> Result<String, ApiError> {
        let request = self.build_request(method, endpoint, body)?;
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(ApiError::Status {
                status: response.status,
                message: error_message(&response.body),
            });
        }
        Ok(response.body)
    }

    async fn fetch<R: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: Endpoint,
        body: Option<Value>,
    ) -> Result<R, ApiError> {
        let body = self.execute(method, endpoint, body).await?;
        decode(&body)
    }
}

fn to_json<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    Ok(serde_json::to_value(body)?)
}

/// Empty bodies decode as JSON `null`.
fn decode<R: DeserializeOwned>(body: &str) -> Result<R, ApiError> {
    let body = body.trim();
    let body = if body.is_empty() { "null" } else { body };
    Ok(serde_json::from_str(body)?)
}

/// The `{message}` of a failure body, or a short plain-text body verbatim.
fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.message.filter(|message| !message.trim().is_empty()),
        Err(_) if !body.starts_with('<') && !body.starts_with('{') && body.len() <= 200 => {
            Some(body.to_owned())
        }
        Err(_) => None,
    }
}
