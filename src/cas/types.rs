//! CAS credential and ticket types.

use std::fmt;

/// Username and password presented to CAS at login.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Ticket-granting ticket identifier issued by CAS at login.
#[derive(Clone, PartialEq, Eq)]
pub struct TicketGrantingTicket(String);

impl TicketGrantingTicket {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TicketGrantingTicket {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Debug for TicketGrantingTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TicketGrantingTicket(<redacted>)")
    }
}

/// Service ticket bound to one service URL. Opaque to this client.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceTicket(String);

impl ServiceTicket {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for ServiceTicket {
    fn from(ticket: String) -> Self {
        Self(ticket)
    }
}

impl fmt::Debug for ServiceTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ServiceTicket(<redacted>)")
    }
}

/// Authenticator lifecycle. `LoggedOut` is terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CasState {
    Unauthenticated,
    Authenticated(TicketGrantingTicket),
    LoggedOut,
}

impl CasState {
    pub fn name(&self) -> &'static str {
        match self {
            CasState::Unauthenticated => "unauthenticated",
            CasState::Authenticated(_) => "authenticated",
            CasState::LoggedOut => "logged out",
        }
    }
}
