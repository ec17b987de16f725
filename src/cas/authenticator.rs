//! CAS REST ticket protocol client.
//!
//! # State Transitions
//! ```text
//! Unauthenticated → Authenticated: login succeeds
//! Authenticated → Authenticated: login again (old TGT abandoned, not revoked)
//! Unauthenticated | Authenticated → LoggedOut: logout (always, whatever the server says)
//! LoggedOut: terminal, login and service tickets are refused
//! ```

use std::sync::Arc;

use crate::cas::types::{CasState, Credentials, ServiceTicket, TicketGrantingTicket};
use crate::error::{ClientError, Result};
use crate::transport::{join_url, trailing_segment, HttpRequest, Transport};

/// Holds one TGT and mints service tickets from it.
pub struct CasAuthenticator {
    transport: Arc<dyn Transport>,
    ticket_url: String,
    state: CasState,
}

impl CasAuthenticator {
    /// Create an authenticator for the CAS server at `cas_url`.
    pub fn new(transport: Arc<dyn Transport>, cas_url: &str) -> Self {
        Self {
            transport,
            ticket_url: join_url(cas_url, "v1/tickets/"),
            state: CasState::Unauthenticated,
        }
    }

    pub fn state(&self) -> &CasState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, CasState::Authenticated(_))
    }

    /// The ticket endpoint, `{cas_url}/v1/tickets/`.
    pub fn ticket_url(&self) -> &str {
        &self.ticket_url
    }

    /// Exchange credentials for a ticket-granting ticket.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<()> {
        if self.state == CasState::LoggedOut {
            return Err(ClientError::IllegalState(
                "cannot log in after logout".to_string(),
            ));
        }

        let request = HttpRequest::post_form(
            self.ticket_url.as_str(),
            [
                ("username", credentials.username.as_str()),
                ("password", credentials.password()),
            ],
        );
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            tracing::warn!(
                username = %credentials.username,
                status = response.status,
                "CAS login rejected"
            );
            return Err(ClientError::Authentication {
                status: response.status,
                body: response.body,
            });
        }

        let location = response.location().ok_or_else(|| {
            ClientError::Protocol("CAS login response has no Location header".to_string())
        })?;
        let tgt = trailing_segment(location);
        if tgt.is_empty() {
            return Err(ClientError::Protocol(format!(
                "CAS Location header '{}' does not end in a ticket id",
                location
            )));
        }

        if self.is_authenticated() {
            tracing::debug!("Replacing existing ticket-granting ticket");
        }
        self.state = CasState::Authenticated(TicketGrantingTicket::from(tgt));
        tracing::info!(username = %credentials.username, "CAS login succeeded");
        Ok(())
    }

    /// Obtain a service ticket for `service`. Only valid while authenticated.
    pub async fn service_ticket(&self, service: &str) -> Result<ServiceTicket> {
        let tgt = match &self.state {
            CasState::Authenticated(tgt) => tgt,
            other => {
                return Err(ClientError::IllegalState(format!(
                    "service ticket requested while {}",
                    other.name()
                )))
            }
        };

        let url = format!("{}{}", self.ticket_url, tgt.as_str());
        let response = self
            .transport
            .send(HttpRequest::post_form(url, [("service", service)]))
            .await?;

        if !response.is_success() {
            tracing::warn!(service, status = response.status, "Service ticket refused");
            return Err(ClientError::Authentication {
                status: response.status,
                body: response.body,
            });
        }

        tracing::debug!(service, "Service ticket issued");
        Ok(ServiceTicket::from(response.body))
    }

    /// Revoke the TGT. Best-effort and idempotent; never fails.
    pub async fn logout(&mut self) {
        let previous = std::mem::replace(&mut self.state, CasState::LoggedOut);
        let tgt = match previous {
            CasState::Authenticated(tgt) => tgt,
            _ => return,
        };

        let url = format!("{}{}", self.ticket_url, tgt.as_str());
        match self.transport.send(HttpRequest::delete(url)).await {
            Ok(response) if response.is_success() => {
                tracing::info!("CAS logout succeeded");
            }
            Ok(response) => {
                tracing::warn!(status = response.status, "CAS logout returned non-success status");
            }
            Err(e) => {
                tracing::warn!(error = %e, "CAS logout failed");
            }
        }
    }
}

impl std::fmt::Debug for CasAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CasAuthenticator")
            .field("ticket_url", &self.ticket_url)
            .field("state", &self.state.name())
            .finish()
    }
}
