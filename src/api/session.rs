//! Downstream API session handshake and teardown.

use std::sync::Arc;
use url::Url;

use crate::cas::CasAuthenticator;
use crate::error::{ClientError, Result};
use crate::transport::{join_url, HttpRequest, Transport};

const GET_SESSION_PATH: &str = "protected/get-session";
const DESTROY_SESSION_PATH: &str = "destroy-session";

/// Server-side API session, tracked client-side as established or not.
pub struct DownstreamSession {
    transport: Arc<dyn Transport>,
    api_url: String,
    established: bool,
}

impl DownstreamSession {
    pub fn new(transport: Arc<dyn Transport>, api_url: &str) -> Self {
        Self {
            transport,
            api_url: api_url.trim_end_matches('/').to_string(),
            established: false,
        }
    }

    pub fn is_established(&self) -> bool {
        self.established
    }

    /// The service URL the CAS ticket is minted for.
    pub fn get_session_url(&self) -> String {
        join_url(&self.api_url, GET_SESSION_PATH)
    }

    /// Mint a service ticket for the get-session URL and present it.
    pub async fn establish(&mut self, cas: &CasAuthenticator) -> Result<()> {
        let service_url = self.get_session_url();
        let ticket = cas.service_ticket(&service_url).await?;

        let mut url = Url::parse(&service_url).map_err(|e| ClientError::Transport {
            url: service_url.clone(),
            reason: format!("invalid API URL: {}", e),
        })?;
        url.query_pairs_mut().append_pair("ticket", ticket.as_str());

        let response = self.transport.send(HttpRequest::get(url.as_str())).await?;
        if !response.is_success() {
            tracing::warn!(status = response.status, "API rejected service ticket");
            return Err(ClientError::Authentication {
                status: response.status,
                body: response.body,
            });
        }

        self.established = true;
        tracing::info!(api_url = %self.api_url, "API session established");
        Ok(())
    }

    /// Ask the API to drop the session. Best-effort; never fails.
    pub async fn destroy(&mut self) {
        if !std::mem::replace(&mut self.established, false) {
            return;
        }

        let url = join_url(&self.api_url, DESTROY_SESSION_PATH);
        match self.transport.send(HttpRequest::get(url)).await {
            Ok(response) if response.is_success() => {
                tracing::info!("API session destroyed");
            }
            Ok(response) => {
                tracing::warn!(status = response.status, "destroy-session returned non-success status");
            }
            Err(e) => {
                tracing::warn!(error = %e, "destroy-session failed");
            }
        }
    }
}

impl std::fmt::Debug for DownstreamSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownstreamSession")
            .field("api_url", &self.api_url)
            .field("established", &self.established)
            .finish()
    }
}
