//! The authenticated session handle.

use std::sync::Arc;

use crate::api::resources::{CONCEPTS_ENDPOINT, JOBS_ENDPOINT, PHENOTYPES_ENDPOINT, USERS_ENDPOINT};
use crate::api::{Concepts, DownstreamSession, Jobs, Phenotypes, ResourceClient, Users};
use crate::cas::{CasAuthenticator, CasState, Credentials};
use crate::config::{validate_config, ClientConfig, ConfigError, JobSchema};
use crate::error::Result;
use crate::observability::metrics;
use crate::transport::{RetryingTransport, Transport, TransportConfig};

/// One logged-in actor: a CAS TGT plus a downstream API session.
///
/// Resource reads take `&self` and may run concurrently. `close` takes
/// `&mut self` and must be awaited before the session is dropped.
pub struct Session {
    cas: CasAuthenticator,
    downstream: DownstreamSession,
    api_transport: Arc<dyn Transport>,
    api_url: String,
    job_schema: JobSchema,
    closed: bool,
}

impl Session {
    /// Log in and establish the downstream session over real HTTP transports.
    pub async fn open(config: &ClientConfig, credentials: Credentials) -> Result<Self> {
        let cas_transport = Arc::new(RetryingTransport::new(TransportConfig::cas(config))?);
        let api_transport = Arc::new(RetryingTransport::new(TransportConfig::api(config))?);

        Self::open_with(config, credentials, cas_transport, api_transport).await
    }

    /// Like [`Session::open`], over caller-supplied transports.
    ///
    /// The configuration is validated before anything is sent.
    pub async fn open_with(
        config: &ClientConfig,
        credentials: Credentials,
        cas_transport: Arc<dyn Transport>,
        api_transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        check_config(config)?;

        let mut cas = CasAuthenticator::new(cas_transport, &config.cas.url);
        let mut downstream = DownstreamSession::new(api_transport.clone(), &config.api.url);

        if let Err(e) = cas.login(&credentials).await {
            metrics::record_session_event("open_failed");
            return Err(e);
        }
        drop(credentials);

        if let Err(e) = downstream.establish(&cas).await {
            tracing::warn!(error = %e, "Downstream session failed, logging out of CAS");
            cas.logout().await;
            metrics::record_session_event("open_failed");
            return Err(e);
        }

        metrics::record_session_event("opened");
        tracing::info!(api_url = %config.api.url, "Session opened");

        Ok(Self {
            cas,
            downstream,
            api_transport,
            api_url: config.api.url.clone(),
            job_schema: config.api.job_schema,
            closed: false,
        })
    }

    fn resource(&self, endpoint: &str) -> ResourceClient {
        ResourceClient::new(self.api_transport.clone(), &self.api_url, endpoint)
    }

    pub fn users(&self) -> Users {
        Users::new(self.resource(USERS_ENDPOINT))
    }

    pub fn phenotypes(&self) -> Phenotypes {
        Phenotypes::new(self.resource(PHENOTYPES_ENDPOINT))
    }

    pub fn concepts(&self) -> Concepts {
        Concepts::new(self.resource(CONCEPTS_ENDPOINT))
    }

    pub fn jobs(&self) -> Jobs {
        Jobs::new(self.resource(JOBS_ENDPOINT), self.job_schema)
    }

    pub fn cas_state(&self) -> &CasState {
        self.cas.state()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Destroy the downstream session, then revoke the TGT.
    ///
    /// Both steps are best-effort; failures are logged. Idempotent.
    pub async fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        self.downstream.destroy().await;
        self.cas.logout().await;

        metrics::record_session_event("closed");
        tracing::info!(api_url = %self.api_url, "Session closed");
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if !self.closed {
            tracing::warn!(
                api_url = %self.api_url,
                "Session dropped without close(); server-side session and TGT left to expire"
            );
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("cas", &self.cas)
            .field("downstream", &self.downstream)
            .field("job_schema", &self.job_schema)
            .field("closed", &self.closed)
            .finish()
    }
}

fn check_config(config: &ClientConfig) -> Result<()> {
    validate_config(config).map_err(ConfigError::Validation)?;
    Ok(())
}
