//! Acquire-use-release helper around [`Session`].

use futures_util::future::BoxFuture;

use crate::cas::Credentials;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::session::Session;

/// Open a session, run `f` against it, and close it whatever `f` returned.
///
/// ```no_run
/// # async fn demo() -> eureka_client::Result<()> {
/// use eureka_client::{with_session, ClientConfig, Credentials};
/// use futures_util::FutureExt;
///
/// let config = ClientConfig::default();
/// let me = with_session(&config, Credentials::new("alice", "secret"), |session| {
///     async move { session.users().me().await }.boxed()
/// })
/// .await?;
/// println!("{}", me);
/// # Ok(())
/// # }
/// ```
pub async fn with_session<T, F>(config: &ClientConfig, credentials: Credentials, f: F) -> Result<T>
where
    F: for<'s> FnOnce(&'s Session) -> BoxFuture<'s, Result<T>>,
{
    let session = Session::open(config, credentials).await?;
    session.scoped(f).await
}

impl Session {
    /// Run `f` against this session, then close it.
    pub async fn scoped<T, F>(mut self, f: F) -> Result<T>
    where
        F: for<'s> FnOnce(&'s Session) -> BoxFuture<'s, Result<T>>,
    {
        let result = f(&self).await;
        if let Err(e) = &result {
            tracing::debug!(error = %e, "Scoped session body failed, closing");
        }
        self.close().await;
        result
    }
}
