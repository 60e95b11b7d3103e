use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::api::{ApiError, ApiResult, AuthApi};
use crate::domain::types::BearerToken;
use crate::session::{Session, SessionError, SessionResult, refresh};

/// Runs network operations with the session's bearer token.
///
/// A run attaches the stored token and invokes the operation. When the
/// server answers 401 the token is refreshed once and the operation is
/// invoked once more with the new token; whatever that second call returns is
/// the result of the run. Any other failure is returned as is. An operation is
/// therefore invoked at most twice per run.
pub struct SessionExecutor<'a, A: ?Sized> {
    session: &'a Session,
    auth: &'a A,
    cancel: Option<&'a CancellationToken>,
}

impl<'a, A> SessionExecutor<'a, A>
where
    A: AuthApi + ?Sized,
{
    pub fn new(session: &'a Session, auth: &'a A) -> Self {
        Self {
            session,
            auth,
            cancel: None,
        }
    }

    /// Stops the run as soon as `cancel` fires. In-flight calls are dropped
    /// and their results discarded.
    pub fn with_cancellation(mut self, cancel: &'a CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub async fn run<T, F, Fut>(&self, mut op: F) -> SessionResult<T>
    where
        F: FnMut(BearerToken) -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        self.ensure_active()?;
        let token = self.session.token()?;

        match self.guard(op(token)).await? {
            Ok(value) => return Ok(value),
            Err(ApiError::AuthenticationExpired) => {
                log::debug!("Bearer token rejected, refreshing");
            }
            Err(e) => return Err(e.into()),
        }

        self.ensure_active()?;
        let token = self.guard(refresh(self.session, self.auth)).await??;

        self.ensure_active()?;
        Ok(self.guard(op(token)).await??)
    }

    fn ensure_active(&self) -> SessionResult<()> {
        match self.cancel {
            Some(cancel) if cancel.is_cancelled() => Err(SessionError::Cancelled),
            _ => Ok(()),
        }
    }

    async fn guard<Fut: Future>(&self, fut: Fut) -> SessionResult<Fut::Output> {
        match self.cancel {
            Some(cancel) => tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(SessionError::Cancelled),
                output = fut => Ok(output),
            },
            None => Ok(fut.await),
        }
    }
}
