//! Correlation id shared by a request's log events and error payloads.
//!
//! The [`Trace`](crate::middleware::Trace) middleware opens a scope per
//! request; [`Error`](crate::domain::Error) reads the id back when it is
//! built. Task-locals do not follow `tokio::spawn`, so spawned work must be
//! wrapped in [`TraceId::within`] again.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use uuid::Uuid;

tokio::task_local! {
    static CURRENT: TraceId;
}

/// Random UUID identifying one HTTP request.
///
/// ```
/// use recipe_backend::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id: TraceId = "6f1c1a8e-3f4b-4d55-9a3e-2b1f1e0c9d7a".parse().expect("uuid");
/// assert_eq!(TraceId::within(id, async { TraceId::current() }).await, Some(id));
/// assert_eq!(TraceId::current(), None);
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Id of the request currently being served, if any.
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Drive `fut` with `id` as the current trace id.
    pub async fn within<F: Future>(id: TraceId, fut: F) -> F::Output {
        CURRENT.scope(id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        raw.parse().map(Self)
    }
}
