pub mod format;
pub mod model;
pub mod normalize;
pub mod render;
pub mod section;
pub mod session;

pub use model::{Results, View};
pub use section::{Period, Query, RelayCall, SearchKind, Section, SectionParams};
pub use session::{Action, Effect, LoadState, PendingLoad, Session};

use crate::relay::{RelayError, RelayService};
use async_trait::async_trait;
use futures::future::try_join_all;
use serde_json::Value;
use tracing::{debug, warn};

/// Where the renderer gets its data from. The server answers through the
/// relay directly; tests plug in canned payloads.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, call: &RelayCall) -> Result<Value, RelayError>;
}

#[async_trait]
impl Fetch for RelayService {
    async fn fetch(&self, call: &RelayCall) -> Result<Value, RelayError> {
        self.dispatch(call.endpoint, &call.query()).await
    }
}

/// Issues all calls at once and waits for every one of them. The first
/// failure fails the whole batch.
pub async fn execute<F>(fetcher: &F, calls: &[RelayCall]) -> Result<Vec<Value>, RelayError>
where
    F: Fetch + ?Sized,
{
    try_join_all(calls.iter().map(|call| fetcher.fetch(call))).await
}

/// Runs a full section load for `session` and returns the session in its
/// final state (rendered, errored, or untouched when no user is set).
pub async fn load_section<F>(
    fetcher: &F,
    session: Session,
    section: Section,
    params: SectionParams,
) -> Session
where
    F: Fetch + ?Sized,
{
    match session.apply(Action::Select { section, params }) {
        (session, Effect::Load(pending)) => complete(fetcher, session, pending).await,
        (session, _) => session,
    }
}

/// What a username submission from the shell led to.
#[derive(Debug, Clone, PartialEq)]
pub enum UserChange {
    Rejected(&'static str),
    Unchanged,
    Loaded(Session),
}

/// Applies a username submission and, when it switches user, reloads the
/// section the session was on (or the dashboard for a first user).
pub async fn change_user<F>(fetcher: &F, session: Session, name: String) -> UserChange
where
    F: Fetch + ?Sized,
{
    match session.apply(Action::SetUser(name)) {
        (_, Effect::Rejected(message)) => UserChange::Rejected(message),
        (session, Effect::Load(pending)) => {
            UserChange::Loaded(complete(fetcher, session, pending).await)
        }
        (_, Effect::None | Effect::PromptUsername) => UserChange::Unchanged,
    }
}

async fn complete<F>(fetcher: &F, session: Session, pending: PendingLoad) -> Session
where
    F: Fetch + ?Sized,
{
    debug!(
        section = pending.section.id(),
        calls = pending.calls.len(),
        "loading section"
    );
    let outcome = match execute(fetcher, &pending.calls).await {
        Ok(payloads) => Ok(pending.section.build(&session.params, &payloads)),
        Err(err) => {
            warn!(section = pending.section.id(), "section load failed: {err}");
            Err(err.to_string())
        }
    };

    session
        .apply(Action::Resolved {
            generation: pending.generation,
            outcome,
        })
        .0
}

/// Runs a search, geo or tag query.
pub async fn run_query<F>(fetcher: &F, query: &Query) -> Result<Results, String>
where
    F: Fetch + ?Sized,
{
    match execute(fetcher, &query.plan()).await {
        Ok(payloads) => Ok(query.build(&payloads)),
        Err(err) => {
            warn!("query failed: {err}");
            Err(err.to_string())
        }
    }
}
