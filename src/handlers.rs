use crate::errors::AppError;
use crate::relay::Endpoint;
use crate::state::AppState;
use crate::ui::render_index;
use crate::view::{
    self, render, LoadState, Query as ViewQuery, Results, SearchKind, Section, SectionParams,
    Session, UserChange, View,
};
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

type Params = HashMap<String, String>;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(state.relay.default_user()))
}

pub async fn relay(
    endpoint: Endpoint,
    state: AppState,
    query: Params,
) -> Result<Json<Value>, AppError> {
    let payload = state.relay.dispatch(endpoint, &query).await?;
    Ok(Json(payload))
}

#[derive(Debug, Serialize)]
struct SectionPayload<'a> {
    section: Section,
    title: &'static str,
    subtitle: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    view: Option<&'a View>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl<'a> From<&'a Session> for SectionPayload<'a> {
    fn from(session: &'a Session) -> Self {
        let (view, error) = match &session.load {
            LoadState::Rendered(view) => (Some(view), None),
            LoadState::Errored(message) => (None, Some(message.as_str())),
            LoadState::Idle | LoadState::Loading => (None, Some("Please enter a username")),
        };
        Self {
            section: session.section,
            title: session.section.title(),
            subtitle: session.section.subtitle(),
            view,
            error,
        }
    }
}

#[derive(Debug, Serialize)]
struct ResultsPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    results: Option<&'a Results>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum UserChangePayload<'a> {
    Rejected {
        message: &'static str,
    },
    Unchanged,
    Loaded {
        user: Option<&'a str>,
        section: Section,
        html: String,
    },
}

pub async fn view_section(
    State(state): State<AppState>,
    Path(section): Path<String>,
    Query(query): Query<Params>,
) -> Response {
    let section = Section::from_id(&section);
    let params = section_params(&query);
    let user = param(&query, "user").or_else(|| state.relay.default_user().map(str::to_string));
    let session = user.map(Session::with_user).unwrap_or_default();

    let session = view::load_section(state.relay.as_ref(), session, section, params).await;
    debug!(section = session.section.id(), "section rendered");

    if wants_json(&query) {
        Json(SectionPayload::from(&session)).into_response()
    } else {
        Html(render::session(&session)).into_response()
    }
}

/// Username submission from the shell. `current` and `section` describe what
/// the shell is showing so a user switch reloads the same section.
pub async fn view_user(State(state): State<AppState>, Query(query): Query<Params>) -> Response {
    let name = query.get("user").cloned().unwrap_or_default();
    let section = param(&query, "section")
        .map(|id| Section::from_id(&id))
        .unwrap_or_default();
    let session = Session::at(param(&query, "current"), section, section_params(&query));

    let change = view::change_user(state.relay.as_ref(), session, name).await;
    let payload = match &change {
        UserChange::Rejected(message) => UserChangePayload::Rejected { message },
        UserChange::Unchanged => UserChangePayload::Unchanged,
        UserChange::Loaded(session) => {
            debug!(section = session.section.id(), "user switched");
            UserChangePayload::Loaded {
                user: session.user.as_deref(),
                section: session.section,
                html: render::session(session),
            }
        }
    };
    Json(payload).into_response()
}

pub async fn view_search(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(query): Query<Params>,
) -> Response {
    let outcome = match SearchKind::from_id(&kind) {
        Some(kind) => {
            let term = param(&query, "q").unwrap_or_default();
            run(&state, ViewQuery::Search(kind, term)).await
        }
        None => Err(format!("Unknown search type '{kind}'")),
    };
    results_response(&query, outcome)
}

pub async fn view_geo(State(state): State<AppState>, Query(query): Query<Params>) -> Response {
    let country = param(&query, "country")
        .unwrap_or_else(|| view::section::DEFAULT_COUNTRY.to_string());
    let outcome = run(&state, ViewQuery::Geo(country)).await;
    results_response(&query, outcome)
}

pub async fn view_tag(State(state): State<AppState>, Query(query): Query<Params>) -> Response {
    let tag = param(&query, "tag").unwrap_or_default();
    let outcome = run(&state, ViewQuery::Tag(tag)).await;
    results_response(&query, outcome)
}

async fn run(state: &AppState, query: ViewQuery) -> Result<Results, String> {
    view::run_query(state.relay.as_ref(), &query).await
}

fn results_response(query: &Params, outcome: Result<Results, String>) -> Response {
    if wants_json(query) {
        let payload = match &outcome {
            Ok(results) => ResultsPayload {
                results: Some(results),
                error: None,
            },
            Err(message) => ResultsPayload {
                results: None,
                error: Some(message.as_str()),
            },
        };
        return Json(payload).into_response();
    }

    match outcome {
        Ok(results) => Html(render::results(&results)),
        Err(message) => Html(render::error_state(&message)),
    }
    .into_response()
}

fn section_params(query: &Params) -> SectionParams {
    SectionParams {
        period: param(query, "period")
            .and_then(|period| period.parse().ok())
            .unwrap_or_default(),
        country: param(query, "country"),
        tag: param(query, "tag"),
    }
}

/// Blank values count as absent.
fn param(query: &Params, name: &str) -> Option<String> {
    query
        .get(name)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn wants_json(query: &Params) -> bool {
    query.get("format").is_some_and(|format| format == "json")
}
