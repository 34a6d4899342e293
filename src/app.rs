use crate::handlers;
use crate::relay::Endpoint;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};
use std::collections::HashMap;
use tower_http::cors::CorsLayer;

pub fn router(state: AppState) -> Router {
    let relay = Endpoint::ALL.into_iter().fold(Router::<AppState>::new(), |router, endpoint| {
        router.route(
            endpoint.path(),
            get(
                move |State(state): State<AppState>, Query(query): Query<HashMap<String, String>>| async move {
                    handlers::relay(endpoint, state, query).await
                },
            ),
        )
    });

    relay
        .route("/", get(handlers::index))
        .route("/view/section/:section", get(handlers::view_section))
        .route("/view/user", get(handlers::view_user))
        .route("/view/search/:kind", get(handlers::view_search))
        .route("/view/geo", get(handlers::view_geo))
        .route("/view/tag", get(handlers::view_tag))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
