use axum::routing::get;
use axum::Router;

use crate::handlers::places;
use crate::state::AppState;

/// Public place routes, nested under `/places`.
///
/// ```text
/// GET    /                 list_places
/// GET    /{id}             get_place
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(places::list_places))
        .route("/{id}", get(places::get_place))
}
