use axum::routing::{get, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Staff panel routes, nested under `/admin`. Every handler requires the
/// `staff` role.
///
/// ```text
/// GET    /reservations          list_reservations
/// GET    /place-types           list_place_types
/// POST   /place-types           create_place_type
/// PUT    /place-types/{id}      update_place_type
/// GET    /places                list_places
/// POST   /places                create_place
/// PUT    /places/{id}           update_place
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reservations", get(admin::list_reservations))
        .route(
            "/place-types",
            get(admin::list_place_types).post(admin::create_place_type),
        )
        .route("/place-types/{id}", put(admin::update_place_type))
        .route("/places", get(admin::list_places).post(admin::create_place))
        .route("/places/{id}", put(admin::update_place))
}
