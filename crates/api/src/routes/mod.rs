pub mod admin;
pub mod health;
pub mod places;
pub mod reservations;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /places                                  bookable places (public)
/// /places/{id}                             place detail (public)
///
/// /reservations                            request (member)
/// /reservations/availability               availability probe
/// /reservations/quote                      duration and cost quote
/// /reservations/mine                       own reservations
/// /reservations/{id}                       detail (owner or staff)
/// /reservations/{id}/cancel                cancel (owner or staff)
/// /reservations/{id}/approve               approve (staff)
/// /reservations/{id}/reject                reject (staff)
/// /reservations/{id}/complete              complete (staff)
///
/// /admin/reservations                      staff queue
/// /admin/place-types                       list, create (staff)
/// /admin/place-types/{id}                  update (staff)
/// /admin/places                            list, create (staff)
/// /admin/places/{id}                       update (staff)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/places", places::router())
        .nest("/reservations", reservations::router())
        .nest("/admin", admin::router())
}
