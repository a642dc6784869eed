use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reservations;
use crate::state::AppState;

/// Reservation routes, nested under `/reservations`.
///
/// ```text
/// POST   /                 create_reservation     (member)
/// GET    /availability     check_availability     (auth)
/// GET    /quote            quote                  (auth)
/// GET    /mine             list_my_reservations   (auth)
/// GET    /{id}             get_reservation        (owner or staff)
/// POST   /{id}/cancel      cancel_reservation     (owner or staff)
/// POST   /{id}/approve     approve_reservation    (staff)
/// POST   /{id}/reject      reject_reservation     (staff)
/// POST   /{id}/complete    complete_reservation   (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(reservations::create_reservation))
        .route("/availability", get(reservations::check_availability))
        .route("/quote", get(reservations::quote))
        .route("/mine", get(reservations::list_my_reservations))
        .route("/{id}", get(reservations::get_reservation))
        .route("/{id}/cancel", post(reservations::cancel_reservation))
        .route("/{id}/approve", post(reservations::approve_reservation))
        .route("/{id}/reject", post(reservations::reject_reservation))
        .route("/{id}/complete", post(reservations::complete_reservation))
}
