use std::sync::Arc;

use crate::booking::catalog::PlaceCatalog;
use crate::booking::service::BookingService;
use crate::config::ServerConfig;
use crate::identity::PgMembershipDirectory;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: camara_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Place types and places.
    pub catalog: Arc<PlaceCatalog>,
    /// Reservation workflow.
    pub booking: Arc<BookingService>,
}

impl AppState {
    /// Wire the services over one pool, with membership read from the
    /// `members` table.
    pub fn new(pool: camara_db::DbPool, config: ServerConfig) -> Self {
        let directory = Arc::new(PgMembershipDirectory::new(pool.clone()));
        let booking = BookingService::new(pool.clone(), config.booking.clone(), directory);

        Self {
            catalog: Arc::new(PlaceCatalog::new(pool.clone())),
            booking: Arc::new(booking),
            config: Arc::new(config),
            pool,
        }
    }
}
