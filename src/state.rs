//! Shared application state injected into handlers.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{
    AuthService, EventService, GuestService, TransportService, TravelService,
};
use crate::infrastructure::lock::GenerationLock;
use crate::infrastructure::persistence::{
    PgEventRepository, PgGuestRepository, PgTokenRepository, PgTransportRepository,
    PgTravelRepository,
};

pub type AppEventService = EventService<PgEventRepository>;
pub type AppGuestService = GuestService<PgGuestRepository, PgEventRepository>;
pub type AppTravelService = TravelService<PgTravelRepository, PgGuestRepository, PgEventRepository>;
pub type AppTransportService =
    TransportService<PgEventRepository, PgTravelRepository, PgTransportRepository>;
pub type AppAuthService = AuthService<PgTokenRepository>;

/// Services and backends shared by all requests.
///
/// Cheap to clone; every field is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<PgPool>,
    pub event_service: Arc<AppEventService>,
    pub guest_service: Arc<AppGuestService>,
    pub travel_service: Arc<AppTravelService>,
    pub transport_service: Arc<AppTransportService>,
    pub auth_service: Arc<AppAuthService>,
    pub lock: Arc<dyn GenerationLock>,
}

impl AppState {
    /// Wires the PostgreSQL repositories into the services.
    pub fn new(
        pool: Arc<PgPool>,
        lock: Arc<dyn GenerationLock>,
        token_signing_secret: String,
    ) -> Self {
        let event_repo = Arc::new(PgEventRepository::new(pool.clone()));
        let guest_repo = Arc::new(PgGuestRepository::new(pool.clone()));
        let travel_repo = Arc::new(PgTravelRepository::new(pool.clone()));
        let transport_repo = Arc::new(PgTransportRepository::new(pool.clone()));
        let token_repo = Arc::new(PgTokenRepository::new(pool.clone()));

        Self {
            db: pool,
            event_service: Arc::new(EventService::new(event_repo.clone())),
            guest_service: Arc::new(GuestService::new(guest_repo.clone(), event_repo.clone())),
            travel_service: Arc::new(TravelService::new(
                travel_repo.clone(),
                guest_repo,
                event_repo.clone(),
            )),
            transport_service: Arc::new(TransportService::new(
                event_repo,
                travel_repo,
                transport_repo,
                lock.clone(),
            )),
            auth_service: Arc::new(AuthService::new(token_repo, token_signing_secret)),
            lock,
        }
    }
}
