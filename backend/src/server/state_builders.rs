//! Wiring of the complaint service onto the configured store.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use complaints::domain::ComplaintService;
use complaints::domain::ports::ComplaintRepository;
use complaints::inbound::http::state::HttpState;
use complaints::outbound::memory::InMemoryComplaintRepository;
use complaints::outbound::persistence::DieselComplaintRepository;

use super::ServerConfig;

fn state_for<R>(repo: R, clock: Arc<dyn Clock>) -> HttpState
where
    R: ComplaintRepository + 'static,
{
    HttpState::from_service(Arc::new(ComplaintService::new(Arc::new(repo), clock)))
}

/// Build handler state backed by PostgreSQL when a pool is configured and by
/// process memory otherwise.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let state = match &config.db_pool {
        Some(pool) => {
            info!("serving complaints from PostgreSQL");
            state_for(DieselComplaintRepository::new(pool.clone()), clock)
        }
        None => {
            warn!("no database configured; complaints are kept in memory and lost on restart");
            state_for(InMemoryComplaintRepository::new(), clock)
        }
    };
    web::Data::new(state)
}
