//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    ComplaintsCommand, ComplaintsQuery, FixtureComplaintsCommand, FixtureComplaintsQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub complaints: Arc<dyn ComplaintsCommand>,
    pub complaints_query: Arc<dyn ComplaintsQuery>,
}

impl HttpState {
    /// Construct state from the complaint command and query ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use complaints::domain::ports::{FixtureComplaintsCommand, FixtureComplaintsQuery};
    /// use complaints::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureComplaintsCommand),
    ///     Arc::new(FixtureComplaintsQuery),
    /// );
    /// let _complaints = state.complaints.clone();
    /// ```
    pub fn new(
        complaints: Arc<dyn ComplaintsCommand>,
        complaints_query: Arc<dyn ComplaintsQuery>,
    ) -> Self {
        Self {
            complaints,
            complaints_query,
        }
    }

    /// Build state from one service implementing both ports.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: ComplaintsCommand + ComplaintsQuery + 'static,
    {
        Self::new(service.clone(), service)
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self::new(
            Arc::new(FixtureComplaintsCommand),
            Arc::new(FixtureComplaintsQuery),
        )
    }
}
