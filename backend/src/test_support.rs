//! Test utilities shared by unit tests (in `src/`) and integration tests (in
//! `tests/`). Compiled for tests and with the `test-support` feature.

use std::sync::{Arc, Mutex};

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use crate::Trace;
use crate::domain::ComplaintService;
use crate::domain::ports::ComplaintRepository;
use crate::inbound::http::complaints::configure;
use crate::inbound::http::error::json_error_handler;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryComplaintRepository;

/// Clock that returns `start` and then advances by `step` on every reading.
///
/// Gives deterministic, strictly increasing timestamps so ordering by
/// creation time is observable in tests.
///
/// ```
/// use chrono::{TimeDelta, Utc};
/// use complaints::test_support::SteppingClock;
/// use mockable::Clock;
///
/// let start = Utc::now();
/// let clock = SteppingClock::new(start, TimeDelta::seconds(1));
/// assert_eq!(clock.utc(), start);
/// assert_eq!(clock.utc(), start + TimeDelta::seconds(1));
/// ```
#[derive(Debug)]
pub struct SteppingClock {
    next: Mutex<DateTime<Utc>>,
    step: TimeDelta,
}

impl SteppingClock {
    pub fn new(start: DateTime<Utc>, step: TimeDelta) -> Self {
        Self {
            next: Mutex::new(start),
            step,
        }
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut next = self.next.lock().unwrap_or_else(|err| err.into_inner());
        let current = *next;
        *next = current + self.step;
        current
    }
}

/// Handler state over `repo` with the given clock.
pub fn state_with<R>(repo: Arc<R>, clock: Arc<dyn Clock>) -> HttpState
where
    R: ComplaintRepository + 'static,
{
    HttpState::from_service(Arc::new(ComplaintService::new(repo, clock)))
}

/// Handler state over a fresh in-memory store with a one second clock step.
pub fn memory_state() -> HttpState {
    state_with(
        Arc::new(InMemoryComplaintRepository::new()),
        Arc::new(SteppingClock::new(Utc::now(), TimeDelta::seconds(1))),
    )
}

/// App with the complaint routes mounted under `/api`, the JSON error
/// handler, and the trace middleware, as the server wires them.
pub fn complaints_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(Trace)
        .service(web::scope("/api").configure(configure))
}

pub mod openapi {
    //! OpenAPI schema traversal helpers.

    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::{Object, Schema};

    /// Extract an `Object` schema, panicking with the schema's shape otherwise.
    pub fn unwrap_object_schema<'a>(schema: &'a RefOr<Schema>, name: &str) -> &'a Object {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj,
            RefOr::Ref(reference) => panic!(
                "schema '{name}' is a $ref to '{}'; resolve the reference first",
                reference.ref_location
            ),
            RefOr::T(Schema::Array(_)) => panic!("schema '{name}' is an Array, not an Object"),
            _ => panic!("schema '{name}' is a combinator or unexpected type"),
        }
    }

    /// Property `field` of an Object schema. Panics when it is absent.
    pub fn get_property<'a>(obj: &'a Object, field: &str) -> &'a RefOr<Schema> {
        match obj.properties.get(field) {
            Some(property) => property,
            None => panic!("property '{field}' not found"),
        }
    }
}
