//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod complaint_repository;
mod complaints_command;
mod complaints_query;

#[cfg(test)]
pub use complaint_repository::MockComplaintRepository;
pub use complaint_repository::{
    ComplaintRepository, ComplaintRepositoryError, FixtureComplaintRepository,
};
#[cfg(test)]
pub use complaints_command::MockComplaintsCommand;
pub(crate) use complaints_command::parse_update_request;
pub use complaints_command::{
    ComplaintFieldsInput, ComplaintPayload, ComplaintsCommand, CreateComplaintRequest,
    CreateComplaintResponse, DeleteComplaintRequest, DeleteComplaintResponse,
    FixtureComplaintsCommand, PriorityInput, UpdateComplaintRequest, UpdateComplaintResponse,
};
#[cfg(test)]
pub use complaints_query::MockComplaintsQuery;
pub use complaints_query::{
    ComplaintsQuery, FixtureComplaintsQuery, GetComplaintRequest, GetComplaintResponse,
    ListComplaintsResponse,
};
