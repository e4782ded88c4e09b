//! Internal Diesel row structs for the `complaints` table.
//!
//! These never leave the persistence layer; conversion to and from domain
//! types happens in the repository.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::complaints;

/// Row read back from `complaints`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = complaints)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ComplaintRow {
    pub id: Uuid,
    pub user_name: String,
    pub issue: String,
    pub priority: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable view over a domain complaint.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = complaints)]
pub(crate) struct NewComplaintRow<'a> {
    pub id: Uuid,
    pub user_name: &'a str,
    pub issue: &'a str,
    pub priority: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset written by an update; `id` and `created_at` are never touched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = complaints)]
pub(crate) struct ComplaintChangeset<'a> {
    pub user_name: &'a str,
    pub issue: &'a str,
    pub priority: &'a str,
    pub updated_at: DateTime<Utc>,
}
