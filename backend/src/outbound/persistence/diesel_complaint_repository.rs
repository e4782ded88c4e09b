//! PostgreSQL-backed `ComplaintRepository` using Diesel.
//!
//! Updates lock the target row with `SELECT ... FOR UPDATE` inside a
//! transaction, so the refreshed `updated_at` is always computed from the
//! value the write replaces.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};

use crate::domain::ports::{ComplaintRepository, ComplaintRepositoryError};
use crate::domain::{
    Complaint, ComplaintDraft, ComplaintId, IssueText, Priority, UserName, refreshed_timestamp,
};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ComplaintChangeset, ComplaintRow, NewComplaintRow};
use super::pool::DbPool;
use super::schema::complaints;

/// Diesel implementation of the [`ComplaintRepository`] port.
#[derive(Clone)]
pub struct DieselComplaintRepository {
    pool: DbPool,
}

impl DieselComplaintRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Rebuild a domain complaint, rejecting rows the domain would never write.
fn row_to_complaint(row: ComplaintRow) -> Result<Complaint, ComplaintRepositoryError> {
    let id = ComplaintId::from_uuid(row.id);
    let invalid = |error: crate::domain::ComplaintValidationError| {
        tracing::warn!(complaint_id = %id, %error, "stored complaint failed validation");
        ComplaintRepositoryError::query(format!("stored complaint {id} is invalid: {error}"))
    };

    let draft = ComplaintDraft::new(
        UserName::new(&row.user_name).map_err(invalid)?,
        IssueText::new(&row.issue).map_err(invalid)?,
        Priority::from_str(&row.priority).map_err(invalid)?,
    );
    Complaint::restore(id, draft, row.created_at, row.updated_at).map_err(invalid)
}

fn new_row(complaint: &Complaint) -> NewComplaintRow<'_> {
    NewComplaintRow {
        id: *complaint.id().as_uuid(),
        user_name: complaint.user_name().as_ref(),
        issue: complaint.issue().as_ref(),
        priority: complaint.priority().as_str(),
        created_at: complaint.created_at(),
        updated_at: complaint.updated_at(),
    }
}

#[async_trait]
impl ComplaintRepository for DieselComplaintRepository {
    async fn insert(&self, complaint: &Complaint) -> Result<(), ComplaintRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(complaints::table)
            .values(&new_row(complaint))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_newest_first(&self) -> Result<Vec<Complaint>, ComplaintRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ComplaintRow> = complaints::table
            .select(ComplaintRow::as_select())
            .order_by((complaints::created_at.desc(), complaints::id.desc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_complaint).collect()
    }

    async fn find_by_id(
        &self,
        id: &ComplaintId,
    ) -> Result<Option<Complaint>, ComplaintRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ComplaintRow> = complaints::table
            .find(id.as_uuid())
            .select(ComplaintRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_complaint).transpose()
    }

    async fn update(
        &self,
        id: &ComplaintId,
        draft: &ComplaintDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Complaint>, ComplaintRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let key = *id.as_uuid();
        let user_name = draft.user_name().as_ref();
        let issue = draft.issue().as_ref();
        let priority = draft.priority().as_str();

        let updated = conn
            .transaction::<_, DieselError, _>(|conn| {
                async move {
                    let previous: Option<DateTime<Utc>> = complaints::table
                        .find(key)
                        .select(complaints::updated_at)
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?;
                    let Some(previous) = previous else {
                        return Ok(None);
                    };

                    let changeset = ComplaintChangeset {
                        user_name,
                        issue,
                        priority,
                        updated_at: refreshed_timestamp(previous, now),
                    };
                    diesel::update(complaints::table.find(key))
                        .set(&changeset)
                        .returning(ComplaintRow::as_returning())
                        .get_result(conn)
                        .await
                        .map(Some)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        updated.map(row_to_complaint).transpose()
    }

    async fn delete(&self, id: &ComplaintId) -> Result<bool, ComplaintRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(complaints::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion coverage; round trips against Postgres live in
    //! `tests/diesel_complaint_repository.rs`.
    use chrono::{TimeDelta, TimeZone};
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    use super::*;

    #[fixture]
    fn row() -> ComplaintRow {
        let at = Utc
            .with_ymd_and_hms(2026, 3, 2, 9, 30, 0)
            .single()
            .expect("fixture timestamp is unambiguous");
        ComplaintRow {
            id: Uuid::new_v4(),
            user_name: "Ada".to_owned(),
            issue: "Door sticks".to_owned(),
            priority: "Medium".to_owned(),
            created_at: at,
            updated_at: at + TimeDelta::minutes(5),
        }
    }

    #[rstest]
    fn valid_rows_restore(row: ComplaintRow) {
        let id = row.id;

        let complaint = row_to_complaint(row).expect("row is valid");

        assert_eq!(complaint.id().as_uuid(), &id);
        assert_eq!(complaint.priority(), Priority::Medium);
        assert_eq!(complaint.user_name().as_ref(), "Ada");
    }

    #[rstest]
    #[case::priority(|row: &mut ComplaintRow| row.priority = "medium".to_owned())]
    #[case::blank_user(|row: &mut ComplaintRow| row.user_name = "  ".to_owned())]
    #[case::blank_issue(|row: &mut ComplaintRow| row.issue = String::new())]
    #[case::timestamps(|row: &mut ComplaintRow| row.updated_at = row.created_at - TimeDelta::seconds(1))]
    fn corrupt_rows_surface_as_query_errors(
        mut row: ComplaintRow,
        #[case] corrupt: fn(&mut ComplaintRow),
    ) {
        corrupt(&mut row);

        let error = row_to_complaint(row).expect_err("row is rejected");

        assert!(matches!(error, ComplaintRepositoryError::Query { .. }));
    }

    #[rstest]
    fn new_row_borrows_domain_fields() {
        let draft = ComplaintDraft::parse(Some("Grace"), Some("Lift broken"), Some("High"))
            .expect("valid draft");
        let complaint = Complaint::create(ComplaintId::random(), draft, Utc::now());

        let inserted = new_row(&complaint);

        assert_eq!(inserted.priority, "High");
        assert_eq!(inserted.created_at, inserted.updated_at);
        assert_eq!(&inserted.id, complaint.id().as_uuid());
    }
}
