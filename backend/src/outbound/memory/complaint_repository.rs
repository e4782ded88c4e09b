//! In-memory implementation of [`ComplaintRepository`].

use std::cmp::Reverse;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::ports::{ComplaintRepository, ComplaintRepositoryError};
use crate::domain::{Complaint, ComplaintDraft, ComplaintId};

/// Complaint store backed by a `HashMap` behind a Tokio `RwLock`.
///
/// Updates hold the write lock across the read of the current record and the
/// write of its revision, so concurrent updates to one complaint serialise.
#[derive(Debug, Default)]
pub struct InMemoryComplaintRepository {
    complaints: RwLock<HashMap<ComplaintId, Complaint>>,
}

impl InMemoryComplaintRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ComplaintRepository for InMemoryComplaintRepository {
    async fn insert(&self, complaint: &Complaint) -> Result<(), ComplaintRepositoryError> {
        let mut complaints = self.complaints.write().await;
        if complaints.contains_key(&complaint.id()) {
            return Err(ComplaintRepositoryError::query(format!(
                "duplicate complaint id {}",
                complaint.id()
            )));
        }
        complaints.insert(complaint.id(), complaint.clone());
        Ok(())
    }

    async fn list_newest_first(&self) -> Result<Vec<Complaint>, ComplaintRepositoryError> {
        let complaints = self.complaints.read().await;
        let mut listed: Vec<Complaint> = complaints.values().cloned().collect();
        listed.sort_by_key(|complaint| Reverse((complaint.created_at(), complaint.id())));
        Ok(listed)
    }

    async fn find_by_id(
        &self,
        id: &ComplaintId,
    ) -> Result<Option<Complaint>, ComplaintRepositoryError> {
        Ok(self.complaints.read().await.get(id).cloned())
    }

    async fn update(
        &self,
        id: &ComplaintId,
        draft: &ComplaintDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<Complaint>, ComplaintRepositoryError> {
        let mut complaints = self.complaints.write().await;
        let Some(current) = complaints.get_mut(id) else {
            return Ok(None);
        };
        let revised = current.revise(draft.clone(), now);
        *current = revised.clone();
        Ok(Some(revised))
    }

    async fn delete(&self, id: &ComplaintId) -> Result<bool, ComplaintRepositoryError> {
        Ok(self.complaints.write().await.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    //! Behaviour of the in-memory store.

    use std::sync::Arc;

    use chrono::{TimeDelta, TimeZone};
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0)
            .single()
            .expect("fixture timestamp is unambiguous")
    }

    fn draft(user_name: &str) -> ComplaintDraft {
        ComplaintDraft::parse(Some(user_name), Some("Heating is off"), None).expect("valid draft")
    }

    fn complaint_at(at: DateTime<Utc>) -> Complaint {
        Complaint::create(ComplaintId::random(), draft("Ada"), at)
    }

    #[rstest]
    #[tokio::test]
    async fn insert_then_find_returns_equal_record(base_time: DateTime<Utc>) {
        let repo = InMemoryComplaintRepository::new();
        let complaint = complaint_at(base_time);

        repo.insert(&complaint).await.expect("insert succeeds");
        let found = repo
            .find_by_id(&complaint.id())
            .await
            .expect("lookup succeeds");

        assert_eq!(found, Some(complaint));
    }

    #[rstest]
    #[tokio::test]
    async fn insert_rejects_duplicate_ids(base_time: DateTime<Utc>) {
        let repo = InMemoryComplaintRepository::new();
        let complaint = complaint_at(base_time);
        repo.insert(&complaint).await.expect("first insert succeeds");

        let result = repo.insert(&complaint).await;

        assert!(matches!(result, Err(ComplaintRepositoryError::Query { .. })));
    }

    #[rstest]
    #[tokio::test]
    async fn list_orders_newest_first_with_id_tiebreak(base_time: DateTime<Utc>) {
        let repo = InMemoryComplaintRepository::new();
        let oldest = complaint_at(base_time);
        let tied_a = complaint_at(base_time + TimeDelta::seconds(1));
        let tied_b = complaint_at(base_time + TimeDelta::seconds(1));
        for complaint in [&oldest, &tied_a, &tied_b] {
            repo.insert(complaint).await.expect("insert succeeds");
        }

        let listed: Vec<_> = repo
            .list_newest_first()
            .await
            .expect("list succeeds")
            .into_iter()
            .map(|complaint| complaint.id())
            .collect();

        let (high, low) = if tied_a.id() > tied_b.id() {
            (tied_a.id(), tied_b.id())
        } else {
            (tied_b.id(), tied_a.id())
        };
        assert_eq!(listed, vec![high, low, oldest.id()]);
    }

    #[rstest]
    #[tokio::test]
    async fn update_missing_returns_none(base_time: DateTime<Utc>) {
        let repo = InMemoryComplaintRepository::new();

        let updated = repo
            .update(&ComplaintId::random(), &draft("Ada"), base_time)
            .await
            .expect("update succeeds");

        assert!(updated.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn update_replaces_fields_and_refreshes_timestamp(base_time: DateTime<Utc>) {
        let repo = InMemoryComplaintRepository::new();
        let complaint = complaint_at(base_time);
        repo.insert(&complaint).await.expect("insert succeeds");

        let updated = repo
            .update(&complaint.id(), &draft("Grace"), base_time)
            .await
            .expect("update succeeds")
            .expect("complaint exists");

        assert_eq!(updated.user_name().as_ref(), "Grace");
        assert_eq!(updated.created_at(), complaint.created_at());
        assert!(updated.updated_at() > complaint.updated_at());
        let stored = repo
            .find_by_id(&complaint.id())
            .await
            .expect("lookup succeeds");
        assert_eq!(stored, Some(updated));
    }

    #[rstest]
    #[tokio::test]
    async fn concurrent_updates_each_advance_updated_at(base_time: DateTime<Utc>) {
        let repo = Arc::new(InMemoryComplaintRepository::new());
        let complaint = complaint_at(base_time);
        repo.insert(&complaint).await.expect("insert succeeds");

        let mut handles = Vec::new();
        for name in ["Ada", "Grace", "Barbara", "Frances"] {
            let repo = Arc::clone(&repo);
            let id = complaint.id();
            handles.push(tokio::spawn(async move {
                repo.update(&id, &draft(name), base_time).await
            }));
        }
        for handle in handles {
            handle
                .await
                .expect("task joins")
                .expect("update succeeds")
                .expect("complaint exists");
        }

        let stored = repo
            .find_by_id(&complaint.id())
            .await
            .expect("lookup succeeds")
            .expect("complaint exists");
        assert_eq!(
            stored.updated_at(),
            complaint.updated_at() + TimeDelta::microseconds(4)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reports_whether_a_record_was_removed(base_time: DateTime<Utc>) {
        let repo = InMemoryComplaintRepository::new();
        let complaint = complaint_at(base_time);
        repo.insert(&complaint).await.expect("insert succeeds");

        assert!(repo.delete(&complaint.id()).await.expect("delete succeeds"));
        assert!(!repo.delete(&complaint.id()).await.expect("delete succeeds"));
        assert!(
            repo.find_by_id(&complaint.id())
                .await
                .expect("lookup succeeds")
                .is_none()
        );
    }
}
