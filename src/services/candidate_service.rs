use crate::dto::candidate_dto::{
    CandidateListQuery, CandidateListResponse, UpdateCandidatePayload,
    DEFAULT_CANDIDATE_PAGE_SIZE,
};
use crate::dto::page_dto::paginate;
use crate::error::{Error, Result};
use crate::models::candidate::Candidate;
use crate::models::timeline::TimelineEntry;
use crate::store::{Collection, Store, WriteBatch};
use crate::utils::time::now_millis;

#[derive(Clone)]
pub struct CandidateService {
    store: Store,
}

impl CandidateService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Filters in storage order; no sort is imposed.
    pub async fn list(&self, query: CandidateListQuery) -> Result<CandidateListResponse> {
        let mut candidates: Vec<Candidate> = self.store.all(Collection::Candidates).await?;

        if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            candidates.retain(|c| c.matches_search(&needle));
        }
        if let Some(stage) = query.stage.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            candidates.retain(|c| c.stage.as_str() == stage);
        }

        Ok(paginate(
            candidates,
            query.page,
            query.page_size,
            DEFAULT_CANDIDATE_PAGE_SIZE,
        ))
    }

    pub async fn get_candidate(&self, id: i64) -> Result<Candidate> {
        self.store
            .get(Collection::Candidates, &id.to_string())
            .await?
            .ok_or_else(|| Error::NotFound("Not found".to_string()))
    }

    /// Merges `payload` over the stored candidate. A stage change appends a
    /// timeline entry in the same write batch as the candidate record.
    pub async fn update(&self, id: i64, payload: UpdateCandidatePayload) -> Result<Candidate> {
        let _guard = self.store.lock_writes().await;
        let mut candidate = self.get_candidate(id).await?;

        if let Some(name) = payload.name {
            candidate.name = name;
        }
        if let Some(email) = payload.email {
            candidate.email = email;
        }
        if let Some(job_id) = payload.job_id {
            candidate.job_id = job_id;
        }

        let key = candidate.key();
        let mut batch = WriteBatch::new();
        if let Some(stage) = payload.stage {
            candidate.stage = stage;

            let mut timeline = self.timeline_for(&key).await?;
            let latest = timeline.iter().map(|e| e.timestamp).max().unwrap_or(i64::MIN);
            timeline.push(TimelineEntry::stage(now_millis().max(latest), stage));
            batch.put_record(Collection::Timelines, key.clone(), &timeline)?;

            tracing::info!(candidate_id = id, stage = %stage, "candidate moved");
        }
        batch.put_record(Collection::Candidates, key, &candidate)?;
        self.store.commit(batch).await?;

        Ok(candidate)
    }

    /// Timeline sorted ascending by timestamp. Unknown candidates have an empty one.
    pub async fn timeline(&self, id: i64) -> Result<Vec<TimelineEntry>> {
        let mut entries = self.timeline_for(&id.to_string()).await?;
        entries.sort_by_key(|e| e.timestamp);
        Ok(entries)
    }

    async fn timeline_for(&self, key: &str) -> Result<Vec<TimelineEntry>> {
        Ok(self
            .store
            .get::<Vec<TimelineEntry>>(Collection::Timelines, key)
            .await?
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::Stage;
    use crate::models::timeline::TimelineKind;

    async fn service_with(candidate: Candidate, timeline: Vec<TimelineEntry>) -> CandidateService {
        let store = Store::in_memory();
        let key = candidate.key();
        store.set(Collection::Candidates, &key, &candidate).await.unwrap();
        store.set(Collection::Timelines, &key, &timeline).await.unwrap();
        CandidateService::new(store)
    }

    fn candidate(id: i64, stage: Stage) -> Candidate {
        Candidate {
            id,
            name: "Ira Das".into(),
            email: format!("ira.das{}@example.com", id),
            job_id: 4,
            stage,
        }
    }

    #[tokio::test]
    async fn stage_entry_never_precedes_existing_entries() {
        let future = now_millis() + 60_000;
        let service = service_with(
            candidate(1, Stage::Applied),
            vec![TimelineEntry::created(future)],
        )
        .await;

        service
            .update(
                1,
                UpdateCandidatePayload {
                    stage: Some(Stage::Offer),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let timeline = service.timeline(1).await.unwrap();
        let last = timeline.last().unwrap();
        assert_eq!(last.kind, TimelineKind::Stage);
        assert_eq!(last.text, "Moved to OFFER");
        assert!(last.timestamp >= future);
    }

    #[tokio::test]
    async fn non_stage_patch_leaves_timeline_alone() {
        let service = service_with(
            candidate(2, Stage::Screen),
            vec![TimelineEntry::created(1), TimelineEntry::applied(2, 4)],
        )
        .await;

        let updated = service
            .update(
                2,
                UpdateCandidatePayload {
                    name: Some("Ira D.".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Ira D.");
        assert_eq!(updated.stage, Stage::Screen);
        assert_eq!(service.timeline(2).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn timeline_is_sorted_on_read() {
        let service = service_with(
            candidate(3, Stage::Tech),
            vec![
                TimelineEntry::stage(30, Stage::Tech),
                TimelineEntry::created(10),
                TimelineEntry::applied(20, 4),
            ],
        )
        .await;

        let stamps: Vec<i64> = service
            .timeline(3)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.timestamp)
            .collect();
        assert_eq!(stamps, vec![10, 20, 30]);
    }

    #[tokio::test]
    async fn missing_candidate_is_not_found() {
        let service = CandidateService::new(Store::in_memory());
        let err = service
            .update(9, UpdateCandidatePayload::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(service.timeline(9).await.unwrap().is_empty());
    }
}
