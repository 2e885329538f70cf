use crate::dto::job_dto::{
    CreateJobPayload, JobListQuery, JobListResponse, JobSort, ReorderJobPayload,
    UpdateJobPayload, DEFAULT_JOB_PAGE_SIZE,
};
use crate::dto::page_dto::paginate;
use crate::error::{Error, Result};
use crate::models::job::{Job, JobStatus};
use crate::store::{Collection, Store, WriteBatch};
use crate::utils::slug::slugify;

pub const DEFAULT_LOCATION: &str = "Remote · India";

#[derive(Clone)]
pub struct JobService {
    store: Store,
}

impl JobService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn list(&self, query: JobListQuery) -> Result<JobListResponse> {
        let sort = parse_sort(query.sort.as_deref())?;
        let mut jobs: Vec<Job> = self.store.all(Collection::Jobs).await?;

        if let Some(search) = non_empty(query.search.as_deref()) {
            let needle = search.to_lowercase();
            jobs.retain(|job| job.matches_search(&needle));
        }
        if let Some(status) = non_empty(query.status.as_deref()) {
            jobs.retain(|job| job.status.as_str() == status);
        }

        match sort {
            JobSort::Order => jobs.sort_by_key(|job| job.order),
            JobSort::Title => jobs.sort_by(|a, b| {
                a.title
                    .to_lowercase()
                    .cmp(&b.title.to_lowercase())
                    .then_with(|| a.title.cmp(&b.title))
            }),
        }

        Ok(paginate(
            jobs,
            query.page,
            query.page_size,
            DEFAULT_JOB_PAGE_SIZE,
        ))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Job> {
        self.store
            .get(Collection::Jobs, &id.to_string())
            .await?
            .ok_or_else(|| Error::NotFound("Not found".to_string()))
    }

    pub async fn create(&self, payload: CreateJobPayload) -> Result<Job> {
        let title = payload
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Validation("Title required".to_string()))?
            .to_string();
        let slug_source = non_empty(payload.slug.as_deref()).unwrap_or(title.as_str());
        let slug = slugify(slug_source);
        if slug.is_empty() {
            return Err(Error::Validation(
                "Slug must contain letters or digits".to_string(),
            ));
        }

        let _guard = self.store.lock_writes().await;
        let existing: Vec<Job> = self.store.all(Collection::Jobs).await?;
        if existing.iter().any(|job| job.slug == slug) {
            return Err(Error::Conflict("Slug must be unique".to_string()));
        }

        let id = existing.iter().map(|job| job.id).max().unwrap_or(0) + 1;
        let job = Job {
            id,
            title,
            slug,
            status: payload.status.unwrap_or(JobStatus::Active),
            tags: payload.tags.unwrap_or_default(),
            order: id,
            location: payload
                .location
                .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
        };
        self.store.set(Collection::Jobs, &job.key(), &job).await?;

        tracing::info!(job_id = job.id, slug = %job.slug, "job created");
        Ok(job)
    }

    pub async fn update(&self, id: i64, payload: UpdateJobPayload) -> Result<Job> {
        let _guard = self.store.lock_writes().await;
        let mut job = self.get_by_id(id).await?;

        if let Some(title) = payload.title {
            job.title = title;
        }
        if let Some(raw_slug) = payload.slug {
            let slug = slugify(&raw_slug);
            if slug.is_empty() {
                return Err(Error::Validation(
                    "Slug must contain letters or digits".to_string(),
                ));
            }
            let others: Vec<Job> = self.store.all(Collection::Jobs).await?;
            if others.iter().any(|other| other.id != id && other.slug == slug) {
                return Err(Error::Conflict("Slug must be unique".to_string()));
            }
            job.slug = slug;
        }
        if let Some(status) = payload.status {
            job.status = status;
        }
        if let Some(tags) = payload.tags {
            job.tags = tags;
        }
        if let Some(location) = payload.location {
            job.location = location;
        }

        self.store.set(Collection::Jobs, &job.key(), &job).await?;
        tracing::info!(job_id = id, "job updated");
        Ok(job)
    }

    /// Moves the job at `fromOrder` to position `toOrder` and renumbers every job
    /// to a dense `1..=N`. The new ordering is computed in full and committed as a
    /// single batch.
    pub async fn reorder(&self, payload: ReorderJobPayload) -> Result<()> {
        let (from_order, to_order) = match (payload.from_order, payload.to_order) {
            (Some(from), Some(to)) => (from, to),
            _ => {
                return Err(Error::Validation(
                    "fromOrder and toOrder are required".to_string(),
                ))
            }
        };

        let _guard = self.store.lock_writes().await;
        let mut jobs: Vec<Job> = self.store.all(Collection::Jobs).await?;
        jobs.sort_by_key(|job| job.order);

        let index = jobs
            .iter()
            .position(|job| job.order == from_order)
            .ok_or_else(|| Error::Validation("fromOrder not found".to_string()))?;
        let moved = jobs.remove(index);
        let target = usize::try_from(to_order.saturating_sub(1))
            .unwrap_or(0)
            .min(jobs.len());
        jobs.insert(target, moved);

        let mut batch = WriteBatch::new();
        for (position, job) in jobs.iter_mut().enumerate() {
            let order = position as i64 + 1;
            if job.order != order {
                job.order = order;
                batch.put_record(Collection::Jobs, job.key(), &*job)?;
            }
        }

        let changed = batch.len();
        self.store.commit(batch).await?;
        tracing::info!(from_order, to_order, changed, "jobs reordered");
        Ok(())
    }
}

fn parse_sort(raw: Option<&str>) -> Result<JobSort> {
    match non_empty(raw) {
        None | Some("order") => Ok(JobSort::Order),
        Some("title") => Ok(JobSort::Title),
        Some(other) => Err(Error::Validation(format!("Unknown sort: {}", other))),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
