use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use serde_json::json;

use crate::error::Result;
use crate::models::assessment::{
    Assessment, Condition, ConditionalRule, Extra, Question, QuestionDetails, Section,
};
use crate::models::candidate::{Candidate, Stage};
use crate::models::job::{Job, JobStatus};
use crate::models::timeline::TimelineEntry;
use crate::store::{Collection, Store, WriteBatch};
use crate::utils::slug::slugify;
use crate::utils::time::{now_millis, DAY_MS};

pub const SEED_JOB_COUNT: usize = 25;
pub const SEED_CANDIDATE_COUNT: usize = 1000;
pub const SEED_ASSESSMENT_COUNT: usize = 3;

const TITLES: [&str; 25] = [
    "Senior Frontend Developer",
    "Product Manager",
    "QA Engineer",
    "Data Analyst",
    "Backend Engineer",
    "DevOps Engineer",
    "UX Designer",
    "Fullstack Engineer",
    "Mobile Engineer",
    "Security Analyst",
    "ML Engineer",
    "Data Engineer",
    "Support Engineer",
    "Solutions Architect",
    "Recruiter",
    "Business Analyst",
    "Design Manager",
    "Finance Analyst",
    "Cloud Engineer",
    "Platform Engineer",
    "SRE",
    "Web Analyst",
    "Creative Technologist",
    "Site Manager",
    "Growth Engineer",
];

const TAG_POOL: [&str; 10] = [
    "remote", "hybrid", "onsite", "contract", "full-time", "jr", "sr", "urgent", "india", "us",
];

const LOCATIONS: [&str; 6] = [
    "Remote · India",
    "Bengaluru",
    "Hyderabad",
    "Pune",
    "Delhi NCR",
    "Remote · US",
];

const FIRST_NAMES: [&str; 20] = [
    "Aarav", "Vivaan", "Aditya", "Vihaan", "Arjun", "Sai", "Reyansh", "Krishna", "Ishaan",
    "Rohan", "Ananya", "Aadhya", "Diya", "Ira", "Sara", "Anika", "Myra", "Aarohi", "Riya",
    "Navya",
];

const LAST_NAMES: [&str; 15] = [
    "Sharma", "Verma", "Gupta", "Mehta", "Iyer", "Patel", "Reddy", "Nair", "Kumar", "Das",
    "Singh", "Kaur", "Chopra", "Basu", "Dutta",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub seeded: bool,
    pub jobs: usize,
    pub candidates: usize,
    pub assessments: usize,
}

/// Fills a fresh store with sample jobs, candidates and assessments.
#[derive(Clone)]
pub struct SeedService {
    store: Store,
}

impl SeedService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// No-op once any job exists. Content is random, shape and counts are fixed.
    pub async fn seed_if_empty(&self) -> Result<SeedReport> {
        let _guard = self.store.lock_writes().await;
        if !self.store.is_empty(Collection::Jobs).await? {
            tracing::debug!("store already has jobs, skipping seed");
            return Ok(SeedReport {
                seeded: false,
                jobs: self.store.keys(Collection::Jobs).await?.len(),
                candidates: self.store.keys(Collection::Candidates).await?.len(),
                assessments: self.store.keys(Collection::Assessments).await?.len(),
            });
        }

        let jobs = sample_jobs();
        let mut job_batch = WriteBatch::new();
        for job in &jobs {
            job_batch.put_record(Collection::Jobs, job.key(), job)?;
        }

        let now = now_millis();
        let mut people_batch = WriteBatch::new();
        for candidate in sample_candidates(jobs.len() as i64) {
            let timeline = vec![
                TimelineEntry::created(now - 3 * DAY_MS),
                TimelineEntry::applied(now - 2 * DAY_MS, candidate.job_id),
                TimelineEntry::stage(now - DAY_MS, candidate.stage),
            ];
            people_batch.put_record(Collection::Timelines, candidate.key(), &timeline)?;
            people_batch.put_record(Collection::Candidates, candidate.key(), &candidate)?;
        }

        let mut assessment_batch = WriteBatch::new();
        for job_id in 1..=SEED_ASSESSMENT_COUNT as i64 {
            assessment_batch.put_record(
                Collection::Assessments,
                job_id.to_string(),
                &sample_assessment(job_id),
            )?;
        }

        // Jobs mark a seeded store, so they are committed last.
        self.store.commit(people_batch).await?;
        self.store.commit(assessment_batch).await?;
        self.store.commit(job_batch).await?;

        let report = SeedReport {
            seeded: true,
            jobs: jobs.len(),
            candidates: SEED_CANDIDATE_COUNT,
            assessments: SEED_ASSESSMENT_COUNT,
        };
        tracing::info!(
            jobs = report.jobs,
            candidates = report.candidates,
            assessments = report.assessments,
            "seeded sample data"
        );
        Ok(report)
    }
}

fn sample_jobs() -> Vec<Job> {
    let mut rng = rand::thread_rng();
    (0..SEED_JOB_COUNT)
        .map(|i| {
            let mut title = TITLES[i % TITLES.len()].to_string();
            if i % 5 == 0 {
                title.push_str(" II");
            }
            let slug = slugify(&format!("{}-{}", title, i + 1));
            let tag_count = 2 + i % 3;
            let tags: BTreeSet<&str> = (0..tag_count)
                .filter_map(|_| TAG_POOL.choose(&mut rng).copied())
                .collect();
            let id = i as i64 + 1;
            Job {
                id,
                title,
                slug,
                status: if rng.gen_bool(0.8) {
                    JobStatus::Active
                } else {
                    JobStatus::Archived
                },
                tags: tags.into_iter().map(str::to_string).collect(),
                order: id,
                location: LOCATIONS
                    .choose(&mut rng)
                    .copied()
                    .unwrap_or(LOCATIONS[0])
                    .to_string(),
            }
        })
        .collect()
}

fn sample_candidates(job_count: i64) -> Vec<Candidate> {
    let mut rng = rand::thread_rng();
    (1..=SEED_CANDIDATE_COUNT as i64)
        .map(|id| {
            let first = FIRST_NAMES.choose(&mut rng).copied().unwrap_or("Sai");
            let last = LAST_NAMES.choose(&mut rng).copied().unwrap_or("Das");
            Candidate {
                id,
                name: format!("{} {}", first, last),
                email: format!(
                    "{}.{}{}@example.com",
                    first.to_lowercase(),
                    last.to_lowercase(),
                    id
                ),
                job_id: rng.gen_range(1..=job_count.max(1)),
                stage: Stage::ALL.choose(&mut rng).copied().unwrap_or(Stage::Applied),
            }
        })
        .collect()
}

fn sample_assessment(job_id: i64) -> Assessment {
    let question = |id: &str, label: &str, required: bool, details: QuestionDetails| Question {
        id: id.to_string(),
        label: Some(label.to_string()),
        required,
        details,
        extra: Extra::new(),
    };

    Assessment {
        job_id,
        title: format!("Assessment for Job {}", job_id),
        sections: vec![
            Section {
                id: "s1".to_string(),
                title: "Basics".to_string(),
                questions: vec![
                    question("q1", "Are you available full-time?", true, QuestionDetails::single(&["Yes", "No"])),
                    question(
                        "q2",
                        "Technologies you know",
                        true,
                        QuestionDetails::multi(&["React", "Node", "SQL", "Docker", "AWS"]),
                    ),
                    question(
                        "q3",
                        "Briefly describe a project you are proud of",
                        false,
                        QuestionDetails::Text { max_length: Some(200) },
                    ),
                    question(
                        "q4",
                        "What makes you a good fit?",
                        false,
                        QuestionDetails::Long { max_length: Some(600) },
                    ),
                ],
                extra: Extra::new(),
            },
            Section {
                id: "s2".to_string(),
                title: "Numbers & Files".to_string(),
                questions: vec![
                    question(
                        "q5",
                        "Years of experience",
                        true,
                        QuestionDetails::Number { min: Some(0.0), max: Some(40.0) },
                    ),
                    question("q6", "Open to relocate?", false, QuestionDetails::single(&["Yes", "No"])),
                    question("q7", "Preferred location", false, QuestionDetails::Text { max_length: None }),
                    question(
                        "q8",
                        "Expected CTC (LPA)",
                        false,
                        QuestionDetails::Number { min: Some(1.0), max: Some(200.0) },
                    ),
                    question("q9", "Resume (upload stub)", false, QuestionDetails::File),
                ],
                extra: Extra::new(),
            },
        ],
        conditions: vec![ConditionalRule {
            when: Condition {
                question_id: "q6".to_string(),
                equals: json!("Yes"),
            },
            show: vec!["q7".to_string()],
            extra: Extra::new(),
        }],
        extra: Extra::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_jobs_have_unique_slugs_and_dense_order() {
        let jobs = sample_jobs();
        assert_eq!(jobs.len(), SEED_JOB_COUNT);

        let slugs: BTreeSet<&str> = jobs.iter().map(|j| j.slug.as_str()).collect();
        assert_eq!(slugs.len(), jobs.len());

        let orders: Vec<i64> = jobs.iter().map(|j| j.order).collect();
        assert_eq!(orders, (1..=SEED_JOB_COUNT as i64).collect::<Vec<_>>());
        assert!(jobs.iter().all(|j| (1..=4).contains(&j.tags.len())));
        assert_eq!(jobs[0].title, "Senior Frontend Developer II");
        assert_eq!(jobs[0].slug, "senior-frontend-developer-ii-1");
    }

    #[test]
    fn sample_candidates_reference_existing_jobs() {
        let candidates = sample_candidates(SEED_JOB_COUNT as i64);
        assert_eq!(candidates.len(), SEED_CANDIDATE_COUNT);
        assert!(candidates
            .iter()
            .all(|c| (1..=SEED_JOB_COUNT as i64).contains(&c.job_id)));
        assert!(candidates[41].email.ends_with("42@example.com"));
    }

    #[test]
    fn second_seed_is_a_no_op() {
        let service = SeedService::new(Store::in_memory());
        let first = tokio_test::block_on(service.seed_if_empty());
        let first = tokio_test::assert_ok!(first);
        assert!(first.seeded);

        let second = tokio_test::assert_ok!(tokio_test::block_on(service.seed_if_empty()));
        assert!(!second.seeded);
        assert_eq!(second.jobs, SEED_JOB_COUNT);
        assert_eq!(second.candidates, SEED_CANDIDATE_COUNT);
        assert_eq!(second.assessments, SEED_ASSESSMENT_COUNT);
    }

    #[test]
    fn sample_assessment_hides_location_behind_relocation() {
        let assessment = sample_assessment(2);
        assert_eq!(assessment.questions().count(), 9);
        assert_eq!(assessment.conditions.len(), 1);
        assert_eq!(assessment.conditions[0].show, vec!["q7".to_string()]);
    }
}
