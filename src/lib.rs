pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod mock_server;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod utils;

use crate::middleware::fault_injection::FaultSettings;
use crate::services::{
    assessment_service::AssessmentService, candidate_service::CandidateService,
    job_service::JobService, seed_service::SeedService,
};
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub faults: FaultSettings,
    pub job_service: JobService,
    pub candidate_service: CandidateService,
    pub assessment_service: AssessmentService,
    pub seed_service: SeedService,
}

impl AppState {
    pub fn new(store: Store, faults: FaultSettings) -> Self {
        let job_service = JobService::new(store.clone());
        let candidate_service = CandidateService::new(store.clone());
        let assessment_service = AssessmentService::new(store.clone());
        let seed_service = SeedService::new(store.clone());

        Self {
            store,
            faults,
            job_service,
            candidate_service,
            assessment_service,
            seed_service,
        }
    }
}
