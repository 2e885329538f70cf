pub mod assessment_rules;
pub mod assessment_service;
pub mod candidate_service;
pub mod job_service;
pub mod seed_service;
