use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use rand::Rng;

use crate::config::Config;
use crate::error::Error;

/// Decides how long a mocked call takes and whether it fails.
pub trait FaultPolicy: Send + Sync {
    fn latency(&self) -> Duration;

    fn should_fail(&self, failure_rate: f64) -> bool;
}

/// Uniform latency in `[min, max]` and failures drawn against the route's rate.
#[derive(Debug, Clone)]
pub struct RandomFaults {
    min: Duration,
    max: Duration,
}

impl RandomFaults {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self {
            min: min.min(max),
            max: max.max(min),
        }
    }
}

impl FaultPolicy for RandomFaults {
    fn latency(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..=self.max)
    }

    fn should_fail(&self, failure_rate: f64) -> bool {
        failure_rate > 0.0 && rand::thread_rng().gen_bool(failure_rate.clamp(0.0, 1.0))
    }
}

/// Zero delay, never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFaults;

impl FaultPolicy for NoFaults {
    fn latency(&self) -> Duration {
        Duration::ZERO
    }

    fn should_fail(&self, _failure_rate: f64) -> bool {
        false
    }
}

#[derive(Clone)]
pub struct FaultSettings {
    pub policy: Arc<dyn FaultPolicy>,
    pub failure_rate: f64,
    pub reorder_failure_rate: f64,
}

impl FaultSettings {
    pub fn from_config(config: &Config) -> Self {
        if !config.fault_injection {
            return Self::disabled();
        }
        Self {
            policy: Arc::new(RandomFaults::new(
                Duration::from_millis(config.latency_min_ms),
                Duration::from_millis(config.latency_max_ms),
            )),
            failure_rate: config.failure_rate,
            reorder_failure_rate: config.reorder_failure_rate,
        }
    }

    pub fn disabled() -> Self {
        Self::with_policy(Arc::new(NoFaults))
    }

    pub fn with_policy(policy: Arc<dyn FaultPolicy>) -> Self {
        Self {
            policy,
            failure_rate: 0.1,
            reorder_failure_rate: 0.15,
        }
    }
}

#[derive(Clone)]
pub struct FaultInjector {
    policy: Arc<dyn FaultPolicy>,
    failure_rate: f64,
}

pub async fn fault_middleware(
    State(state): State<FaultInjector>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let delay = state.policy.latency();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    if state.policy.should_fail(state.failure_rate) {
        tracing::warn!(
            method = %req.method(),
            path = %req.uri().path(),
            "injected transient failure"
        );
        return Error::TransientServer("Random failure to test rollback".to_string())
            .into_response();
    }
    next.run(req).await
}

pub fn new_fault_state(policy: Arc<dyn FaultPolicy>, failure_rate: f64) -> FaultInjector {
    FaultInjector {
        policy,
        failure_rate,
    }
}
