use std::sync::Arc;

use axum::http::Method;
use talentflow_mock::{
    config::{get_config, init_config, LogFormat},
    error::ApiFault,
    middleware::fault_injection::FaultSettings,
    mock_server::{MockRequest, MockServer},
    store::{FileStore, Store},
    AppState,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_config()?;
    let config = get_config();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }

    let mut backend = FileStore::open(&config.store_dir).await?;
    if let Some(quota) = config.store_quota_bytes {
        backend = backend.with_quota(quota);
    }
    let store = Store::new(Arc::new(backend));
    let app_state = AppState::new(store, FaultSettings::from_config(config));

    let report = app_state.seed_service.seed_if_empty().await?;
    info!(
        seeded = report.seeded,
        jobs = report.jobs,
        candidates = report.candidates,
        "store ready"
    );

    let server = MockServer::new(app_state);
    info!("Mock API ready, reading `METHOD PATH [JSON]` lines from stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let request = match parse_line(line) {
            Ok(request) => request,
            Err(e) => {
                eprintln!("error: {}", e);
                continue;
            }
        };
        match server.handle(request).await {
            Ok(response) => {
                println!("{}", response.status);
                println!("{}", serde_json::to_string_pretty(&response.body)?);
            }
            Err(fault) => report_fault(fault)?,
        }
    }

    Ok(())
}

/// Prints a per-request fault and keeps going; a storage fault ends the session.
fn report_fault(fault: ApiFault) -> anyhow::Result<()> {
    if fault.is_storage() {
        error!(error = %fault, "store failed, stopping");
        return Err(fault.into());
    }
    eprintln!("fault: {}", fault);
    Ok(())
}

fn parse_line(line: &str) -> anyhow::Result<MockRequest> {
    let mut parts = line.splitn(3, char::is_whitespace);
    let method = parts.next().unwrap_or_default();
    let path = parts
        .next()
        .ok_or_else(|| anyhow::anyhow!("expected `METHOD PATH [JSON]`"))?;
    let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())?;

    let mut request = MockRequest::new(method, path);
    if let Some(raw) = parts.next().map(str::trim).filter(|s| !s.is_empty()) {
        request = request.with_body(serde_json::from_str(raw)?);
    }
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_faults_end_the_session() {
        let err = report_fault(ApiFault::Storage("disk full".into())).unwrap_err();
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn request_faults_are_reported_and_skipped() {
        let unmatched = ApiFault::Unmatched {
            method: "GET".into(),
            path: "/users".into(),
        };
        assert!(report_fault(unmatched).is_ok());
        assert!(report_fault(ApiFault::Body("eof".into())).is_ok());
    }

    #[test]
    fn parses_method_path_and_body() {
        let request = parse_line(r#"patch /jobs/3 {"title": "x"}"#).unwrap();
        assert_eq!(request.method, Method::PATCH);
        assert_eq!(request.uri, "/jobs/3");
        assert_eq!(request.body, Some(serde_json::json!({ "title": "x" })));
        assert!(parse_line("GET").is_err());
    }
}
