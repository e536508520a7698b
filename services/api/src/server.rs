use crate::cli::ServeArgs;
use crate::infra::{load_directory, AppState, InMemorySubmissionStore, TracingNotifier};
use crate::routes::with_tracker_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use mythos_tracker::config::AppConfig;
use mythos_tracker::error::AppError;
use mythos_tracker::telemetry;
use mythos_tracker::tracker::{TrackerConfig, TrackerService};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(InMemorySubmissionStore::default());
    let notifier = Arc::new(TracingNotifier);
    let directory = load_directory(&config.program)?;
    let tracker_config = TrackerConfig {
        verification_enabled: config.program.verification_enabled,
        ..TrackerConfig::default()
    };
    let service = Arc::new(TrackerService::new(
        tracker_config,
        store,
        notifier,
        directory,
    ));

    let app = with_tracker_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        verification = config.program.verification_enabled,
        "reading tracker ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
