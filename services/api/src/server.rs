use crate::cli::ServeArgs;
use crate::infra::{AppState, DashboardState};
use crate::monitor::refresh_dashboard;
use crate::routes::with_dashboard_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use kitchen_compliance::config::AppConfig;
use kitchen_compliance::error::AppError;
use kitchen_compliance::telemetry;
use kitchen_compliance::workflows::dashboard::ComplianceAggregator;
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

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let dashboard =
        DashboardState::in_memory(ComplianceAggregator::new(config.dashboard.risk_policy));
    tokio::spawn(refresh_dashboard(
        dashboard.clone(),
        config.dashboard.refresh_interval,
    ));

    let app = with_dashboard_routes(dashboard)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        max_temperature_violations = config.dashboard.risk_policy.max_temperature_violations,
        minimum_compliance_percent = config.dashboard.risk_policy.minimum_compliance_percent,
        "kitchen compliance service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
