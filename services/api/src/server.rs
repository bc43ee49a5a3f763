use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::router;
use aurelian::config::AppConfig;
use aurelian::error::AppError;
use aurelian::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
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
    let app_state = AppState::new(
        config.environment,
        &config.site.base_url,
        Arc::new(prometheus_handle),
        readiness_flag.clone(),
    );

    let app = router()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        base_url = %config.site.base_url,
        "aurelian estates site service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
