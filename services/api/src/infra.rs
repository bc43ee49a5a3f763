use aurelian::analytics::{AnalyticsSink, ConsoleSink, EventTracker};
use aurelian::catalog::PortfolioCatalog;
use aurelian::config::AppEnvironment;
use aurelian::engagement::notify::LogNotifier;
use aurelian::engagement::{
    ConciergeGateway, EngagementService, InquiryError, InquiryRecord, ScriptedRecommender,
    SimulatedVerifier, VaultAccess,
};
use aurelian::seo::SchemaGenerator;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Stand-in latencies for the simulated backends. A real CRM or credential
/// service replaces the sleeps along with the gateways.
pub(crate) const INQUIRY_LATENCY: Duration = Duration::from_millis(1000);
pub(crate) const NEWSLETTER_LATENCY: Duration = Duration::from_millis(800);
pub(crate) const VAULT_STAGE_LATENCY: Duration = Duration::from_millis(1500);
pub(crate) const ORACLE_LATENCY: Duration = Duration::from_millis(2000);

/// Concierge desk that accepts every inquiry and writes it to the log.
/// There is no real CRM behind this build.
#[derive(Debug, Default, Clone)]
pub(crate) struct SimulatedConciergeDesk;

impl ConciergeGateway for SimulatedConciergeDesk {
    fn submit_inquiry(&self, record: InquiryRecord) -> Result<(), InquiryError> {
        let payload = serde_json::to_string(&record)
            .map_err(|err| InquiryError::Unavailable(err.to_string()))?;
        tracing::info!(target: "concierge", %payload, "inquiry received");
        Ok(())
    }
}

pub(crate) type ApiEngagementService = EngagementService<SimulatedConciergeDesk, LogNotifier>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) environment: AppEnvironment,
    pub(crate) base_url: Arc<str>,
    pub(crate) catalog: Arc<PortfolioCatalog>,
    pub(crate) schema: SchemaGenerator,
    pub(crate) tracker: EventTracker,
    pub(crate) engagement: Arc<ApiEngagementService>,
    pub(crate) vault: Arc<Mutex<VaultAccess>>,
    pub(crate) verifier: Arc<SimulatedVerifier>,
    pub(crate) recommender: Arc<ScriptedRecommender>,
    pub(crate) notifier: Arc<LogNotifier>,
}

impl AppState {
    pub(crate) fn new(
        environment: AppEnvironment,
        base_url: &str,
        metrics: Arc<PrometheusHandle>,
        readiness: Arc<AtomicBool>,
    ) -> Self {
        Self::with_sink(
            environment,
            base_url,
            metrics,
            readiness,
            Arc::new(ConsoleSink),
        )
    }

    pub(crate) fn with_sink(
        environment: AppEnvironment,
        base_url: &str,
        metrics: Arc<PrometheusHandle>,
        readiness: Arc<AtomicBool>,
        sink: Arc<dyn AnalyticsSink>,
    ) -> Self {
        let tracker = EventTracker::new(sink);
        let notifier = Arc::new(LogNotifier);
        let engagement = Arc::new(EngagementService::new(
            Arc::new(SimulatedConciergeDesk),
            notifier.clone(),
            tracker.clone(),
        ));

        Self {
            readiness,
            metrics,
            environment,
            base_url: Arc::from(base_url),
            catalog: Arc::new(PortfolioCatalog::standard()),
            schema: SchemaGenerator::new(base_url),
            tracker,
            engagement,
            vault: Arc::new(Mutex::new(VaultAccess::new())),
            verifier: Arc::new(SimulatedVerifier),
            recommender: Arc::new(ScriptedRecommender),
            notifier,
        }
    }
}
