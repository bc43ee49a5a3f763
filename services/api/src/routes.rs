use crate::infra::{
    AppState, INQUIRY_LATENCY, NEWSLETTER_LATENCY, ORACLE_LATENCY, VAULT_STAGE_LATENCY,
};
use crate::pages;
use aurelian::analytics::{actions, categories, AnalyticsEvent};
use aurelian::engagement::{
    AccessVerifier, FieldErrors, NewsletterForm, OracleConsultation, PrivateAccessForm,
    Recommendation, Recommender, SubmissionOutcome, SubmitDecision, VaultAccess,
};
use aurelian::error::AppError;
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub(crate) fn router() -> Router {
    Router::new()
        .route("/", get(home_page))
        .route("/properties/obsidian-villa", get(obsidian_villa_page))
        .route("/properties/:id", get(property_page))
        .route("/the-vault", get(vault_page))
        .route("/robots.txt", get(robots_txt))
        .route("/sitemap.xml", get(sitemap_xml))
        .route("/api/v1/seo/structured-data", get(structured_data_endpoint))
        .route("/api/v1/analytics/events", post(analytics_endpoint))
        .route(
            "/api/v1/inquiries/private-access",
            post(private_access_endpoint),
        )
        .route("/api/v1/newsletter", post(newsletter_endpoint))
        .route("/api/v1/oracle/consult", post(oracle_consult_endpoint))
        .route("/api/v1/vault/access", post(vault_access_endpoint))
        .route("/api/v1/vault/lock", post(vault_lock_endpoint))
        .route("/api/v1/vault/status", get(vault_status_endpoint))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn home_page(Extension(state): Extension<AppState>) -> Response {
    state.tracker.track(
        AnalyticsEvent::new(actions::VIEW, categories::NAVIGATION).with_label("home"),
        "/",
    );

    match pages::home(&state.catalog, &state.schema) {
        Ok(html) => Html(html).into_response(),
        Err(err) => pages::recovery_response(&err.to_string(), state.environment),
    }
}

pub(crate) async fn obsidian_villa_page(Extension(state): Extension<AppState>) -> Response {
    state.tracker.track(
        AnalyticsEvent::new(actions::VIEW, categories::PROPERTY).with_label("obsidian_villa"),
        "/properties/obsidian-villa",
    );

    // The scroll story is anchored to the first portfolio entry.
    let Some(villa) = state.catalog.property(1) else {
        return AppError::UnknownProperty(1).into_response();
    };

    match pages::property_story(villa, &state.schema) {
        Ok(html) => Html(html).into_response(),
        Err(err) => pages::recovery_response(&err.to_string(), state.environment),
    }
}

pub(crate) async fn property_page(
    Extension(state): Extension<AppState>,
    Path(id): Path<u32>,
) -> Response {
    let Some(property) = state.catalog.property(id) else {
        return AppError::UnknownProperty(id).into_response();
    };

    state.tracker.track(
        AnalyticsEvent::new(actions::VIEW, categories::PROPERTY).with_label(property.name),
        &format!("/properties/{id}"),
    );

    match pages::property_story(property, &state.schema) {
        Ok(html) => Html(html).into_response(),
        Err(err) => pages::recovery_response(&err.to_string(), state.environment),
    }
}

pub(crate) async fn vault_page(Extension(state): Extension<AppState>) -> Response {
    state.tracker.track(
        AnalyticsEvent::new(actions::VIEW, categories::ENGAGEMENT).with_label("the_vault"),
        "/the-vault",
    );

    match pages::vault(&state.schema) {
        Ok(html) => Html(html).into_response(),
        Err(err) => pages::recovery_response(&err.to_string(), state.environment),
    }
}

pub(crate) async fn robots_txt(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let policy = aurelian::seo::RobotsPolicy::standard(&state.base_url);
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        policy.render(),
    )
}

pub(crate) async fn sitemap_xml(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let entries = aurelian::seo::sitemap_entries(
        &state.base_url,
        &state.catalog,
        Local::now().date_naive(),
    );
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/xml")],
        aurelian::seo::sitemap::render_xml(&entries),
    )
}

pub(crate) async fn structured_data_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<aurelian::seo::StructuredData> {
    Json(state.schema.structured_data(&state.catalog))
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnalyticsIngest {
    #[serde(flatten)]
    pub(crate) event: AnalyticsEvent,
    #[serde(default)]
    pub(crate) url: Option<String>,
}

/// Fire-and-forget by contract: the response is 202 regardless of whether
/// the event survived validation or the sink.
pub(crate) async fn analytics_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<AnalyticsIngest>,
) -> impl IntoResponse {
    let path = payload.url.unwrap_or_else(|| "/".to_string());
    state.tracker.track(payload.event, &path);
    (StatusCode::ACCEPTED, Json(json!({ "status": "accepted" })))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct PrivateAccessRequest {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) phone: String,
    pub(crate) investment_capacity: String,
    pub(crate) desired_locations: Vec<String>,
    pub(crate) property_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct FormResponse {
    pub(crate) status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) errors: Option<FieldErrors>,
}

fn form_response(outcome: SubmissionOutcome, errors: FieldErrors) -> (StatusCode, Json<FormResponse>) {
    match outcome {
        SubmissionOutcome::Accepted => (
            StatusCode::OK,
            Json(FormResponse {
                status: "received",
                message: Some("A Senior Partner will contact you within 2 hours."),
                errors: None,
            }),
        ),
        SubmissionOutcome::Rejected => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(FormResponse {
                status: "invalid",
                message: None,
                errors: Some(errors),
            }),
        ),
        SubmissionOutcome::Failed => (
            StatusCode::BAD_GATEWAY,
            Json(FormResponse {
                status: "failed",
                message: Some("Our concierge desk is unreachable. Please try again."),
                errors: None,
            }),
        ),
        SubmissionOutcome::AlreadySubmitting => (
            StatusCode::CONFLICT,
            Json(FormResponse {
                status: "already_submitting",
                message: None,
                errors: None,
            }),
        ),
    }
}

pub(crate) async fn private_access_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<PrivateAccessRequest>,
) -> (StatusCode, Json<FormResponse>) {
    let mut form = PrivateAccessForm::new();
    form.name = payload.name;
    form.email = payload.email;
    form.phone = payload.phone;
    form.investment_capacity = payload.investment_capacity;
    // Toggle semantics: duplicated selections in the payload cancel out.
    for location in &payload.desired_locations {
        form.toggle_location(location);
    }

    // Validation runs synchronously; only a validated submission pays the
    // simulated request latency.
    let outcome = match form.submit() {
        SubmitDecision::AlreadySubmitting => SubmissionOutcome::AlreadySubmitting,
        SubmitDecision::Invalid => SubmissionOutcome::Rejected,
        SubmitDecision::ReadyToDeliver(inquiry) => {
            tokio::time::sleep(INQUIRY_LATENCY).await;
            state.engagement.deliver_private_access(
                &mut form,
                inquiry,
                payload.property_name.as_deref(),
            )
        }
    };
    form_response(outcome, form.errors().clone())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct NewsletterRequest {
    pub(crate) email: String,
}

pub(crate) async fn newsletter_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<NewsletterRequest>,
) -> (StatusCode, Json<FormResponse>) {
    let mut form = NewsletterForm::new();
    form.email = payload.email;

    let outcome = match form.submit() {
        SubmitDecision::AlreadySubmitting => SubmissionOutcome::AlreadySubmitting,
        SubmitDecision::Invalid => SubmissionOutcome::Rejected,
        SubmitDecision::ReadyToDeliver(signup) => {
            tokio::time::sleep(NEWSLETTER_LATENCY).await;
            state.engagement.deliver_newsletter(&mut form, signup)
        }
    };
    let (status, Json(mut response)) = form_response(outcome, form.errors().clone());
    if outcome == SubmissionOutcome::Accepted {
        response.message = Some("You'll receive our curated insights shortly.");
    }
    (status, Json(response))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ConsultationRequest {
    pub(crate) property_type: Option<String>,
    pub(crate) location: Option<String>,
    pub(crate) lifestyle: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ConsultationResponse {
    pub(crate) status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) tagline: Option<String>,
    pub(crate) recommendations: Vec<Recommendation>,
}

/// Runs a full consultation per request. Selections default to the first
/// entry of each set, as the dialog does; values outside the sets are a
/// client error.
pub(crate) async fn oracle_consult_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ConsultationRequest>,
) -> (StatusCode, Json<ConsultationResponse>) {
    let mut consultation = OracleConsultation::new();

    let selections_valid = payload
        .property_type
        .as_deref()
        .map_or(true, |value| consultation.select_property_type(value))
        && payload
            .location
            .as_deref()
            .map_or(true, |value| consultation.select_location(value))
        && payload
            .lifestyle
            .as_deref()
            .map_or(true, |value| consultation.select_lifestyle(value));

    if !selections_valid {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ConsultationResponse {
                status: "unknown_selection",
                tagline: None,
                recommendations: Vec::new(),
            }),
        );
    }

    consultation.begin_consultation();
    tokio::time::sleep(ORACLE_LATENCY).await;
    let results = state.recommender.recommend(&consultation.query());
    consultation.complete_consultation(results);

    (
        StatusCode::OK,
        Json(ConsultationResponse {
            status: "complete",
            tagline: Some(consultation.tagline()),
            recommendations: consultation.results().to_vec(),
        }),
    )
}

#[derive(Debug, Serialize)]
pub(crate) struct VaultStatusResponse {
    pub(crate) is_unlocked: bool,
    pub(crate) is_scanning: bool,
    pub(crate) access_level: u8,
    pub(crate) label: &'static str,
}

impl VaultStatusResponse {
    fn snapshot(vault: &VaultAccess) -> Self {
        Self {
            is_unlocked: vault.is_unlocked(),
            is_scanning: vault.is_scanning(),
            access_level: vault.level().as_u8(),
            label: vault.level().label(),
        }
    }
}

/// Runs the two-stage simulated credential check. The vault mutex is not
/// held across the sleeps so status polls see the verifying state.
pub(crate) async fn vault_access_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<VaultStatusResponse> {
    let begun = {
        let mut vault = state.vault.lock().expect("vault mutex poisoned");
        vault.begin_verification()
    };

    if !begun {
        let vault = state.vault.lock().expect("vault mutex poisoned");
        return Json(VaultStatusResponse::snapshot(&vault));
    }

    tokio::time::sleep(VAULT_STAGE_LATENCY).await;
    let scanned = state.verifier.scan();

    tokio::time::sleep(VAULT_STAGE_LATENCY).await;
    let verified = scanned.and_then(|()| state.verifier.confirm());

    let mut vault = state.vault.lock().expect("vault mutex poisoned");
    vault.complete_verification(verified, state.notifier.as_ref());
    Json(VaultStatusResponse::snapshot(&vault))
}

pub(crate) async fn vault_lock_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<VaultStatusResponse> {
    let mut vault = state.vault.lock().expect("vault mutex poisoned");
    vault.lock();
    Json(VaultStatusResponse::snapshot(&vault))
}

pub(crate) async fn vault_status_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<VaultStatusResponse> {
    let vault = state.vault.lock().expect("vault mutex poisoned");
    Json(VaultStatusResponse::snapshot(&vault))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurelian::analytics::RecordingSink;
    use aurelian::config::AppEnvironment;
    use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
    use std::sync::atomic::AtomicBool;
    use std::sync::{Arc, OnceLock};

    fn metrics_handle() -> Arc<PrometheusHandle> {
        static HANDLE: OnceLock<Arc<PrometheusHandle>> = OnceLock::new();
        HANDLE
            .get_or_init(|| Arc::new(PrometheusBuilder::new().build_recorder().handle()))
            .clone()
    }

    fn test_state(sink: RecordingSink) -> AppState {
        AppState::with_sink(
            AppEnvironment::Test,
            "https://aurelian.example",
            metrics_handle(),
            Arc::new(AtomicBool::new(true)),
            Arc::new(sink),
        )
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn structured_data_covers_the_whole_catalog() {
        let state = test_state(RecordingSink::default());
        let Json(data) = structured_data_endpoint(Extension(state)).await;
        assert_eq!(data.properties.len(), 3);
        assert_eq!(data.breadcrumb.item_list_element.len(), 2);
    }

    #[tokio::test]
    async fn robots_txt_references_the_configured_sitemap() {
        let state = test_state(RecordingSink::default());
        let response = robots_txt(Extension(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_private_access_lists_every_field_error() {
        let sink = RecordingSink::default();
        let state = test_state(sink.clone());

        let payload = PrivateAccessRequest {
            email: "bad".to_string(),
            phone: "123".to_string(),
            ..PrivateAccessRequest::default()
        };

        let (status, Json(body)) = private_access_endpoint(Extension(state), Json(payload)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.status, "invalid");
        assert_eq!(body.errors.expect("errors present").len(), 5);
        assert!(sink.events().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn qualified_private_access_is_received() {
        let sink = RecordingSink::default();
        let state = test_state(sink.clone());

        let payload = PrivateAccessRequest {
            name: "Jane Doe".to_string(),
            email: "jane@x.com".to_string(),
            phone: "+1 212 555 0100".to_string(),
            investment_capacity: "$10M - $50M".to_string(),
            desired_locations: vec!["London".to_string()],
            property_name: Some("The Penthouse".to_string()),
        };

        let (status, Json(body)) = private_access_endpoint(Extension(state), Json(payload)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "received");

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event.context["property_name"], "The Penthouse");
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_submissions_skip_the_simulated_latency() {
        let state = test_state(RecordingSink::default());
        let start = tokio::time::Instant::now();

        let payload = PrivateAccessRequest {
            email: "bad".to_string(),
            phone: "123".to_string(),
            ..PrivateAccessRequest::default()
        };
        let (status, _) = private_access_endpoint(Extension(state.clone()), Json(payload)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(start.elapsed(), std::time::Duration::ZERO);

        let payload = NewsletterRequest {
            email: "not-an-email".to_string(),
        };
        let (status, _) = newsletter_endpoint(Extension(state), Json(payload)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(start.elapsed(), std::time::Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn accepted_submissions_pay_the_simulated_latency() {
        let state = test_state(RecordingSink::default());
        let start = tokio::time::Instant::now();

        let payload = PrivateAccessRequest {
            name: "Jane Doe".to_string(),
            email: "jane@x.com".to_string(),
            phone: "+1 212 555 0100".to_string(),
            investment_capacity: "$10M - $50M".to_string(),
            desired_locations: vec!["London".to_string()],
            property_name: None,
        };
        let (status, _) = private_access_endpoint(Extension(state), Json(payload)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(start.elapsed(), INQUIRY_LATENCY);
    }

    #[tokio::test]
    async fn unknown_property_page_is_not_found() {
        let state = test_state(RecordingSink::default());

        let response = property_page(Extension(state.clone()), Path(99)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = property_page(Extension(state), Path(3)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test(start_paused = true)]
    async fn oracle_consultation_replays_the_scripted_results() {
        let state = test_state(RecordingSink::default());

        let payload: ConsultationRequest = serde_json::from_value(serde_json::json!({
            "location": "Aspen",
            "lifestyle": "Raise a Dynasty"
        }))
        .expect("request deserializes");
        let (status, Json(body)) =
            oracle_consult_endpoint(Extension(state.clone()), Json(payload)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "complete");
        assert_eq!(
            body.tagline.as_deref(),
            Some("Based on your desire to Raise a Dynasty in Aspen...")
        );
        assert_eq!(body.recommendations.len(), 2);
        assert_eq!(body.recommendations[1].name, "The Cloud Deck");

        let bad: ConsultationRequest = serde_json::from_value(serde_json::json!({
            "location": "Atlantis"
        }))
        .expect("request deserializes");
        let (status, Json(body)) = oracle_consult_endpoint(Extension(state), Json(bad)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.status, "unknown_selection");
        assert!(body.recommendations.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn vault_grant_lock_cycle() {
        let state = test_state(RecordingSink::default());

        let Json(status) = vault_status_endpoint(Extension(state.clone())).await;
        assert_eq!(status.access_level, 0);

        let Json(granted) = vault_access_endpoint(Extension(state.clone())).await;
        assert_eq!(granted.access_level, 2);
        assert!(granted.is_unlocked);
        assert!(!granted.is_scanning);

        // Second request is a no-op on an open vault.
        let Json(repeat) = vault_access_endpoint(Extension(state.clone())).await;
        assert_eq!(repeat.access_level, 2);

        let Json(locked) = vault_lock_endpoint(Extension(state)).await;
        assert_eq!(locked.access_level, 0);
        assert!(!locked.is_unlocked);
    }

    #[tokio::test]
    async fn analytics_ingest_always_accepts() {
        let sink = RecordingSink::default();
        let state = test_state(sink.clone());

        let payload: AnalyticsIngest = serde_json::from_value(serde_json::json!({
            "action": "click",
            "category": "cta",
            "label": "request_access",
            "url": "/the-vault",
            "surface": "nav"
        }))
        .expect("ingest deserializes");

        let response = analytics_endpoint(Extension(state.clone()), Json(payload))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].url, "/the-vault");
        assert_eq!(events[0].event.context["surface"], "nav");

        // Invalid events are dropped, never rejected.
        let bad: AnalyticsIngest = serde_json::from_value(serde_json::json!({
            "action": "",
            "category": "cta"
        }))
        .expect("ingest deserializes");
        let response = analytics_endpoint(Extension(state), Json(bad))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(sink.events().len(), 1);
    }
}
