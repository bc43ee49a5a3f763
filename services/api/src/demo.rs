use aurelian::analytics::{EventTracker, RecordingSink};
use aurelian::catalog::PortfolioCatalog;
use aurelian::config::AppConfig;
use aurelian::engagement::notify::RecordingNotifier;
use aurelian::engagement::{
    AccessDenied, AccessVerifier, EngagementService, NewsletterForm, OracleConsultation,
    PrivateAccessForm, ScriptedRecommender, SimulatedVerifier, VaultAccess,
};
use aurelian::error::AppError;
use aurelian::seo::{sitemap, sitemap_entries, RobotsPolicy, SchemaGenerator};
use chrono::Local;
use clap::Args;
use std::sync::Arc;

use crate::infra::SimulatedConciergeDesk;

#[derive(Args, Debug, Default)]
pub(crate) struct SeoArgs {
    /// Override the configured base URL for the artifact
    #[arg(long)]
    pub(crate) base_url: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum SeoArtifact {
    Sitemap,
    Robots,
    StructuredData,
}

pub(crate) fn run_seo(artifact: SeoArtifact, args: SeoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let base_url = args.base_url.unwrap_or(config.site.base_url);
    let catalog = PortfolioCatalog::standard();

    match artifact {
        SeoArtifact::Sitemap => {
            let entries = sitemap_entries(&base_url, &catalog, Local::now().date_naive());
            print!("{}", sitemap::render_xml(&entries));
        }
        SeoArtifact::Robots => {
            print!("{}", RobotsPolicy::standard(&base_url).render());
        }
        SeoArtifact::StructuredData => {
            let generator = SchemaGenerator::new(&base_url);
            let data = generator.structured_data(&catalog);
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
    }

    Ok(())
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Property to attach to the private access inquiry
    #[arg(long)]
    pub(crate) property: Option<String>,
    /// Skip the vault access portion of the demo
    #[arg(long)]
    pub(crate) skip_vault: bool,
}

struct MisreadScanner;

impl AccessVerifier for MisreadScanner {
    fn scan(&self) -> Result<(), AccessDenied> {
        Err(AccessDenied::new("biometric signature not recognized"))
    }

    fn confirm(&self) -> Result<(), AccessDenied> {
        Ok(())
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let notifier = Arc::new(RecordingNotifier::default());
    let sink = RecordingSink::default();
    let tracker = EventTracker::new(Arc::new(sink.clone()));
    let service = EngagementService::new(
        Arc::new(SimulatedConciergeDesk),
        notifier.clone(),
        tracker,
    );

    println!("=== Private access: unqualified submission ===");
    let mut form = PrivateAccessForm::new();
    form.email = "not-an-email".to_string();
    form.phone = "123".to_string();
    service.submit_private_access(&mut form, args.property.as_deref());
    for (field, message) in form.errors() {
        println!("  {field:?}: {message}");
    }

    println!("\n=== Private access: qualified submission ===");
    let mut form = PrivateAccessForm::new();
    form.name = "Jane Doe".to_string();
    form.email = "jane@x.com".to_string();
    form.phone = "+1 212 555 0100".to_string();
    form.investment_capacity = "$10M - $50M".to_string();
    form.toggle_location("London");
    let outcome = service.submit_private_access(&mut form, args.property.as_deref());
    println!("  outcome: {outcome:?}, phase: {:?}", form.phase());

    println!("\n=== Newsletter signup ===");
    let mut newsletter = NewsletterForm::new();
    newsletter.email = "jane@x.com".to_string();
    let outcome = service.subscribe_newsletter(&mut newsletter);
    println!("  outcome: {outcome:?}");

    println!("\n=== Oracle consultation ===");
    let mut consultation = OracleConsultation::new();
    consultation.select_location("Monaco");
    consultation.select_lifestyle("Dock my Superyacht");
    consultation.consult(&ScriptedRecommender);
    println!("  {}", consultation.tagline());
    for recommendation in consultation.results() {
        println!(
            "  {} · {} · {}",
            recommendation.name, recommendation.location, recommendation.price
        );
    }

    if !args.skip_vault {
        println!("\n=== Vault gate ===");
        let mut vault = VaultAccess::new();
        let denied = vault.request_access(&MisreadScanner, notifier.as_ref());
        println!("  first attempt: {denied:?} (level {})", vault.level().as_u8());
        let granted = vault.request_access(&SimulatedVerifier, notifier.as_ref());
        println!("  second attempt: {granted:?} (level {})", vault.level().as_u8());
        vault.lock();
        println!("  relocked: level {}", vault.level().as_u8());
    }

    println!("\n=== Notices ===");
    for notice in notifier.notices() {
        println!("  [{:?}] {} — {}", notice.tone, notice.title, notice.description);
    }

    println!("\n=== Analytics events ===");
    for event in sink.events() {
        println!("{}", serde_json::to_string(&event)?);
    }

    Ok(())
}
