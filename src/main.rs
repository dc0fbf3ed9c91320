//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use dotenv::dotenv;
use mentra_sphere::adapters::ai::{MockAiAdapter, OpenAiAdapter};
use mentra_sphere::adapters::documents::MarkdownBriefWriter;
use mentra_sphere::adapters::integrations::{EmailWebhookNotifier, LogNotifier};
use mentra_sphere::adapters::payment::SimulatedPayment;
use mentra_sphere::adapters::ui::tui::TuiInputPort;
use mentra_sphere::domain::{Matcher, Roster};
use mentra_sphere::ports::{AiPort, BriefWriterPort, InputPort, NotifierPort, PaymentPort};
use mentra_sphere::shared::config::AppConfig;
use mentra_sphere::usecases::{CheckoutService, IntakeService, MatchService};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    // Prompts own the terminal; keep logs quiet unless RUST_LOG asks for more.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!("no .env found"),
    }

    let cfg = AppConfig::load().map_err(|e| anyhow::anyhow!("{}", e))?;
    cfg.validate().map_err(|e| anyhow::anyhow!("{}", e))?;

    // --- Roster & matcher ---
    let roster = match cfg.roster_path.as_deref() {
        Some(path) => Roster::load(&PathBuf::from(path))
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?,
        None => Roster::builtin(),
    };
    info!(peers = roster.len(), "roster ready");
    let matcher = Arc::new(Matcher::new(roster));

    // --- AI ---
    let ai: Arc<dyn AiPort> = if cfg.is_ai_configured() {
        info!(
            model = %cfg.ai_model_or_default(),
            url = %cfg.ai_api_url_or_default(),
            "AI companion enabled with OpenAI adapter"
        );
        Arc::new(OpenAiAdapter::new(
            cfg.ai_api_url_or_default(),
            cfg.ai_api_key().unwrap_or_default(),
            cfg.ai_model_or_default(),
        ))
    } else {
        warn!("MENTRA_AI_API_KEY not set, using mock AI adapter");
        Arc::new(MockAiAdapter::new())
    };

    // --- Checkout collaborators ---
    let payment: Arc<dyn PaymentPort> =
        Arc::new(SimulatedPayment::new(cfg.payment_delay_ms_or_default()));
    let notifier: Arc<dyn NotifierPort> = match cfg.notify_webhook_url() {
        Some(url) => {
            info!(url = %url, "welcome letters go to e-mail relay");
            Arc::new(EmailWebhookNotifier::new(url))
        }
        None => Arc::new(LogNotifier::new()),
    };
    let briefs: Arc<dyn BriefWriterPort> =
        Arc::new(MarkdownBriefWriter::new(cfg.briefs_dir_or_default()));

    // --- Services ---
    let intake_service = Arc::new(IntakeService::new(Arc::clone(&ai)));
    let match_service = Arc::new(MatchService::new(matcher));
    let checkout_service = Arc::new(CheckoutService::new(
        payment,
        ai,
        notifier,
        briefs,
        cfg.price_cents_or_default(),
    ));

    mentra_sphere::adapters::ui::init_ui();

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        intake_service,
        match_service,
        checkout_service,
    ));

    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
