use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use jobline::bot::BotService;
use jobline::catalog::JobCatalog;
use jobline::config::BotConfig;
use jobline::formatter::{RandomScore, ScoreSource};
use jobline::line::LineClient;
use jobline::store::{LibSqlBackend, UserStore};
use jobline::webhook::webhook_routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = BotConfig::from_env().context("Failed to load configuration")?;

    // Console logging always; a daily rolling file when a log dir is set.
    let (file_layer, _log_guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "jobline.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_target(false))
        .with(file_layer)
        .init();

    eprintln!("💼 Jobline v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Mode: {}", config.mode);
    eprintln!("   Webhook: http://0.0.0.0:{}/callback", config.port);

    // ── Job catalog ───────────────────────────────────────────────────────
    let catalog = Arc::new(JobCatalog::load(&config.jobs_path)?);
    eprintln!(
        "   Catalog: {} ({} jobs)",
        config.jobs_path.display(),
        catalog.len()
    );

    // ── Database ─────────────────────────────────────────────────────────
    let store: Arc<dyn UserStore> = Arc::new(
        LibSqlBackend::new_local(&config.db_path)
            .await
            .with_context(|| format!("Failed to open database at {}", config.db_path.display()))?,
    );
    let users = store.count_users().await?;
    eprintln!("   Database: {} ({users} users)", config.db_path.display());

    // ── LINE ─────────────────────────────────────────────────────────────
    let messaging = Arc::new(LineClient::new(config.channel_access_token)?);

    let scores: Arc<dyn ScoreSource> = match config.score_seed {
        Some(seed) => Arc::new(RandomScore::seeded(seed)),
        None => Arc::new(RandomScore::from_entropy()),
    };

    let bot = BotService::new(config.mode, store, catalog, messaging)
        .with_scores(scores)
        .with_public_url(config.public_url);

    let app = webhook_routes(Arc::new(bot), config.channel_secret);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .with_context(|| format!("Failed to bind port {}", config.port))?;
    tracing::info!(port = config.port, mode = %config.mode, "Webhook server started");

    axum::serve(listener, app).await?;
    Ok(())
}
