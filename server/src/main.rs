//! Musebook HTTP server.
//!
//! Conversational ticket-booking service: dialog state machine over a
//! single chat endpoint, transactional booking persistence, confirmation
//! emails, UPI payment QR codes.

use musebook_core::dialog::DialogEnvironment;
use musebook_core::environment::{SystemClock, ThreadRngIdSource};
use musebook_core::materializer::BookingMaterializer;
use musebook_core::notify::EmailDispatcher;
use musebook_server::chat::ChatService;
use musebook_server::config::Config;
use musebook_server::notify::{ConsoleEmailDispatcher, SmtpEmailDispatcher};
use musebook_server::qr::UpiPaymentCodeRenderer;
use musebook_server::routes::build_router;
use musebook_server::state::AppState;
use musebook_postgres::PostgresBookingStore;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "musebook=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Musebook HTTP server");

    let config = Config::from_env();
    info!(
        database_url = %config.database.url,
        smtp_configured = config.smtp.is_some(),
        "Configuration loaded"
    );

    info!("Connecting to booking database...");
    let store =
        PostgresBookingStore::connect(&config.database.url, config.database.max_connections)
            .await?;
    store.ensure_schema().await?;
    info!("Booking store ready");

    let mailer: Arc<dyn EmailDispatcher> = match config.smtp.clone() {
        Some(smtp) => Arc::new(SmtpEmailDispatcher::new(
            smtp.server,
            smtp.port,
            smtp.username.clone(),
            smtp.password,
            smtp.username,
            smtp.from_name,
        )),
        None => {
            warn!("Email credentials are not set; emails will be logged, not sent");
            Arc::new(ConsoleEmailDispatcher::new())
        }
    };

    let logo = config.email_logo_path.as_ref().and_then(|path| {
        std::fs::read(path).map_or_else(
            |err| {
                error!(%path, error = %err, "logo not found, sending emails without it");
                None
            },
            Some,
        )
    });

    let ids = Arc::new(ThreadRngIdSource);
    let clock = Arc::new(SystemClock);
    let renderer = Arc::new(UpiPaymentCodeRenderer::new(
        config.payment.upi_id.clone(),
        config.payment.payee_name.clone(),
    ));

    let env = DialogEnvironment::new(ids.clone(), renderer, config.museum.clone());
    let materializer = BookingMaterializer::new(
        Arc::new(store.clone()),
        mailer,
        ids,
        clock,
        config.museum.clone(),
    )
    .with_logo(logo);

    let state = AppState::new(Arc::new(ChatService::new(env, materializer)), Some(store));
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}
