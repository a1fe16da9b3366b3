use paisa_client::api::{ApiError, PaisaApi};
use paisa_client::board::SlotBoard;
use paisa_client::config::KioskConfig;
use paisa_client::feed::{Feed, FetchState};
use paisa_client::source::AdSource;
use paisa_core::ads::Ad;
use paisa_core::slots::{classify_all, SlotLayout};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paisa_kiosk=info,paisa_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = KioskConfig::from_env();
    tracing::info!(
        backend = %config.backend_url,
        page_type = %config.page_type,
        max_ads = config.max_ads,
        autoplay_ms = config.autoplay.as_millis() as u64,
        refresh_secs = config.refresh.as_secs(),
        "Loaded kiosk configuration"
    );

    let api = PaisaApi::with_client(
        reqwest::Client::new(),
        &config.backend_url,
        config.image_base_url.as_deref(),
    )
    .expect("PAISA_BACKEND_URL must be a valid http(s) URL");

    let mut board = SlotBoard::new(config.max_ads, config.autoplay);
    let mut feed: Feed<Ad> = Feed::new();

    // Fetches run on their own task so carousels keep reporting meanwhile.
    let (fetched_tx, mut fetched_rx) = mpsc::channel::<Result<Vec<Ad>, ApiError>>(1);

    let mut refresh = tokio::time::interval(config.refresh);
    let mut report = tokio::time::interval(config.autoplay);
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            () = &mut shutdown => break,
            _ = refresh.tick() => {
                if feed.state().is_loading() {
                    tracing::debug!("Previous refresh still in flight");
                    continue;
                }
                let query = feed.begin(config.query.clone());
                let api = api.clone();
                let fetched = fetched_tx.clone();
                tokio::spawn(async move {
                    let result = api.slotted_ads_today(&query).await;
                    // The receiver only closes on shutdown.
                    let _ = fetched.send(result).await;
                });
            }
            Some(result) = fetched_rx.recv() => {
                match feed.finish(result) {
                    FetchState::Ready(ads) => {
                        let layout = classify_all(ads, Some(config.page_type));
                        tracing::info!(ads = ads.len(), slots = layout.len(), "Fetched today's ads");
                        board.apply(layout, &mut rand::rng()).await;
                    }
                    FetchState::Empty => {
                        tracing::info!("No ads available today");
                        board.apply(SlotLayout::default(), &mut rand::rng()).await;
                    }
                    FetchState::Failed { message, retryable } => {
                        tracing::warn!(
                            error = %message,
                            retryable,
                            "Keeping current slots until the next refresh"
                        );
                    }
                    FetchState::Idle | FetchState::Loading => {}
                }
            }
            _ = report.tick() => {
                if board.is_empty() {
                    tracing::debug!("Board empty, showing sample placeholders");
                    continue;
                }
                for view in board.snapshot().await {
                    let image = view
                        .media
                        .as_ref()
                        .and_then(|media| media.image.file_name())
                        .map(|name| api.image_url(name));
                    tracing::info!(
                        slot = %view.key,
                        cursor = view.cursor,
                        pool = view.pool_size,
                        ad = view.current.as_ref().map(Ad::id).unwrap_or("-"),
                        image = image.as_deref().unwrap_or("placeholder"),
                        "Slot showing"
                    );
                }
            }
        }
    }

    tracing::info!("Stopping slot carousels");
    board.shutdown().await;
    tracing::info!("Kiosk stopped");
}

/// Wait for SIGINT or (on Unix) SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT (Ctrl-C), shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
