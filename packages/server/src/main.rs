use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use common::store::RecordSource;
use folio_server::config::AppConfig;
use folio_server::consumers::{EventContext, build_signer, consume_storage_events};
use folio_server::database::init_db;
use folio_server::render::ShellTemplate;
use folio_server::snapshot::Snapshot;
use folio_server::state::AppState;
use folio_server::store::DbRecordStore;
use mq::{MqConfig, init_mq};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("Failed to load config")?;

    let db = init_db(&config.database)
        .await
        .context("Failed to initialize database")?;
    let store = Arc::new(DbRecordStore::new(db));

    let pages: Arc<dyn RecordSource> = if config.render.live_lookup {
        info!("Page renders read the live record store");
        store.clone()
    } else {
        let snapshot = Snapshot::load(config.render.snapshot_path.as_deref())
            .context("Failed to load render snapshot")?;
        info!(
            categories = snapshot.category_names().count(),
            "Page renders read the static snapshot"
        );
        Arc::new(snapshot)
    };
    let shell = ShellTemplate::load(config.render.template_path.as_deref())
        .context("Failed to load shell template")?;

    if config.mq.enabled {
        let signer = build_signer(&config.storage).context("Failed to configure URL signer")?;
        let mq = Arc::new(
            init_mq(MqConfig {
                url: config.mq.url.clone(),
                pool_size: config.mq.pool_size,
            })
            .await
            .context("Failed to initialize MQ")?,
        );

        let ctx = EventContext {
            store: store.clone(),
            signer,
            url_expiry: config.storage.url_expiry(),
        };
        tokio::spawn(consume_storage_events(
            ctx,
            mq,
            config.mq.queue_name.clone(),
            config.mq.concurrency,
        ));
    } else {
        warn!("MQ disabled, storage events will not be recorded");
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let state = AppState {
        config,
        store,
        pages,
        shell: Arc::new(shell),
    };
    let app = folio_server::build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
