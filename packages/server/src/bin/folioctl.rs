//! Maintenance commands for a folio deployment.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use common::{ObjectDeleted, ObjectFinalized, StorageEvent};
use folio_server::config::AppConfig;
use folio_server::database::init_db;
use folio_server::snapshot::Snapshot;
use folio_server::store::DbRecordStore;
use mq::{MqConfig, init_mq, publish_storage_event};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "folioctl", version, about = "Maintenance commands for folio")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the render snapshot from the live record store.
    ExportSnapshot {
        /// Output file. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Publish a storage event, e.g. to replay a missed notification.
    Publish {
        #[command(subcommand)]
        event: EventArgs,
    },
}

#[derive(Subcommand)]
enum EventArgs {
    /// An object was created or overwritten.
    Finalized {
        #[arg(long)]
        bucket: String,
        /// Object path, e.g. `illustration/Sarah.jpg`.
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "image/jpeg")]
        content_type: String,
        #[arg(long, default_value = "1")]
        metageneration: String,
    },
    /// An object was deleted.
    Deleted {
        #[arg(long)]
        bucket: String,
        #[arg(long)]
        name: String,
    },
}

impl From<EventArgs> for StorageEvent {
    fn from(args: EventArgs) -> Self {
        match args {
            EventArgs::Finalized {
                bucket,
                name,
                content_type,
                metageneration,
            } => StorageEvent::Finalized(ObjectFinalized {
                bucket,
                name,
                content_type: Some(content_type),
                metageneration,
            }),
            EventArgs::Deleted { bucket, name } => {
                StorageEvent::Deleted(ObjectDeleted { bucket, name })
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so an exported snapshot on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Failed to load config")?;

    match cli.command {
        Command::ExportSnapshot { output } => export_snapshot(&config, output).await,
        Command::Publish { event } => publish(&config, event.into()).await,
    }
}

async fn export_snapshot(config: &AppConfig, output: Option<PathBuf>) -> anyhow::Result<()> {
    let db = init_db(&config.database)
        .await
        .context("Failed to initialize database")?;
    let store = DbRecordStore::new(db);

    let snapshot = Snapshot::capture(&store)
        .await
        .context("Failed to read record store")?;
    let json = snapshot.to_json_pretty()?;

    match output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(
                path = %path.display(),
                categories = snapshot.category_names().count(),
                "Snapshot written"
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

async fn publish(config: &AppConfig, event: StorageEvent) -> anyhow::Result<()> {
    let mq = init_mq(MqConfig {
        url: config.mq.url.clone(),
        pool_size: config.mq.pool_size,
    })
    .await
    .context("Failed to initialize MQ")?;

    publish_storage_event(&mq, &config.mq.queue_name, &event)
        .await
        .context("Failed to publish storage event")?;
    info!(queue = %config.mq.queue_name, %event, "Published storage event");
    Ok(())
}
