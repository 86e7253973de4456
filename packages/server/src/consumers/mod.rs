pub mod delete;
pub mod ingest;

pub use delete::{DeletionOutcome, delete_url};
pub use ingest::{IngestOutcome, SkipReason, record_url};

use std::sync::Arc;
use std::time::Duration;

use common::StorageEvent;
use common::config::{SigningBackend, StorageConfig};
use common::storage::presign::S3UrlSigner;
use common::storage::public::PublicUrlSigner;
use common::storage::{SignError, UrlSigner};
use common::store::{RecordStore, StoreError};
use mq::{BroccoliError, BrokerMessage, Mq};
use thiserror::Error;
use tracing::{error, info};

/// Failure of a storage event handler. Skipped events are not failures.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("failed to obtain read URL for '{path}': {source}")]
    Sign {
        path: String,
        #[source]
        source: SignError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Dependencies shared by the storage event handlers.
#[derive(Clone)]
pub struct EventContext {
    pub store: Arc<dyn RecordStore>,
    pub signer: Arc<dyn UrlSigner>,
    /// Lifetime requested for every issued read URL.
    pub url_expiry: Duration,
}

/// Pick the URL signer named by `storage.backend`.
pub fn build_signer(config: &StorageConfig) -> Result<Arc<dyn UrlSigner>, SignError> {
    match config.backend {
        SigningBackend::S3 => Ok(Arc::new(S3UrlSigner::from_config(config)?)),
        SigningBackend::Public => {
            let base_url = config.public_base_url.as_deref().ok_or_else(|| {
                SignError::Config("public backend requires storage.public_base_url".into())
            })?;
            Ok(Arc::new(PublicUrlSigner::new(base_url)))
        }
    }
}

/// Route one storage event to its handler.
pub async fn handle_storage_event(
    ctx: &EventContext,
    event: StorageEvent,
) -> Result<(), HandlerError> {
    match event {
        StorageEvent::Finalized(object) => record_url(ctx, &object).await.map(|_| ()),
        StorageEvent::Deleted(object) => delete_url(ctx.store.as_ref(), &object).await.map(|_| ()),
    }
}

/// Consume storage events from the blob store notification queue.
///
/// A failed event is reported back to the queue, whose retry policy decides
/// what happens next.
pub async fn consume_storage_events(
    ctx: EventContext,
    mq: Arc<Mq>,
    queue_name: String,
    concurrency: usize,
) {
    info!(queue = %queue_name, concurrency, "Starting storage event consumer");

    let result = mq
        .process_messages(
            &queue_name,
            Some(concurrency),
            None,
            move |message: BrokerMessage<StorageEvent>| {
                let ctx = ctx.clone();
                async move {
                    let event = message.payload;
                    let topic = event.topic();
                    let object = event.object_name().to_string();

                    if let Err(e) = handle_storage_event(&ctx, event).await {
                        error!(
                            topic,
                            object = %object,
                            error = %e,
                            "Failed to handle storage event"
                        );
                        return Err(BroccoliError::Job(e.to_string()));
                    }
                    Ok(())
                }
            },
        )
        .await;

    if let Err(e) = result {
        error!(error = %e, "Storage event consumer stopped unexpectedly");
    }
}
