pub use broccoli_queue::{
    brokers::broker::BrokerMessage, error::BroccoliError, queue::BroccoliQueue,
};
use common::StorageEvent;
use tracing::{debug, info};

use crate::error::MqError;

pub type MqQueue = BroccoliQueue;

pub struct MqConfig {
    pub url: String,
    pub pool_size: u8,
}

pub async fn init_mq(config: MqConfig) -> Result<MqQueue, MqError> {
    let queue = BroccoliQueue::builder(&config.url)
        .pool_connections(config.pool_size)
        .build()
        .await
        .map_err(|e| MqError::Connection(e.to_string()))?;
    info!(pool_size = config.pool_size, "Connected to message broker");
    Ok(queue)
}

/// Publish a storage event, as the blob store notifier does.
pub async fn publish_storage_event(
    mq: &MqQueue,
    queue_name: &str,
    event: &StorageEvent,
) -> Result<(), MqError> {
    debug!(queue = queue_name, %event, "Publishing storage event");
    mq.publish(queue_name, None, event, None)
        .await
        .map(|_| ())
        .map_err(|e| MqError::Publish {
            queue: queue_name.to_string(),
            message: e.to_string(),
        })
}
