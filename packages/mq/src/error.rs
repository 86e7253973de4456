use thiserror::Error;

#[derive(Debug, Error)]
pub enum MqError {
    #[error("Failed to connect to broker: {0}")]
    Connection(String),

    #[error("Failed to publish to '{queue}': {message}")]
    Publish { queue: String, message: String },
}
