/// Liveness probe for the hosting tier.
pub async fn healthz() -> &'static str {
    "ok"
}
