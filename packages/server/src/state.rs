use std::sync::Arc;

use common::store::{RecordSource, RecordStore};

use crate::config::AppConfig;
use crate::render::ShellTemplate;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    /// Live record store behind the listing API.
    pub store: Arc<dyn RecordStore>,
    /// Where page renders look work items up: the static snapshot, or the
    /// live store when `render.live_lookup` is set.
    pub pages: Arc<dyn RecordSource>,
    pub shell: Arc<ShellTemplate>,
}
