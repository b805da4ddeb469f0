use crate::models::AppData;
use std::{
    path::PathBuf,
    sync::Arc,
    time::Instant,
};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
    /// Last time the page pinged `/heartbeat`; the watchdog in `main` reads
    /// this to shut down once the browser window closes.
    pub last_heartbeat: Arc<Mutex<Instant>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: AppData) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            last_heartbeat: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub async fn touch_heartbeat(&self) {
        *self.last_heartbeat.lock().await = Instant::now();
    }

    pub async fn heartbeat_age(&self) -> std::time::Duration {
        self.last_heartbeat.lock().await.elapsed()
    }
}
