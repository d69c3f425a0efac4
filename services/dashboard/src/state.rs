use std::sync::Arc;

use inspection::{DatasetStore, InspectionStore};

use crate::config::AppConfig;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub datasets: DatasetStore,
    pub store: InspectionStore,
    pub cfg: AppConfig,
}

impl AppState {
    pub fn new(cfg: AppConfig) -> anyhow::Result<Self> {
        let datasets = DatasetStore::new(&cfg.data_dir);
        let store = InspectionStore::new(&cfg.results_dir)?;
        Ok(Self {
            datasets,
            store,
            cfg,
        })
    }
}
