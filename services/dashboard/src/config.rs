use std::path::PathBuf;

use anyhow::Result;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub results_dir: PathBuf,
    pub bind_addr: String,
    pub allowed_origins: Vec<String>,
    /// Auto inspection is gated on the model API key being configured even
    /// though the judgment logic itself is algorithmic.
    pub auto_inspect_enabled: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let data_dir = std::env::var("DATA_DIR")
            .unwrap_or_else(|_| "data/final".to_string())
            .into();
        let results_dir = std::env::var("INSPECTION_DIR")
            .unwrap_or_else(|_| "inspection_results".to_string())
            .into();
        let bind_addr = std::env::var("DASHBOARD_BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8000".to_string());

        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let auto_inspect_enabled = std::env::var("OPENAI_API_KEY")
            .map(|v| !v.is_empty())
            .unwrap_or(false);

        Ok(Self {
            data_dir,
            results_dir,
            bind_addr,
            allowed_origins,
            auto_inspect_enabled,
        })
    }
}
