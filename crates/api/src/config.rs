//! Process configuration, read from environment variables at startup.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen address (`PACKTRACK_ADDR`).
    pub addr: String,
    /// Root of the JSON document stores (`PACKTRACK_DATA_DIR`).
    pub data_dir: PathBuf,
    /// Directory for uploaded packing videos (`PACKTRACK_UPLOAD_DIR`).
    pub upload_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let addr =
            std::env::var("PACKTRACK_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let data_dir = PathBuf::from(
            std::env::var("PACKTRACK_DATA_DIR").unwrap_or_else(|_| "./data".to_string()),
        );
        let upload_dir = std::env::var("PACKTRACK_UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("uploads"));

        Self {
            addr,
            data_dir,
            upload_dir,
        }
    }
}
