use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::*;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct MasterConfig {
    pub bind: String,
    pub port: u16,
    pub config_dir: PathBuf,
    /// Backups go next to `config.yaml` unless set.
    pub backup_dir: Option<PathBuf>,
    pub logs_dir: PathBuf,
    pub static_dir: PathBuf,
    pub reverse_proxy: bool,
}

impl Default for MasterConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 5000,
            config_dir: PathBuf::from("config"),
            backup_dir: None,
            logs_dir: PathBuf::from("logs"),
            static_dir: PathBuf::from("static"),
            reverse_proxy: false,
        }
    }
}

impl SavedFile for MasterConfig {
    const PATH: &'static str = ".config/tunnel-editor/master.json";
}

impl MasterConfig {
    pub fn config_store(&self) -> ConfigStore {
        let store = ConfigStore::new(&self.config_dir);

        match &self.backup_dir {
            Some(backup_dir) => store.with_backup_dir(backup_dir),
            None => store,
        }
    }

    pub fn tunnel_logs(&self) -> TunnelLogs {
        TunnelLogs::new(&self.logs_dir)
    }

    /// The config directory is expected to be mounted before start.
    pub async fn check_config_dir(&self) -> Result<()> {
        match fs::metadata(&self.config_dir).await {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(Error::ConfigDirMissing(self.config_dir.clone())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::ConfigDirMissing(self.config_dir.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
