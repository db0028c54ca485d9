use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use chrono::{Local, NaiveDateTime};
use log::{debug, info};
use tokio::{fs, sync::Mutex};

use crate::*;

/// The tunnel config file and its backups.
///
/// Every load and save holds `lock`, so saves issued by concurrent requests
/// run their backup and write steps one after the other.
pub struct ConfigStore {
    path: PathBuf,
    backup_dir: PathBuf,
    lock: Mutex<()>,
}

impl ConfigStore {
    pub const FILE_NAME: &'static str = "config.yaml";

    pub fn new(config_dir: impl AsRef<Path>) -> Self {
        let config_dir = config_dir.as_ref();

        Self {
            path: config_dir.join(Self::FILE_NAME),
            backup_dir: config_dir.to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn with_backup_dir(mut self, backup_dir: impl Into<PathBuf>) -> Self {
        self.backup_dir = backup_dir.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Reads the current config. A missing file is an empty config, and
    /// tunnels without a direction come back as `remote_to_local`.
    pub async fn load(&self) -> Result<TunnelConfig> {
        let _guard = self.lock.lock().await;

        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(TunnelConfig::default()),
            Err(e) => return Err(e.into()),
        };

        let mut config = TunnelConfig::from_yaml(&content)?;
        config.apply_defaults();

        Ok(config)
    }

    /// Backs up the current file, then overwrites it with `config`.
    /// Returns the backup path, if a previous file existed.
    pub async fn save(&self, config: &TunnelConfig) -> Result<Option<PathBuf>> {
        self.save_at(config, Local::now().naive_local()).await
    }

    pub async fn save_at(
        &self,
        config: &TunnelConfig,
        now: NaiveDateTime,
    ) -> Result<Option<PathBuf>> {
        let _guard = self.lock.lock().await;

        let backup = if fs::try_exists(&self.path).await? {
            fs::create_dir_all(&self.backup_dir).await?;

            let backup = self.backup_dir.join(backup_file_name(now));
            fs::copy(&self.path, &backup).await?;
            debug!("backed up {} to {}", self.path.display(), backup.display());

            Some(backup)
        } else {
            None
        };

        fs::write(&self.path, config.to_yaml()?).await?;
        info!(
            "saved {} tunnels to {}",
            config.tunnels.len(),
            self.path.display()
        );

        Ok(backup)
    }
}

/// `config_<YYYYMMDDHHMMSS>.yaml`. Saves within the same second share a name.
pub fn backup_file_name(time: NaiveDateTime) -> String {
    format!("config_{}.yaml", time.format("%Y%m%d%H%M%S"))
}
