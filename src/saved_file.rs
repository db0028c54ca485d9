use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use log::info;
use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;

use crate::*;

/// A JSON file kept under the home directory.
#[async_trait]
pub trait SavedFile: Serialize + DeserializeOwned + Default + Send + Sync {
    const PATH: &'static str;

    fn path() -> Result<PathBuf> {
        Ok(dirs::home_dir().ok_or(Error::NoHomeDir)?.join(Self::PATH))
    }

    async fn load() -> Result<Self> {
        let content = fs::read_to_string(Self::path()?).await?;

        Ok(serde_json::from_str(&content)?)
    }

    /// Loads the file, writing out the defaults first if it does not exist.
    async fn load_or_init() -> Result<Self> {
        match Self::load().await {
            Err(Error::Io(e)) if e.kind() == ErrorKind::NotFound => {
                let initial = Self::default();
                initial.save().await?;
                info!("created {}", Self::path()?.display());
                Ok(initial)
            }
            loaded => loaded,
        }
    }

    async fn save(&self) -> Result<()> {
        let path = Self::path()?;
        let content = serde_json::to_string_pretty(&self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        Ok(fs::write(path, content).await?)
    }
}
