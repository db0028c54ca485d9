use std::sync::OnceLock;

use crate::*;

pub static MASTER_CONFIG: OnceLock<MasterConfig> = OnceLock::new();

pub async fn init() -> Result<&'static MasterConfig> {
    let master = MasterConfig::load_or_init().await?;
    master.check_config_dir().await?;

    Ok(MASTER_CONFIG.get_or_init(|| master))
}
