use actix_web::{
    get,
    web::{Data, Json},
};
use chrono::Local;
use serde::Serialize;

use crate::*;

#[derive(Serialize)]
struct StatusResponse {
    tunnels: Vec<TunnelStatus>,
    timestamp: String,
}

#[get("/status")]
pub async fn status(store: Data<ConfigStore>, logs: Data<TunnelLogs>) -> Result<Json<StatusResponse>> {
    let config = store.load().await?;

    let mut tunnels = Vec::with_capacity(config.tunnels.len());
    for tunnel in config.tunnels {
        tunnels.push(logs.status(tunnel).await);
    }

    Ok(Json(StatusResponse {
        tunnels,
        timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    }))
}
