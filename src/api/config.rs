use actix_web::{
    get, post,
    web::{Bytes, Data, Json},
    HttpResponse,
};
use log::debug;
use serde_json::json;

use crate::*;

#[get("/config")]
pub async fn get_config(store: Data<ConfigStore>) -> Result<Json<TunnelConfig>> {
    Ok(Json(store.load().await?))
}

/// The body is read raw so that empty or malformed JSON gets the same
/// `Invalid data` answer as a missing `tunnels` key.
#[post("/config")]
pub async fn update_config(store: Data<ConfigStore>, body: Bytes) -> Result<HttpResponse> {
    debug!("received config: {}", String::from_utf8_lossy(&body));

    let config = ConfigUpdate::parse(&body)?;
    store.save(&config).await?;

    Ok(HttpResponse::Ok().json(json!({"status": "success"})))
}
