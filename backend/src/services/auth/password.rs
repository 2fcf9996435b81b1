use crate::capabilities::Capabilities;
use crate::config::AppConfig;
use crate::error::ServiceError;
use actix_web::{web, HttpResponse, Responder};
use common::requests::ChangePasswordRequest;
use log::info;

/// Changes the admin password. Nothing changes unless every rule passes.
pub async fn process(
    capabilities: web::Data<Capabilities>,
    config: web::Data<AppConfig>,
    payload: web::Json<ChangePasswordRequest>,
) -> impl Responder {
    match change_password(&capabilities, &config.admin_username, &payload).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "changed": true })),
        Err(e) => e.to_response(),
    }
}

async fn change_password(
    capabilities: &Capabilities,
    username: &str,
    req: &ChangePasswordRequest,
) -> Result<(), ServiceError> {
    let mut verifier = capabilities.credentials.write().await;
    verifier.change_password(
        username,
        &req.current_password,
        &req.new_password,
        &req.confirm_password,
    )?;
    info!("Password changed for {}", username);
    Ok(())
}
