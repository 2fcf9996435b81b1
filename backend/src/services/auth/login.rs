use crate::capabilities::Capabilities;
use crate::error::ServiceError;
use actix_web::{web, HttpResponse, Responder};
use common::error::ValidationError;
use common::requests::{LoginRequest, LoginResponse};
use log::{info, warn};

pub async fn process(
    capabilities: web::Data<Capabilities>,
    payload: web::Json<LoginRequest>,
) -> impl Responder {
    match login(&capabilities, &payload).await {
        Ok(resp) => HttpResponse::Ok().json(resp),
        Err(e) => e.to_response(),
    }
}

async fn login(capabilities: &Capabilities, req: &LoginRequest) -> Result<LoginResponse, ServiceError> {
    let username = req.username.trim();
    let verifier = capabilities.credentials.read().await;
    match verifier.verify(username, &req.password) {
        Some(role) => {
            info!("{} logged in as {:?}", username, role);
            Ok(LoginResponse {
                username: username.to_string(),
                role,
            })
        }
        None => {
            warn!("Failed login for {}", username);
            Err(ValidationError::InvalidCredentials.into())
        }
    }
}
