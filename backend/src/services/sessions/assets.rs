use crate::data_url;
use crate::error::ServiceError;
use crate::services::upload::read_parts;
use crate::store::SessionStore;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use common::error::ValidationError;
use common::model::assets::{AssetCategory, AssetCollection};
use common::model::document::ensure_asset_mime;
use log::info;

/// Actix web handler for `POST /api/sessions/{session_id}/assets/{category}`.
///
/// # Arguments
/// * `path` - The session id and the asset category (`signatures`, `stamps`
///   or `logos`).
/// * `payload` - `multipart/form-data` with one or more image parts.
///
/// # Returns
/// - `200 OK` with the whole `AssetCollection` after the upload.
/// - `400 Bad Request` if any part is not a JPEG or PNG; nothing is added.
pub async fn upload(
    sessions: web::Data<SessionStore>,
    path: web::Path<(String, AssetCategory)>,
    payload: Multipart,
) -> impl Responder {
    let (session_id, category) = path.into_inner();
    match upload_assets(&sessions, &session_id, category, payload).await {
        Ok(assets) => HttpResponse::Ok().json(assets),
        Err(e) => e.to_response(),
    }
}

/// Appends every uploaded image, in request order, as an inline data URL.
async fn upload_assets(
    sessions: &SessionStore,
    session_id: &str,
    category: AssetCategory,
    payload: Multipart,
) -> Result<AssetCollection, ServiceError> {
    let mut images = Vec::new();
    for part in read_parts(payload).await? {
        if !part.is_file() {
            continue;
        }
        ensure_asset_mime(&part.mime, &part.filename)?;
        images.push(data_url::encode(&part.mime, &part.bytes));
    }
    if images.is_empty() {
        return Err(ServiceError::Upload("no images in request".to_string()));
    }

    let count = images.len();
    let assets = sessions
        .update(session_id, |s| s.upload_assets(category, images).cloned())
        .await?;
    info!("Session {}: {} {} uploaded", session_id, count, category);
    Ok(assets)
}

/// Drops the asset at `index`. An index past the end is a `400` and leaves
/// the collection as it was.
pub async fn remove(
    sessions: web::Data<SessionStore>,
    path: web::Path<(String, AssetCategory, usize)>,
) -> impl Responder {
    let (session_id, category, index) = path.into_inner();
    let result = sessions
        .update(&session_id, |s| -> Result<AssetCollection, ValidationError> {
            s.remove_asset(category, index).cloned()
        })
        .await;
    match result {
        Ok(assets) => HttpResponse::Ok().json(assets),
        Err(e) => e.to_response(),
    }
}
