use actix_web::{HttpResponse, Responder};
use common::model::source_data::SourceKey;
use common::requests::MappingOption;

/// Keys a template field can be mapped to, in extraction order.
pub async fn process() -> impl Responder {
    let options: Vec<MappingOption> = SourceKey::ALL
        .iter()
        .map(|key| MappingOption {
            key: key.as_str().to_string(),
            label: key.label().to_string(),
        })
        .collect();
    HttpResponse::Ok().json(options)
}
