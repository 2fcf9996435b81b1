//! # Template Service Module
//!
//! Routes under `/api/templates` over the shared [`TemplateRegistry`](crate::registry::TemplateRegistry).
//!
//! ## Sub-modules:
//! - `list`: every listed template, in insertion order.
//! - `get`: one template by id.
//! - `mappings`: the source-data keys a field can be mapped to.
//! - `fields`: admin field mutators applied to the registry instance. Later
//!   `list`/`get` calls see the change; sessions that already selected the
//!   template keep their own copy.

mod fields;
mod get;
mod list;
mod mappings;

use actix_web::web::{delete, get, patch, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/templates";

/// # Registered Routes:
///
/// *   **`GET /api/templates`**: `list::process`
/// *   **`GET /api/templates/mappings`**: `mappings::process`. Registered
///     before `/{template_id}` so that `mappings` is never taken for an id.
/// *   **`GET /api/templates/{template_id}`**: `get::process`
/// *   **`POST /api/templates/{template_id}/fields`**: `fields::add`
/// *   **`PATCH /api/templates/{template_id}/fields/{field_id}`**: `fields::update`
/// *   **`DELETE /api/templates/{template_id}/fields/{field_id}`**: `fields::remove`
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("/mappings", get().to(mappings::process))
        .route("/{template_id}", get().to(get::process))
        .route("/{template_id}/fields", post().to(fields::add))
        .route("/{template_id}/fields/{field_id}", patch().to(fields::update))
        .route("/{template_id}/fields/{field_id}", delete().to(fields::remove))
}

#[cfg(test)]
mod tests {
    use crate::registry::builtin::BASIC_SAFETY_ID;
    use crate::test_support::TestContext;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use common::model::field::DocumentField;
    use common::model::template::DocumentTemplate;
    use common::requests::MappingOption;
    use serde_json::json;

    #[actix_web::test]
    async fn lists_the_builtin_template() {
        let ctx = TestContext::new();
        let app = test::init_service(App::new().configure(|c| ctx.register(c))).await;

        let req = test::TestRequest::get().uri("/api/templates").to_request();
        let templates: Vec<DocumentTemplate> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].id, BASIC_SAFETY_ID);
        assert_eq!(templates[0].company_info.name, ctx.config.company_name);
    }

    #[actix_web::test]
    async fn unknown_template_is_404() {
        let ctx = TestContext::new();
        let app = test::init_service(App::new().configure(|c| ctx.register(c))).await;

        let req = test::TestRequest::get().uri("/api/templates/nope").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn mapping_keys_are_listed() {
        let ctx = TestContext::new();
        let app = test::init_service(App::new().configure(|c| ctx.register(c))).await;

        let req = test::TestRequest::get().uri("/api/templates/mappings").to_request();
        let options: Vec<MappingOption> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(options.len(), 12);
        assert_eq!(options[0].key, "firstName");
    }

    #[actix_web::test]
    async fn field_edits_are_visible_to_later_reads() {
        let ctx = TestContext::new();
        let app = test::init_service(App::new().configure(|c| ctx.register(c))).await;
        let base = format!("/api/templates/{}", BASIC_SAFETY_ID);

        let req = test::TestRequest::post()
            .uri(&format!("{}/fields", base))
            .to_request();
        let added: DocumentField = test::call_and_read_body_json(&app, req).await;
        assert!(added.id.starts_with("custom-"));
        assert_eq!(added.name, "customField8");

        let req = test::TestRequest::patch()
            .uri(&format!("{}/fields/{}", base, added.id))
            .set_json(json!({"label": "Vessel", "mappedTo": "capacity"}))
            .to_request();
        let updated: DocumentField = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated.label, "Vessel");
        assert_eq!(updated.mapped_to.as_deref(), Some("capacity"));

        let req = test::TestRequest::delete()
            .uri(&format!("{}/fields/cert-num", base))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        let req = test::TestRequest::get().uri(&base).to_request();
        let template: DocumentTemplate = test::call_and_read_body_json(&app, req).await;
        assert_eq!(template.fields.len(), 7);
        assert!(template.field("cert-num").is_none());
        assert_eq!(template.fields[6].label, "Vessel");
    }

    #[actix_web::test]
    async fn last_field_of_a_listed_template_stays() {
        let ctx = TestContext::new();
        let app = test::init_service(App::new().configure(|c| ctx.register(c))).await;
        let base = format!("/api/templates/{}", BASIC_SAFETY_ID);
        let ids: Vec<String> = ctx
            .registry
            .snapshot(BASIC_SAFETY_ID)
            .await
            .unwrap()
            .fields
            .iter()
            .map(|f| f.id.clone())
            .collect();

        let (last, rest) = ids.split_last().unwrap();
        for id in rest {
            let req = test::TestRequest::delete()
                .uri(&format!("{}/fields/{}", base, id))
                .to_request();
            assert!(test::call_service(&app, req).await.status().is_success());
        }

        let req = test::TestRequest::delete()
            .uri(&format!("{}/fields/{}", base, last))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
        let template = ctx.registry.snapshot(BASIC_SAFETY_ID).await.unwrap();
        assert_eq!(template.fields.len(), 1);
        assert_eq!(&template.fields[0].id, last);
    }

    #[actix_web::test]
    async fn unknown_field_leaves_template_unchanged() {
        let ctx = TestContext::new();
        let app = test::init_service(App::new().configure(|c| ctx.register(c))).await;

        let req = test::TestRequest::delete()
            .uri(&format!("/api/templates/{}/fields/ghost", BASIC_SAFETY_ID))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let template = ctx.registry.snapshot(BASIC_SAFETY_ID).await.unwrap();
        assert_eq!(template.fields.len(), 7);
    }
}
