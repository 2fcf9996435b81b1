//! # Admin Draft Service Module
//!
//! Authoring flow for new templates under `/api/admin/drafts`:
//!
//! 1. `create`: multipart upload of a `json` part (`{name, type}`) and the
//!    reference `file` (image or PDF).
//! 2. `detect`: background job that fills the draft with detected fields.
//! 3. `fields`: manual add, edit and remove, the same mutators as listed
//!    templates.
//! 4. `finalize`: publish checks, then the template is appended to the
//!    registry and the draft is dropped.

mod create;
mod detect;
mod fields;
mod finalize;
mod get;

use actix_web::web::{delete, get, patch, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/admin/drafts";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(create::process))
        .route("/{draft_id}", get().to(get::process))
        .route("/{draft_id}/detect", post().to(detect::process))
        .route("/{draft_id}/fields", post().to(fields::add))
        .route("/{draft_id}/fields/{field_id}", patch().to(fields::update))
        .route("/{draft_id}/fields/{field_id}", delete().to(fields::remove))
        .route("/{draft_id}/finalize", post().to(finalize::process))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{multipart_body, wait_for_job, TestContext};
    use actix_web::http::header::CONTENT_TYPE;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use common::jobs::JobStatus;
    use common::model::draft::TemplateDraft;
    use common::model::field::DocumentField;
    use common::model::template::{DocumentTemplate, TemplateBackground};
    use common::requests::JobAccepted;
    use serde_json::json;

    fn draft_upload(json_part: &str, filename: &str, mime: &str) -> test::TestRequest {
        let (content_type, body) = multipart_body(&[
            ("json", None, "application/json", json_part.as_bytes()),
            ("file", Some(filename), mime, b"%PDF-1.4 reference".as_slice()),
        ]);
        test::TestRequest::post()
            .uri("/api/admin/drafts")
            .insert_header((CONTENT_TYPE, content_type))
            .set_payload(body)
    }

    #[actix_web::test]
    async fn draft_lifecycle_publishes_template() {
        let ctx = TestContext::new();
        let app = test::init_service(App::new().configure(|c| ctx.register(c))).await;

        let req = draft_upload(r#"{"name": "STCW Refresher"}"#, "ref.pdf", "application/pdf")
            .to_request();
        let draft: TemplateDraft = test::call_and_read_body_json(&app, req).await;
        assert_eq!(draft.template.kind, "certificate");
        assert_eq!(draft.reference(), Some(&TemplateBackground::Pdf));
        let base = format!("/api/admin/drafts/{}", draft.template.id);

        let req = test::TestRequest::post()
            .uri(&format!("{}/finalize", base))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri(&format!("{}/detect", base))
            .to_request();
        let accepted: JobAccepted = test::call_and_read_body_json(&app, req).await;
        let status = wait_for_job(&ctx.jobs, &accepted.job_id).await;
        assert!(matches!(status, JobStatus::Completed(_)));

        let req = test::TestRequest::post()
            .uri(&format!("{}/fields", base))
            .to_request();
        let added: DocumentField = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::patch()
            .uri(&format!("{}/fields/{}", base, added.id))
            .set_json(json!({"label": "Vessel Name"}))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        let req = test::TestRequest::post()
            .uri(&format!("{}/finalize", base))
            .to_request();
        let template: DocumentTemplate = test::call_and_read_body_json(&app, req).await;
        assert_eq!(template.fields.len(), 8);
        assert_eq!(template.name, "STCW Refresher");

        let listed = ctx.registry.list().await;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[1].id, draft.template.id);

        let req = test::TestRequest::get().uri(&base).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn unsupported_reference_is_rejected() {
        let ctx = TestContext::new();
        let app = test::init_service(App::new().configure(|c| ctx.register(c))).await;

        let req = draft_upload(r#"{"name": "X"}"#, "notes.txt", "text/plain").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn missing_json_part_is_rejected() {
        let ctx = TestContext::new();
        let app = test::init_service(App::new().configure(|c| ctx.register(c))).await;

        let (content_type, body) =
            multipart_body(&[("file", Some("ref.pdf"), "application/pdf", b"%PDF".as_slice())]);
        let req = test::TestRequest::post()
            .uri("/api/admin/drafts")
            .insert_header((CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
