//! # Template Registry
//!
//! Holds every listed template for the life of the process. Each template is
//! one shared instance (`Arc<RwLock<_>>`): a field edit made through
//! [`TemplateRegistry::get`] is what the next [`TemplateRegistry::list`]
//! returns. Readers always receive whole snapshots, never a template halfway
//! through an edit.
//!
//! Ids are not checked for duplicates on `add`. When two templates share an
//! id, `get` returns the one added first.

pub mod builtin;

use common::model::template::DocumentTemplate;
use std::sync::Arc;
use tokio::sync::RwLock;

pub type SharedTemplate = Arc<RwLock<DocumentTemplate>>;

#[derive(Clone, Default)]
pub struct TemplateRegistry {
    templates: Arc<RwLock<Vec<SharedTemplate>>>,
}

impl TemplateRegistry {
    pub fn with_templates(templates: Vec<DocumentTemplate>) -> Self {
        Self {
            templates: Arc::new(RwLock::new(
                templates
                    .into_iter()
                    .map(|t| Arc::new(RwLock::new(t)))
                    .collect(),
            )),
        }
    }

    /// Snapshots of every template, in insertion order.
    pub async fn list(&self) -> Vec<DocumentTemplate> {
        let handles: Vec<SharedTemplate> = self.templates.read().await.clone();
        let mut out = Vec::with_capacity(handles.len());
        for handle in handles {
            out.push(handle.read().await.clone());
        }
        out
    }

    pub async fn add(&self, template: DocumentTemplate) -> SharedTemplate {
        let shared = Arc::new(RwLock::new(template));
        self.templates.write().await.push(shared.clone());
        shared
    }

    pub async fn get(&self, id: &str) -> Option<SharedTemplate> {
        let handles: Vec<SharedTemplate> = self.templates.read().await.clone();
        for handle in handles {
            if handle.read().await.id == id {
                return Some(handle);
            }
        }
        None
    }

    pub async fn snapshot(&self, id: &str) -> Option<DocumentTemplate> {
        match self.get(id).await {
            Some(handle) => Some(handle.read().await.clone()),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::field::FieldPatch;

    fn template(id: &str, name: &str) -> DocumentTemplate {
        DocumentTemplate::new(id, name, "certificate")
    }

    #[actix_web::test]
    async fn list_keeps_insertion_order() {
        let registry = TemplateRegistry::default();
        registry.add(template("b", "B")).await;
        registry.add(template("a", "A")).await;
        let ids: Vec<String> = registry.list().await.into_iter().map(|t| t.id).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[actix_web::test]
    async fn edits_through_get_show_up_in_list() {
        let registry =
            TemplateRegistry::with_templates(builtin::builtin_templates("Atlantic Safety"));
        let handle = registry.get(builtin::BASIC_SAFETY_ID).await.unwrap();
        {
            let mut t = handle.write().await;
            let patch = FieldPatch {
                label: Some("Certificate No.".to_string()),
                ..FieldPatch::default()
            };
            t.update_field("cert-num", &patch).unwrap();
        }
        let listed = registry.list().await;
        assert_eq!(listed[0].fields[0].label, "Certificate No.");
    }

    #[actix_web::test]
    async fn duplicate_ids_resolve_to_first() {
        let registry = TemplateRegistry::default();
        registry.add(template("x", "First")).await;
        registry.add(template("x", "Second")).await;
        assert_eq!(registry.snapshot("x").await.unwrap().name, "First");
        assert_eq!(registry.list().await.len(), 2);
        assert!(registry.get("missing").await.is_none());
    }
}
