//! LabelKit Template Server
//!
//! CRUD server for label templates and their elements, backing the
//! designer's HTTP persistence adapter. Documents live in an in-memory
//! registry; element ids are assigned here, never by clients.
//!
//! ## Routes
//!
//! ```text
//! POST   /templates/{id}            create an empty template document
//! GET    /templates/{id}/document   fetch the full document
//! POST   /templates/{id}/elements   create an element (returns assigned id)
//! PATCH  /elements/{id}             apply a partial element update
//! DELETE /elements/{id}             delete an element
//! ```

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use dashmap::DashMap;
use kurbo::Size;
use labelkit_core::{CanvasDocument, Element, ElementDraft, ElementId, ElementPatch};
use serde::Deserialize;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use uuid::Uuid;

const DEFAULT_PORT: u16 = 4600;

/// In-memory template/element registry.
#[derive(Default)]
struct Registry {
    documents: DashMap<String, CanvasDocument>,
    /// Element id -> owning template id.
    element_index: DashMap<ElementId, String>,
}

impl Registry {
    /// Create an empty document for a template. Returns false when the
    /// template already exists.
    fn create_template(&self, template_id: &str, size: Size) -> bool {
        if self.documents.contains_key(template_id) {
            return false;
        }
        self.documents
            .insert(template_id.to_string(), CanvasDocument::new(size));
        true
    }

    fn document(&self, template_id: &str) -> Option<CanvasDocument> {
        self.documents.get(template_id).map(|doc| doc.value().clone())
    }

    fn create_element(&self, template_id: &str, draft: ElementDraft) -> Option<Element> {
        let mut document = self.documents.get_mut(template_id)?;
        let element = draft.into_element(Uuid::new_v4());
        self.element_index
            .insert(element.id, template_id.to_string());
        document.insert(element.clone());
        Some(element)
    }

    fn update_element(&self, id: ElementId, patch: &ElementPatch) -> Option<Element> {
        let template_id = self.element_index.get(&id)?.value().clone();
        let mut document = self.documents.get_mut(&template_id)?;
        let element = document.get_mut(id)?;
        patch.apply(element);
        Some(element.clone())
    }

    fn delete_element(&self, id: ElementId) -> bool {
        let Some((_, template_id)) = self.element_index.remove(&id) else {
            return false;
        };
        if let Some(mut document) = self.documents.get_mut(&template_id) {
            document.remove(id);
        }
        true
    }
}

#[derive(Debug, Deserialize)]
struct CreateTemplate {
    #[serde(default = "default_width")]
    width: f64,
    #[serde(default = "default_height")]
    height: f64,
}

fn default_width() -> f64 {
    400.0
}

fn default_height() -> f64 {
    300.0
}

async fn create_template(
    State(registry): State<Arc<Registry>>,
    Path(template_id): Path<String>,
    Json(body): Json<CreateTemplate>,
) -> impl IntoResponse {
    if registry.create_template(&template_id, Size::new(body.width, body.height)) {
        info!("created template {template_id}");
        StatusCode::CREATED.into_response()
    } else {
        (
            StatusCode::CONFLICT,
            format!("template {template_id} already exists"),
        )
            .into_response()
    }
}

async fn fetch_document(
    State(registry): State<Arc<Registry>>,
    Path(template_id): Path<String>,
) -> impl IntoResponse {
    match registry.document(&template_id) {
        Some(document) => Json(document).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            format!("template {template_id} not found"),
        )
            .into_response(),
    }
}

async fn create_element(
    State(registry): State<Arc<Registry>>,
    Path(template_id): Path<String>,
    Json(draft): Json<ElementDraft>,
) -> impl IntoResponse {
    match registry.create_element(&template_id, draft) {
        Some(element) => {
            info!("created element {} in template {template_id}", element.id);
            (StatusCode::CREATED, Json(element)).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            format!("template {template_id} not found"),
        )
            .into_response(),
    }
}

async fn update_element(
    State(registry): State<Arc<Registry>>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ElementPatch>,
) -> impl IntoResponse {
    match registry.update_element(id, &patch) {
        Some(element) => Json(element).into_response(),
        None => {
            warn!("update for unknown element {id}");
            (StatusCode::NOT_FOUND, format!("element {id} not found")).into_response()
        }
    }
}

async fn delete_element(
    State(registry): State<Arc<Registry>>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if registry.delete_element(id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        (StatusCode::NOT_FOUND, format!("element {id} not found")).into_response()
    }
}

fn router(registry: Arc<Registry>) -> Router {
    Router::new()
        .route("/templates/{id}", post(create_template))
        .route("/templates/{id}/document", get(fetch_document))
        .route("/templates/{id}/elements", post(create_element))
        .route(
            "/elements/{id}",
            patch(update_element).delete(delete_element),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(registry)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "labelkit_server=info,tower_http=info".into()),
        )
        .init();

    let port = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let registry = Arc::new(Registry::default());
    let app = router(registry);

    info!("labelkit-server listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("bind server address");
    axum::serve(listener, app).await.expect("serve");
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use labelkit_core::ElementKind;

    #[test]
    fn test_create_template_once() {
        let registry = Registry::default();
        assert!(registry.create_template("t1", Size::new(400.0, 300.0)));
        assert!(!registry.create_template("t1", Size::new(400.0, 300.0)));
        assert!(registry.document("t1").is_some());
        assert!(registry.document("missing").is_none());
    }

    #[test]
    fn test_element_lifecycle() {
        let registry = Registry::default();
        registry.create_template("t1", Size::new(400.0, 300.0));

        let element = registry
            .create_element("t1", ElementDraft::for_kind(ElementKind::Text))
            .unwrap();

        let updated = registry
            .update_element(element.id, &ElementPatch::position(Point::new(9.0, 9.0)))
            .unwrap();
        assert_eq!(updated.position, Point::new(9.0, 9.0));

        assert!(registry.delete_element(element.id));
        assert!(!registry.delete_element(element.id));
        assert!(registry.document("t1").unwrap().is_empty());
    }

    #[test]
    fn test_create_element_unknown_template() {
        let registry = Registry::default();
        assert!(
            registry
                .create_element("nope", ElementDraft::for_kind(ElementKind::Text))
                .is_none()
        );
    }
}
