//! HTTP persistence adapter for the LabelKit server.

use super::{BoxFuture, PersistenceAdapter, PersistenceError, PersistenceResult};
use crate::document::CanvasDocument;
use crate::elements::{Element, ElementDraft, ElementId, ElementPatch};
use reqwest::{Client, Response, StatusCode};

/// JSON client for the template/element CRUD server.
pub struct HttpAdapter {
    client: Client,
    base_url: String,
}

impl HttpAdapter {
    /// Create an adapter for a server base URL, e.g.
    /// `http://localhost:4600`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Map an HTTP response to the persistence error taxonomy.
async fn check_status(response: Response) -> PersistenceResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    match status {
        StatusCode::NOT_FOUND => Err(PersistenceError::NotFound(body)),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            Err(PersistenceError::Validation(body))
        }
        _ => Err(PersistenceError::Network(format!("{status}: {body}"))),
    }
}

fn request_error(err: reqwest::Error) -> PersistenceError {
    PersistenceError::Network(err.to_string())
}

fn decode_error(err: reqwest::Error) -> PersistenceError {
    PersistenceError::Serialization(err.to_string())
}

impl PersistenceAdapter for HttpAdapter {
    fn fetch_document(
        &self,
        template_id: &str,
    ) -> BoxFuture<'_, PersistenceResult<CanvasDocument>> {
        let client = self.client.clone();
        let url = self.url(&format!("/templates/{template_id}/document"));
        Box::pin(async move {
            let response = client.get(url).send().await.map_err(request_error)?;
            let response = check_status(response).await?;
            response.json().await.map_err(decode_error)
        })
    }

    fn create_element(
        &self,
        template_id: &str,
        draft: ElementDraft,
    ) -> BoxFuture<'_, PersistenceResult<Element>> {
        let client = self.client.clone();
        let url = self.url(&format!("/templates/{template_id}/elements"));
        Box::pin(async move {
            let response = client
                .post(url)
                .json(&draft)
                .send()
                .await
                .map_err(request_error)?;
            let response = check_status(response).await?;
            response.json().await.map_err(decode_error)
        })
    }

    fn update_element(
        &self,
        id: ElementId,
        patch: ElementPatch,
    ) -> BoxFuture<'_, PersistenceResult<Element>> {
        let client = self.client.clone();
        let url = self.url(&format!("/elements/{id}"));
        Box::pin(async move {
            let response = client
                .patch(url)
                .json(&patch)
                .send()
                .await
                .map_err(request_error)?;
            let response = check_status(response).await?;
            response.json().await.map_err(decode_error)
        })
    }

    fn delete_element(&self, id: ElementId) -> BoxFuture<'_, PersistenceResult<()>> {
        let client = self.client.clone();
        let url = self.url(&format!("/elements/{id}"));
        Box::pin(async move {
            let response = client.delete(url).send().await.map_err(request_error)?;
            check_status(response).await?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalization() {
        let adapter = HttpAdapter::new("http://localhost:4600///");
        assert_eq!(
            adapter.url("/templates/t1/document"),
            "http://localhost:4600/templates/t1/document"
        );
    }
}
