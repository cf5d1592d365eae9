//! HTTP client for the remote inference service.
//!
//! # Responsibilities
//! - Encode images and hints as multipart forms
//! - Map HTTP failures onto [`RemoteError`]
//! - Hand bodies to the contract checks
//!
//! Deadlines are enforced by the caller, so dropping a request future
//! cancels the outbound connection.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};

use crate::analysis::ImageData;
use crate::remote::contract;
use crate::remote::service::{
    HealthReport, InferenceService, RemoteError, RemoteHints, RemotePayload, ServiceEndpoint,
};

const USER_AGENT: &str = concat!("arbor-analysis/", env!("CARGO_PKG_VERSION"));

/// [`InferenceService`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpInferenceService {
    client: Client,
    endpoint: ServiceEndpoint,
}

impl HttpInferenceService {
    pub fn new(endpoint: ServiceEndpoint) -> Result<Self, RemoteError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client, endpoint })
    }

    async fn read_body(response: Response) -> Result<Vec<u8>, RemoteError> {
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

fn image_part(image: ImageData) -> Result<Part, RemoteError> {
    let mime = image.content_type();
    Part::bytes(image.bytes)
        .file_name(image.file_name)
        .mime_str(mime)
        .map_err(RemoteError::from)
}

#[async_trait]
impl InferenceService for HttpInferenceService {
    async fn health(&self) -> Result<HealthReport, RemoteError> {
        let response = self
            .client
            .get(self.endpoint.resolve("health"))
            .send()
            .await?;
        let body = Self::read_body(response).await?;
        contract::parse_health(&body)
    }

    async fn analyze(
        &self,
        image: ImageData,
        hints: RemoteHints<'_>,
    ) -> Result<RemotePayload, RemoteError> {
        let mut form = Form::new().part("file", image_part(image)?);
        if let Some(tree_type) = hints.tree_type {
            form = form.text("tree_type", tree_type.to_string());
        }
        if let Some(location) = hints.location {
            let gps = serde_json::to_string(&location)
                .map_err(|e| RemoteError::Transport(format!("cannot encode gps_data: {e}")))?;
            form = form.text("gps_data", gps);
        }

        let response = self
            .client
            .post(self.endpoint.resolve("analyze"))
            .multipart(form)
            .send()
            .await?;
        let body = Self::read_body(response).await?;
        contract::parse_analysis_body(&body)
    }

    async fn batch_analyze(
        &self,
        images: Vec<ImageData>,
        hints: RemoteHints<'_>,
    ) -> Result<Vec<RemotePayload>, RemoteError> {
        let mut form = Form::new();
        for image in images {
            form = form.part("files", image_part(image)?);
        }
        if let Some(tree_type) = hints.tree_type {
            form = form.text("tree_type", tree_type.to_string());
        }

        let response = self
            .client
            .post(self.endpoint.resolve("batch-analyze"))
            .multipart(form)
            .send()
            .await?;
        let body = Self::read_body(response).await?;
        contract::parse_batch_body(&body)
    }
}
