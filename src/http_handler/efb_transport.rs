use super::http_client::HTTPClient;
use super::http_request::health_get::HealthRequest;
use super::http_request::loadsheet_generate_post::GenerateLoadsheetRequest;
use super::http_request::loadsheet_resend_post::ResendLoadsheetRequest;
use super::http_request::loadsheet_reset_delete::ResetLoadsheetsRequest;
use super::http_request::request_common::{JSONBodyHTTPRequestType, NoBodyHTTPRequestType};
use super::http_response::loadsheet::LoadsheetData;
use super::http_response::response_common::ResponseError;
use crate::services::loadsheet::{LoadsheetTransport, LoadsheetType};
use async_trait::async_trait;
use std::sync::Arc;

/// Production [`LoadsheetTransport`] over the EFB backend's REST surface.
pub struct EfbTransport {
    client: Arc<HTTPClient>,
}

impl EfbTransport {
    pub fn new(client: Arc<HTTPClient>) -> Self {
        Self { client }
    }

    /// Backend reachability probe, reported version on success.
    pub async fn health(&self) -> Result<String, ResponseError> {
        let response = HealthRequest {}.send_request(&self.client).await?;
        Ok(String::from(response.version()))
    }
}

#[async_trait]
impl LoadsheetTransport for EfbTransport {
    async fn generate(&self, loadsheet: LoadsheetType) -> Result<LoadsheetData, ResponseError> {
        GenerateLoadsheetRequest::new(loadsheet).send_request(&self.client).await
    }

    async fn resend(&self) -> Result<(), ResponseError> {
        ResendLoadsheetRequest {}.send_request(&self.client).await.map(|_| ())
    }

    async fn reset(&self) -> Result<(), ResponseError> {
        ResetLoadsheetsRequest {}.send_request(&self.client).await.map(|_| ())
    }
}
