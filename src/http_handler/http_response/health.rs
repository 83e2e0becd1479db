use crate::http_handler::http_response::response_common::SerdeJSONBodyHTTPResponseType;

#[derive(Debug, serde::Deserialize)]
pub struct HealthResponse {
    version: String,
}

impl SerdeJSONBodyHTTPResponseType for HealthResponse {}

impl HealthResponse {
    pub fn version(&self) -> &str { &self.version }
}
