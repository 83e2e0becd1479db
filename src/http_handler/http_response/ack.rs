use crate::http_handler::http_response::response_common::SerdeJSONBodyHTTPResponseType;

/// Plain acknowledgement for resend/reset calls.
#[derive(Debug, serde::Deserialize)]
pub struct AckResponse {
    message: Option<String>,
}

impl SerdeJSONBodyHTTPResponseType for AckResponse {}

impl AckResponse {
    pub fn message(&self) -> Option<&str> { self.message.as_deref() }
}
