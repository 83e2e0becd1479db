use super::request_common::{HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType};
use crate::http_handler::http_response::health::HealthResponse;

/// Reachability probe used while waiting for the backend at startup.
#[derive(Debug)]
pub struct HealthRequest {}

impl NoBodyHTTPRequestType for HealthRequest {}

impl HTTPRequestType for HealthRequest {
    type Response = HealthResponse;
    fn endpoint(&self) -> &'static str { "/efb/health" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
}
