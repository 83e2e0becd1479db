use super::request_common::{HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType};
use crate::http_handler::http_response::ack::AckResponse;

#[derive(Debug)]
pub struct ResetLoadsheetsRequest {}

impl NoBodyHTTPRequestType for ResetLoadsheetsRequest {}

impl HTTPRequestType for ResetLoadsheetsRequest {
    type Response = AckResponse;
    fn endpoint(&self) -> &'static str { "/efb/loadsheet" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Delete }
}
