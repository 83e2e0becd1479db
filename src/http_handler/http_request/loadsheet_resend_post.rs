use super::request_common::{HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType};
use crate::http_handler::http_response::ack::AckResponse;

/// Pushes the last generated loadsheet to the MCDU again; used when its
/// scratchpad content was cleared externally.
#[derive(Debug)]
pub struct ResendLoadsheetRequest {}

impl NoBodyHTTPRequestType for ResendLoadsheetRequest {}

impl HTTPRequestType for ResendLoadsheetRequest {
    type Response = AckResponse;
    fn endpoint(&self) -> &'static str { "/efb/loadsheet/resend" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
}
