use super::request_common::{HTTPRequestMethod, HTTPRequestType, JSONBodyHTTPRequestType};
use crate::http_handler::http_response::loadsheet::LoadsheetData;
use crate::services::loadsheet::LoadsheetType;

#[derive(Debug, serde::Serialize)]
pub struct GenerateLoadsheetBody {
    #[serde(rename = "type")]
    loadsheet_type: String,
}

#[derive(Debug)]
pub struct GenerateLoadsheetRequest {
    body: GenerateLoadsheetBody,
}

impl GenerateLoadsheetRequest {
    pub fn new(loadsheet_type: LoadsheetType) -> Self {
        Self {
            body: GenerateLoadsheetBody { loadsheet_type: loadsheet_type.to_string() },
        }
    }
}

impl JSONBodyHTTPRequestType for GenerateLoadsheetRequest {
    type Body = GenerateLoadsheetBody;
    fn body(&self) -> &Self::Body { &self.body }
}

impl HTTPRequestType for GenerateLoadsheetRequest {
    type Response = LoadsheetData;
    fn endpoint(&self) -> &'static str { "/efb/loadsheet" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
}
