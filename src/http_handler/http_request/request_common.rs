use crate::http_handler::http_client::HTTPClient;
use crate::http_handler::http_response::response_common::{HTTPResponseType, ResponseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HTTPRequestMethod {
    Get,
    Post,
    Put,
    Delete,
}

pub trait HTTPRequestType {
    type Response: HTTPResponseType;
    fn endpoint(&self) -> &str;
    fn request_method(&self) -> HTTPRequestMethod;
    fn header_params(&self) -> reqwest::header::HeaderMap {
        reqwest::header::HeaderMap::default()
    }

    fn builder(&self, client: &HTTPClient) -> reqwest::RequestBuilder {
        let url = format!("{}{}", client.url(), self.endpoint());
        let builder = match self.request_method() {
            HTTPRequestMethod::Get => client.client().get(url),
            HTTPRequestMethod::Post => client.client().post(url),
            HTTPRequestMethod::Put => client.client().put(url),
            HTTPRequestMethod::Delete => client.client().delete(url),
        };
        builder.headers(self.header_params())
    }
}

/// Requests without a body; `send_request` is the single transport entry.
pub trait NoBodyHTTPRequestType: HTTPRequestType {
    async fn send_request(
        &self,
        client: &HTTPClient,
    ) -> Result<<Self::Response as HTTPResponseType>::ParsedResponseType, ResponseError> {
        let response = self.builder(client).send().await?;
        Self::Response::read_response(response).await
    }
}

/// Requests carrying a JSON body.
pub trait JSONBodyHTTPRequestType: HTTPRequestType {
    type Body: serde::Serialize;
    fn body(&self) -> &Self::Body;

    async fn send_request(
        &self,
        client: &HTTPClient,
    ) -> Result<<Self::Response as HTTPResponseType>::ParsedResponseType, ResponseError> {
        let response = self.builder(client).json(self.body()).send().await?;
        Self::Response::read_response(response).await
    }
}
