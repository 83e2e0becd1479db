use strum_macros::Display;

pub trait JSONBodyHTTPResponseType: HTTPResponseType {
    async fn parse_json_body(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError>
    where Self::ParsedResponseType: for<'de> serde::Deserialize<'de> {
        Ok(response.json::<Self::ParsedResponseType>().await?)
    }
}

/// Marker for responses that are plain JSON of their own shape.
pub trait SerdeJSONBodyHTTPResponseType {}

impl<T> JSONBodyHTTPResponseType for T
where
    T: SerdeJSONBodyHTTPResponseType,
    for<'de> T: serde::Deserialize<'de>,
{
}

impl<T> HTTPResponseType for T
where
    T: SerdeJSONBodyHTTPResponseType,
    for<'de> T: serde::Deserialize<'de>,
{
    type ParsedResponseType = T;

    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError> {
        let resp = Self::unwrap_return_code(response).await?;
        Self::parse_json_body(resp).await
    }
}

pub trait HTTPResponseType {
    type ParsedResponseType;
    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError>;

    async fn unwrap_return_code(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ResponseError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else if status.is_server_error() {
            Err(ResponseError::InternalServer(Some(status.as_u16())))
        } else if status.is_client_error() {
            let rejection = response.json().await.unwrap_or_else(|_| EfbErrorReturn {
                error: String::from("unreadable rejection body"),
            });
            Err(ResponseError::Rejected(rejection))
        } else {
            Err(ResponseError::Unknown)
        }
    }
}

/// Rejection body the EFB backend sends on 4xx answers, e.g. when loadsheet
/// data is not ready yet.
#[derive(Debug, serde::Deserialize)]
pub struct EfbErrorReturn {
    error: String,
}

impl EfbErrorReturn {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }

    pub fn error(&self) -> &str { &self.error }
}

#[derive(Debug, Display)]
pub enum ResponseError {
    /// 5xx answer; carries the status code when one was received.
    InternalServer(Option<u16>),
    /// Semantic rejection by the backend. Never retried.
    Rejected(EfbErrorReturn),
    NoConnection,
    Unknown,
}

impl ResponseError {
    /// Transport-level failures worth retrying, as opposed to rejections
    /// that will keep failing until preconditions change.
    pub fn is_transient(&self) -> bool {
        !matches!(self, ResponseError::Rejected(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ResponseError::InternalServer(status) => *status,
            _ => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ResponseError::InternalServer(Some(status)) => format!("backend error {status}"),
            ResponseError::InternalServer(None) => String::from("backend error"),
            ResponseError::Rejected(reason) => String::from(reason.error()),
            ResponseError::NoConnection => String::from("backend unreachable"),
            ResponseError::Unknown => String::from("unknown transport failure"),
        }
    }
}

impl std::error::Error for ResponseError {}

impl From<reqwest::Error> for ResponseError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() || value.is_redirect() {
            ResponseError::InternalServer(None)
        } else if value.is_connect() {
            ResponseError::NoConnection
        } else {
            ResponseError::Unknown
        }
    }
}
