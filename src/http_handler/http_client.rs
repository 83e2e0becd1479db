/// A thin wrapper around `reqwest::Client` with a preconfigured base URL.
///
/// All EFB calls go to the loopback backend the aircraft system runs on a
/// fixed port, so the client is created once and shared. It sets a fixed
/// short timeout; the backend answers locally or not at all.
#[derive(Debug)]
pub struct HTTPClient {
    client: reqwest::Client,
    base_url: String,
}

impl HTTPClient {
    const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5);

    /// # Arguments
    /// * `base_url` – root URL of the EFB backend, e.g. `"http://localhost:8083"`.
    pub fn new(base_url: &str) -> HTTPClient {
        HTTPClient {
            client: reqwest::Client::builder()
                .timeout(Self::REQUEST_TIMEOUT)
                .build()
                .unwrap(),
            base_url: String::from(base_url),
        }
    }

    pub(super) fn client(&self) -> &reqwest::Client { &self.client }
    pub fn url(&self) -> &str { self.base_url.as_str() }
}
