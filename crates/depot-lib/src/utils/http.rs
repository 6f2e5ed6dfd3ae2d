use crate::error::TransportError;
use futures::future::BoxFuture;
use reqwest::Client;
use std::time::Duration;

/// Request/response primitive the fetch orchestrator runs on.
/// A timeout surfaces as a transport error like any other network failure.
pub trait Transport: Send + Sync {
    /// GET a document and return its body
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, TransportError>>;
}

/// `reqwest`-backed transport with a fixed per-request timeout
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::Request)?;

        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Request(err)
    }
}

impl Transport for HttpTransport {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>, TransportError>> {
        Box::pin(async move {
            log::info!("Requesting '{}'...", url);

            let response = self.client.get(url).send().await.map_err(classify)?;

            let status = response.status();
            if !status.is_success() {
                log::debug!("HTTP {} from {}", status, url);
                return Err(TransportError::Status {
                    status: status.as_u16(),
                });
            }

            let body = response.bytes().await.map_err(classify)?;
            Ok(body.to_vec())
        })
    }
}
