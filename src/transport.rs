use std::time::Duration;

use serde_json::Value;

use crate::envelope::RequestEnvelope;
use crate::error::CreosonError;

/// Which CREOSON servlet a request is addressed to.
///
/// The two endpoints differ only in URL path: the general JSON API lives
/// under `/creoson`, server introspection under `/server`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Endpoint {
    Creoson,
    Server,
}

#[derive(Debug)]
pub(crate) struct Transport {
    http: reqwest::Client,
    creoson_url: String,
    server_url: String,
    timeout: Duration,
}

impl Transport {
    pub(crate) fn new(base_url: &str, timeout: Duration) -> Result<Self, CreosonError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| CreosonError::Config {
                reason: err.to_string(),
            })?;

        Ok(Self {
            http,
            creoson_url: format!("{base_url}/creoson"),
            server_url: format!("{base_url}/server"),
            timeout,
        })
    }

    /// One synchronous request/response exchange: POST the envelope, fail
    /// on a non-success HTTP status, parse the body as JSON.
    pub(crate) async fn roundtrip(
        &self,
        endpoint: Endpoint,
        request: &RequestEnvelope<'_>,
    ) -> Result<Value, CreosonError> {
        let url = match endpoint {
            Endpoint::Creoson => &self.creoson_url,
            Endpoint::Server => &self.server_url,
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            command = request.command,
            function = request.function,
            url,
            "posting request"
        );

        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|err| self.map_request_error(url, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CreosonError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|err| self.map_request_error(url, err))?;

        serde_json::from_str(&body).map_err(|err| CreosonError::Decode {
            reason: err.to_string(),
        })
    }

    fn map_request_error(&self, url: &str, error: reqwest::Error) -> CreosonError {
        if error.is_timeout() {
            return CreosonError::Timeout {
                timeout: self.timeout,
            };
        }

        CreosonError::Transport {
            url: url.to_string(),
            reason: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::Transport;

    #[test]
    fn new_derives_both_endpoint_urls() {
        let transport = Transport::new("http://localhost:9056", Duration::from_millis(100))
            .expect("transport should build");
        assert_eq!(transport.creoson_url, "http://localhost:9056/creoson");
        assert_eq!(transport.server_url, "http://localhost:9056/server");
    }
}
