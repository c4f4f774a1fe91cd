use std::time::Duration;

use todos_core::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};

/// Blocking HTTP transport backed by a ureq agent.
///
/// Status-as-error is disabled so every completed exchange, 4xx and 5xx
/// included, is handed back for the client to classify.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn transport_error(error: ureq::Error) -> TransportError {
    match error {
        ureq::Error::Timeout(_) => TransportError::Timeout,
        ureq::Error::Io(e) => TransportError::Io(e),
        other => TransportError::Connection(other.to_string()),
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        tracing::debug!(method = request.method.as_str(), url = %request.path, "sending");

        let headers = &request.headers;
        let result = match request.method {
            HttpMethod::Get => with_headers(self.agent.get(&request.path), headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(&request.path), headers).call(),
            HttpMethod::Post | HttpMethod::Put => {
                let builder = if request.method == HttpMethod::Post {
                    self.agent.post(&request.path)
                } else {
                    self.agent.put(&request.path)
                };
                let builder = with_headers(builder, headers);
                match &request.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };

        let mut response = result.map_err(transport_error)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(transport_error)?;

        tracing::debug!(status, "received");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
