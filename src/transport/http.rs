use super::{Method, Request, Response, Transport};
use crate::config::ConnectionConfig;
use crate::error::{ApiError, Result};
use reqwest::blocking::Client;
use std::time::Duration;

/// Blocking HTTP transport over reqwest.
///
/// GET and DELETE send their arguments as a query string, POST as a form
/// body. A configured session token is sent as `Authorization: Splunk <token>`.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self> {
        Self::build(base_url.into(), token, None)
    }

    pub fn from_config(connection: &ConnectionConfig) -> Result<Self> {
        Self::build(
            connection.base_url(),
            connection.token.clone(),
            connection.timeout_secs.map(Duration::from_secs),
        )
    }

    fn build(base_url: String, token: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    fn send(&self, path: &str, request: &Request) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        let pairs = request.args.to_pairs()?;
        let builder = match request.method {
            Method::Get => self.client.get(&url).query(&pairs),
            Method::Delete => self.client.delete(&url).query(&pairs),
            Method::Post => self.client.post(&url).form(&pairs),
        };
        let builder = match &self.token {
            Some(token) => builder.header("Authorization", format!("Splunk {}", token)),
            None => builder,
        };

        let response = builder.send()?;
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
        let body = response.bytes()?.to_vec();
        Ok(Response {
            status,
            headers,
            body,
        })
    }
}
