use std::time::Duration;

use bytes::BytesMut;
use futures_util::StreamExt;
use jester_logging::jester_trace;
use reqwest::header::ACCEPT;
use serde::Deserialize;

use crate::{FailureKind, FetchError};

pub const DEFAULT_ENDPOINT: &str = "https://icanhazdadjoke.com/";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub endpoint: String,
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: concat!("jester/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 64 * 1024,
        }
    }
}

/// A remote source handing out one joke text per call.
#[async_trait::async_trait]
pub trait JokeProvider: Send + Sync {
    async fn fetch_joke(&self) -> Result<String, FetchError>;
}

#[derive(Debug, Deserialize)]
struct JokeResponse {
    joke: String,
}

/// HTTP provider speaking the `{ "joke": "..." }` JSON dialect.
#[derive(Debug, Clone)]
pub struct ReqwestProvider {
    settings: FetchSettings,
    endpoint: reqwest::Url,
    client: reqwest::Client,
}

impl ReqwestProvider {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let endpoint = reqwest::Url::parse(&settings.endpoint)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            endpoint,
            client,
        })
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<BytesMut, FetchError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut body = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl JokeProvider for ReqwestProvider {
    async fn fetch_joke(&self) -> Result<String, FetchError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = self.read_body(response).await?;
        jester_trace!("Provider answered with {} bytes", body.len());
        parse_joke(&body)
    }
}

fn parse_joke(body: &[u8]) -> Result<String, FetchError> {
    let parsed: JokeResponse = serde_json::from_slice(body)
        .map_err(|err| FetchError::new(FailureKind::MalformedResponse, err.to_string()))?;
    if parsed.joke.trim().is_empty() {
        return Err(FetchError::new(
            FailureKind::MalformedResponse,
            "joke field is blank",
        ));
    }
    Ok(parsed.joke)
}

fn too_large(max_bytes: u64, actual: u64) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::parse_joke;
    use crate::FailureKind;

    #[test]
    fn extra_fields_are_ignored() {
        let body = br#"{"id":"R7UfaahVfFd","joke":"My dog used to chase people on a bike.","status":200}"#;
        assert_eq!(
            parse_joke(body).unwrap(),
            "My dog used to chase people on a bike."
        );
    }

    #[test]
    fn missing_or_mistyped_joke_is_malformed() {
        let bodies: [&[u8]; 4] = [br#"{"status":200}"#, br#"{"joke":42}"#, b"<html></html>", b""];
        for body in bodies {
            let err = parse_joke(body).unwrap_err();
            assert_eq!(err.kind, FailureKind::MalformedResponse);
        }
    }

    #[test]
    fn blank_joke_is_malformed() {
        let err = parse_joke(br#"{"joke":"   "}"#).unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedResponse);
    }
}
