use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EmbeddingRequest<'a> {
    pub active: &'a str,
    pub passive: &'a str,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct EmbeddingResponse {
    pub active: Coordinates,
    pub passive: Coordinates,
}

/// Something that can place a sentence pair in the 2-D embedding space.
pub trait EmbeddingService: Send + Sync {
    fn embed(&self, active: &str, passive: &str) -> Result<EmbeddingResponse>;
}

/// The hosted embedding function, reached with a JSON `POST`.
pub struct HttpEmbeddingService {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpEmbeddingService {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { endpoint: endpoint.to_string(), client })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl EmbeddingService for HttpEmbeddingService {
    fn embed(&self, active: &str, passive: &str) -> Result<EmbeddingResponse> {
        let body = self
            .client
            .post(&self.endpoint)
            .json(&EmbeddingRequest { active, passive })
            .send()
            .with_context(|| format!("Request to {} failed", self.endpoint))?
            .error_for_status()
            .with_context(|| format!("{} returned an error status", self.endpoint))?
            .text()
            .context("Failed to read embedding response body")?;
        parse_response(&body)
    }
}

pub fn parse_response(body: &str) -> Result<EmbeddingResponse> {
    serde_json::from_str(body).with_context(|| {
        let preview: String = body.chars().take(120).collect();
        format!("Malformed embedding response: {}", preview)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_as_active_passive_object() {
        let json = serde_json::to_value(EmbeddingRequest { active: "foo", passive: "bar" }).unwrap();
        assert_eq!(json, serde_json::json!({"active": "foo", "passive": "bar"}));
    }

    #[test]
    fn parses_integer_and_float_coordinates() {
        let response =
            parse_response(r#"{"active":{"x":1,"y":1},"passive":{"x":2.5,"y":-0.25}}"#).unwrap();
        assert_eq!(response.active, Coordinates { x: 1.0, y: 1.0 });
        assert_eq!(response.passive, Coordinates { x: 2.5, y: -0.25 });
    }

    #[test]
    fn malformed_response_is_an_error() {
        assert!(parse_response("<html>502 Bad Gateway</html>").is_err());
        assert!(parse_response(r#"{"active":{"x":1,"y":1}}"#).is_err());
    }
}
