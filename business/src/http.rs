//! Thin request/response layer over `reqwest`.
//!
//! Responses are read fully into memory so commands can hand plain data (status and body
//! bytes) to parsing code without holding on to the connection.

use std::collections::HashMap;

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

#[derive(Debug, Error)]
pub enum HttpError {
    /// Connection, TLS or body read failure.
    #[error("{0}")]
    Transport(String),
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type HttpResult<T> = Result<T, HttpError>;

#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: String,
    headers: HashMap<String, String>,
    body: Option<Vec<u8>>,
}

impl RequestBuilder {
    fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn json<T: Serialize>(mut self, value: &T) -> HttpResult<Self> {
        self.body = Some(serde_json::to_vec(value)?);
        self.headers
            .insert("content-type".to_owned(), "application/json".to_owned());
        Ok(self)
    }

    pub async fn send(self) -> HttpResult<Response> {
        let client = reqwest::Client::new();
        let mut request = match self.method {
            Method::Get => client.get(&self.url),
            Method::Post => client.post(&self.url),
        };

        for (name, value) in &self.headers {
            request = request.header(name, value);
        }
        if let Some(body) = self.body {
            request = request.body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| HttpError::Transport(e.to_string()))?;

        let status = response.status().as_u16();

        let body = response
            .bytes()
            .await
            .map_err(|e| HttpError::Transport(e.to_string()))?
            .to_vec();

        Ok(Response { status, body })
    }
}

pub struct Client;

impl Client {
    pub fn get(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Method::Post, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &[u8]) -> Response {
        Response {
            status,
            body: body.to_vec(),
        }
    }

    #[test]
    fn success_range_is_2xx() {
        assert!(response(200, b"").is_success());
        assert!(response(204, b"").is_success());
        assert!(!response(302, b"").is_success());
        assert!(!response(401, b"").is_success());
    }

    #[test]
    fn json_body_sets_content_type() {
        #[derive(Serialize)]
        struct Body<'a> {
            username: &'a str,
        }

        let builder = Client::post("http://localhost/v1/auth/login")
            .json(&Body { username: "john" })
            .unwrap();

        assert_eq!(
            builder.headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(builder.body.as_deref(), Some(br#"{"username":"john"}"#.as_slice()));
    }

    #[test]
    fn parses_json_body() {
        let value: serde_json::Value = response(200, br#"{"userId":"u1"}"#).json().unwrap();
        assert_eq!(value["userId"], "u1");
    }
}
