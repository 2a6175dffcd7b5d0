//! Response under construction by a handler chain.
//!
//! # Responsibilities
//! - Hold the status code and body bytes written by handlers
//! - Convert the finished response for the HTTP layer
//!
//! # Design Decisions
//! - Status defaults to 200, body to empty
//! - Bodies are sent as `text/plain; charset=utf-8`
//! - A status code HTTP cannot represent becomes 500

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    body: Vec<u8>,
}

impl Default for Response {
    fn default() -> Self {
        Self {
            status: 200,
            body: Vec::new(),
        }
    }
}

impl Response {
    pub fn set_status(&mut self, status: u16) {
        self.status = status;
    }

    pub fn append(&mut self, chunk: &[u8]) {
        self.body.extend_from_slice(chunk);
    }

    pub fn replace(&mut self, body: Vec<u8>) {
        self.body = body;
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}

impl IntoResponse for Response {
    fn into_response(self) -> axum::response::Response {
        let status = match StatusCode::from_u16(self.status) {
            Ok(status) => status,
            Err(_) => {
                tracing::error!(status = self.status, "Handler set an invalid status code");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, [(header::CONTENT_TYPE, TEXT_PLAIN)], self.body).into_response()
    }
}
